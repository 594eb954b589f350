//! Startup, seeding and shutdown of the storefront's actors.

pub mod seed;
pub mod storefront;

pub use storefront::*;
