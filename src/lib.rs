//! # Storefront
//!
//! Inventory and cart reservation core for a small e-commerce backend, built on the generic
//! [`actor_framework`] crate.
//!
//! ## Stock model
//!
//! A product's `stock_quantity` is the count still available to reserve. Adding to a cart moves
//! units from that count onto a cart line; changing or removing the line moves them back. Units
//! are never created or destroyed by cart operations, only by catalog updates.
//!
//! All products, together with the cart lines holding their units, live in one
//! [`ResourceActor`](actor_framework::ResourceActor). It handles one request at a time against a
//! staged copy of the product and commits only on success, so the check and the write of a
//! reservation cannot interleave with another request.
//!
//! ## Module Tour
//!
//! - [`model`]: products, cart lines and the views returned to callers.
//! - [`product_actor`]: the [`ActorEntity`](actor_framework::ActorEntity) implementation, its
//!   reservation actions and error types.
//! - [`clients`]: [`ProductClient`](clients::ProductClient) for the catalog and
//!   [`CartClient`](clients::CartClient) for reservations.
//! - [`lifecycle`]: [`Storefront`](lifecycle::Storefront) startup, seeding, health and shutdown.
//! - [`config`]: environment configuration.
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
