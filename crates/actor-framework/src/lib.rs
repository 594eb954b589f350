//! # Actor Framework
//!
//! Building blocks for type-safe actor systems on Tokio, following a **Resource-Oriented**
//! layout: every actor manages one kind of resource through a uniform set of requests
//! (Create, Get, List, Update, Delete) plus resource-specific Actions.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - business logic and domain models
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, single-writer state
//! 3. **Interface Layer** ([`ResourceClient`]) - type-safe, cloneable request handles
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and processes messages **sequentially**.
//! - An actor is the only writer of its store, so a hook's read-check-write sequence is atomic
//!   with respect to every other request.
//! - `Update` and `Action` hooks run on a staged copy that is committed only on success.
//! - Mailboxes are bounded; a full mailbox is retried per [`RetryPolicy`] and then reported as
//!   [`FrameworkError::Busy`].
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor, so the actor
//! and its clients can be created before everything they need exists.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations without running an actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod retry;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response, Visit};
pub use retry::RetryPolicy;
