//! # Observability
//!
//! [`setup_tracing`] installs the process-wide `tracing` subscriber.
//!
//! - Level filtering comes from `RUST_LOG` (`info` when unset).
//! - The compact format shows span hierarchy inline (`add_to_cart:Action ok`).
//! - Module paths are hidden; the actor logs `entity_type` instead.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle and committed changes
//! RUST_LOG=debug cargo run     # full request payloads
//! RUST_LOG=actor_framework=debug,storefront=info cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. Calling it twice is a no-op.
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .try_init();
}
