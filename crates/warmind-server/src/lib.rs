//! Control API and worker runtime for the Warmind opponent.
//!
//! This crate wires the pure decision logic of `warmind-engine` and
//! the location client of `warmind-client` into a running service: an
//! Axum control API (`/activate`, `/deactivate`, `/status`, `/health`)
//! and one autonomous worker task per activated faction. The registry
//! guarantees at most one live run per faction at any moment.

pub mod config;
pub mod error;
pub mod handlers;
pub mod registry;
pub mod router;
pub mod server;
pub mod state;
pub mod worker;

pub use config::ServerConfig;
pub use error::ApiError;
pub use registry::{Registry, StopSignal};
pub use router::build_router;
pub use state::AppState;
