//! HTTP client for the per-location game servers.
//!
//! The engine never talks to the network itself; this crate owns the
//! two I/O concerns of a decision cycle. [`fetch`] assembles a
//! [`GameSnapshot`](warmind_types::GameSnapshot) by fanning out one GET
//! per configured location and tolerating partial failure, and
//! [`execute`] turns a chosen [`Action`](warmind_types::Action) into
//! exactly one POST, with no retries. The location servers stay the
//! single source of truth for all game state.

pub mod error;
pub mod execute;
pub mod fetch;
pub mod roster;

pub use error::ClientError;
pub use execute::{RequestPlan, plan_request};
pub use fetch::LocationClient;
pub use roster::Roster;
