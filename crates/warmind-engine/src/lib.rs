//! Pure decision logic for the Warmind opponent engine.
//!
//! Everything in this crate is a deterministic function of a
//! [`GameSnapshot`](warmind_types::GameSnapshot) and configuration,
//! with the single exception of the weighted draw, which consumes an
//! injected PRNG so tests can seed it. No I/O happens here: fetching
//! state and executing actions live in `warmind-client`, and the worker
//! loop lives in `warmind-server`.
//!
//! # Modules
//!
//! - [`phase`] -- elapsed activation time to game phase
//! - [`config`] -- tunable analysis and pacing constants
//! - [`threat`] -- ranked threats against owned locations
//! - [`opportunity`] -- ranked expansion and attack targets
//! - [`weights`] -- the per-phase base weight table
//! - [`decision`] -- situational gating and the weighted draw

pub mod config;
pub mod decision;
pub mod opportunity;
pub mod phase;
pub mod threat;
pub mod weights;

pub use config::{ConfigError, EngineConfig};
pub use decision::DecisionEngine;
pub use phase::phase_at;
pub use weights::{DecisionWeights, PhaseWeights};
