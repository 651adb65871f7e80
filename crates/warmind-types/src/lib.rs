//! Shared type definitions for the Warmind opponent engine.
//!
//! This crate is the single source of truth for the types that flow
//! between the decision engine, the location-server client, and the
//! control API. Everything here is plain data: the remote location
//! servers own all mutable game state, and this process only ever holds
//! immutable per-cycle copies of it.
//!
//! # Modules
//!
//! - [`faction`] -- the two competing sides and location ownership
//! - [`location`] -- location identity, kind, position, and wire state
//! - [`snapshot`] -- the per-cycle immutable view of the whole map
//! - [`action`] -- the engine's action vocabulary
//! - [`run`] -- phases, derived tactical values, and run status

pub mod action;
pub mod faction;
pub mod location;
pub mod run;
pub mod snapshot;

// Re-export all public types at crate root for convenience.
pub use action::{Action, ActionKind};
pub use faction::{Allegiance, Faction, UnknownFactionError};
pub use location::{LocationId, LocationKind, LocationState, Position};
pub use run::{Opportunity, OpportunityKind, Phase, RunStatus, Threat};
pub use snapshot::GameSnapshot;
