//! Errors for location server communication.

use warmind_types::{ActionKind, LocationId};

/// Errors produced while talking to location servers.
///
/// None of these are fatal to a run: a total fetch failure skips the
/// cycle, and a failed action is recorded in the run status and
/// forgotten. Per-location fetch failures are not errors at all; they
/// just shrink the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Not a single location server produced a usable response within
    /// the fetch deadline.
    #[error("no location server responded in time")]
    FetchTotalFailure,

    /// An action targeted a location that is not in the roster.
    #[error("location {id} is not in the roster")]
    UnknownLocation {
        /// The id that failed to resolve.
        id: LocationId,
    },

    /// The HTTP request itself failed (connect error, broken body).
    #[error("request to {url} failed")]
    Http {
        /// The URL that was being called.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The location server answered but refused or botched the action.
    #[error("location {id} rejected {kind}: {reason}")]
    ActionFailed {
        /// The location that received the call.
        id: LocationId,
        /// What was being attempted.
        kind: ActionKind,
        /// The server's stated reason, or the HTTP status.
        reason: String,
    },
}
