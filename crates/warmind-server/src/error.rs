//! Error types for the control API.
//!
//! [`ApiError`] unifies the handler failure modes into one enum with an
//! [`IntoResponse`](axum::response::IntoResponse) implementation, so
//! handlers can return `Result<_, ApiError>` and get consistent JSON
//! error bodies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use warmind_types::{Faction, UnknownFactionError};

/// Errors surfaced by the control API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request named a faction that does not exist.
    #[error(transparent)]
    UnknownFaction(#[from] UnknownFactionError),

    /// Activation was requested for a faction that already has a run.
    #[error("faction {0} is already active")]
    AlreadyActive(Faction),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UnknownFaction(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyActive(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_active_maps_to_conflict() {
        let response = ApiError::AlreadyActive(Faction::Northern).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unknown_faction_maps_to_bad_request() {
        let error = ApiError::from(UnknownFactionError {
            name: "eastern".to_owned(),
        });
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
