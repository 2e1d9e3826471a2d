// ShareIt
// Copyright 2025 The ShareIt Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! REST interface for the ShareIt gateway.
//!
//! The gateway mirrors the backend surface route by route.  Every handler validates the parts
//! of the request the gateway is responsible for and, on success, relays the request to the
//! backend and the backend's response to the caller.  Validation failures are answered
//! directly with a 400 and never reach the backend.
//!
//! Every API is put in its own `.rs` file, using a name like `<entity>_<method>.rs`, and its
//! tests define a `route` method that returns the HTTP method and the API path under test.

use crate::forward::Forwarder;
use axum::Json;
use axum::Router;
use axum::http::header::AsHeaderName;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

mod booking_get;
mod booking_patch;
mod booking_post;
mod bookings_get;
mod bookings_owner_get;
mod item_comment_post;
mod item_get;
mod item_patch;
mod item_post;
mod items_get;
mod items_search_get;
mod request_get;
mod request_post;
mod requests_all_get;
mod requests_get;
#[cfg(test)]
pub(crate) mod testutils;
mod user_delete;
mod user_get;
mod user_patch;
mod user_post;
mod users_get;

/// Name of the header that carries the identity of the calling user.
pub(crate) const USER_ID_HEADER: &str = "x-sharer-user-id";

/// Maximum length of a comment in characters, as enforced by the backend.
pub(crate) const MAX_COMMENT_LENGTH: usize = 1000;

/// Gateway errors.  These are the errors the gateway can produce on its own; anything else is
/// whatever the backend answered, relayed verbatim.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum GatewayError {
    /// Indicates an error in the contents of the request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Indicates that the backend cannot be reached.
    #[error("{0}")]
    Unavailable(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            GatewayError::InvalidRequest(message) => (http::StatusCode::BAD_REQUEST, message),
            GatewayError::Unavailable(message) => {
                // The details of connectivity problems stay in the log: clients only get to
                // see a canned message.
                log::warn!("Backend unavailable: {}", message);
                (http::StatusCode::BAD_GATEWAY, "The backend is unavailable".to_owned())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for this module.
pub(crate) type GatewayResult<T> = Result<T, GatewayError>;

/// Representation of the details of an error response.
#[derive(Debug, Deserialize, Serialize)]
pub(crate) struct ErrorResponse {
    /// Textual representation of the error message.
    pub(crate) error: String,
}

/// Extracts the header `name` from `headers` and ensures it has at most one value.
pub(crate) fn get_unique_header<K: AsHeaderName + Copy>(
    headers: &HeaderMap,
    name: K,
) -> GatewayResult<Option<&HeaderValue>> {
    let mut iter = headers.get_all(name).iter();
    let value = iter.next();
    if iter.next().is_some() {
        return Err(GatewayError::InvalidRequest(format!(
            "Header {} cannot have more than one value",
            name.as_str()
        )));
    }
    Ok(value)
}

/// Extracts the identity of the calling user from the request `headers`.
pub(crate) fn get_caller_id(headers: &HeaderMap) -> GatewayResult<i64> {
    let value = match get_unique_header(headers, USER_ID_HEADER)? {
        Some(value) => value,
        None => {
            return Err(GatewayError::InvalidRequest(
                "Missing required header: X-Sharer-User-Id".to_owned(),
            ));
        }
    };

    match value.to_str().ok().and_then(|value| value.parse::<i64>().ok()) {
        Some(id) => Ok(id),
        None => Err(GatewayError::InvalidRequest(
            "Header X-Sharer-User-Id must be a numeric user id".to_owned(),
        )),
    }
}

/// Ensures the optional `value` is present and non-blank, naming `what` in the error.
pub(crate) fn require_non_blank(value: &Option<String>, what: &str) -> GatewayResult<()> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(()),
        _ => Err(GatewayError::InvalidRequest(format!("{} cannot be empty", what))),
    }
}

/// Ensures `email` looks like an email address the backend would accept.
pub(crate) fn validate_email(email: &str) -> GatewayResult<()> {
    if !email.contains('@') || email.contains(' ') {
        return Err(GatewayError::InvalidRequest(format!(
            "Email does not look like a valid address '{}'",
            email
        )));
    }
    Ok(())
}

/// Ensures the `state` token of a booking listing is one the backend understands.
pub(crate) fn validate_state(state: &Option<String>) -> GatewayResult<()> {
    match state.as_deref() {
        None
        | Some("ALL" | "CURRENT" | "PAST" | "FUTURE" | "WAITING" | "REJECTED" | "APPROVED") => {
            Ok(())
        }
        Some(other) => Err(GatewayError::InvalidRequest(format!("Unknown state: {}", other))),
    }
}

/// Ensures the pagination window given by `from` and `size` is well-formed.
pub(crate) fn validate_pagination(from: Option<i64>, size: Option<i64>) -> GatewayResult<()> {
    if let Some(from) = from {
        if from < 0 {
            return Err(GatewayError::InvalidRequest("from cannot be negative".to_owned()));
        }
    }
    if let Some(size) = size {
        if size <= 0 {
            return Err(GatewayError::InvalidRequest("size must be positive".to_owned()));
        }
    }
    Ok(())
}

/// Appends the re-encoded `query` parameters to the forwarded `path`, if any were given.
pub(crate) fn path_with_query<Q: Serialize>(path: &str, query: &Q) -> GatewayResult<String> {
    let encoded = serde_urlencoded::to_string(query)
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
    if encoded.is_empty() { Ok(path.to_owned()) } else { Ok(format!("{}?{}", path, encoded)) }
}

/// Creates the router for the application.
pub(crate) fn app(forwarder: Forwarder) -> Router {
    use axum::routing::get;
    use axum::routing::post;

    Router::new()
        .route("/bookings", post(booking_post::handler).get(bookings_get::handler))
        .route("/bookings/owner", get(bookings_owner_get::handler))
        .route("/bookings/:id", get(booking_get::handler).patch(booking_patch::handler))
        .route("/items", post(item_post::handler).get(items_get::handler))
        .route("/items/search", get(items_search_get::handler))
        .route("/items/:id", get(item_get::handler).patch(item_patch::handler))
        .route("/items/:id/comment", post(item_comment_post::handler))
        .route("/requests", post(request_post::handler).get(requests_get::handler))
        .route("/requests/all", get(requests_all_get::handler))
        .route("/requests/:id", get(request_get::handler))
        .route("/users", post(user_post::handler).get(users_get::handler))
        .route(
            "/users/:id",
            get(user_get::handler).patch(user_patch::handler).delete(user_delete::handler),
        )
        .with_state(forwarder)
}
