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

//! REST interface for the ShareIt server.
//!
//! Every API is put in its own `.rs` file, using a name like `<entity>_<method>.rs`.  This may
//! seem overkill, but putting every API in its own file makes it easy to ensure all the
//! integration tests for the given API truly belong to that API.
//!
//! More specifically, the `tests` module within an API should define a `route` method that
//! returns the HTTP method and the API path under test.  All integration tests within the module
//! then rely on `route` to obtain this information, ensuring that they all test the desired API.

use crate::driver::{Driver, DriverError};
use crate::model::{ModelError, UserId};
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

/// Frontend errors.  These are the errors that are visible to the user on failed requests.
#[derive(Debug, PartialEq, thiserror::Error)]
pub(crate) enum RestError {
    /// Indicates that a request to create an entry failed because of a uniqueness clash.
    #[error("{0}")]
    Conflict(String),

    /// Indicates an authorization problem.
    #[error("{0}")]
    Forbidden(String),

    /// Catch-all error type for all unexpected errors.
    #[error("{0}")]
    InternalError(String),

    /// Indicates an error in the contents of the request.
    #[error("{0}")]
    InvalidRequest(String),

    /// Indicates that a requested entity does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl From<DriverError> for RestError {
    fn from(e: DriverError) -> Self {
        match e {
            DriverError::AlreadyExists(_) => RestError::Conflict(e.to_string()),
            DriverError::BackendError(_) => RestError::InternalError(e.to_string()),
            DriverError::Forbidden(_) => RestError::Forbidden(e.to_string()),
            DriverError::InvalidInput(_) => RestError::InvalidRequest(e.to_string()),
            DriverError::NotFound(_) => RestError::NotFound(e.to_string()),
        }
    }
}

impl From<ModelError> for RestError {
    fn from(e: ModelError) -> Self {
        RestError::InvalidRequest(e.to_string())
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            RestError::Conflict(message) => (http::StatusCode::CONFLICT, message),
            RestError::Forbidden(message) => (http::StatusCode::FORBIDDEN, message),
            RestError::InternalError(message) => {
                // The details of unexpected errors stay in the log: clients only get to see a
                // canned message.
                log::error!("Internal error: {}", message);
                (http::StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_owned())
            }
            RestError::InvalidRequest(message) => (http::StatusCode::BAD_REQUEST, message),
            RestError::NotFound(message) => (http::StatusCode::NOT_FOUND, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for this module.
pub(crate) type RestResult<T> = Result<T, RestError>;

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
) -> RestResult<Option<&HeaderValue>> {
    let mut iter = headers.get_all(name).iter();
    let value = iter.next();
    if iter.next().is_some() {
        return Err(RestError::InvalidRequest(format!(
            "Header {} cannot have more than one value",
            name.as_str()
        )));
    }
    Ok(value)
}

/// Extracts the identity of the calling user from the request `headers`.
pub(crate) fn get_caller_id(headers: &HeaderMap) -> RestResult<UserId> {
    let value = match get_unique_header(headers, USER_ID_HEADER)? {
        Some(value) => value,
        None => {
            return Err(RestError::InvalidRequest(
                "Missing required header: X-Sharer-User-Id".to_owned(),
            ));
        }
    };

    match value.to_str().ok().and_then(|value| value.parse::<i64>().ok()) {
        Some(id) => Ok(UserId::new(id)),
        None => Err(RestError::InvalidRequest(
            "Header X-Sharer-User-Id must be a numeric user id".to_owned(),
        )),
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
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
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::testutils::*;
    use super::*;
    use crate::model::{BookingDetails, BookingStatus};
    use http::{Method, StatusCode};
    use serde_json::json;

    #[test]
    fn test_get_unique_header_missing() {
        let mut headers = HeaderMap::new();
        headers.append("ignore-me", "ignored".parse().unwrap());
        assert!(get_unique_header(&headers, "the-header").unwrap().is_none());
    }

    #[test]
    fn test_get_unique_header_one() {
        let mut headers = HeaderMap::new();
        headers.append("ignore-me", "ignored".parse().unwrap());
        headers.append("the-header", "foo".parse().unwrap());
        assert_eq!(b"foo", get_unique_header(&headers, "the-header").unwrap().unwrap().as_bytes());
    }

    #[test]
    fn test_get_unique_header_many() {
        let mut headers = HeaderMap::new();
        headers.append("the-header", "foo".parse().unwrap());
        headers.append("ignore-me", "ignored".parse().unwrap());
        headers.append("The-Header", "bar".parse().unwrap());
        assert_eq!(
            RestError::InvalidRequest(
                "Header the-header cannot have more than one value".to_owned()
            ),
            get_unique_header(&headers, "the-header").unwrap_err()
        );
    }

    #[test]
    fn test_get_caller_id_ok() {
        let mut headers = HeaderMap::new();
        headers.append(USER_ID_HEADER, "42".parse().unwrap());
        assert_eq!(UserId::new(42), get_caller_id(&headers).unwrap());
    }

    #[test]
    fn test_get_caller_id_missing() {
        let headers = HeaderMap::new();
        assert_eq!(
            RestError::InvalidRequest("Missing required header: X-Sharer-User-Id".to_owned()),
            get_caller_id(&headers).unwrap_err()
        );
    }

    #[test]
    fn test_get_caller_id_not_numeric() {
        let mut headers = HeaderMap::new();
        headers.append(USER_ID_HEADER, "four".parse().unwrap());
        match get_caller_id(&headers).unwrap_err() {
            RestError::InvalidRequest(msg) => assert!(msg.contains("numeric")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_e2e_booking_flow() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let stranger = context.create_user("stranger").await;
        let item = context.create_item(owner.id, "Drill", true).await;

        let request = json!({
            "itemId": item.id,
            "start": "2025-06-16T12:00:00Z",
            "end": "2025-06-18T12:00:00Z",
        });
        let booking = OneShotBuilder::new(context.app(), (Method::POST, "/bookings"))
            .with_header(USER_ID_HEADER, booker.id.to_string())
            .send_json(request)
            .await
            .expect_status(StatusCode::CREATED)
            .expect_json::<BookingDetails>()
            .await;
        assert_eq!(BookingStatus::Waiting, booking.status);

        let path = format!("/bookings/{}", booking.id);
        let approved = OneShotBuilder::new(context.app(), (Method::PATCH, &path))
            .with_query([("approved", "true")])
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_empty()
            .await
            .expect_json::<BookingDetails>()
            .await;
        assert_eq!(BookingStatus::Approved, approved.status);

        OneShotBuilder::new(context.app(), (Method::PATCH, &path))
            .with_query([("approved", "true")])
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_empty()
            .await
            .expect_status(StatusCode::BAD_REQUEST)
            .expect_error("no longer be changed")
            .await;

        OneShotBuilder::new(context.app(), (Method::GET, &path))
            .with_header(USER_ID_HEADER, stranger.id.to_string())
            .send_empty()
            .await
            .expect_status(StatusCode::FORBIDDEN)
            .expect_error("denied")
            .await;
    }
}
