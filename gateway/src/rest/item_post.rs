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

//! Validating relay for item creation.

use crate::forward::Forwarder;
use crate::rest::{GatewayError, GatewayResult, get_caller_id, require_non_blank};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Message relayed to the backend to create an item.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateItemRequest {
    /// Display name of the new item.
    pub(crate) name: Option<String>,

    /// Free-form description of the new item.
    pub(crate) description: Option<String>,

    /// Whether the item can be booked right away.
    pub(crate) available: Option<bool>,

    /// The item request this item answers, if any.
    pub(crate) request_id: Option<i64>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Json(request): Json<CreateItemRequest>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    require_non_blank(&request.name, "Name")?;
    require_non_blank(&request.description, "Description")?;
    if request.available.is_none() {
        return Err(GatewayError::InvalidRequest("Available must be provided".to_owned()));
    }

    forwarder.post("items", Some(caller), &request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/items".to_owned())
    }

    fn valid_request() -> CreateItemRequest {
        CreateItemRequest {
            name: Some("Drill".to_owned()),
            description: Some("Cordless drill".to_owned()),
            available: Some(true),
            request_id: None,
        }
    }

    #[tokio::test]
    async fn test_valid_request_is_forwarded() {
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_header(USER_ID_HEADER, "7")
            .send_json(valid_request())
            .await
            .expect_forwarded()
            .await;
    }

    #[tokio::test]
    async fn test_missing_header() {
        OneShotBuilder::new(unreachable_backend_app(), route())
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing required header: X-Sharer-User-Id")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_fields() {
        let request = CreateItemRequest { name: Some("  ".to_owned()), ..valid_request() };
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_header(USER_ID_HEADER, "7")
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Name cannot be empty")
            .await;

        let request = CreateItemRequest { description: None, ..valid_request() };
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_header(USER_ID_HEADER, "7")
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Description cannot be empty")
            .await;

        let request = CreateItemRequest { available: None, ..valid_request() };
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_header(USER_ID_HEADER, "7")
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Available must be provided")
            .await;
    }
}
