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

//! API to list a new item.

use crate::driver::Driver;
use crate::model::{ItemSummary, RequestId};
use crate::rest::{RestError, get_caller_id};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Json, http};
use serde::{Deserialize, Serialize};

/// Message sent to the server to create an item.
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
    pub(crate) request_id: Option<RequestId>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Json(request): Json<CreateItemRequest>,
) -> Result<(http::StatusCode, Json<ItemSummary>), RestError> {
    let caller = get_caller_id(&headers)?;
    let item = driver
        .create_item(caller, request.name, request.description, request.available, request.request_id)
        .await?;
    Ok((http::StatusCode::CREATED, Json(item)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;

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
    async fn test_ok() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;

        let item = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<ItemSummary>()
            .await;
        assert_eq!("Drill", item.name);
        assert!(item.available);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing required header: X-Sharer-User-Id")
            .await;
    }

    #[tokio::test]
    async fn test_missing_owner() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, "99")
            .send_json(valid_request())
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 99 not found")
            .await;
    }

    #[tokio::test]
    async fn test_blank_fields() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;

        let request = CreateItemRequest { name: None, ..valid_request() };
        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Name cannot be empty")
            .await;

        let request = CreateItemRequest { available: None, ..valid_request() };
        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Available must be provided")
            .await;
    }

    #[tokio::test]
    async fn test_answering_a_request() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;
        let asker = context.create_user("asker").await;
        let ask = context.create_request(asker.id, "Need a drill").await;

        let request = CreateItemRequest { request_id: Some(ask.id), ..valid_request() };
        let item = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<ItemSummary>()
            .await;
        assert_eq!(Some(ask.id), item.request_id);
    }
}
