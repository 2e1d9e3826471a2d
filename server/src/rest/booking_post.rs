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

//! API to request a new booking.

use crate::driver::Driver;
use crate::model::{BookingDetails, ItemId};
use crate::rest::{RestError, get_caller_id};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Json, http};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Message sent to the server to create a booking.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    /// Identifier of the item to book.
    pub(crate) item_id: Option<ItemId>,

    /// Start of the booking window.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) start: Option<OffsetDateTime>,

    /// End of the booking window.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) end: Option<OffsetDateTime>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(http::StatusCode, Json<BookingDetails>), RestError> {
    let caller = get_caller_id(&headers)?;
    let details =
        driver.create_booking(caller, request.item_id, request.start, request.end).await?;
    Ok((http::StatusCode::CREATED, Json(details)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BookingStatus;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/bookings".to_owned())
    }

    fn window(context: &TestContext) -> (Option<OffsetDateTime>, Option<OffsetDateTime>) {
        (Some(context.now_delta(3600)), Some(context.now_delta(7200)))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id, "Drill", true).await;

        let (start, end) = window(&context);
        let request = CreateBookingRequest { item_id: Some(item.id), start, end };
        let details = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<BookingDetails>()
            .await;
        assert_eq!(BookingStatus::Waiting, details.status);
        assert_eq!(booker.id, details.booker.id);
        assert_eq!(item.id, details.item.id);
    }

    #[tokio::test]
    async fn test_end_not_after_start() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id, "Drill", true).await;

        let request = CreateBookingRequest {
            item_id: Some(item.id),
            start: Some(context.now_delta(7200)),
            end: Some(context.now_delta(3600)),
        };
        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("after the start")
            .await;
    }

    #[tokio::test]
    async fn test_item_unavailable() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;
        let booker = context.create_user("booker").await;
        let item = context.create_item(owner.id, "Drill", false).await;

        let (start, end) = window(&context);
        let request = CreateBookingRequest { item_id: Some(item.id), start, end };
        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("not available")
            .await;
    }

    #[tokio::test]
    async fn test_owner_cannot_book_own_item() {
        let context = TestContext::setup().await;
        let owner = context.create_user("owner").await;
        let item = context.create_item(owner.id, "Drill", true).await;

        let (start, end) = window(&context);
        let request = CreateBookingRequest { item_id: Some(item.id), start, end };
        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, owner.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("own item")
            .await;
    }

    #[tokio::test]
    async fn test_missing_item() {
        let context = TestContext::setup().await;
        let booker = context.create_user("booker").await;

        let (start, end) = window(&context);
        let request = CreateBookingRequest { item_id: Some(ItemId::new(17)), start, end };
        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, booker.id.to_string())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("Item 17 not found")
            .await;
    }

    #[tokio::test]
    async fn test_missing_header() {
        let context = TestContext::setup().await;

        let request = CreateBookingRequest { item_id: None, start: None, end: None };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing required header: X-Sharer-User-Id")
            .await;
    }
}
