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

//! Validating relay for booking creation.
//!
//! The gateway checks the window against the wall clock so that obviously-stale requests die
//! here; the backend separately enforces the window ordering and availability rules.

use crate::forward::Forwarder;
use crate::rest::{GatewayError, GatewayResult, get_caller_id};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Message relayed to the backend to create a booking.
#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateBookingRequest {
    /// Identifier of the item to book.
    pub(crate) item_id: Option<i64>,

    /// Start of the booking window.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) start: Option<OffsetDateTime>,

    /// End of the booking window.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub(crate) end: Option<OffsetDateTime>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Json(request): Json<CreateBookingRequest>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;

    if request.item_id.is_none() {
        return Err(GatewayError::InvalidRequest("Item id must be provided".to_owned()));
    }
    let start = match request.start {
        Some(start) => start,
        None => {
            return Err(GatewayError::InvalidRequest("Start time must be provided".to_owned()));
        }
    };
    let end = match request.end {
        Some(end) => end,
        None => return Err(GatewayError::InvalidRequest("End time must be provided".to_owned())),
    };

    if start < OffsetDateTime::now_utc() {
        return Err(GatewayError::InvalidRequest("Start time cannot be in the past".to_owned()));
    }
    if end <= start {
        return Err(GatewayError::InvalidRequest(
            "End time must be after the start time".to_owned(),
        ));
    }

    forwarder.post("bookings", Some(caller), &request).await
}
