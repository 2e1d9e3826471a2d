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

//! Validating relay for the caller's booking listing.

use crate::forward::Forwarder;
use crate::rest::{
    GatewayResult, get_caller_id, path_with_query, validate_pagination, validate_state,
};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by the booking listings.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct ListQuery {
    /// Token restricting which bookings to return; `ALL` when absent.
    pub(crate) state: Option<String>,

    /// Offset of the first booking to return.
    pub(crate) from: Option<i64>,

    /// Maximum number of bookings to return.
    pub(crate) size: Option<i64>,
}

impl ListQuery {
    /// Validates the query parameters the gateway is responsible for.
    pub(crate) fn validate(&self) -> GatewayResult<()> {
        validate_state(&self.state)?;
        validate_pagination(self.from, self.size)
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    query.validate()?;
    forwarder.get(&path_with_query("bookings", &query)?, Some(caller)).await
}
