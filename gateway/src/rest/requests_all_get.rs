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

//! Validating relay for the listing of other users' item requests.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, get_caller_id, path_with_query, validate_pagination};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by this API.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct PaginationQuery {
    /// Offset of the first request to return.
    pub(crate) from: Option<i64>,

    /// Maximum number of requests to return.
    pub(crate) size: Option<i64>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Query(query): Query<PaginationQuery>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    validate_pagination(query.from, query.size)?;
    forwarder.get(&path_with_query("requests/all", &query)?, Some(caller)).await
}
