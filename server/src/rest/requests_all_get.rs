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

//! API to list the item requests made by other users.

use crate::driver::Driver;
use crate::model::RequestDetails;
use crate::rest::{RestError, get_caller_id};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by this API.
#[derive(Deserialize, Serialize)]
pub(crate) struct PaginationQuery {
    /// Offset of the first request to return.
    pub(crate) from: Option<i64>,

    /// Maximum number of requests to return.
    pub(crate) size: Option<i64>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<Vec<RequestDetails>>, RestError> {
    let caller = get_caller_id(&headers)?;
    let requests = driver
        .list_other_requests(caller, query.from.unwrap_or(0), query.size.unwrap_or(10))
        .await?;
    Ok(Json(requests))
}
