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

//! API to search the available items by a text fragment.

use crate::driver::Driver;
use crate::model::ItemSummary;
use crate::rest::{RestError, get_caller_id};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by this API.
#[derive(Deserialize, Serialize)]
pub(crate) struct SearchQuery {
    /// Text fragment to look for.  Blank text yields an empty result.
    #[serde(default)]
    pub(crate) text: String,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ItemSummary>>, RestError> {
    let _caller = get_caller_id(&headers)?;
    let items = driver.search_items(&query.text).await?;
    Ok(Json(items))
}
