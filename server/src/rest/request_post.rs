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

//! API to create a new item request.

use crate::driver::Driver;
use crate::model::RequestDetails;
use crate::rest::{RestError, get_caller_id};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Json, http};
use serde::{Deserialize, Serialize};

/// Message sent to the server to create an item request.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateRequestRequest {
    /// Free-form description of the item the requestor is looking for.
    pub(crate) description: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Json(request): Json<CreateRequestRequest>,
) -> Result<(http::StatusCode, Json<RequestDetails>), RestError> {
    let caller = get_caller_id(&headers)?;
    let details = driver.create_request(caller, request.description).await?;
    Ok((http::StatusCode::CREATED, Json(details)))
}
