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

//! Relay for partial item updates.  Field semantics are enforced by the backend.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, get_caller_id};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Message relayed to the backend to update an item.
#[derive(Deserialize, Serialize)]
pub(crate) struct UpdateItemRequest {
    /// New display name for the item.
    pub(crate) name: Option<String>,

    /// New description for the item.
    pub(crate) description: Option<String>,

    /// New availability flag for the item.
    pub(crate) available: Option<bool>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<UpdateItemRequest>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    forwarder.patch(&format!("items/{}", id), Some(caller), Some(&request)).await
}
