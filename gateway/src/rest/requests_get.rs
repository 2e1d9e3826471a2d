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

//! Relay for the caller's item request listing.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, get_caller_id};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;

/// GET handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    forwarder.get("requests", Some(caller)).await
}
