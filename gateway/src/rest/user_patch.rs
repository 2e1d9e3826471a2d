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

//! Validating relay for partial user updates.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, require_non_blank, validate_email};
use axum::Json;
use axum::extract::{Path, State};
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Message relayed to the backend to update a user.
#[derive(Deserialize, Serialize)]
pub(crate) struct UpdateUserRequest {
    /// New display name for the user.
    pub(crate) name: Option<String>,

    /// New email address for the user.
    pub(crate) email: Option<String>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> GatewayResult<Response> {
    if request.name.is_some() {
        require_non_blank(&request.name, "Name")?;
    }
    if let Some(email) = &request.email {
        require_non_blank(&request.email, "Email")?;
        validate_email(email)?;
    }

    forwarder.patch(&format!("users/{}", id), None, Some(&request)).await
}
