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

//! Validating relay for user creation.

use crate::forward::Forwarder;
use crate::rest::{GatewayError, GatewayResult, require_non_blank, validate_email};
use axum::Json;
use axum::extract::State;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Message relayed to the backend to create a user.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateUserRequest {
    /// Display name of the new user.
    pub(crate) name: Option<String>,

    /// Email address of the new user.
    pub(crate) email: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    Json(request): Json<CreateUserRequest>,
) -> GatewayResult<Response> {
    require_non_blank(&request.name, "Name")?;
    match &request.email {
        Some(email) if !email.trim().is_empty() => validate_email(email)?,
        _ => return Err(GatewayError::InvalidRequest("Email cannot be empty".to_owned())),
    }

    forwarder.post("users", None, &request).await
}
