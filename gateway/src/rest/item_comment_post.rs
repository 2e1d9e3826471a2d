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

//! Validating relay for comment creation.

use crate::forward::Forwarder;
use crate::rest::{
    GatewayError, GatewayResult, MAX_COMMENT_LENGTH, get_caller_id, require_non_blank,
};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Message relayed to the backend to create a comment.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateCommentRequest {
    /// Text of the comment.
    pub(crate) text: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    require_non_blank(&request.text, "Comment text")?;
    if let Some(text) = &request.text {
        if text.chars().count() > MAX_COMMENT_LENGTH {
            return Err(GatewayError::InvalidRequest(format!(
                "Comment text cannot be longer than {} characters",
                MAX_COMMENT_LENGTH
            )));
        }
    }

    forwarder.post(&format!("items/{}/comment", id), Some(caller), &request).await
}
