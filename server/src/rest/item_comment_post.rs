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

//! API to comment on an item after a completed booking.

use crate::driver::Driver;
use crate::model::{CommentDetails, ItemId};
use crate::rest::{RestError, get_caller_id};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::{Json, http};
use serde::{Deserialize, Serialize};

/// Message sent to the server to create a comment.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateCommentRequest {
    /// Text of the comment.
    pub(crate) text: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(http::StatusCode, Json<CommentDetails>), RestError> {
    let caller = get_caller_id(&headers)?;
    let comment = driver.add_comment(ItemId::new(id), caller, request.text).await?;
    Ok((http::StatusCode::CREATED, Json(comment)))
}
