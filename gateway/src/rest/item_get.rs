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

//! Relay for single-item lookups.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, get_caller_id};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;

/// GET handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    forwarder.get(&format!("items/{}", id), Some(caller)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: i64) -> (http::Method, String) {
        (http::Method::GET, format!("/items/{}", id))
    }

    #[tokio::test]
    async fn test_valid_request_is_forwarded() {
        OneShotBuilder::new(unreachable_backend_app(), route(4))
            .with_header(USER_ID_HEADER, "7")
            .send_empty()
            .await
            .expect_forwarded()
            .await;
    }

    #[tokio::test]
    async fn test_missing_header() {
        OneShotBuilder::new(unreachable_backend_app(), route(4))
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing required header")
            .await;
    }
}
