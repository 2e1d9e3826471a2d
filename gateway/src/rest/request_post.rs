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

//! Validating relay for item request creation.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, get_caller_id, require_non_blank};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Message relayed to the backend to create an item request.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateRequestRequest {
    /// Free-form description of the item the requestor is looking for.
    pub(crate) description: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Json(request): Json<CreateRequestRequest>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    require_non_blank(&request.description, "Description")?;
    forwarder.post("requests", Some(caller), &request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/requests".to_owned())
    }

    #[tokio::test]
    async fn test_valid_request_is_forwarded() {
        let request = CreateRequestRequest { description: Some("Need a drill".to_owned()) };
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_header(USER_ID_HEADER, "7")
            .send_json(request)
            .await
            .expect_forwarded()
            .await;
    }

    #[tokio::test]
    async fn test_blank_description() {
        let request = CreateRequestRequest { description: None };
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_header(USER_ID_HEADER, "7")
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Description cannot be empty")
            .await;
    }
}
