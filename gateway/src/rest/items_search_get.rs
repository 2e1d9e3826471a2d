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

//! Relay for item searches.  Blank text is handled by the backend, which returns an empty
//! listing for it.

use crate::forward::Forwarder;
use crate::rest::{GatewayResult, get_caller_id, path_with_query};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by this API.
#[derive(Deserialize, Serialize)]
pub(crate) struct SearchQuery {
    /// Text fragment to look for.
    pub(crate) text: Option<String>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(forwarder): State<Forwarder>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> GatewayResult<Response> {
    let caller = get_caller_id(&headers)?;
    forwarder.get(&path_with_query("items/search", &query)?, Some(caller)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/items/search".to_owned())
    }

    #[tokio::test]
    async fn test_valid_request_is_forwarded() {
        OneShotBuilder::new(unreachable_backend_app(), route())
            .with_query(SearchQuery { text: Some("drill".to_owned()) })
            .with_header(USER_ID_HEADER, "7")
            .send_empty()
            .await
            .expect_forwarded()
            .await;
    }

    #[tokio::test]
    async fn test_missing_header() {
        OneShotBuilder::new(unreachable_backend_app(), route())
            .send_empty()
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Missing required header")
            .await;
    }
}
