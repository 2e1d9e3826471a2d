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

//! API to list the caller's own item requests.

use crate::driver::Driver;
use crate::model::RequestDetails;
use crate::rest::{RestError, get_caller_id};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
) -> Result<Json<Vec<RequestDetails>>, RestError> {
    let caller = get_caller_id(&headers)?;
    let requests = driver.list_requests_for_user(caller).await?;
    Ok(Json(requests))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::USER_ID_HEADER;
    use crate::rest::testutils::*;
    use axum::http;

    fn route() -> (http::Method, String) {
        (http::Method::GET, "/requests".to_owned())
    }

    #[tokio::test]
    async fn test_own_requests_with_items() {
        let context = TestContext::setup().await;
        let requestor = context.create_user("requestor").await;
        let other = context.create_user("other").await;
        let owner = context.create_user("owner").await;
        let ask = context.create_request(requestor.id, "Need a drill").await;
        let _foreign = context.create_request(other.id, "Need a saw").await;

        let item = db::items::create_item(
            &mut context.ex().await,
            "Drill",
            "As requested",
            true,
            owner.id,
            Some(ask.id),
        )
        .await
        .unwrap();

        let requests = OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, requestor.id.to_string())
            .send_empty()
            .await
            .expect_json::<Vec<RequestDetails>>()
            .await;
        assert_eq!(vec![ask.id], requests.iter().map(|r| r.id).collect::<Vec<_>>());
        assert_eq!(vec![item.id], requests[0].items.iter().map(|i| i.id).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_missing_user() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .with_header(USER_ID_HEADER, "4")
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 4 not found")
            .await;
    }
}
