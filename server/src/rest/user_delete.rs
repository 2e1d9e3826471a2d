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

//! API to delete a user.

use crate::driver::Driver;
use crate::model::UserId;
use crate::rest::RestError;
use axum::extract::{Path, State};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<i64>,
) -> Result<(), RestError> {
    driver.delete_user(UserId::new(id)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: UserId) -> (http::Method, String) {
        (http::Method::DELETE, format!("/users/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;
        let user = context.create_user("gone").await;

        OneShotBuilder::new(context.app(), route(user.id))
            .send_empty()
            .await
            .expect_empty()
            .await;

        assert_eq!(
            db::DbError::NotFound,
            db::users::get_user(&mut context.ex().await, user.id).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_missing() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(UserId::new(8)))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 8 not found")
            .await;
    }
}
