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

//! API to apply a partial update to a user.

use crate::driver::Driver;
use crate::model::{User, UserId};
use crate::rest::RestError;
use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

/// Message sent to the server to update a user.  Absent fields are left unchanged.
#[derive(Deserialize, Serialize)]
pub(crate) struct UpdateUserRequest {
    /// New display name for the user.
    pub(crate) name: Option<String>,

    /// New email address for the user.
    pub(crate) email: Option<String>,
}

/// PATCH handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<User>, RestError> {
    let user = driver.update_user(UserId::new(id), request.name, request.email).await?;
    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;

    fn route(id: UserId) -> (http::Method, String) {
        (http::Method::PATCH, format!("/users/{}", id))
    }

    #[tokio::test]
    async fn test_partial_update() {
        let context = TestContext::setup().await;
        let user = context.create_user("before").await;

        let request = UpdateUserRequest { name: Some("after".to_owned()), email: None };
        let updated = OneShotBuilder::new(context.app(), route(user.id))
            .send_json(request)
            .await
            .expect_json::<User>()
            .await;
        assert_eq!("after", updated.name);
        assert_eq!(user.email, updated.email);
    }

    #[tokio::test]
    async fn test_missing_user() {
        let context = TestContext::setup().await;

        let request = UpdateUserRequest { name: Some("name".to_owned()), email: None };
        OneShotBuilder::new(context.app(), route(UserId::new(123)))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .expect_error("User 123 not found")
            .await;
    }

    #[tokio::test]
    async fn test_email_conflict() {
        let context = TestContext::setup().await;
        let user = context.create_user("one").await;
        context.create_user("two").await;

        let request = UpdateUserRequest { name: None, email: Some("two@example.com".to_owned()) };
        OneShotBuilder::new(context.app(), route(user.id))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("already in use")
            .await;
    }

    #[tokio::test]
    async fn test_no_fields() {
        let context = TestContext::setup().await;
        let user = context.create_user("static").await;

        let request = UpdateUserRequest { name: None, email: None };
        OneShotBuilder::new(context.app(), route(user.id))
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("No fields to update")
            .await;
    }
}
