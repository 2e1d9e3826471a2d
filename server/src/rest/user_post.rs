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

//! API to create a new user.

use crate::driver::Driver;
use crate::model::User;
use crate::rest::RestError;
use axum::extract::State;
use axum::{Json, http};
use serde::{Deserialize, Serialize};

/// Message sent to the server to create a user.
#[derive(Deserialize, Serialize)]
pub(crate) struct CreateUserRequest {
    /// Display name of the new user.
    pub(crate) name: Option<String>,

    /// Email address of the new user, used as a uniqueness key.
    pub(crate) email: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(http::StatusCode, Json<User>), RestError> {
    let user = driver.create_user(request.name, request.email).await?;
    Ok((http::StatusCode::CREATED, Json(user)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/users".to_owned())
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let request = CreateUserRequest {
            name: Some("alice".to_owned()),
            email: Some("alice@example.com".to_owned()),
        };
        let user = OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CREATED)
            .expect_json::<User>()
            .await;
        assert_eq!("alice", user.name);
        assert_eq!("alice@example.com", user.email.as_str());
    }

    #[tokio::test]
    async fn test_blank_name() {
        let context = TestContext::setup().await;

        let request =
            CreateUserRequest { name: Some("  ".to_owned()), email: Some("a@b".to_owned()) };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Name cannot be empty")
            .await;
    }

    #[tokio::test]
    async fn test_invalid_email() {
        let context = TestContext::setup().await;

        let request = CreateUserRequest {
            name: Some("alice".to_owned()),
            email: Some("not-an-address".to_owned()),
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("valid address")
            .await;
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let context = TestContext::setup().await;

        context.create_user("first").await;

        let request = CreateUserRequest {
            name: Some("second".to_owned()),
            email: Some("first@example.com".to_owned()),
        };
        OneShotBuilder::new(context.app(), route())
            .send_json(request)
            .await
            .expect_status(http::StatusCode::CONFLICT)
            .expect_error("already exists")
            .await;
    }

    #[tokio::test]
    async fn test_payload_must_be_json() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_text("this is not json")
            .await
            .expect_status(http::StatusCode::UNSUPPORTED_MEDIA_TYPE)
            .expect_text("Content-Type")
            .await;
    }
}
