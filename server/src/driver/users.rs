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

//! Extends the driver with the user operations.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{EmailAddress, User, UserId};

impl Driver {
    /// Creates a new user with the given `name` and `email`, enforcing email uniqueness.
    pub(crate) async fn create_user(
        self,
        name: Option<String>,
        email: Option<String>,
    ) -> DriverResult<User> {
        let name = match name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(DriverError::InvalidInput("Name cannot be empty".to_owned())),
        };
        let email = match email {
            Some(email) if !email.trim().is_empty() => EmailAddress::new(email)?,
            _ => return Err(DriverError::InvalidInput("Email cannot be empty".to_owned())),
        };

        let mut tx = self.db.begin().await?;

        match db::users::get_user_by_email(tx.ex(), &email).await {
            Ok(_) => {
                return Err(DriverError::AlreadyExists(format!(
                    "User with email {} already exists",
                    email.as_str()
                )));
            }
            Err(DbError::NotFound) => (),
            Err(e) => return Err(e.into()),
        }

        // The email column is also unique, so a concurrent insertion loses here instead of in
        // the check above.
        let user = match db::users::create_user(tx.ex(), &name, &email).await {
            Ok(user) => user,
            Err(DbError::AlreadyExists) => {
                return Err(DriverError::AlreadyExists(format!(
                    "User with email {} already exists",
                    email.as_str()
                )));
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(user)
    }

    /// Applies a partial update to the user `id`.
    ///
    /// A provided email that matches the current one is a no-op; if the call would change
    /// nothing at all, it fails instead.
    pub(crate) async fn update_user(
        self,
        id: UserId,
        name: Option<String>,
        email: Option<String>,
    ) -> DriverResult<User> {
        let mut tx = self.db.begin().await?;

        let mut user = match db::users::get_user(tx.ex(), id).await {
            Ok(user) => user,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("User {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        };

        let mut updated = false;

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(DriverError::InvalidInput("Name cannot be empty".to_owned()));
            }
            user.name = name;
            updated = true;
        }

        if let Some(email) = email {
            if email.trim().is_empty() {
                return Err(DriverError::InvalidInput("Email cannot be empty".to_owned()));
            }
            let email = EmailAddress::new(email)?;

            if email != user.email {
                match db::users::get_user_by_email(tx.ex(), &email).await {
                    Ok(existing) if existing.id != id => {
                        return Err(DriverError::AlreadyExists(format!(
                            "Email {} is already in use",
                            email.as_str()
                        )));
                    }
                    Ok(_) | Err(DbError::NotFound) => (),
                    Err(e) => return Err(e.into()),
                }
                user.email = email;
                updated = true;
            }
        }

        if !updated {
            return Err(DriverError::InvalidInput("No fields to update".to_owned()));
        }

        db::users::update_user(tx.ex(), id, &user.name, &user.email).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Gets an existing user by `id`.
    pub(crate) async fn get_user(self, id: UserId) -> DriverResult<User> {
        let mut ex = self.db.ex().await?;
        match db::users::get_user(&mut ex, id).await {
            Ok(user) => Ok(user),
            Err(DbError::NotFound) => Err(DriverError::NotFound(format!("User {} not found", id))),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all existing users.
    pub(crate) async fn list_users(self) -> DriverResult<Vec<User>> {
        let mut ex = self.db.ex().await?;
        Ok(db::users::list_users(&mut ex).await?)
    }

    /// Deletes an existing user by `id`.
    pub(crate) async fn delete_user(self, id: UserId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        match db::users::delete_user(tx.ex(), id).await {
            Ok(()) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("User {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        }
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;

    #[tokio::test]
    async fn test_create_user_ok() {
        let context = TestContext::setup().await;

        let user = context
            .driver()
            .create_user(Some("alice".to_owned()), Some("alice@example.com".to_owned()))
            .await
            .unwrap();
        assert_eq!("alice", user.name);
        assert_eq!("alice@example.com", user.email.as_str());

        let stored = db::users::get_user(&mut context.ex().await, user.id).await.unwrap();
        assert_eq!(user, stored);
    }

    #[tokio::test]
    async fn test_create_user_blank_name() {
        let context = TestContext::setup().await;

        for name in [None, Some("".to_owned()), Some("   ".to_owned())] {
            match context.driver().create_user(name, Some("a@example.com".to_owned())).await {
                Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("Name")),
                e => panic!("{:?}", e),
            }
        }
    }

    #[tokio::test]
    async fn test_create_user_bad_email() {
        let context = TestContext::setup().await;

        match context.driver().create_user(Some("alice".to_owned()), None).await {
            Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("Email")),
            e => panic!("{:?}", e),
        }

        match context
            .driver()
            .create_user(Some("alice".to_owned()), Some("not-an-address".to_owned()))
            .await
        {
            Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("valid address")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let context = TestContext::setup().await;

        context.create_user("first").await;

        match context
            .driver()
            .create_user(Some("second".to_owned()), Some("first@example.com".to_owned()))
            .await
        {
            Err(DriverError::AlreadyExists(msg)) => assert!(msg.contains("already exists")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_update_user_partial_fields() {
        let context = TestContext::setup().await;

        let user = context.create_user("before").await;

        let updated = context
            .driver()
            .update_user(user.id, Some("after".to_owned()), None)
            .await
            .unwrap();
        assert_eq!("after", updated.name);
        assert_eq!(user.email, updated.email);

        let updated = context
            .driver()
            .update_user(user.id, None, Some("new@example.com".to_owned()))
            .await
            .unwrap();
        assert_eq!("after", updated.name);
        assert_eq!("new@example.com", updated.email.as_str());
    }

    #[tokio::test]
    async fn test_update_user_missing() {
        let context = TestContext::setup().await;

        match context
            .driver()
            .update_user(UserId::new(123), Some("name".to_owned()), None)
            .await
        {
            Err(DriverError::NotFound(msg)) => assert!(msg.contains("123")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_update_user_no_fields() {
        let context = TestContext::setup().await;

        let user = context.create_user("static").await;

        match context.driver().update_user(user.id, None, None).await {
            Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("No fields")),
            e => panic!("{:?}", e),
        }

        // An email equal to the current one does not count as an update.
        match context
            .driver()
            .update_user(user.id, None, Some("static@example.com".to_owned()))
            .await
        {
            Err(DriverError::InvalidInput(msg)) => assert!(msg.contains("No fields")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_update_user_email_conflict() {
        let context = TestContext::setup().await;

        let user = context.create_user("one").await;
        context.create_user("two").await;

        match context
            .driver()
            .update_user(user.id, None, Some("two@example.com".to_owned()))
            .await
        {
            Err(DriverError::AlreadyExists(msg)) => assert!(msg.contains("already in use")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_get_user_ok_and_missing() {
        let context = TestContext::setup().await;

        let user = context.create_user("alice").await;
        assert_eq!(user, context.driver().get_user(user.id).await.unwrap());

        match context.driver().get_user(UserId::new(555)).await {
            Err(DriverError::NotFound(msg)) => assert!(msg.contains("555")),
            e => panic!("{:?}", e),
        }
    }

    #[tokio::test]
    async fn test_list_users() {
        let context = TestContext::setup().await;

        assert!(context.driver().list_users().await.unwrap().is_empty());

        let user1 = context.create_user("one").await;
        let user2 = context.create_user("two").await;
        assert_eq!(vec![user1, user2], context.driver().list_users().await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let context = TestContext::setup().await;

        let user = context.create_user("gone").await;
        context.driver().delete_user(user.id).await.unwrap();

        match context.driver().get_user(user.id).await {
            Err(DriverError::NotFound(_)) => (),
            e => panic!("{:?}", e),
        }

        match context.driver().delete_user(user.id).await {
            Err(DriverError::NotFound(_)) => (),
            e => panic!("{:?}", e),
        }
    }
}
