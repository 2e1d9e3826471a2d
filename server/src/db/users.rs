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

//! Database operations on user records.

use crate::db::{DbError, DbResult, Executor, postgres, sqlite};
use crate::model::{EmailAddress, User, UserId};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;

impl TryFrom<PgRow> for User {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(postgres::map_sqlx_error)?;

        Ok(User { id: UserId::new(id), name, email: EmailAddress::new(email)? })
    }
}

impl TryFrom<SqliteRow> for User {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let email: String = row.try_get("email").map_err(sqlite::map_sqlx_error)?;

        Ok(User { id: UserId::new(id), name, email: EmailAddress::new(email)? })
    }
}

/// Creates a new user with the given `name` and `email`.
///
/// Fails with `AlreadyExists` if the email address is taken.
pub(crate) async fn create_user(
    ex: &mut Executor,
    name: &str,
    email: &EmailAddress,
) -> DbResult<User> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(name)
                .bind(email.as_str())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO users (name, email) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(email.as_str())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };

    Ok(User { id: UserId::new(id), name: name.to_owned(), email: email.clone() })
}

/// Gets an existing user by `id`.
pub(crate) async fn get_user(ex: &mut Executor, id: UserId) -> DbResult<User> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email FROM users WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email FROM users WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(row)
        }
    }
}

/// Gets an existing user by `email`.
pub(crate) async fn get_user_by_email(ex: &mut Executor, email: &EmailAddress) -> DbResult<User> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email FROM users WHERE email = $1";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            User::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email FROM users WHERE email = ?";
            let row = sqlx::query(query_str)
                .bind(email.as_str())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            User::try_from(row)
        }
    }
}

/// Lists all existing users.
pub(crate) async fn list_users(ex: &mut Executor) -> DbResult<Vec<User>> {
    let rows = match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, name, email FROM users ORDER BY id";
            sqlx::query(query_str)
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(User::try_from)
                .collect::<DbResult<Vec<User>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, name, email FROM users ORDER BY id";
            sqlx::query(query_str)
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(User::try_from)
                .collect::<DbResult<Vec<User>>>()?
        }
    };
    Ok(rows)
}

/// Updates an existing user `id` to have a new `name` and `email`.
pub(crate) async fn update_user(
    ex: &mut Executor,
    id: UserId,
    name: &str,
    email: &EmailAddress,
) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "UPDATE users SET name = $1, email = $2 WHERE id = $3";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(email.as_str())
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "UPDATE users SET name = ?, email = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(email.as_str())
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Deletes an existing user `id`.
pub(crate) async fn delete_user(ex: &mut Executor, id: UserId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM users WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM users WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };

    match rows_affected {
        0 => Err(DbError::NotFound),
        1 => Ok(()),
        _ => Err(DbError::BackendError("Deletion affected more than one row".to_owned())),
    }
}
