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

//! Database operations on item request records.

use crate::db::sqlite::{build_timestamp, unpack_timestamp};
use crate::db::{DbError, DbResult, Executor, postgres, sqlite};
use crate::model::{ItemRequest, RequestId, UserId};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

impl TryFrom<PgRow> for ItemRequest {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let requestor_id: i64 = row.try_get("requestor_id").map_err(postgres::map_sqlx_error)?;
        let created: OffsetDateTime = row.try_get("created").map_err(postgres::map_sqlx_error)?;

        Ok(ItemRequest {
            id: RequestId::new(id),
            description,
            requestor: UserId::new(requestor_id),
            created,
        })
    }
}

impl TryFrom<SqliteRow> for ItemRequest {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let requestor_id: i64 = row.try_get("requestor_id").map_err(sqlite::map_sqlx_error)?;
        let created_secs: i64 = row.try_get("created_secs").map_err(sqlite::map_sqlx_error)?;
        let created_nsecs: i64 = row.try_get("created_nsecs").map_err(sqlite::map_sqlx_error)?;

        Ok(ItemRequest {
            id: RequestId::new(id),
            description,
            requestor: UserId::new(requestor_id),
            created: build_timestamp(created_secs, created_nsecs)?,
        })
    }
}

/// Creates a new item request by `requestor` with the server-assigned `created` time.
pub(crate) async fn create_request(
    ex: &mut Executor,
    description: &str,
    requestor: UserId,
    created: OffsetDateTime,
) -> DbResult<ItemRequest> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO requests (description, requestor_id, created)
                VALUES ($1, $2, $3)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(description)
                .bind(requestor.as_i64())
                .bind(created)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let (created_secs, created_nsecs) = unpack_timestamp(created);

            let query_str = "
                INSERT INTO requests (description, requestor_id, created_secs, created_nsecs)
                VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(description)
                .bind(requestor.as_i64())
                .bind(created_secs)
                .bind(created_nsecs)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };

    Ok(ItemRequest {
        id: RequestId::new(id),
        description: description.to_owned(),
        requestor,
        created,
    })
}

/// Gets an existing item request by `id`.
pub(crate) async fn get_request(ex: &mut Executor, id: RequestId) -> DbResult<ItemRequest> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM requests WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            ItemRequest::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM requests WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            ItemRequest::try_from(row)
        }
    }
}

/// Lists the requests made by `requestor`, newest first.
pub(crate) async fn list_requests_for_requestor(
    ex: &mut Executor,
    requestor: UserId,
) -> DbResult<Vec<ItemRequest>> {
    let requests = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM requests
                WHERE requestor_id = $1
                ORDER BY created DESC";
            sqlx::query(query_str)
                .bind(requestor.as_i64())
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(ItemRequest::try_from)
                .collect::<DbResult<Vec<ItemRequest>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM requests
                WHERE requestor_id = ?
                ORDER BY created_secs DESC, created_nsecs DESC";
            sqlx::query(query_str)
                .bind(requestor.as_i64())
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(ItemRequest::try_from)
                .collect::<DbResult<Vec<ItemRequest>>>()?
        }
    };
    Ok(requests)
}

/// Lists the requests NOT made by `user`, newest first, skipping `offset` entries and returning
/// at most `limit`.
pub(crate) async fn list_requests_excluding_requestor(
    ex: &mut Executor,
    user: UserId,
    offset: i64,
    limit: i64,
) -> DbResult<Vec<ItemRequest>> {
    let requests = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM requests
                WHERE requestor_id != $1
                ORDER BY created DESC
                LIMIT $2 OFFSET $3";
            sqlx::query(query_str)
                .bind(user.as_i64())
                .bind(limit)
                .bind(offset)
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(ItemRequest::try_from)
                .collect::<DbResult<Vec<ItemRequest>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM requests
                WHERE requestor_id != ?
                ORDER BY created_secs DESC, created_nsecs DESC
                LIMIT ? OFFSET ?";
            sqlx::query(query_str)
                .bind(user.as_i64())
                .bind(limit)
                .bind(offset)
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(ItemRequest::try_from)
                .collect::<DbResult<Vec<ItemRequest>>>()?
        }
    };
    Ok(requests)
}
