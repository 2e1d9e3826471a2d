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

//! Database operations on comment records.

use crate::db::sqlite::{build_timestamp, unpack_timestamp};
use crate::db::{DbError, DbResult, Executor, postgres, sqlite};
use crate::model::{CommentDetails, CommentId, ItemId, UserId};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

impl TryFrom<PgRow> for CommentDetails {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let text: String = row.try_get("text").map_err(postgres::map_sqlx_error)?;
        let author_name: String = row.try_get("author_name").map_err(postgres::map_sqlx_error)?;
        let created: OffsetDateTime = row.try_get("created").map_err(postgres::map_sqlx_error)?;

        Ok(CommentDetails { id: CommentId::new(id), text, author_name, created })
    }
}

impl TryFrom<SqliteRow> for CommentDetails {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let text: String = row.try_get("text").map_err(sqlite::map_sqlx_error)?;
        let author_name: String = row.try_get("author_name").map_err(sqlite::map_sqlx_error)?;
        let created_secs: i64 = row.try_get("created_secs").map_err(sqlite::map_sqlx_error)?;
        let created_nsecs: i64 = row.try_get("created_nsecs").map_err(sqlite::map_sqlx_error)?;

        Ok(CommentDetails {
            id: CommentId::new(id),
            text,
            author_name,
            created: build_timestamp(created_secs, created_nsecs)?,
        })
    }
}

/// Creates a new comment on `item` by `author` with the server-assigned `created` time.
pub(crate) async fn create_comment(
    ex: &mut Executor,
    text: &str,
    item: ItemId,
    author: UserId,
    created: OffsetDateTime,
) -> DbResult<CommentId> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO comments (text, item_id, author_id, created)
                VALUES ($1, $2, $3, $4)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(text)
                .bind(item.as_i64())
                .bind(author.as_i64())
                .bind(created)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let (created_secs, created_nsecs) = unpack_timestamp(created);

            let query_str = "
                INSERT INTO comments (text, item_id, author_id, created_secs, created_nsecs)
                VALUES (?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(text)
                .bind(item.as_i64())
                .bind(author.as_i64())
                .bind(created_secs)
                .bind(created_nsecs)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };

    Ok(CommentId::new(id))
}

/// Lists the comments on `item` with their author names, oldest first.
pub(crate) async fn list_comments_for_item(
    ex: &mut Executor,
    item: ItemId,
) -> DbResult<Vec<CommentDetails>> {
    let comments = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT c.id, c.text, u.name AS author_name, c.created
                FROM comments c JOIN users u ON u.id = c.author_id
                WHERE c.item_id = $1
                ORDER BY c.created ASC";
            sqlx::query(query_str)
                .bind(item.as_i64())
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(CommentDetails::try_from)
                .collect::<DbResult<Vec<CommentDetails>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT c.id, c.text, u.name AS author_name, c.created_secs, c.created_nsecs
                FROM comments c JOIN users u ON u.id = c.author_id
                WHERE c.item_id = ?
                ORDER BY c.created_secs ASC, c.created_nsecs ASC";
            sqlx::query(query_str)
                .bind(item.as_i64())
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(CommentDetails::try_from)
                .collect::<DbResult<Vec<CommentDetails>>>()?
        }
    };
    Ok(comments)
}
