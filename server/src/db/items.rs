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

//! Database operations on item records.

use crate::db::{DbError, DbResult, Executor, postgres, sqlite};
use crate::model::{Item, ItemId, RequestId, UserId};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;

impl TryFrom<PgRow> for Item {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(postgres::map_sqlx_error)?;
        let owner_id: i64 = row.try_get("owner_id").map_err(postgres::map_sqlx_error)?;
        let request_id: Option<i64> = row.try_get("request_id").map_err(postgres::map_sqlx_error)?;

        Ok(Item {
            id: ItemId::new(id),
            name,
            description,
            available,
            owner: UserId::new(owner_id),
            request: request_id.map(RequestId::new),
        })
    }
}

impl TryFrom<SqliteRow> for Item {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(sqlite::map_sqlx_error)?;
        let owner_id: i64 = row.try_get("owner_id").map_err(sqlite::map_sqlx_error)?;
        let request_id: Option<i64> = row.try_get("request_id").map_err(sqlite::map_sqlx_error)?;

        Ok(Item {
            id: ItemId::new(id),
            name,
            description,
            available,
            owner: UserId::new(owner_id),
            request: request_id.map(RequestId::new),
        })
    }
}

/// Creates a new item owned by `owner`, optionally answering `request`.
pub(crate) async fn create_item(
    ex: &mut Executor,
    name: &str,
    description: &str,
    available: bool,
    owner: UserId,
    request: Option<RequestId>,
) -> DbResult<Item> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO items (name, description, available, owner_id, request_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(name)
                .bind(description)
                .bind(available)
                .bind(owner.as_i64())
                .bind(request.map(RequestId::as_i64))
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO items (name, description, available, owner_id, request_id)
                VALUES (?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(description)
                .bind(available)
                .bind(owner.as_i64())
                .bind(request.map(RequestId::as_i64))
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };

    Ok(Item {
        id: ItemId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        available,
        owner,
        request,
    })
}

/// Gets an existing item by `id`.
pub(crate) async fn get_item(ex: &mut Executor, id: ItemId) -> DbResult<Item> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM items WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Item::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM items WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Item::try_from(row)
        }
    }
}

/// Updates the mutable fields of an existing item `id`.
pub(crate) async fn update_item(
    ex: &mut Executor,
    id: ItemId,
    name: &str,
    description: &str,
    available: bool,
) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str =
                "UPDATE items SET name = $1, description = $2, available = $3 WHERE id = $4";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(description)
                .bind(available)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "UPDATE items SET name = ?, description = ?, available = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(description)
                .bind(available)
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

/// Lists the items owned by `owner`, oldest first.
pub(crate) async fn list_items_for_owner(ex: &mut Executor, owner: UserId) -> DbResult<Vec<Item>> {
    let items = match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM items WHERE owner_id = $1 ORDER BY id";
            sqlx::query(query_str)
                .bind(owner.as_i64())
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(Item::try_from)
                .collect::<DbResult<Vec<Item>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM items WHERE owner_id = ? ORDER BY id";
            sqlx::query(query_str)
                .bind(owner.as_i64())
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(Item::try_from)
                .collect::<DbResult<Vec<Item>>>()?
        }
    };
    Ok(items)
}

/// Searches the available items whose name or description contains `text`,
/// ignoring case.
///
/// The caller is responsible for short-circuiting blank search text.
pub(crate) async fn search_items(ex: &mut Executor, text: &str) -> DbResult<Vec<Item>> {
    let items = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM items
                WHERE available AND
                    (name ILIKE '%' || $1 || '%' OR description ILIKE '%' || $1 || '%')
                ORDER BY id";
            sqlx::query(query_str)
                .bind(text)
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(Item::try_from)
                .collect::<DbResult<Vec<Item>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM items
                WHERE available AND
                    (LOWER(name) LIKE '%' || LOWER(?) || '%' OR
                     LOWER(description) LIKE '%' || LOWER(?) || '%')
                ORDER BY id";
            sqlx::query(query_str)
                .bind(text)
                .bind(text)
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(Item::try_from)
                .collect::<DbResult<Vec<Item>>>()?
        }
    };
    Ok(items)
}

/// Lists the items that were created in response to `request`, oldest first.
pub(crate) async fn list_items_for_request(
    ex: &mut Executor,
    request: RequestId,
) -> DbResult<Vec<Item>> {
    let items = match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM items WHERE request_id = $1 ORDER BY id";
            sqlx::query(query_str)
                .bind(request.as_i64())
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(Item::try_from)
                .collect::<DbResult<Vec<Item>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM items WHERE request_id = ? ORDER BY id";
            sqlx::query(query_str)
                .bind(request.as_i64())
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(Item::try_from)
                .collect::<DbResult<Vec<Item>>>()?
        }
    };
    Ok(items)
}
