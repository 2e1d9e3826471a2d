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

//! Database operations on booking records.
//!
//! The listing queries hydrate the booker and item references in one go so
//! that the driver does not have to issue one lookup per row.

use crate::db::sqlite::{build_timestamp, unpack_timestamp};
use crate::db::{DbError, DbResult, Executor, postgres, sqlite};
use crate::model::{
    Booking, BookingDetails, BookingId, BookingItem, BookingSort, BookingSortField, BookingStatus,
    BookingUser, ItemId, SortDirection, UserId,
};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;
use time::OffsetDateTime;

impl TryFrom<PgRow> for Booking {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let start: OffsetDateTime = row.try_get("start_time").map_err(postgres::map_sqlx_error)?;
        let end: OffsetDateTime = row.try_get("end_time").map_err(postgres::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(postgres::map_sqlx_error)?;
        let booker_id: i64 = row.try_get("booker_id").map_err(postgres::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(postgres::map_sqlx_error)?;

        Ok(Booking {
            id: BookingId::new(id),
            start,
            end,
            item: ItemId::new(item_id),
            booker: UserId::new(booker_id),
            status: BookingStatus::from_str(&status)?,
        })
    }
}

impl TryFrom<SqliteRow> for Booking {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let start_secs: i64 = row.try_get("start_secs").map_err(sqlite::map_sqlx_error)?;
        let start_nsecs: i64 = row.try_get("start_nsecs").map_err(sqlite::map_sqlx_error)?;
        let end_secs: i64 = row.try_get("end_secs").map_err(sqlite::map_sqlx_error)?;
        let end_nsecs: i64 = row.try_get("end_nsecs").map_err(sqlite::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(sqlite::map_sqlx_error)?;
        let booker_id: i64 = row.try_get("booker_id").map_err(sqlite::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(sqlite::map_sqlx_error)?;

        Ok(Booking {
            id: BookingId::new(id),
            start: build_timestamp(start_secs, start_nsecs)?,
            end: build_timestamp(end_secs, end_nsecs)?,
            item: ItemId::new(item_id),
            booker: UserId::new(booker_id),
            status: BookingStatus::from_str(&status)?,
        })
    }
}

impl TryFrom<PgRow> for BookingDetails {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let start: OffsetDateTime = row.try_get("start_time").map_err(postgres::map_sqlx_error)?;
        let end: OffsetDateTime = row.try_get("end_time").map_err(postgres::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(postgres::map_sqlx_error)?;
        let booker_id: i64 = row.try_get("booker_id").map_err(postgres::map_sqlx_error)?;
        let booker_name: String = row.try_get("booker_name").map_err(postgres::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(postgres::map_sqlx_error)?;
        let item_name: String = row.try_get("item_name").map_err(postgres::map_sqlx_error)?;

        Ok(BookingDetails {
            id: BookingId::new(id),
            start,
            end,
            status: BookingStatus::from_str(&status)?,
            booker: BookingUser { id: UserId::new(booker_id), name: booker_name },
            item: BookingItem { id: ItemId::new(item_id), name: item_name },
        })
    }
}

impl TryFrom<SqliteRow> for BookingDetails {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let start_secs: i64 = row.try_get("start_secs").map_err(sqlite::map_sqlx_error)?;
        let start_nsecs: i64 = row.try_get("start_nsecs").map_err(sqlite::map_sqlx_error)?;
        let end_secs: i64 = row.try_get("end_secs").map_err(sqlite::map_sqlx_error)?;
        let end_nsecs: i64 = row.try_get("end_nsecs").map_err(sqlite::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(sqlite::map_sqlx_error)?;
        let booker_id: i64 = row.try_get("booker_id").map_err(sqlite::map_sqlx_error)?;
        let booker_name: String = row.try_get("booker_name").map_err(sqlite::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(sqlite::map_sqlx_error)?;
        let item_name: String = row.try_get("item_name").map_err(sqlite::map_sqlx_error)?;

        Ok(BookingDetails {
            id: BookingId::new(id),
            start: build_timestamp(start_secs, start_nsecs)?,
            end: build_timestamp(end_secs, end_nsecs)?,
            status: BookingStatus::from_str(&status)?,
            booker: BookingUser { id: UserId::new(booker_id), name: booker_name },
            item: BookingItem { id: ItemId::new(item_id), name: item_name },
        })
    }
}

/// Columns selected by the hydrating queries against the PostgreSQL schema.
const DETAILS_COLUMNS_PG: &str = "
    b.id, b.start_time, b.end_time, b.status,
    b.booker_id, u.name AS booker_name, b.item_id, i.name AS item_name";

/// Columns selected by the hydrating queries against the SQLite schema.
const DETAILS_COLUMNS_SQLITE: &str = "
    b.id, b.start_secs, b.start_nsecs, b.end_secs, b.end_nsecs, b.status,
    b.booker_id, u.name AS booker_name, b.item_id, i.name AS item_name";

/// Renders the `ORDER BY` expression for `sort` against the PostgreSQL schema.
fn order_clause_postgres(sort: BookingSort) -> &'static str {
    match (sort.field, sort.direction) {
        (BookingSortField::Start, SortDirection::Ascending) => "b.start_time ASC",
        (BookingSortField::Start, SortDirection::Descending) => "b.start_time DESC",
        (BookingSortField::End, SortDirection::Ascending) => "b.end_time ASC",
        (BookingSortField::End, SortDirection::Descending) => "b.end_time DESC",
    }
}

/// Renders the `ORDER BY` expression for `sort` against the SQLite schema.
///
/// Timestamps are stored as a seconds/nanoseconds pair so both columns have to participate in
/// the sort for it to be total.
fn order_clause_sqlite(sort: BookingSort) -> &'static str {
    match (sort.field, sort.direction) {
        (BookingSortField::Start, SortDirection::Ascending) => "b.start_secs ASC, b.start_nsecs ASC",
        (BookingSortField::Start, SortDirection::Descending) => {
            "b.start_secs DESC, b.start_nsecs DESC"
        }
        (BookingSortField::End, SortDirection::Ascending) => "b.end_secs ASC, b.end_nsecs ASC",
        (BookingSortField::End, SortDirection::Descending) => "b.end_secs DESC, b.end_nsecs DESC",
    }
}

/// Creates a new booking of `item` by `booker` with the given window and `status`.
pub(crate) async fn create_booking(
    ex: &mut Executor,
    start: OffsetDateTime,
    end: OffsetDateTime,
    item: ItemId,
    booker: UserId,
    status: BookingStatus,
) -> DbResult<Booking> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO bookings (start_time, end_time, item_id, booker_id, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(start)
                .bind(end)
                .bind(item.as_i64())
                .bind(booker.as_i64())
                .bind(status.as_str())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let (start_secs, start_nsecs) = unpack_timestamp(start);
            let (end_secs, end_nsecs) = unpack_timestamp(end);

            let query_str = "
                INSERT INTO bookings
                    (start_secs, start_nsecs, end_secs, end_nsecs, item_id, booker_id, status)
                VALUES (?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(start_secs)
                .bind(start_nsecs)
                .bind(end_secs)
                .bind(end_nsecs)
                .bind(item.as_i64())
                .bind(booker.as_i64())
                .bind(status.as_str())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };

    Ok(Booking { id: BookingId::new(id), start, end, item, booker, status })
}

/// Gets an existing booking by `id`.
pub(crate) async fn get_booking(ex: &mut Executor, id: BookingId) -> DbResult<Booking> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM bookings WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            Booking::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM bookings WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Booking::try_from(row)
        }
    }
}

/// Gets an existing booking by `id` with the booker and item references hydrated.
pub(crate) async fn get_booking_details(
    ex: &mut Executor,
    id: BookingId,
) -> DbResult<BookingDetails> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT {} FROM bookings b
                    JOIN users u ON u.id = b.booker_id
                    JOIN items i ON i.id = b.item_id
                    WHERE b.id = $1",
                DETAILS_COLUMNS_PG
            );
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            BookingDetails::try_from(row)
        }

        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT {} FROM bookings b
                    JOIN users u ON u.id = b.booker_id
                    JOIN items i ON i.id = b.item_id
                    WHERE b.id = ?",
                DETAILS_COLUMNS_SQLITE
            );
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            BookingDetails::try_from(row)
        }
    }
}

/// Transitions a WAITING booking `id` to `status`.
///
/// The guard on the previous status is part of the statement so that concurrent approvals are
/// arbitrated by the database: the loser sees `NotFound` because its update matched no row.
pub(crate) async fn update_booking_status(
    ex: &mut Executor,
    id: BookingId,
    status: BookingStatus,
) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "UPDATE bookings SET status = $1 WHERE id = $2 AND status = 'WAITING'";
            let done = sqlx::query(query_str)
                .bind(status.as_str())
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "UPDATE bookings SET status = ? WHERE id = ? AND status = 'WAITING'";
            let done = sqlx::query(query_str)
                .bind(status.as_str())
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

/// Lists the bookings made by `booker`, optionally restricted to `status`, in `sort` order.
pub(crate) async fn list_bookings_for_booker(
    ex: &mut Executor,
    booker: UserId,
    status: Option<BookingStatus>,
    sort: BookingSort,
) -> DbResult<Vec<BookingDetails>> {
    let bookings = match ex {
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT {} FROM bookings b
                    JOIN users u ON u.id = b.booker_id
                    JOIN items i ON i.id = b.item_id
                    WHERE b.booker_id = $1{}
                    ORDER BY {}",
                DETAILS_COLUMNS_PG,
                if status.is_some() { " AND b.status = $2" } else { "" },
                order_clause_postgres(sort)
            );
            let mut query = sqlx::query(&query_str).bind(booker.as_i64());
            if let Some(status) = status {
                query = query.bind(status.as_str());
            }
            query
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(BookingDetails::try_from)
                .collect::<DbResult<Vec<BookingDetails>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT {} FROM bookings b
                    JOIN users u ON u.id = b.booker_id
                    JOIN items i ON i.id = b.item_id
                    WHERE b.booker_id = ?{}
                    ORDER BY {}",
                DETAILS_COLUMNS_SQLITE,
                if status.is_some() { " AND b.status = ?" } else { "" },
                order_clause_sqlite(sort)
            );
            let mut query = sqlx::query(&query_str).bind(booker.as_i64());
            if let Some(status) = status {
                query = query.bind(status.as_str());
            }
            query
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(BookingDetails::try_from)
                .collect::<DbResult<Vec<BookingDetails>>>()?
        }
    };
    Ok(bookings)
}

/// Lists the bookings of all items owned by `owner`, optionally restricted to `status`, in
/// `sort` order.
pub(crate) async fn list_bookings_for_owner(
    ex: &mut Executor,
    owner: UserId,
    status: Option<BookingStatus>,
    sort: BookingSort,
) -> DbResult<Vec<BookingDetails>> {
    let bookings = match ex {
        Executor::Postgres(ex) => {
            let query_str = format!(
                "SELECT {} FROM bookings b
                    JOIN users u ON u.id = b.booker_id
                    JOIN items i ON i.id = b.item_id
                    WHERE i.owner_id = $1{}
                    ORDER BY {}",
                DETAILS_COLUMNS_PG,
                if status.is_some() { " AND b.status = $2" } else { "" },
                order_clause_postgres(sort)
            );
            let mut query = sqlx::query(&query_str).bind(owner.as_i64());
            if let Some(status) = status {
                query = query.bind(status.as_str());
            }
            query
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(BookingDetails::try_from)
                .collect::<DbResult<Vec<BookingDetails>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = format!(
                "SELECT {} FROM bookings b
                    JOIN users u ON u.id = b.booker_id
                    JOIN items i ON i.id = b.item_id
                    WHERE i.owner_id = ?{}
                    ORDER BY {}",
                DETAILS_COLUMNS_SQLITE,
                if status.is_some() { " AND b.status = ?" } else { "" },
                order_clause_sqlite(sort)
            );
            let mut query = sqlx::query(&query_str).bind(owner.as_i64());
            if let Some(status) = status {
                query = query.bind(status.as_str());
            }
            query
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(BookingDetails::try_from)
                .collect::<DbResult<Vec<BookingDetails>>>()?
        }
    };
    Ok(bookings)
}

/// Lists the APPROVED bookings of `item`, earliest start first.
pub(crate) async fn list_approved_bookings_for_item(
    ex: &mut Executor,
    item: ItemId,
) -> DbResult<Vec<Booking>> {
    let bookings = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT * FROM bookings
                WHERE item_id = $1 AND status = 'APPROVED'
                ORDER BY start_time ASC";
            sqlx::query(query_str)
                .bind(item.as_i64())
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(Booking::try_from)
                .collect::<DbResult<Vec<Booking>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT * FROM bookings
                WHERE item_id = ? AND status = 'APPROVED'
                ORDER BY start_secs ASC, start_nsecs ASC";
            sqlx::query(query_str)
                .bind(item.as_i64())
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(Booking::try_from)
                .collect::<DbResult<Vec<Booking>>>()?
        }
    };
    Ok(bookings)
}

/// Lists the bookings of `item` made by `booker`.
pub(crate) async fn list_bookings_for_item_and_booker(
    ex: &mut Executor,
    item: ItemId,
    booker: UserId,
) -> DbResult<Vec<Booking>> {
    let bookings = match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT * FROM bookings WHERE item_id = $1 AND booker_id = $2";
            sqlx::query(query_str)
                .bind(item.as_i64())
                .bind(booker.as_i64())
                .fetch_all(ex)
                .await
                .map_err(postgres::map_sqlx_error)?
                .into_iter()
                .map(Booking::try_from)
                .collect::<DbResult<Vec<Booking>>>()?
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT * FROM bookings WHERE item_id = ? AND booker_id = ?";
            sqlx::query(query_str)
                .bind(item.as_i64())
                .bind(booker.as_i64())
                .fetch_all(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?
                .into_iter()
                .map(Booking::try_from)
                .collect::<DbResult<Vec<Booking>>>()?
        }
    };
    Ok(bookings)
}
