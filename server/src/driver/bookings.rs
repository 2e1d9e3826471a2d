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

//! Extends the driver with the booking operations.
//!
//! Bookings are created in the WAITING state and transition exactly once to APPROVED or
//! REJECTED at the hands of the item owner.  The status transition is guarded inside the
//! database update so concurrent approvals cannot both win.

use crate::db::{self, DbError, Executor};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{
    BookingDetails, BookingFilter, BookingId, BookingSort, BookingStatus, ItemId, UserId,
};
use time::OffsetDateTime;

/// Applies the time-window part of `filter` to an already status-filtered listing.
fn filter_by_window(
    bookings: Vec<BookingDetails>,
    filter: BookingFilter,
    now: OffsetDateTime,
) -> Vec<BookingDetails> {
    match filter {
        BookingFilter::Current => {
            bookings.into_iter().filter(|b| b.start <= now && now <= b.end).collect()
        }
        BookingFilter::Past => bookings.into_iter().filter(|b| b.end < now).collect(),
        BookingFilter::Future => bookings.into_iter().filter(|b| b.start > now).collect(),
        // The status filters were pushed down to the query and ALL applies no filter.
        _ => bookings,
    }
}

/// Ensures `user` exists, reporting `NotFound` with the user id otherwise.
async fn require_user(ex: &mut Executor, user: UserId) -> DriverResult<()> {
    match db::users::get_user(ex, user).await {
        Ok(_) => Ok(()),
        Err(DbError::NotFound) => Err(DriverError::NotFound(format!("User {} not found", user))),
        Err(e) => Err(e.into()),
    }
}

impl Driver {
    /// Creates a new WAITING booking of `item` by `booker` for the given time window.
    pub(crate) async fn create_booking(
        self,
        booker: UserId,
        item: Option<ItemId>,
        start: Option<OffsetDateTime>,
        end: Option<OffsetDateTime>,
    ) -> DriverResult<BookingDetails> {
        let item = match item {
            Some(item) => item,
            None => return Err(DriverError::InvalidInput("Item id must be provided".to_owned())),
        };
        let start = match start {
            Some(start) => start,
            None => {
                return Err(DriverError::InvalidInput("Start time must be provided".to_owned()));
            }
        };
        let end = match end {
            Some(end) => end,
            None => return Err(DriverError::InvalidInput("End time must be provided".to_owned())),
        };

        let mut tx = self.db.begin().await?;

        require_user(tx.ex(), booker).await?;

        let item = match db::items::get_item(tx.ex(), item).await {
            Ok(item) => item,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Item {} not found", item)));
            }
            Err(e) => return Err(e.into()),
        };

        if !item.available {
            return Err(DriverError::InvalidInput(format!(
                "Item {} is not available for booking",
                item.id
            )));
        }

        if item.owner == booker {
            return Err(DriverError::InvalidInput(
                "The owner cannot book their own item".to_owned(),
            ));
        }

        if end <= start {
            return Err(DriverError::InvalidInput(
                "End time must be after the start time".to_owned(),
            ));
        }

        let booking = db::bookings::create_booking(
            tx.ex(),
            start,
            end,
            item.id,
            booker,
            BookingStatus::Waiting,
        )
        .await?;
        let details = db::bookings::get_booking_details(tx.ex(), booking.id).await?;
        tx.commit().await?;
        Ok(details)
    }

    /// Approves or rejects the WAITING booking `id` on behalf of `caller`, who must own the
    /// booked item.
    pub(crate) async fn approve_booking(
        self,
        id: BookingId,
        caller: UserId,
        approved: bool,
    ) -> DriverResult<BookingDetails> {
        let mut tx = self.db.begin().await?;

        let booking = match db::bookings::get_booking(tx.ex(), id).await {
            Ok(booking) => booking,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Booking {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        };

        let item = db::items::get_item(tx.ex(), booking.item).await?;
        if item.owner != caller {
            return Err(DriverError::InvalidInput(
                "Only the owner of the item can approve a booking".to_owned(),
            ));
        }

        if booking.status != BookingStatus::Waiting {
            return Err(DriverError::InvalidInput(
                "The booking status can no longer be changed".to_owned(),
            ));
        }

        let status =
            if approved { BookingStatus::Approved } else { BookingStatus::Rejected };
        match db::bookings::update_booking_status(tx.ex(), id, status).await {
            Ok(()) => (),
            // The guarded update matched no row, so a concurrent transition won the race.
            Err(DbError::NotFound) => {
                return Err(DriverError::InvalidInput(
                    "The booking status can no longer be changed".to_owned(),
                ));
            }
            Err(e) => return Err(e.into()),
        }

        let details = db::bookings::get_booking_details(tx.ex(), id).await?;
        tx.commit().await?;
        Ok(details)
    }

    /// Gets the booking `id` on behalf of `caller`, who must be the booker or the item owner.
    pub(crate) async fn get_booking(
        self,
        id: BookingId,
        caller: UserId,
    ) -> DriverResult<BookingDetails> {
        let mut ex = self.db.ex().await?;

        let booking = match db::bookings::get_booking(&mut ex, id).await {
            Ok(booking) => booking,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Booking {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        };

        let item = db::items::get_item(&mut ex, booking.item).await?;
        if booking.booker != caller && item.owner != caller {
            return Err(DriverError::Forbidden(format!(
                "Access to booking {} is denied",
                id
            )));
        }

        Ok(db::bookings::get_booking_details(&mut ex, id).await?)
    }

    /// Lists the bookings made by `user`, restricted by `filter` and ordered by `sort`.
    pub(crate) async fn list_bookings_for_booker(
        self,
        user: UserId,
        filter: BookingFilter,
        sort: BookingSort,
    ) -> DriverResult<Vec<BookingDetails>> {
        let mut ex = self.db.ex().await?;
        require_user(&mut ex, user).await?;

        let bookings =
            db::bookings::list_bookings_for_booker(&mut ex, user, filter.status(), sort).await?;
        Ok(filter_by_window(bookings, filter, self.clock.now_utc()))
    }

    /// Lists the bookings of the items owned by `user`, restricted by `filter` and ordered by
    /// `sort`.
    pub(crate) async fn list_bookings_for_owner(
        self,
        user: UserId,
        filter: BookingFilter,
        sort: BookingSort,
    ) -> DriverResult<Vec<BookingDetails>> {
        let mut ex = self.db.ex().await?;
        require_user(&mut ex, user).await?;

        let bookings =
            db::bookings::list_bookings_for_owner(&mut ex, user, filter.status(), sort).await?;
        Ok(filter_by_window(bookings, filter, self.clock.now_utc()))
    }
}
