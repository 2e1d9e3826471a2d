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

//! Extends the driver with the item operations.

use crate::db::{self, DbError, Executor};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{
    Booking, BookingRef, Item, ItemForOwner, ItemId, ItemSummary, ItemWithBookings, RequestId,
    UserId,
};
use time::OffsetDateTime;

/// Splits the APPROVED bookings of an item, sorted by ascending start time, into the references
/// to the last one that has started and the next upcoming one.
fn split_last_next(
    bookings: Vec<Booking>,
    now: OffsetDateTime,
) -> (Option<BookingRef>, Option<BookingRef>) {
    let mut last = None;
    let mut next = None;
    for booking in bookings {
        let booking_ref = BookingRef { id: booking.id, booker_id: booking.booker };
        if booking.start <= now {
            last = Some(booking_ref);
        } else if next.is_none() {
            next = Some(booking_ref);
        }
    }
    (last, next)
}

/// Computes the last/next booking references for `item` as seen at `now`.
async fn last_next_bookings(
    ex: &mut Executor,
    item: ItemId,
    now: OffsetDateTime,
) -> DriverResult<(Option<BookingRef>, Option<BookingRef>)> {
    let bookings = db::bookings::list_approved_bookings_for_item(ex, item).await?;
    Ok(split_last_next(bookings, now))
}

impl Driver {
    /// Creates a new item owned by `owner`, optionally answering the request `request`.
    pub(crate) async fn create_item(
        self,
        owner: UserId,
        name: Option<String>,
        description: Option<String>,
        available: Option<bool>,
        request: Option<RequestId>,
    ) -> DriverResult<ItemSummary> {
        let mut tx = self.db.begin().await?;

        match db::users::get_user(tx.ex(), owner).await {
            Ok(_) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("User {} not found", owner)));
            }
            Err(e) => return Err(e.into()),
        }

        let name = match name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(DriverError::InvalidInput("Name cannot be empty".to_owned())),
        };
        let description = match description {
            Some(description) if !description.trim().is_empty() => description,
            _ => return Err(DriverError::InvalidInput("Description cannot be empty".to_owned())),
        };
        let available = match available {
            Some(available) => available,
            None => {
                return Err(DriverError::InvalidInput("Available must be provided".to_owned()));
            }
        };

        if let Some(request) = request {
            match db::requests::get_request(tx.ex(), request).await {
                Ok(_) => (),
                Err(DbError::NotFound) => {
                    return Err(DriverError::NotFound(format!("Request {} not found", request)));
                }
                Err(e) => return Err(e.into()),
            }
        }

        let item =
            db::items::create_item(tx.ex(), &name, &description, available, owner, request).await?;
        tx.commit().await?;
        Ok(ItemSummary::from(item))
    }

    /// Applies a partial update to the item `id` on behalf of `caller`, who must be the owner.
    pub(crate) async fn update_item(
        self,
        id: ItemId,
        caller: UserId,
        name: Option<String>,
        description: Option<String>,
        available: Option<bool>,
    ) -> DriverResult<ItemSummary> {
        let mut tx = self.db.begin().await?;

        let mut item = match db::items::get_item(tx.ex(), id).await {
            Ok(item) => item,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Item {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        };

        if item.owner != caller {
            return Err(DriverError::Forbidden("Only the owner can update an item".to_owned()));
        }

        if let Some(name) = name {
            item.name = name;
        }
        if let Some(description) = description {
            item.description = description;
        }
        if let Some(available) = available {
            item.available = available;
        }

        db::items::update_item(tx.ex(), id, &item.name, &item.description, item.available).await?;
        tx.commit().await?;
        Ok(ItemSummary::from(item))
    }

    /// Gets the item `id` with its comments and, when `caller` owns it, the last/next booking
    /// references.
    pub(crate) async fn get_item(self, id: ItemId, caller: UserId) -> DriverResult<ItemWithBookings> {
        let mut ex = self.db.ex().await?;

        let item = match db::items::get_item(&mut ex, id).await {
            Ok(item) => item,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Item {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        };

        let comments = db::comments::list_comments_for_item(&mut ex, id).await?;

        let (last_booking, next_booking) = if item.owner == caller {
            last_next_bookings(&mut ex, id, self.clock.now_utc()).await?
        } else {
            (None, None)
        };

        Ok(ItemWithBookings {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            last_booking,
            next_booking,
            comments,
        })
    }

    /// Lists the items owned by `owner` with their last/next booking references.
    pub(crate) async fn list_items_for_owner(
        self,
        owner: UserId,
    ) -> DriverResult<Vec<ItemForOwner>> {
        let mut ex = self.db.ex().await?;

        match db::users::get_user(&mut ex, owner).await {
            Ok(_) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("User {} not found", owner)));
            }
            Err(e) => return Err(e.into()),
        }

        let now = self.clock.now_utc();
        let items = db::items::list_items_for_owner(&mut ex, owner).await?;

        let mut result = Vec::with_capacity(items.len());
        for item in items {
            let (last_booking, next_booking) = last_next_bookings(&mut ex, item.id, now).await?;
            result.push(ItemForOwner {
                id: item.id,
                name: item.name,
                description: item.description,
                available: item.available,
                last_booking,
                next_booking,
            });
        }
        Ok(result)
    }

    /// Searches the available items by a case-insensitive substring of their name or
    /// description.  Blank text yields an empty result.
    pub(crate) async fn search_items(self, text: &str) -> DriverResult<Vec<ItemSummary>> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        let mut ex = self.db.ex().await?;
        let items = db::items::search_items(&mut ex, text).await?;
        Ok(items.into_iter().map(ItemSummary::from).collect())
    }
}
