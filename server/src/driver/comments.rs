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

//! Extends the driver with the comment operations.

use crate::db::{self, DbError};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{BookingStatus, CommentDetails, ItemId, UserId};

/// Maximum length of a comment in characters.
const MAX_COMMENT_LENGTH: usize = 1000;

impl Driver {
    /// Adds a comment on `item` by `author`.
    ///
    /// The author must have an APPROVED booking of the item whose end time is already in the
    /// past; merely having requested a booking, or holding one that has not finished yet, is
    /// not sufficient.
    pub(crate) async fn add_comment(
        self,
        item: ItemId,
        author: UserId,
        text: Option<String>,
    ) -> DriverResult<CommentDetails> {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(DriverError::InvalidInput("Comment text cannot be empty".to_owned())),
        };
        if text.chars().count() > MAX_COMMENT_LENGTH {
            return Err(DriverError::InvalidInput(format!(
                "Comment text cannot be longer than {} characters",
                MAX_COMMENT_LENGTH
            )));
        }

        let mut tx = self.db.begin().await?;

        match db::items::get_item(tx.ex(), item).await {
            Ok(_) => (),
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Item {} not found", item)));
            }
            Err(e) => return Err(e.into()),
        }

        let author_user = match db::users::get_user(tx.ex(), author).await {
            Ok(user) => user,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("User {} not found", author)));
            }
            Err(e) => return Err(e.into()),
        };

        let now = self.clock.now_utc();

        let bookings = db::bookings::list_bookings_for_item_and_booker(tx.ex(), item, author).await?;
        let completed = bookings
            .iter()
            .any(|booking| booking.status == BookingStatus::Approved && booking.end < now);
        if !completed {
            return Err(DriverError::InvalidInput(format!(
                "User {} has not completed a booking of item {}",
                author, item
            )));
        }

        let id = db::comments::create_comment(tx.ex(), &text, item, author, now).await?;
        tx.commit().await?;
        Ok(CommentDetails { id, text, author_name: author_user.name, created: now })
    }
}
