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

//! High-level data types for the ShareIt domain.
//!
//! Entities mirror the rows persisted by the `db` layer and carry no wire
//! formatting.  The aggregate types at the bottom of this module are what the
//! REST layer serializes; their field names follow the public API (camelCase,
//! RFC 3339 timestamps).

use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Validation errors that can arise when constructing model types.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Generates the newtype for a database-assigned 64-bit identifier.
macro_rules! numeric_id [
    ( $(#[$docs:meta])+ $t:ident ) => {
        $(#[$docs])+
        #[derive(Clone, Copy, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
        #[cfg_attr(test, derive(Debug))]
        #[serde(transparent)]
        pub(crate) struct $t(i64);

        impl $t {
            /// Wraps a raw identifier as stored in the database.
            pub(crate) fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the identifier in the representation the database uses.
            pub(crate) fn as_i64(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    }
];

numeric_id!(
    /// Identifier of a user.
    UserId
);

numeric_id!(
    /// Identifier of an item.
    ItemId
);

numeric_id!(
    /// Identifier of a booking.
    BookingId
);

numeric_id!(
    /// Identifier of an item request.
    RequestId
);

numeric_id!(
    /// Identifier of a comment.
    CommentId
);

/// Maximum length of email addresses per the schema.
pub(crate) const MAX_EMAIL_LENGTH: usize = 64;

/// Represents a correctly-formatted email address.
///
/// Addresses are treated as case sensitive overall: we only use them as a
/// uniqueness key and for display, so there is no benefit in normalizing the
/// case of the domain part.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(transparent)]
pub(crate) struct EmailAddress(String);

impl EmailAddress {
    /// Creates a new email address from an untrusted string `s`, making sure it is valid.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();

        if s.trim().is_empty() {
            return Err(ModelError("Email address cannot be empty".to_owned()));
        }
        if s.len() > MAX_EMAIL_LENGTH {
            return Err(ModelError("Email address is too long".to_owned()));
        }

        // Fully validating an email address is futile, but we need to catch the
        // obviously-broken inputs before they become a uniqueness key.
        if !s.contains('@') || s.contains(' ') {
            return Err(ModelError(format!("Email does not look like a valid address '{}'", s)));
        }

        Ok(Self(s))
    }

    /// Creates a new email address from an untrusted string `s`, without validation.  Useful for
    /// testing purposes only.
    #[cfg(test)]
    pub(crate) fn new_invalid<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    /// Returns a string view of the email address.
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
impl From<&str> for EmailAddress {
    fn from(raw_email: &str) -> Self {
        Self::new(raw_email).expect("Hardcoded email addresses for testing must be valid")
    }
}

/// Visitor to deserialize an `EmailAddress` from a string.
struct EmailAddressVisitor;

impl Visitor<'_> for EmailAddressVisitor {
    type Value = EmailAddress;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an email address")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        EmailAddress::new(v).map_err(|e| E::custom(format!("{}", e)))
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        EmailAddress::new(v).map_err(|e| E::custom(format!("{}", e)))
    }
}

impl<'de> Deserialize<'de> for EmailAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_string(EmailAddressVisitor)
    }
}

/// Lifecycle states of a booking.
///
/// `Canceled` is representable and stored but no operation currently
/// transitions into it.
#[derive(Clone, Copy, Deserialize, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
    Canceled,
}

impl BookingStatus {
    /// Returns the representation of the status stored in the database.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
            BookingStatus::Canceled => "CANCELED",
        }
    }
}

impl FromStr for BookingStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            "CANCELED" => Ok(BookingStatus::Canceled),
            _ => Err(ModelError(format!("Unknown booking status '{}'", s))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selector for the booking listings.
///
/// `Current`, `Past` and `Future` partition bookings by their time window
/// relative to "now"; `Waiting`, `Rejected` and `Approved` match the exact
/// status; `All` applies no filter.
#[derive(Clone, Copy, Eq, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub(crate) enum BookingFilter {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
    Approved,
}

impl BookingFilter {
    /// Returns the status this filter matches, if it is a status filter.
    pub(crate) fn status(self) -> Option<BookingStatus> {
        match self {
            BookingFilter::Waiting => Some(BookingStatus::Waiting),
            BookingFilter::Rejected => Some(BookingStatus::Rejected),
            BookingFilter::Approved => Some(BookingStatus::Approved),
            _ => None,
        }
    }
}

impl FromStr for BookingFilter {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "ALL" => Ok(BookingFilter::All),
            "CURRENT" => Ok(BookingFilter::Current),
            "PAST" => Ok(BookingFilter::Past),
            "FUTURE" => Ok(BookingFilter::Future),
            "WAITING" => Ok(BookingFilter::Waiting),
            "REJECTED" => Ok(BookingFilter::Rejected),
            "APPROVED" => Ok(BookingFilter::Approved),
            _ => Err(ModelError(format!("Unknown state: {}", s))),
        }
    }
}

/// Field by which booking listings can be sorted.
#[derive(Clone, Copy, Eq, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub(crate) enum BookingSortField {
    Start,
    End,
}

/// Direction of a sorted booking listing.
#[derive(Clone, Copy, Eq, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub(crate) enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order of a booking listing.
#[derive(Clone, Copy, Eq, PartialEq)]
#[cfg_attr(test, derive(Debug))]
pub(crate) struct BookingSort {
    /// Field to sort by.
    pub(crate) field: BookingSortField,

    /// Direction to sort in.
    pub(crate) direction: SortDirection,
}

impl Default for BookingSort {
    fn default() -> Self {
        Self { field: BookingSortField::Start, direction: SortDirection::Descending }
    }
}

/// A registered user.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct User {
    pub(crate) id: UserId,
    pub(crate) name: String,
    pub(crate) email: EmailAddress,
}

/// A shareable item listed by its owner.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct Item {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) available: bool,
    pub(crate) owner: UserId,

    /// The request this item was listed in response to, if any.
    pub(crate) request: Option<RequestId>,
}

/// A user's ask for an item that is not currently listed.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct ItemRequest {
    pub(crate) id: RequestId,
    pub(crate) description: String,
    pub(crate) requestor: UserId,
    pub(crate) created: OffsetDateTime,
}

/// A reservation of an item by a non-owner user for a time window.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub(crate) struct Booking {
    pub(crate) id: BookingId,
    pub(crate) start: OffsetDateTime,
    pub(crate) end: OffsetDateTime,
    pub(crate) item: ItemId,
    pub(crate) booker: UserId,
    pub(crate) status: BookingStatus,
}

/// The item fields exposed over the API.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemSummary {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) available: bool,
    pub(crate) request_id: Option<RequestId>,
}

impl From<Item> for ItemSummary {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request,
        }
    }
}

/// Reference to a booking as attached to an item view.
#[derive(Clone, Copy, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingRef {
    pub(crate) id: BookingId,
    pub(crate) booker_id: UserId,
}

/// A comment as exposed over the API, with the author resolved to a name.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentDetails {
    pub(crate) id: CommentId,
    pub(crate) text: String,
    pub(crate) author_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created: OffsetDateTime,
}

/// An item as returned by the single-item lookup: comments always, the
/// last/next booking references only when the caller owns the item.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemWithBookings {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) available: bool,
    pub(crate) last_booking: Option<BookingRef>,
    pub(crate) next_booking: Option<BookingRef>,
    pub(crate) comments: Vec<CommentDetails>,
}

/// An item as returned by the owner listing.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct ItemForOwner {
    pub(crate) id: ItemId,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) available: bool,
    pub(crate) last_booking: Option<BookingRef>,
    pub(crate) next_booking: Option<BookingRef>,
}

/// The booker reference embedded in a booking view.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BookingUser {
    pub(crate) id: UserId,
    pub(crate) name: String,
}

/// The item reference embedded in a booking view.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BookingItem {
    pub(crate) id: ItemId,
    pub(crate) name: String,
}

/// A booking as exposed over the API, with the booker and item hydrated.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct BookingDetails {
    pub(crate) id: BookingId,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) end: OffsetDateTime,
    pub(crate) status: BookingStatus,
    pub(crate) booker: BookingUser,
    pub(crate) item: BookingItem,
}

/// An item request as exposed over the API, with the answering items attached.
#[derive(Clone, Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
#[serde(rename_all = "camelCase")]
pub(crate) struct RequestDetails {
    pub(crate) id: RequestId,
    pub(crate) description: String,
    pub(crate) requestor_id: UserId,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) created: OffsetDateTime,
    pub(crate) items: Vec<ItemSummary>,
}
