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

//! API to list the bookings made by the caller.

use crate::driver::Driver;
use crate::model::{BookingDetails, BookingFilter, BookingSort};
use crate::rest::{RestError, get_caller_id};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

/// Query parameters accepted by the booking listings.
///
/// `from` and `size` are accepted for wire compatibility but the listings are not paginated.
#[derive(Default, Deserialize, Serialize)]
pub(crate) struct ListQuery {
    /// Token restricting which bookings to return; `ALL` when absent.
    pub(crate) state: Option<String>,
}

impl ListQuery {
    /// Parses the state token into a booking filter.
    pub(crate) fn filter(&self) -> Result<BookingFilter, RestError> {
        Ok(self.state.as_deref().unwrap_or("ALL").parse()?)
    }
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<BookingDetails>>, RestError> {
    let caller = get_caller_id(&headers)?;
    let filter = query.filter()?;
    let bookings =
        driver.list_bookings_for_booker(caller, filter, BookingSort::default()).await?;
    Ok(Json(bookings))
}
