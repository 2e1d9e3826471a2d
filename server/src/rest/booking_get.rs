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

//! API to get a single booking.

use crate::driver::Driver;
use crate::model::{BookingDetails, BookingId};
use crate::rest::{RestError, get_caller_id};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<BookingDetails>, RestError> {
    let caller = get_caller_id(&headers)?;
    let details = driver.get_booking(BookingId::new(id), caller).await?;
    Ok(Json(details))
}
