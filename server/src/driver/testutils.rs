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

//! Utilities to help testing the driver operations.

use crate::clocks::Clock;
use crate::clocks::testutils::SettableClock;
use crate::db::{self, Db, Executor, sqlite};
use crate::driver::Driver;
use crate::model::{Booking, BookingStatus, EmailAddress, Item, User, UserId};
use std::sync::Arc;
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

/// State of a running test.
pub(crate) struct TestContext {
    /// The database that backs the driver, also available for direct inspection.
    pub(crate) db: Arc<dyn Db + Send + Sync>,

    /// The fake clock that the driver observes.
    pub(crate) clock: Arc<SettableClock>,
}

impl TestContext {
    /// Initializes the test context with an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::from(SettableClock::new(datetime!(2025-06-15 12:00:00 UTC)));
        Self { db, clock }
    }

    /// Gets a driver instance backed by this context's database and clock.
    pub(crate) fn driver(&self) -> Driver {
        Driver::new(self.db.clone(), self.clock.clone())
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns the clock's current time shifted by `delta_secs`.
    pub(crate) fn now_delta(&self, delta_secs: i64) -> OffsetDateTime {
        self.clock.now_utc() + Duration::seconds(delta_secs)
    }

    /// Creates a user by directly modifying the backing database.
    pub(crate) async fn create_user(&self, name: &str) -> User {
        let email = EmailAddress::new(format!("{}@example.com", name)).unwrap();
        db::users::create_user(&mut self.ex().await, name, &email).await.unwrap()
    }

    /// Creates an item by directly modifying the backing database.
    pub(crate) async fn create_item(&self, owner: UserId, name: &str, available: bool) -> Item {
        db::items::create_item(
            &mut self.ex().await,
            name,
            "Created for testing",
            available,
            owner,
            None,
        )
        .await
        .unwrap()
    }

    /// Creates a booking by directly modifying the backing database.  The window is expressed
    /// as second offsets relative to the clock's current time.
    pub(crate) async fn create_booking(
        &self,
        item: &Item,
        booker: UserId,
        start_delta_secs: i64,
        end_delta_secs: i64,
        status: BookingStatus,
    ) -> Booking {
        db::bookings::create_booking(
            &mut self.ex().await,
            self.now_delta(start_delta_secs),
            self.now_delta(end_delta_secs),
            item.id,
            booker,
            status,
        )
        .await
        .unwrap()
    }
}
