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

//! Extends the driver with the item request operations.
//!
//! The list of items answering a request is never stored: it is recomputed on every read by
//! querying the items whose request reference matches.

use crate::db::{self, DbError, Executor};
use crate::driver::{Driver, DriverError, DriverResult};
use crate::model::{ItemRequest, ItemSummary, RequestDetails, RequestId, UserId};

/// Hydrates `request` into its API representation by attaching the items that answer it.
async fn attach_items(ex: &mut Executor, request: ItemRequest) -> DriverResult<RequestDetails> {
    let items = db::items::list_items_for_request(ex, request.id).await?;
    Ok(RequestDetails {
        id: request.id,
        description: request.description,
        requestor_id: request.requestor,
        created: request.created,
        items: items.into_iter().map(ItemSummary::from).collect(),
    })
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
    /// Creates a new item request by `requestor` with the given `description`.
    pub(crate) async fn create_request(
        self,
        requestor: UserId,
        description: Option<String>,
    ) -> DriverResult<RequestDetails> {
        let description = match description {
            Some(description) if !description.trim().is_empty() => description,
            _ => return Err(DriverError::InvalidInput("Description cannot be empty".to_owned())),
        };

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), requestor).await?;

        let request =
            db::requests::create_request(tx.ex(), &description, requestor, self.clock.now_utc())
                .await?;
        tx.commit().await?;
        Ok(RequestDetails {
            id: request.id,
            description: request.description,
            requestor_id: request.requestor,
            created: request.created,
            items: vec![],
        })
    }

    /// Lists the requests made by `requestor`, newest first, with their answering items.
    pub(crate) async fn list_requests_for_user(
        self,
        requestor: UserId,
    ) -> DriverResult<Vec<RequestDetails>> {
        let mut ex = self.db.ex().await?;
        require_user(&mut ex, requestor).await?;

        let requests = db::requests::list_requests_for_requestor(&mut ex, requestor).await?;
        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            result.push(attach_items(&mut ex, request).await?);
        }
        Ok(result)
    }

    /// Lists the requests NOT made by `user`, newest first, returning the page that starts at
    /// offset `from` and holds at most `size` entries.
    pub(crate) async fn list_other_requests(
        self,
        user: UserId,
        from: i64,
        size: i64,
    ) -> DriverResult<Vec<RequestDetails>> {
        if from < 0 {
            return Err(DriverError::InvalidInput("from cannot be negative".to_owned()));
        }
        if size <= 0 {
            return Err(DriverError::InvalidInput("size must be positive".to_owned()));
        }

        let mut ex = self.db.ex().await?;
        require_user(&mut ex, user).await?;

        let requests =
            db::requests::list_requests_excluding_requestor(&mut ex, user, from, size).await?;
        let mut result = Vec::with_capacity(requests.len());
        for request in requests {
            result.push(attach_items(&mut ex, request).await?);
        }
        Ok(result)
    }

    /// Gets the request `id` with its answering items on behalf of `user`.  Any user may read
    /// any request.
    pub(crate) async fn get_request(
        self,
        id: RequestId,
        user: UserId,
    ) -> DriverResult<RequestDetails> {
        let mut ex = self.db.ex().await?;
        require_user(&mut ex, user).await?;

        let request = match db::requests::get_request(&mut ex, id).await {
            Ok(request) => request,
            Err(DbError::NotFound) => {
                return Err(DriverError::NotFound(format!("Request {} not found", id)));
            }
            Err(e) => return Err(e.into()),
        };
        attach_items(&mut ex, request).await
    }
}
