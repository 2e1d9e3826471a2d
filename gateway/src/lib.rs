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

//! ShareIt gateway: validates incoming requests and relays them to the backend server.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use crate::forward::Forwarder;
use std::error::Error;
use std::net::SocketAddr;
use url::Url;

pub mod env;
pub(crate) mod forward;
pub(crate) mod rest;

/// Instantiates all resources to serve the gateway on `bind_addr`, relaying valid requests to
/// the backend at `server_url`.
pub async fn serve(bind_addr: SocketAddr, server_url: Url) -> Result<(), Box<dyn Error>> {
    let forwarder = Forwarder::new(server_url);
    let app = rest::app(forwarder);

    axum_server::bind(bind_addr).serve(app.into_make_service()).await?;
    Ok(())
}
