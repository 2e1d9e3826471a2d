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

//! Entry point to the ShareIt gateway.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use shareit_gateway::env::{get_optional_var, get_required_var};
use shareit_gateway::serve;
use std::net::{Ipv4Addr, SocketAddr};
use url::Url;

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = get_optional_var::<u16>("SHAREIT_GATEWAY", "PORT")
        .expect("Invalid SHAREIT_GATEWAY_PORT")
        .unwrap_or(8080);
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

    let server_url = get_required_var::<Url>("SHAREIT_GATEWAY", "SERVER_URL").unwrap();

    serve(addr, server_url).await.unwrap()
}
