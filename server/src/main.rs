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

//! Entry point to the ShareIt backend server.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use shareit_server::db::postgres::{self, PostgresOptions};
use shareit_server::db::{Db, init_schema};
use shareit_server::env::get_optional_var;
use shareit_server::serve;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    env_logger::init();

    let port = get_optional_var::<u16>("SHAREIT_SERVER", "PORT")
        .expect("Invalid SHAREIT_SERVER_PORT")
        .unwrap_or(9090);
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

    let db_opts = PostgresOptions::from_env("SHAREIT_PGSQL").unwrap();
    let db: Arc<dyn Db + Send + Sync> = Arc::from(postgres::connect(db_opts).unwrap());
    init_schema(&mut db.ex().await.unwrap()).await.unwrap();

    serve(addr, db).await.unwrap()
}
