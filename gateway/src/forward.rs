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

//! Relaying of validated requests to the backend server.

use crate::rest::{GatewayError, GatewayResult, USER_ID_HEADER};
use axum::body::Body;
use axum::http::header::CONTENT_TYPE;
use axum::response::Response;
use reqwest::Client;
use serde::Serialize;
use url::Url;

/// Mirrors the backend `response`, status and body included, to the caller.
async fn relay(response: reqwest::Response) -> GatewayResult<Response> {
    let status = response.status();
    let content_type = response.headers().get(CONTENT_TYPE).cloned();
    let body = response
        .bytes()
        .await
        .map_err(|e| GatewayError::Unavailable(format!("Lost the backend connection: {}", e)))?;

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body)).map_err(|e| GatewayError::Unavailable(e.to_string()))
}

/// HTTP client that relays requests to the backend server.
#[derive(Clone)]
pub(crate) struct Forwarder {
    /// Base URL of the backend, guaranteed to end with a slash.
    base_url: Url,

    /// Asynchronous HTTP client with which to issue the backend requests.
    client: Client,
}

impl Forwarder {
    /// Creates a new forwarder that talks to the backend at `base_url`.
    pub(crate) fn new(mut base_url: Url) -> Self {
        // `Url::join` drops the last path component unless the base ends with a slash.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Self { base_url, client: Client::default() }
    }

    /// Builds the absolute URL for the backend `path`, which may carry a query string.
    fn url(&self, path: &str) -> GatewayResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GatewayError::Unavailable(format!("Invalid backend URL: {}", e)))
    }

    /// Issues a GET request for `path` on behalf of `caller`.
    pub(crate) async fn get(&self, path: &str, caller: Option<i64>) -> GatewayResult<Response> {
        let builder = self.client.get(self.url(path)?);
        self.send(builder, caller).await
    }

    /// Issues a POST request for `path` on behalf of `caller` with a JSON `body`.
    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        caller: Option<i64>,
        body: &B,
    ) -> GatewayResult<Response> {
        let builder = self.client.post(self.url(path)?).json(body);
        self.send(builder, caller).await
    }

    /// Issues a PATCH request for `path` on behalf of `caller`, with a JSON `body` if given.
    pub(crate) async fn patch<B: Serialize>(
        &self,
        path: &str,
        caller: Option<i64>,
        body: Option<&B>,
    ) -> GatewayResult<Response> {
        let mut builder = self.client.patch(self.url(path)?);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder, caller).await
    }

    /// Issues a DELETE request for `path`.
    pub(crate) async fn delete(&self, path: &str) -> GatewayResult<Response> {
        let builder = self.client.delete(self.url(path)?);
        self.send(builder, None).await
    }

    /// Stamps the identity header on the outgoing request, sends it and mirrors the response.
    async fn send(
        &self,
        mut builder: reqwest::RequestBuilder,
        caller: Option<i64>,
    ) -> GatewayResult<Response> {
        if let Some(caller) = caller {
            builder = builder.header(USER_ID_HEADER, caller);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Unavailable(format!("Cannot reach the backend: {}", e)))?;
        relay(response).await
    }
}
