//! Gateway to the storefront REST API.
//!
//! Every network call goes through [`ApiClient::request`], which attaches the
//! session's bearer token and reacts to `401 Unauthorized` by ending the
//! session and leaving privileged pages.

mod auth;
mod cart;
mod navigator;
mod orders;
mod products;
mod promo;
mod request;
mod transport;
mod types;
mod upload;
mod users;

#[cfg(any(test, feature = "mocks"))]
mod transport_mock;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use serde::de::DeserializeOwned;

pub use navigator::{HeadlessNavigator, Navigator};
pub use request::{FilePart, HttpRequest, HttpResponse, RequestBody, RequestOptions};
pub use transport::{ReqwestTransport, Transport};
pub use types::*;

#[cfg(any(test, feature = "mocks"))]
pub use transport_mock::MockTransport;

use crate::{ClientConfig, ClientError, SessionStore, SignOutReason};

const JSON: &str = "application/json";

/// Authenticated client for the storefront API.
#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            config,
            transport,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Public URL of an uploaded file. Performs no I/O.
    pub fn file_url(&self, filename: &str) -> String {
        self.config.url(&format!("/upload/files/{filename}"))
    }

    /// Sends a request to `path` (relative to the base URL) and decodes the
    /// JSON response.
    ///
    /// JSON and empty bodies default to `Content-Type: application/json`;
    /// headers in `options` replace defaults of the same name. When the
    /// session holds a token it is sent as `Authorization: Bearer <token>`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Request`] for non-2xx responses, carrying the
    ///   server's `detail` or `HTTP error! status: <code>`. A 401 also clears
    ///   the session and navigates away from the admin page.
    /// - [`ClientError::Network`] when no response arrives. The session is
    ///   left untouched.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "api_request", skip_all, fields(path = %path), err)
    )]
    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        let RequestOptions {
            method,
            headers: overrides,
            body,
        } = options;

        let mut headers = reqwest::header::HeaderMap::new();
        if body.is_json_like() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        }
        for (name, value) in &overrides {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(authorization) = self.session.authorization() {
            match HeaderValue::from_str(&authorization) {
                Ok(value) => {
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => {
                    // the same token would fail every later request
                    self.session.force_sign_out(SignOutReason::DecodeFailed).await;
                    return Err(ClientError::Decode(
                        "token contains characters not allowed in a header".to_owned(),
                    ));
                }
            }
        }

        let request = HttpRequest {
            method,
            url: self.config.url(path),
            headers,
            body,
        };

        log::debug!(
            target: "storefront_client",
            "msg=\"request\" method={} path=\"{path}\"",
            request.method
        );

        let response = self.transport.send(request).await.inspect_err(|e| {
            log::warn!(target: "storefront_client", "msg=\"request failed\" path=\"{path}\" error=\"{e}\"");
        })?;

        if !response.is_success() {
            return Err(self.fail(path, &response).await);
        }

        response.json()
    }

    async fn fail(&self, path: &str, response: &HttpResponse) -> ClientError {
        if response.status == 401 {
            log::info!(target: "storefront_client", "msg=\"unauthorized\" path=\"{path}\"");
            self.session.force_sign_out(SignOutReason::Unauthorized).await;

            if self
                .navigator
                .current_location()
                .contains(&self.config.admin_page)
            {
                self.navigator.navigate(&self.config.entry_page);
            }
        }

        let message = response
            .error_message()
            .unwrap_or_else(|| format!("HTTP error! status: {}", response.status));

        log::warn!(
            target: "storefront_client",
            "msg=\"request rejected\" path=\"{path}\" status={} error=\"{message}\"",
            response.status
        );

        ClientError::request(response.status, message)
    }
}
