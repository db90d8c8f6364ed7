use reqwest::Method;
use reqwest::header::HeaderMap;

use super::request::{HttpRequest, RequestBody, RequestOptions};
use super::types::{LoginResponse, RegisterRequest, UserProfile};
use super::ApiClient;
use crate::{ClientError, SignOutReason};

impl ApiClient {
    /// Exchanges credentials for a bearer token and stores it in the session.
    ///
    /// Sent as a form outside the authenticated pipeline: no bearer token,
    /// no JSON content type, and a 401 here is just a failed login.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Request`] with the server's `detail` or `Login failed`
    /// - [`ClientError::Decode`] if the returned token has no readable claims;
    ///   the session is cleared in that case
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "api_login", skip_all, err)
    )]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = HttpRequest {
            method: Method::POST,
            url: self.config.url("/auth/login"),
            headers: HeaderMap::new(),
            body: RequestBody::Form(vec![
                ("username".to_owned(), email.to_owned()),
                ("password".to_owned(), password.to_owned()),
            ]),
        };

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let message = response
                .error_message()
                .unwrap_or_else(|| "Login failed".to_owned());
            log::info!(
                target: "storefront_client",
                "msg=\"login rejected\" status={} error=\"{message}\"",
                response.status
            );
            return Err(ClientError::request(response.status, message));
        }

        let login: LoginResponse = response.json()?;
        if let Err(e) = self.session.set_token(login.access_token.clone()).await {
            if matches!(e, ClientError::Decode(_)) {
                self.session.force_sign_out(SignOutReason::DecodeFailed).await;
            }
            return Err(e);
        }

        Ok(login)
    }

    pub async fn register(&self, user: &RegisterRequest) -> Result<UserProfile, ClientError> {
        self.request("/auth/register", RequestOptions::post().json(user)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::api::{HeadlessNavigator, MockTransport};
    use crate::test_support::valid_token;
    use crate::{ApiClient, ClientConfig, ClientError, InMemoryTokenStore, SessionStore, UserRole};

    fn client() -> (ApiClient, MockTransport, InMemoryTokenStore) {
        let transport = MockTransport::new();
        let backend = InMemoryTokenStore::new();
        let client = ApiClient::new(
            ClientConfig::new().with_base_url("http://shop.test/api/v1"),
            Arc::new(transport.clone()),
            Arc::new(SessionStore::new(backend.clone(), "access_token")),
            Arc::new(HeadlessNavigator::at("admin.html")),
        );
        (client, transport, backend)
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (client, transport, backend) = client();
        let token = valid_token("a@shop.test", Some("client"));
        transport.respond(
            reqwest::Method::POST,
            "/auth/login",
            200,
            json!({ "access_token": token, "token_type": "bearer" }),
        );

        let response = client.login("a@shop.test", "secret").await.unwrap();

        assert_eq!(response.access_token.expose_secret(), token);
        assert_eq!(client.session().token().unwrap().expose_secret(), token);
        assert_eq!(backend.len(), 1);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("content-type"), None);
        assert_eq!(sent.header("authorization"), None);
        assert_eq!(
            sent.body,
            crate::RequestBody::Form(vec![
                ("username".to_owned(), "a@shop.test".to_owned()),
                ("password".to_owned(), "secret".to_owned()),
            ])
        );
    }

    #[tokio::test]
    async fn test_login_failure_message() {
        let (client, transport, _) = client();
        transport
            .respond(
                reqwest::Method::POST,
                "/auth/login",
                401,
                json!({ "detail": "Incorrect email or password" }),
            )
            .respond_raw(reqwest::Method::POST, "/auth/login", 500, "oops");

        let err = client.login("a@shop.test", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Incorrect email or password");

        let err = client.login("a@shop.test", "wrong").await.unwrap_err();
        assert_eq!(err, ClientError::request(500, "Login failed"));
    }

    #[tokio::test]
    async fn test_login_401_does_not_clear_session() {
        let (client, transport, _) = client();
        client
            .session()
            .set_token(valid_token("a@shop.test", None).as_str())
            .await
            .unwrap();
        transport.respond(reqwest::Method::POST, "/auth/login", 401, json!({}));

        assert!(client.login("b@shop.test", "wrong").await.is_err());
        assert!(client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_login_with_undecodable_token() {
        let (client, transport, backend) = client();
        transport.respond(
            reqwest::Method::POST,
            "/auth/login",
            200,
            json!({ "access_token": "opaque-token" }),
        );

        let err = client.login("a@shop.test", "secret").await.unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
        assert!(client.session().snapshot().is_empty());
        assert!(backend.is_empty());
    }

    #[tokio::test]
    async fn test_register_returns_profile() {
        let (client, transport, _) = client();
        transport.respond(
            reqwest::Method::POST,
            "/auth/register",
            200,
            json!({ "id": 7, "email": "new@shop.test", "first_name": "Ann", "role": "client" }),
        );

        let request = crate::api::RegisterRequest::new("new@shop.test", "pw").with_first_name("Ann");
        let profile = client.register(&request).await.unwrap();

        assert_eq!(profile.id, Some(7));
        assert_eq!(profile.role, UserRole::Client);
        assert!(!client.session().is_authenticated());
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("content-type"), Some("application/json"));
    }
}
