//! Token fixtures shared by unit tests.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Map, Value, json};

const SECRET: &[u8] = b"test-secret-32-bytes-long-key-01";

/// Mints an HS256 token the way the storefront backend does.
pub fn mint_token(sub: &str, role: Option<&str>, exp: Option<i64>) -> String {
    let mut claims = Map::new();
    claims.insert("sub".to_owned(), json!(sub));
    if let Some(role) = role {
        claims.insert("role".to_owned(), json!(role));
    }
    if let Some(exp) = exp {
        claims.insert("exp".to_owned(), json!(exp));
    }

    jsonwebtoken::encode(
        &Header::default(),
        &Value::Object(claims),
        &EncodingKey::from_secret(SECRET),
    )
    .unwrap()
}

pub fn valid_token(sub: &str, role: Option<&str>) -> String {
    mint_token(sub, role, Some((Utc::now() + Duration::hours(1)).timestamp()))
}

pub fn expired_token(sub: &str) -> String {
    mint_token(sub, None, Some((Utc::now() - Duration::hours(1)).timestamp()))
}

/// Client wired to a scripted transport, an in-memory token store and a
/// navigator parked at `location`.
pub fn mock_api(
    location: &str,
) -> (
    crate::ApiClient,
    crate::MockTransport,
    std::sync::Arc<crate::api::HeadlessNavigator>,
    crate::InMemoryTokenStore,
) {
    use std::sync::Arc;

    let transport = crate::MockTransport::new();
    let navigator = Arc::new(crate::api::HeadlessNavigator::at(location));
    let backend = crate::InMemoryTokenStore::new();
    let client = crate::ApiClient::new(
        crate::ClientConfig::new().with_base_url("http://shop.test/api/v1"),
        Arc::new(transport.clone()),
        Arc::new(crate::SessionStore::new(backend.clone(), "access_token")),
        navigator.clone(),
    );
    (client, transport, navigator, backend)
}
