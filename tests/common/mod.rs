#![allow(dead_code, clippy::unwrap_used)]

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{Map, Value, json};

use storefront_client::{
    ClientConfig, HeadlessNavigator, MockTransport, Storefront, TokenStore,
};

pub const BASE_URL: &str = "http://shop.test/api/v1";

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
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap()
}

pub fn valid_token(sub: &str, role: Option<&str>) -> String {
    mint_token(sub, role, Some((Utc::now() + Duration::hours(1)).timestamp()))
}

pub struct Harness {
    pub storefront: Storefront,
    pub transport: MockTransport,
    pub navigator: Arc<HeadlessNavigator>,
}

/// A storefront over `store`, scripted through a mock transport, with the
/// navigator parked at `location`.
pub fn harness(store: Arc<dyn TokenStore>, location: &str) -> Harness {
    let transport = MockTransport::new();
    let navigator = Arc::new(HeadlessNavigator::at(location));
    let storefront = Storefront::with_parts(
        ClientConfig::new().with_base_url(BASE_URL),
        store,
        Arc::new(transport.clone()),
        navigator.clone(),
    )
    .unwrap();

    Harness {
        storefront,
        transport,
        navigator,
    }
}
