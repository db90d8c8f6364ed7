//! Request pipeline behavior seen through the public client.
//!
//! Run with: `cargo test --features mocks --test api_gateway`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;

use reqwest::Method;
use serde_json::json;

use common::{BASE_URL, harness, valid_token};
use storefront_client::{ClientError, FilePart, InMemoryTokenStore, Navigator, UserRole};

#[tokio::test]
async fn unauthorized_on_admin_page_signs_out_and_leaves() {
    let h = harness(Arc::new(InMemoryTokenStore::new()), "/shop/admin.html");
    h.storefront
        .session()
        .set_token(valid_token("boss@shop.test", Some("admin")).as_str())
        .await
        .unwrap();
    h.transport.respond(
        Method::DELETE,
        "/products/3",
        401,
        json!({ "detail": "Could not validate credentials" }),
    );

    let err = h.storefront.api().delete_product(3).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert!(h.storefront.session().snapshot().is_empty());
    assert_eq!(h.navigator.current_location(), "index.html");
}

#[tokio::test]
async fn unauthorized_off_admin_page_stays_put() {
    let h = harness(Arc::new(InMemoryTokenStore::new()), "/shop/cart.html");
    h.storefront
        .session()
        .set_token(valid_token("a@shop.test", None).as_str())
        .await
        .unwrap();
    h.transport.respond(Method::GET, "/cart", 401, json!({}));

    let err = h.storefront.api().get_cart().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 401");
    assert!(h.storefront.session().snapshot().is_empty());
    assert_eq!(h.navigator.current_location(), "/shop/cart.html");
    assert!(h.navigator.history().is_empty());
}

#[tokio::test]
async fn file_url_is_deterministic_and_offline() {
    let h = harness(Arc::new(InMemoryTokenStore::new()), "index.html");

    let first = h.storefront.file_url("3f2a.png");
    let second = h.storefront.api().file_url("3f2a.png");

    assert_eq!(first, format!("{BASE_URL}/upload/files/3f2a.png"));
    assert_eq!(first, second);
    assert!(h.transport.requests().is_empty());
}

#[tokio::test]
async fn batch_upload_is_all_or_nothing() {
    let h = harness(Arc::new(InMemoryTokenStore::new()), "admin.html");
    for name in ["a.png", "b.png", "c.png"] {
        h.transport.respond(
            Method::POST,
            "/upload/image",
            200,
            json!({ "filename": name, "url": format!("/api/v1/upload/files/{name}") }),
        );
    }
    let files: Vec<FilePart> = ["a.png", "b.png", "c.png"]
        .into_iter()
        .map(|name| FilePart::new(name, vec![0u8; 4]).with_content_type("image/png"))
        .collect();

    let uploaded = h.storefront.upload_images(files.clone()).await.unwrap();
    let names: Vec<&str> = uploaded.iter().map(|f| f.filename.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);

    h.transport
        .respond(Method::POST, "/upload/image", 200, json!({ "filename": "a.png", "url": "/a" }))
        .fail_network(Method::POST, "/upload/image")
        .respond(Method::POST, "/upload/image", 200, json!({ "filename": "c.png", "url": "/c" }));

    let result = h.storefront.upload_images(files).await;
    assert!(matches!(result, Err(ClientError::Network(_))));
}

#[tokio::test]
async fn login_then_logout() {
    let store = Arc::new(InMemoryTokenStore::new());
    let h = harness(store.clone(), "index.html");
    let token = valid_token("boss@shop.test", Some("admin"));
    h.transport
        .respond(Method::POST, "/auth/login", 200, json!({ "access_token": token, "token_type": "bearer" }))
        .respond(
            Method::GET,
            "/users/me",
            200,
            json!({ "id": 1, "email": "boss@shop.test", "role": "admin" }),
        )
        .respond(Method::GET, "/orders", 401, json!({ "detail": "Not authenticated" }));

    let user = h.storefront.login("boss@shop.test", "secret").await.unwrap();

    assert_eq!(user.email, "boss@shop.test");
    assert_eq!(user.role, UserRole::Admin);
    assert!(h.storefront.session().is_admin());
    assert_eq!(store.len(), 1);

    h.storefront.logout().await.unwrap();
    assert!(store.is_empty());

    let err = h.storefront.api().list_orders().await.unwrap_err();
    assert!(matches!(err, ClientError::Request { status: 401, .. }));
    assert!(h.storefront.session().snapshot().is_empty());
    assert_eq!(
        h.transport.last_request().unwrap().header("authorization"),
        None
    );
}
