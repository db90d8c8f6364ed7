use super::request::{FilePart, RequestOptions};
use super::types::{MessageResponse, UploadedFile};
use super::ApiClient;
use crate::ClientError;

impl ApiClient {
    /// Uploads one image as the multipart field `file`.
    ///
    /// Only the bearer token is sent as a header; the transport sets the
    /// multipart boundary.
    pub async fn upload_image(&self, file: FilePart) -> Result<UploadedFile, ClientError> {
        let options = RequestOptions::post().multipart(vec![("file".to_owned(), file)]);
        self.request("/upload/image", options).await
    }

    pub async fn delete_file(&self, filename: &str) -> Result<MessageResponse, ClientError> {
        self.request(&format!("/upload/files/{filename}"), RequestOptions::delete())
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use reqwest::Method;
    use serde_json::json;

    use crate::api::{HeadlessNavigator, MockTransport};
    use crate::test_support::valid_token;
    use crate::{ApiClient, ClientConfig, FilePart, InMemoryTokenStore, RequestBody, SessionStore};

    #[tokio::test]
    async fn test_upload_sends_multipart_with_token_only() {
        let transport = MockTransport::new();
        let client = ApiClient::new(
            ClientConfig::new().with_base_url("http://shop.test/api/v1"),
            Arc::new(transport.clone()),
            Arc::new(SessionStore::new(InMemoryTokenStore::new(), "access_token")),
            Arc::new(HeadlessNavigator::new()),
        );
        let token = valid_token("boss@shop.test", Some("admin"));
        client.session().set_token(token.as_str()).await.unwrap();
        transport.respond(
            Method::POST,
            "/upload/image",
            200,
            json!({ "filename": "f1.png", "url": "/api/v1/upload/files/f1.png", "size": 3 }),
        );

        let file = FilePart::new("cat.png", vec![1, 2, 3]).with_content_type("image/png");
        let uploaded = client.upload_image(file.clone()).await.unwrap();

        assert_eq!(uploaded.filename, "f1.png");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header("content-type"), None);
        assert_eq!(sent.header("authorization"), Some(format!("Bearer {token}").as_str()));
        assert_eq!(sent.body, RequestBody::Multipart(vec![("file".to_owned(), file)]));
    }
}
