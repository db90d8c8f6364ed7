use super::request::RequestOptions;
use super::types::{Product, ProductInput};
use super::ApiClient;
use crate::ClientError;

impl ApiClient {
    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.request("/products", RequestOptions::get()).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ClientError> {
        self.request(&format!("/products/{id}"), RequestOptions::get())
            .await
    }

    pub async fn create_product(&self, product: &ProductInput) -> Result<Product, ClientError> {
        self.request("/products", RequestOptions::post().json(product)?)
            .await
    }

    pub async fn update_product(
        &self,
        id: i64,
        product: &ProductInput,
    ) -> Result<Product, ClientError> {
        self.request(&format!("/products/{id}"), RequestOptions::put().json(product)?)
            .await
    }

    /// Deletes a product; the server answers with the removed record.
    pub async fn delete_product(&self, id: i64) -> Result<Product, ClientError> {
        self.request(&format!("/products/{id}"), RequestOptions::delete())
            .await
    }
}
