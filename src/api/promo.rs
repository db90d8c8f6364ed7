use super::request::RequestOptions;
use super::types::{MessageResponse, PromoCode, PromoCodeInput, PromoCodeUpdate};
use super::ApiClient;
use crate::ClientError;

impl ApiClient {
    pub async fn list_promos(&self) -> Result<Vec<PromoCode>, ClientError> {
        self.request("/promo", RequestOptions::get()).await
    }

    pub async fn create_promo(&self, promo: &PromoCodeInput) -> Result<PromoCode, ClientError> {
        self.request("/promo", RequestOptions::post().json(promo)?)
            .await
    }

    pub async fn update_promo(
        &self,
        id: i64,
        update: &PromoCodeUpdate,
    ) -> Result<PromoCode, ClientError> {
        self.request(&format!("/promo/{id}"), RequestOptions::put().json(update)?)
            .await
    }

    pub async fn delete_promo(&self, id: i64) -> Result<MessageResponse, ClientError> {
        self.request(&format!("/promo/{id}"), RequestOptions::delete())
            .await
    }
}
