use super::request::RequestOptions;
use super::types::{
    AddToCartRequest, ApplyPromoRequest, Cart, MessageResponse, UpdateCartItemRequest,
};
use super::ApiClient;
use crate::ClientError;

impl ApiClient {
    pub async fn get_cart(&self) -> Result<Cart, ClientError> {
        self.request("/cart", RequestOptions::get()).await
    }

    pub async fn add_to_cart(
        &self,
        product_id: i64,
        quantity: u32,
    ) -> Result<MessageResponse, ClientError> {
        let body = AddToCartRequest {
            product_id,
            quantity,
        };
        self.request("/cart/add", RequestOptions::post().json(&body)?)
            .await
    }

    pub async fn update_cart_item(
        &self,
        item_id: i64,
        quantity: u32,
    ) -> Result<MessageResponse, ClientError> {
        let body = UpdateCartItemRequest { quantity };
        self.request(
            &format!("/cart/items/{item_id}"),
            RequestOptions::put().json(&body)?,
        )
        .await
    }

    pub async fn remove_from_cart(&self, item_id: i64) -> Result<MessageResponse, ClientError> {
        self.request(&format!("/cart/items/{item_id}"), RequestOptions::delete())
            .await
    }

    pub async fn apply_promo(&self, promo_code: &str) -> Result<MessageResponse, ClientError> {
        let body = ApplyPromoRequest {
            promo_code: promo_code.to_owned(),
        };
        self.request("/cart/apply-promo", RequestOptions::post().json(&body)?)
            .await
    }

    pub async fn clear_cart(&self) -> Result<MessageResponse, ClientError> {
        self.request("/cart", RequestOptions::delete()).await
    }
}
