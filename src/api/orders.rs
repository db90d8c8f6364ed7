use super::request::RequestOptions;
use super::types::{Order, OrderInput, OrderStatus, UpdateOrderStatusRequest};
use super::ApiClient;
use crate::ClientError;

impl ApiClient {
    /// Orders placed by the current user.
    pub async fn list_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.request("/orders", RequestOptions::get()).await
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, ClientError> {
        self.request(&format!("/orders/{id}"), RequestOptions::get())
            .await
    }

    /// Places an order from the current cart.
    pub async fn create_order(&self, order: &OrderInput) -> Result<Order, ClientError> {
        self.request("/orders", RequestOptions::post().json(order)?)
            .await
    }

    pub async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<Order, ClientError> {
        let body = UpdateOrderStatusRequest { status };
        self.request(
            &format!("/orders/{id}/status"),
            RequestOptions::put().json(&body)?,
        )
        .await
    }

    /// Every order in the shop. Admin only.
    pub async fn get_all_orders(&self) -> Result<Vec<Order>, ClientError> {
        self.request("/orders/admin/all", RequestOptions::get())
            .await
    }
}
