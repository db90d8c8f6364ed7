use super::request::RequestOptions;
use super::types::UserProfile;
use super::ApiClient;
use crate::ClientError;

impl ApiClient {
    /// Profile of the user the session token belongs to.
    pub async fn current_user(&self) -> Result<UserProfile, ClientError> {
        self.request("/users/me", RequestOptions::get()).await
    }
}
