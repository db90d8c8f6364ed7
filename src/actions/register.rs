use crate::api::{ApiClient, RegisterRequest, UserProfile};
use crate::ClientError;

/// Creates an account and records it as the current user.
///
/// Registration returns no token; the session stays unauthenticated for API
/// calls until the user logs in.
pub struct RegisterAction {
    api: ApiClient,
}

impl RegisterAction {
    pub fn new(api: ApiClient) -> Self {
        RegisterAction { api }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "register", skip_all, err)
    )]
    pub async fn execute(&self, request: &RegisterRequest) -> Result<UserProfile, ClientError> {
        let user = self.api.register(request).await?;

        let is_admin = user.is_admin();
        self.api.session().set_user(user.clone(), is_admin).await;

        log::info!(target: "storefront_client", "msg=\"registration success\"");

        Ok(user)
    }
}
