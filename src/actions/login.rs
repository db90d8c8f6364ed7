use crate::api::{ApiClient, UserProfile};
use crate::{ClientError, claims};

/// Signs a user in and resolves who they are.
pub struct LoginAction {
    api: ApiClient,
}

impl LoginAction {
    pub fn new(api: ApiClient) -> Self {
        LoginAction { api }
    }

    /// Logs in with email and password.
    ///
    /// After the token is stored the profile is fetched from `GET /users/me`;
    /// if that fails for any reason but a 401, the profile is built from the
    /// token's claims (`sub`, and `role` defaulting to client).
    ///
    /// # Returns
    ///
    /// - `Ok(user)` - signed in, one `SignedIn` event dispatched
    /// - `Err(ClientError::Request)` - credentials rejected, message from the
    ///   server or `Login failed`
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "login", skip_all, err)
    )]
    pub async fn execute(&self, email: &str, password: &str) -> Result<UserProfile, ClientError> {
        let response = self.api.login(email, password).await?;

        let user = match self.api.current_user().await {
            Ok(profile) => profile,
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                log::warn!(
                    target: "storefront_client",
                    "msg=\"could not fetch user info, using token data\" error=\"{e}\""
                );
                let claims = claims::decode(response.access_token.expose_secret())?;
                UserProfile::from_claims(&claims)
            }
        };

        let is_admin = user.is_admin();
        self.api.session().set_user(user.clone(), is_admin).await;

        log::info!(
            target: "storefront_client",
            "msg=\"login success\" admin={is_admin}"
        );

        Ok(user)
    }
}
