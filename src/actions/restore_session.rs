use crate::api::{ApiClient, UserProfile};

/// Rebuilds the session from the persisted token at startup.
pub struct RestoreSessionAction {
    api: ApiClient,
}

impl RestoreSessionAction {
    pub fn new(api: ApiClient) -> Self {
        RestoreSessionAction { api }
    }

    /// Restores the signed-in user, if the persisted token is still usable.
    ///
    /// The role comes from `GET /users/me` when the server answers; otherwise
    /// the `role` claim of the token is used. A 401 from the server ends the
    /// session instead.
    ///
    /// # Returns
    ///
    /// - `Some(user)` - session restored, one `Restored` event dispatched
    /// - `None` - no token, or the token was expired or unreadable
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "restore_session", skip_all)
    )]
    pub async fn execute(&self) -> Option<UserProfile> {
        let session = self.api.session();
        let claims = session.load_persisted().await?;

        let (user, is_admin) = match self.api.current_user().await {
            Ok(profile) => {
                let is_admin = profile.is_admin();
                (profile, is_admin)
            }
            Err(e) if e.is_unauthorized() => return None,
            Err(e) => {
                log::warn!(
                    target: "storefront_client",
                    "msg=\"could not fetch user info, using token data\" error=\"{e}\""
                );
                (UserProfile::from_claims(&claims), claims.is_admin())
            }
        };

        session.restore_user(user.clone(), is_admin).await;

        log::info!(
            target: "storefront_client",
            "msg=\"session restored\" admin={is_admin}"
        );

        Some(user)
    }
}
