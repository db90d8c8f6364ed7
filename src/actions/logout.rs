use crate::{ClientError, SessionStore, SignOutReason};

/// Ends the session locally.
///
/// Bearer tokens are stateless, so there is nothing to revoke server-side;
/// the token is simply forgotten. Fails if the persisted copy could not be
/// removed.
pub struct LogoutAction<'a> {
    session: &'a SessionStore,
}

impl<'a> LogoutAction<'a> {
    pub fn new(session: &'a SessionStore) -> Self {
        LogoutAction { session }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "logout", skip_all, err)
    )]
    pub async fn execute(&self) -> Result<(), ClientError> {
        self.session.clear_auth(SignOutReason::Logout).await?;

        log::info!(
            target: "storefront_client",
            "msg=\"logout success\""
        );

        Ok(())
    }
}
