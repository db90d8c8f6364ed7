use async_trait::async_trait;

use super::SessionEvent;

/// Trait for reacting to session changes.
///
/// This is where user-visible affordances get refreshed: the current user's
/// email, whether the admin entry point is shown, and so on.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_client::events::{Listener, SessionEvent};
/// use async_trait::async_trait;
///
/// struct AdminButton;
///
/// #[async_trait]
/// impl Listener for AdminButton {
///     async fn handle(&self, event: &SessionEvent) {
///         set_admin_button_visible(event.is_admin());
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    async fn handle(&self, event: &SessionEvent);
}
