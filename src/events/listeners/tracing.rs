use async_trait::async_trait;

use crate::events::{Listener, SessionEvent};

/// Emits session changes as tracing events.
///
/// Requires the `tracing` feature to be enabled. The email is left out on
/// purpose; only the transition and privilege level are recorded.
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &SessionEvent) {
        tracing::info!(
            target: "storefront_client::events",
            event_name = event.name(),
            admin = event.is_admin(),
            "session event"
        );
    }
}
