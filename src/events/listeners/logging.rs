use async_trait::async_trait;

use crate::events::{Listener, SessionEvent};

/// Logs session changes using the `log` crate.
///
/// # Example
///
/// ```rust,ignore
/// use storefront_client::events::listeners::LoggingListener;
///
/// storefront.session().listen(LoggingListener::new());
/// ```
pub struct LoggingListener {
    level: log::Level,
}

impl LoggingListener {
    /// Creates a new logging listener at INFO level.
    pub fn new() -> Self {
        Self {
            level: log::Level::Info,
        }
    }

    pub fn with_level(level: log::Level) -> Self {
        Self { level }
    }
}

impl Default for LoggingListener {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Listener for LoggingListener {
    async fn handle(&self, event: &SessionEvent) {
        match event {
            SessionEvent::SignedOut { reason, .. } => log::log!(
                target: "storefront_client::events",
                self.level,
                "event={} reason={}",
                event.name(),
                reason.as_str()
            ),
            _ => log::log!(
                target: "storefront_client::events",
                self.level,
                "event={} admin={}",
                event.name(),
                event.is_admin()
            ),
        }
    }
}
