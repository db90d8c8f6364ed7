use std::sync::{Arc, RwLock};

use super::{Listener, SessionEvent};

/// Listeners attached to one [`SessionStore`](crate::SessionStore).
///
/// Owned by the store rather than kept in a process-wide static, so two
/// stores in the same process never see each other's events.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: RwLock<Vec<Arc<dyn Listener>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener to receive events.
    ///
    /// Listeners are called in the order they are registered.
    pub fn listen(&self, listener: impl Listener) -> &Self {
        self.listeners
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Arc::new(listener));
        self
    }

    pub fn len(&self) -> usize {
        self.listeners
            .read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Dispatch an event to every listener. No-op without listeners.
    pub async fn dispatch(&self, event: &SessionEvent) {
        // snapshot so no lock is held across a listener's await
        let listeners: Vec<Arc<dyn Listener>> = self
            .listeners
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        for listener in listeners {
            listener.handle(event).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;

    use super::*;
    use crate::events::SignOutReason;

    struct Recorder {
        tag: &'static str,
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Listener for Recorder {
        async fn handle(&self, event: &SessionEvent) {
            self.seen
                .lock()
                .unwrap()
                .push(format!("{}:{}", self.tag, event.name()));
        }
    }

    #[tokio::test]
    async fn test_dispatch_in_registration_order() {
        let seen = Arc::new(Mutex::new(vec![]));
        let registry = ListenerRegistry::new();
        registry
            .listen(Recorder {
                tag: "first",
                seen: seen.clone(),
            })
            .listen(Recorder {
                tag: "second",
                seen: seen.clone(),
            });
        assert_eq!(registry.len(), 2);

        registry
            .dispatch(&SessionEvent::SignedOut {
                reason: SignOutReason::Logout,
                at: Utc::now(),
            })
            .await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["first:session.signed_out", "second:session.signed_out"]
        );
    }

    #[tokio::test]
    async fn test_dispatch_without_listeners_is_noop() {
        let registry = ListenerRegistry::new();
        assert!(registry.is_empty());
        registry
            .dispatch(&SessionEvent::SignedOut {
                reason: SignOutReason::Expired,
                at: Utc::now(),
            })
            .await;
    }
}
