use std::sync::RwLock;

/// Reads and changes the location the client is presenting.
///
/// Used by the request pipeline to leave privileged pages once the server
/// reports the session as unauthorized.
pub trait Navigator: Send + Sync {
    fn current_location(&self) -> String;

    fn navigate(&self, location: &str);
}

/// [`Navigator`] for clients without a page model, such as CLIs and tests.
///
/// Keeps the current location in memory and remembers every navigation.
#[derive(Debug, Default)]
pub struct HeadlessNavigator {
    location: RwLock<String>,
    history: RwLock<Vec<String>>,
}

impl HeadlessNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(location: impl Into<String>) -> Self {
        Self {
            location: RwLock::new(location.into()),
            history: RwLock::new(vec![]),
        }
    }

    /// Locations navigated to, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .read()
            .map(|h| h.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl Navigator for HeadlessNavigator {
    fn current_location(&self) -> String {
        self.location
            .read()
            .map(|l| l.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn navigate(&self, location: &str) {
        log::debug!(target: "storefront_client", "msg=\"navigate\" location=\"{location}\"");

        *self
            .location
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = location.to_owned();
        self.history
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(location.to_owned());
    }
}
