//! Session change notifications.
//!
//! Every transition of the [`SessionStore`](crate::SessionStore) dispatches
//! exactly one [`SessionEvent`] to the listeners registered on that store.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storefront_client::events::listeners::{ChannelListener, LoggingListener};
//!
//! let (listener, mut updates) = ChannelListener::new();
//! storefront.session().listen(LoggingListener::new());
//! storefront.session().listen(listener);
//!
//! while let Some(event) = updates.recv().await {
//!     redraw_header(event.email(), event.is_admin());
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::{SessionEvent, SignOutReason};
pub use listener::Listener;
pub use registry::ListenerRegistry;
