//! Built-in session listeners.

mod channel;
mod logging;
#[cfg(feature = "tracing")]
mod tracing;

pub use channel::ChannelListener;
pub use logging::LoggingListener;
#[cfg(feature = "tracing")]
pub use self::tracing::TracingListener;
