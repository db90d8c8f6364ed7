use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::events::{Listener, SessionEvent};

/// Forwards session changes into an unbounded channel.
///
/// Lets a UI loop own its redraws: it receives one message per session
/// change and never has to be called back from inside the client.
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<SessionEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl Listener for ChannelListener {
    async fn handle(&self, event: &SessionEvent) {
        if self.sender.send(event.clone()).is_err() {
            log::debug!(
                target: "storefront_client::events",
                "msg=\"receiver dropped\" event={}",
                event.name()
            );
        }
    }
}
