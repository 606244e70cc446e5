//! The transport seam.
//!
//! The runtime does not own a socket; it consumes a duplex text transport
//! (in production a WebSocket to `irc-ws.chat.twitch.tv`) through this
//! interface. Reconnection policy belongs to the provider, not the core.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::TransportError;

/// Connection lifecycle and inbound frames, pushed to the subscriber.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is established and writable.
    Connected,
    /// The connection is gone; outbound state must be discarded.
    Disconnected,
    /// One inbound text frame. May contain several CR/LF-separated lines.
    Frame(String),
}

/// A duplex text transport.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open the connection.
    async fn connect(&self, url: &str) -> Result<(), TransportError>;

    /// Close the connection with a reason.
    async fn disconnect(&self, reason: &str) -> Result<(), TransportError>;

    /// Fire-and-forget send; errors are swallowed by the provider.
    fn send(&self, line: &str);

    /// Awaitable send that surfaces transport errors.
    async fn send_instant(&self, line: &str) -> Result<(), TransportError>;

    /// Register the sink that receives connection events and frames.
    fn subscribe(&self, events: UnboundedSender<TransportEvent>);
}
