use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::Notify;

/// A formatted wire line addressed to a channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Channel login name, without `#` (rate-limit key).
    pub channel: String,
    /// The complete IRC line, e.g. `@id=<uuid> PRIVMSG #foo :hello`.
    pub line: String,
}

/// Multi-producer, single-consumer FIFO with a wake gate for the consumer.
///
/// The mutex is held only for the push/peek/pop snapshot, never across an
/// await. `notify_one` stores a permit when the consumer is mid-drain, so a
/// push is never lost between a peek and a hibernate.
#[derive(Default)]
pub struct SendQueue {
    inner: Mutex<VecDeque<OutboundMessage>>,
    wake: Notify,
}

impl SendQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and signal the consumer.
    pub fn push(&self, message: OutboundMessage) {
        self.inner
            .lock()
            .expect("send queue lock poisoned")
            .push_back(message);
        self.wake.notify_one();
    }

    /// Channel of the head message, if any.
    pub fn peek_channel(&self) -> Option<String> {
        self.inner
            .lock()
            .expect("send queue lock poisoned")
            .front()
            .map(|message| message.channel.clone())
    }

    /// Remove and return the head message.
    pub fn pop(&self) -> Option<OutboundMessage> {
        self.inner
            .lock()
            .expect("send queue lock poisoned")
            .pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().expect("send queue lock poisoned").is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().expect("send queue lock poisoned").len()
    }

    /// Wait until a producer signals new work.
    pub async fn wakeful(&self) {
        self.wake.notified().await;
    }
}
