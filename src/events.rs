//! Domain events and the subscriber registry.
//!
//! Events are delivered synchronously on the receive-pump task; subscribers
//! must not block.

use std::collections::HashMap;
use std::sync::RwLock;

/// A chat message received on a channel.
///
/// Tags are carried verbatim from the wire, unknown tags included; values
/// are not unescaped (see [`crate::message::tags::unescape_value`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Channel login name, without the leading `#`.
    pub channel: String,
    /// Sender's login name, taken from the nick part of the prefix.
    pub sender: String,
    /// Message text.
    pub text: String,
    /// IRCv3 tags, raw wire values.
    pub tags: HashMap<String, String>,
}

/// Events emitted by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// Login handshake completed (end of MOTD received).
    Login,
    /// A JOIN was confirmed for a channel (leading `#` stripped).
    JoinedChannel(String),
    /// A PART was confirmed for a channel (leading `#` stripped).
    LeftChannel(String),
    /// Room state changed; `None` for global user state.
    RoomStateChanged(Option<String>),
    /// A PRIVMSG or USERNOTICE arrived.
    MessageReceived(ChatMessage),
}

type Handler = Box<dyn Fn(&CoreEvent) + Send + Sync>;

/// Synchronous observer registry.
///
/// Subscribers registered here are invoked in registration order, on the
/// task that produced the event.
#[derive(Default)]
pub struct EventBus {
    handlers: RwLock<Vec<Handler>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for all events.
    pub fn subscribe<F>(&self, handler: F)
    where
        F: Fn(&CoreEvent) + Send + Sync + 'static,
    {
        self.handlers
            .write()
            .expect("event bus lock poisoned")
            .push(Box::new(handler));
    }

    /// Register a subscriber for login completion.
    pub fn on_login<F>(&self, handler: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if matches!(event, CoreEvent::Login) {
                handler();
            }
        });
    }

    /// Register a subscriber for channel joins.
    pub fn on_join_channel<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let CoreEvent::JoinedChannel(channel) = event {
                handler(channel);
            }
        });
    }

    /// Register a subscriber for channel parts.
    pub fn on_leave_channel<F>(&self, handler: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let CoreEvent::LeftChannel(channel) = event {
                handler(channel);
            }
        });
    }

    /// Register a subscriber for room-state changes.
    pub fn on_room_state_changed<F>(&self, handler: F)
    where
        F: Fn(Option<&str>) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let CoreEvent::RoomStateChanged(channel) = event {
                handler(channel.as_deref());
            }
        });
    }

    /// Register a subscriber for received chat messages.
    pub fn on_message_received<F>(&self, handler: F)
    where
        F: Fn(&ChatMessage) + Send + Sync + 'static,
    {
        self.subscribe(move |event| {
            if let CoreEvent::MessageReceived(chat) = event {
                handler(chat);
            }
        });
    }

    /// Deliver an event to every subscriber, in registration order.
    pub fn emit(&self, event: &CoreEvent) {
        let handlers = self.handlers.read().expect("event bus lock poisoned");
        for handler in handlers.iter() {
            handler(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = Arc::clone(&count);
            bus.subscribe(move |_| {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        bus.emit(&CoreEvent::Login);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_kind_filtered_subscription() {
        let bus = EventBus::new();
        let joins = Arc::new(std::sync::Mutex::new(Vec::new()));

        let sink = Arc::clone(&joins);
        bus.on_join_channel(move |channel| {
            sink.lock().unwrap().push(channel.to_string());
        });

        bus.emit(&CoreEvent::JoinedChannel("realeris".to_string()));
        bus.emit(&CoreEvent::Login);
        bus.emit(&CoreEvent::LeftChannel("other".to_string()));

        assert_eq!(*joins.lock().unwrap(), vec!["realeris".to_string()]);
    }
}
