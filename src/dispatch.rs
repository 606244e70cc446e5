//! Routing of parsed lines to domain events.
//!
//! The dispatcher is pure: it performs no I/O and returns what should
//! happen as values. Events go to the subscriber registry; control actions
//! (PONG replies, login completion) are carried out by the service facade.

use crate::events::{ChatMessage, CoreEvent};
use crate::message::LineRef;

/// Side effects the facade must perform in response to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlAction {
    /// Reply `PONG :<payload>` on the transport, fire-and-forget.
    Pong(String),
    /// End of MOTD: join the active channels and start the send scheduler.
    LoginComplete,
}

/// The outcome of dispatching one line.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Dispatch {
    pub events: Vec<CoreEvent>,
    pub actions: Vec<ControlAction>,
}

/// Map a parsed line to events and control actions.
///
/// Commands outside the Twitch subset are ignored. `NOTICE`, `CLEARCHAT`,
/// `CLEARMSG`, `HOSTTARGET` and `RECONNECT` are recognised but reserved.
pub fn dispatch(line: &LineRef<'_>) -> Dispatch {
    let mut out = Dispatch::default();

    match line.command {
        "PING" => {
            out.actions
                .push(ControlAction::Pong(line.trailing.unwrap_or("").to_string()));
        }
        "376" => {
            out.events.push(CoreEvent::Login);
            out.actions.push(ControlAction::LoginComplete);
        }
        "JOIN" => {
            if let Some(channel) = line.channel {
                out.events
                    .push(CoreEvent::JoinedChannel(strip_hash(channel).to_string()));
            }
        }
        "PART" => {
            if let Some(channel) = line.channel {
                out.events
                    .push(CoreEvent::LeftChannel(strip_hash(channel).to_string()));
            }
        }
        "PRIVMSG" | "USERNOTICE" => {
            out.events
                .push(CoreEvent::MessageReceived(chat_message(line)));
        }
        "ROOMSTATE" | "USERSTATE" => {
            out.events.push(CoreEvent::RoomStateChanged(
                line.channel.map(|c| strip_hash(c).to_string()),
            ));
        }
        "GLOBALUSERSTATE" => {
            out.events.push(CoreEvent::RoomStateChanged(None));
        }
        // Reserved hooks, not surfaced by the core.
        "NOTICE" | "CLEARCHAT" | "CLEARMSG" | "HOSTTARGET" | "RECONNECT" => {}
        _ => {}
    }

    out
}

fn chat_message(line: &LineRef<'_>) -> ChatMessage {
    ChatMessage {
        channel: line.channel.map(strip_hash).unwrap_or("").to_string(),
        sender: sender_nick(line.prefix).to_string(),
        text: line.trailing.unwrap_or("").to_string(),
        tags: line
            .tags
            .as_ref()
            .map(|tags| {
                tags.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn strip_hash(channel: &str) -> &str {
    channel.strip_prefix('#').unwrap_or(channel)
}

fn sender_nick(prefix: Option<&str>) -> &str {
    match prefix {
        Some(prefix) => prefix.split('!').next().unwrap_or(prefix),
        None => "",
    }
}
