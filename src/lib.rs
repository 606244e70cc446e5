//! # twirc-core
//!
//! A Twitch-flavoured IRC client runtime: IRCv3 line parsing, event
//! dispatch, and a rate-limited outbound message pipeline.
//!
//! ## Features
//!
//! - Single-pass, allocation-free parsing of `[@tags] [:prefix] command
//!   [params…] [:trailing]` into borrowed slices
//! - Synchronous event dispatch for login, joins, parts, room state, and
//!   chat messages
//! - An outbound scheduler enforcing Twitch's sliding-window send limits
//!   with per-channel minimum spacing
//! - Trait seams for the transport, auth service, and channel registry;
//!   bring your own WebSocket
//!
//! ## Quick Start
//!
//! ### Parsing lines
//!
//! ```rust
//! use twirc_core::message::LineRef;
//!
//! let line = LineRef::parse("@mod=0;badges=broadcaster/1 :r!r@r.tmi.twitch.tv PRIVMSG #r :Heya")
//!     .expect("valid line");
//!
//! assert_eq!(line.command, "PRIVMSG");
//! assert_eq!(line.channel, Some("#r"));
//! assert_eq!(line.trailing, Some("Heya"));
//! assert_eq!(line.tags.unwrap()["badges"], "broadcaster/1");
//! ```
//!
//! ### Running the service
//!
//! ```rust,ignore
//! use twirc_core::{ChatService, ClientConfig};
//!
//! let service = ChatService::new(ClientConfig::default(), transport, auth, registry);
//! service.events().on_message_received(|chat| {
//!     println!("#{} <{}> {}", chat.channel, chat.sender, chat.text);
//! });
//! service.start().await?;
//! service.send_message("somechannel", "Heya");
//! ```

#![deny(clippy::all)]

pub mod auth;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod events;
pub mod message;
pub mod outbound;
pub mod pump;
pub mod registry;
pub mod service;
pub mod transport;
pub mod wire;

pub use self::auth::{CredentialsChanged, TokenProvider};
pub use self::config::ClientConfig;
pub use self::dispatch::{dispatch, ControlAction, Dispatch};
pub use self::error::{AuthError, CoreError, LineParseError, Result, TransportError};
pub use self::events::{ChatMessage, CoreEvent, EventBus};
pub use self::message::LineRef;
pub use self::outbound::{OutboundMessage, RateClass, Scheduler, SchedulerHandle, SendQueue, SEND_WINDOW};
pub use self::pump::ReceivePump;
pub use self::registry::{ChannelRegistry, ChannelsUpdate};
pub use self::service::ChatService;
pub use self::transport::{Transport, TransportEvent};
