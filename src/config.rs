//! Runtime configuration.

use serde::Deserialize;

fn default_server_url() -> String {
    "wss://irc-ws.chat.twitch.tv:443".to_string()
}

fn default_nick_fallback() -> String {
    ".".to_string()
}

/// Configuration for the chat service.
///
/// Everything is defaulted; a plain `ClientConfig::default()` talks to
/// production Twitch chat. Rate-limit bounds are not configurable: they are
/// protocol constants (see [`crate::outbound::SEND_WINDOW`]).
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// WebSocket URL handed to the transport's connect.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// NICK used when the auth service has no login identity yet.
    #[serde(default = "default_nick_fallback")]
    pub nick_fallback: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            nick_fallback: default_nick_fallback(),
        }
    }
}
