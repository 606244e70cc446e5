//! Minimal chat bot wired against an in-memory transport.
//!
//! This example demonstrates the full runtime loop without a network: the
//! loopback transport plays a scripted Twitch session (connect, end of
//! MOTD, one incoming chat line), the service joins its channels and
//! answers a message through the rate-limited pipeline.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use twirc_core::auth::CredentialsChanged;
use twirc_core::error::{AuthError, TransportError};
use twirc_core::registry::{ChannelRegistry, ChannelsUpdate};
use twirc_core::transport::{Transport, TransportEvent};
use twirc_core::{ChatService, ClientConfig, TokenProvider};

/// A transport that echoes a canned server session back at the client.
#[derive(Default)]
struct LoopbackTransport {
    events: Mutex<Option<UnboundedSender<TransportEvent>>>,
}

impl LoopbackTransport {
    fn push(&self, event: TransportEvent) {
        if let Some(events) = self.events.lock().unwrap().as_ref() {
            let _ = events.send(event);
        }
    }
}

#[async_trait]
impl Transport for LoopbackTransport {
    async fn connect(&self, url: &str) -> Result<(), TransportError> {
        println!("connecting to {}", url);
        self.push(TransportEvent::Connected);
        Ok(())
    }

    async fn disconnect(&self, reason: &str) -> Result<(), TransportError> {
        println!("disconnecting: {}", reason);
        self.push(TransportEvent::Disconnected);
        Ok(())
    }

    fn send(&self, line: &str) {
        println!("→ {}", line);
        // Play the server's side of the handshake.
        if line.starts_with("NICK ") {
            self.push(TransportEvent::Frame(
                ":tmi.twitch.tv 376 example_bot :>\r\n".to_string(),
            ));
        }
        if line.starts_with("JOIN ") {
            self.push(TransportEvent::Frame(
                "@badges=broadcaster/1 :viewer!viewer@viewer.tmi.twitch.tv PRIVMSG #example :hello bot\r\n"
                    .to_string(),
            ));
        }
    }

    async fn send_instant(&self, line: &str) -> Result<(), TransportError> {
        println!("→ {}", line);
        Ok(())
    }

    fn subscribe(&self, events: UnboundedSender<TransportEvent>) {
        *self.events.lock().unwrap() = Some(events);
    }
}

struct StaticAuth;

#[async_trait]
impl TokenProvider for StaticAuth {
    fn has_tokens(&self) -> bool {
        true
    }

    fn token_is_valid(&self) -> bool {
        true
    }

    fn access_token(&self) -> Option<String> {
        Some("exampletoken".to_string())
    }

    fn logged_in_user(&self) -> Option<String> {
        Some("example_bot".to_string())
    }

    async fn refresh_tokens(&self) -> Result<(), AuthError> {
        Ok(())
    }

    fn subscribe(&self, _events: UnboundedSender<CredentialsChanged>) {}
}

struct StaticRegistry;

impl ChannelRegistry for StaticRegistry {
    fn active_login_names(&self) -> Vec<String> {
        vec!["example".to_string()]
    }

    fn is_elevated(&self, _channel: &str) -> bool {
        false
    }

    fn subscribe(&self, _updates: UnboundedSender<ChannelsUpdate>) {}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let service = ChatService::new(
        ClientConfig::default(),
        Arc::new(LoopbackTransport::default()),
        Arc::new(StaticAuth),
        Arc::new(StaticRegistry),
    );

    let responder = service.clone();
    service.events().on_message_received(move |chat| {
        println!("← #{} <{}> {}", chat.channel, chat.sender, chat.text);
        if chat.text.contains("hello") {
            responder.send_message(&chat.channel, "Heya!");
        }
    });
    service.events().on_login(|| println!("logged in"));

    service.start().await?;

    // Give the scripted session a moment to play out.
    tokio::time::sleep(Duration::from_millis(500)).await;

    service.stop().await?;
    Ok(())
}
