//! The chat service facade.
//!
//! Owns the wiring between the transport, the auth service, the channel
//! registry, the receive pump and the outbound pipeline. One instance
//! corresponds to one logical chat session; the scheduler inside it is
//! recreated on every login and discarded on every disconnect.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::auth::{CredentialsChanged, TokenProvider};
use crate::config::ClientConfig;
use crate::dispatch::ControlAction;
use crate::error::{AuthError, CoreError};
use crate::events::EventBus;
use crate::outbound::{OutboundMessage, Scheduler, SchedulerHandle, SendQueue};
use crate::pump::ReceivePump;
use crate::registry::{ChannelRegistry, ChannelsUpdate};
use crate::transport::{Transport, TransportEvent};
use crate::wire;

/// The Twitch chat runtime.
///
/// Cheap to clone; all clones share the same session.
#[derive(Clone)]
pub struct ChatService {
    inner: Arc<Inner>,
}

struct Inner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    auth: Arc<dyn TokenProvider>,
    registry: Arc<dyn ChannelRegistry>,
    bus: Arc<EventBus>,
    queue: Arc<SendQueue>,
    scheduler: Mutex<Option<SchedulerHandle>>,
    run_task: Mutex<Option<JoinHandle<()>>>,
}

impl ChatService {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        auth: Arc<dyn TokenProvider>,
        registry: Arc<dyn ChannelRegistry>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                transport,
                auth,
                registry,
                bus: Arc::new(EventBus::new()),
                queue: Arc::new(SendQueue::new()),
                scheduler: Mutex::new(None),
                run_task: Mutex::new(None),
            }),
        }
    }

    /// The event registry; subscribe before calling [`start`](Self::start).
    pub fn events(&self) -> Arc<EventBus> {
        Arc::clone(&self.inner.bus)
    }

    /// Validate credentials, subscribe to the transport, the auth service
    /// and the channel registry, and connect.
    ///
    /// An [`AuthError`] aborts the start; no scheduler is launched and the
    /// transport is left untouched.
    pub async fn start(&self) -> Result<(), CoreError> {
        let inner = &self.inner;

        if !inner.auth.has_tokens() {
            return Err(AuthError::MissingTokens.into());
        }
        if !inner.auth.token_is_valid() {
            info!("access token invalid, refreshing");
            inner.auth.refresh_tokens().await?;
        }

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        inner.transport.subscribe(events_tx);
        let (credentials_tx, credentials_rx) = mpsc::unbounded_channel();
        inner.auth.subscribe(credentials_tx);
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        inner.registry.subscribe(updates_tx);

        let run = tokio::spawn(Arc::clone(inner).run(events_rx, credentials_rx, updates_rx));
        if let Some(previous) = inner.run_task.lock().expect("run task lock").replace(run) {
            previous.abort();
        }

        inner.transport.connect(&inner.config.server_url).await?;
        Ok(())
    }

    /// Cancel the scheduler and close the connection.
    pub async fn stop(&self) -> Result<(), CoreError> {
        let inner = &self.inner;
        inner.stop_scheduler();
        if let Some(run) = inner.run_task.lock().expect("run task lock").take() {
            run.abort();
        }
        inner.transport.disconnect("client shutdown").await?;
        Ok(())
    }

    /// Queue a chat message for `channel` (leading `#` optional).
    ///
    /// Returns immediately; the scheduler ships the message when the rate
    /// limits allow. The queue is unbounded.
    pub fn send_message(&self, channel: &str, text: &str) {
        let channel = channel.strip_prefix('#').unwrap_or(channel);
        self.inner.queue.push(OutboundMessage {
            channel: channel.to_string(),
            line: wire::privmsg(channel, text),
        });
    }

    /// Apply a registry change while connected.
    ///
    /// Updates pushed through [`ChannelRegistry::subscribe`] arrive here via
    /// the event loop; this is also callable directly.
    pub fn apply_channels_update(&self, update: &ChannelsUpdate) {
        self.inner.apply_channels_update(update);
    }
}

impl Inner {
    async fn run(
        self: Arc<Self>,
        mut events: mpsc::UnboundedReceiver<TransportEvent>,
        mut credentials: mpsc::UnboundedReceiver<CredentialsChanged>,
        mut updates: mpsc::UnboundedReceiver<ChannelsUpdate>,
    ) {
        let pump = ReceivePump::new(Arc::clone(&self.bus));

        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    match event {
                        TransportEvent::Connected => self.on_connected(),
                        TransportEvent::Frame(frame) => {
                            for action in pump.process_frame(&frame) {
                                self.apply(action);
                            }
                        }
                        TransportEvent::Disconnected => {
                            info!("transport disconnected, discarding scheduler");
                            self.stop_scheduler();
                        }
                    }
                }
                Some(update) = updates.recv() => {
                    self.apply_channels_update(&update);
                }
                Some(CredentialsChanged) = credentials.recv() => {
                    // Nothing to rewire mid-session; the next connect picks
                    // up the refreshed identity.
                    info!("credentials changed");
                }
            }
        }
        debug!("transport event stream ended");
    }

    /// JOIN/PART are control frames: they go straight to the transport and
    /// bypass the rate-limit scheduler.
    fn apply_channels_update(&self, update: &ChannelsUpdate) {
        for channel in &update.enabled {
            self.transport.send(&wire::join(channel));
        }
        for channel in &update.disabled {
            self.transport.send(&wire::part(channel));
        }
    }

    fn on_connected(&self) {
        let Some(token) = self.auth.access_token() else {
            warn!("connected without an access token, skipping handshake");
            return;
        };
        let login = self.auth.logged_in_user();
        let nick = login.as_deref().unwrap_or(&self.config.nick_fallback);

        self.transport.send(wire::CAP_REQ);
        self.transport.send(&wire::pass(&token));
        self.transport.send(&wire::nick(Some(nick)));
    }

    fn apply(&self, action: ControlAction) {
        match action {
            ControlAction::Pong(payload) => {
                self.transport.send(&wire::pong(&payload));
            }
            ControlAction::LoginComplete => self.on_login_complete(),
        }
    }

    fn on_login_complete(&self) {
        let channels = self.registry.active_login_names();
        info!(channels = channels.len(), "login complete, joining channels");
        for channel in &channels {
            self.transport.send(&wire::join(channel));
        }

        let handle = Scheduler::spawn(
            Arc::clone(&self.queue),
            Arc::clone(&self.transport),
            Arc::clone(&self.registry),
        );
        if let Some(previous) = self
            .scheduler
            .lock()
            .expect("scheduler lock")
            .replace(handle)
        {
            previous.cancel();
        }
    }

    fn stop_scheduler(&self) {
        if let Some(handle) = self.scheduler.lock().expect("scheduler lock").take() {
            handle.cancel();
        }
    }
}
