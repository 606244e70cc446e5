//! The rate-limited send worker.
//!
//! A single consumer task alternates between draining the queue and
//! hibernating. Draining stops when the sliding-window bound is reached;
//! hibernating waits for the window to free a slot, for a producer wake, or
//! for shutdown. The per-channel spacing delay is interruptible only by
//! shutdown, so a burst to one channel head-of-line-blocks the queue (FIFO
//! across channels is preserved).

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::limits::{RateClass, SEND_WINDOW};
use super::queue::SendQueue;
use crate::error::CoreError;
use crate::registry::ChannelRegistry;
use crate::transport::Transport;

/// Controls a spawned scheduler task.
///
/// Dropping the handle also cancels the worker: the shutdown sender goes
/// away and every wait in the loop resolves.
pub struct SchedulerHandle {
    shutdown: broadcast::Sender<()>,
    task: JoinHandle<()>,
}

impl SchedulerHandle {
    /// Signal the worker to exit at its next wait point.
    pub fn cancel(&self) {
        let _ = self.shutdown.send(());
    }

    /// Cancel and wait for the worker to finish.
    pub async fn shutdown(self) {
        self.cancel();
        let _ = self.task.await;
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// The consumer side of the outbound pipeline.
pub struct Scheduler {
    queue: Arc<SendQueue>,
    transport: Arc<dyn Transport>,
    registry: Arc<dyn ChannelRegistry>,
    shutdown: broadcast::Receiver<()>,
    sent_at: VecDeque<Instant>,
    last_send: HashMap<String, Instant>,
}

impl Scheduler {
    /// Spawn a fresh worker over `queue`.
    ///
    /// One scheduler exists per connection; on disconnect it is cancelled
    /// and its window state is discarded with it.
    pub fn spawn(
        queue: Arc<SendQueue>,
        transport: Arc<dyn Transport>,
        registry: Arc<dyn ChannelRegistry>,
    ) -> SchedulerHandle {
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let scheduler = Scheduler {
            queue,
            transport,
            registry,
            shutdown: shutdown_rx,
            sent_at: VecDeque::new(),
            last_send: HashMap::new(),
        };
        let task = tokio::spawn(scheduler.run());
        SchedulerHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(mut self) {
        debug!("send scheduler started");
        if let Err(CoreError::Cancelled) = self.work().await {
            debug!("send scheduler cancelled");
        }
        debug!("send scheduler stopped");
    }

    /// Alternate between draining and hibernating until shutdown, which
    /// surfaces as [`CoreError::Cancelled`].
    async fn work(&mut self) -> Result<(), CoreError> {
        loop {
            self.drain().await?;
            self.hibernate().await?;
        }
    }

    /// Ship queued messages until the queue empties or the window fills.
    async fn drain(&mut self) -> Result<(), CoreError> {
        while let Some(channel) = self.queue.peek_channel() {
            let class = RateClass::for_channel(&*self.registry, &channel);
            let now = Instant::now();
            self.trim_window(now);
            if self.sent_at.len() >= class.bound() {
                return Ok(());
            }

            if let Some(&last) = self.last_send.get(&channel) {
                let ready = last + class.min_gap();
                if ready > now {
                    // Producer wakes do not interrupt the spacing delay.
                    tokio::select! {
                        _ = sleep_until(ready) => {}
                        _ = self.shutdown.recv() => return Err(CoreError::Cancelled),
                    }
                }
            }

            let Some(message) = self.queue.pop() else {
                return Ok(());
            };
            // The send itself is never aborted; a failed message is dropped,
            // not requeued.
            if let Err(error) = self.transport.send_instant(&message.line).await {
                warn!(channel = %message.channel, %error, "outbound send failed, message dropped");
            }

            let now = Instant::now();
            self.sent_at.push_back(now);
            self.last_send.insert(message.channel, now);
        }
        Ok(())
    }

    /// Sleep until there is something to do.
    async fn hibernate(&mut self) -> Result<(), CoreError> {
        let Some(channel) = self.queue.peek_channel() else {
            tokio::select! {
                _ = self.queue.wakeful() => return Ok(()),
                _ = self.shutdown.recv() => return Err(CoreError::Cancelled),
            }
        };

        // Queue is non-empty, so draining stopped at the head's bound.
        // Wake when the window slides past the stamp that blocks it.
        let bound = RateClass::for_channel(&*self.registry, &channel).bound();
        let now = Instant::now();
        self.trim_window(now);
        let reset_at = if self.sent_at.len() >= bound {
            self.sent_at[self.sent_at.len() - bound] + SEND_WINDOW
        } else {
            now
        };

        tokio::select! {
            _ = sleep_until(reset_at) => Ok(()),
            _ = self.queue.wakeful() => Ok(()),
            _ = self.shutdown.recv() => Err(CoreError::Cancelled),
        }
    }

    fn trim_window(&mut self, now: Instant) {
        while let Some(&oldest) = self.sent_at.front() {
            if now.duration_since(oldest) >= SEND_WINDOW {
                self.sent_at.pop_front();
            } else {
                break;
            }
        }
    }
}
