//! The outbound message pipeline.
//!
//! Producers enqueue formatted wire lines; a single consumer task drains the
//! queue under Twitch's sliding-window rate limits.

mod limits;
mod queue;
mod scheduler;

pub use self::limits::{RateClass, SEND_WINDOW};
pub use self::queue::{OutboundMessage, SendQueue};
pub use self::scheduler::{Scheduler, SchedulerHandle};
