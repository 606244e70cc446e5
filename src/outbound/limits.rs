//! Twitch send-rate classes and window constants.

use std::time::Duration;

use crate::registry::ChannelRegistry;

/// The sliding window the send count is bounded over.
///
/// Twitch's nominal window is 30 s; the extra 2 s absorbs clock and network
/// skew. Undercutting it risks a 30-minute global send ban.
pub const SEND_WINDOW: Duration = Duration::from_secs(32);

/// Twitch's two send-rate classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateClass {
    /// Plain user in the channel: 20 sends per window, 1250 ms spacing.
    Normal,
    /// Channel owner or moderator: 100 sends per window, 50 ms spacing.
    Relaxed,
}

impl RateClass {
    /// The class for a message targeting `channel`, per the registry's
    /// moderator introspection.
    pub fn for_channel(registry: &dyn ChannelRegistry, channel: &str) -> Self {
        if registry.is_elevated(channel) {
            Self::Relaxed
        } else {
            Self::Normal
        }
    }

    /// Maximum sends per [`SEND_WINDOW`].
    pub fn bound(self) -> usize {
        match self {
            Self::Normal => 20,
            Self::Relaxed => 100,
        }
    }

    /// Minimum spacing between two sends to the same channel.
    pub fn min_gap(self) -> Duration {
        match self {
            Self::Normal => Duration::from_millis(1250),
            Self::Relaxed => Duration::from_millis(50),
        }
    }
}
