//! The channel registry seam.
//!
//! The registry knows which channels the user has enabled and whether the
//! logged-in user is elevated (owner or moderator) in a channel, which
//! selects the relaxed rate class.

use tokio::sync::mpsc::UnboundedSender;

/// A batch of registry changes, delivered while the service is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelsUpdate {
    /// Channels to join, login names without `#`.
    pub enabled: Vec<String>,
    /// Channels to part, login names without `#`.
    pub disabled: Vec<String>,
}

/// Enabled-channel lookup and moderator introspection.
pub trait ChannelRegistry: Send + Sync {
    /// Login names of all currently enabled channels, without `#`.
    fn active_login_names(&self) -> Vec<String>;

    /// Whether the logged-in user owns or moderates the channel.
    fn is_elevated(&self, channel: &str) -> bool;

    /// Register the sink that receives enable/disable changes.
    fn subscribe(&self, updates: UnboundedSender<ChannelsUpdate>);
}
