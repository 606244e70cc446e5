//! The auth seam.
//!
//! Token acquisition, storage and refresh live in an external service; the
//! runtime only asks for the pieces it needs to build the IRC handshake.

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::error::AuthError;

/// Notification that the stored credentials changed out-of-band, e.g. a
/// background refresh or a new login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialsChanged;

/// Access to the logged-in user's OAuth credentials.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Whether any tokens are stored at all.
    fn has_tokens(&self) -> bool;

    /// Whether the stored access token is currently usable.
    fn token_is_valid(&self) -> bool;

    /// The access token, without the `oauth:` prefix.
    fn access_token(&self) -> Option<String>;

    /// Login name of the authenticated user, if known.
    fn logged_in_user(&self) -> Option<String>;

    /// Refresh the stored tokens.
    async fn refresh_tokens(&self) -> Result<(), AuthError>;

    /// Register the sink that is notified when credentials change.
    fn subscribe(&self, events: UnboundedSender<CredentialsChanged>);
}
