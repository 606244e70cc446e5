//! Outbound wire-format builders.
//!
//! Every line the runtime writes to the transport is produced here, so the
//! handshake and chat formats live in one place.
//!
//! # Example
//!
//! ```
//! use twirc_core::wire;
//!
//! assert_eq!(wire::join("realeris"), "JOIN #realeris");
//! assert_eq!(wire::pong("tmi.twitch.tv"), "PONG :tmi.twitch.tv");
//! ```

use uuid::Uuid;

/// The capability request sent right after connecting.
pub const CAP_REQ: &str = "CAP REQ :twitch.tv/tags twitch.tv/commands twitch.tv/membership";

/// `PASS oauth:<token>`.
pub fn pass(access_token: &str) -> String {
    format!("PASS oauth:{}", access_token)
}

/// `NICK <login>`, falling back to `.` when no login identity is known.
pub fn nick(login: Option<&str>) -> String {
    format!("NICK {}", login.unwrap_or("."))
}

/// `JOIN #<channel>`.
pub fn join(channel: &str) -> String {
    format!("JOIN #{}", channel)
}

/// `PART #<channel>`.
pub fn part(channel: &str) -> String {
    format!("PART #{}", channel)
}

/// `PONG :<payload>`, echoing a PING's trailing payload.
pub fn pong(payload: &str) -> String {
    format!("PONG :{}", payload)
}

/// `@id=<uuid> PRIVMSG #<channel> :<text>`.
///
/// The id tag lets the sender correlate its own message when it is echoed
/// back with a USERNOTICE or moderation action.
pub fn privmsg(channel: &str, text: &str) -> String {
    format!("@id={} PRIVMSG #{} :{}", Uuid::new_v4(), channel, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::LineRef;

    #[test]
    fn test_handshake_lines() {
        assert_eq!(
            CAP_REQ,
            "CAP REQ :twitch.tv/tags twitch.tv/commands twitch.tv/membership"
        );
        assert_eq!(pass("abc123"), "PASS oauth:abc123");
        assert_eq!(nick(Some("realeris")), "NICK realeris");
        assert_eq!(nick(None), "NICK .");
    }

    #[test]
    fn test_control_lines() {
        assert_eq!(join("somechannel"), "JOIN #somechannel");
        assert_eq!(part("somechannel"), "PART #somechannel");
        assert_eq!(pong("tmi.twitch.tv"), "PONG :tmi.twitch.tv");
    }

    #[test]
    fn test_privmsg_reparses() {
        let line = privmsg("r", "Heya there");
        let parsed = LineRef::parse(&line).unwrap();
        assert_eq!(parsed.command, "PRIVMSG");
        assert_eq!(parsed.channel, Some("#r"));
        assert_eq!(parsed.trailing, Some("Heya there"));

        let tags = parsed.tags.unwrap();
        let id = tags["id"];
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[test]
    fn test_privmsg_ids_are_unique() {
        let a = privmsg("r", "x");
        let b = privmsg("r", "x");
        assert_ne!(a, b);
    }
}
