//! The receive pump: transport frames in, events out.

use std::sync::Arc;

use tracing::warn;

use crate::dispatch::{dispatch, ControlAction};
use crate::events::EventBus;
use crate::message::LineRef;

/// Splits frames into lines, parses and dispatches them.
///
/// Invalid lines are logged and skipped; they are never fatal. Nothing
/// borrowed from the frame survives a call.
pub struct ReceivePump {
    bus: Arc<EventBus>,
}

impl ReceivePump {
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self { bus }
    }

    /// Process one transport frame, emitting events as lines dispatch.
    ///
    /// Returns the control actions the facade must carry out, in line order.
    pub fn process_frame(&self, frame: &str) -> Vec<ControlAction> {
        let mut actions = Vec::new();

        for raw in frame.split(['\r', '\n']).filter(|segment| !segment.is_empty()) {
            let line = match LineRef::parse(raw) {
                Ok(line) => line,
                Err(error) => {
                    warn!(line = raw, %error, "skipping unparseable line");
                    continue;
                }
            };

            let outcome = dispatch(&line);
            for event in &outcome.events {
                self.bus.emit(event);
            }
            actions.extend(outcome.actions);
        }

        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::CoreEvent;
    use std::sync::Mutex;

    fn pump_with_sink() -> (ReceivePump, Arc<Mutex<Vec<CoreEvent>>>) {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (ReceivePump::new(bus), seen)
    }

    #[test]
    fn test_frame_splits_on_crlf() {
        let (pump, seen) = pump_with_sink();
        let actions = pump.process_frame(
            ":a!a@a.tmi.twitch.tv JOIN #one\r\n:b!b@b.tmi.twitch.tv JOIN #two\r\n",
        );

        assert!(actions.is_empty());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CoreEvent::JoinedChannel("one".to_string()),
                CoreEvent::JoinedChannel("two".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_segments_are_discarded() {
        let (pump, seen) = pump_with_sink();
        pump.process_frame("\r\n\r\nPING :tmi.twitch.tv\n\n");
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_ping_yields_pong_action() {
        let (pump, _) = pump_with_sink();
        let actions = pump.process_frame("PING :tmi.twitch.tv\r\n");
        assert_eq!(actions, vec![ControlAction::Pong("tmi.twitch.tv".to_string())]);
    }

    #[test]
    fn test_invalid_line_is_skipped_not_fatal() {
        let (pump, seen) = pump_with_sink();
        let actions = pump.process_frame(
            "@unterminated-tags\r\n:a!a@a.tmi.twitch.tv JOIN #ok\r\n",
        );
        assert!(actions.is_empty());
        assert_eq!(
            *seen.lock().unwrap(),
            vec![CoreEvent::JoinedChannel("ok".to_string())]
        );
    }

    #[test]
    fn test_lines_dispatch_in_arrival_order() {
        let (pump, seen) = pump_with_sink();
        pump.process_frame(
            ":a!a@a.tmi.twitch.tv JOIN #one\r\n:a!a@a.tmi.twitch.tv PART #one\r\n",
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                CoreEvent::JoinedChannel("one".to_string()),
                CoreEvent::LeftChannel("one".to_string()),
            ]
        );
    }
}
