use tracing::debug;

use crate::api::{Event, RawFrame};

/// Literal prefix marking a protocol frame.
///
/// Matches Server-Sent-Events data framing; no other SSE field (`event:`,
/// `id:`, `retry:`) is recognized.
pub const FRAME_PREFIX: &str = "data: ";

/// Decode one assembled line into a typed event.
///
/// Non-frame lines, blank payloads, and payloads that fail to parse all
/// yield `None`. Decode faults are logged and contained; they never abort
/// the stream.
pub fn decode_line(line: &str) -> Option<Event> {
    let payload = line.strip_prefix(FRAME_PREFIX)?.trim();
    if payload.is_empty() {
        return None;
    }

    let frame: RawFrame = match serde_json::from_str(payload) {
        Ok(frame) => frame,
        Err(e) => {
            debug!(error = %e, line = %line, "Discarding undecodable frame");
            return None;
        }
    };

    match Event::from_frame(frame) {
        Ok(event) => Some(event),
        Err(e) => {
            debug!(error = %e, line = %line, "Discarding frame with mismatched content shape");
            None
        }
    }
}
