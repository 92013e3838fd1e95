//! Outgoing telemetry packet type.

use crate::error::TelemetryError;
use crate::events;

/// A record emitted on the telemetry channel.
///
/// Semantic events carry a UTF-8 JSON payload; unknown events carry the
/// original frame bytes verbatim for forensics; empty events carry
/// zero-length bytes. `error` is populated exactly when the title is
/// [`events::ERROR`]; the constructors below are the only way packets are
/// built, which keeps that invariant.
#[derive(Debug)]
pub struct TelemetryPacket {
    /// Stable event identifier from the closed `bebop:` vocabulary.
    pub title: &'static str,
    /// Human-readable context, mostly on unknown/error packets.
    pub comment: Option<String>,
    /// The underlying fault, for error packets only.
    pub error: Option<TelemetryError>,
    /// Opaque payload bytes; see the type docs for per-kind meaning.
    pub payload: Vec<u8>,
}

impl TelemetryPacket {
    /// A semantic event with a JSON payload.
    pub fn semantic(title: &'static str, payload: Vec<u8>) -> Self {
        Self { title, comment: None, error: None, payload }
    }

    /// A state-change event that carries no parameters.
    pub fn empty(title: &'static str) -> Self {
        Self { title, comment: None, error: None, payload: Vec::new() }
    }

    /// A frame whose class or command id the dispatch table cannot place.
    /// The raw frame rides along so operators can reverse-engineer new
    /// firmware.
    pub fn unknown(comment: impl Into<String>, frame_bytes: Vec<u8>) -> Self {
        Self {
            title: events::UNKNOWN,
            comment: Some(comment.into()),
            error: None,
            payload: frame_bytes,
        }
    }

    /// A frame whose project byte the dispatch table cannot place.
    pub fn unknown_project(comment: impl Into<String>, frame_bytes: Vec<u8>) -> Self {
        Self {
            title: events::UNKNOWN_PROJECT,
            comment: Some(comment.into()),
            error: None,
            payload: frame_bytes,
        }
    }

    /// A decoder or delivery fault, with the offending frame attached.
    pub fn runtime_error(
        comment: impl Into<String>,
        error: TelemetryError,
        frame_bytes: Vec<u8>,
    ) -> Self {
        Self {
            title: events::ERROR,
            comment: Some(comment.into()),
            error: Some(error),
            payload: frame_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_present_only_on_error_packets() {
        let semantic = TelemetryPacket::semantic(events::BATTERY, b"{\"battery\":55}".to_vec());
        assert!(semantic.error.is_none());

        let empty = TelemetryPacket::empty(events::FLATTRIM);
        assert!(empty.error.is_none());
        assert!(empty.payload.is_empty());

        let unknown = TelemetryPacket::unknown("no handler", vec![1, 2, 3]);
        assert_eq!(unknown.title, events::UNKNOWN);
        assert!(unknown.error.is_none());
        assert_eq!(unknown.payload, vec![1, 2, 3]);

        let error = TelemetryPacket::runtime_error(
            "decode failed",
            TelemetryError::NotTerminated,
            vec![9],
        );
        assert_eq!(error.title, events::ERROR);
        assert!(error.error.is_some());
    }

    #[test]
    fn empty_payload_is_zero_length_not_braces() {
        let packet = TelemetryPacket::empty(events::LANDED);
        assert_eq!(packet.payload.len(), 0);
    }
}
