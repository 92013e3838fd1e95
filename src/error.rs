//! Error types for telemetry decoding and delivery.
//!
//! Every fault the core can produce is a [`TelemetryError`]. Decode faults
//! never escape as panics past the dispatcher; they are folded into
//! `bebop:error` packets on the telemetry channel, so the error type itself
//! travels inside [`TelemetryPacket`](crate::TelemetryPacket).
//!
//! ## Error Categories
//!
//! - **Decode faults**: malformed payload bytes (`EnumBadSize`,
//!   `EnumOutOfRange`, `NotTerminated`, `ShortRead`)
//! - **Delivery faults**: bounded-channel overflow (`ChannelFull`)
//! - **Encoding faults**: JSON serialization failures (`Encode`)
//! - **Firmware gaps**: commands the device firmware reserves but does not
//!   implement (`NotImplementedInFirmware`)

use thiserror::Error;

/// Result type alias for telemetry operations.
pub type Result<T, E = TelemetryError> = std::result::Result<T, E>;

/// Main error type for the decode-and-dispatch core.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TelemetryError {
    #[error("enum field expects exactly 4 bytes, got {len}")]
    EnumBadSize { len: usize },

    #[error("enum value {value} outside table of {table_len} entries")]
    EnumOutOfRange { value: u32, table_len: usize },

    #[error("no NUL terminator in string field")]
    NotTerminated,

    #[error(
        "payload too short: needed {needed} more bytes at offset {offset}, {available} available"
    )]
    ShortRead { offset: usize, needed: usize, available: usize },

    #[error("telemetry channel full, packet dropped")]
    ChannelFull,

    #[error("failed to encode telemetry payload")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("not implemented in firmware yet, presumed impossible")]
    NotImplementedInFirmware,
}

impl TelemetryError {
    /// Returns whether this error came from interpreting payload bytes
    /// (as opposed to delivering or encoding a packet).
    pub fn is_decode_fault(&self) -> bool {
        matches!(
            self,
            TelemetryError::EnumBadSize { .. }
                | TelemetryError::EnumOutOfRange { .. }
                | TelemetryError::NotTerminated
                | TelemetryError::ShortRead { .. }
        )
    }

    /// Helper constructor for short-read faults.
    pub fn short_read(offset: usize, needed: usize, available: usize) -> Self {
        TelemetryError::ShortRead { offset, needed, available }
    }
}

impl From<serde_json::Error> for TelemetryError {
    fn from(err: serde_json::Error) -> Self {
        TelemetryError::Encode { source: err }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(test)]
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decode_fault_classification_is_stable(
                len in 0usize..64,
                value in any::<u32>(),
                table_len in 1usize..32,
                offset in 0usize..1024,
                needed in 1usize..64,
            ) {
                let faults = [
                    TelemetryError::EnumBadSize { len },
                    TelemetryError::EnumOutOfRange { value, table_len },
                    TelemetryError::NotTerminated,
                    TelemetryError::short_read(offset, needed, 0),
                ];
                for fault in faults {
                    prop_assert!(fault.is_decode_fault());
                    prop_assert!(!fault.to_string().is_empty());
                }

                prop_assert!(!TelemetryError::ChannelFull.is_decode_fault());
                prop_assert!(!TelemetryError::NotImplementedInFirmware.is_decode_fault());
            }

            #[test]
            fn error_messages_carry_their_context(
                value in any::<u32>(),
                table_len in 1usize..32,
                offset in 0usize..1024,
                needed in 1usize..64,
                available in 0usize..64,
            ) {
                let range = TelemetryError::EnumOutOfRange { value, table_len };
                let msg = range.to_string();
                prop_assert!(msg.contains(&value.to_string()));
                prop_assert!(msg.contains(&table_len.to_string()));

                let short = TelemetryError::short_read(offset, needed, available);
                let msg = short.to_string();
                prop_assert!(msg.contains(&offset.to_string()));
                prop_assert!(msg.contains(&needed.to_string()));
            }
        }
    }

    #[test]
    fn error_traits_validation() {
        // Compile-time check: TelemetryError must be Send + Sync + 'static
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<TelemetryError>();

        let error = TelemetryError::NotTerminated;
        let _: &dyn std::error::Error = &error;
    }

    #[test]
    fn encode_conversion_preserves_source() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: TelemetryError = json_err.into();
        assert!(matches!(err, TelemetryError::Encode { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
