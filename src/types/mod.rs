//! Core types for frames and telemetry packets.
//!
//! [`NetworkFrame`] is the input side (transport hands frames in),
//! [`TelemetryPacket`] is the output side (subscribers read packets out).
//! Frame data is shared via `Arc<[u8]>` so workers and forensic payloads
//! never copy the buffer.

mod frame;
mod packet;

pub use frame::{CommandHeader, NetworkFrame, COMMAND_HEADER_LEN};
pub use packet::TelemetryPacket;
