//! Telemetry decode-and-dispatch core for Parrot Bebop-class quadcopters.
//!
//! The crate sits between a UDP/ARNet transport and telemetry subscribers:
//! the transport hands in reassembled application-layer frames, the core
//! interprets them against the three-level Project → Class → Command
//! taxonomy, decodes the little-endian payloads into semantic records, and
//! emits typed [`TelemetryPacket`]s over a bounded in-process channel.
//!
//! # Design
//!
//! - **Never block the transport**: decoding runs on a short-lived worker
//!   task per frame; delivery is non-blocking with drop-on-full (capacity
//!   10) rather than backpressure.
//! - **Never lose the shape of a frame**: taxonomy misses become
//!   `bebop:unknown` / `bebop:unknownProject` packets carrying the raw
//!   frame, and decoder faults become `bebop:error` packets, so the channel
//!   is a complete log of everything the core could not interpret.
//! - **Stable vocabulary**: every packet title comes from the closed
//!   `bebop:`-prefixed set in [`events`], decoupling subscribers from the
//!   raw byte codes.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use bebop_telemetry::{Bebop, NetworkFrame};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut core = Bebop::new();
//!     let mut telemetry = core.telemetry();
//!
//!     // The transport layer calls this for every reassembled frame.
//!     core.handle_incoming_data_frame(NetworkFrame::new(vec![0, 5, 1, 0, 85]));
//!
//!     while let Some(packet) = telemetry.recv().await {
//!         println!("{}: {}", packet.title, String::from_utf8_lossy(&packet.payload));
//!     }
//! }
//! ```

pub mod commands;
pub mod decode;
pub mod dispatch;
pub mod emitter;
mod error;
pub mod events;
mod stream;
pub mod types;

mod driver;

pub use driver::Bebop;
pub use emitter::{Emitter, TELEMETRY_CHANNEL_CAPACITY};
pub use error::{Result, TelemetryError};
pub use stream::PacketStream;
pub use types::{CommandHeader, NetworkFrame, TelemetryPacket};
