//! Channel delivery layer.
//!
//! A bounded output channel with drop-on-full semantics and a one-shot
//! shutdown latch. The transport must never stall behind a slow subscriber,
//! so delivery has exactly three outcomes: delivered, silently discarded
//! (shutting down), or dropped with [`TelemetryError::ChannelFull`] reported
//! to the caller. No retries, no queue growth.

use serde::Serialize;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::{Result, TelemetryError};
use crate::types::{NetworkFrame, TelemetryPacket};

/// Capacity of the telemetry output channel. Subscribers that fall more
/// than this many packets behind start losing events.
pub const TELEMETRY_CHANNEL_CAPACITY: usize = 10;

/// Sending half of the telemetry channel, shared by the dispatcher and the
/// per-frame worker tasks.
#[derive(Debug, Clone)]
pub struct Emitter {
    tx: mpsc::Sender<TelemetryPacket>,
    shutdown: CancellationToken,
}

impl Emitter {
    /// Build an emitter over an existing channel and latch.
    ///
    /// [`Bebop::new`](crate::Bebop::new) wires this up for normal use; a
    /// standalone emitter is handy for exercising decoders directly.
    pub fn new(tx: mpsc::Sender<TelemetryPacket>, shutdown: CancellationToken) -> Self {
        Self { tx, shutdown }
    }

    /// Attempt to deliver one packet.
    ///
    /// - Shutdown latch closed: the packet is discarded and the call
    ///   succeeds; subscribers stopped caring.
    /// - Channel has space: the packet is enqueued.
    /// - Channel full: the packet is dropped and the caller gets
    ///   [`TelemetryError::ChannelFull`].
    ///
    /// A dropped receiver counts as shutdown.
    pub fn dispatch(&self, packet: TelemetryPacket) -> Result<()> {
        if self.shutdown.is_cancelled() {
            return Ok(());
        }
        match self.tx.try_send(packet) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(TelemetryError::ChannelFull),
            Err(TrySendError::Closed(_)) => {
                debug!("telemetry receiver dropped, discarding packet");
                Ok(())
            }
        }
    }

    /// Send a semantic event with a pre-encoded payload.
    pub fn send_telemetry(&self, title: &'static str, payload: Vec<u8>) -> Result<()> {
        self.dispatch(TelemetryPacket::semantic(title, payload))
    }

    /// Send a state-change event with a zero-length payload.
    pub fn send_empty_telemetry(&self, title: &'static str) -> Result<()> {
        self.dispatch(TelemetryPacket::empty(title))
    }

    /// Send a `bebop:unknown` event carrying the unplaceable frame bytes.
    pub fn send_unknown_telemetry(&self, comment: impl Into<String>, data: &[u8]) -> Result<()> {
        self.dispatch(TelemetryPacket::unknown(comment, data.to_vec()))
    }

    /// JSON-encode `record` and send it under `title`.
    ///
    /// An encode failure is itself surfaced as a `bebop:error` event (with
    /// the source frame attached) and returned to the caller.
    pub fn send_json_telemetry<T: Serialize>(
        &self,
        frame: &NetworkFrame,
        title: &'static str,
        record: &T,
    ) -> Result<()> {
        match serde_json::to_vec(record) {
            Ok(payload) => self.send_telemetry(title, payload),
            Err(err) => {
                // Encoding is deterministic, so a second attempt reproduces
                // the fault for the error event while the first is returned.
                if let Err(again) = serde_json::to_vec(record) {
                    self.send_runtime_error(
                        format!("Error encoding payload for '{}'", title),
                        again.into(),
                        &frame.data,
                    );
                }
                Err(err.into())
            }
        }
    }

    /// Send a `bebop:error` event.
    ///
    /// Last resort in the fault chain: if this delivery fails too, the
    /// failure only surfaces as a log line; anything else would recurse.
    pub fn send_runtime_error(
        &self,
        comment: impl Into<String>,
        error: TelemetryError,
        data: &[u8],
    ) {
        let packet = TelemetryPacket::runtime_error(comment, error, data.to_vec());
        if let Err(err) = self.dispatch(packet) {
            warn!(%err, "dropping runtime error event");
        }
    }
}
