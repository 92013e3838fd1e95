//! The core context: owns the telemetry channel, the dispatch table, and
//! the shutdown latch, and routes incoming frames to decoder workers.
//!
//! [`Bebop::handle_incoming_data_frame`] is the entry point the transport
//! calls after reassembly and ACKing. It is total: every frame produces at
//! most one outcome event and the call never blocks on subscribers, because
//! decoding happens on a short-lived spawned task per frame.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::dispatch::{Decoded, DispatchTable};
use crate::emitter::{Emitter, TELEMETRY_CHANNEL_CAPACITY};
use crate::error::TelemetryError;
use crate::stream::PacketStream;
use crate::types::{NetworkFrame, TelemetryPacket, COMMAND_HEADER_LEN};

/// Telemetry decode-and-dispatch core for one drone connection.
///
/// Create one per connection; feed it frames from the transport task and
/// read typed packets from the receiver handle. The context is not meant to
/// move between tasks after construction; clone the pieces it hands out
/// instead.
pub struct Bebop {
    emitter: Emitter,
    table: Arc<DispatchTable>,
    shutdown: CancellationToken,
    telemetry: Option<mpsc::Receiver<TelemetryPacket>>,
}

impl Bebop {
    /// Create a core with a fresh output channel and an open shutdown latch.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(TELEMETRY_CHANNEL_CAPACITY);
        let shutdown = CancellationToken::new();
        Self {
            emitter: Emitter::new(tx, shutdown.clone()),
            table: Arc::new(DispatchTable::new()),
            shutdown,
            telemetry: Some(rx),
        }
    }

    /// Take the receive-only subscriber handle.
    ///
    /// There is a single consumer; calling this a second time panics.
    pub fn telemetry(&mut self) -> mpsc::Receiver<TelemetryPacket> {
        self.telemetry.take().expect("telemetry receiver already taken")
    }

    /// Take the subscriber handle wrapped as a [`futures::Stream`].
    ///
    /// Same single-consumer contract as [`Bebop::telemetry`].
    pub fn telemetry_stream(&mut self) -> PacketStream {
        PacketStream::new(self.telemetry())
    }

    /// Close the shutdown latch.
    ///
    /// All emit attempts after this silently discard their packet; in-flight
    /// worker tasks still run but their sends no-op. Stopping twice is a
    /// no-op, not an error.
    pub fn stop_telemetry(&self) {
        self.shutdown.cancel();
    }

    /// Entry point for one reassembled frame from the transport.
    ///
    /// Never fails and never blocks on subscribers. Must be called from
    /// within a tokio runtime; decoding runs on a spawned worker so a slow
    /// subscriber cannot stall the transport reader.
    pub fn handle_incoming_data_frame(&self, frame: NetworkFrame) {
        let Some(header) = frame.command_header() else {
            self.emitter.send_runtime_error(
                "Frame too short for command header",
                TelemetryError::short_read(0, COMMAND_HEADER_LEN, frame.data.len()),
                &frame.data,
            );
            return;
        };

        let Some(project) = self.table.project(header.project) else {
            // May help to discover stuff for future firmware.
            let comment = format!("Couldn't find handlers for project: {}", header.project);
            let packet = TelemetryPacket::unknown_project(comment, frame.data.to_vec());
            if let Err(err) = self.emitter.dispatch(packet) {
                debug!(%err, project = header.project, "dropping unknown-project event");
            }
            return;
        };

        let Some(entry) = project.class(header.class) else {
            let comment =
                format!("Couldn't find handler for class within {}: {}", project.name, header.class);
            if let Err(err) = self.emitter.send_unknown_telemetry(comment, &frame.data) {
                debug!(%err, class = header.class, "dropping unknown-class event");
            }
            return;
        };

        let entry = *entry;
        let emitter = self.emitter.clone();
        let command_id = header.command_id();
        tokio::spawn(async move {
            trace!(
                project = entry.project_name,
                class = entry.class_name,
                command_id,
                "decoding frame"
            );
            match entry.decode(&emitter, command_id, &frame) {
                Ok(Decoded::Matched) => {}
                Ok(Decoded::NoHandler) => {
                    let comment = format!(
                        "Unknown commandID in {}:{}: {}",
                        entry.project_name, entry.class_name, command_id
                    );
                    if let Err(err) = emitter.send_unknown_telemetry(comment, &frame.data) {
                        debug!(%err, "dropping unknown-command event");
                    }
                }
                Err(handler_fault) => {
                    let comment = format!(
                        "Error in handler for {}:{}, commandID {}, context '{}'",
                        entry.project_name, entry.class_name, command_id, handler_fault.context
                    );
                    emitter.send_runtime_error(comment, handler_fault.source, &frame.data);
                }
            }
        });
    }
}

impl Default for Bebop {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Bebop {
    fn drop(&mut self) {
        // Workers spawned before the drop observe the closed latch and
        // discard their packets.
        self.shutdown.cancel();
    }
}
