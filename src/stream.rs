//! Stream adapter for telemetry subscribers.

use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::types::TelemetryPacket;

pin_project! {
    /// The telemetry receiver as a [`futures::Stream`].
    ///
    /// Ends when the core is dropped and all buffered packets are drained.
    /// A closed shutdown latch does not end the stream by itself; emits
    /// just stop arriving, which lets a consumer drain what was already
    /// buffered before it stopped.
    pub struct PacketStream {
        #[pin]
        inner: ReceiverStream<TelemetryPacket>,
    }
}

impl PacketStream {
    pub(crate) fn new(rx: mpsc::Receiver<TelemetryPacket>) -> Self {
        Self { inner: ReceiverStream::new(rx) }
    }
}

impl Stream for PacketStream {
    type Item = TelemetryPacket;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;
    use futures::StreamExt;

    #[tokio::test]
    async fn stream_yields_buffered_packets_then_ends() {
        let (tx, rx) = mpsc::channel(4);
        tx.try_send(TelemetryPacket::empty(events::LANDED)).unwrap();
        tx.try_send(TelemetryPacket::empty(events::FLYING)).unwrap();
        drop(tx);

        let mut stream = PacketStream::new(rx);
        assert_eq!(stream.next().await.unwrap().title, events::LANDED);
        assert_eq!(stream.next().await.unwrap().title, events::FLYING);
        assert!(stream.next().await.is_none());
    }
}
