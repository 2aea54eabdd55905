use super::{Ack, Transport};
use crate::errors::*;
use crate::Envelope;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use log::{debug, warn};
use std::time::Duration;

/// Options for an in-memory [`LoopbackTransport`](struct.LoopbackTransport.html) pair.
///
/// `LoopbackOptions` uses the builder pattern. The default settings are equivalent to
///
/// ```rust
/// use mapmsg::LoopbackOptions;
///
/// # fn default_loopback_options() -> LoopbackOptions {
/// LoopbackOptions::default()
///     .capacity(None)
///     .confirms(true)
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoopbackOptions {
    capacity: Option<usize>,
    confirms: bool,
}

impl Default for LoopbackOptions {
    // NOTE: If we change this, make sure to change the doc comment above.
    fn default() -> Self {
        LoopbackOptions {
            capacity: None,
            confirms: true,
        }
    }
}

impl LoopbackOptions {
    /// Sets how many undelivered envelopes each direction may hold. `None` (the default) means
    /// unbounded. Sending into a full queue does not block; the envelope is rejected instead.
    pub fn capacity(self, capacity: Option<usize>) -> Self {
        LoopbackOptions { capacity, ..self }
    }

    /// Sets whether sends are confirmed with [`Ack::Accepted`](enum.Ack.html#variant.Accepted).
    /// If false, successful sends report [`Ack::Settled`](enum.Ack.html#variant.Settled), like a
    /// channel without publisher confirms.
    pub fn confirms(self, confirms: bool) -> Self {
        LoopbackOptions { confirms, ..self }
    }
}

/// One end of an in-memory transport. Envelopes sent on one end of a pair are received on the
/// other.
#[derive(Debug)]
pub struct LoopbackTransport {
    tx: Sender<Envelope>,
    rx: Receiver<Envelope>,
    confirms: bool,
    next_delivery_tag: u64,
}

impl LoopbackTransport {
    /// Create two connected ends.
    pub fn pair(options: LoopbackOptions) -> (LoopbackTransport, LoopbackTransport) {
        let make = || match options.capacity {
            Some(capacity) => crossbeam_channel::bounded(capacity),
            None => crossbeam_channel::unbounded(),
        };
        let (a_tx, b_rx) = make();
        let (b_tx, a_rx) = make();
        (
            LoopbackTransport::new(a_tx, a_rx, options.confirms),
            LoopbackTransport::new(b_tx, b_rx, options.confirms),
        )
    }

    fn new(tx: Sender<Envelope>, rx: Receiver<Envelope>, confirms: bool) -> LoopbackTransport {
        LoopbackTransport {
            tx,
            rx,
            confirms,
            next_delivery_tag: 1,
        }
    }

    /// Number of envelopes waiting to be received on this end.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Receive an envelope if one is waiting, without blocking.
    pub fn try_receive(&mut self) -> Result<Option<Envelope>> {
        match self.rx.try_recv() {
            Ok(envelope) => Ok(Some(envelope)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => TransportClosedSnafu.fail(),
        }
    }

    /// Receive an envelope, waiting at most `timeout` for one to arrive.
    pub fn receive_timeout(&mut self, timeout: Duration) -> Result<Option<Envelope>> {
        match self.rx.recv_timeout(timeout) {
            Ok(envelope) => Ok(Some(envelope)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => TransportClosedSnafu.fail(),
        }
    }
}

impl Transport for LoopbackTransport {
    fn send(&mut self, envelope: Envelope) -> Result<Ack> {
        let delivery_tag = self.next_delivery_tag;
        match self.tx.try_send(envelope) {
            Ok(()) => {
                self.next_delivery_tag += 1;
                debug!("loopback queued delivery {}", delivery_tag);
                if self.confirms {
                    Ok(Ack::Accepted { delivery_tag })
                } else {
                    Ok(Ack::Settled)
                }
            }
            Err(TrySendError::Full(_)) => {
                self.next_delivery_tag += 1;
                warn!("loopback queue full; rejecting delivery {}", delivery_tag);
                Ok(Ack::Rejected { delivery_tag })
            }
            Err(TrySendError::Disconnected(_)) => TransportClosedSnafu.fail(),
        }
    }

    fn receive(&mut self) -> Result<Envelope> {
        match self.rx.recv() {
            Ok(envelope) => Ok(envelope),
            Err(_) => TransportClosedSnafu.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(byte: u8) -> Envelope {
        Envelope::new(vec![byte])
    }

    #[test]
    fn delivers_to_peer_in_order() {
        let (mut a, mut b) = LoopbackTransport::pair(LoopbackOptions::default());
        assert_eq!(a.send(envelope(1)), Ok(Ack::Accepted { delivery_tag: 1 }));
        assert_eq!(a.send(envelope(2)), Ok(Ack::Accepted { delivery_tag: 2 }));
        assert_eq!(b.pending(), 2);
        assert_eq!(a.pending(), 0);

        assert_eq!(b.receive().unwrap().body(), &[1]);
        assert_eq!(b.receive().unwrap().body(), &[2]);
        assert_eq!(b.try_receive(), Ok(None));
    }

    #[test]
    fn both_directions() {
        let (mut a, mut b) = LoopbackTransport::pair(LoopbackOptions::default());
        b.send(envelope(9)).unwrap();
        assert_eq!(a.try_receive().unwrap().unwrap().body(), &[9]);
    }

    #[test]
    fn full_queue_rejects() {
        let options = LoopbackOptions::default().capacity(Some(1));
        let (mut a, mut b) = LoopbackTransport::pair(options);
        assert_eq!(a.send(envelope(1)), Ok(Ack::Accepted { delivery_tag: 1 }));
        assert_eq!(a.send(envelope(2)), Ok(Ack::Rejected { delivery_tag: 2 }));
        b.receive().unwrap();
        assert_eq!(a.send(envelope(3)), Ok(Ack::Accepted { delivery_tag: 3 }));
    }

    #[test]
    fn without_confirms_sends_are_settled() {
        let options = LoopbackOptions::default().confirms(false);
        let (mut a, _b) = LoopbackTransport::pair(options);
        assert_eq!(a.send(envelope(1)), Ok(Ack::Settled));
    }

    #[test]
    fn dropped_peer_closes() {
        let (mut a, b) = LoopbackTransport::pair(LoopbackOptions::default());
        drop(b);
        assert_eq!(a.send(envelope(1)), Err(Error::TransportClosed));
        assert_eq!(a.receive(), Err(Error::TransportClosed));
        assert_eq!(a.try_receive(), Err(Error::TransportClosed));
    }

    #[test]
    fn queued_envelopes_survive_sender_drop() {
        let (mut a, mut b) = LoopbackTransport::pair(LoopbackOptions::default());
        a.send(envelope(7)).unwrap();
        drop(a);
        assert_eq!(b.receive().unwrap().body(), &[7]);
        assert_eq!(b.receive(), Err(Error::TransportClosed));
    }

    #[test]
    fn receive_timeout_expires() {
        let (_a, mut b) = LoopbackTransport::pair(LoopbackOptions::default());
        let got = b.receive_timeout(Duration::from_millis(10)).unwrap();
        assert!(got.is_none());
    }
}
