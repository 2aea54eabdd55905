use crate::errors::*;
use crate::Envelope;

mod loopback;

pub use self::loopback::{LoopbackOptions, LoopbackTransport};

/// Outcome of handing an envelope to a [`Transport`](trait.Transport.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    /// The transport took the envelope but offers no confirmation of its fate.
    Settled,

    /// The transport confirmed receipt. Delivery tags start at 1 and increase by one for each
    /// envelope sent on the same transport.
    Accepted { delivery_tag: u64 },

    /// The transport refused the envelope.
    Rejected { delivery_tag: u64 },
}

/// The delivery mechanism a [`Producer`](struct.Producer.html) or
/// [`Consumer`](struct.Consumer.html) is bound to.
///
/// Connection setup, addressing and delivery guarantees all live behind this trait; mapmsg only
/// produces and consumes envelopes. Implementations should not retry internally unless that is
/// part of their documented delivery guarantee.
pub trait Transport {
    /// Send a single envelope, blocking until the transport reports an outcome.
    fn send(&mut self, envelope: Envelope) -> Result<Ack>;

    /// Block until an envelope is available. Send-only transports may keep the default, which
    /// fails with `ReceiveUnsupported`.
    fn receive(&mut self) -> Result<Envelope> {
        ReceiveUnsupportedSnafu.fail()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, envelope: Envelope) -> Result<Ack> {
        (**self).send(envelope)
    }

    fn receive(&mut self) -> Result<Envelope> {
        (**self).receive()
    }
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, envelope: Envelope) -> Result<Ack> {
        (**self).send(envelope)
    }

    fn receive(&mut self) -> Result<Envelope> {
        (**self).receive()
    }
}
