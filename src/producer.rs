use crate::errors::*;
use crate::{Ack, Address, Encoder, Map, Transport};
use log::{debug, warn};

/// How much a [`Producer`](struct.Producer.html) insists on hearing back from its transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Hand the envelope to the transport and report whatever ack it returns.
    AtMostOnce,

    /// Require the transport to confirm each envelope. A rejected or merely settled envelope is
    /// reported as an error; it is not resent.
    AtLeastOnce,
}

/// Encodes map messages and sends them to a fixed [`Address`](struct.Address.html) over a
/// [`Transport`](trait.Transport.html).
///
/// ```rust
/// use mapmsg::{Ack, DeliveryMode, LoopbackOptions, LoopbackTransport, Map, Producer};
///
/// # fn run() -> mapmsg::Result<()> {
/// let (transport, _peer) = LoopbackTransport::pair(LoopbackOptions::default());
/// let address = "amq.direct/map_example".parse()?;
/// let mut producer = Producer::new(transport, address, DeliveryMode::AtLeastOnce);
///
/// let mut content = Map::new();
/// content.set("id", 987654321);
/// assert_eq!(producer.send(&content)?, Ack::Accepted { delivery_tag: 1 });
/// # Ok(())
/// # }
/// # run().unwrap();
/// ```
#[derive(Debug)]
pub struct Producer<T: Transport> {
    transport: T,
    address: Address,
    mode: DeliveryMode,
    encoder: Encoder,
}

impl<T: Transport> Producer<T> {
    pub fn new(transport: T, address: Address, mode: DeliveryMode) -> Producer<T> {
        Producer::with_encoder(transport, address, mode, Encoder::default())
    }

    pub fn with_encoder(
        transport: T,
        address: Address,
        mode: DeliveryMode,
        encoder: Encoder,
    ) -> Producer<T> {
        Producer {
            transport,
            address,
            mode,
            encoder,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    /// Encode `content` and send it synchronously. The address subject is carried on the
    /// envelope so the transport can route it.
    ///
    /// Encoding failures are returned before anything reaches the transport. In
    /// [`AtLeastOnce`](enum.DeliveryMode.html#variant.AtLeastOnce) mode, a rejection fails with
    /// `Rejected` and an unconfirmed send fails with `Unconfirmed`.
    pub fn send(&mut self, content: &Map) -> Result<Ack> {
        let mut envelope = self.encoder.encode(content)?;
        envelope.set_subject(self.address.subject());
        debug!(
            "sending {} byte map message to {}",
            envelope.len(),
            self.address
        );

        let ack = self.transport.send(envelope)?;
        match (self.mode, ack) {
            (DeliveryMode::AtLeastOnce, Ack::Rejected { delivery_tag }) => {
                warn!(
                    "delivery {} to {} rejected by transport",
                    delivery_tag, self.address
                );
                RejectedSnafu { delivery_tag }.fail()
            }
            (DeliveryMode::AtLeastOnce, Ack::Settled) => UnconfirmedSnafu.fail(),
            (_, ack) => {
                debug!("delivery to {} acked: {:?}", self.address, ack);
                Ok(ack)
            }
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the producer, handing back its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
