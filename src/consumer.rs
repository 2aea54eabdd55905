use crate::errors::*;
use crate::{Delivery, Encoder, Transport};
use log::debug;

/// Receives envelopes from a [`Transport`](trait.Transport.html) and decodes them into
/// [`Delivery`](struct.Delivery.html)s.
#[derive(Debug)]
pub struct Consumer<T: Transport> {
    transport: T,
    encoder: Encoder,
}

impl<T: Transport> Consumer<T> {
    pub fn new(transport: T) -> Consumer<T> {
        Consumer::with_encoder(transport, Encoder::default())
    }

    pub fn with_encoder(transport: T, encoder: Encoder) -> Consumer<T> {
        Consumer { transport, encoder }
    }

    /// Block until an envelope arrives, then decode it. An envelope that fails to decode is
    /// consumed and reported as `CorruptEnvelope`; the next call moves on to the next envelope.
    pub fn receive(&mut self) -> Result<Delivery> {
        let envelope = self.transport.receive()?;
        debug!(
            "received {} byte envelope (subject {:?})",
            envelope.len(),
            envelope.subject()
        );
        let content = self.encoder.decode(&envelope)?;
        Ok(Delivery::new(envelope.subject().map(str::to_string), content))
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the consumer, handing back its transport.
    pub fn into_transport(self) -> T {
        self.transport
    }
}
