use crate::Tag;
use snafu::Snafu;

/// A type alias for handling errors throughout mapmsg.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Specific error cases returned by mapmsg.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum Error {
    /// A stored value does not have the type that was asked for.
    #[snafu(display("type mismatch (expected {}, found {})", expected, found))]
    TypeMismatch { expected: Tag, found: Tag },

    /// A map lookup named a key that is not present.
    #[snafu(display("key not found: {}", key))]
    KeyNotFound { key: String },

    /// The value tree cannot be represented in an envelope.
    #[snafu(display("cannot encode value: {}", reason))]
    Encoding { reason: String },

    /// Envelope bytes are malformed or truncated.
    #[snafu(display("corrupt envelope: {}", reason))]
    CorruptEnvelope { reason: String },

    /// Address string could not be parsed.
    #[snafu(display("invalid address: {:?}", address))]
    InvalidAddress { address: String },

    /// The peer side of the transport has gone away.
    #[snafu(display("transport closed"))]
    TransportClosed,

    /// The transport only supports sending.
    #[snafu(display("transport does not support receiving"))]
    ReceiveUnsupported,

    /// The transport refused a message sent with at-least-once delivery.
    #[snafu(display("message rejected by transport (delivery tag {})", delivery_tag))]
    Rejected { delivery_tag: u64 },

    /// The transport settled a message sent with at-least-once delivery without confirming it.
    #[snafu(display("transport settled message without confirmation"))]
    Unconfirmed,
}
