use bytes::Bytes;

/// Content type carried by envelopes holding an encoded [`Map`](struct.Map.html).
pub const MAP_CONTENT_TYPE: &str = "amqp/map";

/// The wire-ready form of a map message: an encoded body plus the content type and optional
/// subject (routing key) that a transport needs to deliver it.
///
/// Envelopes own their bytes; cloning one is cheap and never copies the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Envelope {
    content_type: String,
    subject: Option<String>,
    body: Bytes,
}

impl Envelope {
    /// Wrap an already-encoded map body.
    pub fn new<B: Into<Bytes>>(body: B) -> Envelope {
        Envelope::with_content_type(MAP_CONTENT_TYPE, body)
    }

    /// Wrap bytes received from a transport along with the content type it reported.
    pub fn with_content_type<S: Into<String>, B: Into<Bytes>>(
        content_type: S,
        body: B,
    ) -> Envelope {
        Envelope {
            content_type: content_type.into(),
            subject: None,
            body: body.into(),
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn set_subject<S: Into<String>>(&mut self, subject: Option<S>) {
        self.subject = subject.map(Into::into);
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}
