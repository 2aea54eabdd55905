use crate::errors::*;
use crate::{Map, Value};
use std::convert::TryFrom;

/// A decoded map message received by a [`Consumer`](struct.Consumer.html).
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    subject: Option<String>,
    content: Map,
}

impl Delivery {
    pub(crate) fn new(subject: Option<String>, content: Map) -> Delivery {
        Delivery { subject, content }
    }

    /// The subject (routing key) the message was sent with, if any.
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn content(&self) -> &Map {
        &self.content
    }

    /// Shorthand for `self.content().get_as(key)`.
    pub fn get_as<'a, T>(&'a self, key: &str) -> Result<T>
    where
        T: TryFrom<&'a Value, Error = Error>,
    {
        self.content.get_as(key)
    }

    pub fn into_content(self) -> Map {
        self.content
    }
}
