//! mapmsg builds structured "map" messages, encodes them into transport-ready envelopes and
//! hands them to a pluggable [`Transport`](trait.Transport.html).
//!
//! A message body is a [`Map`](struct.Map.html): an insertion-ordered map from string keys to
//! tagged [`Value`](enum.Value.html)s, which may themselves be nested maps or
//! [`List`](struct.List.html)s. Every value keeps its exact type through encoding; a `u16` never
//! comes back as an `i32`.
//!
//! # Examples
//!
//! ```rust
//! use mapmsg::{Consumer, DeliveryMode, List, LoopbackOptions, LoopbackTransport, Map, Producer};
//!
//! # fn run() -> mapmsg::Result<()> {
//! let (tx, rx) = LoopbackTransport::pair(LoopbackOptions::default());
//! let mut producer = Producer::new(tx, "amq.direct/map_example".parse()?, DeliveryMode::AtLeastOnce);
//! let mut consumer = Consumer::new(rx);
//!
//! let mut content = Map::new();
//! content.set("id", 987654321);
//! content.set("name", "Widget");
//! content.set("colorsList", List::from(vec!["red", "green", "white"]));
//! producer.send(&content)?;
//!
//! let delivery = consumer.receive()?;
//! assert_eq!(delivery.subject(), Some("map_example"));
//! assert_eq!(delivery.content(), &content);
//! # Ok(())
//! # }
//! # run().unwrap();
//! ```

mod address;
mod codec;
mod codec_options;
mod consumer;
mod delivery;
mod envelope;
mod errors;
mod list;
mod map;
mod producer;
mod transport;
mod value;

#[cfg(test)]
mod integration_tests;

pub use address::Address;
pub use codec::{decode, encode, Encoder};
pub use codec_options::CodecOptions;
pub use consumer::Consumer;
pub use delivery::Delivery;
pub use envelope::{Envelope, MAP_CONTENT_TYPE};
pub use errors::{Error, Result};
pub use list::List;
pub use map::{Map, MapIter};
pub use producer::{DeliveryMode, Producer};
pub use transport::{Ack, LoopbackOptions, LoopbackTransport, Transport};
pub use value::{Tag, Value};
