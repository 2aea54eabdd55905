use super::{demo_content, with_pair};
use crate::{Ack, DeliveryMode, Error, List, LoopbackOptions, Map, Tag, Transport, Value};

#[test]
fn test_send_demo_map() {
    with_pair(
        LoopbackOptions::default(),
        DeliveryMode::AtLeastOnce,
        |producer, consumer| {
            let content = demo_content();
            let ack = producer.send(&content).unwrap();
            assert_eq!(ack, Ack::Accepted { delivery_tag: 1 });

            let delivery = consumer.receive().unwrap();
            assert_eq!(delivery.subject(), Some("map_example"));
            assert_eq!(delivery.content(), &content);

            assert_eq!(delivery.get_as::<i32>("id"), Ok(987654321));
            assert_eq!(delivery.get_as::<&str>("name"), Ok("Widget"));
            assert_eq!(delivery.get_as::<f64>("percent"), Ok(0.99));
            assert_eq!(delivery.get_as::<u8>("mybyte"), Ok(4));
            assert_eq!(delivery.get_as::<char>("mychar"), Ok('h'));
            assert_eq!(delivery.get_as::<f32>("mySingle"), Ok(12.12));

            let nested = delivery.get_as::<&Map>("nestedMap").unwrap();
            assert_eq!(nested.get_as::<&str>("name"), Ok("Smith"));
            assert_eq!(nested.get_as::<i32>("number"), Ok(354));

            let colors: Vec<_> = delivery
                .get_as::<&List>("colorsList")
                .unwrap()
                .iter()
                .filter_map(Value::as_str)
                .collect();
            assert_eq!(colors, vec!["red", "green", "white"]);
        },
    )
}

#[test]
fn test_declared_tags_survive() {
    with_pair(
        LoopbackOptions::default(),
        DeliveryMode::AtMostOnce,
        |producer, consumer| {
            producer.send(&demo_content()).unwrap();
            let delivery = consumer.receive().unwrap();

            let expect = [
                ("mybyte", Tag::Byte),
                ("myUInt16", Tag::UInt16),
                ("myUInt32", Tag::UInt32),
                ("myUInt64", Tag::UInt64),
                ("myInt16", Tag::Int16),
                ("myInt32", Tag::Int32),
                ("myInt64", Tag::Int64),
                ("mySingle", Tag::Float32),
                ("myDouble", Tag::Float64),
                ("myVoid", Tag::Void),
            ];
            for (key, tag) in expect.iter() {
                assert_eq!(delivery.content().get(key).unwrap().tag(), *tag, "{}", key);
            }

            // 5u16 does not read back as any other integer type
            match delivery.get_as::<i32>("myUInt16") {
                Err(Error::TypeMismatch { expected, found }) => {
                    assert_eq!(expected, Tag::Int32);
                    assert_eq!(found, Tag::UInt16);
                }
                other => panic!("unexpected {:?}", other),
            }
        },
    )
}

#[test]
fn test_messages_arrive_in_order() {
    with_pair(
        LoopbackOptions::default(),
        DeliveryMode::AtLeastOnce,
        |producer, consumer| {
            let ids: Vec<String> = (0..10).map(|_| uuid::Uuid::new_v4().to_string()).collect();
            for (i, id) in ids.iter().enumerate() {
                let mut m = Map::new();
                m.set("id", id.as_str());
                let ack = producer.send(&m).unwrap();
                assert_eq!(
                    ack,
                    Ack::Accepted {
                        delivery_tag: i as u64 + 1
                    }
                );
            }
            for id in ids.iter() {
                let delivery = consumer.receive().unwrap();
                assert_eq!(delivery.get_as::<&str>("id"), Ok(id.as_str()));
            }
        },
    )
}

#[test]
fn test_at_least_once_full_queue() {
    with_pair(
        LoopbackOptions::default().capacity(Some(1)),
        DeliveryMode::AtLeastOnce,
        |producer, consumer| {
            let content = demo_content();
            producer.send(&content).unwrap();
            assert_eq!(
                producer.send(&content),
                Err(Error::Rejected { delivery_tag: 2 })
            );

            // only the first message was queued
            assert_eq!(consumer.receive().unwrap().content(), &content);
            assert_eq!(consumer.transport_mut().try_receive(), Ok(None));
        },
    )
}

#[test]
fn test_at_most_once_without_confirms() {
    with_pair(
        LoopbackOptions::default().confirms(false),
        DeliveryMode::AtMostOnce,
        |producer, consumer| {
            assert_eq!(producer.send(&demo_content()), Ok(Ack::Settled));
            assert_eq!(consumer.receive().unwrap().content(), &demo_content());
        },
    )
}

#[test]
fn test_at_least_once_without_confirms() {
    with_pair(
        LoopbackOptions::default().confirms(false),
        DeliveryMode::AtLeastOnce,
        |producer, consumer| {
            assert_eq!(producer.send(&demo_content()), Err(Error::Unconfirmed));
            // the transport still took the envelope
            assert_eq!(consumer.transport().pending(), 1);
        },
    )
}

#[test]
fn test_reply_on_same_pair() {
    with_pair(
        LoopbackOptions::default(),
        DeliveryMode::AtMostOnce,
        |producer, consumer| {
            let mut reply = Map::new();
            reply.set("status", "ok");
            consumer
                .transport_mut()
                .send(crate::encode(&reply).unwrap())
                .unwrap();

            let envelope = producer.transport_mut().receive().unwrap();
            assert_eq!(crate::decode(&envelope), Ok(reply));
        },
    )
}
