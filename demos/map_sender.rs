// Builds a map message with simple types, a nested map, a list and one value of each
// supported type, then sends it to amq.direct/map_example. The in-memory loopback transport
// stands in for a broker connection, so there is no connection URL to pass on the command line
// and the program takes no arguments. A second thread plays the receiving side.
use log::info;
use mapmsg::{
    Address, Consumer, DeliveryMode, List, LoopbackOptions, LoopbackTransport, Map, Producer,
    Result,
};
use std::thread;

fn build_content() -> Map {
    let mut content = Map::new();

    // simple types
    content.set("id", 987654321);
    content.set("name", "Widget");
    content.set("percent", 0.99);

    // nested map
    let mut sub_map = Map::new();
    sub_map.set("name", "Smith");
    sub_map.set("number", 354);
    content.set("nestedMap", sub_map);

    // list
    let mut colors = List::new();
    colors.append("red");
    colors.append("green");
    colors.append("white");
    content.set("colorsList", colors);

    // one of each supported scalar type
    content.set("mybool", true);
    content.set("mybyte", 4u8);
    content.set("myUInt16", 5u16);
    content.set("myUInt32", 6u32);
    content.set("myUInt64", 7u64);
    content.set("mychar", 'h');
    content.set("myInt16", 9i16);
    content.set("myInt32", 10i32);
    content.set("myInt64", 11i64);
    content.set("mySingle", 12.12f32);
    content.set("myDouble", 13.13f64);

    content
}

fn main() -> Result<()> {
    env_logger::init();

    let address = Address::with_subject("amq.direct", "map_example")?;

    let (tx, rx) = LoopbackTransport::pair(LoopbackOptions::default());

    let receiver = thread::spawn(move || -> Result<()> {
        let mut consumer = Consumer::new(rx);
        let delivery = consumer.receive()?;
        info!("received message with subject {:?}", delivery.subject());
        for (key, value) in delivery.content().iter() {
            println!("{} = {:?}", key, value);
        }
        Ok(())
    });

    // Send synchronously, requiring the transport to confirm the message.
    let mut producer = Producer::new(tx, address, DeliveryMode::AtLeastOnce);
    let ack = producer.send(&build_content())?;
    info!("sent to {}: {:?}", producer.address(), ack);

    // Dropping the transport is our equivalent of closing the connection.
    drop(producer.into_transport());

    match receiver.join() {
        Ok(result) => result,
        Err(_) => panic!("receiver thread panicked"),
    }
}
