use crate::{
    Consumer, DeliveryMode, List, LoopbackOptions, LoopbackTransport, Map, Producer, Value,
};
use std::sync::Once;

mod concurrency;
mod map_message;

static INIT_LOGGER: Once = Once::new();

fn init_logger() {
    INIT_LOGGER.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn with_pair<F>(options: LoopbackOptions, mode: DeliveryMode, f: F)
where
    F: FnOnce(&mut Producer<LoopbackTransport>, &mut Consumer<LoopbackTransport>),
{
    init_logger();
    let (tx, rx) = LoopbackTransport::pair(options);
    let address = "amq.direct/map_example".parse().unwrap();
    let mut producer = Producer::new(tx, address, mode);
    let mut consumer = Consumer::new(rx);
    f(&mut producer, &mut consumer)
}

// The payload from the map sender demo: simple types, a nested map, a list and one value of
// every scalar type.
fn demo_content() -> Map {
    let mut content = Map::new();
    content.set("id", 987654321i32);
    content.set("name", "Widget");
    content.set("percent", 0.99f64);

    let mut sub_map = Map::new();
    sub_map.set("name", "Smith");
    sub_map.set("number", 354i32);
    content.set("nestedMap", sub_map);

    let mut colors = List::new();
    colors.append("red");
    colors.append("green");
    colors.append("white");
    content.set("colorsList", colors);

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
    content.set("myVoid", Value::Void);
    content
}
