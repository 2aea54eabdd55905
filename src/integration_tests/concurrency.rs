use super::{demo_content, init_logger};
use crate::{CodecOptions, Encoder, List, Map};
use std::sync::Arc;
use std::thread;

fn tree_for(worker: usize) -> Map {
    let mut content = demo_content();
    content.set("worker", worker as u64);
    content.set("trace", uuid::Uuid::new_v4().to_string());
    let mut items = List::new();
    for i in 0..worker {
        items.append(i as i32);
    }
    content.set("items", items);
    content
}

#[test]
fn test_parallel_encode_decode_independent_trees() {
    init_logger();
    let encoder = Encoder::new(CodecOptions::default().max_depth(8));

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            thread::spawn(move || {
                for _ in 0..50 {
                    let tree = tree_for(worker);
                    let envelope = encoder.encode(&tree).unwrap();
                    assert_eq!(encoder.decode(&envelope).unwrap(), tree);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_tree_encodes_identically_across_threads() {
    init_logger();
    let tree = Arc::new(tree_for(3));
    let expected = crate::encode(&tree).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || crate::encode(&tree).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
