//! Fuzz testing for leaf node views.
//!
//! Builds a page from arbitrary bytes, opens it as a leaf and replays a list
//! of insert operations. Views must reject malformed headers without
//! panicking, and every accepted insert must leave the node readable.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use leafdb::btree::{LeafNode, LeafNodeMut};
use leafdb::config::PAGE_SIZE;
use leafdb::Record;

#[derive(Debug, Arbitrary)]
struct LeafInput {
    page: Vec<u8>,
    inserts: Vec<(u8, u32)>,
}

fuzz_target!(|input: LeafInput| {
    let mut page = vec![0u8; PAGE_SIZE];
    let n = input.page.len().min(PAGE_SIZE);
    page[..n].copy_from_slice(&input.page[..n]);

    if let Ok(leaf) = LeafNode::from_page(&page) {
        for i in 0..leaf.cell_count() as usize {
            let _ = leaf.key_at(i);
            let _ = leaf.value_at(i).map(Record::decode);
        }
    }

    let Ok(mut leaf) = LeafNodeMut::from_page(&mut page) else {
        return;
    };
    for (index, key) in input.inserts {
        let record = match Record::new(key, "fuzz", "fuzz@example.com") {
            Ok(record) => record,
            Err(_) => return,
        };
        let before = leaf.cell_count();
        if leaf.insert_cell_at(index as usize, key, &record).is_ok() {
            assert_eq!(leaf.cell_count(), before + 1);
            let view = leaf.as_view();
            assert_eq!(view.key_at(index as usize).unwrap(), key);
        }
    }
});
