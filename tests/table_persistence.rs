//! # Table Persistence Tests
//!
//! End-to-end behaviour of the public `Table` API against a real file:
//! 1. Records survive close/reopen cycles byte-for-byte
//! 2. The root leaf fills up at exactly `LEAF_NODE_MAX_CELLS` records
//! 3. Select order is insertion order
//! 4. The on-disk page matches the documented layout
//! 5. Corrupt or oversized files are refused at open

use leafdb::config::{
    EMAIL_MAX_LEN, LEAF_NODE_CELL_SIZE, LEAF_NODE_HEADER_SIZE, LEAF_NODE_MAX_CELLS, PAGE_SIZE,
    ROW_SIZE, USERNAME_MAX_LEN,
};
use leafdb::{InsertResult, Record, RecordError, Table};
use tempfile::tempdir;

fn record(id: u32) -> Record {
    Record::new(id, &format!("user{}", id), &format!("person{}@example.com", id)).unwrap()
}

fn select_all(table: &mut Table) -> Vec<Record> {
    table
        .select()
        .unwrap()
        .collect::<eyre::Result<Vec<_>>>()
        .unwrap()
}

mod durability_tests {
    use super::*;

    #[test]
    fn single_record_scenario() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let mut table = Table::open(&path).unwrap();
        let expected = Record::new(1, "user1", "person1@example.com").unwrap();
        assert_eq!(table.insert(&expected).unwrap(), InsertResult::Success);
        assert_eq!(select_all(&mut table), vec![expected]);
        table.close().unwrap();

        let mut table = Table::open(&path).unwrap();
        assert_eq!(select_all(&mut table), vec![expected]);
        table.close().unwrap();
    }

    #[test]
    fn many_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let mut table = Table::open(&path).unwrap();
        for id in 1..=10 {
            assert_eq!(table.insert(&record(id)).unwrap(), InsertResult::Success);
        }
        table.close().unwrap();

        let mut table = Table::open(&path).unwrap();
        let expected: Vec<Record> = (1..=10).map(record).collect();
        assert_eq!(select_all(&mut table), expected);
    }

    #[test]
    fn inserts_accumulate_across_sessions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        for id in [5, 6, 7] {
            let mut table = Table::open(&path).unwrap();
            table.insert(&record(id)).unwrap();
            table.close().unwrap();
        }

        let mut table = Table::open(&path).unwrap();
        let ids: Vec<u32> = select_all(&mut table).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn file_is_whole_pages_after_close() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let mut table = Table::open(&path).unwrap();
        table.insert(&record(1)).unwrap();
        table.close().unwrap();

        let len = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len, PAGE_SIZE as u64);
    }
}

mod capacity_tests {
    use super::*;

    #[test]
    fn root_leaf_holds_exactly_max_cells() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("users.db")).unwrap();

        for id in 1..=LEAF_NODE_MAX_CELLS as u32 {
            assert_eq!(table.insert(&record(id)).unwrap(), InsertResult::Success);
        }
        assert_eq!(
            table.insert(&record(LEAF_NODE_MAX_CELLS as u32 + 1)).unwrap(),
            InsertResult::TableFull
        );

        assert_eq!(select_all(&mut table).len(), LEAF_NODE_MAX_CELLS);
    }

    #[test]
    fn full_table_stays_full_after_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let mut table = Table::open(&path).unwrap();
        for id in 0..LEAF_NODE_MAX_CELLS as u32 {
            table.insert(&record(id)).unwrap();
        }
        table.close().unwrap();

        let mut table = Table::open(&path).unwrap();
        assert_eq!(table.insert(&record(99)).unwrap(), InsertResult::TableFull);
    }

    #[test]
    fn boundary_text_widths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let username = "u".repeat(USERNAME_MAX_LEN);
        let email = "e".repeat(EMAIL_MAX_LEN);
        let wide = Record::new(1, &username, &email).unwrap();

        let mut table = Table::open(&path).unwrap();
        table.insert(&wide).unwrap();
        table.close().unwrap();

        let mut table = Table::open(&path).unwrap();
        let rows = select_all(&mut table);
        assert_eq!(rows[0].username.as_str(), username);
        assert_eq!(rows[0].email.as_str(), email);

        let too_long = Record::new(2, &"u".repeat(USERNAME_MAX_LEN + 1), "a@b");
        assert!(matches!(too_long, Err(RecordError::TextTooLong { .. })));
        let too_long = Record::new(2, "bob", &"e".repeat(EMAIL_MAX_LEN + 1));
        assert!(matches!(too_long, Err(RecordError::TextTooLong { .. })));
    }
}

mod ordering_tests {
    use super::*;

    #[test]
    fn select_preserves_insertion_order() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("users.db")).unwrap();

        for id in [3, 1, 2] {
            table.insert(&record(id)).unwrap();
        }

        let ids: Vec<u32> = select_all(&mut table).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn cursor_insert_at_start_reorders() {
        let dir = tempdir().unwrap();
        let mut table = Table::open(dir.path().join("users.db")).unwrap();

        table.insert(&record(2)).unwrap();
        table.insert(&record(3)).unwrap();
        table.start().unwrap().insert(1, &record(1)).unwrap();

        assert_eq!(table.leaf_keys().unwrap(), vec![1, 2, 3]);
        assert_eq!(select_all(&mut table), vec![record(1), record(2), record(3)]);
    }
}

mod format_tests {
    use super::*;

    #[test]
    fn page_zero_matches_documented_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let mut table = Table::open(&path).unwrap();
        table.insert(&record(7)).unwrap();
        table.insert(&record(8)).unwrap();
        table.close().unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes[0], 1, "node_kind SHOULD be leaf");
        assert_eq!(bytes[1], 1, "page 0 SHOULD be the root");
        assert_eq!(&bytes[2..6], &0u32.to_le_bytes());
        assert_eq!(&bytes[6..10], &2u32.to_le_bytes());

        let cell0 = LEAF_NODE_HEADER_SIZE;
        assert_eq!(&bytes[cell0..cell0 + 4], &7u32.to_le_bytes());
        assert_eq!(&bytes[cell0 + 4..cell0 + 4 + ROW_SIZE], &record(7).encode());

        let cell1 = LEAF_NODE_HEADER_SIZE + LEAF_NODE_CELL_SIZE;
        assert_eq!(&bytes[cell1..cell1 + 4], &8u32.to_le_bytes());
    }
}

mod open_tests {
    use super::*;

    #[test]
    fn torn_file_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        let mut table = Table::open(&path).unwrap();
        table.insert(&record(1)).unwrap();
        table.close().unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        bytes.truncate(PAGE_SIZE - 100);
        std::fs::write(&path, &bytes).unwrap();

        let err = Table::open(&path).unwrap_err();
        assert!(err.to_string().contains("not a whole number of pages"));
    }

    #[test]
    fn file_over_page_limit_is_refused() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");

        Table::builder().path(&path).open().unwrap().close().unwrap();
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.resize(3 * PAGE_SIZE, 0);
        std::fs::write(&path, &bytes).unwrap();

        assert!(Table::builder().path(&path).max_pages(2).open().is_err());
        let table = Table::builder().path(&path).max_pages(3).open().unwrap();
        assert_eq!(table.num_pages(), 3);
    }

    #[test]
    fn empty_existing_file_is_initialized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("users.db");
        std::fs::write(&path, b"").unwrap();

        let mut table = Table::open(&path).unwrap();
        assert!(select_all(&mut table).is_empty());
        assert_eq!(table.insert(&record(1)).unwrap(), InsertResult::Success);
    }
}
