//! Fuzz testing for the record decoder.
//!
//! Feeds arbitrary bytes to `Record::decode`. Decoding must either fail or
//! produce a record that encodes back to a buffer which decodes to the same
//! record.

#![no_main]

use libfuzzer_sys::fuzz_target;

use leafdb::Record;

fuzz_target!(|data: &[u8]| {
    if let Ok(record) = Record::decode(data) {
        let encoded = record.encode();
        let again = Record::decode(&encoded).expect("re-decoding an encoded record must succeed");
        assert_eq!(record, again);
    }
});
