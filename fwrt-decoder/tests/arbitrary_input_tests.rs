//! Decoding arbitrary bytes never panics and never leaves a partial module.

use fwrt_decoder::{decode_module, decode_module_into};
use fwrt_format::Module;
use proptest::prelude::*;

const HEADER: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

fn with_header(tail: &[u8]) -> Vec<u8> {
    let mut bytes = HEADER.to_vec();
    bytes.extend_from_slice(tail);
    bytes
}

proptest! {
    #[test]
    fn arbitrary_bytes_decode_or_fail_cleanly(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        if let Err(error) = decode_module(&bytes) {
            prop_assert!(!error.message.is_empty());
        }
    }

    #[test]
    fn arbitrary_tails_leave_the_module_empty_on_error(
        tail in proptest::collection::vec(any::<u8>(), 0..512),
    ) {
        let bytes = with_header(&tail);
        let mut module = Module::new();
        if decode_module_into(&mut module, &bytes).is_err() {
            prop_assert!(module.is_empty());
        }
    }

    #[test]
    fn framed_sections_with_arbitrary_payloads(
        id in 0u8..=12,
        payload in proptest::collection::vec(any::<u8>(), 0..128),
    ) {
        let mut tail = vec![id];
        // Payload lengths stay below 128, so the size is a single LEB128 byte
        tail.push(payload.len() as u8);
        tail.extend_from_slice(&payload);
        let bytes = with_header(&tail);

        let mut module = Module::new();
        if decode_module_into(&mut module, &bytes).is_err() {
            prop_assert!(module.is_empty());
        }
    }
}
