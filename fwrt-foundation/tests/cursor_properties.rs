//! Property tests for the byte cursor's LEB128 and bounds handling.

use fwrt_foundation::ByteCursor;
use proptest::{prop_assert, prop_assert_eq, proptest};

fn encode_uleb(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

fn encode_sleb(mut value: i64, out: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        let done = (value == 0 && byte & 0x40 == 0) || (value == -1 && byte & 0x40 != 0);
        if done {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

proptest! {
    #[test]
    fn uleb32_decodes_minimal_encodings(value: u32, trailer: Vec<u8>) {
        let mut bytes = Vec::new();
        encode_uleb(u64::from(value), &mut bytes);
        let len = bytes.len();
        bytes.extend_from_slice(&trailer);

        let mut cursor = ByteCursor::new(&bytes);
        prop_assert_eq!(cursor.parse_uleb32(), Ok(value));
        prop_assert_eq!(cursor.position(), len);
    }

    #[test]
    fn sleb64_decodes_minimal_encodings(value: i64) {
        let mut bytes = Vec::new();
        encode_sleb(value, &mut bytes);
        let mut cursor = ByteCursor::new(&bytes);
        prop_assert_eq!(cursor.parse_sleb64(), Ok(value));
        prop_assert!(cursor.is_empty());
    }

    #[test]
    fn sleb32_accepts_every_i32(value: i32) {
        let mut bytes = Vec::new();
        encode_sleb(i64::from(value), &mut bytes);
        prop_assert_eq!(ByteCursor::new(&bytes).parse_sleb32(), Ok(value));
    }

    #[test]
    fn uleb32_rejects_values_above_u32(value in (u64::from(u32::MAX) + 1)..=u64::MAX) {
        let mut bytes = Vec::new();
        encode_uleb(value, &mut bytes);
        let mut cursor = ByteCursor::new(&bytes);
        prop_assert!(cursor.parse_uleb32().is_err());
        prop_assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn truncated_input_never_advances(value in 128u32.., cut in 1usize..5) {
        let mut bytes = Vec::new();
        encode_uleb(u64::from(value), &mut bytes);
        let keep = bytes.len().saturating_sub(cut).max(1).min(bytes.len() - 1);
        let mut cursor = ByteCursor::new(&bytes[..keep]);
        prop_assert!(cursor.parse_uleb32().is_err());
        prop_assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn parse_bytes_stays_in_bounds(data: Vec<u8>, len in 0usize..512) {
        let mut cursor = ByteCursor::new(&data);
        match cursor.parse_bytes(len) {
            Ok(slice) => {
                prop_assert_eq!(slice, &data[..len]);
                prop_assert_eq!(cursor.remaining(), data.len() - len);
            }
            Err(_) => {
                prop_assert!(len > data.len());
                prop_assert_eq!(cursor.position(), 0);
            }
        }
    }
}
