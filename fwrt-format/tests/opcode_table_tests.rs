//! Consistency of the static opcode tables.

use std::collections::HashSet;

use fwrt_format::{Module, Opcode};

#[test]
fn every_byte_maps_back_to_itself() {
    for byte in 0..=u8::MAX {
        if let Some(opcode) = Opcode::from_byte(byte) {
            assert!(!opcode.is_extended());
            assert_eq!(opcode.table_index(), byte as usize, "{opcode}");
        }
    }
    for sub in 0..fwrt_format::opcode::EXTENDED_COUNT as u32 {
        let opcode = Opcode::from_extended(sub).expect("extended table has no gaps");
        assert!(opcode.is_extended());
        assert_eq!(opcode.table_index(), sub as usize);
    }
    assert_eq!(Opcode::from_extended(fwrt_format::opcode::EXTENDED_COUNT as u32), None);
}

#[test]
fn every_opcode_is_reachable_and_named_once() {
    let mut names = HashSet::new();
    for &opcode in Opcode::ALL {
        assert!(names.insert(opcode.name()), "duplicate name {}", opcode.name());
        let found = if opcode.is_extended() {
            Opcode::from_extended(opcode.table_index() as u32)
        } else {
            Opcode::from_byte(opcode.table_index() as u8)
        };
        assert_eq!(found, Some(opcode));
    }
    assert_eq!(Opcode::ALL.len(), names.len());
}

#[test]
fn default_opcode_is_nop() {
    assert_eq!(Opcode::default(), Opcode::Nop);
    assert_eq!(Opcode::default().name(), "nop");
}

#[test]
fn modules_can_be_shared_between_threads() {
    fn assert_sync<T: Sync>() {}
    assert_sync::<Module<'static>>();
}
