// FWRT - fwrt-foundation
// Module: Core WebAssembly Types
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Numeric value types of the module format.

use core::fmt;

use fwrt_error::{kinds, Result};

/// WebAssembly numeric value types.
///
/// Reference and vector types are not part of the supported subset and are
/// rejected by [`ValueType::from_binary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum ValueType {
    /// 32-bit integer
    #[default]
    I32 = 0,
    /// 64-bit integer
    I64 = 1,
    /// 32-bit floating point
    F32 = 2,
    /// 64-bit floating point
    F64 = 3,
}

static VALUE_TYPE_NAMES: [&str; 4] = ["i32", "i64", "f32", "f64"];

impl ValueType {
    /// Create a value type from its binary encoding.
    pub fn from_binary(byte: u8) -> Result<Self> {
        match byte {
            0x7F => Ok(ValueType::I32),
            0x7E => Ok(ValueType::I64),
            0x7D => Ok(ValueType::F32),
            0x7C => Ok(ValueType::F64),
            _ => Err(kinds::invalid_value_type()),
        }
    }

    /// Binary encoding of this value type.
    #[must_use]
    pub const fn to_binary(self) -> u8 {
        match self {
            ValueType::I32 => 0x7F,
            ValueType::I64 => 0x7E,
            ValueType::F32 => 0x7D,
            ValueType::F64 => 0x7C,
        }
    }

    /// Text-format name (`i32`, `f64`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        VALUE_TYPE_NAMES[self as usize]
    }

    /// Size in bytes of a value of this type.
    #[must_use]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            ValueType::I32 | ValueType::F32 => 4,
            ValueType::I64 | ValueType::F64 => 8,
        }
    }

    /// Whether the type is 32 bits wide.
    #[must_use]
    pub const fn is_32_bit(self) -> bool {
        self.size_in_bytes() == 4
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_encoding_round_trips() {
        for ty in [ValueType::I32, ValueType::I64, ValueType::F32, ValueType::F64] {
            assert_eq!(ValueType::from_binary(ty.to_binary()), Ok(ty));
        }
    }

    #[test]
    fn reference_types_are_rejected() {
        let err = ValueType::from_binary(0x70).unwrap_err();
        assert_eq!(err.code, fwrt_error::codes::INVALID_VALUE_TYPE);
        assert!(ValueType::from_binary(0x7B).is_err());
    }

    #[test]
    fn names() {
        assert_eq!(ValueType::F32.name(), "f32");
        assert_eq!(format!("{}", ValueType::I64), "i64");
    }
}
