// FWRT - fwrt-foundation
// Module: Runtime Values
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Tagged runtime values held on the operand stack, in locals and globals.

use core::fmt;

use fwrt_error::{codes, Error, Result};

use crate::types::ValueType;

/// A WebAssembly runtime value.
///
/// Floats are stored as raw bits so that NaN payloads survive a round trip
/// through the stack and equality is bitwise.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Value {
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 32-bit float, as IEEE 754 bits
    F32(u32),
    /// 64-bit float, as IEEE 754 bits
    F64(u64),
}

impl Default for Value {
    fn default() -> Self {
        Value::I32(0)
    }
}

impl Value {
    /// The zero value of `ty`, used for declared locals.
    #[must_use]
    pub const fn default_for_type(ty: ValueType) -> Self {
        match ty {
            ValueType::I32 => Value::I32(0),
            ValueType::I64 => Value::I64(0),
            ValueType::F32 => Value::F32(0),
            ValueType::F64 => Value::F64(0),
        }
    }

    /// Wrap an `f32`.
    #[must_use]
    pub fn from_f32(value: f32) -> Self {
        Value::F32(value.to_bits())
    }

    /// Wrap an `f64`.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        Value::F64(value.to_bits())
    }

    /// The type tag of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
        }
    }

    /// Extract an `i32`, failing on any other tag.
    pub fn as_i32(&self) -> Result<i32> {
        match *self {
            Value::I32(v) => Ok(v),
            _ => Err(type_mismatch()),
        }
    }

    /// Extract an `i64`, failing on any other tag.
    pub fn as_i64(&self) -> Result<i64> {
        match *self {
            Value::I64(v) => Ok(v),
            _ => Err(type_mismatch()),
        }
    }

    /// Extract an `f32`, failing on any other tag.
    pub fn as_f32(&self) -> Result<f32> {
        match *self {
            Value::F32(bits) => Ok(f32::from_bits(bits)),
            _ => Err(type_mismatch()),
        }
    }

    /// Extract an `f64`, failing on any other tag.
    pub fn as_f64(&self) -> Result<f64> {
        match *self {
            Value::F64(bits) => Ok(f64::from_bits(bits)),
            _ => Err(type_mismatch()),
        }
    }

    /// The low 32 bits of a 32-bit value, regardless of its tag.
    ///
    /// Used to move `i32`/`f32` values through 32-bit host cells.
    pub fn to_bits32(&self) -> Result<u32> {
        match *self {
            Value::I32(v) => Ok(v as u32),
            Value::F32(bits) => Ok(bits),
            _ => Err(type_mismatch()),
        }
    }

    /// Rebuild a 32-bit value of type `ty` from raw bits.
    pub fn from_bits32(ty: ValueType, bits: u32) -> Result<Self> {
        match ty {
            ValueType::I32 => Ok(Value::I32(bits as i32)),
            ValueType::F32 => Ok(Value::F32(bits)),
            _ => Err(type_mismatch()),
        }
    }
}

const fn type_mismatch() -> Error {
    Error::runtime_error(codes::TYPE_MISMATCH, "Value has unexpected type")
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Value::I32(v) => write!(f, "i32:{v}"),
            Value::I64(v) => write!(f, "i64:{v}"),
            Value::F32(bits) => write!(f, "f32:{}", f32::from_bits(bits)),
            Value::F64(bits) => write!(f, "f64:{}", f64::from_bits(bits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_type() {
        assert_eq!(Value::default_for_type(ValueType::F64).value_type(), ValueType::F64);
        assert_eq!(Value::default(), Value::I32(0));
    }

    #[test]
    fn typed_accessors_check_tag() {
        assert_eq!(Value::I32(-3).as_i32(), Ok(-3));
        assert_eq!(Value::from_f32(1.5).as_f32(), Ok(1.5));
        let err = Value::I64(1).as_i32().unwrap_err();
        assert_eq!(err.code, codes::TYPE_MISMATCH);
    }

    #[test]
    fn nan_payload_survives() {
        let bits = 0x7FC0_1234;
        let value = Value::from_f32(f32::from_bits(bits));
        assert_eq!(value.to_bits32(), Ok(bits));
    }

    #[test]
    fn bits32_conversion() {
        assert_eq!(Value::from_bits32(ValueType::I32, u32::MAX), Ok(Value::I32(-1)));
        assert!(Value::from_bits32(ValueType::I64, 0).is_err());
        assert!(Value::I64(0).to_bits32().is_err());
    }
}
