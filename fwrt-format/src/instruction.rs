// FWRT - fwrt-format
// Module: Decoded Instructions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Decoded instruction representation.
//!
//! An [`Instruction`] is an opcode plus up to two immediates. Immediates are
//! laid out per [`ImmediateKind`](crate::opcode::ImmediateKind):
//!
//! | kind           | `a`                    | `b`                         |
//! |----------------|------------------------|-----------------------------|
//! | `Index`        | `U32(index)`           | `None`                      |
//! | `I32`..`F64`   | the constant           | `None`                      |
//! | `Block`        | `Block(block_type)`    | `U32(instructions inside)`  |
//! | `MemArg`       | `U32(align)`           | `U32(offset)`               |
//! | `CallIndirect` | `U32(type_index)`      | `U32(table_index)`          |
//! | `BrTable`      | `U32(label_count)`     | `U32(default_label)`        |
//! | `Reserved`     | `None`                 | `None`                      |

use fwrt_error::{codes, Error, Result};
use fwrt_foundation::ValueType;

use crate::opcode::Opcode;

/// Type of a structured block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockType {
    /// No parameters, no results
    #[default]
    Empty,
    /// No parameters, one result
    Value(ValueType),
    /// Signature taken from the type section
    TypeIndex(u32),
}

/// One decoded immediate operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Immediate {
    /// Absent
    #[default]
    None,
    /// Unsigned index, count or memarg field
    U32(u32),
    /// `i32.const` value
    I32(i32),
    /// `i64.const` value
    I64(i64),
    /// `f32.const` bits
    F32(u32),
    /// `f64.const` bits
    F64(u64),
    /// Block type of `block`/`loop`/`if`
    Block(BlockType),
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Instruction {
    /// Operation
    pub opcode: Opcode,
    /// First immediate
    pub a: Immediate,
    /// Second immediate
    pub b: Immediate,
}

const fn malformed_immediate() -> Error {
    Error::runtime_error(codes::INVALID_STATE, "Instruction immediate has unexpected shape")
}

impl Instruction {
    /// Create an instruction.
    #[must_use]
    pub const fn new(opcode: Opcode, a: Immediate, b: Immediate) -> Self {
        Self { opcode, a, b }
    }

    /// Create an instruction without immediates.
    #[must_use]
    pub const fn simple(opcode: Opcode) -> Self {
        Self::new(opcode, Immediate::None, Immediate::None)
    }

    /// The index immediate of `local.*`, `global.*`, `call` and branches.
    pub fn index(&self) -> Result<u32> {
        match self.a {
            Immediate::U32(index) => Ok(index),
            _ => Err(malformed_immediate()),
        }
    }

    /// The static offset of a memory access.
    pub fn memory_offset(&self) -> Result<u32> {
        match self.b {
            Immediate::U32(offset) => Ok(offset),
            _ => Err(malformed_immediate()),
        }
    }

    /// The number of instructions inside a `block`/`loop`/`if`, excluding
    /// its closing `end`.
    pub fn block_len(&self) -> Result<u32> {
        match (self.a, self.b) {
            (Immediate::Block(_), Immediate::U32(len)) => Ok(len),
            _ => Err(malformed_immediate()),
        }
    }
}
