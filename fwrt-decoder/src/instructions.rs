// FWRT - fwrt-decoder
// Module: Instruction Decoding
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Expression decoding.
//!
//! Function bodies are decoded into the module's shared instruction pool.
//! Every opcode of the decodable set is parsed structurally, including the
//! ones the interpreter does not execute, so byte accounting stays exact.
//!
//! Structured instructions (`block`, `loop`, `if`) are tracked on a bounded
//! stack. When the matching `end` is reached, the opening instruction's
//! second immediate is patched with the number of instructions inside it.

use fwrt_error::{codes, kinds, Error, Result};
use fwrt_format::{binary, BlockType, Immediate, ImmediateKind, Instruction, Opcode};
use fwrt_foundation::{limits::MAX_BLOCK_DEPTH, ByteCursor, StaticVec, Value, ValueType};

/// Decode one opcode, including the `0xFC` extended prefix.
pub fn read_opcode(cursor: &mut ByteCursor<'_>) -> Result<Opcode> {
    let byte = cursor.parse_u8()?;
    let opcode = if byte == binary::EXTENDED_PREFIX {
        Opcode::from_extended(cursor.parse_uleb32()?)
    } else {
        Opcode::from_byte(byte)
    };
    opcode.ok_or(kinds::unknown_opcode("Unknown opcode"))
}

fn read_block_type(cursor: &mut ByteCursor<'_>) -> Result<BlockType> {
    match cursor.peek_u8() {
        Some(binary::BLOCK_TYPE_EMPTY) => {
            cursor.skip(1)?;
            Ok(BlockType::Empty)
        }
        Some(byte @ (binary::I32_TYPE | binary::I64_TYPE | binary::F32_TYPE | binary::F64_TYPE)) => {
            cursor.skip(1)?;
            ValueType::from_binary(byte).map(BlockType::Value)
        }
        _ => {
            let index = cursor.parse_sleb33()?;
            u32::try_from(index).map(BlockType::TypeIndex).map_err(|_| {
                Error::parse_error(codes::INVALID_BLOCK_TYPE, "Invalid block type")
            })
        }
    }
}

/// Decode the immediates that follow `opcode`.
pub fn read_immediates(
    cursor: &mut ByteCursor<'_>,
    opcode: Opcode,
) -> Result<(Immediate, Immediate)> {
    let immediates = match opcode.immediates() {
        ImmediateKind::None => (Immediate::None, Immediate::None),
        ImmediateKind::Index => (Immediate::U32(cursor.parse_uleb32()?), Immediate::None),
        ImmediateKind::I32 => (Immediate::I32(cursor.parse_sleb32()?), Immediate::None),
        ImmediateKind::I64 => (Immediate::I64(cursor.parse_sleb64()?), Immediate::None),
        ImmediateKind::F32 => (Immediate::F32(cursor.parse_u32_le()?), Immediate::None),
        ImmediateKind::F64 => (Immediate::F64(cursor.parse_u64_le()?), Immediate::None),
        // Patched with the block length once the matching `end` is decoded.
        ImmediateKind::Block => (Immediate::Block(read_block_type(cursor)?), Immediate::U32(0)),
        ImmediateKind::MemArg => {
            let align = cursor.parse_uleb32()?;
            let offset = cursor.parse_uleb32()?;
            (Immediate::U32(align), Immediate::U32(offset))
        }
        ImmediateKind::CallIndirect => {
            let type_index = cursor.parse_uleb32()?;
            let table_index = cursor.parse_uleb32()?;
            (Immediate::U32(type_index), Immediate::U32(table_index))
        }
        ImmediateKind::BrTable => {
            let count = cursor.parse_uleb32()?;
            for _ in 0..count {
                cursor.parse_uleb32()?;
            }
            let default = cursor.parse_uleb32()?;
            (Immediate::U32(count), Immediate::U32(default))
        }
        ImmediateKind::Reserved => {
            if cursor.parse_u8()? != 0 {
                return Err(Error::parse_error(
                    codes::INVALID_RESERVED_BYTE,
                    "Reserved memory index byte must be zero",
                ));
            }
            (Immediate::None, Immediate::None)
        }
    };
    Ok(immediates)
}

/// Decode a function body expression into `pool`.
///
/// Reads instructions until the `end` that closes the function scope, which
/// is stored as the last instruction. Returns the index of the first
/// instruction and the number of instructions decoded.
pub fn decode_expression<const N: usize>(
    cursor: &mut ByteCursor<'_>,
    pool: &mut StaticVec<Instruction, N>,
) -> Result<(usize, usize)> {
    let start = pool.len();
    let mut open_blocks: StaticVec<usize, MAX_BLOCK_DEPTH> = StaticVec::new();

    loop {
        let opcode = read_opcode(cursor)?;
        let (a, b) = read_immediates(cursor, opcode)?;
        let index = pool.len();
        pool.push(Instruction::new(opcode, a, b))?;

        if opcode.opens_block() {
            open_blocks.push(index).map_err(|_| kinds::block_depth_exceeded())?;
        } else if opcode == Opcode::End {
            match open_blocks.pop() {
                Some(opener) => {
                    let inner = (index - opener - 1) as u32;
                    pool[opener].b = Immediate::U32(inner);
                }
                None => return Ok((start, pool.len() - start)),
            }
        }
    }
}

/// Decode a constant initializer expression of type `expected`.
///
/// Only a single `i32`/`i64`/`f32`/`f64.const` followed by `end` is accepted.
pub fn decode_const_expr(cursor: &mut ByteCursor<'_>, expected: ValueType) -> Result<Value> {
    let value = match cursor.parse_u8()? {
        binary::I32_CONST => Value::I32(cursor.parse_sleb32()?),
        binary::I64_CONST => Value::I64(cursor.parse_sleb64()?),
        binary::F32_CONST => Value::F32(cursor.parse_u32_le()?),
        binary::F64_CONST => Value::F64(cursor.parse_u64_le()?),
        _ => {
            return Err(Error::parse_error(
                codes::INVALID_CONST_EXPR,
                "Constant expression must be a single constant",
            ))
        }
    };
    if cursor.parse_u8()? != binary::END {
        return Err(Error::parse_error(
            codes::INVALID_CONST_EXPR,
            "Constant expression is not terminated by end",
        ));
    }
    if value.value_type() != expected {
        return Err(Error::parse_error(
            codes::INVALID_CONST_EXPR,
            "Constant expression type does not match",
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(bytes: &[u8]) -> Result<StaticVec<Instruction, 64>> {
        let mut pool = StaticVec::new();
        let mut cursor = ByteCursor::new(bytes);
        decode_expression(&mut cursor, &mut pool)?;
        assert!(cursor.is_empty());
        Ok(pool)
    }

    #[test]
    fn const_and_end() -> Result<()> {
        let pool = decode(&[0x41, 0x2A, 0x0B])?;
        assert_eq!(
            pool.as_slice(),
            &[
                Instruction::new(Opcode::I32Const, Immediate::I32(42), Immediate::None),
                Instruction::simple(Opcode::End),
            ]
        );
        Ok(())
    }

    #[test]
    fn nested_blocks_are_patched() -> Result<()> {
        // block
        //   nop
        //   block (result i32)
        //     i32.const 1
        //   end
        //   drop
        // end
        // end
        let pool = decode(&[
            0x02, 0x40, 0x01, 0x02, 0x7F, 0x41, 0x01, 0x0B, 0x1A, 0x0B, 0x0B,
        ])?;
        assert_eq!(pool.len(), 8);
        assert_eq!(pool[0].opcode, Opcode::Block);
        assert_eq!(pool[0].block_len(), Ok(5));
        assert_eq!(pool[2].a, Immediate::Block(BlockType::Value(ValueType::I32)));
        assert_eq!(pool[2].block_len(), Ok(1));
        assert_eq!(pool[7].opcode, Opcode::End);
        Ok(())
    }

    #[test]
    fn stops_at_function_end() -> Result<()> {
        let mut pool = StaticVec::<Instruction, 8>::new();
        let bytes = [0x01, 0x0B, 0xFF];
        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(decode_expression(&mut cursor, &mut pool)?, (0, 2));
        assert_eq!(cursor.remaining(), 1);
        Ok(())
    }

    #[test]
    fn structural_immediates() -> Result<()> {
        let pool = decode(&[
            0x28, 0x02, 0x10, // i32.load align=2 offset=16
            0x0E, 0x02, 0x00, 0x01, 0x00, // br_table 0 1 0
            0x11, 0x03, 0x00, // call_indirect type 3
            0x3F, 0x00, // memory.size
            0x43, 0x00, 0x00, 0x80, 0x3F, // f32.const 1.0
            0xFC, 0x01, // i32.trunc_sat_f32_u
            0x0B,
        ])?;
        assert_eq!(pool[0].memory_offset(), Ok(16));
        assert_eq!((pool[1].a, pool[1].b), (Immediate::U32(2), Immediate::U32(0)));
        assert_eq!(pool[2].a, Immediate::U32(3));
        assert_eq!(pool[3].opcode, Opcode::MemorySize);
        assert_eq!(pool[4].a, Immediate::F32(1.0f32.to_bits()));
        assert_eq!(pool[5].opcode, Opcode::I32TruncSatF32U);
        Ok(())
    }

    #[test]
    fn unknown_opcodes_fail() {
        assert_eq!(decode(&[0x06, 0x0B]).unwrap_err().code, codes::UNKNOWN_OPCODE);
        assert_eq!(decode(&[0xFC, 0x08, 0x0B]).unwrap_err().code, codes::UNKNOWN_OPCODE);
        assert_eq!(decode(&[0xFD, 0x00, 0x0B]).unwrap_err().code, codes::UNKNOWN_OPCODE);
    }

    #[test]
    fn memory_size_reserved_byte() {
        let err = decode(&[0x3F, 0x01, 0x0B]).unwrap_err();
        assert_eq!(err.code, codes::INVALID_RESERVED_BYTE);
    }

    #[test]
    fn unterminated_body() {
        assert_eq!(decode(&[0x02, 0x40, 0x0B]).unwrap_err(), Error::UNEXPECTED_END);
    }

    #[test]
    fn block_depth_is_bounded() {
        let mut bytes = Vec::new();
        for _ in 0..=MAX_BLOCK_DEPTH {
            bytes.extend_from_slice(&[0x02, 0x40]);
        }
        let mut pool = StaticVec::<Instruction, 128>::new();
        let err = decode_expression(&mut ByteCursor::new(&bytes), &mut pool).unwrap_err();
        assert_eq!(err.code, codes::BLOCK_DEPTH_EXCEEDED);
    }

    #[test]
    fn const_expressions() {
        let mut cursor = ByteCursor::new(&[0x41, 0x7F, 0x0B]);
        assert_eq!(decode_const_expr(&mut cursor, ValueType::I32), Ok(Value::I32(-1)));

        let mut cursor = ByteCursor::new(&[0x41, 0x01, 0x0B]);
        assert!(decode_const_expr(&mut cursor, ValueType::I64).is_err());

        let mut cursor = ByteCursor::new(&[0x23, 0x00, 0x0B]);
        let err = decode_const_expr(&mut cursor, ValueType::I32).unwrap_err();
        assert_eq!(err.code, codes::INVALID_CONST_EXPR);

        let mut cursor = ByteCursor::new(&[0x42, 0x01, 0x01]);
        assert!(decode_const_expr(&mut cursor, ValueType::I64).is_err());
    }
}
