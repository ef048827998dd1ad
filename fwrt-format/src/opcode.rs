// FWRT - fwrt-format
// Module: Opcode Tables
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The decodable opcode set.
//!
//! [`Opcode`] enumerates every operation the decoder understands. Single-byte
//! opcodes carry their byte value as discriminant; extended opcodes carry
//! `0xFC00 | sub_opcode`. The byte-to-opcode lookup tables, the name table and
//! the immediate shapes are all built at compile time from one list.

/// Shape of the immediates following an opcode in the binary format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImmediateKind {
    /// No immediates
    None,
    /// One uleb32 index (local, global, function, label)
    Index,
    /// sleb32 constant
    I32,
    /// sleb64 constant
    I64,
    /// Little-endian f32 bits
    F32,
    /// Little-endian f64 bits
    F64,
    /// Block type: empty, a value type or an s33 type index
    Block,
    /// Alignment and offset
    MemArg,
    /// Type index and table index
    CallIndirect,
    /// Label vector and default label
    BrTable,
    /// A reserved zero byte (memory index)
    Reserved,
}

macro_rules! opcodes {
    ($($(#[$attr:meta])* $variant:ident = $code:literal, $name:literal, $imm:ident;)*) => {
        /// A decodable WebAssembly opcode.
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        #[allow(missing_docs)]
        pub enum Opcode {
            $($(#[$attr])* $variant = $code,)*
        }

        impl Opcode {
            /// Every decodable opcode.
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];

            /// Text-format mnemonic.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Opcode::$variant => $name,)*
                }
            }

            /// Immediates this opcode is followed by.
            #[must_use]
            pub const fn immediates(self) -> ImmediateKind {
                match self {
                    $(Opcode::$variant => ImmediateKind::$imm,)*
                }
            }
        }
    };
}

opcodes! {
    Unreachable = 0x00, "unreachable", None;
    #[default]
    Nop = 0x01, "nop", None;
    Block = 0x02, "block", Block;
    Loop = 0x03, "loop", Block;
    If = 0x04, "if", Block;
    Else = 0x05, "else", None;
    End = 0x0B, "end", None;
    Br = 0x0C, "br", Index;
    BrIf = 0x0D, "br_if", Index;
    BrTable = 0x0E, "br_table", BrTable;
    Return = 0x0F, "return", None;
    Call = 0x10, "call", Index;
    CallIndirect = 0x11, "call_indirect", CallIndirect;
    Drop = 0x1A, "drop", None;
    Select = 0x1B, "select", None;
    LocalGet = 0x20, "local.get", Index;
    LocalSet = 0x21, "local.set", Index;
    LocalTee = 0x22, "local.tee", Index;
    GlobalGet = 0x23, "global.get", Index;
    GlobalSet = 0x24, "global.set", Index;
    I32Load = 0x28, "i32.load", MemArg;
    I64Load = 0x29, "i64.load", MemArg;
    F32Load = 0x2A, "f32.load", MemArg;
    F64Load = 0x2B, "f64.load", MemArg;
    I32Load8S = 0x2C, "i32.load8_s", MemArg;
    I32Load8U = 0x2D, "i32.load8_u", MemArg;
    I32Load16S = 0x2E, "i32.load16_s", MemArg;
    I32Load16U = 0x2F, "i32.load16_u", MemArg;
    I64Load8S = 0x30, "i64.load8_s", MemArg;
    I64Load8U = 0x31, "i64.load8_u", MemArg;
    I64Load16S = 0x32, "i64.load16_s", MemArg;
    I64Load16U = 0x33, "i64.load16_u", MemArg;
    I64Load32S = 0x34, "i64.load32_s", MemArg;
    I64Load32U = 0x35, "i64.load32_u", MemArg;
    I32Store = 0x36, "i32.store", MemArg;
    I64Store = 0x37, "i64.store", MemArg;
    F32Store = 0x38, "f32.store", MemArg;
    F64Store = 0x39, "f64.store", MemArg;
    I32Store8 = 0x3A, "i32.store8", MemArg;
    I32Store16 = 0x3B, "i32.store16", MemArg;
    I64Store8 = 0x3C, "i64.store8", MemArg;
    I64Store16 = 0x3D, "i64.store16", MemArg;
    I64Store32 = 0x3E, "i64.store32", MemArg;
    MemorySize = 0x3F, "memory.size", Reserved;
    MemoryGrow = 0x40, "memory.grow", Reserved;
    I32Const = 0x41, "i32.const", I32;
    I64Const = 0x42, "i64.const", I64;
    F32Const = 0x43, "f32.const", F32;
    F64Const = 0x44, "f64.const", F64;
    I32Eqz = 0x45, "i32.eqz", None;
    I32Eq = 0x46, "i32.eq", None;
    I32Ne = 0x47, "i32.ne", None;
    I32LtS = 0x48, "i32.lt_s", None;
    I32LtU = 0x49, "i32.lt_u", None;
    I32GtS = 0x4A, "i32.gt_s", None;
    I32GtU = 0x4B, "i32.gt_u", None;
    I32LeS = 0x4C, "i32.le_s", None;
    I32LeU = 0x4D, "i32.le_u", None;
    I32GeS = 0x4E, "i32.ge_s", None;
    I32GeU = 0x4F, "i32.ge_u", None;
    I64Eqz = 0x50, "i64.eqz", None;
    I64Eq = 0x51, "i64.eq", None;
    I64Ne = 0x52, "i64.ne", None;
    I64LtS = 0x53, "i64.lt_s", None;
    I64LtU = 0x54, "i64.lt_u", None;
    I64GtS = 0x55, "i64.gt_s", None;
    I64GtU = 0x56, "i64.gt_u", None;
    I64LeS = 0x57, "i64.le_s", None;
    I64LeU = 0x58, "i64.le_u", None;
    I64GeS = 0x59, "i64.ge_s", None;
    I64GeU = 0x5A, "i64.ge_u", None;
    F32Eq = 0x5B, "f32.eq", None;
    F32Ne = 0x5C, "f32.ne", None;
    F32Lt = 0x5D, "f32.lt", None;
    F32Gt = 0x5E, "f32.gt", None;
    F32Le = 0x5F, "f32.le", None;
    F32Ge = 0x60, "f32.ge", None;
    F64Eq = 0x61, "f64.eq", None;
    F64Ne = 0x62, "f64.ne", None;
    F64Lt = 0x63, "f64.lt", None;
    F64Gt = 0x64, "f64.gt", None;
    F64Le = 0x65, "f64.le", None;
    F64Ge = 0x66, "f64.ge", None;
    I32Clz = 0x67, "i32.clz", None;
    I32Ctz = 0x68, "i32.ctz", None;
    I32Popcnt = 0x69, "i32.popcnt", None;
    I32Add = 0x6A, "i32.add", None;
    I32Sub = 0x6B, "i32.sub", None;
    I32Mul = 0x6C, "i32.mul", None;
    I32DivS = 0x6D, "i32.div_s", None;
    I32DivU = 0x6E, "i32.div_u", None;
    I32RemS = 0x6F, "i32.rem_s", None;
    I32RemU = 0x70, "i32.rem_u", None;
    I32And = 0x71, "i32.and", None;
    I32Or = 0x72, "i32.or", None;
    I32Xor = 0x73, "i32.xor", None;
    I32Shl = 0x74, "i32.shl", None;
    I32ShrS = 0x75, "i32.shr_s", None;
    I32ShrU = 0x76, "i32.shr_u", None;
    I32Rotl = 0x77, "i32.rotl", None;
    I32Rotr = 0x78, "i32.rotr", None;
    I64Clz = 0x79, "i64.clz", None;
    I64Ctz = 0x7A, "i64.ctz", None;
    I64Popcnt = 0x7B, "i64.popcnt", None;
    I64Add = 0x7C, "i64.add", None;
    I64Sub = 0x7D, "i64.sub", None;
    I64Mul = 0x7E, "i64.mul", None;
    I64DivS = 0x7F, "i64.div_s", None;
    I64DivU = 0x80, "i64.div_u", None;
    I64RemS = 0x81, "i64.rem_s", None;
    I64RemU = 0x82, "i64.rem_u", None;
    I64And = 0x83, "i64.and", None;
    I64Or = 0x84, "i64.or", None;
    I64Xor = 0x85, "i64.xor", None;
    I64Shl = 0x86, "i64.shl", None;
    I64ShrS = 0x87, "i64.shr_s", None;
    I64ShrU = 0x88, "i64.shr_u", None;
    I64Rotl = 0x89, "i64.rotl", None;
    I64Rotr = 0x8A, "i64.rotr", None;
    F32Abs = 0x8B, "f32.abs", None;
    F32Neg = 0x8C, "f32.neg", None;
    F32Ceil = 0x8D, "f32.ceil", None;
    F32Floor = 0x8E, "f32.floor", None;
    F32Trunc = 0x8F, "f32.trunc", None;
    F32Nearest = 0x90, "f32.nearest", None;
    F32Sqrt = 0x91, "f32.sqrt", None;
    F32Add = 0x92, "f32.add", None;
    F32Sub = 0x93, "f32.sub", None;
    F32Mul = 0x94, "f32.mul", None;
    F32Div = 0x95, "f32.div", None;
    F32Min = 0x96, "f32.min", None;
    F32Max = 0x97, "f32.max", None;
    F32Copysign = 0x98, "f32.copysign", None;
    F64Abs = 0x99, "f64.abs", None;
    F64Neg = 0x9A, "f64.neg", None;
    F64Ceil = 0x9B, "f64.ceil", None;
    F64Floor = 0x9C, "f64.floor", None;
    F64Trunc = 0x9D, "f64.trunc", None;
    F64Nearest = 0x9E, "f64.nearest", None;
    F64Sqrt = 0x9F, "f64.sqrt", None;
    F64Add = 0xA0, "f64.add", None;
    F64Sub = 0xA1, "f64.sub", None;
    F64Mul = 0xA2, "f64.mul", None;
    F64Div = 0xA3, "f64.div", None;
    F64Min = 0xA4, "f64.min", None;
    F64Max = 0xA5, "f64.max", None;
    F64Copysign = 0xA6, "f64.copysign", None;
    I32WrapI64 = 0xA7, "i32.wrap_i64", None;
    I32TruncF32S = 0xA8, "i32.trunc_f32_s", None;
    I32TruncF32U = 0xA9, "i32.trunc_f32_u", None;
    I32TruncF64S = 0xAA, "i32.trunc_f64_s", None;
    I32TruncF64U = 0xAB, "i32.trunc_f64_u", None;
    I64ExtendI32S = 0xAC, "i64.extend_i32_s", None;
    I64ExtendI32U = 0xAD, "i64.extend_i32_u", None;
    I64TruncF32S = 0xAE, "i64.trunc_f32_s", None;
    I64TruncF32U = 0xAF, "i64.trunc_f32_u", None;
    I64TruncF64S = 0xB0, "i64.trunc_f64_s", None;
    I64TruncF64U = 0xB1, "i64.trunc_f64_u", None;
    F32ConvertI32S = 0xB2, "f32.convert_i32_s", None;
    F32ConvertI32U = 0xB3, "f32.convert_i32_u", None;
    F32ConvertI64S = 0xB4, "f32.convert_i64_s", None;
    F32ConvertI64U = 0xB5, "f32.convert_i64_u", None;
    F32DemoteF64 = 0xB6, "f32.demote_f64", None;
    F64ConvertI32S = 0xB7, "f64.convert_i32_s", None;
    F64ConvertI32U = 0xB8, "f64.convert_i32_u", None;
    F64ConvertI64S = 0xB9, "f64.convert_i64_s", None;
    F64ConvertI64U = 0xBA, "f64.convert_i64_u", None;
    F64PromoteF32 = 0xBB, "f64.promote_f32", None;
    I32ReinterpretF32 = 0xBC, "i32.reinterpret_f32", None;
    I64ReinterpretF64 = 0xBD, "i64.reinterpret_f64", None;
    F32ReinterpretI32 = 0xBE, "f32.reinterpret_i32", None;
    F64ReinterpretI64 = 0xBF, "f64.reinterpret_i64", None;
    I32Extend8S = 0xC0, "i32.extend8_s", None;
    I32Extend16S = 0xC1, "i32.extend16_s", None;
    I64Extend8S = 0xC2, "i64.extend8_s", None;
    I64Extend16S = 0xC3, "i64.extend16_s", None;
    I64Extend32S = 0xC4, "i64.extend32_s", None;
    I32TruncSatF32S = 0xFC00, "i32.trunc_sat_f32_s", None;
    I32TruncSatF32U = 0xFC01, "i32.trunc_sat_f32_u", None;
    I32TruncSatF64S = 0xFC02, "i32.trunc_sat_f64_s", None;
    I32TruncSatF64U = 0xFC03, "i32.trunc_sat_f64_u", None;
    I64TruncSatF32S = 0xFC04, "i64.trunc_sat_f32_s", None;
    I64TruncSatF32U = 0xFC05, "i64.trunc_sat_f32_u", None;
    I64TruncSatF64S = 0xFC06, "i64.trunc_sat_f64_s", None;
    I64TruncSatF64U = 0xFC07, "i64.trunc_sat_f64_u", None;
}

/// Number of decodable extended sub-opcodes.
pub const EXTENDED_COUNT: usize = 8;

const EXTENDED_BASE: u16 = 0xFC00;

const fn build_primary() -> [Option<Opcode>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < Opcode::ALL.len() {
        let opcode = Opcode::ALL[i];
        if (opcode as u16) < 0x100 {
            table[opcode as usize] = Some(opcode);
        }
        i += 1;
    }
    table
}

const fn build_extended() -> [Option<Opcode>; EXTENDED_COUNT] {
    let mut table = [None; EXTENDED_COUNT];
    let mut i = 0;
    while i < Opcode::ALL.len() {
        let opcode = Opcode::ALL[i];
        if (opcode as u16) >= EXTENDED_BASE {
            table[(opcode as u16 - EXTENDED_BASE) as usize] = Some(opcode);
        }
        i += 1;
    }
    table
}

static PRIMARY: [Option<Opcode>; 256] = build_primary();
static EXTENDED: [Option<Opcode>; EXTENDED_COUNT] = build_extended();

impl Opcode {
    /// Look up a single-byte opcode.
    #[inline]
    #[must_use]
    pub fn from_byte(byte: u8) -> Option<Self> {
        PRIMARY[byte as usize]
    }

    /// Look up an extended opcode by its sub-opcode after the `0xFC` prefix.
    #[inline]
    #[must_use]
    pub fn from_extended(sub_opcode: u32) -> Option<Self> {
        EXTENDED.get(sub_opcode as usize).copied().flatten()
    }

    /// Whether this opcode is encoded behind the `0xFC` prefix.
    #[inline]
    #[must_use]
    pub const fn is_extended(self) -> bool {
        (self as u16) >= EXTENDED_BASE
    }

    /// Single byte of a primary opcode, or the sub-opcode of an extended one.
    #[inline]
    #[must_use]
    pub const fn table_index(self) -> usize {
        ((self as u16) & 0xFF) as usize
    }

    /// Whether this opcode opens a nested scope closed by `end`.
    #[inline]
    #[must_use]
    pub const fn opens_block(self) -> bool {
        matches!(self, Opcode::Block | Opcode::Loop | Opcode::If)
    }
}

impl core::fmt::Display for Opcode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_lookup_matches_discriminant() {
        for &opcode in Opcode::ALL.iter().filter(|op| !op.is_extended()) {
            assert_eq!(Opcode::from_byte(opcode as u8), Some(opcode));
        }
        assert_eq!(Opcode::from_byte(0x41), Some(Opcode::I32Const));
        assert_eq!(Opcode::from_byte(0x06), None);
        assert_eq!(Opcode::from_byte(0xFC), None);
        assert_eq!(Opcode::from_byte(0xFF), None);
    }

    #[test]
    fn extended_lookup() {
        assert_eq!(Opcode::from_extended(0), Some(Opcode::I32TruncSatF32S));
        assert_eq!(Opcode::from_extended(7), Some(Opcode::I64TruncSatF64U));
        assert_eq!(Opcode::from_extended(8), None);
        assert_eq!(Opcode::from_extended(u32::MAX), None);
        assert_eq!(Opcode::I32TruncSatF32U.table_index(), 1);
    }

    #[test]
    fn names_and_shapes() {
        assert_eq!(Opcode::I32Load8U.name(), "i32.load8_u");
        assert_eq!(Opcode::I32Load8U.immediates(), ImmediateKind::MemArg);
        assert_eq!(Opcode::Loop.immediates(), ImmediateKind::Block);
        assert_eq!(Opcode::MemoryGrow.immediates(), ImmediateKind::Reserved);
        assert!(Opcode::If.opens_block());
        assert!(!Opcode::Else.opens_block());
    }
}
