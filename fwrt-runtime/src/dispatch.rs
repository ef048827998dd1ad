// FWRT - fwrt-runtime
// Module: Opcode Dispatch Tables
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Static opcode dispatch.
//!
//! Handlers are looked up in two tables built at compile time: [`PRIMARY`],
//! indexed by the opcode byte, and [`EXTENDED`], indexed by the sub-opcode
//! that follows the `0xFC` prefix. An empty slot means the opcode decodes but
//! does not execute.

use fwrt_error::Result;
use fwrt_format::opcode::EXTENDED_COUNT;
use fwrt_format::{Instruction, Opcode};

use crate::ops::{control, float, memory, numeric, variable};
use crate::vm::VirtualMachine;

/// What the interpreter loop does after a handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Fetch the next instruction
    Continue,
    /// Leave the current function
    Return,
}

/// An opcode implementation.
pub type Handler = fn(&mut VirtualMachine<'_>, &Instruction) -> Result<Control>;

macro_rules! register {
    ($table:ident; $($opcode:ident => $handler:path,)*) => {
        $($table[Opcode::$opcode.table_index()] = Some($handler as Handler);)*
    };
}

const fn build_primary() -> [Option<Handler>; 256] {
    let mut table: [Option<Handler>; 256] = [None; 256];
    register! { table;
        Unreachable => control::unreachable,
        Nop => control::nop,
        Block => control::nop,
        End => control::nop,
        Return => control::return_,
        Call => control::call,
        Drop => control::drop,
        Select => control::select,

        LocalGet => variable::local_get,
        LocalSet => variable::local_set,
        LocalTee => variable::local_tee,
        GlobalGet => variable::global_get,
        GlobalSet => variable::global_set,

        I32Load => memory::i32_load,
        I32Load8S => memory::i32_load8_s,
        I32Load8U => memory::i32_load8_u,
        I32Load16S => memory::i32_load16_s,
        I32Load16U => memory::i32_load16_u,
        I32Store => memory::i32_store,
        I32Store8 => memory::i32_store8,
        I32Store16 => memory::i32_store16,
        F32Load => memory::f32_load,
        F32Store => memory::f32_store,
        MemorySize => memory::memory_size,
        MemoryGrow => memory::memory_grow,

        I32Const => numeric::constant,
        I64Const => numeric::constant,
        F32Const => numeric::constant,
        F64Const => numeric::constant,

        I32Eqz => numeric::i32_eqz,
        I32Eq => numeric::i32_eq,
        I32Ne => numeric::i32_ne,
        I32LtS => numeric::i32_lt_s,
        I32LtU => numeric::i32_lt_u,
        I32GtS => numeric::i32_gt_s,
        I32GtU => numeric::i32_gt_u,
        I32LeS => numeric::i32_le_s,
        I32LeU => numeric::i32_le_u,
        I32GeS => numeric::i32_ge_s,
        I32GeU => numeric::i32_ge_u,
        I32Clz => numeric::i32_clz,
        I32Ctz => numeric::i32_ctz,
        I32Popcnt => numeric::i32_popcnt,
        I32Add => numeric::i32_add,
        I32Sub => numeric::i32_sub,
        I32Mul => numeric::i32_mul,
        I32DivS => numeric::i32_div_s,
        I32DivU => numeric::i32_div_u,
        I32RemS => numeric::i32_rem_s,
        I32RemU => numeric::i32_rem_u,
        I32And => numeric::i32_and,
        I32Or => numeric::i32_or,
        I32Xor => numeric::i32_xor,
        I32Shl => numeric::i32_shl,
        I32ShrS => numeric::i32_shr_s,
        I32ShrU => numeric::i32_shr_u,
        I32Rotl => numeric::i32_rotl,
        I32Rotr => numeric::i32_rotr,

        F32Eq => float::f32_eq,
        F32Ne => float::f32_ne,
        F32Lt => float::f32_lt,
        F32Gt => float::f32_gt,
        F32Le => float::f32_le,
        F32Ge => float::f32_ge,
        F32Abs => float::f32_abs,
        F32Neg => float::f32_neg,
        F32Add => float::f32_add,
        F32Sub => float::f32_sub,
        F32Mul => float::f32_mul,
        F32Div => float::f32_div,
        F32Min => float::f32_min,
        F32Max => float::f32_max,
        I32TruncF32S => float::i32_trunc_f32_s,
        I32TruncF32U => float::i32_trunc_f32_u,
        F32ConvertI32S => float::f32_convert_i32_s,
        F32ConvertI32U => float::f32_convert_i32_u,
        I32ReinterpretF32 => float::i32_reinterpret_f32,
        F32ReinterpretI32 => float::f32_reinterpret_i32,
    }
    table
}

const fn build_extended() -> [Option<Handler>; EXTENDED_COUNT] {
    let mut table: [Option<Handler>; EXTENDED_COUNT] = [None; EXTENDED_COUNT];
    register! { table;
        I32TruncSatF32S => float::i32_trunc_sat_f32_s,
        I32TruncSatF32U => float::i32_trunc_sat_f32_u,
    }
    table
}

/// Handlers of single-byte opcodes.
pub static PRIMARY: [Option<Handler>; 256] = build_primary();

/// Handlers of `0xFC`-prefixed opcodes.
pub static EXTENDED: [Option<Handler>; EXTENDED_COUNT] = build_extended();

/// The handler of `opcode`, if it is executable.
#[inline]
#[must_use]
pub fn handler_for(opcode: Opcode) -> Option<Handler> {
    let table: &[Option<Handler>] = if opcode.is_extended() { &EXTENDED } else { &PRIMARY };
    table.get(opcode.table_index()).copied().flatten()
}
