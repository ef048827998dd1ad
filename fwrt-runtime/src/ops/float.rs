// FWRT - fwrt-runtime
// Module: Float Instructions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The `f32` arithmetic and comparison set and `i32`/`f32` conversions.

use fwrt_error::{codes, Error, Result};
use fwrt_format::Instruction;
use fwrt_foundation::Value;

use crate::dispatch::Control;
use crate::vm::VirtualMachine;

const SIGN_BIT: u32 = 0x8000_0000;

macro_rules! compare_f32 {
    ($($name:ident => $op:tt;)*) => {
        $(
            pub(crate) fn $name(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
                let b = vm.pop_f32()?;
                let a = vm.pop_f32()?;
                vm.push_i32(i32::from(a $op b))?;
                Ok(Control::Continue)
            }
        )*
    };
}

macro_rules! binary_f32 {
    ($($name:ident => |$a:ident, $b:ident| $body:expr;)*) => {
        $(
            pub(crate) fn $name(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
                let $b = vm.pop_f32()?;
                let $a = vm.pop_f32()?;
                vm.push_f32($body)?;
                Ok(Control::Continue)
            }
        )*
    };
}

compare_f32! {
    f32_eq => ==;
    f32_ne => !=;
    f32_lt => <;
    f32_gt => >;
    f32_le => <=;
    f32_ge => >=;
}

binary_f32! {
    f32_add => |a, b| a + b;
    f32_sub => |a, b| a - b;
    f32_mul => |a, b| a * b;
    f32_div => |a, b| a / b;
    f32_min => |a, b| wasm_min(a, b);
    f32_max => |a, b| wasm_max(a, b);
}

/// `min` with NaN propagation and `-0 < +0`.
fn wasm_min(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else if a == 0.0 && b == 0.0 {
        if a.is_sign_negative() { a } else { b }
    } else if a < b {
        a
    } else {
        b
    }
}

/// `max` with NaN propagation and `-0 < +0`.
fn wasm_max(a: f32, b: f32) -> f32 {
    if a.is_nan() || b.is_nan() {
        f32::NAN
    } else if a == 0.0 && b == 0.0 {
        if a.is_sign_positive() { a } else { b }
    } else if a > b {
        a
    } else {
        b
    }
}

// abs and neg only touch the sign bit, NaN payloads included.

pub(crate) fn f32_abs(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let bits = vm.pop_f32()?.to_bits();
    vm.push_value(Value::F32(bits & !SIGN_BIT))?;
    Ok(Control::Continue)
}

pub(crate) fn f32_neg(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let bits = vm.pop_f32()?.to_bits();
    vm.push_value(Value::F32(bits ^ SIGN_BIT))?;
    Ok(Control::Continue)
}

const fn invalid_conversion() -> Error {
    Error::trap(codes::INVALID_CONVERSION, "Invalid conversion to integer")
}

const fn integer_overflow() -> Error {
    Error::trap(codes::INTEGER_OVERFLOW, "Integer overflow")
}

pub(crate) fn i32_trunc_f32_s(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let value = vm.pop_f32()?;
    if value.is_nan() {
        return Err(invalid_conversion());
    }
    if !(-2_147_483_648.0..2_147_483_648.0).contains(&value) {
        return Err(integer_overflow());
    }
    vm.push_i32(value as i32)?;
    Ok(Control::Continue)
}

pub(crate) fn i32_trunc_f32_u(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let value = vm.pop_f32()?;
    if value.is_nan() {
        return Err(invalid_conversion());
    }
    if !(value > -1.0 && value < 4_294_967_296.0) {
        return Err(integer_overflow());
    }
    vm.push_u32(value as u32)?;
    Ok(Control::Continue)
}

// `as` saturates and maps NaN to zero.

pub(crate) fn i32_trunc_sat_f32_s(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let value = vm.pop_f32()?;
    vm.push_i32(value as i32)?;
    Ok(Control::Continue)
}

pub(crate) fn i32_trunc_sat_f32_u(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let value = vm.pop_f32()?;
    vm.push_u32(value as u32)?;
    Ok(Control::Continue)
}

pub(crate) fn f32_convert_i32_s(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let value = vm.pop_i32()?;
    vm.push_f32(value as f32)?;
    Ok(Control::Continue)
}

pub(crate) fn f32_convert_i32_u(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let value = vm.pop_u32()?;
    vm.push_f32(value as f32)?;
    Ok(Control::Continue)
}

pub(crate) fn i32_reinterpret_f32(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let bits = vm.pop_f32()?.to_bits();
    vm.push_u32(bits)?;
    Ok(Control::Continue)
}

pub(crate) fn f32_reinterpret_i32(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let bits = vm.pop_u32()?;
    vm.push_value(Value::F32(bits))?;
    Ok(Control::Continue)
}
