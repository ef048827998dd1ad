// FWRT - fwrt-runtime
// Module: Integer Instructions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Constants and the `i32` comparison and arithmetic set.
//!
//! Arithmetic wraps. Division traps on a zero divisor and signed division
//! additionally on `i32::MIN / -1`. Shift and rotate counts are taken
//! modulo 32.

use fwrt_error::{codes, Error, Result};
use fwrt_format::{Immediate, Instruction};
use fwrt_foundation::Value;

use crate::dispatch::Control;
use crate::vm::VirtualMachine;

const fn divide_by_zero() -> Error {
    Error::trap(codes::INTEGER_DIVIDE_BY_ZERO, "Integer divide by zero")
}

/// `i32.const`, `i64.const`, `f32.const` and `f64.const`.
pub(crate) fn constant(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = match instruction.a {
        Immediate::I32(value) => Value::I32(value),
        Immediate::I64(value) => Value::I64(value),
        Immediate::F32(bits) => Value::F32(bits),
        Immediate::F64(bits) => Value::F64(bits),
        _ => {
            return Err(Error::runtime_error(
                codes::INVALID_STATE,
                "Constant instruction without a constant immediate",
            ))
        }
    };
    vm.push_value(value)?;
    Ok(Control::Continue)
}

macro_rules! unary_i32 {
    ($($name:ident => |$x:ident| $body:expr;)*) => {
        $(
            pub(crate) fn $name(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
                let $x = vm.pop_i32()?;
                vm.push_i32($body)?;
                Ok(Control::Continue)
            }
        )*
    };
}

macro_rules! binary_i32 {
    ($($name:ident => |$a:ident, $b:ident| $body:expr;)*) => {
        $(
            pub(crate) fn $name(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
                let $b = vm.pop_i32()?;
                let $a = vm.pop_i32()?;
                vm.push_i32($body)?;
                Ok(Control::Continue)
            }
        )*
    };
}

unary_i32! {
    i32_eqz => |x| i32::from(x == 0);
    i32_clz => |x| x.leading_zeros() as i32;
    i32_ctz => |x| x.trailing_zeros() as i32;
    i32_popcnt => |x| x.count_ones() as i32;
}

binary_i32! {
    i32_eq => |a, b| i32::from(a == b);
    i32_ne => |a, b| i32::from(a != b);
    i32_lt_s => |a, b| i32::from(a < b);
    i32_lt_u => |a, b| i32::from((a as u32) < (b as u32));
    i32_gt_s => |a, b| i32::from(a > b);
    i32_gt_u => |a, b| i32::from((a as u32) > (b as u32));
    i32_le_s => |a, b| i32::from(a <= b);
    i32_le_u => |a, b| i32::from((a as u32) <= (b as u32));
    i32_ge_s => |a, b| i32::from(a >= b);
    i32_ge_u => |a, b| i32::from((a as u32) >= (b as u32));

    i32_add => |a, b| a.wrapping_add(b);
    i32_sub => |a, b| a.wrapping_sub(b);
    i32_mul => |a, b| a.wrapping_mul(b);
    i32_and => |a, b| a & b;
    i32_or => |a, b| a | b;
    i32_xor => |a, b| a ^ b;
    i32_shl => |a, b| a.wrapping_shl(b as u32);
    i32_shr_s => |a, b| a.wrapping_shr(b as u32);
    i32_shr_u => |a, b| (a as u32).wrapping_shr(b as u32) as i32;
    i32_rotl => |a, b| a.rotate_left(b as u32 % 32);
    i32_rotr => |a, b| a.rotate_right(b as u32 % 32);
}

pub(crate) fn i32_div_s(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let divisor = vm.pop_i32()?;
    let dividend = vm.pop_i32()?;
    if divisor == 0 {
        return Err(divide_by_zero());
    }
    let quotient = dividend
        .checked_div(divisor)
        .ok_or(Error::trap(codes::INTEGER_OVERFLOW, "Integer overflow"))?;
    vm.push_i32(quotient)?;
    Ok(Control::Continue)
}

pub(crate) fn i32_div_u(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let divisor = vm.pop_u32()?;
    let dividend = vm.pop_u32()?;
    let quotient = dividend.checked_div(divisor).ok_or(divide_by_zero())?;
    vm.push_u32(quotient)?;
    Ok(Control::Continue)
}

pub(crate) fn i32_rem_s(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let divisor = vm.pop_i32()?;
    let dividend = vm.pop_i32()?;
    if divisor == 0 {
        return Err(divide_by_zero());
    }
    // i32::MIN % -1 is 0.
    vm.push_i32(dividend.wrapping_rem(divisor))?;
    Ok(Control::Continue)
}

pub(crate) fn i32_rem_u(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let divisor = vm.pop_u32()?;
    let dividend = vm.pop_u32()?;
    let remainder = dividend.checked_rem(divisor).ok_or(divide_by_zero())?;
    vm.push_u32(remainder)?;
    Ok(Control::Continue)
}
