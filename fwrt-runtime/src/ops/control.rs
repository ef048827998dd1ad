// FWRT - fwrt-runtime
// Module: Control Instructions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Control and parametric instructions.
//!
//! Blocks execute sequentially: `block` and `end` are no-ops and branches are
//! not executable.

use fwrt_error::{codes, Error, Result};
use fwrt_format::Instruction;

use crate::dispatch::Control;
use crate::vm::VirtualMachine;

pub(crate) fn unreachable(_: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    Err(Error::trap(codes::UNREACHABLE, "unreachable executed"))
}

pub(crate) fn nop(_: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    Ok(Control::Continue)
}

pub(crate) fn return_(_: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    Ok(Control::Return)
}

pub(crate) fn call(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    vm.invoke(instruction.index()?)?;
    Ok(Control::Continue)
}

pub(crate) fn drop(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    vm.pop_value()?;
    Ok(Control::Continue)
}

pub(crate) fn select(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let condition = vm.pop_i32()?;
    let second = vm.pop_value()?;
    let first = vm.pop_value()?;
    if first.value_type() != second.value_type() {
        return Err(Error::type_error("select operands differ in type"));
    }
    vm.push_value(if condition != 0 { first } else { second })?;
    Ok(Control::Continue)
}
