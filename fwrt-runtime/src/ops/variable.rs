// FWRT - fwrt-runtime
// Module: Variable Instructions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

use fwrt_error::Result;
use fwrt_format::Instruction;

use crate::dispatch::Control;
use crate::vm::VirtualMachine;

pub(crate) fn local_get(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.local(instruction.index()?)?;
    vm.push_value(value)?;
    Ok(Control::Continue)
}

pub(crate) fn local_set(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_value()?;
    vm.set_local(instruction.index()?, value)?;
    Ok(Control::Continue)
}

pub(crate) fn local_tee(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_value()?;
    vm.set_local(instruction.index()?, value)?;
    vm.push_value(value)?;
    Ok(Control::Continue)
}

pub(crate) fn global_get(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.global(instruction.index()?)?;
    vm.push_value(value)?;
    Ok(Control::Continue)
}

pub(crate) fn global_set(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_value()?;
    vm.set_global(instruction.index()?, value)?;
    Ok(Control::Continue)
}
