// FWRT - fwrt-runtime
// Module: Memory Instructions
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Loads, stores and memory size queries.
//!
//! Memory is fixed at its initial size, so `memory.grow` always fails.

use fwrt_error::Result;
use fwrt_format::Instruction;
use fwrt_foundation::limits::PAGE_SIZE;

use crate::dispatch::Control;
use crate::memory::{load, store};
use crate::vm::VirtualMachine;

/// Pop the address operand and read `W` bytes.
fn load_bytes<const W: usize>(
    vm: &mut VirtualMachine<'_>,
    instruction: &Instruction,
) -> Result<[u8; W]> {
    let offset = instruction.memory_offset()?;
    let address = vm.pop_u32()?;
    load::<W>(vm.memory(), address, offset)
}

/// Pop the address operand and write `bytes`; the value was popped already.
fn store_bytes<const W: usize>(
    vm: &mut VirtualMachine<'_>,
    instruction: &Instruction,
    bytes: [u8; W],
) -> Result<Control> {
    let offset = instruction.memory_offset()?;
    let address = vm.pop_u32()?;
    store(vm.memory_mut(), address, offset, bytes)?;
    Ok(Control::Continue)
}

pub(crate) fn i32_load(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let bytes = load_bytes::<4>(vm, instruction)?;
    vm.push_i32(i32::from_le_bytes(bytes))?;
    Ok(Control::Continue)
}

pub(crate) fn i32_load8_s(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let bytes = load_bytes::<1>(vm, instruction)?;
    vm.push_i32(i32::from(i8::from_le_bytes(bytes)))?;
    Ok(Control::Continue)
}

pub(crate) fn i32_load8_u(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let bytes = load_bytes::<1>(vm, instruction)?;
    vm.push_i32(i32::from(u8::from_le_bytes(bytes)))?;
    Ok(Control::Continue)
}

pub(crate) fn i32_load16_s(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let bytes = load_bytes::<2>(vm, instruction)?;
    vm.push_i32(i32::from(i16::from_le_bytes(bytes)))?;
    Ok(Control::Continue)
}

pub(crate) fn i32_load16_u(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let bytes = load_bytes::<2>(vm, instruction)?;
    vm.push_i32(i32::from(u16::from_le_bytes(bytes)))?;
    Ok(Control::Continue)
}

pub(crate) fn f32_load(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let bytes = load_bytes::<4>(vm, instruction)?;
    vm.push_f32(f32::from_le_bytes(bytes))?;
    Ok(Control::Continue)
}

pub(crate) fn i32_store(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_i32()?;
    store_bytes(vm, instruction, value.to_le_bytes())
}

pub(crate) fn i32_store8(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_i32()?;
    store_bytes(vm, instruction, (value as u8).to_le_bytes())
}

pub(crate) fn i32_store16(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_i32()?;
    store_bytes(vm, instruction, (value as u16).to_le_bytes())
}

pub(crate) fn f32_store(vm: &mut VirtualMachine<'_>, instruction: &Instruction) -> Result<Control> {
    let value = vm.pop_f32()?;
    store_bytes(vm, instruction, value.to_le_bytes())
}

pub(crate) fn memory_size(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    let pages = vm.memory().len() / PAGE_SIZE;
    vm.push_u32(pages as u32)?;
    Ok(Control::Continue)
}

pub(crate) fn memory_grow(vm: &mut VirtualMachine<'_>, _: &Instruction) -> Result<Control> {
    vm.pop_u32()?;
    vm.push_i32(-1)?;
    Ok(Control::Continue)
}
