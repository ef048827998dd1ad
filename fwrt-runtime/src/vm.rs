// FWRT - fwrt-runtime
// Module: Virtual Machine
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! The virtual machine.
//!
//! A [`VirtualMachine`] executes functions of one shared, read-only
//! [`Module`]. It owns a private copy of the module's globals, borrows the
//! caller's linear-memory buffer and keeps its operand and locals stacks
//! inline. Calls recurse on the host stack, bounded by
//! [`MAX_CALL_DEPTH`].

use core::sync::atomic::Ordering;

use fwrt_error::{codes, kinds, Error, Result};
use fwrt_format::{
    FunctionBinding, FunctionRef, GlobalRef, Instruction, Module, NativeBinding, NativeContext,
};
use fwrt_foundation::limits::{MAX_CALL_DEPTH, MAX_GLOBALS, MAX_LOCALS_STACK, MAX_OPERAND_STACK};
use fwrt_foundation::{StaticVec, Value};
use log::{debug, trace, warn};

use crate::dispatch::{self, Control};
use crate::frame::Frame;
use crate::memory;

const fn invalid_global() -> Error {
    Error::runtime_error(codes::INVALID_GLOBAL_INDEX, "Global index out of range")
}

const fn immutable_global() -> Error {
    Error::runtime_error(codes::IMMUTABLE_GLOBAL, "Cannot set an immutable global")
}

/// One execution instance of a module.
pub struct VirtualMachine<'m> {
    module:   &'m Module<'m>,
    memory:   &'m mut [u8],
    globals:  StaticVec<Value, MAX_GLOBALS>,
    stack:    StaticVec<Value, MAX_OPERAND_STACK>,
    locals:   StaticVec<Value, MAX_LOCALS_STACK>,
    frame:    Frame,
    depth:    usize,
    poisoned: bool,
}

impl<'m> VirtualMachine<'m> {
    /// Create an instance of `module` backed by `buffer`.
    ///
    /// `buffer` must hold at least the module's initial memory size; only that
    /// prefix is used. It is zeroed and the data segments are copied in.
    ///
    /// # Errors
    ///
    /// - `Memory / INSUFFICIENT_MEMORY` if `buffer` is too short
    /// - `Memory / DATA_SEGMENT_OUT_OF_BOUNDS` if a data segment does not fit
    /// - `NotSupported` if the module imports its memory
    pub fn new(module: &'m Module<'m>, buffer: &'m mut [u8]) -> Result<Self> {
        let size = memory::required_size(module)?;
        if buffer.len() < size {
            return Err(Error::memory_error(
                codes::INSUFFICIENT_MEMORY,
                "Memory buffer is smaller than the module's initial memory",
            ));
        }
        let (memory, _) = buffer.split_at_mut(size);
        memory::initialize(memory, module)?;

        let mut globals = StaticVec::new();
        for global in module.globals.iter() {
            globals.push(global.init)?;
        }

        debug!(
            "Created virtual machine: {} bytes of memory, {} globals",
            memory.len(),
            globals.len()
        );

        Ok(Self {
            module,
            memory,
            globals,
            stack: StaticVec::new(),
            locals: StaticVec::new(),
            frame: Frame::default(),
            depth: 0,
            poisoned: false,
        })
    }

    /// The module this instance executes.
    #[must_use]
    pub fn module(&self) -> &'m Module<'m> {
        self.module
    }

    /// Linear memory.
    #[must_use]
    pub fn memory(&self) -> &[u8] {
        &*self.memory
    }

    /// Linear memory, mutably.
    pub fn memory_mut(&mut self) -> &mut [u8] {
        &mut *self.memory
    }

    /// Number of values on the operand stack.
    #[must_use]
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Whether an earlier trap left this instance unusable.
    #[must_use]
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Push a value onto the operand stack.
    pub fn push_value(&mut self, value: Value) -> Result<()> {
        self.stack.push(value).map_err(|_| Error::STACK_OVERFLOW)
    }

    /// Push an `i32`.
    pub fn push_i32(&mut self, value: i32) -> Result<()> {
        self.push_value(Value::I32(value))
    }

    /// Push a `u32` as `i32`.
    pub fn push_u32(&mut self, value: u32) -> Result<()> {
        self.push_value(Value::I32(value as i32))
    }

    /// Push an `i64`.
    pub fn push_i64(&mut self, value: i64) -> Result<()> {
        self.push_value(Value::I64(value))
    }

    /// Push an `f32`.
    pub fn push_f32(&mut self, value: f32) -> Result<()> {
        self.push_value(Value::from_f32(value))
    }

    /// Push an `f64`.
    pub fn push_f64(&mut self, value: f64) -> Result<()> {
        self.push_value(Value::from_f64(value))
    }

    /// Pop a value of any type.
    ///
    /// Values below the running function's stack base belong to its caller
    /// and cannot be popped.
    pub fn pop_value(&mut self) -> Result<Value> {
        if self.stack.len() <= self.frame.stack_base {
            return Err(Error::STACK_UNDERFLOW);
        }
        self.stack.pop().ok_or(Error::STACK_UNDERFLOW)
    }

    /// Pop the top value if `extract` accepts it; a mismatch leaves it in
    /// place.
    fn pop_typed<T>(&mut self, extract: fn(&Value) -> Result<T>) -> Result<T> {
        if self.stack.len() <= self.frame.stack_base {
            return Err(Error::STACK_UNDERFLOW);
        }
        let value = self.stack.last().ok_or(Error::STACK_UNDERFLOW).and_then(extract)?;
        self.stack.pop();
        Ok(value)
    }

    /// Pop an `i32`.
    pub fn pop_i32(&mut self) -> Result<i32> {
        self.pop_typed(Value::as_i32)
    }

    /// Pop an `i32` reinterpreted as unsigned.
    pub fn pop_u32(&mut self) -> Result<u32> {
        self.pop_i32().map(|value| value as u32)
    }

    /// Pop an `i64`.
    pub fn pop_i64(&mut self) -> Result<i64> {
        self.pop_typed(Value::as_i64)
    }

    /// Pop an `f32`.
    pub fn pop_f32(&mut self) -> Result<f32> {
        self.pop_typed(Value::as_f32)
    }

    /// Pop an `f64`.
    pub fn pop_f64(&mut self) -> Result<f64> {
        self.pop_typed(Value::as_f64)
    }

    /// Call a function by index in the function index space.
    ///
    /// Arguments are taken from the operand stack, last parameter on top;
    /// results are left there.
    ///
    /// # Errors
    ///
    /// Any trap raised by the function. Traps, runtime errors and any error
    /// raised once the callee has started poison the instance: every later
    /// call fails with `INVALID_STATE`.
    pub fn call(&mut self, function: u32) -> Result<()> {
        if self.poisoned {
            return Err(Error::runtime_error(
                codes::INVALID_STATE,
                "Virtual machine was poisoned by an earlier trap",
            ));
        }
        let result = self.invoke(function);
        if let Err(error) = result {
            if error.poisons_instance() || self.poisoned {
                warn!("Call to function {function} trapped: {error}");
                self.poisoned = true;
            }
        }
        result
    }

    /// Call the exported function `name`.
    pub fn call_export(&mut self, name: &str) -> Result<()> {
        let function = self.module.find_exported_function(name).ok_or(Error::runtime_error(
            codes::INVALID_FUNCTION_INDEX,
            "No exported function with this name",
        ))?;
        self.call(function)
    }

    /// Run the module's start function, if it has one.
    pub fn run_start(&mut self) -> Result<()> {
        match self.module.start {
            Some(function) => self.call(function),
            None => Ok(()),
        }
    }

    /// Current value of a global.
    pub fn global(&self, index: u32) -> Result<Value> {
        match self.module.resolve_global(index) {
            Some(GlobalRef::Defined(slot)) => {
                self.globals.get(slot).copied().ok_or(invalid_global())
            }
            Some(GlobalRef::Imported { import, ty }) => match self.module.bindings.get(import) {
                Some(NativeBinding::Variable(cell)) => {
                    Value::from_bits32(ty.value_type, cell.load(Ordering::Relaxed))
                }
                _ => Err(kinds::unbound_import("Imported global has no host variable")),
            },
            None => Err(invalid_global()),
        }
    }

    /// Assign a mutable global.
    pub fn set_global(&mut self, index: u32, value: Value) -> Result<()> {
        let module = self.module;
        match module.resolve_global(index) {
            Some(GlobalRef::Defined(slot)) => {
                let ty = module.globals.get(slot).ok_or(invalid_global())?.ty;
                if !ty.mutable {
                    return Err(immutable_global());
                }
                if value.value_type() != ty.value_type {
                    return Err(Error::type_error("Value does not match the global's type"));
                }
                let target = self.globals.get_mut(slot).ok_or(invalid_global())?;
                *target = value;
                Ok(())
            }
            Some(GlobalRef::Imported { import, ty }) => {
                if !ty.mutable {
                    return Err(immutable_global());
                }
                if value.value_type() != ty.value_type {
                    return Err(Error::type_error("Value does not match the global's type"));
                }
                match module.bindings.get(import) {
                    Some(NativeBinding::Variable(cell)) => {
                        cell.store(value.to_bits32()?, Ordering::Relaxed);
                        Ok(())
                    }
                    _ => Err(kinds::unbound_import("Imported global has no host variable")),
                }
            }
            None => Err(invalid_global()),
        }
    }

    pub(crate) fn local(&self, index: u32) -> Result<Value> {
        self.frame
            .local_slot(index)
            .and_then(|slot| self.locals.get(slot).copied())
            .ok_or(Error::runtime_error(codes::INVALID_LOCAL_INDEX, "Local index out of range"))
    }

    pub(crate) fn set_local(&mut self, index: u32, value: Value) -> Result<()> {
        let slot = self
            .frame
            .local_slot(index)
            .and_then(|slot| self.locals.get_mut(slot))
            .ok_or(Error::runtime_error(codes::INVALID_LOCAL_INDEX, "Local index out of range"))?;
        if slot.value_type() != value.value_type() {
            return Err(Error::type_error("Value does not match the local's type"));
        }
        *slot = value;
        Ok(())
    }

    /// Call a function. Only errors raised after the callee has started set
    /// the poisoned flag.
    pub(crate) fn invoke(&mut self, function: u32) -> Result<()> {
        match self.module.resolve_function(function) {
            Some(FunctionRef::Imported { import, .. }) => self.call_native(import),
            Some(FunctionRef::Defined { code, type_index }) => {
                self.call_defined(code, type_index as usize)
            }
            None => Err(Error::runtime_error(
                codes::INVALID_FUNCTION_INDEX,
                "Function index out of range",
            )),
        }
    }

    fn call_native(&mut self, import: usize) -> Result<()> {
        let module = self.module;
        match module.bindings.get(import).copied().unwrap_or_default() {
            NativeBinding::Function(FunctionBinding { callback, inputs, outputs }) => {
                let inputs = inputs as usize;
                let before = self.stack.len();
                if before < self.frame.stack_base + inputs {
                    return Err(Error::STACK_UNDERFLOW);
                }
                trace!("Calling native function for import {import}");
                let outcome = callback.invoke(self).and_then(|()| {
                    if self.stack.len() != before - inputs + outputs as usize {
                        return Err(kinds::native_signature_violation());
                    }
                    Ok(())
                });
                self.poison_on_error(outcome)
            }
            _ => {
                if let Some(entry) = module.imports.get(import) {
                    warn!("Call to unbound import {}.{}", entry.module, entry.field);
                }
                Err(kinds::unbound_import("Imported function has no native binding"))
            }
        }
    }

    fn call_defined(&mut self, code_index: usize, type_index: usize) -> Result<()> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(Error::runtime_error(
                codes::CALL_STACK_EXHAUSTED,
                "Call depth limit reached",
            ));
        }
        let module = self.module;
        let code = module.codes.get(code_index).ok_or(Error::runtime_error(
            codes::INVALID_FUNCTION_INDEX,
            "Function has no code body",
        ))?;
        let ty = module.types.get(type_index).ok_or(Error::runtime_error(
            codes::INVALID_FUNCTION_INDEX,
            "Function type index out of range",
        ))?;

        let params = ty.params.len();
        if self.stack.len() < self.frame.stack_base + params {
            return Err(Error::STACK_UNDERFLOW);
        }
        let stack_base = self.stack.len() - params;
        let arguments = &self.stack[stack_base..];
        let mismatch = arguments
            .iter()
            .zip(ty.params.iter())
            .any(|(value, &expected)| value.value_type() != expected);
        if mismatch {
            return Err(Error::type_error("Argument does not match the callee's signature"));
        }

        let locals_base = self.locals.len();
        let num_locals = params + code.num_locals as usize;
        self.locals
            .ensure_capacity(num_locals)
            .map_err(|_| Error::runtime_stack_overflow("Locals stack exhausted"))?;
        self.locals.extend_from_slice(arguments)?;
        self.stack.truncate(stack_base);
        for group in code.locals.iter() {
            let len = self.locals.len() + group.count as usize;
            self.locals.resize(len, Value::default_for_type(group.value_type))?;
        }

        let caller = self.frame;
        self.frame = Frame { locals_base, num_locals, stack_base };
        self.depth += 1;
        trace!("Entering function body {code_index} at depth {}", self.depth);

        let outcome = module.body(code).and_then(|body| self.execute(body));

        self.depth -= 1;
        self.frame = caller;
        self.locals.truncate(locals_base);
        self.poison_on_error(outcome)?;

        let results = ty.results.len();
        let height = self.stack.len();
        if height < stack_base + results {
            return self.poison_on_error(Err(Error::STACK_UNDERFLOW));
        }
        self.stack.copy_within(height - results..height, stack_base);
        self.stack.truncate(stack_base + results);
        Ok(())
    }

    /// The arguments are already consumed once a callee runs, so any failure
    /// from that point leaves the stacks unusable.
    fn poison_on_error(&mut self, outcome: Result<()>) -> Result<()> {
        if outcome.is_err() {
            self.poisoned = true;
        }
        outcome
    }

    /// Run a body until it returns or runs past its last instruction.
    fn execute(&mut self, body: &[Instruction]) -> Result<()> {
        for instruction in body {
            let Some(handler) = dispatch::handler_for(instruction.opcode) else {
                warn!("No handler for opcode {}", instruction.opcode.name());
                return Err(kinds::unsupported_opcode());
            };
            if handler(self, instruction)? == Control::Return {
                break;
            }
        }
        Ok(())
    }
}

impl NativeContext for VirtualMachine<'_> {
    fn push_value(&mut self, value: Value) -> Result<()> {
        VirtualMachine::push_value(self, value)
    }

    fn pop_value(&mut self) -> Result<Value> {
        VirtualMachine::pop_value(self)
    }

    fn memory(&self) -> &[u8] {
        &*self.memory
    }

    fn memory_mut(&mut self) -> &mut [u8] {
        &mut *self.memory
    }
}

impl core::fmt::Debug for VirtualMachine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualMachine")
            .field("memory_len", &self.memory.len())
            .field("stack_depth", &self.stack.len())
            .field("call_depth", &self.depth)
            .field("poisoned", &self.poisoned)
            .finish()
    }
}
