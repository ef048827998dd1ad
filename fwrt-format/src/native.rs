// FWRT - fwrt-format
// Module: Native Bindings
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Host implementations of module imports.
//!
//! Every import of a [`Module`](crate::module::Module) owns one
//! [`NativeBinding`] slot. A slot starts out [`NativeBinding::Unbound`] and is
//! filled by the host before execution: imported 32-bit globals are bound to
//! an [`AtomicU32`] cell, imported functions to a [`NativeFunction`].

use core::fmt;
use core::sync::atomic::AtomicU32;

use fwrt_error::Result;
use fwrt_foundation::Value;

/// Execution context handed to a native function.
///
/// The callee pops its arguments (last parameter first) and pushes its
/// results through this interface. It may also access the caller's linear
/// memory.
pub trait NativeContext {
    /// Push a value onto the operand stack.
    fn push_value(&mut self, value: Value) -> Result<()>;

    /// Pop a value from the operand stack.
    fn pop_value(&mut self) -> Result<Value>;

    /// The instance's linear memory.
    fn memory(&self) -> &[u8];

    /// The instance's linear memory, mutably.
    fn memory_mut(&mut self) -> &mut [u8];
}

impl dyn NativeContext + '_ {
    /// Pop an `i32` argument.
    pub fn pop_i32(&mut self) -> Result<i32> {
        self.pop_value()?.as_i32()
    }

    /// Pop an `i32` argument reinterpreted as unsigned.
    pub fn pop_u32(&mut self) -> Result<u32> {
        self.pop_i32().map(|v| v as u32)
    }

    /// Pop an `f32` argument.
    pub fn pop_f32(&mut self) -> Result<f32> {
        self.pop_value()?.as_f32()
    }

    /// Push an `i32` result.
    pub fn push_i32(&mut self, value: i32) -> Result<()> {
        self.push_value(Value::I32(value))
    }

    /// Push a `u32` result as `i32`.
    pub fn push_u32(&mut self, value: u32) -> Result<()> {
        self.push_value(Value::I32(value as i32))
    }

    /// Push an `f32` result.
    pub fn push_f32(&mut self, value: f32) -> Result<()> {
        self.push_value(Value::from_f32(value))
    }
}

/// A host function callable from WebAssembly.
pub trait NativeFunction: Sync {
    /// Run the function against the calling instance.
    fn invoke(&self, context: &mut dyn NativeContext) -> Result<()>;
}

impl<F> NativeFunction for F
where
    F: Fn(&mut dyn NativeContext) -> Result<()> + Sync,
{
    fn invoke(&self, context: &mut dyn NativeContext) -> Result<()> {
        self(context)
    }
}

/// A bound native function together with its declared arity.
#[derive(Clone, Copy)]
pub struct FunctionBinding<'a> {
    /// Host implementation
    pub callback: &'a dyn NativeFunction,
    /// Number of values the callback pops
    pub inputs:   u32,
    /// Number of values the callback pushes
    pub outputs:  u32,
}

/// The host implementation installed for one import.
#[derive(Clone, Copy, Default)]
pub enum NativeBinding<'a> {
    /// Nothing bound yet; calling or reading traps
    #[default]
    Unbound,
    /// A 32-bit global backed by a host cell
    Variable(&'a AtomicU32),
    /// A host function
    Function(FunctionBinding<'a>),
}

impl NativeBinding<'_> {
    /// Whether a host implementation is installed.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        !matches!(self, NativeBinding::Unbound)
    }
}

impl fmt::Debug for NativeBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeBinding::Unbound => f.write_str("Unbound"),
            NativeBinding::Variable(cell) => f.debug_tuple("Variable").field(cell).finish(),
            NativeBinding::Function(binding) => f
                .debug_struct("Function")
                .field("inputs", &binding.inputs)
                .field("outputs", &binding.outputs)
                .finish_non_exhaustive(),
        }
    }
}
