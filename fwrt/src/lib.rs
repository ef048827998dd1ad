// FWRT - fwrt
// Module: Facade
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-memory WebAssembly runtime (FWRT)
//!
//! Decodes a WebAssembly binary into caller-provided storage, binds its
//! imports to host functions and variables, and interprets its functions.
//! Nothing in the decode or execute path allocates: every table of the
//! decoded [`Module`] has a fixed capacity (see [`limits`]) and each
//! [`VirtualMachine`] runs in a memory buffer supplied by the host.
//!
//! ## Usage
//!
//! ```
//! use fwrt::prelude::*;
//!
//! let bytes = wat::parse_str(
//!     r#"(module
//!         (import "env" "scale" (func $scale (param i32) (result i32)))
//!         (func (export "run") (param i32) (result i32)
//!             local.get 0
//!             call $scale))"#,
//! )
//! .map_err(|_| Error::UNEXPECTED_END)?;
//!
//! let scale = |ctx: &mut dyn NativeContext| -> Result<()> {
//!     let value = ctx.pop_i32()?;
//!     ctx.push_i32(value * 10)
//! };
//!
//! let mut module = fwrt::decode_module(&bytes)?;
//! fwrt::bind_function(&mut module, "env", "scale", "(i)i", &scale)?;
//!
//! let mut memory = [0u8; 0];
//! let mut vm = fwrt::create_vm(&module, &mut memory)?;
//! let run = fwrt::find_exported_function(&module, "run").ok_or(Error::UNEXPECTED_END)?;
//! vm.push_i32(4)?;
//! fwrt::call(&mut vm, run)?;
//! assert_eq!(vm.pop_i32()?, 40);
//! # Ok::<(), fwrt::Error>(())
//! ```
//!
//! ## Crates
//!
//! - `fwrt-error`: the `Copy` error type and its codes
//! - `fwrt-foundation`: inline collections, the byte cursor, values
//! - `fwrt-format`: the decoded module model and opcode tables
//! - `fwrt-decoder`: the binary decoder
//! - `fwrt-host`: native binding registry
//! - `fwrt-runtime`: the interpreter

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use core::sync::atomic::AtomicU32;

pub mod prelude;

pub use fwrt_error::{codes, kinds, Error, ErrorCategory, Result};
pub use fwrt_format::{Module, NativeContext, NativeFunction};
pub use fwrt_foundation::{limits, Value, ValueType};
pub use fwrt_host::{parse_signature, Signature};
pub use fwrt_runtime::VirtualMachine;

/// Version of the WebAssembly binary format accepted
pub const BINARY_VERSION: u32 = fwrt_format::binary::WASM_VERSION;

/// Decode `bytes` into `module`.
///
/// `module` is overwritten. On error it is left empty.
pub fn decode<'a>(module: &mut Module<'a>, bytes: &'a [u8]) -> Result<()> {
    fwrt_decoder::decode_module_into(module, bytes)
}

/// Decode `bytes` into a new module.
pub fn decode_module(bytes: &[u8]) -> Result<Module<'_>> {
    fwrt_decoder::decode_module(bytes)
}

/// Bind a host function to every function import named `module_name.field`.
///
/// Returns whether any import matched. See [`fwrt_host::signature`] for the
/// signature grammar.
pub fn bind_function<'a>(
    module: &mut Module<'a>,
    module_name: &str,
    field: &str,
    signature: &str,
    callback: &'a dyn NativeFunction,
) -> Result<bool> {
    fwrt_host::bind_function(module, module_name, field, signature, callback)
}

/// Bind a host cell to every 32-bit global import named `name`.
pub fn bind_variable<'a>(module: &mut Module<'a>, name: &str, cell: &'a AtomicU32) -> Result<bool> {
    fwrt_host::bind_variable(module, name, cell)
}

/// Create an execution instance of `module` in `memory`.
pub fn create_vm<'m>(module: &'m Module<'m>, memory: &'m mut [u8]) -> Result<VirtualMachine<'m>> {
    VirtualMachine::new(module, memory)
}

/// Index of the exported function `name`.
pub fn find_exported_function(module: &Module<'_>, name: &str) -> Option<u32> {
    module.find_exported_function(name)
}

/// Call function `function` of `vm`.
pub fn call(vm: &mut VirtualMachine<'_>, function: u32) -> Result<()> {
    vm.call(function)
}

/// Bytes of linear memory a [`VirtualMachine`] for `module` needs.
pub fn required_memory(module: &Module<'_>) -> Result<usize> {
    fwrt_runtime::memory::required_size(module)
}
