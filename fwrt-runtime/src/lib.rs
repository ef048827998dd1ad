// FWRT - fwrt-runtime
// Module: Interpreter
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Fixed-memory WebAssembly interpreter.
//!
//! A [`VirtualMachine`] runs functions of a decoded
//! [`Module`](fwrt_format::Module). Any number of machines may share one
//! module; each keeps its own globals, stacks and linear memory, the latter
//! provided by the caller. Nothing is allocated.
//!
//! ```
//! use fwrt_runtime::VirtualMachine;
//!
//! let bytes = wat::parse_str(
//!     r#"(module (func (export "answer") (result i32) i32.const 42))"#,
//! )
//! .map_err(|_| fwrt_error::Error::UNEXPECTED_END)?;
//! let module = fwrt_decoder::decode_module(&bytes)?;
//! let mut memory = [0u8; 0];
//! let mut vm = VirtualMachine::new(&module, &mut memory)?;
//! vm.call_export("answer")?;
//! assert_eq!(vm.pop_i32()?, 42);
//! # Ok::<(), fwrt_error::Error>(())
//! ```
//!
//! Execution follows instructions in order. `block` and `end` run
//! sequentially; `loop`, `if` and branches decode but fail with
//! `NotSupported` when reached. A trap poisons the machine.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dispatch;
pub mod frame;
pub mod memory;
mod ops;
pub mod vm;

pub use dispatch::{Control, Handler};
pub use vm::VirtualMachine;
