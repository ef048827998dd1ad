// FWRT - fwrt-format
// Module: Format Library
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly binary format definitions for the fixed-memory runtime.
//!
//! This crate describes *what* a decoded module looks like; turning bytes into
//! a [`Module`] is the job of `fwrt-decoder`, executing it the job of
//! `fwrt-runtime`.
//!
//! - [`binary`]: magic, version and encoding constants
//! - [`section`]: section ids and their canonical order
//! - [`opcode`]: the decodable opcode set and its lookup tables
//! - [`instruction`]: decoded instructions and immediates
//! - [`module`]: the module data model
//! - [`native`]: host bindings for imports

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[allow(missing_docs)]
pub mod binary;
pub mod instruction;
pub mod module;
pub mod native;
pub mod opcode;
pub mod section;

pub use instruction::{BlockType, Immediate, Instruction};
pub use module::{
    Code, DataSegment, Export, ExportDesc, FuncType, FunctionRef, Global, GlobalRef, GlobalType,
    Import, ImportDesc, Limits, LocalGroup, Module,
};
pub use native::{FunctionBinding, NativeBinding, NativeContext, NativeFunction};
pub use opcode::{ImmediateKind, Opcode};
pub use section::SectionId;
