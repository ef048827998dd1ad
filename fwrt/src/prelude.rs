// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Prelude module for fwrt
//!
//! Glob-import this module to get the types a host needs to decode, bind and
//! run a module.

pub use core::sync::atomic::{AtomicU32, Ordering};

pub use fwrt_error::{codes, Error, ErrorCategory, Result};
pub use fwrt_format::{Module, NativeBinding, NativeContext, NativeFunction};
pub use fwrt_foundation::limits::PAGE_SIZE;
pub use fwrt_foundation::{Value, ValueType};
pub use fwrt_runtime::VirtualMachine;
