// FWRT - fwrt-foundation
// Module: Foundation Library
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Foundation for the fixed-memory WebAssembly runtime.
//!
//! This crate holds the building blocks every other crate shares:
//!
//! - [`cursor::ByteCursor`] for bounded reads of binary input
//! - [`collections::StaticVec`] for inline, capacity-checked storage
//! - [`types::ValueType`] and [`values::Value`]
//! - the compile-time capacities in [`limits`]
//!
//! Nothing in this crate allocates.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod collections;
pub mod cursor;
pub mod limits;
pub mod types;
pub mod values;

pub use collections::StaticVec;
pub use cursor::ByteCursor;
pub use fwrt_error::{Error, ErrorCategory, Result};
pub use types::ValueType;
pub use values::Value;
