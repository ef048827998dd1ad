// FWRT - fwrt-host
// Module: Native Binding Registry
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Native binding registry for the fixed-memory WebAssembly runtime.
//!
//! Imports of a decoded module are satisfied by the host before execution:
//! [`bind_function`] installs a [`NativeFunction`](fwrt_format::NativeFunction)
//! for a function import after checking it against a signature string (see
//! [`signature`]), [`bind_variable`] backs a 32-bit global import with an
//! atomic host cell.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod binding;
pub mod signature;

pub use binding::{bind_function, bind_variable};
pub use signature::{parse_signature, Signature, SignatureValue};
