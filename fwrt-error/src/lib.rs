// FWRT - fwrt-error
// Module: Error Handling
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! fwrt error handling library
//!
//! Every fallible operation in the fixed-memory runtime returns
//! [`Result`], whose error is a small `Copy` value: a domain tag
//! ([`ErrorCategory`]), a numeric code from [`codes`] and a static message.
//! Nothing here allocates, so errors can be created on a real-time thread.
//!
//! # Error Categories
//!
//! ## Parse Errors (2000-2099)
//! - Truncated input, malformed LEB128
//! - Invalid magic, version, section id, value type
//! - Unknown opcodes
//!
//! ## Validation Errors (3000-3099)
//! - Section ordering and byte accounting
//! - Index and signature checks
//!
//! ## Capacity Errors (4000-4099)
//! - Fixed-capacity containers that would overflow
//!
//! ## Runtime Errors and Traps (1000-1199)
//! - Stack underflow and overflow
//! - Out-of-bounds memory access, division by zero
//!
//! # Usage
//!
//! ```
//! use fwrt_error::{codes, Error, ErrorCategory};
//!
//! let error = Error::new(
//!     ErrorCategory::Parse,
//!     codes::INVALID_MAGIC,
//!     "Not a valid WebAssembly module",
//! );
//! assert!(error.is_parse_error());
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)] // Rule 2
#![deny(missing_docs)]

/// Error codes for fwrt
pub mod codes;
/// Error and error handling types
pub mod errors;
/// Error kind helpers
pub mod kinds;

// Re-export key types
pub use errors::{Error, ErrorCategory};

/// A specialized `Result` type for fwrt operations.
pub type Result<T> = core::result::Result<T, Error>;
