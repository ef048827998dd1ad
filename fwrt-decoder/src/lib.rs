// FWRT - fwrt-decoder
// Module: WebAssembly Binary Decoder
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly module decoder for the fixed-memory runtime.
//!
//! Decodes a binary module into a [`Module`](fwrt_format::Module) without
//! allocating: names and data segments borrow from the input, every other
//! section lands in the module's fixed-capacity arrays.
//!
//! ```
//! let bytes = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];
//! let module = fwrt_decoder::decode_module(&bytes)?;
//! assert!(module.is_empty());
//! # Ok::<(), fwrt_error::Error>(())
//! ```
//!
//! Decoding stops at the first error and leaves the module empty.

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod instructions;
pub mod module;
pub mod section_reader;
pub mod sections;

pub use module::{decode_module, decode_module_into};
pub use section_reader::{Section, SectionReader};
