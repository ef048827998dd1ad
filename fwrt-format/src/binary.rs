// FWRT - fwrt-format
// Module: Binary Format Constants
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! WebAssembly binary format constants.

/// Magic bytes for WebAssembly modules: \0asm
pub const WASM_MAGIC: [u8; 4] = [0x00, 0x61, 0x73, 0x6D];

/// WebAssembly binary format version
pub const WASM_VERSION: u32 = 1;

/// Size of the module header (magic + version)
pub const HEADER_SIZE: usize = 8;

/// WebAssembly value types
pub const I32_TYPE: u8 = 0x7F;
pub const I64_TYPE: u8 = 0x7E;
pub const F32_TYPE: u8 = 0x7D;
pub const F64_TYPE: u8 = 0x7C;
pub const FUNCREF_TYPE: u8 = 0x70;
pub const EXTERNREF_TYPE: u8 = 0x6F;

/// Tag introducing a function type
pub const FUNC_TYPE_TAG: u8 = 0x60;

/// Block type with no parameters and no results
pub const BLOCK_TYPE_EMPTY: u8 = 0x40;

/// Prefix of the extended (two-byte) opcodes
pub const EXTENDED_PREFIX: u8 = 0xFC;

/// Opcodes allowed in constant expressions
pub const END: u8 = 0x0B;
pub const I32_CONST: u8 = 0x41;
pub const I64_CONST: u8 = 0x42;
pub const F32_CONST: u8 = 0x43;
pub const F64_CONST: u8 = 0x44;

/// Import and export kinds
pub const EXTERNAL_FUNCTION: u8 = 0x00;
pub const EXTERNAL_TABLE: u8 = 0x01;
pub const EXTERNAL_MEMORY: u8 = 0x02;
pub const EXTERNAL_GLOBAL: u8 = 0x03;
pub const EXTERNAL_TAG: u8 = 0x04;

/// Limits flags
pub const LIMITS_MIN: u8 = 0x00;
pub const LIMITS_MIN_MAX: u8 = 0x01;

/// Global mutability flags
pub const GLOBAL_IMMUTABLE: u8 = 0x00;
pub const GLOBAL_MUTABLE: u8 = 0x01;

/// Data segment modes
pub const DATA_ACTIVE: u32 = 0x00;
pub const DATA_PASSIVE: u32 = 0x01;
pub const DATA_ACTIVE_EXPLICIT: u32 = 0x02;
