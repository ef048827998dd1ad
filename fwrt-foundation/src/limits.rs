// FWRT - fwrt-foundation
// Module: Capacity Limits
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Compile-time capacities of every fixed array in the engine.
//!
//! A decoded module or a virtual machine never holds more than these many
//! entries; inputs that would need more fail with a capacity error.

/// Maximum number of function types in a module
pub const MAX_TYPES: usize = 64;

/// Maximum number of imports in a module
pub const MAX_IMPORTS: usize = 64;

/// Maximum number of module-defined functions (and code bodies)
pub const MAX_FUNCTIONS: usize = 256;

/// Maximum number of globals defined by a module
pub const MAX_GLOBALS: usize = 64;

/// Maximum number of exports in a module
pub const MAX_EXPORTS: usize = 64;

/// Maximum number of active data segments
pub const MAX_DATA_SEGMENTS: usize = 32;

/// Maximum number of linear memories (MVP: one)
pub const MAX_MEMORIES: usize = 1;

/// Maximum number of parameters of a function type
pub const MAX_PARAMS: usize = 16;

/// Maximum number of results of a function type (no multi-value)
pub const MAX_RESULTS: usize = 1;

/// Maximum number of local declaration groups in one code body
pub const MAX_LOCAL_GROUPS: usize = 16;

/// Maximum number of declared locals in one code body
pub const MAX_LOCALS_PER_FUNCTION: usize = 256;

/// Capacity of the shared instruction pool of a module
pub const MAX_INSTRUCTIONS: usize = 4096;

/// Maximum nesting of `block`/`loop`/`if` scopes in a body
pub const MAX_BLOCK_DEPTH: usize = 32;

/// Maximum length in bytes of import and export names
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum number of values on the operand stack of a virtual machine
pub const MAX_OPERAND_STACK: usize = 1024;

/// Maximum number of locals live across all frames of a virtual machine
pub const MAX_LOCALS_STACK: usize = 1024;

/// Maximum depth of nested calls
pub const MAX_CALL_DEPTH: usize = 64;

/// Size of one linear-memory page in bytes
pub const PAGE_SIZE: usize = 65536;

/// Maximum number of pages of a 32-bit linear memory
pub const MAX_PAGES: u32 = 65536;
