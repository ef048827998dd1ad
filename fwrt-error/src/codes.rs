// FWRT - fwrt-error
// Module: Error Codes
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error codes for fwrt
//!
//! Codes are grouped in ranges of one thousand per concern so that a code
//! alone identifies the failing layer.

// Runtime errors (1000-1099)
/// Operand stack underflow
pub const STACK_UNDERFLOW: u16 = 1000;
/// Operand or locals stack overflow
pub const STACK_OVERFLOW: u16 = 1001;
/// Call depth limit reached
pub const CALL_STACK_EXHAUSTED: u16 = 1002;
/// Popped value has a different type than requested
pub const TYPE_MISMATCH: u16 = 1003;
/// Function index outside the function index space
pub const INVALID_FUNCTION_INDEX: u16 = 1004;
/// Local index outside the current locals window
pub const INVALID_LOCAL_INDEX: u16 = 1005;
/// Global index outside the global index space
pub const INVALID_GLOBAL_INDEX: u16 = 1006;
/// An import was called or read without a native binding
pub const UNBOUND_IMPORT: u16 = 1007;
/// Write to an immutable global
pub const IMMUTABLE_GLOBAL: u16 = 1008;
/// Engine reached a state it cannot continue from
pub const INVALID_STATE: u16 = 1009;

// Traps (1100-1199)
/// `unreachable` executed
pub const UNREACHABLE: u16 = 1100;
/// Linear memory access outside the memory buffer
pub const MEMORY_OUT_OF_BOUNDS: u16 = 1101;
/// Integer division or remainder by zero
pub const INTEGER_DIVIDE_BY_ZERO: u16 = 1102;
/// Signed integer overflow in division or truncation
pub const INTEGER_OVERFLOW: u16 = 1103;
/// Float to integer conversion of NaN
pub const INVALID_CONVERSION: u16 = 1104;
/// Native callback left the operand stack at the wrong height
pub const NATIVE_SIGNATURE_VIOLATION: u16 = 1105;

// Parse errors (2000-2099)
/// Input ended before the value was complete
pub const UNEXPECTED_END: u16 = 2000;
/// LEB128 integer too long or with invalid padding bits
pub const INVALID_LEB128: u16 = 2001;
/// Module does not start with `\0asm`
pub const INVALID_MAGIC: u16 = 2002;
/// Module version is not 1
pub const INVALID_VERSION: u16 = 2003;
/// Section id outside 0..=12
pub const INVALID_SECTION_ID: u16 = 2004;
/// Byte is not one of the enumerated value types
pub const INVALID_VALUE_TYPE: u16 = 2005;
/// Global mutability flag is neither 0 nor 1
pub const INVALID_MUTABILITY: u16 = 2006;
/// Name is not valid UTF-8
pub const INVALID_UTF8: u16 = 2007;
/// Opcode byte is not in the decodable set
pub const UNKNOWN_OPCODE: u16 = 2008;
/// Function type does not start with `0x60`
pub const INVALID_FUNC_TYPE_TAG: u16 = 2009;
/// Import descriptor kind outside 0..=4
pub const INVALID_IMPORT_KIND: u16 = 2010;
/// Export descriptor kind outside 0..=3
pub const INVALID_EXPORT_KIND: u16 = 2011;
/// Malformed limits
pub const INVALID_LIMITS: u16 = 2012;
/// Initializer is not a supported constant expression
pub const INVALID_CONST_EXPR: u16 = 2013;
/// Block type is neither empty, a value type, nor a type index
pub const INVALID_BLOCK_TYPE: u16 = 2014;
/// Reserved byte is not zero
pub const INVALID_RESERVED_BYTE: u16 = 2015;

// Validation errors (3000-3099)
/// Non-custom section repeated or out of order
pub const SECTION_ORDER: u16 = 3000;
/// Section payload not fully consumed
pub const SECTION_SIZE_MISMATCH: u16 = 3001;
/// Function body size differs from the bytes consumed
pub const FUNCTION_SIZE_MISMATCH: u16 = 3002;
/// Function and code section lengths differ
pub const FUNCTION_CODE_MISMATCH: u16 = 3003;
/// Type index outside the type section
pub const INVALID_TYPE_INDEX: u16 = 3004;
/// Native signature string is malformed
pub const INVALID_SIGNATURE: u16 = 3005;
/// Native signature arity differs from the import's type
pub const SIGNATURE_MISMATCH: u16 = 3006;
/// Data count section disagrees with the data section
pub const DATA_COUNT_MISMATCH: u16 = 3007;
/// Name longer than the name limit
pub const NAME_TOO_LONG: u16 = 3008;
/// `end` without an open scope or body without final `end`
pub const UNBALANCED_BLOCK: u16 = 3009;
/// Export or start refers to a missing definition
pub const INVALID_EXPORT_INDEX: u16 = 3010;

// Capacity errors (4000-4099)
/// Fixed-capacity container is full
pub const CAPACITY_EXCEEDED: u16 = 4000;
/// Block nesting deeper than the scope stack
pub const BLOCK_DEPTH_EXCEEDED: u16 = 4001;

// Not supported (5000-5099)
/// Opcode decodes but has no handler
pub const UNSUPPORTED_OPCODE: u16 = 5000;
/// Tables and element segments
pub const UNSUPPORTED_TABLE: u16 = 5001;
/// Multi-value, passive data, imported memories and similar
pub const UNSUPPORTED_FEATURE: u16 = 5002;

// Memory errors (6000-6099)
/// Caller-provided memory smaller than the module requires
pub const INSUFFICIENT_MEMORY: u16 = 6000;
/// Data segment does not fit in linear memory
pub const DATA_SEGMENT_OUT_OF_BOUNDS: u16 = 6001;
