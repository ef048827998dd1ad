// FWRT - fwrt-error
// Module: Error Kind Helpers
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Helper constructors for the error kinds the decoder, the binding registry
//! and the interpreter raise most often.

use crate::{codes, Error, ErrorCategory};

/// Module does not start with `\0asm`
#[must_use]
pub const fn invalid_magic() -> Error {
    Error::new(ErrorCategory::Parse, codes::INVALID_MAGIC, "Not a valid WebAssembly module")
}

/// Module version is not 1
#[must_use]
pub const fn invalid_version() -> Error {
    Error::new(
        ErrorCategory::Parse,
        codes::INVALID_VERSION,
        "Unsupported WebAssembly version",
    )
}

/// Malformed LEB128 integer
#[must_use]
pub const fn invalid_leb128(message: &'static str) -> Error {
    Error::new(ErrorCategory::Parse, codes::INVALID_LEB128, message)
}

/// Byte is not a value type
#[must_use]
pub const fn invalid_value_type() -> Error {
    Error::new(ErrorCategory::Parse, codes::INVALID_VALUE_TYPE, "Invalid value type")
}

/// Unknown opcode byte
#[must_use]
pub const fn unknown_opcode(message: &'static str) -> Error {
    Error::new(ErrorCategory::Parse, codes::UNKNOWN_OPCODE, message)
}

/// Section ordering violation
#[must_use]
pub const fn section_order() -> Error {
    Error::new(
        ErrorCategory::Validation,
        codes::SECTION_ORDER,
        "Section repeated or out of order",
    )
}

/// Decoder consumed a different number of bytes than declared
#[must_use]
pub const fn size_mismatch(code: u16, message: &'static str) -> Error {
    Error::new(ErrorCategory::Validation, code, message)
}

/// Index outside its index space
#[must_use]
pub const fn invalid_index(code: u16, message: &'static str) -> Error {
    Error::new(ErrorCategory::Validation, code, message)
}

/// Opcode has no interpreter handler
#[must_use]
pub const fn unsupported_opcode() -> Error {
    Error::new(
        ErrorCategory::NotSupported,
        codes::UNSUPPORTED_OPCODE,
        "Opcode not supported by the interpreter",
    )
}

/// Structured instructions nested deeper than the block stack allows
#[must_use]
pub const fn block_depth_exceeded() -> Error {
    Error::new(
        ErrorCategory::Capacity,
        codes::BLOCK_DEPTH_EXCEEDED,
        "Blocks nested too deeply",
    )
}

/// Call or read of an import without a native binding
#[must_use]
pub const fn unbound_import(message: &'static str) -> Error {
    Error::new(ErrorCategory::Runtime, codes::UNBOUND_IMPORT, message)
}

/// Native callback broke its declared signature
#[must_use]
pub const fn native_signature_violation() -> Error {
    Error::new(
        ErrorCategory::RuntimeTrap,
        codes::NATIVE_SIGNATURE_VIOLATION,
        "Native function left the stack at the wrong height",
    )
}
