// FWRT - fwrt-error
// Module: Error Types
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Error type shared by every fwrt crate.
//!
//! Errors are plain `Copy` values carrying a category, a numeric code and a
//! static message, so creating and propagating them never allocates.

use core::fmt;

use crate::codes;

/// `Error` categories for fwrt operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorCategory {
    /// Malformed binary input
    Parse        = 1,
    /// Structurally well-formed input that breaks a module rule
    Validation   = 2,
    /// A fixed-capacity container would overflow
    Capacity     = 3,
    /// Recognised but unsupported feature or opcode
    NotSupported = 4,
    /// Linear memory setup errors
    Memory       = 5,
    /// Type errors
    Type         = 6,
    /// Runtime errors (stack discipline, indices, bindings)
    Runtime      = 7,
    /// WebAssembly traps
    RuntimeTrap  = 8,
}

impl ErrorCategory {
    /// Static name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "Parse",
            Self::Validation => "Validation",
            Self::Capacity => "Capacity",
            Self::NotSupported => "NotSupported",
            Self::Memory => "Memory",
            Self::Type => "Type",
            Self::Runtime => "Runtime",
            Self::RuntimeTrap => "RuntimeTrap",
        }
    }
}

/// fwrt `Error` type
///
/// Provides categorized errors with error codes and a static message.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Error {
    /// `Error` category
    pub category: ErrorCategory,
    /// `Error` code
    pub code:     u16,
    /// `Error` message
    pub message:  &'static str,
}

impl Error {
    /// Operand stack underflow
    pub const STACK_UNDERFLOW: Self = Self::new(
        ErrorCategory::Runtime,
        codes::STACK_UNDERFLOW,
        "Operand stack underflow",
    );
    /// Operand stack overflow
    pub const STACK_OVERFLOW: Self = Self::new(
        ErrorCategory::Runtime,
        codes::STACK_OVERFLOW,
        "Operand stack overflow",
    );
    /// Input ended early
    pub const UNEXPECTED_END: Self = Self::new(
        ErrorCategory::Parse,
        codes::UNEXPECTED_END,
        "Unexpected end of input",
    );
    /// Bounded container is full
    pub const CAPACITY_EXCEEDED: Self = Self::new(
        ErrorCategory::Capacity,
        codes::CAPACITY_EXCEEDED,
        "Bounded capacity exceeded",
    );

    /// Create a new error.
    #[must_use]
    pub const fn new(category: ErrorCategory, code: u16, message: &'static str) -> Self {
        Self {
            category,
            code,
            message,
        }
    }

    // Factory methods

    /// Create a parse error
    #[must_use]
    pub const fn parse_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Parse, code, message)
    }

    /// Create a validation error
    #[must_use]
    pub const fn validation_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Validation, code, message)
    }

    /// Create a capacity error
    #[must_use]
    pub const fn capacity_exceeded(message: &'static str) -> Self {
        Self::new(ErrorCategory::Capacity, codes::CAPACITY_EXCEEDED, message)
    }

    /// Create a not-supported error
    #[must_use]
    pub const fn not_supported(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::NotSupported, code, message)
    }

    /// Create a memory setup error
    #[must_use]
    pub const fn memory_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Memory, code, message)
    }

    /// Create a type error
    #[must_use]
    pub const fn type_error(message: &'static str) -> Self {
        Self::new(ErrorCategory::Type, codes::TYPE_MISMATCH, message)
    }

    /// Create a runtime error
    #[must_use]
    pub const fn runtime_error(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::Runtime, code, message)
    }

    /// Create a trap
    #[must_use]
    pub const fn trap(code: u16, message: &'static str) -> Self {
        Self::new(ErrorCategory::RuntimeTrap, code, message)
    }

    /// Create a runtime stack overflow error
    #[must_use]
    pub const fn runtime_stack_overflow(message: &'static str) -> Self {
        Self::new(ErrorCategory::Runtime, codes::STACK_OVERFLOW, message)
    }

    /// Create an out-of-bounds memory access trap
    #[must_use]
    pub const fn memory_out_of_bounds(message: &'static str) -> Self {
        Self::new(ErrorCategory::RuntimeTrap, codes::MEMORY_OUT_OF_BOUNDS, message)
    }

    /// Check if this is a parse error
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        self.category == ErrorCategory::Parse
    }

    /// Check if this is a validation error
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        self.category == ErrorCategory::Validation
    }

    /// Check if this is a capacity error
    #[must_use]
    pub fn is_capacity_error(&self) -> bool {
        self.category == ErrorCategory::Capacity
    }

    /// Check if this is a trap
    #[must_use]
    pub fn is_trap(&self) -> bool {
        self.category == ErrorCategory::RuntimeTrap
    }

    /// Check if this error reports an unsupported feature
    #[must_use]
    pub fn is_not_supported(&self) -> bool {
        self.category == ErrorCategory::NotSupported
    }

    /// Whether a virtual machine that produced this error must be discarded.
    ///
    /// Traps and runtime errors may leave the operand and locals stacks at an
    /// arbitrary depth.
    #[must_use]
    pub fn poisons_instance(&self) -> bool {
        matches!(
            self.category,
            ErrorCategory::RuntimeTrap | ErrorCategory::Runtime | ErrorCategory::NotSupported
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][E{:04}] {}",
            self.category.as_str(),
            self.code,
            self.message
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
