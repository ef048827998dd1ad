// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Native function signature strings.
//!
//! A signature lists the values a native function pops and pushes:
//!
//! ```text
//! signature := '(' marker* ')' marker*
//! marker    := 'i' | 'f' | '*'
//! ```
//!
//! `i` is an integer, `f` a float and `*` any value. `"(if)i"` takes an
//! integer and a float and returns an integer.

use fwrt_error::{codes, Error, Result};
use fwrt_foundation::{limits::MAX_PARAMS, StaticVec, ValueType};

/// One value marker of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignatureValue {
    /// `i`: `i32` or `i64`
    #[default]
    Int,
    /// `f`: `f32` or `f64`
    Float,
    /// `*`: any value type
    Any,
}

impl SignatureValue {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'i' => Some(Self::Int),
            'f' => Some(Self::Float),
            '*' => Some(Self::Any),
            _ => None,
        }
    }

    /// Whether a value of type `ty` satisfies this marker.
    #[must_use]
    pub const fn accepts(self, ty: ValueType) -> bool {
        match self {
            Self::Int => matches!(ty, ValueType::I32 | ValueType::I64),
            Self::Float => matches!(ty, ValueType::F32 | ValueType::F64),
            Self::Any => true,
        }
    }
}

/// A parsed signature string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Signature {
    /// Markers before `)`
    pub inputs:  StaticVec<SignatureValue, MAX_PARAMS>,
    /// Markers after `)`
    pub outputs: StaticVec<SignatureValue, MAX_PARAMS>,
}

const fn invalid_signature(message: &'static str) -> Error {
    Error::validation_error(codes::INVALID_SIGNATURE, message)
}

impl Signature {
    /// Check the signature against a parameter and result list.
    #[must_use]
    pub fn matches(&self, params: &[ValueType], results: &[ValueType]) -> bool {
        fn all_accept(markers: &[SignatureValue], types: &[ValueType]) -> bool {
            markers.len() == types.len()
                && markers.iter().zip(types).all(|(marker, ty)| marker.accepts(*ty))
        }
        all_accept(&self.inputs, params) && all_accept(&self.outputs, results)
    }
}

/// Parse a signature string.
pub fn parse_signature(text: &str) -> Result<Signature> {
    let mut chars = text.chars();
    if chars.next() != Some('(') {
        return Err(invalid_signature("Signature must start with '('"));
    }

    let mut signature = Signature::default();
    let mut closed = false;
    for c in chars {
        if c == ')' {
            if closed {
                return Err(invalid_signature("Signature has more than one ')'"));
            }
            closed = true;
            continue;
        }
        let marker =
            SignatureValue::from_char(c).ok_or(invalid_signature("Invalid signature character"))?;
        let list = if closed { &mut signature.outputs } else { &mut signature.inputs };
        list.push(marker)
            .map_err(|_| invalid_signature("Signature has too many values"))?;
    }

    if !closed {
        return Err(invalid_signature("Signature is missing ')'"));
    }
    Ok(signature)
}
