// FWRT - fwrt-runtime
// Module: Activation Frames
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Function activation frame.

/// The locals window of the running function.
///
/// Locals of every active call live back to back on the shared locals stack;
/// a frame only records where its own window starts and how long it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    /// Index of the first local on the locals stack
    pub locals_base: usize,
    /// Parameters plus declared locals
    pub num_locals:  usize,
    /// Operand stack height when the body started
    pub stack_base:  usize,
}

impl Frame {
    /// Position on the locals stack of local `index`, if it exists.
    #[must_use]
    pub fn local_slot(&self, index: u32) -> Option<usize> {
        let index = index as usize;
        (index < self.num_locals).then(|| self.locals_base + index)
    }
}
