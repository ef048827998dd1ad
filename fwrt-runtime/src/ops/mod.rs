// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Opcode handlers, grouped the way the dispatch tables list them.

pub(crate) mod control;
pub(crate) mod float;
pub(crate) mod memory;
pub(crate) mod numeric;
pub(crate) mod variable;
