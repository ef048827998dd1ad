// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Static collections with inline storage.
//!
//! All memory is inline with compile-time capacity enforcement; there is no
//! provider or allocator abstraction behind these types.

mod static_vec;

pub use static_vec::StaticVec;
