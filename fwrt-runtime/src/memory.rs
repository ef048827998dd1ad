// FWRT - fwrt-runtime
// Module: Linear Memory
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Linear memory access.
//!
//! The memory of an instance is a caller-supplied byte slice of exactly
//! `min_pages * PAGE_SIZE` bytes. It never grows. Every access computes its
//! effective address in 64 bits and is checked against the slice length
//! before any byte is touched.

use core::ops::Range;

use fwrt_error::{codes, Error, Result};
use fwrt_format::Module;
use fwrt_foundation::limits::PAGE_SIZE;

/// Number of bytes of linear memory `module` needs.
///
/// Zero if the module declares no memory.
pub fn required_size(module: &Module<'_>) -> Result<usize> {
    if module.num_imported_memories() > 0 {
        return Err(Error::not_supported(
            codes::UNSUPPORTED_FEATURE,
            "Imported memories are not supported",
        ));
    }
    let pages = module.memories.first().map_or(0, |limits| limits.min as usize);
    pages.checked_mul(PAGE_SIZE).ok_or(Error::memory_error(
        codes::INSUFFICIENT_MEMORY,
        "Memory size overflows the address space",
    ))
}

/// Zero `memory` and copy the module's data segments into it.
pub fn initialize(memory: &mut [u8], module: &Module<'_>) -> Result<()> {
    memory.fill(0);
    for segment in module.data.iter() {
        let range = effective_range(memory.len(), segment.offset, 0, segment.bytes.len())
            .map_err(|_| {
                Error::memory_error(
                    codes::DATA_SEGMENT_OUT_OF_BOUNDS,
                    "Data segment does not fit in memory",
                )
            })?;
        memory[range].copy_from_slice(segment.bytes);
    }
    Ok(())
}

/// Byte range of a `width`-byte access at `address + offset`.
pub fn effective_range(
    memory_len: usize,
    address: u32,
    offset: u32,
    width: usize,
) -> Result<Range<usize>> {
    let start = u64::from(address) + u64::from(offset);
    let end = start + width as u64;
    if end > memory_len as u64 {
        return Err(Error::memory_out_of_bounds("Out of bounds memory access"));
    }
    Ok(start as usize..end as usize)
}

/// Read `W` bytes at `address + offset`.
pub fn load<const W: usize>(memory: &[u8], address: u32, offset: u32) -> Result<[u8; W]> {
    let range = effective_range(memory.len(), address, offset, W)?;
    let mut bytes = [0u8; W];
    bytes.copy_from_slice(&memory[range]);
    Ok(bytes)
}

/// Write `bytes` at `address + offset`.
pub fn store<const W: usize>(
    memory: &mut [u8],
    address: u32,
    offset: u32,
    bytes: [u8; W],
) -> Result<()> {
    let range = effective_range(memory.len(), address, offset, W)?;
    memory[range].copy_from_slice(&bytes);
    Ok(())
}
