// FWRT - fwrt-decoder
// Module: Section Reader
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Section reader for WebAssembly modules
//!
//! Validates the module header and then frames the binary into sections,
//! enforcing the canonical section order. Custom sections are skipped here
//! and never reach the section decoders.

use fwrt_error::{codes, kinds, Error, Result};
use fwrt_format::{binary, SectionId};
use fwrt_foundation::ByteCursor;
use log::trace;

/// One framed section.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// Section id
    pub id:      SectionId,
    /// Offset of the payload in the module binary
    pub offset:  usize,
    /// Section contents
    pub payload: &'a [u8],
}

impl<'a> Section<'a> {
    /// A cursor over the payload.
    #[must_use]
    pub fn cursor(&self) -> ByteCursor<'a> {
        ByteCursor::new(self.payload)
    }
}

/// Reader for accessing WebAssembly module sections
#[derive(Debug)]
pub struct SectionReader<'a> {
    cursor:     ByteCursor<'a>,
    /// Order of the last non-custom section, 0 before the first
    last_order: u8,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader for a WebAssembly binary
    ///
    /// Verifies the WebAssembly header, then positions at the first section.
    pub fn new(binary: &'a [u8]) -> Result<Self> {
        if binary.get(..4) != Some(&binary::WASM_MAGIC[..]) {
            return Err(kinds::invalid_magic());
        }

        let mut cursor = ByteCursor::new(binary);
        cursor.skip(binary::WASM_MAGIC.len())?;
        match cursor.parse_u32_le() {
            Ok(binary::WASM_VERSION) => {}
            _ => return Err(kinds::invalid_version()),
        }

        Ok(Self { cursor, last_order: 0 })
    }

    /// Offset of the next unread byte in the binary.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Get the next non-custom section.
    ///
    /// Returns `None` at the end of the module.
    pub fn next_section(&mut self) -> Result<Option<Section<'a>>> {
        while !self.cursor.is_empty() {
            let raw_id = self.cursor.parse_u8()?;
            let id = SectionId::from_u8(raw_id).ok_or(Error::parse_error(
                codes::INVALID_SECTION_ID,
                "Unknown section id",
            ))?;
            let size = self.cursor.parse_uleb32()? as usize;
            let offset = self.cursor.position();
            let payload = self.cursor.parse_bytes(size)?;

            if id == SectionId::Custom {
                skip_custom_section(payload, offset)?;
                continue;
            }

            if id.order() <= self.last_order {
                return Err(kinds::section_order());
            }
            self.last_order = id.order();

            trace!("section {} at offset {} ({} bytes)", id, offset, size);
            return Ok(Some(Section { id, offset, payload }));
        }
        Ok(None)
    }
}

fn skip_custom_section(payload: &[u8], offset: usize) -> Result<()> {
    let mut cursor = ByteCursor::new(payload);
    let len = cursor.parse_uleb32()? as usize;
    let name = cursor.parse_str(len)?;
    trace!("skipping custom section '{}' at offset {} ({} bytes)", name, offset, payload.len());
    Ok(())
}

/// Fail unless a section decoder consumed its whole payload.
pub fn expect_consumed(cursor: &ByteCursor<'_>, id: SectionId) -> Result<()> {
    if cursor.is_empty() {
        Ok(())
    } else {
        trace!("{} section has {} trailing bytes", id, cursor.remaining());
        Err(kinds::size_mismatch(
            codes::SECTION_SIZE_MISMATCH,
            "Section size does not match its contents",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [u8; 8] = [0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00];

    fn module(sections: &[u8]) -> Vec<u8> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(sections);
        bytes
    }

    #[test]
    fn header_only_has_no_sections() -> Result<()> {
        let mut reader = SectionReader::new(&HEADER)?;
        assert!(reader.next_section()?.is_none());
        Ok(())
    }

    #[test]
    fn bad_magic_and_version() {
        let err = SectionReader::new(b"XASM\x01\x00\x00\x00").unwrap_err();
        assert_eq!(err.code, codes::INVALID_MAGIC);
        let err = SectionReader::new(b"\0as").unwrap_err();
        assert_eq!(err.code, codes::INVALID_MAGIC);
        let err = SectionReader::new(b"\0asm\x02\x00\x00\x00").unwrap_err();
        assert_eq!(err.code, codes::INVALID_VERSION);
        let err = SectionReader::new(b"\0asm\x01").unwrap_err();
        assert_eq!(err.code, codes::INVALID_VERSION);
    }

    #[test]
    fn custom_sections_are_skipped_anywhere() -> Result<()> {
        let bytes = module(&[
            0x00, 0x04, 0x03, b'a', b'b', b'c', // custom "abc"
            0x01, 0x01, 0x00, // empty type section
            0x00, 0x02, 0x01, b'x', // custom "x"
            0x03, 0x01, 0x00, // empty function section
        ]);
        let mut reader = SectionReader::new(&bytes)?;
        assert_eq!(reader.next_section()?.map(|s| s.id), Some(SectionId::Type));
        assert_eq!(reader.next_section()?.map(|s| s.id), Some(SectionId::Function));
        assert!(reader.next_section()?.is_none());
        Ok(())
    }

    #[test]
    fn repeated_section_violates_order() -> Result<()> {
        let bytes = module(&[0x01, 0x01, 0x00, 0x01, 0x01, 0x00]);
        let mut reader = SectionReader::new(&bytes)?;
        assert!(reader.next_section()?.is_some());
        assert_eq!(reader.next_section().unwrap_err().code, codes::SECTION_ORDER);
        Ok(())
    }

    #[test]
    fn data_count_precedes_code() -> Result<()> {
        let bytes = module(&[0x0C, 0x01, 0x00, 0x0A, 0x01, 0x00]);
        let mut reader = SectionReader::new(&bytes)?;
        assert_eq!(reader.next_section()?.map(|s| s.id), Some(SectionId::DataCount));
        assert_eq!(reader.next_section()?.map(|s| s.id), Some(SectionId::Code));

        let bytes = module(&[0x0A, 0x01, 0x00, 0x0C, 0x01, 0x00]);
        let mut reader = SectionReader::new(&bytes)?;
        assert!(reader.next_section()?.is_some());
        assert!(reader.next_section().is_err());
        Ok(())
    }

    #[test]
    fn truncated_payload_and_unknown_id() -> Result<()> {
        let bytes = module(&[0x01, 0x05, 0x00]);
        let mut reader = SectionReader::new(&bytes)?;
        assert_eq!(reader.next_section().unwrap_err(), Error::UNEXPECTED_END);

        let bytes = module(&[0x0D, 0x00]);
        let mut reader = SectionReader::new(&bytes)?;
        assert_eq!(reader.next_section().unwrap_err().code, codes::INVALID_SECTION_ID);
        Ok(())
    }
}
