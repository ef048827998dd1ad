// FWRT - fwrt-format
// Module: Section Identifiers
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Standard WebAssembly section IDs.

use core::fmt;

/// Standard WebAssembly section IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SectionId {
    /// Custom section (0)
    Custom = 0,
    /// Type section (1)
    Type = 1,
    /// Import section (2)
    Import = 2,
    /// Function section (3)
    Function = 3,
    /// Table section (4)
    Table = 4,
    /// Memory section (5)
    Memory = 5,
    /// Global section (6)
    Global = 6,
    /// Export section (7)
    Export = 7,
    /// Start section (8)
    Start = 8,
    /// Element section (9)
    Element = 9,
    /// Code section (10)
    Code = 10,
    /// Data section (11)
    Data = 11,
    /// Data count section (12)
    DataCount = 12,
}

static SECTION_NAMES: [&str; 13] = [
    "custom", "type", "import", "function", "table", "memory", "global", "export", "start",
    "element", "code", "data", "datacount",
];

impl SectionId {
    /// Convert a u8 to a SectionId
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Custom),
            1 => Some(Self::Type),
            2 => Some(Self::Import),
            3 => Some(Self::Function),
            4 => Some(Self::Table),
            5 => Some(Self::Memory),
            6 => Some(Self::Global),
            7 => Some(Self::Export),
            8 => Some(Self::Start),
            9 => Some(Self::Element),
            10 => Some(Self::Code),
            11 => Some(Self::Data),
            12 => Some(Self::DataCount),
            _ => None,
        }
    }

    /// Position of the section in a well-formed module.
    ///
    /// Matches the numeric id except for `DataCount`, which sits between
    /// `Element` and `Code`. Custom sections have no position.
    #[must_use]
    pub const fn order(self) -> u8 {
        match self {
            Self::DataCount => 10,
            Self::Code => 11,
            Self::Data => 12,
            other => other as u8,
        }
    }

    /// Section name as used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        SECTION_NAMES[self as usize]
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
