// FWRT - fwrt-decoder
// Module: Module Assembly
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Module assembly.
//!
//! Drives the section reader and the section parsers over a whole binary,
//! then checks the cross-section invariants that no single section can check
//! on its own.

use fwrt_error::{codes, kinds, Error, Result};
use fwrt_format::{ExportDesc, Module, SectionId};
use fwrt_foundation::ByteCursor;
use log::{debug, trace};

use crate::{
    section_reader::{expect_consumed, SectionReader},
    sections,
};

/// Decode `bytes` into `module`, replacing its previous contents.
///
/// On failure the module is left empty.
pub fn decode_module_into<'a>(module: &mut Module<'a>, bytes: &'a [u8]) -> Result<()> {
    module.clear();
    match decode_sections(module, bytes) {
        Ok(()) => {
            debug!(
                "decoded module: {} types, {} imports, {} functions, {} globals, {} exports, {} instructions",
                module.types.len(),
                module.imports.len(),
                module.functions.len(),
                module.globals.len(),
                module.exports.len(),
                module.instructions.len()
            );
            Ok(())
        }
        Err(error) => {
            debug!("module decoding failed: {}", error);
            module.clear();
            Err(error)
        }
    }
}

/// Decode `bytes` into a new module.
pub fn decode_module(bytes: &[u8]) -> Result<Module<'_>> {
    let mut module = Module::new();
    decode_module_into(&mut module, bytes)?;
    Ok(module)
}

fn decode_sections<'a>(module: &mut Module<'a>, bytes: &'a [u8]) -> Result<()> {
    let mut reader = SectionReader::new(bytes)?;
    let mut saw_data = false;

    while let Some(section) = reader.next_section()? {
        let mut cursor: ByteCursor<'a> = section.cursor();
        match section.id {
            SectionId::Type => sections::parse_type_section(&mut cursor, module)?,
            SectionId::Import => sections::parse_import_section(&mut cursor, module)?,
            SectionId::Function => sections::parse_function_section(&mut cursor, module)?,
            SectionId::Table => sections::parse_table_section(&mut cursor, module)?,
            SectionId::Memory => sections::parse_memory_section(&mut cursor, module)?,
            SectionId::Global => sections::parse_global_section(&mut cursor, module)?,
            SectionId::Export => sections::parse_export_section(&mut cursor, module)?,
            SectionId::Start => sections::parse_start_section(&mut cursor, module)?,
            SectionId::Element => sections::parse_element_section(&mut cursor, module)?,
            SectionId::Code => sections::parse_code_section(&mut cursor, module)?,
            SectionId::Data => {
                saw_data = true;
                sections::parse_data_section(&mut cursor, module)?;
            }
            SectionId::DataCount => sections::parse_data_count_section(&mut cursor, module)?,
            // Skipped by the section reader.
            SectionId::Custom => {}
        }
        expect_consumed(&cursor, section.id)?;
        trace!("{} section decoded", section.id);
    }

    validate(module, saw_data)
}

fn validate(module: &Module<'_>, saw_data: bool) -> Result<()> {
    if module.codes.len() != module.functions.len() {
        return Err(Error::validation_error(
            codes::FUNCTION_CODE_MISMATCH,
            "Function and code section lengths differ",
        ));
    }

    if !saw_data && module.data_count.is_some_and(|count| count != 0) {
        return Err(Error::validation_error(
            codes::DATA_COUNT_MISMATCH,
            "Data count announced without a data section",
        ));
    }

    let functions = module.function_count();
    if module.start.is_some_and(|start| start as usize >= functions) {
        return Err(kinds::invalid_index(
            codes::INVALID_FUNCTION_INDEX,
            "Start function index out of range",
        ));
    }

    let memories = module.num_imported_memories() + module.memories.len();
    for export in module.exports.iter() {
        let in_range = match export.desc {
            ExportDesc::Function(index) => (index as usize) < functions,
            ExportDesc::Table(index) => (index as usize) < module.num_imported_tables(),
            ExportDesc::Memory(index) => (index as usize) < memories,
            ExportDesc::Global(index) => (index as usize) < module.global_count(),
        };
        if !in_range {
            return Err(kinds::invalid_index(
                codes::INVALID_EXPORT_INDEX,
                "Export refers to a missing definition",
            ));
        }
        if module.exports.iter().filter(|other| other.name == export.name).count() > 1 {
            return Err(Error::validation_error(
                codes::INVALID_EXPORT_INDEX,
                "Duplicate export name",
            ));
        }
    }

    Ok(())
}
