// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Section parsers for WebAssembly binary format
//!
//! Each parser reads the section's vector length, checks it against the
//! remaining capacity of the destination array before writing anything, and
//! then decodes the entries straight into the [`Module`].

use fwrt_error::{codes, kinds, Error, Result};
use fwrt_format::{
    binary, Code, DataSegment, Export, ExportDesc, FuncType, Global, GlobalType, Import,
    ImportDesc, Limits, LocalGroup, Module, NativeBinding,
};
use fwrt_foundation::{
    limits::{MAX_LOCALS_PER_FUNCTION, MAX_NAME_LENGTH, MAX_PAGES},
    ByteCursor, StaticVec, Value, ValueType,
};

use crate::instructions::{decode_const_expr, decode_expression};

/// Read a vector length and check that it fits `free` more entries.
fn read_count(cursor: &mut ByteCursor<'_>, free: usize) -> Result<usize> {
    let count = cursor.parse_uleb32()? as usize;
    if count > free {
        return Err(Error::capacity_exceeded("Vector length exceeds the fixed capacity"));
    }
    Ok(count)
}

fn read_value_types<const N: usize>(
    cursor: &mut ByteCursor<'_>,
    types: &mut StaticVec<ValueType, N>,
) -> Result<()> {
    let count = read_count(cursor, types.capacity() - types.len())?;
    for _ in 0..count {
        types.push(ValueType::from_binary(cursor.parse_u8()?)?)?;
    }
    Ok(())
}

fn read_limits(cursor: &mut ByteCursor<'_>) -> Result<Limits> {
    let limits = match cursor.parse_u8()? {
        binary::LIMITS_MIN => Limits { min: cursor.parse_uleb32()?, max: None },
        binary::LIMITS_MIN_MAX => {
            let min = cursor.parse_uleb32()?;
            let max = cursor.parse_uleb32()?;
            Limits { min, max: Some(max) }
        }
        _ => return Err(Error::parse_error(codes::INVALID_LIMITS, "Invalid limits flag")),
    };
    if limits.max.is_some_and(|max| max < limits.min) {
        return Err(Error::parse_error(codes::INVALID_LIMITS, "Limits minimum exceeds maximum"));
    }
    Ok(limits)
}

fn read_memory_limits(cursor: &mut ByteCursor<'_>) -> Result<Limits> {
    let limits = read_limits(cursor)?;
    if limits.min > MAX_PAGES || limits.max.is_some_and(|max| max > MAX_PAGES) {
        return Err(Error::parse_error(
            codes::INVALID_LIMITS,
            "Memory size exceeds 65536 pages",
        ));
    }
    Ok(limits)
}

fn read_global_type(cursor: &mut ByteCursor<'_>) -> Result<GlobalType> {
    let value_type = ValueType::from_binary(cursor.parse_u8()?)?;
    let mutable = match cursor.parse_u8()? {
        binary::GLOBAL_IMMUTABLE => false,
        binary::GLOBAL_MUTABLE => true,
        _ => {
            return Err(Error::parse_error(
                codes::INVALID_MUTABILITY,
                "Invalid global mutability flag",
            ))
        }
    };
    Ok(GlobalType { value_type, mutable })
}

fn read_type_index(cursor: &mut ByteCursor<'_>, module: &Module<'_>) -> Result<u32> {
    let index = cursor.parse_uleb32()?;
    if index as usize >= module.types.len() {
        return Err(kinds::invalid_index(codes::INVALID_TYPE_INDEX, "Type index out of range"));
    }
    Ok(index)
}

/// Parse the type section.
pub fn parse_type_section(cursor: &mut ByteCursor<'_>, module: &mut Module<'_>) -> Result<()> {
    let count = read_count(cursor, module.types.capacity() - module.types.len())?;
    for _ in 0..count {
        if cursor.parse_u8()? != binary::FUNC_TYPE_TAG {
            return Err(Error::parse_error(
                codes::INVALID_FUNC_TYPE_TAG,
                "Function type must start with 0x60",
            ));
        }
        let mut func_type = FuncType::default();
        read_value_types(cursor, &mut func_type.params)?;

        let results = cursor.parse_uleb32()?;
        if results as usize > func_type.results.capacity() {
            return Err(Error::not_supported(
                codes::UNSUPPORTED_FEATURE,
                "Multiple return values are not supported",
            ));
        }
        for _ in 0..results {
            func_type.results.push(ValueType::from_binary(cursor.parse_u8()?)?)?;
        }
        module.types.push(func_type)?;
    }
    Ok(())
}

/// Parse the import section. Every import gets an unbound binding slot.
pub fn parse_import_section<'a>(
    cursor: &mut ByteCursor<'a>,
    module: &mut Module<'a>,
) -> Result<()> {
    let count = read_count(cursor, module.imports.capacity() - module.imports.len())?;
    for _ in 0..count {
        let module_name = cursor.parse_name(MAX_NAME_LENGTH)?;
        let field = cursor.parse_name(MAX_NAME_LENGTH)?;
        let desc = match cursor.parse_u8()? {
            binary::EXTERNAL_FUNCTION => ImportDesc::Function(read_type_index(cursor, module)?),
            binary::EXTERNAL_TABLE => {
                match cursor.parse_u8()? {
                    binary::FUNCREF_TYPE | binary::EXTERNREF_TYPE => {}
                    _ => return Err(kinds::invalid_value_type()),
                }
                ImportDesc::Table(read_limits(cursor)?)
            }
            binary::EXTERNAL_MEMORY => ImportDesc::Memory(read_memory_limits(cursor)?),
            binary::EXTERNAL_GLOBAL => ImportDesc::Global(read_global_type(cursor)?),
            binary::EXTERNAL_TAG => {
                if cursor.parse_u8()? != 0 {
                    return Err(Error::parse_error(
                        codes::INVALID_IMPORT_KIND,
                        "Tag attribute must be zero",
                    ));
                }
                ImportDesc::Tag(read_type_index(cursor, module)?)
            }
            _ => return Err(Error::parse_error(codes::INVALID_IMPORT_KIND, "Invalid import kind")),
        };
        module.imports.push(Import { module: module_name, field, desc })?;
        module.bindings.push(NativeBinding::Unbound)?;
    }
    Ok(())
}

/// Parse the function section.
pub fn parse_function_section(
    cursor: &mut ByteCursor<'_>,
    module: &mut Module<'_>,
) -> Result<()> {
    let count = read_count(cursor, module.functions.capacity() - module.functions.len())?;
    for _ in 0..count {
        let type_index = read_type_index(cursor, module)?;
        module.functions.push(type_index)?;
    }
    Ok(())
}

/// Parse the table section. Only an empty vector is accepted.
pub fn parse_table_section(cursor: &mut ByteCursor<'_>, _module: &mut Module<'_>) -> Result<()> {
    if cursor.parse_uleb32()? != 0 {
        return Err(Error::not_supported(codes::UNSUPPORTED_TABLE, "Tables are not supported"));
    }
    Ok(())
}

/// Parse the memory section.
pub fn parse_memory_section(cursor: &mut ByteCursor<'_>, module: &mut Module<'_>) -> Result<()> {
    let count = read_count(cursor, module.memories.capacity() - module.memories.len())?;
    if count > 0 && module.num_imported_memories() > 0 {
        return Err(Error::not_supported(
            codes::UNSUPPORTED_FEATURE,
            "Multiple memories are not supported",
        ));
    }
    for _ in 0..count {
        module.memories.push(read_memory_limits(cursor)?)?;
    }
    Ok(())
}

/// Parse the global section.
pub fn parse_global_section(cursor: &mut ByteCursor<'_>, module: &mut Module<'_>) -> Result<()> {
    let count = read_count(cursor, module.globals.capacity() - module.globals.len())?;
    for _ in 0..count {
        let ty = read_global_type(cursor)?;
        let init = decode_const_expr(cursor, ty.value_type)?;
        module.globals.push(Global { ty, init })?;
    }
    Ok(())
}

/// Parse the export section.
pub fn parse_export_section<'a>(
    cursor: &mut ByteCursor<'a>,
    module: &mut Module<'a>,
) -> Result<()> {
    let count = read_count(cursor, module.exports.capacity() - module.exports.len())?;
    for _ in 0..count {
        let name = cursor.parse_name(MAX_NAME_LENGTH)?;
        let kind = cursor.parse_u8()?;
        let index = cursor.parse_uleb32()?;
        let desc = match kind {
            binary::EXTERNAL_FUNCTION => ExportDesc::Function(index),
            binary::EXTERNAL_TABLE => ExportDesc::Table(index),
            binary::EXTERNAL_MEMORY => ExportDesc::Memory(index),
            binary::EXTERNAL_GLOBAL => ExportDesc::Global(index),
            _ => return Err(Error::parse_error(codes::INVALID_EXPORT_KIND, "Invalid export kind")),
        };
        module.exports.push(Export { name, desc })?;
    }
    Ok(())
}

/// Parse the start section.
pub fn parse_start_section(cursor: &mut ByteCursor<'_>, module: &mut Module<'_>) -> Result<()> {
    module.start = Some(cursor.parse_uleb32()?);
    Ok(())
}

/// Parse the element section. Only an empty vector is accepted.
pub fn parse_element_section(cursor: &mut ByteCursor<'_>, module: &mut Module<'_>) -> Result<()> {
    parse_table_section(cursor, module)
}

/// Parse the data count section.
pub fn parse_data_count_section(
    cursor: &mut ByteCursor<'_>,
    module: &mut Module<'_>,
) -> Result<()> {
    module.data_count = Some(cursor.parse_uleb32()?);
    Ok(())
}

fn parse_code_body(body: &mut ByteCursor<'_>, module: &mut Module<'_>, size: u32) -> Result<()> {
    let mut code = Code { size, ..Code::default() };

    let groups = read_count(body, code.locals.capacity())?;
    let mut total: u64 = 0;
    for _ in 0..groups {
        let count = body.parse_uleb32()?;
        let value_type = ValueType::from_binary(body.parse_u8()?)?;
        total += u64::from(count);
        if total > MAX_LOCALS_PER_FUNCTION as u64 {
            return Err(Error::capacity_exceeded("Too many locals in function"));
        }
        code.locals.push(LocalGroup { count, value_type })?;
    }
    code.num_locals = total as u32;

    let (start, len) = decode_expression(body, &mut module.instructions)?;
    code.start = start as u32;
    code.len = len as u32;

    if !body.is_empty() {
        return Err(kinds::size_mismatch(
            codes::FUNCTION_SIZE_MISMATCH,
            "Function body size does not match its contents",
        ));
    }
    module.codes.push(code)
}

/// Parse the code section.
pub fn parse_code_section(cursor: &mut ByteCursor<'_>, module: &mut Module<'_>) -> Result<()> {
    let count = read_count(cursor, module.codes.capacity() - module.codes.len())?;
    if count != module.functions.len() {
        return Err(Error::validation_error(
            codes::FUNCTION_CODE_MISMATCH,
            "Function and code section lengths differ",
        ));
    }
    for _ in 0..count {
        let size = cursor.parse_uleb32()?;
        let mut body = cursor.sub_cursor(size as usize)?;
        parse_code_body(&mut body, module, size)?;
    }
    Ok(())
}

/// Parse the data section. Only active segments for memory 0 are accepted.
pub fn parse_data_section<'a>(cursor: &mut ByteCursor<'a>, module: &mut Module<'a>) -> Result<()> {
    let count = read_count(cursor, module.data.capacity() - module.data.len())?;
    if module.data_count.is_some_and(|expected| expected as usize != count) {
        return Err(Error::validation_error(
            codes::DATA_COUNT_MISMATCH,
            "Data count does not match the data section",
        ));
    }
    for _ in 0..count {
        match cursor.parse_uleb32()? {
            binary::DATA_ACTIVE => {}
            binary::DATA_ACTIVE_EXPLICIT => {
                if cursor.parse_uleb32()? != 0 {
                    return Err(Error::not_supported(
                        codes::UNSUPPORTED_FEATURE,
                        "Multiple memories are not supported",
                    ));
                }
            }
            binary::DATA_PASSIVE => {
                return Err(Error::not_supported(
                    codes::UNSUPPORTED_FEATURE,
                    "Passive data segments are not supported",
                ))
            }
            _ => return Err(Error::parse_error(codes::INVALID_CONST_EXPR, "Invalid data segment mode")),
        }
        let offset = match decode_const_expr(cursor, ValueType::I32)? {
            Value::I32(offset) => offset as u32,
            _ => return Err(Error::parse_error(codes::INVALID_CONST_EXPR, "Invalid data offset")),
        };
        let len = cursor.parse_uleb32()? as usize;
        let bytes = cursor.parse_bytes(len)?;
        module.data.push(DataSegment { offset, bytes })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwrt_foundation::limits::MAX_TYPES;

    fn parse<'a>(
        parser: fn(&mut ByteCursor<'a>, &mut Module<'a>) -> Result<()>,
        bytes: &'a [u8],
        module: &mut Module<'a>,
    ) -> Result<()> {
        let mut cursor = ByteCursor::new(bytes);
        parser(&mut cursor, module)?;
        assert!(cursor.is_empty(), "parser left {} bytes", cursor.remaining());
        Ok(())
    }

    #[test]
    fn type_section() -> Result<()> {
        let mut module = Module::new();
        let bytes = [0x02, 0x60, 0x02, 0x7F, 0x7D, 0x01, 0x7F, 0x60, 0x00, 0x00];
        parse(parse_type_section, &bytes, &mut module)?;
        assert_eq!(module.types.len(), 2);
        assert_eq!(module.types[0].params.as_slice(), &[ValueType::I32, ValueType::F32]);
        assert_eq!(module.types[0].results.as_slice(), &[ValueType::I32]);
        assert!(module.types[1].params.is_empty());
        Ok(())
    }

    #[test]
    fn type_section_errors() {
        let mut module = Module::new();
        let err = parse(parse_type_section, &[0x01, 0x50, 0x00, 0x00], &mut module).unwrap_err();
        assert_eq!(err.code, codes::INVALID_FUNC_TYPE_TAG);

        let err = parse(parse_type_section, &[0x01, 0x60, 0x01, 0x70, 0x00], &mut module)
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_VALUE_TYPE);

        let err = parse(parse_type_section, &[0x01, 0x60, 0x00, 0x02, 0x7F, 0x7F], &mut module)
            .unwrap_err();
        assert!(err.is_not_supported());
    }

    #[test]
    fn vector_one_past_capacity_writes_nothing() {
        let mut module = Module::new();
        let mut bytes = vec![(MAX_TYPES + 1) as u8];
        for _ in 0..=MAX_TYPES {
            bytes.extend_from_slice(&[0x60, 0x00, 0x00]);
        }
        let err = parse(parse_type_section, &bytes, &mut module).unwrap_err();
        assert!(err.is_capacity_error());
        assert!(module.types.is_empty());
    }

    #[test]
    fn import_section() -> Result<()> {
        let mut module = Module::new();
        parse(parse_type_section, &[0x01, 0x60, 0x01, 0x7F, 0x00], &mut module)?;
        let bytes = [
            0x03, // three imports
            0x03, b'e', b'n', b'v', 0x03, b'l', b'o', b'g', 0x00, 0x00, // func type 0
            0x03, b'e', b'n', b'v', 0x04, b'g', b'a', b'i', b'n', 0x03, 0x7D, 0x01, // mut f32
            0x03, b'e', b'n', b'v', 0x03, b'm', b'e', b'm', 0x02, 0x01, 0x01, 0x02, // memory 1..2
        ];
        parse(parse_import_section, &bytes, &mut module)?;
        assert_eq!(module.imports.len(), 3);
        assert_eq!(module.bindings.len(), 3);
        assert_eq!(module.imports[0].field, "log");
        assert_eq!(module.imports[0].desc, ImportDesc::Function(0));
        assert_eq!(
            module.imports[1].desc,
            ImportDesc::Global(GlobalType { value_type: ValueType::F32, mutable: true })
        );
        assert_eq!(
            module.imports[2].desc,
            ImportDesc::Memory(Limits { min: 1, max: Some(2) })
        );
        assert!(!module.bindings[0].is_bound());
        Ok(())
    }

    #[test]
    fn import_errors() {
        let mut module = Module::new();
        let bytes = [0x01, 0x01, b'a', 0x01, b'b', 0x00, 0x00];
        let err = parse(parse_import_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::INVALID_TYPE_INDEX);

        let bytes = [0x01, 0x01, b'a', 0x01, b'b', 0x03, 0x7F, 0x02];
        let err = parse(parse_import_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::INVALID_MUTABILITY);

        let bytes = [0x01, 0x01, b'a', 0x01, b'b', 0x05];
        let err = parse(parse_import_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::INVALID_IMPORT_KIND);
    }

    #[test]
    fn memory_limits() -> Result<()> {
        let mut module = Module::new();
        parse(parse_memory_section, &[0x01, 0x00, 0x01], &mut module)?;
        assert_eq!(module.memories[0], Limits { min: 1, max: None });

        let mut module = Module::new();
        let err = parse(parse_memory_section, &[0x01, 0x01, 0x02, 0x01], &mut module).unwrap_err();
        assert_eq!(err.code, codes::INVALID_LIMITS);

        let err = parse(parse_memory_section, &[0x02, 0x00, 0x01, 0x00, 0x01], &mut module)
            .unwrap_err();
        assert!(err.is_capacity_error());

        let err = parse(parse_memory_section, &[0x01, 0x00, 0x81, 0x80, 0x04], &mut module)
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_LIMITS);
        Ok(())
    }

    #[test]
    fn tables_are_rejected_unless_empty() -> Result<()> {
        let mut module = Module::new();
        parse(parse_table_section, &[0x00], &mut module)?;
        let err = parse(parse_table_section, &[0x01, 0x70, 0x00, 0x01], &mut module).unwrap_err();
        assert_eq!(err.code, codes::UNSUPPORTED_TABLE);
        Ok(())
    }

    #[test]
    fn global_section() -> Result<()> {
        let mut module = Module::new();
        let bytes = [0x02, 0x7F, 0x01, 0x41, 0x05, 0x0B, 0x7D, 0x00, 0x43, 0x00, 0x00, 0x00, 0x3F, 0x0B];
        parse(parse_global_section, &bytes, &mut module)?;
        assert_eq!(module.globals[0].init, Value::I32(5));
        assert!(module.globals[0].ty.mutable);
        assert_eq!(module.globals[1].init, Value::from_f32(0.5));

        let err = parse(parse_global_section, &[0x01, 0x7F, 0x02, 0x41, 0x00, 0x0B], &mut module)
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_MUTABILITY);
        Ok(())
    }

    #[test]
    fn export_section() -> Result<()> {
        let mut module = Module::new();
        let bytes = [0x02, 0x03, b'r', b'u', b'n', 0x00, 0x01, 0x03, b'm', b'e', b'm', 0x02, 0x00];
        parse(parse_export_section, &bytes, &mut module)?;
        assert_eq!(module.find_exported_function("run"), Some(1));
        assert_eq!(module.exports[1].desc, ExportDesc::Memory(0));

        let err = parse(parse_export_section, &[0x01, 0x01, b'x', 0x04, 0x00], &mut module)
            .unwrap_err();
        assert_eq!(err.code, codes::INVALID_EXPORT_KIND);
        Ok(())
    }

    #[test]
    fn export_name_length_is_bounded() {
        let mut module = Module::new();
        let mut bytes = vec![0x01, (MAX_NAME_LENGTH + 1) as u8];
        bytes.extend(std::iter::repeat_n(b'a', MAX_NAME_LENGTH + 1));
        bytes.extend_from_slice(&[0x00, 0x00]);
        let err = parse(parse_export_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::NAME_TOO_LONG);
    }

    #[test]
    fn code_section() -> Result<()> {
        let mut module = Module::new();
        module.functions.push(0)?;
        // one body: size 6, one group of 2 x i32, i32.const 42, end
        let bytes = [0x01, 0x06, 0x01, 0x02, 0x7F, 0x41, 0x2A, 0x0B];
        parse(parse_code_section, &bytes, &mut module)?;
        let code = module.codes[0];
        assert_eq!(code.num_locals, 2);
        assert_eq!(code.size, 6);
        assert_eq!(code.span(), 0..2);
        Ok(())
    }

    #[test]
    fn code_size_must_match_body() -> Result<()> {
        let mut module = Module::new();
        module.functions.push(0)?;
        let bytes = [0x01, 0x05, 0x00, 0x41, 0x2A, 0x0B, 0x01];
        let err = parse(parse_code_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::FUNCTION_SIZE_MISMATCH);
        Ok(())
    }

    #[test]
    fn code_count_must_match_functions() {
        let mut module = Module::new();
        let bytes = [0x01, 0x02, 0x00, 0x0B];
        let err = parse(parse_code_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::FUNCTION_CODE_MISMATCH);
    }

    #[test]
    fn too_many_locals() -> Result<()> {
        let mut module = Module::new();
        module.functions.push(0)?;
        let bytes = [0x01, 0x08, 0x02, 0x80, 0x01, 0x7F, 0x81, 0x01, 0x7F, 0x0B];
        let err = parse(parse_code_section, &bytes, &mut module).unwrap_err();
        assert!(err.is_capacity_error());
        Ok(())
    }

    #[test]
    fn data_section() -> Result<()> {
        let mut module = Module::new();
        let bytes = [
            0x02, //
            0x00, 0x41, 0x08, 0x0B, 0x02, 0xAA, 0xBB, // active at 8
            0x02, 0x00, 0x41, 0x10, 0x0B, 0x01, 0xCC, // explicit memory 0 at 16
        ];
        parse(parse_data_section, &bytes, &mut module)?;
        assert_eq!(module.data[0].offset, 8);
        assert_eq!(module.data[0].bytes, &[0xAA, 0xBB]);
        assert_eq!(module.data[1].offset, 16);

        let err = parse(parse_data_section, &[0x01, 0x01, 0x00], &mut module).unwrap_err();
        assert!(err.is_not_supported());
        Ok(())
    }

    #[test]
    fn data_count_must_match() {
        let mut module = Module::new();
        module.data_count = Some(2);
        let bytes = [0x01, 0x00, 0x41, 0x00, 0x0B, 0x00];
        let err = parse(parse_data_section, &bytes, &mut module).unwrap_err();
        assert_eq!(err.code, codes::DATA_COUNT_MISMATCH);
    }
}
