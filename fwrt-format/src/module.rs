// FWRT - fwrt-format
// Module: Module Data Model
//
// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! In-memory representation of a decoded module.
//!
//! A [`Module`] is a plain value: every section lives in a fixed-capacity
//! [`StaticVec`], names and data bytes borrow from the input binary, and all
//! code bodies share one instruction pool. The function and global index
//! spaces put imports first, followed by module-defined entries.

use core::ops::Range;

use fwrt_error::{codes, Error, Result};
use fwrt_foundation::{
    limits::{
        MAX_DATA_SEGMENTS, MAX_EXPORTS, MAX_FUNCTIONS, MAX_GLOBALS, MAX_IMPORTS,
        MAX_INSTRUCTIONS, MAX_LOCAL_GROUPS, MAX_MEMORIES, MAX_PARAMS, MAX_RESULTS, MAX_TYPES,
    },
    StaticVec, Value, ValueType,
};

use crate::{instruction::Instruction, native::NativeBinding};

/// Size limits of a memory or table, in pages or elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limits {
    /// Initial size
    pub min: u32,
    /// Optional maximum size
    pub max: Option<u32>,
}

/// A function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FuncType {
    /// Parameter types in order
    pub params:  StaticVec<ValueType, MAX_PARAMS>,
    /// Result types (at most one)
    pub results: StaticVec<ValueType, MAX_RESULTS>,
}

impl FuncType {
    /// Create a function type from parameter and result slices.
    pub fn new(params: &[ValueType], results: &[ValueType]) -> Result<Self> {
        let mut func_type = Self::default();
        func_type.params.extend_from_slice(params)?;
        func_type.results.extend_from_slice(results)?;
        Ok(func_type)
    }
}

/// Type and mutability of a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlobalType {
    /// Value type
    pub value_type: ValueType,
    /// Whether `global.set` is allowed
    pub mutable:    bool,
}

/// What an import provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDesc {
    /// A function of the given type index
    Function(u32),
    /// A table with the given limits
    Table(Limits),
    /// A linear memory with the given limits
    Memory(Limits),
    /// A global
    Global(GlobalType),
    /// An exception tag of the given type index
    Tag(u32),
}

impl Default for ImportDesc {
    fn default() -> Self {
        ImportDesc::Function(0)
    }
}

/// An import entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Import<'a> {
    /// Module name
    pub module: &'a str,
    /// Field name
    pub field:  &'a str,
    /// Imported entity
    pub desc:   ImportDesc,
}

/// What an export refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDesc {
    /// Function index
    Function(u32),
    /// Table index
    Table(u32),
    /// Memory index
    Memory(u32),
    /// Global index
    Global(u32),
}

impl Default for ExportDesc {
    fn default() -> Self {
        ExportDesc::Function(0)
    }
}

/// An export entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Export<'a> {
    /// Exported name
    pub name: &'a str,
    /// Exported entity
    pub desc: ExportDesc,
}

/// A module-defined global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Global {
    /// Type and mutability
    pub ty:   GlobalType,
    /// Value of the constant initializer
    pub init: Value,
}

/// A run of locals of the same type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocalGroup {
    /// Number of locals in the run
    pub count:      u32,
    /// Type of every local in the run
    pub value_type: ValueType,
}

/// A function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Code {
    /// Declared locals, in order
    pub locals:     StaticVec<LocalGroup, MAX_LOCAL_GROUPS>,
    /// Total number of declared locals
    pub num_locals: u32,
    /// First instruction in the module's instruction pool
    pub start:      u32,
    /// Number of instructions, including the final `end`
    pub len:        u32,
    /// Declared body size in bytes
    pub size:       u32,
}

impl Code {
    /// Span of this body in the instruction pool.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        let start = self.start as usize;
        start..start + self.len as usize
    }
}

/// An active data segment for memory 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DataSegment<'a> {
    /// Byte offset in linear memory
    pub offset: u32,
    /// Initial contents
    pub bytes:  &'a [u8],
}

/// A function index resolved against the function index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionRef {
    /// Provided by the host through the binding slot `import`
    Imported {
        /// Position in the import section
        import:     usize,
        /// Signature
        type_index: u32,
    },
    /// Defined by the module
    Defined {
        /// Position in the function and code sections
        code:       usize,
        /// Signature
        type_index: u32,
    },
}

impl FunctionRef {
    /// Type index of the resolved function.
    #[must_use]
    pub const fn type_index(&self) -> u32 {
        match *self {
            FunctionRef::Imported { type_index, .. } | FunctionRef::Defined { type_index, .. } => {
                type_index
            }
        }
    }
}

/// A global index resolved against the global index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalRef {
    /// Provided by the host through the binding slot `import`
    Imported {
        /// Position in the import section
        import: usize,
        /// Type and mutability
        ty:     GlobalType,
    },
    /// Defined by the module at this position of the global section
    Defined(usize),
}

/// A decoded WebAssembly module.
#[derive(Debug, Clone, Default)]
pub struct Module<'a> {
    /// Function types
    pub types:        StaticVec<FuncType, MAX_TYPES>,
    /// Imports
    pub imports:      StaticVec<Import<'a>, MAX_IMPORTS>,
    /// Type index of every module-defined function
    pub functions:    StaticVec<u32, MAX_FUNCTIONS>,
    /// Module-defined memories
    pub memories:     StaticVec<Limits, MAX_MEMORIES>,
    /// Module-defined globals
    pub globals:      StaticVec<Global, MAX_GLOBALS>,
    /// Exports
    pub exports:      StaticVec<Export<'a>, MAX_EXPORTS>,
    /// Start function
    pub start:        Option<u32>,
    /// Function bodies, one per entry of `functions`
    pub codes:        StaticVec<Code, MAX_FUNCTIONS>,
    /// Active data segments
    pub data:         StaticVec<DataSegment<'a>, MAX_DATA_SEGMENTS>,
    /// Segment count announced by the data count section
    pub data_count:   Option<u32>,
    /// Instructions of every body, back to back
    pub instructions: StaticVec<Instruction, MAX_INSTRUCTIONS>,
    /// Host implementation of every import, by import position
    pub bindings:     StaticVec<NativeBinding<'a>, MAX_IMPORTS>,
}

impl<'a> Module<'a> {
    /// Create an empty module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset every section to empty.
    pub fn clear(&mut self) {
        self.types.clear();
        self.imports.clear();
        self.functions.clear();
        self.memories.clear();
        self.globals.clear();
        self.exports.clear();
        self.start = None;
        self.codes.clear();
        self.data.clear();
        self.data_count = None;
        self.instructions.clear();
        self.bindings.clear();
    }

    /// Whether nothing has been decoded into this module.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.imports.is_empty()
            && self.functions.is_empty()
            && self.memories.is_empty()
            && self.globals.is_empty()
            && self.exports.is_empty()
            && self.start.is_none()
            && self.codes.is_empty()
            && self.data.is_empty()
            && self.instructions.is_empty()
    }

    fn count_imports(&self, predicate: impl Fn(&ImportDesc) -> bool) -> usize {
        self.imports.iter().filter(|import| predicate(&import.desc)).count()
    }

    /// Number of imported functions.
    #[must_use]
    pub fn num_imported_functions(&self) -> usize {
        self.count_imports(|desc| matches!(desc, ImportDesc::Function(_)))
    }

    /// Number of imported globals.
    #[must_use]
    pub fn num_imported_globals(&self) -> usize {
        self.count_imports(|desc| matches!(desc, ImportDesc::Global(_)))
    }

    /// Number of imported memories.
    #[must_use]
    pub fn num_imported_memories(&self) -> usize {
        self.count_imports(|desc| matches!(desc, ImportDesc::Memory(_)))
    }

    /// Number of imported tables.
    #[must_use]
    pub fn num_imported_tables(&self) -> usize {
        self.count_imports(|desc| matches!(desc, ImportDesc::Table(_)))
    }

    /// Size of the function index space.
    #[must_use]
    pub fn function_count(&self) -> usize {
        self.num_imported_functions() + self.functions.len()
    }

    /// Size of the global index space.
    #[must_use]
    pub fn global_count(&self) -> usize {
        self.num_imported_globals() + self.globals.len()
    }

    /// Resolve a function index.
    #[must_use]
    pub fn resolve_function(&self, index: u32) -> Option<FunctionRef> {
        let mut remaining = index as usize;
        for (import, entry) in self.imports.iter().enumerate() {
            if let ImportDesc::Function(type_index) = entry.desc {
                if remaining == 0 {
                    return Some(FunctionRef::Imported { import, type_index });
                }
                remaining -= 1;
            }
        }
        self.functions
            .get(remaining)
            .map(|&type_index| FunctionRef::Defined { code: remaining, type_index })
    }

    /// Signature of a function in the function index space.
    #[must_use]
    pub fn function_type(&self, index: u32) -> Option<&FuncType> {
        let function = self.resolve_function(index)?;
        self.types.get(function.type_index() as usize)
    }

    /// Resolve a global index.
    #[must_use]
    pub fn resolve_global(&self, index: u32) -> Option<GlobalRef> {
        let mut remaining = index as usize;
        for (import, entry) in self.imports.iter().enumerate() {
            if let ImportDesc::Global(ty) = entry.desc {
                if remaining == 0 {
                    return Some(GlobalRef::Imported { import, ty });
                }
                remaining -= 1;
            }
        }
        (remaining < self.globals.len()).then_some(GlobalRef::Defined(remaining))
    }

    /// Function index of the export called `name`, if it is a function.
    #[must_use]
    pub fn find_exported_function(&self, name: &str) -> Option<u32> {
        self.exports.iter().find_map(|export| match export.desc {
            ExportDesc::Function(index) if export.name == name => Some(index),
            _ => None,
        })
    }

    /// Instructions of a function body.
    pub fn body(&self, code: &Code) -> Result<&[Instruction]> {
        self.instructions.get(code.span()).ok_or(Error::validation_error(
            codes::INVALID_FUNCTION_INDEX,
            "Code body lies outside the instruction pool",
        ))
    }

    /// Limits of the module's memory, whether defined or imported.
    #[must_use]
    pub fn memory_limits(&self) -> Option<Limits> {
        self.imports
            .iter()
            .find_map(|import| match import.desc {
                ImportDesc::Memory(limits) => Some(limits),
                _ => None,
            })
            .or_else(|| self.memories.first().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import<'a>(module: &'a str, field: &'a str, desc: ImportDesc) -> Import<'a> {
        Import { module, field, desc }
    }

    #[test]
    fn function_index_space_puts_imports_first() -> Result<()> {
        let mut module = Module::new();
        module.types.push(FuncType::new(&[ValueType::I32], &[])?)?;
        module.types.push(FuncType::new(&[], &[ValueType::I32])?)?;
        module.imports.push(import("env", "log", ImportDesc::Function(0)))?;
        module.imports.push(import(
            "env",
            "gain",
            ImportDesc::Global(GlobalType { value_type: ValueType::I32, mutable: true }),
        ))?;
        module.imports.push(import("env", "tick", ImportDesc::Function(1)))?;
        module.functions.push(1)?;

        assert_eq!(module.function_count(), 3);
        assert_eq!(
            module.resolve_function(1),
            Some(FunctionRef::Imported { import: 2, type_index: 1 })
        );
        assert_eq!(
            module.resolve_function(2),
            Some(FunctionRef::Defined { code: 0, type_index: 1 })
        );
        assert_eq!(module.resolve_function(3), None);
        assert_eq!(module.function_type(0).map(|ty| ty.params.len()), Some(1));
        Ok(())
    }

    #[test]
    fn global_index_space_puts_imports_first() -> Result<()> {
        let mut module = Module::new();
        let ty = GlobalType { value_type: ValueType::I32, mutable: false };
        module.imports.push(import("env", "g", ImportDesc::Global(ty)))?;
        module.globals.push(Global { ty, init: Value::I32(7) })?;

        assert_eq!(module.resolve_global(0), Some(GlobalRef::Imported { import: 0, ty }));
        assert_eq!(module.resolve_global(1), Some(GlobalRef::Defined(0)));
        assert_eq!(module.resolve_global(2), None);
        Ok(())
    }

    #[test]
    fn exported_functions_are_found_by_name() -> Result<()> {
        let mut module = Module::new();
        module.exports.push(Export { name: "memory", desc: ExportDesc::Memory(0) })?;
        module.exports.push(Export { name: "run", desc: ExportDesc::Function(4) })?;

        assert_eq!(module.find_exported_function("run"), Some(4));
        assert_eq!(module.find_exported_function("memory"), None);
        assert_eq!(module.find_exported_function("missing"), None);
        Ok(())
    }

    #[test]
    fn clear_empties_every_section() -> Result<()> {
        let mut module = Module::new();
        module.functions.push(0)?;
        module.start = Some(0);
        assert!(!module.is_empty());
        module.clear();
        assert!(module.is_empty());
        Ok(())
    }
}
