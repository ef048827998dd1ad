// Copyright (c) 2025 Ralf Anton Beier
// Licensed under the MIT license.
// SPDX-License-Identifier: MIT

//! Binding host implementations to module imports.
//!
//! Both binders fill every matching import slot and report whether anything
//! matched. A module with no matching import is not an error: unbound
//! imports only fail when the interpreter reaches them.

use core::sync::atomic::AtomicU32;

use fwrt_error::{codes, Error, Result};
use fwrt_format::{FunctionBinding, ImportDesc, Module, NativeBinding, NativeFunction};
use log::debug;

use crate::signature::parse_signature;

/// Bind `callback` to every function import named `module_name`.`field`.
///
/// The signature must match the parameter and result types of each matching
/// import. Returns `Ok(false)` if the module has no such import. On error no
/// slot is modified.
pub fn bind_function<'a>(
    module: &mut Module<'a>,
    module_name: &str,
    field: &str,
    signature: &str,
    callback: &'a dyn NativeFunction,
) -> Result<bool> {
    let signature = parse_signature(signature)?;

    let mut matched = false;
    for import in module.imports.iter() {
        let ImportDesc::Function(type_index) = import.desc else { continue };
        if import.module != module_name || import.field != field {
            continue;
        }
        let func_type = module.types.get(type_index as usize).ok_or(Error::validation_error(
            codes::INVALID_TYPE_INDEX,
            "Import refers to a missing type",
        ))?;
        if !signature.matches(&func_type.params, &func_type.results) {
            return Err(Error::validation_error(
                codes::SIGNATURE_MISMATCH,
                "Native signature does not match the import",
            ));
        }
        matched = true;
    }
    if !matched {
        return Ok(false);
    }

    let binding = NativeBinding::Function(FunctionBinding {
        callback,
        inputs: signature.inputs.len() as u32,
        outputs: signature.outputs.len() as u32,
    });
    let Module { imports, bindings, .. } = module;
    for (import, slot) in imports.iter().zip(bindings.iter_mut()) {
        if matches!(import.desc, ImportDesc::Function(_))
            && import.module == module_name
            && import.field == field
        {
            *slot = binding;
        }
    }
    debug!(
        "bound native function {}.{} ({} inputs, {} outputs)",
        module_name,
        field,
        signature.inputs.len(),
        signature.outputs.len()
    );
    Ok(true)
}

/// Bind the host cell `cell` to every 32-bit global import named `name`.
///
/// Matching is by field name only. A 64-bit global import with that name is
/// a type error. Returns `Ok(false)` if the module has no such import.
pub fn bind_variable<'a>(module: &mut Module<'a>, name: &str, cell: &'a AtomicU32) -> Result<bool> {
    let mut matched = false;
    for import in module.imports.iter() {
        let ImportDesc::Global(ty) = import.desc else { continue };
        if import.field != name {
            continue;
        }
        if !ty.value_type.is_32_bit() {
            return Err(Error::type_error("Host variables must be 32 bits wide"));
        }
        matched = true;
    }
    if !matched {
        return Ok(false);
    }

    let Module { imports, bindings, .. } = module;
    for (import, slot) in imports.iter().zip(bindings.iter_mut()) {
        if matches!(import.desc, ImportDesc::Global(_)) && import.field == name {
            *slot = NativeBinding::Variable(cell);
        }
    }
    debug!("bound native variable {}", name);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fwrt_format::{FuncType, GlobalType, Import, NativeContext};
    use fwrt_foundation::ValueType;

    fn noop(_: &mut dyn NativeContext) -> Result<()> {
        Ok(())
    }

    fn module_with_imports<'a>() -> Module<'a> {
        let mut module = Module::new();
        module.types.push(FuncType::new(&[ValueType::I32], &[ValueType::I32]).unwrap()).unwrap();
        module.types.push(FuncType::new(&[], &[]).unwrap()).unwrap();
        let imports = [
            Import { module: "env", field: "abs", desc: ImportDesc::Function(0) },
            Import { module: "env", field: "tick", desc: ImportDesc::Function(1) },
            Import {
                module: "env",
                field: "gain",
                desc: ImportDesc::Global(GlobalType { value_type: ValueType::F32, mutable: true }),
            },
            Import {
                module: "env",
                field: "wide",
                desc: ImportDesc::Global(GlobalType { value_type: ValueType::I64, mutable: false }),
            },
        ];
        for import in imports {
            module.imports.push(import).unwrap();
            module.bindings.push(NativeBinding::Unbound).unwrap();
        }
        module
    }

    #[test]
    fn function_binding_checks_arity() {
        let callback = noop;
        let mut module = module_with_imports();

        assert_eq!(bind_function(&mut module, "env", "abs", "(i)i", &callback), Ok(true));
        assert!(matches!(
            module.bindings[0],
            NativeBinding::Function(FunctionBinding { inputs: 1, outputs: 1, .. })
        ));

        let err = bind_function(&mut module, "env", "tick", "(i)i", &callback).unwrap_err();
        assert_eq!(err.code, codes::SIGNATURE_MISMATCH);
        assert!(!module.bindings[1].is_bound());
    }

    #[test]
    fn missing_function_import_is_not_an_error() {
        let callback = noop;
        let mut module = module_with_imports();
        assert_eq!(bind_function(&mut module, "env", "nope", "()", &callback), Ok(false));
        assert_eq!(bind_function(&mut module, "other", "abs", "(i)i", &callback), Ok(false));
        assert!(bind_function(&mut module, "env", "nope", "bad", &callback).is_err());
    }

    #[test]
    fn variable_binding() {
        let cell = AtomicU32::new(0);
        let mut module = module_with_imports();

        assert_eq!(bind_variable(&mut module, "gain", &cell), Ok(true));
        assert!(matches!(module.bindings[2], NativeBinding::Variable(_)));
        assert_eq!(bind_variable(&mut module, "missing", &cell), Ok(false));

        let err = bind_variable(&mut module, "wide", &cell).unwrap_err();
        assert_eq!(err.category, fwrt_error::ErrorCategory::Type);
        assert!(!module.bindings[3].is_bound());
    }
}
