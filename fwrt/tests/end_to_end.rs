//! Decode, bind and run through the facade.

use fwrt::prelude::*;

fn wasm(text: &str) -> Vec<u8> {
    wat::parse_str(text).expect("test module should assemble")
}

const SENSOR: &str = r#"(module
    (import "env" "read_sensor" (func $read (result i32)))
    (import "env" "threshold" (global $threshold i32))
    (import "env" "alarms" (global $alarms (mut i32)))
    (memory 1)
    (data (i32.const 0) "\01\00\00\00")
    (func (export "sample") (param $slot i32) (result i32) (local $value i32)
        call $read
        local.set $value
        local.get $slot
        i32.const 4
        i32.mul
        local.get $value
        i32.store offset=16
        local.get $value
        global.get $threshold
        i32.gt_s
        local.tee $slot
        global.get $alarms
        i32.add
        global.set $alarms
        local.get $slot)
    (func (export "scale") (result i32)
        i32.const 0
        i32.load))"#;

#[test]
fn sensor_program_runs_against_host_state() {
    let readings = AtomicU32::new(0);
    let read_sensor = |ctx: &mut dyn NativeContext| -> Result<()> {
        let next = readings.fetch_add(50, Ordering::Relaxed) + 50;
        ctx.push_u32(next)
    };
    let threshold = AtomicU32::new(120);
    let alarms = AtomicU32::new(0);

    let bytes = wasm(SENSOR);
    let mut module = fwrt::decode_module(&bytes).unwrap();
    assert_eq!(fwrt::bind_function(&mut module, "env", "read_sensor", "()i", &read_sensor), Ok(true));
    assert_eq!(fwrt::bind_variable(&mut module, "threshold", &threshold), Ok(true));
    assert_eq!(fwrt::bind_variable(&mut module, "alarms", &alarms), Ok(true));

    let mut memory = vec![0u8; fwrt::required_memory(&module).unwrap()];
    let mut vm = fwrt::create_vm(&module, &mut memory).unwrap();
    let sample = fwrt::find_exported_function(&module, "sample").unwrap();

    let mut flags = Vec::new();
    for slot in 0..3 {
        vm.push_i32(slot).unwrap();
        fwrt::call(&mut vm, sample).unwrap();
        flags.push(vm.pop_i32().unwrap());
    }
    assert_eq!(flags, [0, 0, 1]);
    assert_eq!(alarms.load(Ordering::Relaxed), 1);
    assert_eq!(&vm.memory()[16..28], &[50, 0, 0, 0, 100, 0, 0, 0, 150, 0, 0, 0]);

    vm.call_export("scale").unwrap();
    assert_eq!(vm.pop_i32(), Ok(1));
    assert_eq!(vm.stack_depth(), 0);
}

#[test]
fn decode_reuses_caller_storage() {
    let first = wasm(SENSOR);
    let second = wasm(r#"(module (func (export "answer") (result i32) i32.const 42))"#);
    let mut module = Module::new();

    fwrt::decode(&mut module, &first).unwrap();
    assert_eq!(module.imports.len(), 3);

    fwrt::decode(&mut module, &second).unwrap();
    assert!(module.imports.is_empty());
    assert_eq!(module.exports.len(), 1);

    let mut memory = [0u8; 0];
    let mut vm = fwrt::create_vm(&module, &mut memory).unwrap();
    vm.call_export("answer").unwrap();
    assert_eq!(vm.pop_i32(), Ok(42));
}

#[test]
fn header_only_module_has_no_entries() {
    let module = fwrt::decode_module(b"\0asm\x01\x00\x00\x00").unwrap();
    assert!(module.types.is_empty());
    assert!(module.imports.is_empty());
    assert!(module.functions.is_empty());
    assert!(module.exports.is_empty());
    assert_eq!(fwrt::BINARY_VERSION, 1);
}

#[test]
fn bad_magic_leaves_the_module_empty() {
    let valid = wasm(SENSOR);
    let mut module = Module::new();
    fwrt::decode(&mut module, &valid).unwrap();

    let err = fwrt::decode(&mut module, b"XASM\x01\x00\x00\x00").unwrap_err();
    assert_eq!(err.category, ErrorCategory::Parse);
    assert_eq!(err.code, codes::INVALID_MAGIC);
    assert!(module.is_empty());
}

#[test]
fn signature_arity_is_checked_at_bind_time() {
    let callback = |_: &mut dyn NativeContext| -> Result<()> { Ok(()) };
    let bytes = wasm(SENSOR);
    let mut module = fwrt::decode_module(&bytes).unwrap();
    let err = fwrt::bind_function(&mut module, "env", "read_sensor", "(i)i", &callback).unwrap_err();
    assert_eq!(err.code, codes::SIGNATURE_MISMATCH);
    assert!(fwrt::parse_signature("(i").is_err());
}
