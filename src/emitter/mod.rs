//! Emit the WebAssembly binary format from a declarative module description.
//!
//! The encoder is synchronous and deterministic: one preparation pass builds
//! the name → index lookups (and derives the exports), then the sections are
//! emitted in the order the binary format requires. Failures abort the
//! encode at the offending construct.

mod context;
mod errors;
mod instruction;
mod module;
mod sections;
mod types;
mod values;

pub use errors::EmitError;
pub use sections::ModuleSection;

use crate::model::{CustomSection, Module};
use context::ModuleIndices;
use std::io::Write;

/// Emits a binary representation of a WebAssembly module to a `Write`
/// output, returning the number of bytes written.
///
/// See <https://webassembly.github.io/spec/core/binary/index.html>
///
/// # Examples
/// ## Empty
/// ```rust
/// use wasm_composer::{emit_binary, Module};
///
/// let mut buffer = Vec::new();
/// emit_binary(&Module::empty(), &mut buffer).unwrap();
///
/// assert_eq!(buffer, vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
/// ```
pub fn emit_binary<O: Write>(module: &Module, output: &mut O) -> Result<usize, EmitError> {
    sections::emit_module(module, output)
}

/// Encodes a module to its binary form. The returned buffer is only
/// produced on success; a failed encode leaves nothing behind.
///
/// # Examples
/// ```rust
/// use wasm_composer::{encode_module, Function, Module, ValueType, ops};
///
/// let mut builder = Module::builder();
/// builder
///     .add_function(
///         Function::new(
///             "doNothing",
///             vec![],
///             vec![ValueType::I32],
///             vec![ops::i32::constant(0), ops::control::end()],
///         )
///         .exported(),
///     )
///     .unwrap();
///
/// let bytes = encode_module(&builder.build()).unwrap();
///
/// assert_eq!(&bytes[..4], b"\0asm");
/// ```
pub fn encode_module(module: &Module) -> Result<Vec<u8>, EmitError> {
    let mut buffer = Vec::new();

    emit_binary(module, &mut buffer)?;

    Ok(buffer)
}

/// Creates a live [`Encoder`] over the module for incremental assembly.
/// The preparation pass runs immediately, so malformed definitions are
/// rejected before any bytes are produced.
pub fn new_encoder(module: &Module) -> Result<Encoder<'_>, EmitError> {
    Ok(Encoder {
        module,
        indices: ModuleIndices::new(module)?,
        output: Vec::new(),
    })
}

/// An incremental encoder whose methods mirror the section emitters, for
/// callers that assemble output piecewise or interleave custom sections.
/// Sections are appended in call order; [`Encoder::finish`] yields the
/// accumulated bytes.
pub struct Encoder<'a> {
    module: &'a Module,
    indices: ModuleIndices,
    output: Vec<u8>,
}

impl Encoder<'_> {
    /// Appends the preamble: magic bytes and format version.
    pub fn preamble(&mut self) -> Result<usize, EmitError> {
        sections::emit_preamble(&mut self.output)
    }

    /// Appends the type section (omitted while empty).
    pub fn type_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_type_section(self.module, &mut self.output)
    }

    /// Appends the import section (omitted while empty).
    pub fn import_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_import_section(self.module, &mut self.output)
    }

    /// Appends the function section (omitted while empty).
    pub fn function_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_function_section(self.module, &mut self.output)
    }

    /// Appends the table section (omitted while empty).
    pub fn table_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_table_section(self.module, &mut self.output)
    }

    /// Appends the memory section (omitted while empty).
    pub fn memory_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_memory_section(self.module, &mut self.output)
    }

    /// Appends the global section (omitted while empty).
    pub fn global_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_global_section(self.module, &self.indices, &mut self.output)
    }

    /// Appends the export section derived from the export flags.
    pub fn export_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_export_section(self.module, &mut self.output)
    }

    /// Appends the start section when the module has a start hook.
    pub fn start_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_start_section(self.module, &self.indices, &mut self.output)
    }

    /// Appends the element section (omitted while empty).
    pub fn element_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_element_section(self.module, &self.indices, &mut self.output)
    }

    /// Appends the data count section when there are data segments.
    pub fn data_count_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_data_count_section(self.module, &mut self.output)
    }

    /// Appends the code section (omitted while empty).
    pub fn code_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_code_section(self.module, &self.indices, &mut self.output)
    }

    /// Appends the data section (omitted while empty).
    pub fn data_section(&mut self) -> Result<usize, EmitError> {
        sections::emit_data_section(self.module, &self.indices, &mut self.output)
    }

    /// Appends one custom section: a name and raw content bytes.
    pub fn custom_section(&mut self, section: &CustomSection) -> Result<usize, EmitError> {
        sections::emit_custom_section(section, &mut self.output)
    }

    /// The bytes accumulated so far.
    pub fn finish(self) -> Vec<u8> {
        self.output
    }
}

/// Counts the number of bytes written, but does else nothing with the bytes.
#[derive(Copy, Clone, Debug, Ord, PartialOrd, Eq, PartialEq)]
pub(crate) struct CountingWrite {
    bytes: usize,
}

impl CountingWrite {
    /// Create a default instance of a counting write.
    pub fn new() -> Self {
        CountingWrite { bytes: 0 }
    }

    /// The number of bytes written so far.
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Write for CountingWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.bytes += buf.len();

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }

    fn write_all(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.bytes += buf.len();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leb128;
    use crate::model::{
        CustomSection, DataMode, DataSegment, ElementInitializer, ElementMode, ElementSegment,
        Function, Global, GlobalType, Import, ImportDescription, Limit, Memory, MemoryType,
        Module, ReferenceType, Table, TableType, ValueType,
    };
    use crate::ops;

    fn instantiate(module: &Module) -> (wasmtime::Store<()>, wasmtime::Instance) {
        let bytes = encode_module(module).unwrap();
        let engine = wasmtime::Engine::default();
        let compiled = wasmtime::Module::new(&engine, &bytes).unwrap();
        let mut store = wasmtime::Store::new(&engine, ());
        let instance = wasmtime::Instance::new(&mut store, &compiled, &[]).unwrap();

        (store, instance)
    }

    /// The section ids of the encoded module, in emission order.
    fn section_ids(bytes: &[u8]) -> Vec<u8> {
        let mut remaining = &bytes[8..];
        let mut ids = Vec::new();

        while let Some((&id, rest)) = remaining.split_first() {
            let (rest, size): (&[u8], u32) = leb128::parse_unsigned(rest).unwrap();

            ids.push(id);
            remaining = &rest[size as usize..];
        }

        ids
    }

    fn do_nothing() -> Module {
        let mut builder = Module::builder();

        builder
            .add_function(
                Function::new(
                    "doNothing",
                    vec![],
                    vec![ValueType::I32],
                    vec![ops::i32::constant(0), ops::control::end()],
                )
                .exported(),
            )
            .unwrap();

        builder.build()
    }

    fn add() -> Module {
        let mut builder = Module::builder();

        builder
            .add_function(
                Function::new(
                    "add",
                    vec![
                        ("num1".into(), ValueType::I32),
                        ("num2".into(), ValueType::I32),
                    ],
                    vec![ValueType::I32],
                    vec![
                        ops::local::get("num1"),
                        ops::local::get("num2"),
                        ops::i32::add(),
                        ops::control::end(),
                    ],
                )
                .exported(),
            )
            .unwrap();

        builder.build()
    }

    #[test]
    fn empty_module_is_the_preamble() {
        let bytes = encode_module(&Module::empty()).unwrap();

        assert_eq!(bytes, vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn encoding_is_deterministic() {
        let module = add();

        assert_eq!(encode_module(&module).unwrap(), encode_module(&module).unwrap());
    }

    #[test]
    fn do_nothing_module_bytes() {
        let mut expected: Vec<u8> = Vec::new();

        expected.extend(b"\x00\x61\x73\x6D\x01\x00\x00\x00");
        // Types: one signature () -> i32.
        expected.extend([0x01, 0x05, 0x01, 0x60, 0x00, 0x01, 0x7F]);
        // Functions: type index 0.
        expected.extend([0x03, 0x02, 0x01, 0x00]);
        // Exports: "doNothing", a function, index 0.
        expected.extend([0x07, 0x0D, 0x01, 0x09]);
        expected.extend(b"doNothing");
        expected.extend([0x00, 0x00]);
        // Code: no locals, i32.const 0, end.
        expected.extend([0x0A, 0x06, 0x01, 0x04, 0x00, 0x41, 0x00, 0x0B]);

        assert_eq!(encode_module(&do_nothing()).unwrap(), expected);
    }

    #[test]
    fn do_nothing_returns_zero() {
        let (mut store, instance) = instantiate(&do_nothing());
        let function = instance
            .get_typed_func::<(), i32>(&mut store, "doNothing")
            .unwrap();

        assert_eq!(function.call(&mut store, ()).unwrap(), 0);
    }

    #[test]
    fn add_code_section_bytes() {
        let bytes = encode_module(&add()).unwrap();
        let body = [0x00, 0x20, 0x00, 0x20, 0x01, 0x6A, 0x0B];

        assert!(
            bytes.windows(body.len()).any(|window| window == body),
            "code body not found in {bytes:02X?}"
        );
    }

    #[test]
    fn add_computes_sums() {
        let (mut store, instance) = instantiate(&add());
        let function = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, "add")
            .unwrap();

        assert_eq!(function.call(&mut store, (5, 3)).unwrap(), 8);
    }

    #[test]
    fn if_else_blocks_carry_their_result_type() {
        let mut builder = Module::builder();

        builder
            .add_function(
                Function::new(
                    "isGreaterThan",
                    vec![
                        ("num1".into(), ValueType::I32),
                        ("num2".into(), ValueType::I32),
                    ],
                    vec![ValueType::I32],
                    vec![
                        ops::local::get("num1"),
                        ops::local::get("num2"),
                        ops::i32::gt_s(),
                        ops::control::if_(
                            "greater",
                            Some(ValueType::I32),
                            vec![
                                ops::i32::constant(1),
                                ops::control::else_(vec![ops::i32::constant(0)]),
                                ops::control::end(),
                            ],
                        ),
                        ops::control::end(),
                    ],
                )
                .exported(),
            )
            .unwrap();

        let module = builder.build();
        let bytes = encode_module(&module).unwrap();

        // Block type i32 after the if opcode.
        assert!(bytes.windows(2).any(|window| window == [0x04, 0x7F]));

        let (mut store, instance) = instantiate(&module);
        let function = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, "isGreaterThan")
            .unwrap();

        assert_eq!(function.call(&mut store, (5, 3)).unwrap(), 1);
        assert_eq!(function.call(&mut store, (3, 5)).unwrap(), 0);
    }

    #[test]
    fn loops_with_declared_locals() {
        let mut builder = Module::builder();

        builder
            .add_function(
                Function::new(
                    "add10_KTimes",
                    vec![
                        ("num".into(), ValueType::I32),
                        ("times".into(), ValueType::I32),
                    ],
                    vec![ValueType::I32],
                    vec![
                        ops::control::loop_(
                            "again",
                            None,
                            vec![
                                ops::local::get("num"),
                                ops::i32::constant(10),
                                ops::i32::add(),
                                ops::local::set("num"),
                                ops::local::get("counter"),
                                ops::i32::constant(1),
                                ops::i32::add(),
                                ops::local::tee("counter"),
                                ops::local::get("times"),
                                ops::i32::lt_s(),
                                ops::control::br_if("again"),
                                ops::control::end(),
                            ],
                        ),
                        ops::local::get("num"),
                        ops::control::end(),
                    ],
                )
                .with_locals(vec![("counter".into(), ValueType::I32)])
                .exported(),
            )
            .unwrap();

        let module = builder.build();
        let bytes = encode_module(&module).unwrap();

        // One locals group of a single i32.
        assert!(bytes.windows(3).any(|window| window == [0x01, 0x01, 0x7F]));

        let (mut store, instance) = instantiate(&module);
        let function = instance
            .get_typed_func::<(i32, i32), i32>(&mut store, "add10_KTimes")
            .unwrap();

        assert_eq!(function.call(&mut store, (10, 7)).unwrap(), 80);
    }

    fn full_module() -> Module {
        let mut builder = Module::builder();

        builder
            .add_function(
                Function::new("run", vec![], vec![], vec![ops::control::end()]).exported(),
            )
            .unwrap();
        builder
            .add_import(Import::new("env", "log", ImportDescription::Function(0)))
            .unwrap();
        builder
            .add_table(Table::new(
                "handlers",
                TableType::new(ReferenceType::function(), Limit::unbounded(1)),
            ))
            .unwrap();
        builder
            .add_memory(Memory::new("heap", MemoryType::new(Limit::unbounded(1))))
            .unwrap();
        builder
            .add_global(Global::new(
                "answer",
                GlobalType::immutable(ValueType::I32),
                vec![ops::i32::constant(42), ops::control::end()],
            ))
            .unwrap();
        builder
            .add_element(ElementSegment::new(
                "startup",
                ReferenceType::function(),
                ElementMode::Active {
                    table: "handlers".into(),
                    offset: vec![ops::i32::constant(0), ops::control::end()],
                },
                ElementInitializer::Functions(vec!["run".into()]),
            ))
            .unwrap();
        builder
            .add_data(DataSegment::new(
                "greeting",
                DataMode::Active {
                    memory: "heap".into(),
                    offset: vec![ops::i32::constant(0), ops::control::end()],
                },
                Vec::from("hi".as_bytes()),
            ))
            .unwrap();
        builder.set_start(Some("run".into()));
        builder.add_custom_section(CustomSection::new(
            "producer",
            Vec::from("wasm-composer".as_bytes()),
        ));

        builder.build()
    }

    #[test]
    fn sections_follow_the_specified_order() {
        let bytes = encode_module(&full_module()).unwrap();

        assert_eq!(
            section_ids(&bytes),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 10, 11, 0]
        );
    }

    #[test]
    fn full_modules_validate() {
        let bytes = encode_module(&full_module()).unwrap();
        let engine = wasmtime::Engine::default();

        wasmtime::Module::new(&engine, &bytes).unwrap();
    }

    #[test]
    fn incremental_encoding_matches_the_one_shot_form() {
        let module = add();
        let mut encoder = new_encoder(&module).unwrap();

        encoder.preamble().unwrap();
        encoder.type_section().unwrap();
        encoder.import_section().unwrap();
        encoder.function_section().unwrap();
        encoder.table_section().unwrap();
        encoder.memory_section().unwrap();
        encoder.global_section().unwrap();
        encoder.export_section().unwrap();
        encoder.start_section().unwrap();
        encoder.element_section().unwrap();
        encoder.data_count_section().unwrap();
        encoder.code_section().unwrap();
        encoder.data_section().unwrap();

        assert_eq!(encoder.finish(), encode_module(&module).unwrap());
    }

    #[test]
    fn custom_sections_may_interleave() {
        let module = Module::empty();
        let note = CustomSection::new("note", vec![0xAB]);
        let mut encoder = new_encoder(&module).unwrap();

        encoder.preamble().unwrap();
        encoder.custom_section(&note).unwrap();

        let bytes = encoder.finish();

        assert_eq!(section_ids(&bytes), vec![0]);
        assert_eq!(
            &bytes[8..],
            &[0x00, 0x06, 0x04, b'n', b'o', b't', b'e', 0xAB]
        );
    }

    #[test]
    fn unresolved_start_hooks_abort_the_encode() {
        let mut builder = Module::builder();
        builder.set_start(Some("missing".into()));

        match encode_module(&builder.build()) {
            Err(EmitError::UnresolvedName(name, "function")) => {
                assert_eq!(name, "missing".into())
            }
            other => panic!("expected an unresolved start hook, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_element_segments_are_malformed() {
        let mut builder = Module::builder();

        builder
            .add_function(Function::new("f", vec![], vec![], vec![ops::control::end()]))
            .unwrap();
        builder
            .add_element(ElementSegment::new(
                "segment",
                ReferenceType::external(),
                ElementMode::Passive,
                ElementInitializer::Functions(vec!["f".into()]),
            ))
            .unwrap();

        assert!(matches!(
            encode_module(&builder.build()),
            Err(EmitError::MalformedInput(_))
        ));
    }
}
