//! WebAssembly model of modules and their segments.
//!
//! Every module-scoped entity carries a name unique within its kind; the
//! encoder assigns indices in declaration order and resolves all symbolic
//! references against them.

use crate::model::indices::TypeIndex;
use crate::model::types::*;
use crate::model::{Instruction, ModelError, Name};
use std::convert::TryFrom;

/// A function definition: an ordered parameter mapping, result types,
/// declared locals and a body. The function's signature occupies the type
/// index equal to its own function index, and its body must be terminated by
/// an explicit `end` instruction.
///
/// # Examples
/// ```rust
/// use wasm_composer::{Function, ValueType, ops};
///
/// let function = Function::new(
///     "add",
///     vec![("num1".into(), ValueType::I32), ("num2".into(), ValueType::I32)],
///     vec![ValueType::I32],
///     vec![
///         ops::local::get("num1"),
///         ops::local::get("num2"),
///         ops::i32::add(),
///         ops::control::end(),
///     ],
/// )
/// .exported();
///
/// assert!(function.is_exported());
/// assert_eq!(function.params().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    name: Name,
    exported: bool,
    params: Vec<(Name, ValueType)>,
    results: Vec<ValueType>,
    locals: Vec<(Name, ValueType)>,
    body: Vec<Instruction>,
}

impl Function {
    pub fn new<N: Into<Name>>(
        name: N,
        params: Vec<(Name, ValueType)>,
        results: Vec<ValueType>,
        body: Vec<Instruction>,
    ) -> Self {
        Function {
            name: name.into(),
            exported: false,
            params,
            results,
            locals: Vec::new(),
            body,
        }
    }

    /// Declares additional locals, indexed after the parameters in
    /// declaration order.
    pub fn with_locals(mut self, locals: Vec<(Name, ValueType)>) -> Self {
        self.locals = locals;
        self
    }

    /// Marks the function for export under its own name.
    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn params(&self) -> &[(Name, ValueType)] {
        &self.params
    }

    pub fn results(&self) -> &[ValueType] {
        &self.results
    }

    pub fn locals(&self) -> &[(Name, ValueType)] {
        &self.locals
    }

    pub fn body(&self) -> &[Instruction] {
        &self.body
    }

    /// The function's signature as it appears in the types section.
    pub fn signature(&self) -> FunctionSignature {
        FunctionSignature::new(
            self.params.iter().map(|(_, kind)| *kind).collect(),
            self.results.clone(),
        )
    }
}

/// A global variable definition with a caller-terminated initializer
/// expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Global {
    name: Name,
    exported: bool,
    kind: GlobalType,
    initializer: Vec<Instruction>,
}

impl Global {
    pub fn new<N: Into<Name>>(name: N, kind: GlobalType, initializer: Vec<Instruction>) -> Self {
        Global {
            name: name.into(),
            exported: false,
            kind,
            initializer,
        }
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn kind(&self) -> &GlobalType {
        &self.kind
    }

    pub fn initializer(&self) -> &[Instruction] {
        &self.initializer
    }
}

/// A table definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    name: Name,
    exported: bool,
    kind: TableType,
}

impl Table {
    pub fn new<N: Into<Name>>(name: N, kind: TableType) -> Self {
        Table {
            name: name.into(),
            exported: false,
            kind,
        }
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn kind(&self) -> &TableType {
        &self.kind
    }
}

/// A linear memory definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Memory {
    name: Name,
    exported: bool,
    kind: MemoryType,
}

impl Memory {
    pub fn new<N: Into<Name>>(name: N, kind: MemoryType) -> Self {
        Memory {
            name: name.into(),
            exported: false,
            kind,
        }
    }

    pub fn exported(mut self) -> Self {
        self.exported = true;
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }

    pub fn kind(&self) -> &MemoryType {
        &self.kind
    }
}

/// A named user-defined type, indexed after the function signatures in the
/// types section.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeDefinition {
    name: Name,
    definition: DefinedType,
}

impl TypeDefinition {
    pub fn new<N: Into<Name>>(name: N, definition: DefinedType) -> Self {
        TypeDefinition {
            name: name.into(),
            definition,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn definition(&self) -> &DefinedType {
        &self.definition
    }
}

/// An import of an external value into the module.
///
/// Import payloads reference types by raw index; imported entities do not
/// join the name-resolved index spaces.
///
/// See <https://webassembly.github.io/spec/core/syntax/modules.html#imports>
#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    module: Name,
    name: Name,
    description: ImportDescription,
}

impl Import {
    pub fn new<M: Into<Name>, N: Into<Name>>(
        module: M,
        name: N,
        description: ImportDescription,
    ) -> Self {
        Import {
            module: module.into(),
            name: name.into(),
            description,
        }
    }

    pub fn module(&self) -> &Name {
        &self.module
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn description(&self) -> &ImportDescription {
        &self.description
    }
}

/// The kind-specific payload of an import.
#[derive(Clone, Debug, PartialEq)]
pub enum ImportDescription {
    Function(TypeIndex),
    Table(TableType),
    Memory(MemoryType),
    Global(GlobalType),
}

/// The mode of an element segment.
///
/// See <https://webassembly.github.io/spec/core/syntax/modules.html#element-segments>
#[derive(Clone, Debug, PartialEq)]
pub enum ElementMode {
    /// Copied into the named table at the given offset during instantiation.
    /// The offset expression is caller-terminated with `end`.
    Active { table: Name, offset: Vec<Instruction> },
    Passive,
    Declarative,
}

/// The contents of an element segment: either function names or initializer
/// expression sequences, each caller-terminated with `end`.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementInitializer {
    Functions(Vec<Name>),
    Expressions(Vec<Vec<Instruction>>),
}

/// An element segment definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSegment {
    name: Name,
    kind: ReferenceType,
    mode: ElementMode,
    initializers: ElementInitializer,
}

impl ElementSegment {
    pub fn new<N: Into<Name>>(
        name: N,
        kind: ReferenceType,
        mode: ElementMode,
        initializers: ElementInitializer,
    ) -> Self {
        ElementSegment {
            name: name.into(),
            kind,
            mode,
            initializers,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn kind(&self) -> &ReferenceType {
        &self.kind
    }

    pub fn mode(&self) -> &ElementMode {
        &self.mode
    }

    pub fn initializers(&self) -> &ElementInitializer {
        &self.initializers
    }
}

/// The mode of a data segment.
#[derive(Clone, Debug, PartialEq)]
pub enum DataMode {
    /// Copied into the named memory at the given offset during
    /// instantiation. The offset expression is caller-terminated with `end`.
    Active { memory: Name, offset: Vec<Instruction> },
    Passive,
}

/// A data segment definition.
///
/// See <https://webassembly.github.io/spec/core/syntax/modules.html#data-segments>
#[derive(Clone, Debug, PartialEq)]
pub struct DataSegment {
    name: Name,
    mode: DataMode,
    initializer: Vec<u8>,
}

impl DataSegment {
    pub fn new<N: Into<Name>>(name: N, mode: DataMode, initializer: Vec<u8>) -> Self {
        DataSegment {
            name: name.into(),
            mode,
            initializer,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn mode(&self) -> &DataMode {
        &self.mode
    }

    pub fn initializer(&self) -> &[u8] {
        &self.initializer
    }
}

/// A custom section: a name plus uninterpreted content bytes, ignored by the
/// WebAssembly semantics.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CustomSection {
    name: Name,
    content: Vec<u8>,
}

impl CustomSection {
    pub fn new<N: Into<Name>>(name: N, content: Vec<u8>) -> Self {
        CustomSection {
            name: name.into(),
            content,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// The declarative description of a WebAssembly module. Every segment is
/// optional; an entirely empty module encodes to the 8-byte preamble.
///
/// # Examples
/// ```rust
/// use wasm_composer::{encode_module, Module};
///
/// let bytes = encode_module(&Module::empty()).unwrap();
///
/// assert_eq!(bytes, vec![0x00, 0x61, 0x73, 0x6D, 0x01, 0x00, 0x00, 0x00]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    functions: Option<Vec<Function>>,
    globals: Option<Vec<Global>>,
    custom_types: Option<Vec<TypeDefinition>>,
    imports: Option<Vec<Import>>,
    tables: Option<Vec<Table>>,
    memories: Option<Vec<Memory>>,
    elements: Option<Vec<ElementSegment>>,
    data: Option<Vec<DataSegment>>,
    start: Option<Name>,
    custom_sections: Option<Vec<CustomSection>>,
}

impl Module {
    /// Creates a builder for a new module.
    pub fn builder() -> ModuleBuilder {
        ModuleBuilder::new()
    }

    /// A module with no segments.
    pub fn empty() -> Self {
        Module::default()
    }

    pub fn functions(&self) -> &[Function] {
        self.functions.as_deref().unwrap_or_default()
    }

    pub fn globals(&self) -> &[Global] {
        self.globals.as_deref().unwrap_or_default()
    }

    pub fn custom_types(&self) -> &[TypeDefinition] {
        self.custom_types.as_deref().unwrap_or_default()
    }

    pub fn imports(&self) -> &[Import] {
        self.imports.as_deref().unwrap_or_default()
    }

    pub fn tables(&self) -> &[Table] {
        self.tables.as_deref().unwrap_or_default()
    }

    pub fn memories(&self) -> &[Memory] {
        self.memories.as_deref().unwrap_or_default()
    }

    pub fn elements(&self) -> &[ElementSegment] {
        self.elements.as_deref().unwrap_or_default()
    }

    pub fn data(&self) -> &[DataSegment] {
        self.data.as_deref().unwrap_or_default()
    }

    pub fn start(&self) -> Option<&Name> {
        self.start.as_ref()
    }

    pub fn custom_sections(&self) -> &[CustomSection] {
        self.custom_sections.as_deref().unwrap_or_default()
    }
}

/// A builder pattern for `Module`s.
/// The builder performs minimal validation when using the `add_*` family of
/// methods: only that the added element would not exceed the maximum size of
/// a u32. Name uniqueness is checked by the encoder.
pub struct ModuleBuilder {
    module: Module,
}

impl ModuleBuilder {
    /// Creates a new empty builder of WebAssembly modules.
    pub fn new() -> Self {
        ModuleBuilder {
            module: Module::empty(),
        }
    }

    /// Sets the functions segment for the WebAssembly module to be built.
    pub fn set_functions(&mut self, functions: Option<Vec<Function>>) {
        self.module.functions = functions;
    }

    /// Adds the function to the module's segment.
    /// Returns the index of the function in the module.
    pub fn add_function(&mut self, function: Function) -> Result<u32, ModelError> {
        let functions = self.module.functions.get_or_insert_with(Vec::new);
        let index = u32::try_from(functions.len())?;

        functions.push(function);

        Ok(index)
    }

    /// Sets the globals segment for the WebAssembly module to be built.
    pub fn set_globals(&mut self, globals: Option<Vec<Global>>) {
        self.module.globals = globals;
    }

    /// Adds the global to the module's segment.
    /// Returns the index of the global in the module.
    pub fn add_global(&mut self, global: Global) -> Result<u32, ModelError> {
        let globals = self.module.globals.get_or_insert_with(Vec::new);
        let index = u32::try_from(globals.len())?;

        globals.push(global);

        Ok(index)
    }

    /// Sets the custom types segment for the WebAssembly module to be built.
    pub fn set_custom_types(&mut self, custom_types: Option<Vec<TypeDefinition>>) {
        self.module.custom_types = custom_types;
    }

    /// Adds the type definition to the module's segment.
    /// Returns the index of the definition among the custom types; the
    /// encoder offsets the final type index by the number of functions.
    pub fn add_custom_type(&mut self, definition: TypeDefinition) -> Result<u32, ModelError> {
        let custom_types = self.module.custom_types.get_or_insert_with(Vec::new);
        let index = u32::try_from(custom_types.len())?;

        custom_types.push(definition);

        Ok(index)
    }

    /// Sets the imports segment for the WebAssembly module to be built.
    pub fn set_imports(&mut self, imports: Option<Vec<Import>>) {
        self.module.imports = imports;
    }

    /// Adds the import to the module's segment.
    pub fn add_import(&mut self, import: Import) -> Result<u32, ModelError> {
        let imports = self.module.imports.get_or_insert_with(Vec::new);
        let index = u32::try_from(imports.len())?;

        imports.push(import);

        Ok(index)
    }

    /// Sets the tables segment for the WebAssembly module to be built.
    pub fn set_tables(&mut self, tables: Option<Vec<Table>>) {
        self.module.tables = tables;
    }

    /// Adds the table to the module's segment.
    /// Returns the index of the table in the module.
    pub fn add_table(&mut self, table: Table) -> Result<u32, ModelError> {
        let tables = self.module.tables.get_or_insert_with(Vec::new);
        let index = u32::try_from(tables.len())?;

        tables.push(table);

        Ok(index)
    }

    /// Sets the memories segment for the WebAssembly module to be built.
    pub fn set_memories(&mut self, memories: Option<Vec<Memory>>) {
        self.module.memories = memories;
    }

    /// Adds the memory to the module's segment.
    /// Returns the index of the memory in the module.
    pub fn add_memory(&mut self, memory: Memory) -> Result<u32, ModelError> {
        let memories = self.module.memories.get_or_insert_with(Vec::new);
        let index = u32::try_from(memories.len())?;

        memories.push(memory);

        Ok(index)
    }

    /// Sets the elements segment for the WebAssembly module to be built.
    pub fn set_elements(&mut self, elements: Option<Vec<ElementSegment>>) {
        self.module.elements = elements;
    }

    /// Adds the element segment to the module's segment.
    /// Returns the index of the element segment in the module.
    pub fn add_element(&mut self, element: ElementSegment) -> Result<u32, ModelError> {
        let elements = self.module.elements.get_or_insert_with(Vec::new);
        let index = u32::try_from(elements.len())?;

        elements.push(element);

        Ok(index)
    }

    /// Sets the data segment for the WebAssembly module to be built.
    pub fn set_data(&mut self, data: Option<Vec<DataSegment>>) {
        self.module.data = data;
    }

    /// Adds the data segment to the module's segment.
    /// Returns the index of the data segment in the module.
    pub fn add_data(&mut self, datum: DataSegment) -> Result<u32, ModelError> {
        let data = self.module.data.get_or_insert_with(Vec::new);
        let index = u32::try_from(data.len())?;

        data.push(datum);

        Ok(index)
    }

    /// Sets the start hook: the name of the function invoked during
    /// instantiation.
    pub fn set_start(&mut self, start: Option<Name>) {
        self.module.start = start;
    }

    /// Adds a custom section, emitted after all known sections in the order
    /// added.
    pub fn add_custom_section(&mut self, section: CustomSection) {
        let sections = self.module.custom_sections.get_or_insert_with(Vec::new);
        sections.push(section);
    }

    /// Finalizes the builder into an immutable module.
    pub fn build(self) -> Module {
        self.module
    }
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops;

    #[test]
    fn empty_module_has_no_segments() {
        let module = Module::empty();

        assert!(module.functions().is_empty());
        assert!(module.custom_types().is_empty());
        assert!(module.start().is_none());
    }

    #[test]
    fn builder_assigns_declaration_order() {
        let mut builder = Module::builder();

        let first = builder
            .add_function(Function::new(
                "first",
                vec![],
                vec![],
                vec![ops::control::end()],
            ))
            .unwrap();
        let second = builder
            .add_function(Function::new(
                "second",
                vec![],
                vec![],
                vec![ops::control::end()],
            ))
            .unwrap();

        assert_eq!((first, second), (0, 1));
        assert_eq!(builder.build().functions().len(), 2);
    }

    #[test]
    fn function_signature_follows_params_and_results() {
        let function = Function::new(
            "add",
            vec![("num1".into(), ValueType::I32), ("num2".into(), ValueType::I32)],
            vec![ValueType::I32],
            vec![ops::control::end()],
        );

        let signature = function.signature();

        assert_eq!(signature.parameters(), &[ValueType::I32, ValueType::I32]);
        assert_eq!(signature.results(), &[ValueType::I32]);
    }
}
