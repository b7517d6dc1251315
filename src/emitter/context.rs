//! Name resolution for the encoder.
//!
//! A single preparation pass over the module definition assigns 0-based
//! indices to every named entity in declaration order and records them in
//! per-kind lookups. Function bodies then resolve locals against a
//! per-function lookup and branch targets against a block stack that is
//! copied at each block boundary, so sibling blocks never observe each
//! other's scopes.

use crate::emitter::errors::EmitError;
use crate::model::{Function, Module, Name};
use std::collections::HashMap;

/// The module-wide name → index lookups, built once per encode and read-only
/// afterwards.
#[derive(Debug, Default)]
pub(crate) struct ModuleIndices {
    functions: HashMap<Name, u32>,
    types: HashMap<Name, u32>,
    tables: HashMap<Name, u32>,
    memories: HashMap<Name, u32>,
    globals: HashMap<Name, u32>,
    elements: HashMap<Name, u32>,
    data: HashMap<Name, u32>,
}

impl ModuleIndices {
    /// The preparation pass: assigns indices in declaration order. Function
    /// names also occupy the first slots of the type space, since each
    /// function's signature is emitted at the type index equal to its own
    /// function index; custom types follow.
    pub(crate) fn new(module: &Module) -> Result<Self, EmitError> {
        let mut indices = ModuleIndices::default();

        for (index, function) in module.functions().iter().enumerate() {
            insert(&mut indices.functions, function.name(), index, "function")?;
            insert(&mut indices.types, function.name(), index, "type")?;
        }

        let offset = module.functions().len();
        for (index, definition) in module.custom_types().iter().enumerate() {
            insert(&mut indices.types, definition.name(), offset + index, "type")?;
        }

        for (index, table) in module.tables().iter().enumerate() {
            insert(&mut indices.tables, table.name(), index, "table")?;
        }

        for (index, memory) in module.memories().iter().enumerate() {
            insert(&mut indices.memories, memory.name(), index, "memory")?;
        }

        for (index, global) in module.globals().iter().enumerate() {
            insert(&mut indices.globals, global.name(), index, "global")?;
        }

        for (index, element) in module.elements().iter().enumerate() {
            insert(&mut indices.elements, element.name(), index, "element")?;
        }

        for (index, datum) in module.data().iter().enumerate() {
            insert(&mut indices.data, datum.name(), index, "data")?;
        }

        Ok(indices)
    }

    pub(crate) fn resolve_function(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.functions, name, "function")
    }

    pub(crate) fn resolve_type(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.types, name, "type")
    }

    pub(crate) fn resolve_table(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.tables, name, "table")
    }

    pub(crate) fn resolve_memory(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.memories, name, "memory")
    }

    pub(crate) fn resolve_global(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.globals, name, "global")
    }

    pub(crate) fn resolve_element(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.elements, name, "element")
    }

    pub(crate) fn resolve_data(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(&self.data, name, "data")
    }
}

/// The per-function locals lookup: parameters first, then declared locals,
/// each in declaration order.
pub(crate) fn function_locals(function: &Function) -> Result<HashMap<Name, u32>, EmitError> {
    let mut locals = HashMap::new();

    for (name, _) in function.params().iter().chain(function.locals()) {
        let index = locals.len();
        insert(&mut locals, name, index, "local")?;
    }

    Ok(locals)
}

/// The resolution context threaded through instruction emission: the
/// module-wide lookups, the current function's locals, and the stack of
/// enclosing block labels (innermost last).
#[derive(Debug)]
pub(crate) struct FunctionContext<'a> {
    module: &'a ModuleIndices,
    locals: &'a HashMap<Name, u32>,
    blocks: Vec<Name>,
}

impl<'a> FunctionContext<'a> {
    pub(crate) fn new(module: &'a ModuleIndices, locals: &'a HashMap<Name, u32>) -> Self {
        FunctionContext {
            module,
            locals,
            blocks: Vec::new(),
        }
    }

    /// A scope for the body of a block: the same lookups over a fresh copy
    /// of the block stack with the label pushed innermost.
    pub(crate) fn enter_block(&self, label: &Name) -> FunctionContext<'a> {
        let mut blocks = self.blocks.clone();
        blocks.push(label.clone());

        FunctionContext {
            module: self.module,
            locals: self.locals,
            blocks,
        }
    }

    /// The branch depth of the named enclosing block (innermost = 0).
    pub(crate) fn branch_depth(&self, label: &Name) -> Result<u32, EmitError> {
        self.blocks
            .iter()
            .rev()
            .position(|block| block == label)
            .map(|depth| depth as u32)
            .ok_or_else(|| EmitError::UnresolvedName(label.clone(), "block"))
    }

    pub(crate) fn resolve_local(&self, name: &Name) -> Result<u32, EmitError> {
        resolve(self.locals, name, "local")
    }

    pub(crate) fn resolve_function(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_function(name)
    }

    pub(crate) fn resolve_type(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_type(name)
    }

    pub(crate) fn resolve_table(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_table(name)
    }

    pub(crate) fn resolve_memory(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_memory(name)
    }

    pub(crate) fn resolve_global(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_global(name)
    }

    pub(crate) fn resolve_element(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_element(name)
    }

    pub(crate) fn resolve_data(&self, name: &Name) -> Result<u32, EmitError> {
        self.module.resolve_data(name)
    }
}

fn insert(
    lookup: &mut HashMap<Name, u32>,
    name: &Name,
    index: usize,
    space: &'static str,
) -> Result<(), EmitError> {
    let index = u32::try_from(index)
        .map_err(|_| EmitError::InvalidValue(format!("{space} index {index} exceeds u32")))?;

    if lookup.insert(name.clone(), index).is_some() {
        return Err(EmitError::MalformedInput(format!(
            "duplicate {space} name '{name}'"
        )));
    }

    Ok(())
}

fn resolve(lookup: &HashMap<Name, u32>, name: &Name, space: &'static str) -> Result<u32, EmitError> {
    lookup
        .get(name)
        .copied()
        .ok_or_else(|| EmitError::UnresolvedName(name.clone(), space))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Limit, Memory, MemoryType, Module, TableType, ValueType};
    use crate::model::{ReferenceType, Table};
    use crate::ops;

    fn sample_module() -> Module {
        let mut builder = Module::builder();

        builder
            .add_function(crate::model::Function::new(
                "first",
                vec![],
                vec![],
                vec![ops::control::end()],
            ))
            .unwrap();
        builder
            .add_function(crate::model::Function::new(
                "second",
                vec![],
                vec![],
                vec![ops::control::end()],
            ))
            .unwrap();
        builder
            .add_table(Table::new(
                "table",
                TableType::new(ReferenceType::function(), Limit::unbounded(1)),
            ))
            .unwrap();
        builder
            .add_memory(Memory::new("memory", MemoryType::new(Limit::unbounded(1))))
            .unwrap();

        builder.build()
    }

    #[test]
    fn indices_follow_declaration_order() {
        let module = sample_module();
        let indices = ModuleIndices::new(&module).unwrap();

        assert_eq!(indices.resolve_function(&"first".into()).unwrap(), 0);
        assert_eq!(indices.resolve_function(&"second".into()).unwrap(), 1);
        assert_eq!(indices.resolve_type(&"second".into()).unwrap(), 1);
        assert_eq!(indices.resolve_table(&"table".into()).unwrap(), 0);
        assert_eq!(indices.resolve_memory(&"memory".into()).unwrap(), 0);
    }

    #[test]
    fn unknown_names_are_reported_verbatim() {
        let module = sample_module();
        let indices = ModuleIndices::new(&module).unwrap();

        match indices.resolve_global(&"missing".into()) {
            Err(EmitError::UnresolvedName(name, "global")) => {
                assert_eq!(name, "missing".into())
            }
            other => panic!("expected an unresolved name, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_within_a_kind_are_rejected() {
        let mut builder = Module::builder();

        for _ in 0..2 {
            builder
                .add_memory(Memory::new("twice", MemoryType::new(Limit::unbounded(0))))
                .unwrap();
        }

        assert!(matches!(
            ModuleIndices::new(&builder.build()),
            Err(EmitError::MalformedInput(_))
        ));
    }

    #[test]
    fn locals_index_parameters_first() {
        let function = crate::model::Function::new(
            "grow",
            vec![("seed".into(), ValueType::I32)],
            vec![],
            vec![ops::control::end()],
        )
        .with_locals(vec![("counter".into(), ValueType::I32)]);

        let locals = function_locals(&function).unwrap();

        assert_eq!(locals[&Name::from("seed")], 0);
        assert_eq!(locals[&Name::from("counter")], 1);
    }

    #[test]
    fn sibling_blocks_do_not_share_scopes() {
        let module = Module::empty();
        let indices = ModuleIndices::new(&module).unwrap();
        let locals = HashMap::new();
        let context = FunctionContext::new(&indices, &locals);

        let first = context.enter_block(&"first".into());
        let second = context.enter_block(&"second".into());

        assert_eq!(first.branch_depth(&"first".into()).unwrap(), 0);
        assert!(first.branch_depth(&"second".into()).is_err());
        assert!(second.branch_depth(&"first".into()).is_err());
    }

    #[test]
    fn branch_depth_counts_from_innermost() {
        let module = Module::empty();
        let indices = ModuleIndices::new(&module).unwrap();
        let locals = HashMap::new();
        let context = FunctionContext::new(&indices, &locals);

        let scope = context
            .enter_block(&"outer".into())
            .enter_block(&"middle".into())
            .enter_block(&"inner".into());

        assert_eq!(scope.branch_depth(&"inner".into()).unwrap(), 0);
        assert_eq!(scope.branch_depth(&"middle".into()).unwrap(), 1);
        assert_eq!(scope.branch_depth(&"outer".into()).unwrap(), 2);
    }
}
