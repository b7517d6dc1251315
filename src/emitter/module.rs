use crate::emitter::context::{function_locals, FunctionContext, ModuleIndices};
use crate::emitter::errors::EmitError;
use crate::emitter::instruction::emit_expression;
use crate::emitter::types::{
    emit_global_type, emit_memory_type, emit_reference_type, emit_table_type, emit_value_type,
};
use crate::emitter::values::{emit_byte, emit_bytes, emit_name, emit_u32, emit_usize, emit_vector};
use crate::emitter::CountingWrite;
use crate::model::{
    DataMode, DataSegment, ElementInitializer, ElementMode, ElementSegment, Function, Global,
    HeapType, Import, ImportDescription, Memory, Module, Name, ReferenceType, Table,
};
use std::collections::HashMap;
use std::io::Write;

/// Emit a code entry for a function: the size-prefixed locals and body.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#code-section>
pub(crate) fn emit_function<O: Write + ?Sized>(
    function: &Function,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    let locals = function_locals(function)?;
    let context = FunctionContext::new(indices, &locals);
    let mut counter = CountingWrite::new();
    let mut bytes = 0;

    emit_function_code(function, &context, &mut counter)?;

    bytes += emit_usize(counter.bytes(), output)?;
    bytes += emit_function_code(function, &context, output)?;

    Ok(bytes)
}

/// Emits the locals and body of a function. Each declared local is its own
/// group of one; the body already carries its terminating `end`.
fn emit_function_code<O: Write + ?Sized>(
    function: &Function,
    context: &FunctionContext,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = emit_usize(function.locals().len(), output)?;

    for (_, kind) in function.locals() {
        bytes += emit_u32(1u32, output)?;
        bytes += emit_value_type(kind, output)?;
    }

    bytes += emit_expression(function.body(), context, output)?;

    Ok(bytes)
}

/// Emit an import to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#import-section>
pub(crate) fn emit_import<O: Write + ?Sized>(
    import: &Import,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_name(import.module(), output)?;
    bytes += emit_name(import.name(), output)?;

    match import.description() {
        ImportDescription::Function(index) => {
            bytes += emit_byte(0x00u8, output)?;
            bytes += emit_u32(index, output)?;
        }
        ImportDescription::Table(table_type) => {
            bytes += emit_byte(0x01u8, output)?;
            bytes += emit_table_type(table_type, output)?;
        }
        ImportDescription::Memory(memory_type) => {
            bytes += emit_byte(0x02u8, output)?;
            bytes += emit_memory_type(memory_type, output)?;
        }
        ImportDescription::Global(global_type) => {
            bytes += emit_byte(0x03u8, output)?;
            bytes += emit_global_type(global_type, output)?;
        }
    };

    Ok(bytes)
}

/// Emit a table to the output.
pub(crate) fn emit_table<O: Write + ?Sized>(
    table: &Table,
    output: &mut O,
) -> Result<usize, EmitError> {
    emit_table_type(table.kind(), output)
}

/// Emit a memory to the output.
pub(crate) fn emit_memory<O: Write + ?Sized>(
    memory: &Memory,
    output: &mut O,
) -> Result<usize, EmitError> {
    emit_memory_type(memory.kind(), output)
}

/// Emit a global to the output: its type then its caller-terminated
/// initializer expression.
pub(crate) fn emit_global<O: Write + ?Sized>(
    global: &Global,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    let locals = HashMap::new();
    let context = FunctionContext::new(indices, &locals);
    let mut bytes = 0;

    bytes += emit_global_type(global.kind(), output)?;
    bytes += emit_expression(global.initializer(), &context, output)?;

    Ok(bytes)
}

/// An export entry derived from an entity's export flag.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DerivedExport {
    name: Name,
    kind: u8,
    index: u32,
}

/// Derives the exports section from the export flags, under each entity's
/// own name: functions, then tables, memories and globals.
pub(crate) fn derive_exports(module: &Module) -> Vec<DerivedExport> {
    let mut exports = Vec::new();

    let flagged_functions = module
        .functions()
        .iter()
        .enumerate()
        .filter(|(_, function)| function.is_exported())
        .map(|(index, function)| (function.name(), 0x00u8, index));
    let flagged_tables = module
        .tables()
        .iter()
        .enumerate()
        .filter(|(_, table)| table.is_exported())
        .map(|(index, table)| (table.name(), 0x01u8, index));
    let flagged_memories = module
        .memories()
        .iter()
        .enumerate()
        .filter(|(_, memory)| memory.is_exported())
        .map(|(index, memory)| (memory.name(), 0x02u8, index));
    let flagged_globals = module
        .globals()
        .iter()
        .enumerate()
        .filter(|(_, global)| global.is_exported())
        .map(|(index, global)| (global.name(), 0x03u8, index));

    for (name, kind, index) in flagged_functions
        .chain(flagged_tables)
        .chain(flagged_memories)
        .chain(flagged_globals)
    {
        exports.push(DerivedExport {
            name: name.clone(),
            kind,
            index: index as u32,
        });
    }

    exports
}

/// Emit an export to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#export-section>
pub(crate) fn emit_export<O: Write + ?Sized>(
    export: &DerivedExport,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_name(&export.name, output)?;
    bytes += emit_byte(export.kind, output)?;
    bytes += emit_u32(export.index, output)?;

    Ok(bytes)
}

/// Emit an element segment to the output. The flags byte (0-7) is derived
/// from the initializer shape, the mode, and the resolved table index.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#element-section>
pub(crate) fn emit_element<O: Write + ?Sized>(
    element: &ElementSegment,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    let locals = HashMap::new();
    let context = FunctionContext::new(indices, &locals);
    let mut bytes = 0;

    match (element.initializers(), element.mode()) {
        (ElementInitializer::Functions(names), ElementMode::Active { table, offset }) => {
            if !is_function_reference(element.kind()) {
                return Err(malformed_functions_segment(element.name()));
            }

            let table = indices.resolve_table(table)?;

            if table == 0 {
                bytes += emit_byte(0x00u8, output)?;
            } else {
                bytes += emit_byte(0x02u8, output)?;
                bytes += emit_u32(table, output)?;
            }

            bytes += emit_expression(offset, &context, output)?;

            if table != 0 {
                bytes += emit_byte(0x00u8, output)?;
            }

            bytes += emit_function_indices(names, indices, output)?;
        }
        (ElementInitializer::Functions(names), ElementMode::Passive) => {
            if !is_function_reference(element.kind()) {
                return Err(malformed_functions_segment(element.name()));
            }

            bytes += emit_byte(0x01u8, output)?;
            bytes += emit_byte(0x00u8, output)?;
            bytes += emit_function_indices(names, indices, output)?;
        }
        (ElementInitializer::Functions(names), ElementMode::Declarative) => {
            if !is_function_reference(element.kind()) {
                return Err(malformed_functions_segment(element.name()));
            }

            bytes += emit_byte(0x03u8, output)?;
            bytes += emit_byte(0x00u8, output)?;
            bytes += emit_function_indices(names, indices, output)?;
        }
        (ElementInitializer::Expressions(expressions), ElementMode::Active { table, offset }) => {
            let table = indices.resolve_table(table)?;

            if table == 0 {
                bytes += emit_byte(0x04u8, output)?;
            } else {
                bytes += emit_byte(0x06u8, output)?;
                bytes += emit_u32(table, output)?;
            }

            bytes += emit_expression(offset, &context, output)?;

            if table != 0 {
                bytes += emit_reference_type(element.kind(), output)?;
            }

            bytes += emit_usize(expressions.len(), output)?;
            for expression in expressions {
                bytes += emit_expression(expression, &context, output)?;
            }
        }
        (ElementInitializer::Expressions(expressions), ElementMode::Passive) => {
            bytes += emit_byte(0x05u8, output)?;
            bytes += emit_reference_type(element.kind(), output)?;
            bytes += emit_usize(expressions.len(), output)?;
            for expression in expressions {
                bytes += emit_expression(expression, &context, output)?;
            }
        }
        (ElementInitializer::Expressions(expressions), ElementMode::Declarative) => {
            bytes += emit_byte(0x07u8, output)?;
            bytes += emit_reference_type(element.kind(), output)?;
            bytes += emit_usize(expressions.len(), output)?;
            for expression in expressions {
                bytes += emit_expression(expression, &context, output)?;
            }
        }
    };

    Ok(bytes)
}

/// Emits the length-prefixed function-index vector of a funcs-shaped
/// element segment.
fn emit_function_indices<O: Write + ?Sized>(
    names: &[Name],
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    let function_indices = names
        .iter()
        .map(|name| indices.resolve_function(name))
        .collect::<Result<Vec<_>, _>>()?;

    emit_vector(&function_indices, output, emit_u32)
}

fn is_function_reference(kind: &ReferenceType) -> bool {
    matches!(
        kind,
        ReferenceType::Id(HeapType::Func) | ReferenceType::NullableId(HeapType::Func)
    )
}

fn malformed_functions_segment(name: &Name) -> EmitError {
    EmitError::MalformedInput(format!(
        "element segment '{name}' lists function indices but is not a funcref segment"
    ))
}

/// Emit a data segment to the output. The flags byte (0-2) is derived from
/// the mode and the resolved memory index.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#data-section>
pub(crate) fn emit_data<O: Write + ?Sized>(
    data: &DataSegment,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    let locals = HashMap::new();
    let context = FunctionContext::new(indices, &locals);
    let mut bytes = 0;

    match data.mode() {
        DataMode::Active { memory, offset } => {
            let memory = indices.resolve_memory(memory)?;

            if memory == 0 {
                bytes += emit_byte(0x00u8, output)?;
            } else {
                bytes += emit_byte(0x02u8, output)?;
                bytes += emit_u32(memory, output)?;
            }

            bytes += emit_expression(offset, &context, output)?;
        }
        DataMode::Passive => {
            bytes += emit_byte(0x01u8, output)?;
        }
    };

    bytes += emit_bytes(data.initializer(), output, true)?;

    Ok(bytes)
}

/// Emit named custom content to the module.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#custom-section>
pub(crate) fn emit_custom_content<O: Write + ?Sized>(
    name: &Name,
    content: &[u8],
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_name(name, output)?;
    bytes += emit_bytes(content, output, false)?;

    Ok(bytes)
}
