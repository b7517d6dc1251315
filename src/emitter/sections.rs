use crate::emitter::context::ModuleIndices;
use crate::emitter::errors::EmitError;
use crate::emitter::module::{
    derive_exports, emit_custom_content, emit_data, emit_element, emit_export, emit_function,
    emit_global, emit_import, emit_memory, emit_table,
};
use crate::emitter::types::{emit_defined_type, emit_function_signature};
use crate::emitter::values::{emit_byte, emit_bytes, emit_u32, emit_usize, emit_vector};
use crate::emitter::CountingWrite;
use crate::model::{CustomSection, Module};
use std::io::Write;

/// A magic constant used to quickly identify WebAssembly binary file contents.
const PREAMBLE: [u8; 4] = [0x00u8, 0x61u8, 0x73u8, 0x6Du8];

/// The version of the binary WebAssembly format emitted.
const VERSION: [u8; 4] = [0x01u8, 0x00u8, 0x00u8, 0x00u8];

/// Emit a module to the output: the preamble, then every non-empty section
/// in the order the binary format requires, then the user's custom sections.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html>
pub(crate) fn emit_module<O: Write>(module: &Module, output: &mut O) -> Result<usize, EmitError> {
    let indices = ModuleIndices::new(module)?;
    let mut bytes = 0;

    bytes += emit_preamble(output)?;
    bytes += emit_type_section(module, output)?;
    bytes += emit_import_section(module, output)?;
    bytes += emit_function_section(module, output)?;
    bytes += emit_table_section(module, output)?;
    bytes += emit_memory_section(module, output)?;
    bytes += emit_global_section(module, &indices, output)?;
    bytes += emit_export_section(module, output)?;
    bytes += emit_start_section(module, &indices, output)?;
    bytes += emit_element_section(module, &indices, output)?;
    bytes += emit_data_count_section(module, output)?;
    bytes += emit_code_section(module, &indices, output)?;
    bytes += emit_data_section(module, &indices, output)?;

    for section in module.custom_sections() {
        bytes += emit_custom_section(section, output)?;
    }

    Ok(bytes)
}

/// Emits the preamble: the magic bytes and the format version.
pub(crate) fn emit_preamble<O: Write>(output: &mut O) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_bytes(&PREAMBLE, output, false)?;
    bytes += emit_bytes(&VERSION, output, false)?;

    Ok(bytes)
}

/// Emits the type section to the output: the function signatures in function
/// order (so type index `i` belongs to function `i`), then the custom types.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#type-section>
pub(crate) fn emit_type_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    let count = module.functions().len() + module.custom_types().len();

    if count == 0 {
        return Ok(0);
    }

    let signatures: Vec<_> = module
        .functions()
        .iter()
        .map(|function| function.signature())
        .collect();

    emit_section(ModuleSection::Type, output, |o| {
        let mut bytes = emit_usize(count, o)?;

        for signature in &signatures {
            bytes += emit_function_signature(signature, o)?;
        }

        for definition in module.custom_types() {
            bytes += emit_defined_type(definition.definition(), o)?;
        }

        Ok(bytes)
    })
}

/// Emits the import section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#import-section>
pub(crate) fn emit_import_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.imports().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Import, output, |o| {
            emit_vector(module.imports(), o, emit_import)
        })
    }
}

/// Emits the function section to the output: one type index per function.
/// Function type indices equal the corresponding function index.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#function-section>
pub(crate) fn emit_function_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.functions().is_empty() {
        Ok(0)
    } else {
        let types: Vec<u32> = (0..module.functions().len() as u32).collect();

        emit_section(ModuleSection::Function, output, move |o| {
            emit_vector(types.as_slice(), o, emit_u32)
        })
    }
}

/// Emits the table section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#table-section>
pub(crate) fn emit_table_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.tables().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Table, output, |o| {
            emit_vector(module.tables(), o, emit_table)
        })
    }
}

/// Emits the memory section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#memory-section>
pub(crate) fn emit_memory_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.memories().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Memory, output, |o| {
            emit_vector(module.memories(), o, emit_memory)
        })
    }
}

/// Emits the global section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#global-section>
pub(crate) fn emit_global_section<O: Write>(
    module: &Module,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.globals().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Global, output, |o| {
            emit_vector(module.globals(), o, |global, o| {
                emit_global(global, indices, o)
            })
        })
    }
}

/// Emits the export section to the output. Exports are derived from the
/// entities flagged for export, each under its own name.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#export-section>
pub(crate) fn emit_export_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    let exports = derive_exports(module);

    if exports.is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Export, output, |o| {
            emit_vector(&exports, o, emit_export)
        })
    }
}

/// Emits the start section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#start-section>
pub(crate) fn emit_start_section<O: Write>(
    module: &Module,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    match module.start() {
        Some(start) => {
            let index = indices.resolve_function(start)?;

            emit_section(ModuleSection::Start, output, |o| emit_u32(index, o))
        }
        None => Ok(0),
    }
}

/// Emits the element section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#element-section>
pub(crate) fn emit_element_section<O: Write>(
    module: &Module,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.elements().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Element, output, |o| {
            emit_vector(module.elements(), o, |element, o| {
                emit_element(element, indices, o)
            })
        })
    }
}

/// Emits the data count section to the output, only when there is at least
/// one data segment.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#data-count-section>
pub(crate) fn emit_data_count_section<O: Write>(
    module: &Module,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.data().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::DataCount, output, |o| {
            emit_usize(module.data().len(), o)
        })
    }
}

/// Emits the code section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#code-section>
pub(crate) fn emit_code_section<O: Write>(
    module: &Module,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.functions().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Code, output, |o| {
            emit_vector(module.functions(), o, |function, o| {
                emit_function(function, indices, o)
            })
        })
    }
}

/// Emits the data section to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/modules.html#data-section>
pub(crate) fn emit_data_section<O: Write>(
    module: &Module,
    indices: &ModuleIndices,
    output: &mut O,
) -> Result<usize, EmitError> {
    if module.data().is_empty() {
        Ok(0)
    } else {
        emit_section(ModuleSection::Data, output, |o| {
            emit_vector(module.data(), o, |data, o| emit_data(data, indices, o))
        })
    }
}

/// Emits one user-supplied custom section to the output.
pub(crate) fn emit_custom_section<O: Write>(
    section: &CustomSection,
    output: &mut O,
) -> Result<usize, EmitError> {
    emit_section(ModuleSection::Custom, output, |o| {
        emit_custom_content(section.name(), section.content(), o)
    })
}

/// Emits a module section to the given output.
/// Sections need to be prefixed by their length.
/// Since we do not know the length of the emitted contents ahead of time,
/// a counting pass measures the section body before a second pass writes it
/// behind the id and length prefix.
pub(crate) fn emit_section<E, O>(
    section: ModuleSection,
    output: &mut O,
    emit: E,
) -> Result<usize, EmitError>
where
    O: Write,
    E: Fn(&mut dyn Write) -> Result<usize, EmitError>,
{
    let mut bytes = 0;
    let mut counter = CountingWrite::new();

    emit(&mut counter)?;

    bytes += emit_byte(section as u8, output)?;
    bytes += emit_usize(counter.bytes(), output)?;
    bytes += emit(output)?;

    Ok(bytes)
}

/// The section ids of the binary format.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ModuleSection {
    /// Custom sections have the id 0.
    /// They are intended to be used for debugging information or third-party
    /// extensions, and are ignored by the WebAssembly semantics.
    Custom = 0,
    /// The type section has the id 1.
    /// It decodes into a vector of types that represent the types component
    /// of a module.
    Type,
    /// The import section has the id 2.
    Import,
    /// The function section has the id 3.
    /// It decodes into a vector of type indices, one per function; the
    /// locals and body live separately in the code section.
    Function,
    /// The table section has the id 4.
    Table,
    /// The memory section has the id 5.
    Memory,
    /// The global section has the id 6.
    Global,
    /// The export section has the id 7.
    Export,
    /// The start section has the id 8.
    Start,
    /// The element section has the id 9.
    Element,
    /// The code section has the id 10.
    Code,
    /// The data section has the id 11.
    Data,
    /// The data count section has the id 12.
    /// Emitted before the code section so engines can validate
    /// `memory.init` and `data.drop` in one pass.
    DataCount,
}
