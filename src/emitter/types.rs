use crate::emitter::errors::EmitError;
use crate::emitter::values::{emit_byte, emit_u32, emit_vector};
use crate::leb128;
use crate::model::{
    CompositeType, DefinedType, FieldType, FunctionSignature, GlobalType, HeapType, Limit,
    MemoryType, ReferenceType, StorageType, SubType, TableType, ValueType,
};
use std::io::Write;

/// Emit a heap type id byte to the output.
pub fn emit_heap_type<O: Write + ?Sized>(
    kind: &HeapType,
    output: &mut O,
) -> Result<usize, EmitError> {
    emit_byte(kind.id(), output)
}

/// Emit a reference type to the output.
/// Short shapes are a single byte; long shapes carry a nullability prefix
/// and type indices are signed LEB128.
pub fn emit_reference_type<O: Write + ?Sized>(
    kind: &ReferenceType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    match kind {
        ReferenceType::Id(heap) => {
            bytes += emit_heap_type(heap, output)?;
        }
        ReferenceType::Index(index) => {
            bytes += leb128::encode_int(*index as i64, output)?;
        }
        ReferenceType::NullableId(heap) => {
            bytes += emit_byte(0x63u8, output)?;
            bytes += emit_heap_type(heap, output)?;
        }
        ReferenceType::NullableIndex(index) => {
            bytes += emit_byte(0x63u8, output)?;
            bytes += leb128::encode_int(*index as i64, output)?;
        }
        ReferenceType::NonNullableId(heap) => {
            bytes += emit_byte(0x64u8, output)?;
            bytes += emit_heap_type(heap, output)?;
        }
        ReferenceType::NonNullableIndex(index) => {
            bytes += emit_byte(0x64u8, output)?;
            bytes += leb128::encode_int(*index as i64, output)?;
        }
    };

    Ok(bytes)
}

/// Emit a value type to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/types.html#value-types>
pub fn emit_value_type<O: Write + ?Sized>(
    kind: &ValueType,
    output: &mut O,
) -> Result<usize, EmitError> {
    match kind {
        ValueType::I32 => emit_byte(0x7Fu8, output),
        ValueType::I64 => emit_byte(0x7Eu8, output),
        ValueType::F32 => emit_byte(0x7Du8, output),
        ValueType::F64 => emit_byte(0x7Cu8, output),
        ValueType::V128 => emit_byte(0x7Bu8, output),
        ValueType::Reference(reference) => emit_reference_type(reference, output),
    }
}

/// Emit a storage type to the output: a value type or a packed type.
pub fn emit_storage_type<O: Write + ?Sized>(
    kind: &StorageType,
    output: &mut O,
) -> Result<usize, EmitError> {
    match kind {
        StorageType::Value(value) => emit_value_type(value, output),
        StorageType::I8 => emit_byte(0x78u8, output),
        StorageType::I16 => emit_byte(0x77u8, output),
    }
}

/// Emit a field type to the output: storage type then mutability byte.
pub fn emit_field_type<O: Write + ?Sized>(
    kind: &FieldType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_storage_type(kind.storage(), output)?;
    bytes += emit_byte(kind.is_mutable() as u8, output)?;

    Ok(bytes)
}

/// Emit a function signature to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/types.html#function-types>
pub fn emit_function_signature<O: Write + ?Sized>(
    signature: &FunctionSignature,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_byte(0x60u8, output)?;
    bytes += emit_vector(signature.parameters(), output, emit_value_type)?;
    bytes += emit_vector(signature.results(), output, emit_value_type)?;

    Ok(bytes)
}

/// Emit a composite type body to the output: `0x5E` array, `0x5F` struct or
/// `0x60` function.
pub fn emit_composite_type<O: Write + ?Sized>(
    kind: &CompositeType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    match kind {
        CompositeType::Array(field) => {
            bytes += emit_byte(0x5Eu8, output)?;
            bytes += emit_field_type(field, output)?;
        }
        CompositeType::Struct(fields) => {
            bytes += emit_byte(0x5Fu8, output)?;
            bytes += emit_vector(fields, output, emit_field_type)?;
        }
        CompositeType::Function(signature) => {
            bytes += emit_function_signature(signature, output)?;
        }
    };

    Ok(bytes)
}

/// Emit a subtype to the output. A final subtype without supertypes encodes
/// as the bare composite type; otherwise a `0x4F` (final) or `0x50` (open)
/// header and the supertype index vector precede it.
pub fn emit_sub_type<O: Write + ?Sized>(
    kind: &SubType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    if !kind.is_final() || !kind.supertypes().is_empty() {
        let header = if kind.is_final() { 0x4Fu8 } else { 0x50u8 };

        bytes += emit_byte(header, output)?;
        bytes += emit_vector(kind.supertypes(), output, emit_u32)?;
    }

    bytes += emit_composite_type(kind.composite(), output)?;

    Ok(bytes)
}

/// Emit a type definition to the output, wrapping recursive groups in
/// `0x4E`.
pub fn emit_defined_type<O: Write + ?Sized>(
    kind: &DefinedType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    match kind {
        DefinedType::Composite(composite) => {
            bytes += emit_composite_type(composite, output)?;
        }
        DefinedType::Sub(sub_type) => {
            bytes += emit_sub_type(sub_type, output)?;
        }
        DefinedType::Recursive(sub_types) => {
            bytes += emit_byte(0x4Eu8, output)?;
            bytes += emit_vector(sub_types, output, emit_sub_type)?;
        }
    };

    Ok(bytes)
}

/// Emit a limit to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/types.html#limits>
pub fn emit_limit<O: Write + ?Sized>(limits: &Limit, output: &mut O) -> Result<usize, EmitError> {
    let mut bytes = 0;

    match limits.max() {
        Some(max) => {
            bytes += emit_byte(0x01u8, output)?;
            bytes += emit_u32(limits.min(), output)?;
            bytes += emit_u32(max, output)?;
        }
        None => {
            bytes += emit_byte(0x00u8, output)?;
            bytes += emit_u32(limits.min(), output)?;
        }
    };

    Ok(bytes)
}

/// Emit a memory type to the output.
pub fn emit_memory_type<O: Write + ?Sized>(
    kind: &MemoryType,
    output: &mut O,
) -> Result<usize, EmitError> {
    emit_limit(kind.limits(), output)
}

/// Emit a table type to the output.
pub fn emit_table_type<O: Write + ?Sized>(
    kind: &TableType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_reference_type(kind.kind(), output)?;
    bytes += emit_limit(kind.limits(), output)?;

    Ok(bytes)
}

/// Emit a global type to the output: value type then mutability byte.
pub fn emit_global_type<O: Write + ?Sized>(
    kind: &GlobalType,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    bytes += emit_value_type(kind.kind(), output)?;
    bytes += emit_byte(kind.is_mutable() as u8, output)?;

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes_of<T>(value: &T, emit: fn(&T, &mut Vec<u8>) -> Result<usize, EmitError>) -> Vec<u8> {
        let mut buffer = Vec::new();
        emit(value, &mut buffer).unwrap();
        buffer
    }

    #[test]
    fn value_type_bytes() {
        assert_eq!(bytes_of(&ValueType::I32, emit_value_type), vec![0x7F]);
        assert_eq!(bytes_of(&ValueType::V128, emit_value_type), vec![0x7B]);
        assert_eq!(
            bytes_of(&ValueType::Reference(ReferenceType::function()), emit_value_type),
            vec![0x70]
        );
    }

    #[test]
    fn reference_type_shapes() {
        assert_eq!(
            bytes_of(&ReferenceType::Id(HeapType::Extern), emit_reference_type),
            vec![0x6F]
        );
        assert_eq!(
            bytes_of(&ReferenceType::NullableId(HeapType::Any), emit_reference_type),
            vec![0x63, 0x6E]
        );
        assert_eq!(
            bytes_of(&ReferenceType::NonNullableIndex(3), emit_reference_type),
            vec![0x64, 0x03]
        );
        // Type indices are signed: 64 needs a continuation group.
        assert_eq!(
            bytes_of(&ReferenceType::NullableIndex(64), emit_reference_type),
            vec![0x63, 0xC0, 0x00]
        );
    }

    #[test]
    fn struct_type_layout() {
        let definition = DefinedType::Composite(CompositeType::Struct(vec![
            FieldType::mutable(StorageType::I8),
            FieldType::immutable(StorageType::Value(ValueType::I64)),
        ]));

        assert_eq!(
            bytes_of(&definition, emit_defined_type),
            vec![0x5F, 0x02, 0x78, 0x01, 0x7E, 0x00]
        );
    }

    #[test]
    fn array_type_layout() {
        let definition =
            DefinedType::Composite(CompositeType::Array(FieldType::mutable(StorageType::I16)));

        assert_eq!(bytes_of(&definition, emit_defined_type), vec![0x5E, 0x77, 0x01]);
    }

    #[test]
    fn sub_type_headers() {
        let composite = CompositeType::Array(FieldType::immutable(StorageType::I8));

        // Final with no supertypes: the header is omitted entirely.
        let bare = SubType::final_type(composite.clone());
        assert_eq!(bytes_of(&bare, emit_sub_type), vec![0x5E, 0x78, 0x00]);

        // Open subtypes always carry the header, even without supertypes.
        let open = SubType::new(composite.clone(), vec![], false);
        assert_eq!(bytes_of(&open, emit_sub_type), vec![0x50, 0x00, 0x5E, 0x78, 0x00]);

        let derived = SubType::new(composite, vec![2], true);
        assert_eq!(
            bytes_of(&derived, emit_sub_type),
            vec![0x4F, 0x01, 0x02, 0x5E, 0x78, 0x00]
        );
    }

    #[test]
    fn recursive_group_wrapper() {
        let definition = DefinedType::Recursive(vec![
            SubType::final_type(CompositeType::Array(FieldType::immutable(StorageType::I8))),
            SubType::final_type(CompositeType::Struct(vec![])),
        ]);

        assert_eq!(
            bytes_of(&definition, emit_defined_type),
            vec![0x4E, 0x02, 0x5E, 0x78, 0x00, 0x5F, 0x00]
        );
    }

    #[test]
    fn limit_variants() {
        assert_eq!(bytes_of(&Limit::unbounded(1), emit_limit), vec![0x00, 0x01]);
        assert_eq!(
            bytes_of(&Limit::bounded(1, 2), emit_limit),
            vec![0x01, 0x01, 0x02]
        );
    }

    #[test]
    fn global_type_mutability() {
        assert_eq!(
            bytes_of(&GlobalType::immutable(ValueType::I64), emit_global_type),
            vec![0x7E, 0x00]
        );
        assert_eq!(
            bytes_of(&GlobalType::mutable(ValueType::F32), emit_global_type),
            vec![0x7D, 0x01]
        );
    }
}
