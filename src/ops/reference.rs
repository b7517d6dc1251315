//! Reference instructions, including the test and cast forms.
//!
//! The nullable and non-nullable test/cast variants are distinct mnemonics
//! so the immediates emitter stays dispatch-free: each carries exactly one
//! heap-type id byte.

use crate::model::{HeapType, Immediates, Instruction, Name};

/// Pushes a null reference of the given heap type.
pub fn null(kind: HeapType) -> Instruction {
    Instruction::new("ref.null", Immediates::HeapType(kind))
}

/// Pushes a reference to the named function.
pub fn func<N: Into<Name>>(function: N) -> Instruction {
    Instruction::new("ref.func", Immediates::Function(function.into()))
}

/// Tests whether the reference is a non-null value of the heap type.
pub fn test(kind: HeapType) -> Instruction {
    Instruction::new("ref.test", Immediates::HeapType(kind))
}

/// Tests whether the reference is null or a value of the heap type.
pub fn test_null(kind: HeapType) -> Instruction {
    Instruction::new("ref.test_null", Immediates::HeapType(kind))
}

/// Casts the reference to a non-null value of the heap type, trapping on
/// failure.
pub fn cast(kind: HeapType) -> Instruction {
    Instruction::new("ref.cast", Immediates::HeapType(kind))
}

/// Casts the reference to a nullable value of the heap type, trapping on
/// failure.
pub fn cast_null(kind: HeapType) -> Instruction {
    Instruction::new("ref.cast_null", Immediates::HeapType(kind))
}

nullary_ops! {
    /// Tests the reference on the stack for null.
    is_null => "ref.is_null";
    /// Compares two references for identity.
    eq => "ref.eq";
    /// Converts a nullable reference to a non-null one, trapping on null.
    as_non_null => "ref.as_non_null";
    /// Boxes an i32 into an i31 reference.
    i31 => "ref.i31";
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    let mut instructions = nullary_catalog();

    instructions.extend([
        null(HeapType::Func),
        func("f"),
        test(HeapType::Struct),
        test_null(HeapType::Struct),
        cast(HeapType::Array),
        cast_null(HeapType::Array),
    ]);

    instructions
}
