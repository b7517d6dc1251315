//! Struct, array and conversion instructions over garbage-collected values.
//! All type references are the names of user-defined types (or functions,
//! whose signatures share the type index space).

/// Struct instructions.
pub mod structure {
    use crate::model::{Immediates, Instruction, Name};

    /// Allocates a struct of the named type from popped field values.
    pub fn new<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("struct.new", Immediates::Type(kind.into()))
    }

    /// Allocates a struct of the named type with default field values.
    pub fn new_default<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("struct.new_default", Immediates::Type(kind.into()))
    }

    /// Pushes the field of the named struct type.
    pub fn get<N: Into<Name>>(kind: N, field: u32) -> Instruction {
        Instruction::new(
            "struct.get",
            Immediates::FieldAccess {
                structure: kind.into(),
                field,
            },
        )
    }

    /// Pushes a packed field, sign-extended.
    pub fn get_s<N: Into<Name>>(kind: N, field: u32) -> Instruction {
        Instruction::new(
            "struct.get_s",
            Immediates::FieldAccess {
                structure: kind.into(),
                field,
            },
        )
    }

    /// Pushes a packed field, zero-extended.
    pub fn get_u<N: Into<Name>>(kind: N, field: u32) -> Instruction {
        Instruction::new(
            "struct.get_u",
            Immediates::FieldAccess {
                structure: kind.into(),
                field,
            },
        )
    }

    /// Stores a popped value into the field of the named struct type.
    pub fn set<N: Into<Name>>(kind: N, field: u32) -> Instruction {
        Instruction::new(
            "struct.set",
            Immediates::FieldAccess {
                structure: kind.into(),
                field,
            },
        )
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        vec![
            new("s"),
            new_default("s"),
            get("s", 0),
            get_s("s", 0),
            get_u("s", 0),
            set("s", 0),
        ]
    }
}

/// Array instructions.
pub mod array {
    use crate::model::{Immediates, Instruction, Name};

    /// Allocates an array of the named type from a popped value and length.
    pub fn new<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.new", Immediates::Type(kind.into()))
    }

    /// Allocates an array of the named type with default elements.
    pub fn new_default<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.new_default", Immediates::Type(kind.into()))
    }

    /// Allocates an array of the named type from `length` popped operands.
    pub fn new_fixed<N: Into<Name>>(kind: N, length: u32) -> Instruction {
        Instruction::new(
            "array.new_fixed",
            Immediates::ArrayLength {
                array: kind.into(),
                length,
            },
        )
    }

    /// Allocates an array of the named type from the named data segment.
    pub fn new_data<N: Into<Name>>(kind: N, data: N) -> Instruction {
        Instruction::new(
            "array.new_data",
            Immediates::ArrayData {
                array: kind.into(),
                data: data.into(),
            },
        )
    }

    /// Allocates an array of the named type from the named element segment.
    pub fn new_elem<N: Into<Name>>(kind: N, element: N) -> Instruction {
        Instruction::new(
            "array.new_elem",
            Immediates::ArrayElement {
                array: kind.into(),
                element: element.into(),
            },
        )
    }

    /// Pushes an element of an array of the named type.
    pub fn get<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.get", Immediates::Type(kind.into()))
    }

    /// Pushes a packed element, sign-extended.
    pub fn get_s<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.get_s", Immediates::Type(kind.into()))
    }

    /// Pushes a packed element, zero-extended.
    pub fn get_u<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.get_u", Immediates::Type(kind.into()))
    }

    /// Stores a popped value into an array of the named type.
    pub fn set<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.set", Immediates::Type(kind.into()))
    }

    /// Fills a range of an array of the named type with a value.
    pub fn fill<N: Into<Name>>(kind: N) -> Instruction {
        Instruction::new("array.fill", Immediates::Type(kind.into()))
    }

    /// Copies between arrays; the immediates are the destination type index
    /// then the source type index.
    pub fn copy<N: Into<Name>>(destination: N, source: N) -> Instruction {
        Instruction::new(
            "array.copy",
            Immediates::ArrayCopy {
                destination: destination.into(),
                source: source.into(),
            },
        )
    }

    /// Copies a run of the named data segment into an array.
    pub fn init_data<N: Into<Name>>(kind: N, data: N) -> Instruction {
        Instruction::new(
            "array.init_data",
            Immediates::ArrayData {
                array: kind.into(),
                data: data.into(),
            },
        )
    }

    /// Copies a run of the named element segment into an array.
    pub fn init_elem<N: Into<Name>>(kind: N, element: N) -> Instruction {
        Instruction::new(
            "array.init_elem",
            Immediates::ArrayElement {
                array: kind.into(),
                element: element.into(),
            },
        )
    }

    nullary_ops! {
        /// Pushes the length of the array on the stack.
        len => "array.len";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend([
            new("a"),
            new_default("a"),
            new_fixed("a", 2),
            new_data("a", "d"),
            new_elem("a", "e"),
            get("a"),
            get_s("a"),
            get_u("a"),
            set("a"),
            fill("a"),
            copy("a", "b"),
            init_data("a", "d"),
            init_elem("a", "e"),
        ]);

        instructions
    }
}

/// Conversions into the `any` hierarchy.
pub mod any {
    nullary_ops! {
        /// Converts an external reference into an internal one.
        convert_extern => "any.convert_extern";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        nullary_catalog()
    }
}

/// Conversions into the `extern` hierarchy.
pub mod external {
    nullary_ops! {
        /// Converts an internal reference into an external one.
        convert_any => "extern.convert_any";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        nullary_catalog()
    }
}

/// Unboxing of i31 references; boxing is [`crate::ops::reference::i31`].
pub mod i31 {
    nullary_ops! {
        /// Pushes the i31 payload, sign-extended.
        get_s => "i31.get_s";
        /// Pushes the i31 payload, zero-extended.
        get_u => "i31.get_u";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        nullary_catalog()
    }
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
    let mut instructions = structure::catalog();

    instructions.extend(array::catalog());
    instructions.extend(any::catalog());
    instructions.extend(external::catalog());
    instructions.extend(i31::catalog());

    instructions
}
