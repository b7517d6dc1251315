//! Table instructions.

use crate::model::{Immediates, Instruction, Name};

/// Pushes the element of the named table at the popped index.
pub fn get<N: Into<Name>>(table: N) -> Instruction {
    Instruction::new("table.get", Immediates::Table(table.into()))
}

/// Stores a reference into the named table at the popped index.
pub fn set<N: Into<Name>>(table: N) -> Instruction {
    Instruction::new("table.set", Immediates::Table(table.into()))
}

/// Pushes the current size of the named table.
pub fn size<N: Into<Name>>(table: N) -> Instruction {
    Instruction::new("table.size", Immediates::Table(table.into()))
}

/// Grows the named table by a popped delta.
pub fn grow<N: Into<Name>>(table: N) -> Instruction {
    Instruction::new("table.grow", Immediates::Table(table.into()))
}

/// Fills a range of the named table with a reference.
pub fn fill<N: Into<Name>>(table: N) -> Instruction {
    Instruction::new("table.fill", Immediates::Table(table.into()))
}

/// Copies a run of the named element segment into the named table.
pub fn init<N: Into<Name>>(table: N, element: N) -> Instruction {
    Instruction::new(
        "table.init",
        Immediates::TableInit {
            table: table.into(),
            element: element.into(),
        },
    )
}

/// Copies a range between tables; the immediates are the destination table
/// index then the source table index.
pub fn copy<N: Into<Name>>(destination: N, source: N) -> Instruction {
    Instruction::new(
        "table.copy",
        Immediates::TableCopy {
            destination: destination.into(),
            source: source.into(),
        },
    )
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    vec![
        get("t"),
        set("t"),
        size("t"),
        grow("t"),
        fill("t"),
        init("t", "e"),
        copy("t", "u"),
    ]
}
