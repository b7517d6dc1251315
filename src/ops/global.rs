//! Global variable instructions.

use crate::model::{Immediates, Instruction, Name};

/// Pushes the value of the named global.
pub fn get<N: Into<Name>>(global: N) -> Instruction {
    Instruction::new("global.get", Immediates::Global(global.into()))
}

/// Pops a value into the named global.
pub fn set<N: Into<Name>>(global: N) -> Instruction {
    Instruction::new("global.set", Immediates::Global(global.into()))
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    vec![get("g"), set("g")]
}
