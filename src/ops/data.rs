//! Data segment instructions.

use crate::model::{Immediates, Instruction, Name};

/// Discards the named data segment.
pub fn drop<N: Into<Name>>(data: N) -> Instruction {
    Instruction::new("data.drop", Immediates::Data(data.into()))
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    vec![drop("d")]
}
