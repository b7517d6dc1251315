//! Parametric instructions operating on arbitrary operand types.

use crate::model::{Immediates, Instruction, ValueType};

nullary_ops! {
    /// Discards the top operand.
    drop => "drop";
    /// Chooses between two operands by a condition, with the type inferred.
    select => "select";
}

/// `select` with an explicit, length-prefixed list of value types.
pub fn select_with_type(types: Vec<ValueType>) -> Instruction {
    Instruction::new("select_with_type", Immediates::ValueTypes(types))
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    let mut instructions = nullary_catalog();

    instructions.push(select_with_type(vec![ValueType::I32]));

    instructions
}
