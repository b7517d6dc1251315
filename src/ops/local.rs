//! Local variable instructions. Locals are named per function: parameters
//! first, then declared locals, each in declaration order.

use crate::model::{Immediates, Instruction, Name};

/// Pushes the value of the named local.
///
/// # Examples
/// ```rust
/// use wasm_composer::ops;
///
/// assert_eq!(ops::local::get("num1").mnemonic(), "local.get");
/// ```
pub fn get<N: Into<Name>>(local: N) -> Instruction {
    Instruction::new("local.get", Immediates::Local(local.into()))
}

/// Pops a value into the named local.
pub fn set<N: Into<Name>>(local: N) -> Instruction {
    Instruction::new("local.set", Immediates::Local(local.into()))
}

/// Stores the top of the stack into the named local, leaving it pushed.
pub fn tee<N: Into<Name>>(local: N) -> Instruction {
    Instruction::new("local.tee", Immediates::Local(local.into()))
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    vec![get("x"), set("x"), tee("x")]
}
