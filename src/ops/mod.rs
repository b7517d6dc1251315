//! The instruction DSL: grouped constructors, one per mnemonic family.
//!
//! These constructors are the only public producers of instruction records.
//! Every cross-reference they take is a symbolic name resolved by the
//! encoder, so a constructor call can never fail; a dangling name surfaces
//! as an [`crate::emitter::EmitError::UnresolvedName`] at encode time.
//!
//! # Examples
//! ```rust
//! use wasm_composer::ops;
//!
//! let body = vec![
//!     ops::local::get("num1"),
//!     ops::local::get("num2"),
//!     ops::i32::add(),
//!     ops::control::end(),
//! ];
//!
//! assert_eq!(body.len(), 4);
//! ```

use crate::model::{Immediates, Instruction};

/// Defines constructors for instructions without immediate arguments.
macro_rules! nullary_ops {
    ($(
        $(#[$meta:meta])*
        $name:ident => $mnemonic:literal;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name() -> $crate::model::Instruction {
                $crate::model::Instruction::nullary($mnemonic)
            }
        )*

        #[cfg(test)]
        pub(crate) fn nullary_catalog() -> Vec<$crate::model::Instruction> {
            vec![$($name(),)*]
        }
    };
}

/// Defines constructors for memory accesses with align/offset immediates.
macro_rules! memarg_ops {
    ($(
        $(#[$meta:meta])*
        $name:ident => $mnemonic:literal;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name(align: u32, offset: u32) -> $crate::model::Instruction {
                $crate::model::Instruction::new(
                    $mnemonic,
                    $crate::model::Immediates::MemoryAccess { align, offset },
                )
            }
        )*

        #[cfg(test)]
        pub(crate) fn memarg_catalog() -> Vec<$crate::model::Instruction> {
            vec![$($name(0, 0),)*]
        }
    };
}

/// Defines constructors for lane accessors of a fixed lane count.
macro_rules! lane_ops {
    ($lanes:literal: $(
        $(#[$meta:meta])*
        $name:ident => $mnemonic:literal;
    )*) => {
        $(
            $(#[$meta])*
            pub fn $name(lane: u8) -> $crate::model::Instruction {
                $crate::model::Instruction::new(
                    $mnemonic,
                    $crate::model::Immediates::Lane {
                        lane,
                        lane_count: $lanes,
                    },
                )
            }
        )*

        #[cfg(test)]
        pub(crate) fn lane_catalog() -> Vec<$crate::model::Instruction> {
            vec![$($name(0),)*]
        }
    };
}

pub mod atomic;
pub mod control;
pub mod data;
pub mod elem;
pub mod global;
pub mod local;
pub mod memory;
pub mod parametric;
pub mod reference;
pub mod table;

mod gc;
mod numeric;
mod vector;

pub use self::gc::{any, array, external, i31, structure};
pub use self::numeric::{f32, f64, i32, i64};
pub use self::vector::{f32x4, f64x2, i16x8, i32x4, i64x2, i8x16, v128};

/// Splices a nested instruction list into the enclosing sequence.
/// The encoder flattens sequences depth-first, so they may appear anywhere
/// instructions are expected and nest arbitrarily.
pub fn sequence(instructions: Vec<Instruction>) -> Instruction {
    Instruction::new("sequence", Immediates::Sequence(instructions))
}

#[cfg(test)]
mod tests {
    use crate::opcodes;

    #[test]
    fn every_constructor_mnemonic_is_in_the_opcode_table() {
        let mut instructions = Vec::new();

        instructions.extend(super::control::catalog());
        instructions.extend(super::parametric::catalog());
        instructions.extend(super::local::catalog());
        instructions.extend(super::global::catalog());
        instructions.extend(super::table::catalog());
        instructions.extend(super::memory::catalog());
        instructions.extend(super::elem::catalog());
        instructions.extend(super::data::catalog());
        instructions.extend(super::reference::catalog());
        instructions.extend(super::atomic::catalog());
        instructions.extend(super::gc::catalog());
        instructions.extend(super::numeric::catalog());
        instructions.extend(super::vector::catalog());

        assert!(instructions.len() > 500);

        for instruction in instructions {
            assert!(
                opcodes::lookup(instruction.mnemonic()).is_some(),
                "no opcode for mnemonic '{}'",
                instruction.mnemonic()
            );
        }
    }
}
