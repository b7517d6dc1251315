//! A declarative model of WebAssembly modules with symbolic, name-based
//! cross-references.

mod errors;
mod instruction;
mod module;
mod types;
mod values;

pub mod indices;

pub use errors::ModelError;
pub use instruction::{Immediates, Instruction};
pub use module::*;
pub use types::*;
pub use values::Name;
