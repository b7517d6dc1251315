//! Definitions are referenced with zero-based indices.
//! Each class of definition has its own index space, assigned by the encoder
//! in declaration order. The index space for locals is only accessible
//! inside a function and includes the parameters of that function, which
//! precede the local variables.
//!
//! See <https://webassembly.github.io/spec/core/syntax/modules.html#indices>

pub type TypeIndex = u32;
pub type FunctionIndex = u32;
pub type TableIndex = u32;
pub type MemoryIndex = u32;
pub type GlobalIndex = u32;
pub type ElementIndex = u32;
pub type DataIndex = u32;
pub type LocalIndex = u32;
pub type FieldIndex = u32;
