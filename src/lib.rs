//! A declarative, Rust-native model of WebAssembly modules in which every
//! cross-reference is a symbolic name, together with an encoder that resolves
//! those names and emits the WebAssembly binary format.
//!
//! Modules are described with the [`model`] types and the instruction
//! constructors in [`ops`]; [`emitter::encode_module`] turns the description
//! into bytes accepted by any conformant engine.

pub mod emitter;
pub mod leb128;
pub mod model;
pub mod opcodes;
pub mod ops;

pub use emitter::*;
pub use leb128::{encode_int, encode_uint};
pub use model::*;
pub use opcodes::{opcode_table, Opcode};
