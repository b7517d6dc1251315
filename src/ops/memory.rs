//! Memory instructions addressing whole memories. Loads and stores live
//! with their operand types (e.g. [`crate::ops::i32::load`]).

use crate::model::{Immediates, Instruction, Name};

/// Pushes the current size of the named memory, in pages.
pub fn size<N: Into<Name>>(memory: N) -> Instruction {
    Instruction::new("memory.size", Immediates::Memory(memory.into()))
}

/// Grows the named memory by a popped number of pages.
pub fn grow<N: Into<Name>>(memory: N) -> Instruction {
    Instruction::new("memory.grow", Immediates::Memory(memory.into()))
}

/// Fills a range of the named memory with a byte value.
pub fn fill<N: Into<Name>>(memory: N) -> Instruction {
    Instruction::new("memory.fill", Immediates::Memory(memory.into()))
}

/// Copies a run of the named data segment into the named memory.
pub fn init<N: Into<Name>>(data: N, memory: N) -> Instruction {
    Instruction::new(
        "memory.init",
        Immediates::MemoryInit {
            data: data.into(),
            memory: memory.into(),
        },
    )
}

/// Copies a range between memories; the immediates are the destination
/// memory index then the source memory index, each resolved independently.
pub fn copy<N: Into<Name>>(destination: N, source: N) -> Instruction {
    Instruction::new(
        "memory.copy",
        Immediates::MemoryCopy {
            destination: destination.into(),
            source: source.into(),
        },
    )
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    vec![
        size("m"),
        grow("m"),
        fill("m"),
        init("d", "m"),
        copy("m", "n"),
    ]
}
