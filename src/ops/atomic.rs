//! Atomic memory instructions from the threads proposal.
//!
//! Every access takes an align/offset pair like its non-atomic counterpart;
//! [`fence`] carries a single reserved zero byte.

use crate::model::{Immediates, Instruction};

memarg_ops! {
    /// Wakes up to a popped count of waiters at the address.
    notify => "memory.atomic.notify";
    /// Blocks while the 32-bit value at the address matches an expectation.
    wait32 => "memory.atomic.wait32";
    /// Blocks while the 64-bit value at the address matches an expectation.
    wait64 => "memory.atomic.wait64";
}

/// Orders all preceding and following atomic accesses.
pub fn fence() -> Instruction {
    Instruction::new("atomic.fence", Immediates::Fence)
}

/// Atomic accesses to 32-bit integers.
pub mod i32 {
    memarg_ops! {
        load => "i32.atomic.load";
        load8_u => "i32.atomic.load8_u";
        load16_u => "i32.atomic.load16_u";
        store => "i32.atomic.store";
        store8 => "i32.atomic.store8";
        store16 => "i32.atomic.store16";
        rmw_add => "i32.atomic.rmw.add";
        rmw8_add_u => "i32.atomic.rmw8.add_u";
        rmw16_add_u => "i32.atomic.rmw16.add_u";
        rmw_sub => "i32.atomic.rmw.sub";
        rmw8_sub_u => "i32.atomic.rmw8.sub_u";
        rmw16_sub_u => "i32.atomic.rmw16.sub_u";
        rmw_and => "i32.atomic.rmw.and";
        rmw8_and_u => "i32.atomic.rmw8.and_u";
        rmw16_and_u => "i32.atomic.rmw16.and_u";
        rmw_or => "i32.atomic.rmw.or";
        rmw8_or_u => "i32.atomic.rmw8.or_u";
        rmw16_or_u => "i32.atomic.rmw16.or_u";
        rmw_xor => "i32.atomic.rmw.xor";
        rmw8_xor_u => "i32.atomic.rmw8.xor_u";
        rmw16_xor_u => "i32.atomic.rmw16.xor_u";
        rmw_xchg => "i32.atomic.rmw.xchg";
        rmw8_xchg_u => "i32.atomic.rmw8.xchg_u";
        rmw16_xchg_u => "i32.atomic.rmw16.xchg_u";
        rmw_cmpxchg => "i32.atomic.rmw.cmpxchg";
        rmw8_cmpxchg_u => "i32.atomic.rmw8.cmpxchg_u";
        rmw16_cmpxchg_u => "i32.atomic.rmw16.cmpxchg_u";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        memarg_catalog()
    }
}

/// Atomic accesses to 64-bit integers.
pub mod i64 {
    memarg_ops! {
        load => "i64.atomic.load";
        load8_u => "i64.atomic.load8_u";
        load16_u => "i64.atomic.load16_u";
        load32_u => "i64.atomic.load32_u";
        store => "i64.atomic.store";
        store8 => "i64.atomic.store8";
        store16 => "i64.atomic.store16";
        store32 => "i64.atomic.store32";
        rmw_add => "i64.atomic.rmw.add";
        rmw8_add_u => "i64.atomic.rmw8.add_u";
        rmw16_add_u => "i64.atomic.rmw16.add_u";
        rmw32_add_u => "i64.atomic.rmw32.add_u";
        rmw_sub => "i64.atomic.rmw.sub";
        rmw8_sub_u => "i64.atomic.rmw8.sub_u";
        rmw16_sub_u => "i64.atomic.rmw16.sub_u";
        rmw32_sub_u => "i64.atomic.rmw32.sub_u";
        rmw_and => "i64.atomic.rmw.and";
        rmw8_and_u => "i64.atomic.rmw8.and_u";
        rmw16_and_u => "i64.atomic.rmw16.and_u";
        rmw32_and_u => "i64.atomic.rmw32.and_u";
        rmw_or => "i64.atomic.rmw.or";
        rmw8_or_u => "i64.atomic.rmw8.or_u";
        rmw16_or_u => "i64.atomic.rmw16.or_u";
        rmw32_or_u => "i64.atomic.rmw32.or_u";
        rmw_xor => "i64.atomic.rmw.xor";
        rmw8_xor_u => "i64.atomic.rmw8.xor_u";
        rmw16_xor_u => "i64.atomic.rmw16.xor_u";
        rmw32_xor_u => "i64.atomic.rmw32.xor_u";
        rmw_xchg => "i64.atomic.rmw.xchg";
        rmw8_xchg_u => "i64.atomic.rmw8.xchg_u";
        rmw16_xchg_u => "i64.atomic.rmw16.xchg_u";
        rmw32_xchg_u => "i64.atomic.rmw32.xchg_u";
        rmw_cmpxchg => "i64.atomic.rmw.cmpxchg";
        rmw8_cmpxchg_u => "i64.atomic.rmw8.cmpxchg_u";
        rmw16_cmpxchg_u => "i64.atomic.rmw16.cmpxchg_u";
        rmw32_cmpxchg_u => "i64.atomic.rmw32.cmpxchg_u";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        memarg_catalog()
    }
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    let mut instructions = memarg_catalog();

    instructions.push(fence());
    instructions.extend(i32::catalog());
    instructions.extend(i64::catalog());

    instructions
}
