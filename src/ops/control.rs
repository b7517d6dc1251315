//! Control instructions: structured blocks, branches and calls.
//!
//! Block-structured constructors take a label and a nested body; the label
//! becomes the innermost block-stack entry while the body is emitted, and
//! branch instructions name it instead of carrying a relative depth. No
//! constructor inserts `end`: callers close every block, loop, `if` and
//! function body with an explicit [`end`].

use crate::model::{HeapType, Immediates, Instruction, Name, ValueType};

/// A structured block. `result` is the block type: a value type, or `None`
/// for the empty block type.
///
/// # Examples
/// ```rust
/// use wasm_composer::ops;
///
/// let block = ops::control::block(
///     "exit",
///     None,
///     vec![ops::control::br("exit"), ops::control::end()],
/// );
///
/// assert_eq!(block.mnemonic(), "block");
/// ```
pub fn block<N: Into<Name>>(
    label: N,
    result: Option<ValueType>,
    body: Vec<Instruction>,
) -> Instruction {
    Instruction::new(
        "block",
        Immediates::Block {
            label: label.into(),
            result,
            body,
        },
    )
}

/// A structured loop; branching to its label re-enters the loop.
pub fn loop_<N: Into<Name>>(
    label: N,
    result: Option<ValueType>,
    body: Vec<Instruction>,
) -> Instruction {
    Instruction::new(
        "loop",
        Immediates::Block {
            label: label.into(),
            result,
            body,
        },
    )
}

/// A conditional block; place an [`else_`] inside the body to add the
/// alternative arm.
pub fn if_<N: Into<Name>>(
    label: N,
    result: Option<ValueType>,
    body: Vec<Instruction>,
) -> Instruction {
    Instruction::new(
        "if",
        Immediates::Block {
            label: label.into(),
            result,
            body,
        },
    )
}

/// The alternative arm of an `if`. The body shares the scope of the
/// enclosing `if`, so branches inside it resolve against the `if` label.
pub fn else_(body: Vec<Instruction>) -> Instruction {
    Instruction::new("else", Immediates::Else(body))
}

/// An unconditional branch to the named enclosing block.
pub fn br<N: Into<Name>>(label: N) -> Instruction {
    Instruction::new("br", Immediates::Label(label.into()))
}

/// A conditional branch to the named enclosing block.
pub fn br_if<N: Into<Name>>(label: N) -> Instruction {
    Instruction::new("br_if", Immediates::Label(label.into()))
}

/// An indexed branch over the named targets with a named default.
pub fn br_table<N: Into<Name>>(targets: Vec<N>, default: N) -> Instruction {
    Instruction::new(
        "br_table",
        Immediates::LabelTable {
            targets: targets.into_iter().map(N::into).collect(),
            default: default.into(),
        },
    )
}

/// Branches to the named block when the reference on the stack is null.
pub fn br_on_null<N: Into<Name>>(label: N) -> Instruction {
    Instruction::new("br_on_null", Immediates::Label(label.into()))
}

/// Branches to the named block when the reference on the stack is not null.
pub fn br_on_non_null<N: Into<Name>>(label: N) -> Instruction {
    Instruction::new("br_on_non_null", Immediates::Label(label.into()))
}

/// Branches to the named block when the reference casts to the destination
/// heap type.
pub fn br_on_cast<N: Into<Name>>(
    label: N,
    source: HeapType,
    source_nullable: bool,
    destination: HeapType,
    destination_nullable: bool,
) -> Instruction {
    Instruction::new(
        "br_on_cast",
        Immediates::CastBranch {
            label: label.into(),
            source,
            source_nullable,
            destination,
            destination_nullable,
        },
    )
}

/// Branches to the named block when the reference does not cast to the
/// destination heap type.
pub fn br_on_cast_fail<N: Into<Name>>(
    label: N,
    source: HeapType,
    source_nullable: bool,
    destination: HeapType,
    destination_nullable: bool,
) -> Instruction {
    Instruction::new(
        "br_on_cast_fail",
        Immediates::CastBranch {
            label: label.into(),
            source,
            source_nullable,
            destination,
            destination_nullable,
        },
    )
}

/// Calls the named function.
pub fn call<N: Into<Name>>(function: N) -> Instruction {
    Instruction::new("call", Immediates::Function(function.into()))
}

/// Calls through the named table with the named signature.
pub fn call_indirect<N: Into<Name>>(signature: N, table: N) -> Instruction {
    Instruction::new(
        "call_indirect",
        Immediates::TypeAndTable {
            signature: signature.into(),
            table: table.into(),
        },
    )
}

/// Calls a typed function reference of the named signature.
pub fn call_ref<N: Into<Name>>(signature: N) -> Instruction {
    Instruction::new("call_ref", Immediates::Type(signature.into()))
}

/// Tail-calls the named function.
pub fn return_call<N: Into<Name>>(function: N) -> Instruction {
    Instruction::new("return_call", Immediates::Function(function.into()))
}

/// Tail-calls through the named table with the named signature.
pub fn return_call_indirect<N: Into<Name>>(signature: N, table: N) -> Instruction {
    Instruction::new(
        "return_call_indirect",
        Immediates::TypeAndTable {
            signature: signature.into(),
            table: table.into(),
        },
    )
}

/// Tail-calls a typed function reference of the named signature.
pub fn return_call_ref<N: Into<Name>>(signature: N) -> Instruction {
    Instruction::new("return_call_ref", Immediates::Type(signature.into()))
}

nullary_ops! {
    /// Traps unconditionally.
    unreachable => "unreachable";
    /// Does nothing.
    nop => "nop";
    /// Closes the innermost block, loop, `if` or function body.
    end => "end";
    /// Returns from the current function.
    return_ => "return";
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<Instruction> {
    let mut instructions = nullary_catalog();

    instructions.extend([
        block("b", None, vec![]),
        loop_("l", None, vec![]),
        if_("i", None, vec![]),
        else_(vec![]),
        br("b"),
        br_if("b"),
        br_table(vec!["b"], "b"),
        br_on_null("b"),
        br_on_non_null("b"),
        br_on_cast("b", HeapType::Any, true, HeapType::Struct, false),
        br_on_cast_fail("b", HeapType::Any, true, HeapType::Struct, false),
        call("f"),
        call_indirect("t", "table"),
        call_ref("t"),
        return_call("f"),
        return_call_indirect("t", "table"),
        return_call_ref("t"),
    ]);

    instructions
}
