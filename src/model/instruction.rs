//! WebAssembly instruction records.
//!
//! An instruction pairs the mnemonic that keys the opcode table with a tagged
//! description of its immediate arguments. All cross-references inside
//! immediates are symbolic: local, global, function, type, table, memory,
//! element, data and block names resolve to indices only when the encoder
//! runs, so records can be built in any order and reused across modules.

use crate::model::{HeapType, Name, ValueType};

/// A single instruction as produced by the constructors in [`crate::ops`].
///
/// Instruction records are plain data: constructed by DSL calls, consumed
/// once during encoding, then discarded.
///
/// # Examples
/// ```rust
/// use wasm_composer::ops;
///
/// let record = ops::i32::add();
///
/// assert_eq!(record.mnemonic(), "i32.add");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    mnemonic: &'static str,
    immediates: Immediates,
}

impl Instruction {
    pub(crate) fn new(mnemonic: &'static str, immediates: Immediates) -> Self {
        Instruction {
            mnemonic,
            immediates,
        }
    }

    /// An instruction with no immediate arguments.
    pub(crate) fn nullary(mnemonic: &'static str) -> Self {
        Instruction {
            mnemonic,
            immediates: Immediates::None,
        }
    }

    /// The opcode-table key for this instruction.
    pub fn mnemonic(&self) -> &'static str {
        self.mnemonic
    }

    /// The immediate arguments that follow the opcode in the binary format.
    pub fn immediates(&self) -> &Immediates {
        &self.immediates
    }
}

/// The immediate arguments of an instruction, one variant per layout.
///
/// The encoder drives a single switch over this enum; the variants carry
/// names rather than indices wherever the binary format wants an index into
/// one of the module's index spaces.
#[derive(Clone, Debug, PartialEq)]
pub enum Immediates {
    /// No bytes follow the opcode.
    None,
    /// Not an instruction of its own: a nested list spliced into the
    /// enclosing sequence depth-first at emission.
    Sequence(Vec<Instruction>),
    /// A structured `block`, `loop` or `if`: a label for branch resolution,
    /// an optional result type, and the nested body. The body is emitted in
    /// a scope where the label is the innermost block-stack entry; callers
    /// terminate it with an explicit `end`.
    Block {
        label: Name,
        result: Option<ValueType>,
        body: Vec<Instruction>,
    },
    /// The alternative arm of an `if`. No block type byte; the body shares
    /// the scope of the enclosing `if`.
    Else(Vec<Instruction>),
    /// `i32.const`: signed LEB128, truncated to 32 bits two's complement.
    I32(i128),
    /// `i64.const`: signed LEB128, truncated to 64 bits two's complement.
    I64(i128),
    /// `f32.const`: little-endian IEEE-754.
    F32(f32),
    /// `f64.const`: little-endian IEEE-754.
    F64(f64),
    /// `v128.const`: sixteen raw bytes copied verbatim.
    V128([u8; 16]),
    /// Index of a local, parameters first.
    Local(Name),
    Global(Name),
    /// Index of a function (`call`, `return_call`, `ref.func`).
    Function(Name),
    /// Index of a type (`call_ref`, `return_call_ref`, `struct.new*`,
    /// `array.*`).
    Type(Name),
    /// `call_indirect` and `return_call_indirect`: type index then table index.
    TypeAndTable { signature: Name, table: Name },
    /// Branch depth of the named enclosing block (`br`, `br_if`,
    /// `br_on_null`, `br_on_non_null`).
    Label(Name),
    /// `br_table`: length-prefixed depth array followed by the default depth.
    LabelTable { targets: Vec<Name>, default: Name },
    /// `br_on_cast` and `br_on_cast_fail`: a flags byte (bit 0 source
    /// nullability, bit 1 destination nullability), the branch depth, then
    /// the source and destination heap-type id bytes.
    CastBranch {
        label: Name,
        source: HeapType,
        source_nullable: bool,
        destination: HeapType,
        destination_nullable: bool,
    },
    /// Plain memory access: alignment exponent then offset.
    MemoryAccess { align: u32, offset: u32 },
    /// Lane-indexed memory access: alignment, offset, then one lane byte.
    LaneAccess {
        align: u32,
        offset: u32,
        lane: u8,
        lane_count: u8,
    },
    /// A single lane index byte (`extract_lane*`, `replace_lane`).
    Lane { lane: u8, lane_count: u8 },
    /// `i8x16.shuffle`: sixteen lane-index bytes, each below 32.
    Lanes([u8; 16]),
    /// `select` with explicit types: a length-prefixed value-type vector.
    ValueTypes(Vec<ValueType>),
    /// Index of a memory (`memory.size`, `memory.grow`, `memory.fill`).
    Memory(Name),
    /// `memory.init`: data index then memory index.
    MemoryInit { data: Name, memory: Name },
    /// `memory.copy`: destination memory index then source memory index.
    MemoryCopy { destination: Name, source: Name },
    /// Index of a table (`table.get`, `table.grow`, `table.fill`, ...).
    Table(Name),
    /// `table.init`: element index after the table index.
    TableInit { table: Name, element: Name },
    /// `table.copy`: destination table index then source table index.
    TableCopy { destination: Name, source: Name },
    /// `elem.drop`: index of an element segment.
    Element(Name),
    /// `data.drop`: index of a data segment.
    Data(Name),
    /// A heap-type id byte (`ref.null`, `ref.test*`, `ref.cast*`).
    HeapType(HeapType),
    /// `struct.get*` and `struct.set`: type index then field index.
    FieldAccess { structure: Name, field: u32 },
    /// `array.new_fixed`: type index then element count.
    ArrayLength { array: Name, length: u32 },
    /// `array.new_data` and `array.init_data`: type index then data index.
    ArrayData { array: Name, data: Name },
    /// `array.new_elem` and `array.init_elem`: type index then element index.
    ArrayElement { array: Name, element: Name },
    /// `array.copy`: destination type index then source type index.
    ArrayCopy { destination: Name, source: Name },
    /// `atomic.fence`: one reserved zero byte.
    Fence,
}
