//! Model for types in the WebAssembly syntax.

/// Number types classify numeric values.
/// Number types are transparent, meaning that their bit patterns can be observed.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#number-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NumberType {
    I32,
    I64,
    F32,
    F64,
}

/// Heap types classify the categories of references: either one of the
/// predefined abstract categories, each with a fixed one-byte identifier.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#heap-types>
///
/// # Examples
/// ```rust
/// use wasm_composer::HeapType;
///
/// assert_eq!(HeapType::Func.id(), 0x70);
/// assert_eq!(HeapType::Extern.id(), 0x6F);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HeapType {
    NoFunc,
    NoExtern,
    None,
    Func,
    Extern,
    Any,
    Eq,
    I31,
    Struct,
    Array,
}

impl HeapType {
    /// The one-byte identifier of this heap type in the binary format.
    pub fn id(&self) -> u8 {
        match self {
            HeapType::NoFunc => 0x73,
            HeapType::NoExtern => 0x72,
            HeapType::None => 0x71,
            HeapType::Func => 0x70,
            HeapType::Extern => 0x6F,
            HeapType::Any => 0x6E,
            HeapType::Eq => 0x6D,
            HeapType::I31 => 0x6C,
            HeapType::Struct => 0x6B,
            HeapType::Array => 0x6A,
        }
    }
}

/// Reference types classify first-class references to objects in the runtime store.
/// A reference is spelled in one of six shapes: a short form naming a
/// predefined heap type or a type index directly, or a long form that makes
/// nullability explicit (`0x63` nullable, `0x64` non-nullable) followed by a
/// heap-type id or a signed type index.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#reference-types>
///
/// # Examples
/// ```rust
/// use wasm_composer::{HeapType, ReferenceType};
///
/// let funcref = ReferenceType::Id(HeapType::Func);
/// let boxed = ReferenceType::NullableIndex(3);
///
/// assert_ne!(funcref, boxed);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ReferenceType {
    /// A predefined heap type, emitted as its single id byte.
    Id(HeapType),
    /// A bare type index, emitted as a signed LEB128 integer.
    Index(u32),
    /// `0x63` followed by a heap-type id byte.
    NullableId(HeapType),
    /// `0x63` followed by a signed LEB128 type index.
    NullableIndex(u32),
    /// `0x64` followed by a heap-type id byte.
    NonNullableId(HeapType),
    /// `0x64` followed by a signed LEB128 type index.
    NonNullableIndex(u32),
}

impl ReferenceType {
    /// The `funcref` shorthand.
    pub fn function() -> Self {
        ReferenceType::Id(HeapType::Func)
    }

    /// The `externref` shorthand.
    pub fn external() -> Self {
        ReferenceType::Id(HeapType::Extern)
    }
}

impl From<HeapType> for ReferenceType {
    fn from(kind: HeapType) -> Self {
        ReferenceType::Id(kind)
    }
}

/// Value types classify the individual values that WebAssembly code can
/// compute with: number types, the vector type, or reference types.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#value-types>
///
/// # Examples
/// ```rust
/// use wasm_composer::{NumberType, ValueType};
///
/// assert_eq!(ValueType::I32, NumberType::I32.into());
/// assert_eq!(ValueType::F64, NumberType::F64.into());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ValueType {
    I32,
    I64,
    F32,
    F64,
    V128,
    Reference(ReferenceType),
}

impl From<NumberType> for ValueType {
    fn from(kind: NumberType) -> Self {
        match kind {
            NumberType::I32 => ValueType::I32,
            NumberType::I64 => ValueType::I64,
            NumberType::F32 => ValueType::F32,
            NumberType::F64 => ValueType::F64,
        }
    }
}

impl From<ReferenceType> for ValueType {
    fn from(kind: ReferenceType) -> Self {
        ValueType::Reference(kind)
    }
}

/// Storage types extend value types with the packed types `i8` and `i16`,
/// usable only as struct field and array element storage.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#storage-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StorageType {
    Value(ValueType),
    I8,
    I16,
}

impl From<ValueType> for StorageType {
    fn from(kind: ValueType) -> Self {
        StorageType::Value(kind)
    }
}

/// A field of a struct type or the element of an array type:
/// a storage type together with a mutability flag.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#field-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FieldType {
    storage: StorageType,
    mutable: bool,
}

impl FieldType {
    pub fn new(storage: StorageType, mutable: bool) -> Self {
        FieldType { storage, mutable }
    }

    /// An immutable field of the given storage type.
    pub fn immutable(storage: StorageType) -> Self {
        FieldType {
            storage,
            mutable: false,
        }
    }

    /// A mutable field of the given storage type.
    pub fn mutable(storage: StorageType) -> Self {
        FieldType {
            storage,
            mutable: true,
        }
    }

    pub fn storage(&self) -> &StorageType {
        &self.storage
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}

/// Function signatures classify functions, mapping a vector of parameter
/// types to a vector of result types.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#function-types>
///
/// # Examples
/// ```rust
/// use wasm_composer::{FunctionSignature, ValueType};
///
/// let signature = FunctionSignature::new(vec![ValueType::I32], vec![ValueType::I64]);
///
/// assert_eq!(signature.parameters(), &[ValueType::I32]);
/// assert_eq!(signature.results(), &[ValueType::I64]);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FunctionSignature {
    parameters: Vec<ValueType>,
    results: Vec<ValueType>,
}

impl FunctionSignature {
    pub fn new(parameters: Vec<ValueType>, results: Vec<ValueType>) -> Self {
        FunctionSignature {
            parameters,
            results,
        }
    }

    pub fn parameters(&self) -> &[ValueType] {
        &self.parameters
    }

    pub fn results(&self) -> &[ValueType] {
        &self.results
    }
}

/// Composite types are the bodies of user-defined types: an array of one
/// field type, a struct of many, or a function signature.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#composite-types>
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CompositeType {
    Array(FieldType),
    Struct(Vec<FieldType>),
    Function(FunctionSignature),
}

/// A subtype wraps a composite type with an optional list of supertype
/// indices and a finality flag.
///
/// See <https://webassembly.github.io/gc/core/syntax/types.html#subtyping>
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubType {
    composite: CompositeType,
    supertypes: Vec<u32>,
    is_final: bool,
}

impl SubType {
    pub fn new(composite: CompositeType, supertypes: Vec<u32>, is_final: bool) -> Self {
        SubType {
            composite,
            supertypes,
            is_final,
        }
    }

    /// A final subtype with no declared supertypes; encodes as the bare
    /// composite type.
    pub fn final_type(composite: CompositeType) -> Self {
        SubType {
            composite,
            supertypes: Vec::new(),
            is_final: true,
        }
    }

    pub fn composite(&self) -> &CompositeType {
        &self.composite
    }

    pub fn supertypes(&self) -> &[u32] {
        &self.supertypes
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }
}

/// The body of a named type definition: a plain composite type, a subtype,
/// or a group of mutually recursive subtypes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DefinedType {
    Composite(CompositeType),
    Sub(SubType),
    Recursive(Vec<SubType>),
}

/// Limits classify the size range of resizeable storage associated with
/// memory types and table types.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#limits>
///
/// # Examples
/// ```rust
/// use wasm_composer::Limit;
///
/// let bounded = Limit::bounded(1, 2);
/// let unbounded = Limit::unbounded(1);
///
/// assert_eq!(bounded.min(), unbounded.min());
/// assert_eq!(bounded.max(), Some(2));
/// assert_eq!(unbounded.max(), None);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Limit {
    min: u32,
    max: Option<u32>,
}

impl Limit {
    pub fn new(min: u32, max: Option<u32>) -> Self {
        Limit { min, max }
    }

    pub fn bounded(min: u32, max: u32) -> Self {
        Limit {
            min,
            max: Some(max),
        }
    }

    pub fn unbounded(min: u32) -> Self {
        Limit { min, max: None }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }
}

/// Memory types classify linear memories and their size range.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#memory-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MemoryType {
    limits: Limit,
}

impl MemoryType {
    pub fn new(limits: Limit) -> Self {
        MemoryType { limits }
    }

    pub fn limits(&self) -> &Limit {
        &self.limits
    }
}

/// Table types classify tables over elements of reference type within a size range.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#table-types>
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct TableType {
    kind: ReferenceType,
    limits: Limit,
}

impl TableType {
    pub fn new(kind: ReferenceType, limits: Limit) -> Self {
        TableType { kind, limits }
    }

    pub fn kind(&self) -> &ReferenceType {
        &self.kind
    }

    pub fn limits(&self) -> &Limit {
        &self.limits
    }
}

/// Global types classify global variables, which hold a value and can either
/// be mutable or immutable.
///
/// See <https://webassembly.github.io/spec/core/syntax/types.html#global-types>
///
/// # Examples
/// ```rust
/// use wasm_composer::{GlobalType, ValueType};
///
/// assert!(GlobalType::mutable(ValueType::I32).is_mutable());
/// assert!(!GlobalType::immutable(ValueType::I32).is_mutable());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct GlobalType {
    kind: ValueType,
    mutable: bool,
}

impl GlobalType {
    pub fn new(kind: ValueType, mutable: bool) -> Self {
        GlobalType { kind, mutable }
    }

    pub fn mutable(kind: ValueType) -> Self {
        GlobalType {
            kind,
            mutable: true,
        }
    }

    pub fn immutable(kind: ValueType) -> Self {
        GlobalType {
            kind,
            mutable: false,
        }
    }

    pub fn kind(&self) -> &ValueType {
        &self.kind
    }

    pub fn is_mutable(&self) -> bool {
        self.mutable
    }
}
