use crate::emitter::context::FunctionContext;
use crate::emitter::errors::EmitError;
use crate::emitter::types::{emit_heap_type, emit_value_type};
use crate::emitter::values::{emit_byte, emit_bytes, emit_f32, emit_f64, emit_u32, emit_vector};
use crate::leb128;
use crate::model::{Immediates, Instruction};
use crate::opcodes;
use std::io::Write;

/// Emit an instruction sequence to the output.
///
/// The sequence is emitted verbatim: terminating `end` opcodes are part of
/// the sequence itself, supplied by the caller.
///
/// See <https://webassembly.github.io/spec/core/binary/instructions.html#expressions>
pub(crate) fn emit_expression<O: Write + ?Sized>(
    instructions: &[Instruction],
    context: &FunctionContext,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    for instruction in instructions {
        bytes += emit_instruction(instruction, context, output)?;
    }

    Ok(bytes)
}

/// Emit a single instruction to the output: the cached opcode bytes followed
/// by the immediates, with nested bodies emitted recursively. Sequences are
/// not instructions of their own; they flatten depth-first in place.
///
/// See <https://webassembly.github.io/spec/core/binary/instructions.html>
pub(crate) fn emit_instruction<O: Write + ?Sized>(
    instruction: &Instruction,
    context: &FunctionContext,
    output: &mut O,
) -> Result<usize, EmitError> {
    if let Immediates::Sequence(instructions) = instruction.immediates() {
        return emit_expression(instructions, context, output);
    }

    let opcode = opcodes::lookup(instruction.mnemonic()).ok_or_else(|| {
        EmitError::MalformedInput(format!("unknown mnemonic '{}'", instruction.mnemonic()))
    })?;

    let mut bytes = emit_bytes(opcode.encoding(), output, false)?;

    bytes += emit_immediates(instruction.immediates(), context, output)?;

    Ok(bytes)
}

/// The single switch over every immediate layout.
fn emit_immediates<O: Write + ?Sized>(
    immediates: &Immediates,
    context: &FunctionContext,
    output: &mut O,
) -> Result<usize, EmitError> {
    let mut bytes = 0;

    match immediates {
        // Sequences never reach this switch; see emit_instruction.
        Immediates::None | Immediates::Sequence(_) => {}
        Immediates::Block {
            label,
            result,
            body,
        } => {
            bytes += match result {
                Some(kind) => emit_value_type(kind, output)?,
                None => emit_byte(0x40u8, output)?,
            };

            let scope = context.enter_block(label);
            bytes += emit_expression(body, &scope, output)?;
        }
        Immediates::Else(body) => {
            bytes += emit_expression(body, context, output)?;
        }
        Immediates::I32(value) => {
            bytes += leb128::encode_int(*value as i32, output)?;
        }
        Immediates::I64(value) => {
            bytes += leb128::encode_int(*value as i64, output)?;
        }
        Immediates::F32(value) => {
            bytes += emit_f32(value, output)?;
        }
        Immediates::F64(value) => {
            bytes += emit_f64(value, output)?;
        }
        Immediates::V128(value) => {
            bytes += emit_bytes(value, output, false)?;
        }
        Immediates::Local(name) => {
            bytes += emit_u32(context.resolve_local(name)?, output)?;
        }
        Immediates::Global(name) => {
            bytes += emit_u32(context.resolve_global(name)?, output)?;
        }
        Immediates::Function(name) => {
            bytes += emit_u32(context.resolve_function(name)?, output)?;
        }
        Immediates::Type(name) => {
            bytes += emit_u32(context.resolve_type(name)?, output)?;
        }
        Immediates::TypeAndTable { signature, table } => {
            bytes += emit_u32(context.resolve_type(signature)?, output)?;
            bytes += emit_u32(context.resolve_table(table)?, output)?;
        }
        Immediates::Label(label) => {
            bytes += emit_u32(context.branch_depth(label)?, output)?;
        }
        Immediates::LabelTable { targets, default } => {
            let depths = targets
                .iter()
                .map(|target| context.branch_depth(target))
                .collect::<Result<Vec<_>, _>>()?;

            bytes += emit_vector(&depths, output, emit_u32)?;
            bytes += emit_u32(context.branch_depth(default)?, output)?;
        }
        Immediates::CastBranch {
            label,
            source,
            source_nullable,
            destination,
            destination_nullable,
        } => {
            let flags = *source_nullable as u8 | (*destination_nullable as u8) << 1;

            bytes += emit_byte(flags, output)?;
            bytes += emit_u32(context.branch_depth(label)?, output)?;
            bytes += emit_heap_type(source, output)?;
            bytes += emit_heap_type(destination, output)?;
        }
        Immediates::MemoryAccess { align, offset } => {
            bytes += emit_u32(align, output)?;
            bytes += emit_u32(offset, output)?;
        }
        Immediates::LaneAccess {
            align,
            offset,
            lane,
            lane_count,
        } => {
            bytes += emit_u32(align, output)?;
            bytes += emit_u32(offset, output)?;
            bytes += emit_lane(*lane, *lane_count, output)?;
        }
        Immediates::Lane { lane, lane_count } => {
            bytes += emit_lane(*lane, *lane_count, output)?;
        }
        Immediates::Lanes(lanes) => {
            for &lane in lanes {
                bytes += emit_lane(lane, 32, output)?;
            }
        }
        Immediates::ValueTypes(types) => {
            bytes += emit_vector(types, output, emit_value_type)?;
        }
        Immediates::Memory(name) => {
            bytes += emit_u32(context.resolve_memory(name)?, output)?;
        }
        Immediates::MemoryInit { data, memory } => {
            bytes += emit_u32(context.resolve_data(data)?, output)?;
            bytes += emit_u32(context.resolve_memory(memory)?, output)?;
        }
        Immediates::MemoryCopy {
            destination,
            source,
        } => {
            bytes += emit_u32(context.resolve_memory(destination)?, output)?;
            bytes += emit_u32(context.resolve_memory(source)?, output)?;
        }
        Immediates::Table(name) => {
            bytes += emit_u32(context.resolve_table(name)?, output)?;
        }
        Immediates::TableInit { table, element } => {
            bytes += emit_u32(context.resolve_element(element)?, output)?;
            bytes += emit_u32(context.resolve_table(table)?, output)?;
        }
        Immediates::TableCopy {
            destination,
            source,
        } => {
            bytes += emit_u32(context.resolve_table(destination)?, output)?;
            bytes += emit_u32(context.resolve_table(source)?, output)?;
        }
        Immediates::Element(name) => {
            bytes += emit_u32(context.resolve_element(name)?, output)?;
        }
        Immediates::Data(name) => {
            bytes += emit_u32(context.resolve_data(name)?, output)?;
        }
        Immediates::HeapType(kind) => {
            bytes += emit_heap_type(kind, output)?;
        }
        Immediates::FieldAccess { structure, field } => {
            bytes += emit_u32(context.resolve_type(structure)?, output)?;
            bytes += emit_u32(field, output)?;
        }
        Immediates::ArrayLength { array, length } => {
            bytes += emit_u32(context.resolve_type(array)?, output)?;
            bytes += emit_u32(length, output)?;
        }
        Immediates::ArrayData { array, data } => {
            bytes += emit_u32(context.resolve_type(array)?, output)?;
            bytes += emit_u32(context.resolve_data(data)?, output)?;
        }
        Immediates::ArrayElement { array, element } => {
            bytes += emit_u32(context.resolve_type(array)?, output)?;
            bytes += emit_u32(context.resolve_element(element)?, output)?;
        }
        Immediates::ArrayCopy {
            destination,
            source,
        } => {
            bytes += emit_u32(context.resolve_type(destination)?, output)?;
            bytes += emit_u32(context.resolve_type(source)?, output)?;
        }
        Immediates::Fence => {
            bytes += emit_byte(0x00u8, output)?;
        }
    };

    Ok(bytes)
}

fn emit_lane<O: Write + ?Sized>(
    lane: u8,
    lane_count: u8,
    output: &mut O,
) -> Result<usize, EmitError> {
    if lane >= lane_count {
        return Err(EmitError::InvalidValue(format!(
            "lane index {lane} is out of range for {lane_count} lanes"
        )));
    }

    emit_byte(lane, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::context::ModuleIndices;
    use crate::model::{Module, Name, ValueType};
    use crate::ops;
    use std::collections::HashMap;

    fn emit(instruction: Instruction) -> Result<Vec<u8>, EmitError> {
        let module = Module::empty();
        let indices = ModuleIndices::new(&module).unwrap();
        let locals = HashMap::new();
        let context = FunctionContext::new(&indices, &locals);
        let mut buffer = Vec::new();

        emit_instruction(&instruction, &context, &mut buffer)?;

        Ok(buffer)
    }

    #[test]
    fn constants_use_signed_leb128() {
        assert_eq!(emit(ops::i32::constant(-1)).unwrap(), vec![0x41, 0x7F]);
        assert_eq!(emit(ops::i32::constant(0)).unwrap(), vec![0x41, 0x00]);
    }

    #[test]
    fn wide_i64_constants_take_the_slow_path() {
        let encoding = emit(ops::i64::constant(1i64 << 40)).unwrap();

        assert_eq!(encoding[0], 0x42);
        assert_eq!(encoding.len(), 7);
    }

    #[test]
    fn oversized_constants_wrap_to_their_width() {
        // u32::MAX is -1 once truncated to 32 bits.
        assert_eq!(
            emit(ops::i32::constant(u32::MAX)).unwrap(),
            vec![0x41, 0x7F]
        );
        assert_eq!(
            emit(ops::i64::constant(i128::from(u64::MAX) + 2)).unwrap(),
            vec![0x42, 0x01]
        );
    }

    #[test]
    fn float_constants_are_little_endian() {
        assert_eq!(
            emit(ops::f32::constant(1.0)).unwrap(),
            vec![0x43, 0x00, 0x00, 0x80, 0x3F]
        );
    }

    #[test]
    fn vector_constants_copy_verbatim() {
        let mut expected = vec![0xFD, 0x0C];
        expected.extend(1..=16);

        let bytes: Vec<u8> = (1..=16).collect();
        assert_eq!(
            emit(ops::v128::constant(bytes.try_into().unwrap())).unwrap(),
            expected
        );
    }

    #[test]
    fn block_types_encode_empty_and_valued() {
        let empty = emit(ops::control::block(
            "b",
            None,
            vec![ops::control::end()],
        ))
        .unwrap();
        assert_eq!(empty, vec![0x02, 0x40, 0x0B]);

        let valued = emit(ops::control::block(
            "b",
            Some(ValueType::I32),
            vec![ops::i32::constant(0), ops::control::end()],
        ))
        .unwrap();
        assert_eq!(valued, vec![0x02, 0x7F, 0x41, 0x00, 0x0B]);
    }

    #[test]
    fn branch_depths_count_from_innermost() {
        let nested = ops::control::block(
            "outer",
            None,
            vec![
                ops::control::block(
                    "middle",
                    None,
                    vec![
                        ops::control::block(
                            "inner",
                            None,
                            vec![
                                ops::control::br("outer"),
                                ops::control::br("inner"),
                                ops::control::end(),
                            ],
                        ),
                        ops::control::end(),
                    ],
                ),
                ops::control::end(),
            ],
        );

        let encoding = emit(nested).unwrap();

        assert_eq!(
            encoding,
            vec![
                0x02, 0x40, // outer
                0x02, 0x40, // middle
                0x02, 0x40, // inner
                0x0C, 0x02, // br outer: depth 2
                0x0C, 0x00, // br inner: depth 0
                0x0B, 0x0B, 0x0B,
            ]
        );
    }

    #[test]
    fn branch_tables_prefix_their_targets() {
        let nested = ops::control::block(
            "a",
            None,
            vec![
                ops::control::block(
                    "b",
                    None,
                    vec![
                        ops::control::block(
                            "c",
                            None,
                            vec![
                                ops::control::br_table(vec!["a", "c"], "b"),
                                ops::control::end(),
                            ],
                        ),
                        ops::control::end(),
                    ],
                ),
                ops::control::end(),
            ],
        );

        let encoding = emit(nested).unwrap();

        // br_table with targets [a, c] and default b: depths [2, 0], default 1.
        assert_eq!(
            &encoding[6..11],
            &[0x0E, 0x02, 0x02, 0x00, 0x01]
        );
    }

    #[test]
    fn else_shares_the_scope_of_its_if() {
        let conditional = ops::control::if_(
            "check",
            Some(ValueType::I32),
            vec![
                ops::i32::constant(1),
                ops::control::else_(vec![
                    ops::control::br("check"),
                    ops::i32::constant(0),
                ]),
                ops::control::end(),
            ],
        );

        let encoding = emit(conditional).unwrap();

        assert_eq!(
            encoding,
            vec![0x04, 0x7F, 0x41, 0x01, 0x05, 0x0C, 0x00, 0x41, 0x00, 0x0B]
        );
    }

    #[test]
    fn sequences_flatten_depth_first() {
        let spliced = ops::sequence(vec![
            ops::i32::constant(1),
            ops::sequence(vec![ops::i32::constant(2), ops::i32::constant(3)]),
            ops::i32::constant(4),
        ]);

        assert_eq!(
            emit(spliced).unwrap(),
            vec![0x41, 0x01, 0x41, 0x02, 0x41, 0x03, 0x41, 0x04]
        );
    }

    #[test]
    fn unknown_labels_are_unresolved_names() {
        match emit(ops::control::br("nowhere")) {
            Err(EmitError::UnresolvedName(name, "block")) => {
                assert_eq!(name, Name::from("nowhere"))
            }
            other => panic!("expected an unresolved label, got {other:?}"),
        }
    }

    #[test]
    fn unknown_locals_are_unresolved_names() {
        match emit(ops::local::get("ghost")) {
            Err(EmitError::UnresolvedName(name, "local")) => {
                assert_eq!(name, Name::from("ghost"))
            }
            other => panic!("expected an unresolved local, got {other:?}"),
        }
    }

    #[test]
    fn lane_indices_are_bounds_checked() {
        assert!(matches!(
            emit(ops::i64x2::extract_lane(2)),
            Err(EmitError::InvalidValue(_))
        ));
        assert_eq!(
            emit(ops::i64x2::extract_lane(1)).unwrap(),
            vec![0xFD, 0x1D, 0x01]
        );
    }

    #[test]
    fn shuffle_lanes_span_both_vectors() {
        let mut lanes = [0u8; 16];
        lanes[0] = 31;

        let encoding = emit(ops::i8x16::shuffle(lanes)).unwrap();
        assert_eq!(encoding.len(), 2 + 16);
        assert_eq!(encoding[2], 31);

        lanes[0] = 32;
        assert!(matches!(
            emit(ops::i8x16::shuffle(lanes)),
            Err(EmitError::InvalidValue(_))
        ));
    }

    #[test]
    fn typed_select_lists_its_types() {
        let encoding = emit(ops::parametric::select_with_type(vec![ValueType::F64])).unwrap();

        assert_eq!(encoding, vec![0x1C, 0x01, 0x7C]);
    }

    #[test]
    fn memory_accesses_emit_align_then_offset() {
        assert_eq!(emit(ops::i32::load(2, 8)).unwrap(), vec![0x28, 0x02, 0x08]);
        assert_eq!(
            emit(ops::atomic::i32::rmw_add(2, 0)).unwrap(),
            vec![0xFE, 0x1E, 0x02, 0x00]
        );
    }

    #[test]
    fn cast_branches_pack_nullability_flags() {
        let nested = ops::control::block(
            "out",
            None,
            vec![
                ops::control::br_on_cast(
                    "out",
                    crate::model::HeapType::Any,
                    true,
                    crate::model::HeapType::Struct,
                    false,
                ),
                ops::control::end(),
            ],
        );

        let encoding = emit(nested).unwrap();

        assert_eq!(
            &encoding[2..8],
            &[0xFB, 0x18, 0x01, 0x00, 0x6E, 0x6B]
        );
    }

    #[test]
    fn reference_null_carries_a_heap_type() {
        assert_eq!(
            emit(ops::reference::null(crate::model::HeapType::Func)).unwrap(),
            vec![0xD0, 0x70]
        );
    }
}
