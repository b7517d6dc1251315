//! Static registry mapping every instruction mnemonic to its opcode.
//!
//! Opcodes occupy up to 20 bits: plain instructions are one byte, while the
//! `0xFB` (garbage collection), `0xFC` (saturating truncation and bulk
//! memory), `0xFD` (vector) and `0xFE` (atomic) families carry a prefix byte
//! followed by an unsigned LEB128 sub-opcode. Each opcode is pre-encoded to
//! its byte form once, at first use of the table, and the cached bytes are
//! copied straight into the output when an instruction is emitted.

use crate::leb128;
use std::collections::HashMap;
use std::sync::LazyLock;

/// The largest representable opcode: a one-byte prefix plus a 12-bit
/// sub-opcode.
pub const MAX_OPCODE: u32 = 0xFFFFF;

/// An opcode and its cached binary encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Opcode {
    value: u32,
    encoding: Vec<u8>,
}

impl Opcode {
    /// The numeric opcode, prefix byte included.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// The bytes emitted for this opcode.
    pub fn encoding(&self) -> &[u8] {
        &self.encoding
    }
}

/// Encodes an opcode per the binary format: a plain opcode is its single raw
/// byte; a two-byte-prefixed opcode is the raw prefix followed by the low
/// byte as unsigned LEB128; sub-opcodes wider than a byte keep the raw
/// prefix in the top 8 bits and LEB128-encode the low 12. Returns `None`
/// when the opcode exceeds [`MAX_OPCODE`].
pub fn encode_opcode(opcode: u32) -> Option<Vec<u8>> {
    let mut encoding = Vec::with_capacity(3);

    if opcode <= 0xFF {
        encoding.push(opcode as u8);
    } else if opcode <= 0xFFFF {
        encoding.push((opcode >> 8) as u8);
        leb128::encode_uint(opcode & 0xFF, &mut encoding).ok()?;
    } else if opcode <= MAX_OPCODE {
        encoding.push((opcode >> 12) as u8);
        leb128::encode_uint(opcode & 0xFFF, &mut encoding).ok()?;
    } else {
        return None;
    }

    Some(encoding)
}

/// The mnemonic → opcode map, initialised once and immutable thereafter.
pub fn opcode_table() -> &'static HashMap<&'static str, Opcode> {
    &TABLE
}

/// Looks up the cached opcode for a mnemonic.
pub fn lookup(mnemonic: &str) -> Option<&'static Opcode> {
    TABLE.get(mnemonic)
}

static TABLE: LazyLock<HashMap<&'static str, Opcode>> = LazyLock::new(|| {
    OPCODES
        .iter()
        .map(|&(mnemonic, value)| {
            let encoding = match encode_opcode(value) {
                Some(encoding) => encoding,
                None => panic!("opcode {value:#X} for '{mnemonic}' exceeds 20 bits"),
            };

            (mnemonic, Opcode { value, encoding })
        })
        .collect()
});

#[rustfmt::skip]
const OPCODES: &[(&str, u32)] = &[
    // Control instructions.
    ("unreachable", 0x00),
    ("nop", 0x01),
    ("block", 0x02),
    ("loop", 0x03),
    ("if", 0x04),
    ("else", 0x05),
    ("end", 0x0B),
    ("br", 0x0C),
    ("br_if", 0x0D),
    ("br_table", 0x0E),
    ("return", 0x0F),
    ("call", 0x10),
    ("call_indirect", 0x11),
    ("return_call", 0x12),
    ("return_call_indirect", 0x13),
    ("call_ref", 0x14),
    ("return_call_ref", 0x15),
    // Parametric instructions.
    ("drop", 0x1A),
    ("select", 0x1B),
    ("select_with_type", 0x1C),
    // Variable instructions.
    ("local.get", 0x20),
    ("local.set", 0x21),
    ("local.tee", 0x22),
    ("global.get", 0x23),
    ("global.set", 0x24),
    // Table instructions.
    ("table.get", 0x25),
    ("table.set", 0x26),
    // Memory instructions.
    ("i32.load", 0x28),
    ("i64.load", 0x29),
    ("f32.load", 0x2A),
    ("f64.load", 0x2B),
    ("i32.load8_s", 0x2C),
    ("i32.load8_u", 0x2D),
    ("i32.load16_s", 0x2E),
    ("i32.load16_u", 0x2F),
    ("i64.load8_s", 0x30),
    ("i64.load8_u", 0x31),
    ("i64.load16_s", 0x32),
    ("i64.load16_u", 0x33),
    ("i64.load32_s", 0x34),
    ("i64.load32_u", 0x35),
    ("i32.store", 0x36),
    ("i64.store", 0x37),
    ("f32.store", 0x38),
    ("f64.store", 0x39),
    ("i32.store8", 0x3A),
    ("i32.store16", 0x3B),
    ("i64.store8", 0x3C),
    ("i64.store16", 0x3D),
    ("i64.store32", 0x3E),
    ("memory.size", 0x3F),
    ("memory.grow", 0x40),
    // Numeric constants.
    ("i32.const", 0x41),
    ("i64.const", 0x42),
    ("f32.const", 0x43),
    ("f64.const", 0x44),
    // i32 comparison.
    ("i32.eqz", 0x45),
    ("i32.eq", 0x46),
    ("i32.ne", 0x47),
    ("i32.lt_s", 0x48),
    ("i32.lt_u", 0x49),
    ("i32.gt_s", 0x4A),
    ("i32.gt_u", 0x4B),
    ("i32.le_s", 0x4C),
    ("i32.le_u", 0x4D),
    ("i32.ge_s", 0x4E),
    ("i32.ge_u", 0x4F),
    // i64 comparison.
    ("i64.eqz", 0x50),
    ("i64.eq", 0x51),
    ("i64.ne", 0x52),
    ("i64.lt_s", 0x53),
    ("i64.lt_u", 0x54),
    ("i64.gt_s", 0x55),
    ("i64.gt_u", 0x56),
    ("i64.le_s", 0x57),
    ("i64.le_u", 0x58),
    ("i64.ge_s", 0x59),
    ("i64.ge_u", 0x5A),
    // f32 comparison.
    ("f32.eq", 0x5B),
    ("f32.ne", 0x5C),
    ("f32.lt", 0x5D),
    ("f32.gt", 0x5E),
    ("f32.le", 0x5F),
    ("f32.ge", 0x60),
    // f64 comparison.
    ("f64.eq", 0x61),
    ("f64.ne", 0x62),
    ("f64.lt", 0x63),
    ("f64.gt", 0x64),
    ("f64.le", 0x65),
    ("f64.ge", 0x66),
    // i32 arithmetic.
    ("i32.clz", 0x67),
    ("i32.ctz", 0x68),
    ("i32.popcnt", 0x69),
    ("i32.add", 0x6A),
    ("i32.sub", 0x6B),
    ("i32.mul", 0x6C),
    ("i32.div_s", 0x6D),
    ("i32.div_u", 0x6E),
    ("i32.rem_s", 0x6F),
    ("i32.rem_u", 0x70),
    ("i32.and", 0x71),
    ("i32.or", 0x72),
    ("i32.xor", 0x73),
    ("i32.shl", 0x74),
    ("i32.shr_s", 0x75),
    ("i32.shr_u", 0x76),
    ("i32.rotl", 0x77),
    ("i32.rotr", 0x78),
    // i64 arithmetic.
    ("i64.clz", 0x79),
    ("i64.ctz", 0x7A),
    ("i64.popcnt", 0x7B),
    ("i64.add", 0x7C),
    ("i64.sub", 0x7D),
    ("i64.mul", 0x7E),
    ("i64.div_s", 0x7F),
    ("i64.div_u", 0x80),
    ("i64.rem_s", 0x81),
    ("i64.rem_u", 0x82),
    ("i64.and", 0x83),
    ("i64.or", 0x84),
    ("i64.xor", 0x85),
    ("i64.shl", 0x86),
    ("i64.shr_s", 0x87),
    ("i64.shr_u", 0x88),
    ("i64.rotl", 0x89),
    ("i64.rotr", 0x8A),
    // f32 arithmetic.
    ("f32.abs", 0x8B),
    ("f32.neg", 0x8C),
    ("f32.ceil", 0x8D),
    ("f32.floor", 0x8E),
    ("f32.trunc", 0x8F),
    ("f32.nearest", 0x90),
    ("f32.sqrt", 0x91),
    ("f32.add", 0x92),
    ("f32.sub", 0x93),
    ("f32.mul", 0x94),
    ("f32.div", 0x95),
    ("f32.min", 0x96),
    ("f32.max", 0x97),
    ("f32.copysign", 0x98),
    // f64 arithmetic.
    ("f64.abs", 0x99),
    ("f64.neg", 0x9A),
    ("f64.ceil", 0x9B),
    ("f64.floor", 0x9C),
    ("f64.trunc", 0x9D),
    ("f64.nearest", 0x9E),
    ("f64.sqrt", 0x9F),
    ("f64.add", 0xA0),
    ("f64.sub", 0xA1),
    ("f64.mul", 0xA2),
    ("f64.div", 0xA3),
    ("f64.min", 0xA4),
    ("f64.max", 0xA5),
    ("f64.copysign", 0xA6),
    // Conversions.
    ("i32.wrap_i64", 0xA7),
    ("i32.trunc_f32_s", 0xA8),
    ("i32.trunc_f32_u", 0xA9),
    ("i32.trunc_f64_s", 0xAA),
    ("i32.trunc_f64_u", 0xAB),
    ("i64.extend_i32_s", 0xAC),
    ("i64.extend_i32_u", 0xAD),
    ("i64.trunc_f32_s", 0xAE),
    ("i64.trunc_f32_u", 0xAF),
    ("i64.trunc_f64_s", 0xB0),
    ("i64.trunc_f64_u", 0xB1),
    ("f32.convert_i32_s", 0xB2),
    ("f32.convert_i32_u", 0xB3),
    ("f32.convert_i64_s", 0xB4),
    ("f32.convert_i64_u", 0xB5),
    ("f32.demote_f64", 0xB6),
    ("f64.convert_i32_s", 0xB7),
    ("f64.convert_i32_u", 0xB8),
    ("f64.convert_i64_s", 0xB9),
    ("f64.convert_i64_u", 0xBA),
    ("f64.promote_f32", 0xBB),
    ("i32.reinterpret_f32", 0xBC),
    ("i64.reinterpret_f64", 0xBD),
    ("f32.reinterpret_i32", 0xBE),
    ("f64.reinterpret_i64", 0xBF),
    // Sign extension.
    ("i32.extend8_s", 0xC0),
    ("i32.extend16_s", 0xC1),
    ("i64.extend8_s", 0xC2),
    ("i64.extend16_s", 0xC3),
    ("i64.extend32_s", 0xC4),
    // Reference instructions.
    ("ref.null", 0xD0),
    ("ref.is_null", 0xD1),
    ("ref.func", 0xD2),
    ("ref.eq", 0xD3),
    ("ref.as_non_null", 0xD4),
    ("br_on_null", 0xD5),
    ("br_on_non_null", 0xD6),
    // Garbage collection (0xFB prefix).
    ("struct.new", 0xFB00),
    ("struct.new_default", 0xFB01),
    ("struct.get", 0xFB02),
    ("struct.get_s", 0xFB03),
    ("struct.get_u", 0xFB04),
    ("struct.set", 0xFB05),
    ("array.new", 0xFB06),
    ("array.new_default", 0xFB07),
    ("array.new_fixed", 0xFB08),
    ("array.new_data", 0xFB09),
    ("array.new_elem", 0xFB0A),
    ("array.get", 0xFB0B),
    ("array.get_s", 0xFB0C),
    ("array.get_u", 0xFB0D),
    ("array.set", 0xFB0E),
    ("array.len", 0xFB0F),
    ("array.fill", 0xFB10),
    ("array.copy", 0xFB11),
    ("array.init_data", 0xFB12),
    ("array.init_elem", 0xFB13),
    ("ref.test", 0xFB14),
    ("ref.test_null", 0xFB15),
    ("ref.cast", 0xFB16),
    ("ref.cast_null", 0xFB17),
    ("br_on_cast", 0xFB18),
    ("br_on_cast_fail", 0xFB19),
    ("any.convert_extern", 0xFB1A),
    ("extern.convert_any", 0xFB1B),
    ("ref.i31", 0xFB1C),
    ("i31.get_s", 0xFB1D),
    ("i31.get_u", 0xFB1E),
    // Saturating truncation (0xFC prefix).
    ("i32.trunc_sat_f32_s", 0xFC00),
    ("i32.trunc_sat_f32_u", 0xFC01),
    ("i32.trunc_sat_f64_s", 0xFC02),
    ("i32.trunc_sat_f64_u", 0xFC03),
    ("i64.trunc_sat_f32_s", 0xFC04),
    ("i64.trunc_sat_f32_u", 0xFC05),
    ("i64.trunc_sat_f64_s", 0xFC06),
    ("i64.trunc_sat_f64_u", 0xFC07),
    // Bulk memory (0xFC prefix).
    ("memory.init", 0xFC08),
    ("data.drop", 0xFC09),
    ("memory.copy", 0xFC0A),
    ("memory.fill", 0xFC0B),
    ("table.init", 0xFC0C),
    ("elem.drop", 0xFC0D),
    ("table.copy", 0xFC0E),
    ("table.grow", 0xFC0F),
    ("table.size", 0xFC10),
    ("table.fill", 0xFC11),
    // Vector memory and constants (0xFD prefix).
    ("v128.load", 0xFD00),
    ("v128.load8x8_s", 0xFD01),
    ("v128.load8x8_u", 0xFD02),
    ("v128.load16x4_s", 0xFD03),
    ("v128.load16x4_u", 0xFD04),
    ("v128.load32x2_s", 0xFD05),
    ("v128.load32x2_u", 0xFD06),
    ("v128.load8_splat", 0xFD07),
    ("v128.load16_splat", 0xFD08),
    ("v128.load32_splat", 0xFD09),
    ("v128.load64_splat", 0xFD0A),
    ("v128.store", 0xFD0B),
    ("v128.const", 0xFD0C),
    ("i8x16.shuffle", 0xFD0D),
    ("i8x16.swizzle", 0xFD0E),
    ("i8x16.splat", 0xFD0F),
    ("i16x8.splat", 0xFD10),
    ("i32x4.splat", 0xFD11),
    ("i64x2.splat", 0xFD12),
    ("f32x4.splat", 0xFD13),
    ("f64x2.splat", 0xFD14),
    // Vector lanes.
    ("i8x16.extract_lane_s", 0xFD15),
    ("i8x16.extract_lane_u", 0xFD16),
    ("i8x16.replace_lane", 0xFD17),
    ("i16x8.extract_lane_s", 0xFD18),
    ("i16x8.extract_lane_u", 0xFD19),
    ("i16x8.replace_lane", 0xFD1A),
    ("i32x4.extract_lane", 0xFD1B),
    ("i32x4.replace_lane", 0xFD1C),
    ("i64x2.extract_lane", 0xFD1D),
    ("i64x2.replace_lane", 0xFD1E),
    ("f32x4.extract_lane", 0xFD1F),
    ("f32x4.replace_lane", 0xFD20),
    ("f64x2.extract_lane", 0xFD21),
    ("f64x2.replace_lane", 0xFD22),
    // Vector comparison.
    ("i8x16.eq", 0xFD23),
    ("i8x16.ne", 0xFD24),
    ("i8x16.lt_s", 0xFD25),
    ("i8x16.lt_u", 0xFD26),
    ("i8x16.gt_s", 0xFD27),
    ("i8x16.gt_u", 0xFD28),
    ("i8x16.le_s", 0xFD29),
    ("i8x16.le_u", 0xFD2A),
    ("i8x16.ge_s", 0xFD2B),
    ("i8x16.ge_u", 0xFD2C),
    ("i16x8.eq", 0xFD2D),
    ("i16x8.ne", 0xFD2E),
    ("i16x8.lt_s", 0xFD2F),
    ("i16x8.lt_u", 0xFD30),
    ("i16x8.gt_s", 0xFD31),
    ("i16x8.gt_u", 0xFD32),
    ("i16x8.le_s", 0xFD33),
    ("i16x8.le_u", 0xFD34),
    ("i16x8.ge_s", 0xFD35),
    ("i16x8.ge_u", 0xFD36),
    ("i32x4.eq", 0xFD37),
    ("i32x4.ne", 0xFD38),
    ("i32x4.lt_s", 0xFD39),
    ("i32x4.lt_u", 0xFD3A),
    ("i32x4.gt_s", 0xFD3B),
    ("i32x4.gt_u", 0xFD3C),
    ("i32x4.le_s", 0xFD3D),
    ("i32x4.le_u", 0xFD3E),
    ("i32x4.ge_s", 0xFD3F),
    ("i32x4.ge_u", 0xFD40),
    ("f32x4.eq", 0xFD41),
    ("f32x4.ne", 0xFD42),
    ("f32x4.lt", 0xFD43),
    ("f32x4.gt", 0xFD44),
    ("f32x4.le", 0xFD45),
    ("f32x4.ge", 0xFD46),
    ("f64x2.eq", 0xFD47),
    ("f64x2.ne", 0xFD48),
    ("f64x2.lt", 0xFD49),
    ("f64x2.gt", 0xFD4A),
    ("f64x2.le", 0xFD4B),
    ("f64x2.ge", 0xFD4C),
    // Vector bitwise.
    ("v128.not", 0xFD4D),
    ("v128.and", 0xFD4E),
    ("v128.andnot", 0xFD4F),
    ("v128.or", 0xFD50),
    ("v128.xor", 0xFD51),
    ("v128.bitselect", 0xFD52),
    ("v128.any_true", 0xFD53),
    // Vector lane memory.
    ("v128.load8_lane", 0xFD54),
    ("v128.load16_lane", 0xFD55),
    ("v128.load32_lane", 0xFD56),
    ("v128.load64_lane", 0xFD57),
    ("v128.store8_lane", 0xFD58),
    ("v128.store16_lane", 0xFD59),
    ("v128.store32_lane", 0xFD5A),
    ("v128.store64_lane", 0xFD5B),
    ("v128.load32_zero", 0xFD5C),
    ("v128.load64_zero", 0xFD5D),
    ("f32x4.demote_f64x2_zero", 0xFD5E),
    ("f64x2.promote_low_f32x4", 0xFD5F),
    // i8x16 arithmetic.
    ("i8x16.abs", 0xFD60),
    ("i8x16.neg", 0xFD61),
    ("i8x16.popcnt", 0xFD62),
    ("i8x16.all_true", 0xFD63),
    ("i8x16.bitmask", 0xFD64),
    ("i8x16.narrow_i16x8_s", 0xFD65),
    ("i8x16.narrow_i16x8_u", 0xFD66),
    ("f32x4.ceil", 0xFD67),
    ("f32x4.floor", 0xFD68),
    ("f32x4.trunc", 0xFD69),
    ("f32x4.nearest", 0xFD6A),
    ("i8x16.shl", 0xFD6B),
    ("i8x16.shr_s", 0xFD6C),
    ("i8x16.shr_u", 0xFD6D),
    ("i8x16.add", 0xFD6E),
    ("i8x16.add_sat_s", 0xFD6F),
    ("i8x16.add_sat_u", 0xFD70),
    ("i8x16.sub", 0xFD71),
    ("i8x16.sub_sat_s", 0xFD72),
    ("i8x16.sub_sat_u", 0xFD73),
    ("f64x2.ceil", 0xFD74),
    ("f64x2.floor", 0xFD75),
    ("i8x16.min_s", 0xFD76),
    ("i8x16.min_u", 0xFD77),
    ("i8x16.max_s", 0xFD78),
    ("i8x16.max_u", 0xFD79),
    ("f64x2.trunc", 0xFD7A),
    ("i8x16.avgr_u", 0xFD7B),
    ("i16x8.extadd_pairwise_i8x16_s", 0xFD7C),
    ("i16x8.extadd_pairwise_i8x16_u", 0xFD7D),
    ("i32x4.extadd_pairwise_i16x8_s", 0xFD7E),
    ("i32x4.extadd_pairwise_i16x8_u", 0xFD7F),
    // i16x8 arithmetic.
    ("i16x8.abs", 0xFD80),
    ("i16x8.neg", 0xFD81),
    ("i16x8.q15mulr_sat_s", 0xFD82),
    ("i16x8.all_true", 0xFD83),
    ("i16x8.bitmask", 0xFD84),
    ("i16x8.narrow_i32x4_s", 0xFD85),
    ("i16x8.narrow_i32x4_u", 0xFD86),
    ("i16x8.extend_low_i8x16_s", 0xFD87),
    ("i16x8.extend_high_i8x16_s", 0xFD88),
    ("i16x8.extend_low_i8x16_u", 0xFD89),
    ("i16x8.extend_high_i8x16_u", 0xFD8A),
    ("i16x8.shl", 0xFD8B),
    ("i16x8.shr_s", 0xFD8C),
    ("i16x8.shr_u", 0xFD8D),
    ("i16x8.add", 0xFD8E),
    ("i16x8.add_sat_s", 0xFD8F),
    ("i16x8.add_sat_u", 0xFD90),
    ("i16x8.sub", 0xFD91),
    ("i16x8.sub_sat_s", 0xFD92),
    ("i16x8.sub_sat_u", 0xFD93),
    ("f64x2.nearest", 0xFD94),
    ("i16x8.mul", 0xFD95),
    ("i16x8.min_s", 0xFD96),
    ("i16x8.min_u", 0xFD97),
    ("i16x8.max_s", 0xFD98),
    ("i16x8.max_u", 0xFD99),
    ("i16x8.avgr_u", 0xFD9B),
    ("i16x8.extmul_low_i8x16_s", 0xFD9C),
    ("i16x8.extmul_high_i8x16_s", 0xFD9D),
    ("i16x8.extmul_low_i8x16_u", 0xFD9E),
    ("i16x8.extmul_high_i8x16_u", 0xFD9F),
    // i32x4 arithmetic.
    ("i32x4.abs", 0xFDA0),
    ("i32x4.neg", 0xFDA1),
    ("i32x4.all_true", 0xFDA3),
    ("i32x4.bitmask", 0xFDA4),
    ("i32x4.extend_low_i16x8_s", 0xFDA7),
    ("i32x4.extend_high_i16x8_s", 0xFDA8),
    ("i32x4.extend_low_i16x8_u", 0xFDA9),
    ("i32x4.extend_high_i16x8_u", 0xFDAA),
    ("i32x4.shl", 0xFDAB),
    ("i32x4.shr_s", 0xFDAC),
    ("i32x4.shr_u", 0xFDAD),
    ("i32x4.add", 0xFDAE),
    ("i32x4.sub", 0xFDB1),
    ("i32x4.mul", 0xFDB5),
    ("i32x4.min_s", 0xFDB6),
    ("i32x4.min_u", 0xFDB7),
    ("i32x4.max_s", 0xFDB8),
    ("i32x4.max_u", 0xFDB9),
    ("i32x4.dot_i16x8_s", 0xFDBA),
    ("i32x4.extmul_low_i16x8_s", 0xFDBC),
    ("i32x4.extmul_high_i16x8_s", 0xFDBD),
    ("i32x4.extmul_low_i16x8_u", 0xFDBE),
    ("i32x4.extmul_high_i16x8_u", 0xFDBF),
    // i64x2 arithmetic.
    ("i64x2.abs", 0xFDC0),
    ("i64x2.neg", 0xFDC1),
    ("i64x2.all_true", 0xFDC3),
    ("i64x2.bitmask", 0xFDC4),
    ("i64x2.extend_low_i32x4_s", 0xFDC7),
    ("i64x2.extend_high_i32x4_s", 0xFDC8),
    ("i64x2.extend_low_i32x4_u", 0xFDC9),
    ("i64x2.extend_high_i32x4_u", 0xFDCA),
    ("i64x2.shl", 0xFDCB),
    ("i64x2.shr_s", 0xFDCC),
    ("i64x2.shr_u", 0xFDCD),
    ("i64x2.add", 0xFDCE),
    ("i64x2.sub", 0xFDD1),
    ("i64x2.mul", 0xFDD5),
    ("i64x2.eq", 0xFDD6),
    ("i64x2.ne", 0xFDD7),
    ("i64x2.lt_s", 0xFDD8),
    ("i64x2.gt_s", 0xFDD9),
    ("i64x2.le_s", 0xFDDA),
    ("i64x2.ge_s", 0xFDDB),
    ("i64x2.extmul_low_i32x4_s", 0xFDDC),
    ("i64x2.extmul_high_i32x4_s", 0xFDDD),
    ("i64x2.extmul_low_i32x4_u", 0xFDDE),
    ("i64x2.extmul_high_i32x4_u", 0xFDDF),
    // f32x4 arithmetic.
    ("f32x4.abs", 0xFDE0),
    ("f32x4.neg", 0xFDE1),
    ("f32x4.sqrt", 0xFDE3),
    ("f32x4.add", 0xFDE4),
    ("f32x4.sub", 0xFDE5),
    ("f32x4.mul", 0xFDE6),
    ("f32x4.div", 0xFDE7),
    ("f32x4.min", 0xFDE8),
    ("f32x4.max", 0xFDE9),
    ("f32x4.pmin", 0xFDEA),
    ("f32x4.pmax", 0xFDEB),
    // f64x2 arithmetic.
    ("f64x2.abs", 0xFDEC),
    ("f64x2.neg", 0xFDED),
    ("f64x2.sqrt", 0xFDEF),
    ("f64x2.add", 0xFDF0),
    ("f64x2.sub", 0xFDF1),
    ("f64x2.mul", 0xFDF2),
    ("f64x2.div", 0xFDF3),
    ("f64x2.min", 0xFDF4),
    ("f64x2.max", 0xFDF5),
    ("f64x2.pmin", 0xFDF6),
    ("f64x2.pmax", 0xFDF7),
    // Vector conversions.
    ("i32x4.trunc_sat_f32x4_s", 0xFDF8),
    ("i32x4.trunc_sat_f32x4_u", 0xFDF9),
    ("f32x4.convert_i32x4_s", 0xFDFA),
    ("f32x4.convert_i32x4_u", 0xFDFB),
    ("i32x4.trunc_sat_f64x2_s_zero", 0xFDFC),
    ("i32x4.trunc_sat_f64x2_u_zero", 0xFDFD),
    ("f64x2.convert_low_i32x4_s", 0xFDFE),
    ("f64x2.convert_low_i32x4_u", 0xFDFF),
    // Relaxed vector instructions (12-bit sub-opcodes).
    ("i8x16.relaxed_swizzle", 0xFD100),
    ("i32x4.relaxed_trunc_f32x4_s", 0xFD101),
    ("i32x4.relaxed_trunc_f32x4_u", 0xFD102),
    ("i32x4.relaxed_trunc_f64x2_s_zero", 0xFD103),
    ("i32x4.relaxed_trunc_f64x2_u_zero", 0xFD104),
    ("f32x4.relaxed_madd", 0xFD105),
    ("f32x4.relaxed_nmadd", 0xFD106),
    ("f64x2.relaxed_madd", 0xFD107),
    ("f64x2.relaxed_nmadd", 0xFD108),
    ("i8x16.relaxed_laneselect", 0xFD109),
    ("i16x8.relaxed_laneselect", 0xFD10A),
    ("i32x4.relaxed_laneselect", 0xFD10B),
    ("i64x2.relaxed_laneselect", 0xFD10C),
    ("f32x4.relaxed_min", 0xFD10D),
    ("f32x4.relaxed_max", 0xFD10E),
    ("f64x2.relaxed_min", 0xFD10F),
    ("f64x2.relaxed_max", 0xFD110),
    ("i16x8.relaxed_q15mulr_s", 0xFD111),
    ("i16x8.relaxed_dot_i8x16_i7x16_s", 0xFD112),
    ("i32x4.relaxed_dot_i8x16_i7x16_add_s", 0xFD113),
    // Atomic instructions (0xFE prefix).
    ("memory.atomic.notify", 0xFE00),
    ("memory.atomic.wait32", 0xFE01),
    ("memory.atomic.wait64", 0xFE02),
    ("atomic.fence", 0xFE03),
    ("i32.atomic.load", 0xFE10),
    ("i64.atomic.load", 0xFE11),
    ("i32.atomic.load8_u", 0xFE12),
    ("i32.atomic.load16_u", 0xFE13),
    ("i64.atomic.load8_u", 0xFE14),
    ("i64.atomic.load16_u", 0xFE15),
    ("i64.atomic.load32_u", 0xFE16),
    ("i32.atomic.store", 0xFE17),
    ("i64.atomic.store", 0xFE18),
    ("i32.atomic.store8", 0xFE19),
    ("i32.atomic.store16", 0xFE1A),
    ("i64.atomic.store8", 0xFE1B),
    ("i64.atomic.store16", 0xFE1C),
    ("i64.atomic.store32", 0xFE1D),
    ("i32.atomic.rmw.add", 0xFE1E),
    ("i64.atomic.rmw.add", 0xFE1F),
    ("i32.atomic.rmw8.add_u", 0xFE20),
    ("i32.atomic.rmw16.add_u", 0xFE21),
    ("i64.atomic.rmw8.add_u", 0xFE22),
    ("i64.atomic.rmw16.add_u", 0xFE23),
    ("i64.atomic.rmw32.add_u", 0xFE24),
    ("i32.atomic.rmw.sub", 0xFE25),
    ("i64.atomic.rmw.sub", 0xFE26),
    ("i32.atomic.rmw8.sub_u", 0xFE27),
    ("i32.atomic.rmw16.sub_u", 0xFE28),
    ("i64.atomic.rmw8.sub_u", 0xFE29),
    ("i64.atomic.rmw16.sub_u", 0xFE2A),
    ("i64.atomic.rmw32.sub_u", 0xFE2B),
    ("i32.atomic.rmw.and", 0xFE2C),
    ("i64.atomic.rmw.and", 0xFE2D),
    ("i32.atomic.rmw8.and_u", 0xFE2E),
    ("i32.atomic.rmw16.and_u", 0xFE2F),
    ("i64.atomic.rmw8.and_u", 0xFE30),
    ("i64.atomic.rmw16.and_u", 0xFE31),
    ("i64.atomic.rmw32.and_u", 0xFE32),
    ("i32.atomic.rmw.or", 0xFE33),
    ("i64.atomic.rmw.or", 0xFE34),
    ("i32.atomic.rmw8.or_u", 0xFE35),
    ("i32.atomic.rmw16.or_u", 0xFE36),
    ("i64.atomic.rmw8.or_u", 0xFE37),
    ("i64.atomic.rmw16.or_u", 0xFE38),
    ("i64.atomic.rmw32.or_u", 0xFE39),
    ("i32.atomic.rmw.xor", 0xFE3A),
    ("i64.atomic.rmw.xor", 0xFE3B),
    ("i32.atomic.rmw8.xor_u", 0xFE3C),
    ("i32.atomic.rmw16.xor_u", 0xFE3D),
    ("i64.atomic.rmw8.xor_u", 0xFE3E),
    ("i64.atomic.rmw16.xor_u", 0xFE3F),
    ("i64.atomic.rmw32.xor_u", 0xFE40),
    ("i32.atomic.rmw.xchg", 0xFE41),
    ("i64.atomic.rmw.xchg", 0xFE42),
    ("i32.atomic.rmw8.xchg_u", 0xFE43),
    ("i32.atomic.rmw16.xchg_u", 0xFE44),
    ("i64.atomic.rmw8.xchg_u", 0xFE45),
    ("i64.atomic.rmw16.xchg_u", 0xFE46),
    ("i64.atomic.rmw32.xchg_u", 0xFE47),
    ("i32.atomic.rmw.cmpxchg", 0xFE48),
    ("i64.atomic.rmw.cmpxchg", 0xFE49),
    ("i32.atomic.rmw8.cmpxchg_u", 0xFE4A),
    ("i32.atomic.rmw16.cmpxchg_u", 0xFE4B),
    ("i64.atomic.rmw8.cmpxchg_u", 0xFE4C),
    ("i64.atomic.rmw16.cmpxchg_u", 0xFE4D),
    ("i64.atomic.rmw32.cmpxchg_u", 0xFE4E),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_opcodes_are_single_raw_bytes() {
        assert_eq!(encode_opcode(0x6A).unwrap(), vec![0x6A]);
        assert_eq!(encode_opcode(0xD0).unwrap(), vec![0xD0]);
    }

    #[test]
    fn prefixed_opcodes_keep_the_prefix_raw() {
        assert_eq!(encode_opcode(0xFC08).unwrap(), vec![0xFC, 0x08]);
        assert_eq!(encode_opcode(0xFB14).unwrap(), vec![0xFB, 0x14]);
        assert_eq!(encode_opcode(0xFE48).unwrap(), vec![0xFE, 0x48]);
    }

    #[test]
    fn wide_sub_opcodes_use_leb128() {
        // f32x4.add: prefix 0xFD, sub-opcode 0xE4 needs a continuation group.
        assert_eq!(encode_opcode(0xFDE4).unwrap(), vec![0xFD, 0xE4, 0x01]);
        // Relaxed instructions carry 12-bit sub-opcodes.
        assert_eq!(encode_opcode(0xFD100).unwrap(), vec![0xFD, 0x80, 0x02]);
    }

    #[test]
    fn oversized_opcodes_are_rejected() {
        assert!(encode_opcode(MAX_OPCODE).is_some());
        assert!(encode_opcode(MAX_OPCODE + 1).is_none());
    }

    #[test]
    fn cached_encodings_match_a_fresh_application_of_the_rule() {
        for (mnemonic, opcode) in opcode_table() {
            assert_eq!(
                opcode.encoding(),
                encode_opcode(opcode.value()).unwrap().as_slice(),
                "stale cache for '{mnemonic}'",
            );
        }
    }

    #[test]
    fn mnemonics_are_unique() {
        assert_eq!(opcode_table().len(), OPCODES.len());
    }

    #[test]
    fn known_opcode_values() {
        assert_eq!(lookup("i32.add").unwrap().value(), 0x6A);
        assert_eq!(lookup("end").unwrap().value(), 0x0B);
        assert_eq!(lookup("memory.copy").unwrap().value(), 0xFC0A);
        assert_eq!(lookup("i8x16.shuffle").unwrap().value(), 0xFD0D);
        assert_eq!(lookup("struct.new").unwrap().value(), 0xFB00);
        assert_eq!(lookup("memory.atomic.notify").unwrap().value(), 0xFE00);
        assert!(lookup("i32.frobnicate").is_none());
    }
}
