//! Vector (128-bit SIMD) instructions, including the relaxed forms, grouped
//! by interpretation shape.

/// Whole-vector instructions.
pub mod v128 {
    use crate::model::{Immediates, Instruction};

    /// Pushes a constant vector; the sixteen bytes are copied verbatim.
    pub fn constant(bytes: [u8; 16]) -> Instruction {
        Instruction::new("v128.const", Immediates::V128(bytes))
    }

    fn lane_access(
        mnemonic: &'static str,
        align: u32,
        offset: u32,
        lane: u8,
        lane_count: u8,
    ) -> Instruction {
        Instruction::new(
            mnemonic,
            Immediates::LaneAccess {
                align,
                offset,
                lane,
                lane_count,
            },
        )
    }

    /// Loads one byte into the given lane, preserving the rest.
    pub fn load8_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.load8_lane", align, offset, lane, 16)
    }

    /// Loads a 16-bit value into the given lane, preserving the rest.
    pub fn load16_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.load16_lane", align, offset, lane, 8)
    }

    /// Loads a 32-bit value into the given lane, preserving the rest.
    pub fn load32_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.load32_lane", align, offset, lane, 4)
    }

    /// Loads a 64-bit value into the given lane, preserving the rest.
    pub fn load64_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.load64_lane", align, offset, lane, 2)
    }

    /// Stores one byte from the given lane.
    pub fn store8_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.store8_lane", align, offset, lane, 16)
    }

    /// Stores a 16-bit value from the given lane.
    pub fn store16_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.store16_lane", align, offset, lane, 8)
    }

    /// Stores a 32-bit value from the given lane.
    pub fn store32_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.store32_lane", align, offset, lane, 4)
    }

    /// Stores a 64-bit value from the given lane.
    pub fn store64_lane(align: u32, offset: u32, lane: u8) -> Instruction {
        lane_access("v128.store64_lane", align, offset, lane, 2)
    }

    memarg_ops! {
        load => "v128.load";
        load8x8_s => "v128.load8x8_s";
        load8x8_u => "v128.load8x8_u";
        load16x4_s => "v128.load16x4_s";
        load16x4_u => "v128.load16x4_u";
        load32x2_s => "v128.load32x2_s";
        load32x2_u => "v128.load32x2_u";
        load8_splat => "v128.load8_splat";
        load16_splat => "v128.load16_splat";
        load32_splat => "v128.load32_splat";
        load64_splat => "v128.load64_splat";
        load32_zero => "v128.load32_zero";
        load64_zero => "v128.load64_zero";
        store => "v128.store";
    }

    nullary_ops! {
        not => "v128.not";
        and => "v128.and";
        andnot => "v128.andnot";
        or => "v128.or";
        xor => "v128.xor";
        bitselect => "v128.bitselect";
        any_true => "v128.any_true";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(memarg_catalog());
        instructions.extend([
            constant([0; 16]),
            load8_lane(0, 0, 0),
            load16_lane(0, 0, 0),
            load32_lane(0, 0, 0),
            load64_lane(0, 0, 0),
            store8_lane(0, 0, 0),
            store16_lane(0, 0, 0),
            store32_lane(0, 0, 0),
            store64_lane(0, 0, 0),
        ]);

        instructions
    }
}

/// Sixteen 8-bit integer lanes.
pub mod i8x16 {
    use crate::model::{Immediates, Instruction};

    /// Selects sixteen output bytes from the concatenation of two vectors;
    /// each lane index must be below 32.
    pub fn shuffle(lanes: [u8; 16]) -> Instruction {
        Instruction::new("i8x16.shuffle", Immediates::Lanes(lanes))
    }

    lane_ops! { 16:
        extract_lane_s => "i8x16.extract_lane_s";
        extract_lane_u => "i8x16.extract_lane_u";
        replace_lane => "i8x16.replace_lane";
    }

    nullary_ops! {
        swizzle => "i8x16.swizzle";
        relaxed_swizzle => "i8x16.relaxed_swizzle";
        splat => "i8x16.splat";
        eq => "i8x16.eq";
        ne => "i8x16.ne";
        lt_s => "i8x16.lt_s";
        lt_u => "i8x16.lt_u";
        gt_s => "i8x16.gt_s";
        gt_u => "i8x16.gt_u";
        le_s => "i8x16.le_s";
        le_u => "i8x16.le_u";
        ge_s => "i8x16.ge_s";
        ge_u => "i8x16.ge_u";
        abs => "i8x16.abs";
        neg => "i8x16.neg";
        popcnt => "i8x16.popcnt";
        all_true => "i8x16.all_true";
        bitmask => "i8x16.bitmask";
        narrow_i16x8_s => "i8x16.narrow_i16x8_s";
        narrow_i16x8_u => "i8x16.narrow_i16x8_u";
        shl => "i8x16.shl";
        shr_s => "i8x16.shr_s";
        shr_u => "i8x16.shr_u";
        add => "i8x16.add";
        add_sat_s => "i8x16.add_sat_s";
        add_sat_u => "i8x16.add_sat_u";
        sub => "i8x16.sub";
        sub_sat_s => "i8x16.sub_sat_s";
        sub_sat_u => "i8x16.sub_sat_u";
        min_s => "i8x16.min_s";
        min_u => "i8x16.min_u";
        max_s => "i8x16.max_s";
        max_u => "i8x16.max_u";
        avgr_u => "i8x16.avgr_u";
        relaxed_laneselect => "i8x16.relaxed_laneselect";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(lane_catalog());
        instructions.push(shuffle([0; 16]));

        instructions
    }
}

/// Eight 16-bit integer lanes.
pub mod i16x8 {
    lane_ops! { 8:
        extract_lane_s => "i16x8.extract_lane_s";
        extract_lane_u => "i16x8.extract_lane_u";
        replace_lane => "i16x8.replace_lane";
    }

    nullary_ops! {
        splat => "i16x8.splat";
        eq => "i16x8.eq";
        ne => "i16x8.ne";
        lt_s => "i16x8.lt_s";
        lt_u => "i16x8.lt_u";
        gt_s => "i16x8.gt_s";
        gt_u => "i16x8.gt_u";
        le_s => "i16x8.le_s";
        le_u => "i16x8.le_u";
        ge_s => "i16x8.ge_s";
        ge_u => "i16x8.ge_u";
        extadd_pairwise_i8x16_s => "i16x8.extadd_pairwise_i8x16_s";
        extadd_pairwise_i8x16_u => "i16x8.extadd_pairwise_i8x16_u";
        abs => "i16x8.abs";
        neg => "i16x8.neg";
        q15mulr_sat_s => "i16x8.q15mulr_sat_s";
        all_true => "i16x8.all_true";
        bitmask => "i16x8.bitmask";
        narrow_i32x4_s => "i16x8.narrow_i32x4_s";
        narrow_i32x4_u => "i16x8.narrow_i32x4_u";
        extend_low_i8x16_s => "i16x8.extend_low_i8x16_s";
        extend_high_i8x16_s => "i16x8.extend_high_i8x16_s";
        extend_low_i8x16_u => "i16x8.extend_low_i8x16_u";
        extend_high_i8x16_u => "i16x8.extend_high_i8x16_u";
        shl => "i16x8.shl";
        shr_s => "i16x8.shr_s";
        shr_u => "i16x8.shr_u";
        add => "i16x8.add";
        add_sat_s => "i16x8.add_sat_s";
        add_sat_u => "i16x8.add_sat_u";
        sub => "i16x8.sub";
        sub_sat_s => "i16x8.sub_sat_s";
        sub_sat_u => "i16x8.sub_sat_u";
        mul => "i16x8.mul";
        min_s => "i16x8.min_s";
        min_u => "i16x8.min_u";
        max_s => "i16x8.max_s";
        max_u => "i16x8.max_u";
        avgr_u => "i16x8.avgr_u";
        extmul_low_i8x16_s => "i16x8.extmul_low_i8x16_s";
        extmul_high_i8x16_s => "i16x8.extmul_high_i8x16_s";
        extmul_low_i8x16_u => "i16x8.extmul_low_i8x16_u";
        extmul_high_i8x16_u => "i16x8.extmul_high_i8x16_u";
        relaxed_laneselect => "i16x8.relaxed_laneselect";
        relaxed_q15mulr_s => "i16x8.relaxed_q15mulr_s";
        relaxed_dot_i8x16_i7x16_s => "i16x8.relaxed_dot_i8x16_i7x16_s";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(lane_catalog());

        instructions
    }
}

/// Four 32-bit integer lanes.
pub mod i32x4 {
    lane_ops! { 4:
        extract_lane => "i32x4.extract_lane";
        replace_lane => "i32x4.replace_lane";
    }

    nullary_ops! {
        splat => "i32x4.splat";
        eq => "i32x4.eq";
        ne => "i32x4.ne";
        lt_s => "i32x4.lt_s";
        lt_u => "i32x4.lt_u";
        gt_s => "i32x4.gt_s";
        gt_u => "i32x4.gt_u";
        le_s => "i32x4.le_s";
        le_u => "i32x4.le_u";
        ge_s => "i32x4.ge_s";
        ge_u => "i32x4.ge_u";
        extadd_pairwise_i16x8_s => "i32x4.extadd_pairwise_i16x8_s";
        extadd_pairwise_i16x8_u => "i32x4.extadd_pairwise_i16x8_u";
        abs => "i32x4.abs";
        neg => "i32x4.neg";
        all_true => "i32x4.all_true";
        bitmask => "i32x4.bitmask";
        extend_low_i16x8_s => "i32x4.extend_low_i16x8_s";
        extend_high_i16x8_s => "i32x4.extend_high_i16x8_s";
        extend_low_i16x8_u => "i32x4.extend_low_i16x8_u";
        extend_high_i16x8_u => "i32x4.extend_high_i16x8_u";
        shl => "i32x4.shl";
        shr_s => "i32x4.shr_s";
        shr_u => "i32x4.shr_u";
        add => "i32x4.add";
        sub => "i32x4.sub";
        mul => "i32x4.mul";
        min_s => "i32x4.min_s";
        min_u => "i32x4.min_u";
        max_s => "i32x4.max_s";
        max_u => "i32x4.max_u";
        dot_i16x8_s => "i32x4.dot_i16x8_s";
        extmul_low_i16x8_s => "i32x4.extmul_low_i16x8_s";
        extmul_high_i16x8_s => "i32x4.extmul_high_i16x8_s";
        extmul_low_i16x8_u => "i32x4.extmul_low_i16x8_u";
        extmul_high_i16x8_u => "i32x4.extmul_high_i16x8_u";
        trunc_sat_f32x4_s => "i32x4.trunc_sat_f32x4_s";
        trunc_sat_f32x4_u => "i32x4.trunc_sat_f32x4_u";
        trunc_sat_f64x2_s_zero => "i32x4.trunc_sat_f64x2_s_zero";
        trunc_sat_f64x2_u_zero => "i32x4.trunc_sat_f64x2_u_zero";
        relaxed_trunc_f32x4_s => "i32x4.relaxed_trunc_f32x4_s";
        relaxed_trunc_f32x4_u => "i32x4.relaxed_trunc_f32x4_u";
        relaxed_trunc_f64x2_s_zero => "i32x4.relaxed_trunc_f64x2_s_zero";
        relaxed_trunc_f64x2_u_zero => "i32x4.relaxed_trunc_f64x2_u_zero";
        relaxed_laneselect => "i32x4.relaxed_laneselect";
        relaxed_dot_i8x16_i7x16_add_s => "i32x4.relaxed_dot_i8x16_i7x16_add_s";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(lane_catalog());

        instructions
    }
}

/// Two 64-bit integer lanes.
pub mod i64x2 {
    lane_ops! { 2:
        extract_lane => "i64x2.extract_lane";
        replace_lane => "i64x2.replace_lane";
    }

    nullary_ops! {
        splat => "i64x2.splat";
        abs => "i64x2.abs";
        neg => "i64x2.neg";
        all_true => "i64x2.all_true";
        bitmask => "i64x2.bitmask";
        extend_low_i32x4_s => "i64x2.extend_low_i32x4_s";
        extend_high_i32x4_s => "i64x2.extend_high_i32x4_s";
        extend_low_i32x4_u => "i64x2.extend_low_i32x4_u";
        extend_high_i32x4_u => "i64x2.extend_high_i32x4_u";
        shl => "i64x2.shl";
        shr_s => "i64x2.shr_s";
        shr_u => "i64x2.shr_u";
        add => "i64x2.add";
        sub => "i64x2.sub";
        mul => "i64x2.mul";
        eq => "i64x2.eq";
        ne => "i64x2.ne";
        lt_s => "i64x2.lt_s";
        gt_s => "i64x2.gt_s";
        le_s => "i64x2.le_s";
        ge_s => "i64x2.ge_s";
        extmul_low_i32x4_s => "i64x2.extmul_low_i32x4_s";
        extmul_high_i32x4_s => "i64x2.extmul_high_i32x4_s";
        extmul_low_i32x4_u => "i64x2.extmul_low_i32x4_u";
        extmul_high_i32x4_u => "i64x2.extmul_high_i32x4_u";
        relaxed_laneselect => "i64x2.relaxed_laneselect";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(lane_catalog());

        instructions
    }
}

/// Four 32-bit float lanes.
pub mod f32x4 {
    lane_ops! { 4:
        extract_lane => "f32x4.extract_lane";
        replace_lane => "f32x4.replace_lane";
    }

    nullary_ops! {
        splat => "f32x4.splat";
        eq => "f32x4.eq";
        ne => "f32x4.ne";
        lt => "f32x4.lt";
        gt => "f32x4.gt";
        le => "f32x4.le";
        ge => "f32x4.ge";
        demote_f64x2_zero => "f32x4.demote_f64x2_zero";
        ceil => "f32x4.ceil";
        floor => "f32x4.floor";
        trunc => "f32x4.trunc";
        nearest => "f32x4.nearest";
        abs => "f32x4.abs";
        neg => "f32x4.neg";
        sqrt => "f32x4.sqrt";
        add => "f32x4.add";
        sub => "f32x4.sub";
        mul => "f32x4.mul";
        div => "f32x4.div";
        min => "f32x4.min";
        max => "f32x4.max";
        pmin => "f32x4.pmin";
        pmax => "f32x4.pmax";
        convert_i32x4_s => "f32x4.convert_i32x4_s";
        convert_i32x4_u => "f32x4.convert_i32x4_u";
        relaxed_madd => "f32x4.relaxed_madd";
        relaxed_nmadd => "f32x4.relaxed_nmadd";
        relaxed_min => "f32x4.relaxed_min";
        relaxed_max => "f32x4.relaxed_max";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(lane_catalog());

        instructions
    }
}

/// Two 64-bit float lanes.
pub mod f64x2 {
    lane_ops! { 2:
        extract_lane => "f64x2.extract_lane";
        replace_lane => "f64x2.replace_lane";
    }

    nullary_ops! {
        splat => "f64x2.splat";
        eq => "f64x2.eq";
        ne => "f64x2.ne";
        lt => "f64x2.lt";
        gt => "f64x2.gt";
        le => "f64x2.le";
        ge => "f64x2.ge";
        promote_low_f32x4 => "f64x2.promote_low_f32x4";
        ceil => "f64x2.ceil";
        floor => "f64x2.floor";
        trunc => "f64x2.trunc";
        nearest => "f64x2.nearest";
        abs => "f64x2.abs";
        neg => "f64x2.neg";
        sqrt => "f64x2.sqrt";
        add => "f64x2.add";
        sub => "f64x2.sub";
        mul => "f64x2.mul";
        div => "f64x2.div";
        min => "f64x2.min";
        max => "f64x2.max";
        pmin => "f64x2.pmin";
        pmax => "f64x2.pmax";
        convert_low_i32x4_s => "f64x2.convert_low_i32x4_s";
        convert_low_i32x4_u => "f64x2.convert_low_i32x4_u";
        relaxed_madd => "f64x2.relaxed_madd";
        relaxed_nmadd => "f64x2.relaxed_nmadd";
        relaxed_min => "f64x2.relaxed_min";
        relaxed_max => "f64x2.relaxed_max";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(lane_catalog());

        instructions
    }
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
    let mut instructions = v128::catalog();

    instructions.extend(i8x16::catalog());
    instructions.extend(i16x8::catalog());
    instructions.extend(i32x4::catalog());
    instructions.extend(i64x2::catalog());
    instructions.extend(f32x4::catalog());
    instructions.extend(f64x2::catalog());

    instructions
}
