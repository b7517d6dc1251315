//! Numeric instructions, grouped by operand type.

/// 32-bit integer instructions.
pub mod i32 {
    use crate::model::{Immediates, Instruction};

    /// Pushes a constant. Oversized input is truncated to 32 bits with
    /// two's-complement semantics.
    ///
    /// # Examples
    /// ```rust
    /// use wasm_composer::ops;
    ///
    /// let zero = ops::i32::constant(0);
    /// let wrapped = ops::i32::constant(u64::MAX);
    ///
    /// assert_eq!(zero.mnemonic(), "i32.const");
    /// assert_eq!(wrapped.mnemonic(), "i32.const");
    /// ```
    pub fn constant<V: Into<i128>>(value: V) -> Instruction {
        Instruction::new("i32.const", Immediates::I32(value.into()))
    }

    memarg_ops! {
        load => "i32.load";
        load8_s => "i32.load8_s";
        load8_u => "i32.load8_u";
        load16_s => "i32.load16_s";
        load16_u => "i32.load16_u";
        store => "i32.store";
        store8 => "i32.store8";
        store16 => "i32.store16";
    }

    nullary_ops! {
        eqz => "i32.eqz";
        eq => "i32.eq";
        ne => "i32.ne";
        lt_s => "i32.lt_s";
        lt_u => "i32.lt_u";
        gt_s => "i32.gt_s";
        gt_u => "i32.gt_u";
        le_s => "i32.le_s";
        le_u => "i32.le_u";
        ge_s => "i32.ge_s";
        ge_u => "i32.ge_u";
        clz => "i32.clz";
        ctz => "i32.ctz";
        popcnt => "i32.popcnt";
        add => "i32.add";
        sub => "i32.sub";
        mul => "i32.mul";
        div_s => "i32.div_s";
        div_u => "i32.div_u";
        rem_s => "i32.rem_s";
        rem_u => "i32.rem_u";
        and => "i32.and";
        or => "i32.or";
        xor => "i32.xor";
        shl => "i32.shl";
        shr_s => "i32.shr_s";
        shr_u => "i32.shr_u";
        rotl => "i32.rotl";
        rotr => "i32.rotr";
        wrap_i64 => "i32.wrap_i64";
        trunc_f32_s => "i32.trunc_f32_s";
        trunc_f32_u => "i32.trunc_f32_u";
        trunc_f64_s => "i32.trunc_f64_s";
        trunc_f64_u => "i32.trunc_f64_u";
        trunc_sat_f32_s => "i32.trunc_sat_f32_s";
        trunc_sat_f32_u => "i32.trunc_sat_f32_u";
        trunc_sat_f64_s => "i32.trunc_sat_f64_s";
        trunc_sat_f64_u => "i32.trunc_sat_f64_u";
        reinterpret_f32 => "i32.reinterpret_f32";
        extend8_s => "i32.extend8_s";
        extend16_s => "i32.extend16_s";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(memarg_catalog());
        instructions.push(constant(0));

        instructions
    }
}

/// 64-bit integer instructions.
pub mod i64 {
    use crate::model::{Immediates, Instruction};

    /// Pushes a constant. Oversized input is truncated to 64 bits with
    /// two's-complement semantics.
    pub fn constant<V: Into<i128>>(value: V) -> Instruction {
        Instruction::new("i64.const", Immediates::I64(value.into()))
    }

    memarg_ops! {
        load => "i64.load";
        load8_s => "i64.load8_s";
        load8_u => "i64.load8_u";
        load16_s => "i64.load16_s";
        load16_u => "i64.load16_u";
        load32_s => "i64.load32_s";
        load32_u => "i64.load32_u";
        store => "i64.store";
        store8 => "i64.store8";
        store16 => "i64.store16";
        store32 => "i64.store32";
    }

    nullary_ops! {
        eqz => "i64.eqz";
        eq => "i64.eq";
        ne => "i64.ne";
        lt_s => "i64.lt_s";
        lt_u => "i64.lt_u";
        gt_s => "i64.gt_s";
        gt_u => "i64.gt_u";
        le_s => "i64.le_s";
        le_u => "i64.le_u";
        ge_s => "i64.ge_s";
        ge_u => "i64.ge_u";
        clz => "i64.clz";
        ctz => "i64.ctz";
        popcnt => "i64.popcnt";
        add => "i64.add";
        sub => "i64.sub";
        mul => "i64.mul";
        div_s => "i64.div_s";
        div_u => "i64.div_u";
        rem_s => "i64.rem_s";
        rem_u => "i64.rem_u";
        and => "i64.and";
        or => "i64.or";
        xor => "i64.xor";
        shl => "i64.shl";
        shr_s => "i64.shr_s";
        shr_u => "i64.shr_u";
        rotl => "i64.rotl";
        rotr => "i64.rotr";
        extend_i32_s => "i64.extend_i32_s";
        extend_i32_u => "i64.extend_i32_u";
        trunc_f32_s => "i64.trunc_f32_s";
        trunc_f32_u => "i64.trunc_f32_u";
        trunc_f64_s => "i64.trunc_f64_s";
        trunc_f64_u => "i64.trunc_f64_u";
        trunc_sat_f32_s => "i64.trunc_sat_f32_s";
        trunc_sat_f32_u => "i64.trunc_sat_f32_u";
        trunc_sat_f64_s => "i64.trunc_sat_f64_s";
        trunc_sat_f64_u => "i64.trunc_sat_f64_u";
        reinterpret_f64 => "i64.reinterpret_f64";
        extend8_s => "i64.extend8_s";
        extend16_s => "i64.extend16_s";
        extend32_s => "i64.extend32_s";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(memarg_catalog());
        instructions.push(constant(0));

        instructions
    }
}

/// 32-bit float instructions.
pub mod f32 {
    use crate::model::{Immediates, Instruction};

    /// Pushes a constant, encoded as little-endian IEEE-754.
    pub fn constant(value: f32) -> Instruction {
        Instruction::new("f32.const", Immediates::F32(value))
    }

    memarg_ops! {
        load => "f32.load";
        store => "f32.store";
    }

    nullary_ops! {
        eq => "f32.eq";
        ne => "f32.ne";
        lt => "f32.lt";
        gt => "f32.gt";
        le => "f32.le";
        ge => "f32.ge";
        abs => "f32.abs";
        neg => "f32.neg";
        ceil => "f32.ceil";
        floor => "f32.floor";
        trunc => "f32.trunc";
        nearest => "f32.nearest";
        sqrt => "f32.sqrt";
        add => "f32.add";
        sub => "f32.sub";
        mul => "f32.mul";
        div => "f32.div";
        min => "f32.min";
        max => "f32.max";
        copysign => "f32.copysign";
        convert_i32_s => "f32.convert_i32_s";
        convert_i32_u => "f32.convert_i32_u";
        convert_i64_s => "f32.convert_i64_s";
        convert_i64_u => "f32.convert_i64_u";
        demote_f64 => "f32.demote_f64";
        reinterpret_i32 => "f32.reinterpret_i32";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(memarg_catalog());
        instructions.push(constant(0.0));

        instructions
    }
}

/// 64-bit float instructions.
pub mod f64 {
    use crate::model::{Immediates, Instruction};

    /// Pushes a constant, encoded as little-endian IEEE-754.
    pub fn constant(value: f64) -> Instruction {
        Instruction::new("f64.const", Immediates::F64(value))
    }

    memarg_ops! {
        load => "f64.load";
        store => "f64.store";
    }

    nullary_ops! {
        eq => "f64.eq";
        ne => "f64.ne";
        lt => "f64.lt";
        gt => "f64.gt";
        le => "f64.le";
        ge => "f64.ge";
        abs => "f64.abs";
        neg => "f64.neg";
        ceil => "f64.ceil";
        floor => "f64.floor";
        trunc => "f64.trunc";
        nearest => "f64.nearest";
        sqrt => "f64.sqrt";
        add => "f64.add";
        sub => "f64.sub";
        mul => "f64.mul";
        div => "f64.div";
        min => "f64.min";
        max => "f64.max";
        copysign => "f64.copysign";
        convert_i32_s => "f64.convert_i32_s";
        convert_i32_u => "f64.convert_i32_u";
        convert_i64_s => "f64.convert_i64_s";
        convert_i64_u => "f64.convert_i64_u";
        promote_f32 => "f64.promote_f32";
        reinterpret_i64 => "f64.reinterpret_i64";
    }

    #[cfg(test)]
    pub(crate) fn catalog() -> Vec<Instruction> {
        let mut instructions = nullary_catalog();

        instructions.extend(memarg_catalog());
        instructions.push(constant(0.0));

        instructions
    }
}

#[cfg(test)]
pub(crate) fn catalog() -> Vec<crate::model::Instruction> {
    let mut instructions = i32::catalog();

    instructions.extend(i64::catalog());
    instructions.extend(f32::catalog());
    instructions.extend(f64::catalog());

    instructions
}
