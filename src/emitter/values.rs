use crate::emitter::errors::EmitError;
use crate::leb128;
use crate::model::Name;
use std::borrow::Borrow;
use std::io::Write;
use std::mem::size_of;

/// Emits a 32-bit float to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#floating-point>
pub fn emit_f32<T: Borrow<f32>, O: Write + ?Sized>(
    value: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    output.write_all(&value.borrow().to_le_bytes())?;

    Ok(size_of::<f32>())
}

/// Emits a 64-bit float to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#floating-point>
pub fn emit_f64<T: Borrow<f64>, O: Write + ?Sized>(
    value: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    output.write_all(&value.borrow().to_le_bytes())?;

    Ok(size_of::<f64>())
}

/// Emits a name to the output as a length-prefixed UTF-8 byte sequence.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#names>
pub fn emit_name<O: Write + ?Sized>(value: &Name, output: &mut O) -> Result<usize, EmitError> {
    emit_bytes(value.as_bytes(), output, true)
}

/// Emits a single byte to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#bytes>
pub fn emit_byte<T: Borrow<u8>, O: Write + ?Sized>(
    byte: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    output.write_all(&[*byte.borrow()])?;

    Ok(size_of::<u8>())
}

/// Emits a slice of bytes to the output.
/// The bytes may optionally be treated as a vector (i.e. length-prefixed).
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#bytes>
pub fn emit_bytes<O: Write + ?Sized>(
    value: &[u8],
    output: &mut O,
    include_length: bool,
) -> Result<usize, EmitError> {
    let prefix = if include_length {
        emit_usize(value.len(), output)?
    } else {
        0
    };

    output.write_all(value)?;

    Ok(prefix + value.len())
}

/// Emits an unsigned 32-bit integer to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#integers>
pub fn emit_u32<T: Borrow<u32>, O: Write + ?Sized>(
    value: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    Ok(leb128::encode_uint(*value.borrow(), output)?)
}

/// Emits an unsigned platform-specific (i.e., 32-bit or 64-bit) integer to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#integers>
pub fn emit_usize<T: Borrow<usize>, O: Write + ?Sized>(
    size: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    Ok(leb128::encode_uint(*size.borrow() as u64, output)?)
}

/// Emits a signed 32-bit integer to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#integers>
pub fn emit_i32<T: Borrow<i32>, O: Write + ?Sized>(
    value: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    Ok(leb128::encode_int(*value.borrow(), output)?)
}

/// Emits a signed 64-bit integer to the output.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#integers>
pub fn emit_i64<T: Borrow<i64>, O: Write + ?Sized>(
    value: T,
    output: &mut O,
) -> Result<usize, EmitError> {
    Ok(leb128::encode_int(*value.borrow(), output)?)
}

/// Emit each item to the output using the given emit function.
/// Prefixes the items with the length of the slice.
///
/// See <https://webassembly.github.io/spec/core/binary/conventions.html#vectors>
pub fn emit_vector<'items, I, E, O>(
    items: &'items [I],
    output: &mut O,
    emit: E,
) -> Result<usize, EmitError>
where
    O: Write + ?Sized,
    E: Fn(&'items I, &mut O) -> Result<usize, EmitError>,
{
    let mut bytes = 0;

    bytes += emit_usize(items.len(), output)?;
    bytes += emit_repeated(items, output, emit)?;

    Ok(bytes)
}

/// Emit each item to the output using the given emit function.
pub fn emit_repeated<'items, I, E, O>(
    items: &'items [I],
    output: &mut O,
    emit: E,
) -> Result<usize, EmitError>
where
    O: Write + ?Sized,
    E: Fn(&'items I, &mut O) -> Result<usize, EmitError>,
{
    let mut bytes = 0;

    for item in items {
        bytes += emit(item, output)?;
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_are_length_prefixed() {
        let bytes: [u8; 4] = [1, 2, 3, 4];
        let mut buffer: Vec<u8> = Vec::new();

        let emitted = emit_vector(&bytes, &mut buffer, emit_byte).unwrap();

        assert_eq!(emitted, 1 + bytes.len());
        assert_eq!(buffer[0] as usize, bytes.len());
        assert_eq!(&bytes[..], &buffer[1..]);
    }

    #[test]
    fn floats_are_little_endian() {
        let mut buffer: Vec<u8> = Vec::new();

        emit_f32(1.0f32, &mut buffer).unwrap();
        emit_f64(1.0f64, &mut buffer).unwrap();

        assert_eq!(&buffer[..4], &[0x00, 0x00, 0x80, 0x3F]);
        assert_eq!(
            &buffer[4..],
            &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF0, 0x3F]
        );
    }

    #[test]
    fn names_carry_their_byte_length() {
        let mut buffer: Vec<u8> = Vec::new();

        emit_name(&Name::from("add"), &mut buffer).unwrap();

        assert_eq!(buffer, vec![0x03, b'a', b'd', b'd']);
    }
}
