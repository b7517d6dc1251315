//! Little-Endian Base 128 encoding and decoding of signed and unsigned integers.

mod errors;

pub use errors::LEB128Error;

use std::convert::TryFrom;
use std::io::Write;
use std::mem::size_of;

/// The radix (i.e. base) for LEB128 encoding.
const RADIX: u8 = 128;

/// The number of bits per LEB128 encoding group.
const GROUP_BITS: usize = 7;

/// The zero-indexed index of the sign bit per LEB128 encoding group.
const SIGN_BIT: usize = 6;

/// Maximum size (in bytes) of an LEB128-encoded integer type
///
/// See <https://en.wikipedia.org/wiki/LEB128>
const fn max_leb128_size<T>() -> usize {
    let bits = size_of::<T>() * 8;

    (bits / 7) + (bits % 7 != 0) as usize
}

trait Bits: Copy + Sized {
    /// Sets the given bit to zero.
    fn zero_bit_at(&self, bit: usize) -> Self;

    /// Sets the given bit to one.
    fn one_bit_at(&self, bit: usize) -> Self;

    /// Gets the bit at the index.
    fn bit_at(&self, bit: usize) -> bool;
}

impl Bits for u8 {
    fn zero_bit_at(&self, bit: usize) -> u8 {
        self & !(1 << bit)
    }

    fn one_bit_at(&self, bit: usize) -> u8 {
        self | 1 << bit
    }

    fn bit_at(&self, bit: usize) -> bool {
        let mask = 1 << bit;
        self & mask == mask
    }
}

/// Encodes a non-negative integer using unsigned LEB128 encoding.
/// Negative input is rejected rather than reinterpreted.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#integers>
pub fn encode_uint<I, O>(input: I, output: &mut O) -> Result<usize, LEB128Error>
where
    I: Into<i128>,
    O: Write + ?Sized,
{
    let value = input.into();

    if value < 0 {
        return Err(LEB128Error::Negative(value));
    }

    match u32::try_from(value) {
        Ok(narrow) => encode_uint_narrow(narrow, output),
        Err(_) => encode_uint_wide(value as u128, output),
    }
}

/// Fast path for unsigned values that fit a machine word: at most 5 groups.
fn encode_uint_narrow<O: Write + ?Sized>(
    mut value: u32,
    output: &mut O,
) -> Result<usize, LEB128Error> {
    let mut written = 0;

    loop {
        let mut group = (value as u8).zero_bit_at(GROUP_BITS);
        value >>= GROUP_BITS;

        if value != 0 {
            group = group.one_bit_at(GROUP_BITS);
        }

        output.write_all(&[group])?;
        written += 1;

        if value == 0 {
            return Ok(written);
        }
    }
}

fn encode_uint_wide<O: Write + ?Sized>(
    mut value: u128,
    output: &mut O,
) -> Result<usize, LEB128Error> {
    let mut written = 0;

    loop {
        let mut group = (value as u8).zero_bit_at(GROUP_BITS);
        value >>= GROUP_BITS;

        if value != 0 {
            group = group.one_bit_at(GROUP_BITS);
        }

        output.write_all(&[group])?;
        written += 1;

        if value == 0 {
            return Ok(written);
        }
    }
}

/// Encodes a signed integer using signed (two's complement) LEB128 encoding.
/// The final group's sign bit always matches the sign of the full value.
///
/// See <https://webassembly.github.io/spec/core/binary/values.html#integers>
pub fn encode_int<I, O>(input: I, output: &mut O) -> Result<usize, LEB128Error>
where
    I: Into<i128>,
    O: Write + ?Sized,
{
    let value = input.into();

    match i32::try_from(value) {
        Ok(narrow) => encode_int_narrow(narrow, output),
        Err(_) => encode_int_wide(value, output),
    }
}

/// Fast path for signed values that fit a machine word: at most 5 groups.
fn encode_int_narrow<O: Write + ?Sized>(
    mut value: i32,
    output: &mut O,
) -> Result<usize, LEB128Error> {
    let mut written = 0;

    loop {
        let group = (value as u8).zero_bit_at(GROUP_BITS);
        value >>= GROUP_BITS;

        let terminal = (value == 0 && !group.bit_at(SIGN_BIT))
            || (value == -1 && group.bit_at(SIGN_BIT));

        if terminal {
            output.write_all(&[group])?;
            return Ok(written + 1);
        }

        output.write_all(&[group.one_bit_at(GROUP_BITS)])?;
        written += 1;
    }
}

fn encode_int_wide<O: Write + ?Sized>(
    mut value: i128,
    output: &mut O,
) -> Result<usize, LEB128Error> {
    let mut written = 0;

    loop {
        let group = (value as u8).zero_bit_at(GROUP_BITS);
        value >>= GROUP_BITS;

        let terminal = (value == 0 && !group.bit_at(SIGN_BIT))
            || (value == -1 && group.bit_at(SIGN_BIT));

        if terminal {
            output.write_all(&[group])?;
            return Ok(written + 1);
        }

        output.write_all(&[group.one_bit_at(GROUP_BITS)])?;
        written += 1;
    }
}

/// Parses an unsigned integer using LEB128 encoding.
/// Returns the remaining input and the parsed integer.
///
/// See <https://en.wikipedia.org/wiki/LEB128>
pub fn parse_unsigned<T>(input: &[u8]) -> Result<(&[u8], T), LEB128Error>
where
    T: TryFrom<u128, Error = std::num::TryFromIntError>,
{
    let end = input.iter().position(|x| x & RADIX == 0);
    let max_size = max_leb128_size::<T>();
    let length = match end {
        Some(index) if index > max_size => Err(LEB128Error::Overflow(index, max_size)),
        Some(index) => Ok(index + 1),
        None => Err(LEB128Error::Invalid),
    }?;

    let mut result = 0;
    for (index, &byte) in input[..length].iter().enumerate() {
        let group = byte.zero_bit_at(GROUP_BITS) as u128;

        result |= group << (index * GROUP_BITS);
    }

    Ok((&input[length..], T::try_from(result)?))
}

/// Parses a signed integer using LEB128 encoding.
/// Returns the remaining input and the parsed integer.
///
/// See <https://en.wikipedia.org/wiki/LEB128>
pub fn parse_signed<T>(input: &[u8]) -> Result<(&[u8], T), LEB128Error>
where
    T: TryFrom<i128>,
    LEB128Error: From<<T as TryFrom<i128>>::Error>,
{
    let end = input.iter().position(|x| x & RADIX == 0);
    let max_size = max_leb128_size::<T>();
    let length = match end {
        Some(index) if index > max_size => Err(LEB128Error::Overflow(index, max_size)),
        Some(index) => Ok(index + 1),
        None => Err(LEB128Error::Invalid),
    }?;

    let mut result = 0;
    let remaining = &input[length..];
    let input = &input[..length];
    for (index, &byte) in input.iter().enumerate() {
        let group = byte.zero_bit_at(GROUP_BITS) as i128;

        result |= group << (index * GROUP_BITS);
    }

    if let Some(byte) = input.iter().last() {
        if byte.bit_at(SIGN_BIT) && length * GROUP_BITS < 128 {
            result |= !0 << (length * GROUP_BITS);
        }
    }

    Ok((remaining, T::try_from(result)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    fn unsigned_bytes<I: Into<i128>>(value: I) -> Vec<u8> {
        let mut output = Vec::new();
        encode_uint(value, &mut output).unwrap();
        output
    }

    fn signed_bytes<I: Into<i128>>(value: I) -> Vec<u8> {
        let mut output = Vec::new();
        encode_int(value, &mut output).unwrap();
        output
    }

    #[test]
    fn encode_unsigned_large() {
        assert_eq!(unsigned_bytes(624485u32), vec![0xE5, 0x8E, 0x26]);
    }

    #[test]
    fn encode_unsigned_small() {
        assert_eq!(unsigned_bytes(64u8), vec![64]);
    }

    #[test]
    fn encode_unsigned_zero() {
        assert_eq!(unsigned_bytes(0u8), vec![0]);
    }

    #[test]
    fn encode_unsigned_negative() {
        let mut output = Vec::new();
        let result = encode_uint(-1, &mut output);

        assert!(matches!(result, Err(LEB128Error::Negative(-1))));
        assert!(output.is_empty());
    }

    #[test]
    fn encode_unsigned_wide() {
        let encoding = unsigned_bytes(u64::MAX);

        assert_eq!(encoding.len(), 10);
        assert_eq!(*encoding.last().unwrap(), 0x01);
    }

    #[test]
    fn encode_signed_negative_one() {
        assert_eq!(signed_bytes(-1), vec![0x7F]);
    }

    #[test]
    fn encode_signed_large_negative() {
        assert_eq!(signed_bytes(-123456), vec![0xC0, 0xBB, 0x78]);
    }

    #[test]
    fn encode_signed_sign_bit_boundary() {
        // 63 fits 7 bits unsigned but its group sign bit is set, forcing a
        // second group; 64 likewise.
        assert_eq!(signed_bytes(63), vec![0x3F]);
        assert_eq!(signed_bytes(64), vec![0xC0, 0x00]);
        assert_eq!(signed_bytes(-64), vec![0x40]);
        assert_eq!(signed_bytes(-65), vec![0xBF, 0x7F]);
    }

    #[test]
    fn encode_signed_two_to_the_forty() {
        assert_eq!(signed_bytes(1i64 << 40).len(), 6);
    }

    #[test]
    fn encode_signed_wide_magnitude() {
        let encoding = signed_bytes(i64::MIN as i128 * 2);

        let (remaining, decoded): (&[u8], i128) = parse_signed(&encoding).unwrap();
        assert!(remaining.is_empty());
        assert_eq!(decoded, i64::MIN as i128 * 2);
    }

    #[test]
    fn parse_unsigned_large() {
        let input = vec![0xE5, 0x8E, 0x26];
        let (remaining, actual): (&[u8], u32) = parse_unsigned(input.as_slice()).unwrap();

        assert_eq!(actual, 624485);
        assert!(remaining.is_empty())
    }

    #[test]
    fn parse_unsigned_trailing() {
        let input = vec![64, 0xFF];
        let (remaining, actual): (&[u8], u8) = parse_unsigned(input.as_slice()).unwrap();

        assert_eq!(actual, 64);
        assert_eq!(remaining, &[0xFF])
    }

    #[test]
    fn parse_unsigned_unterminated() {
        let input = vec![0xFF, 0xFF];
        let result: Result<(&[u8], u32), _> = parse_unsigned(input.as_slice());

        assert!(matches!(result, Err(LEB128Error::Invalid)));
    }

    #[test]
    fn parse_signed_negative() {
        let input = vec![0xC0, 0xBB, 0x78];
        let (remaining, actual): (&[u8], i32) = parse_signed(input.as_slice()).unwrap();

        assert_eq!(actual, -123456);
        assert!(remaining.is_empty())
    }

    #[quickcheck]
    fn unsigned_round_trip(value: u64) -> bool {
        let encoding = unsigned_bytes(value);
        let (remaining, decoded): (&[u8], u64) = parse_unsigned(&encoding).unwrap();

        remaining.is_empty() && decoded == value
    }

    #[quickcheck]
    fn signed_round_trip(value: i64) -> bool {
        let encoding = signed_bytes(value);
        let (remaining, decoded): (&[u8], i64) = parse_signed(&encoding).unwrap();

        remaining.is_empty() && decoded == value
    }

    #[quickcheck]
    fn unsigned_encoding_is_shortest(value: u64) -> bool {
        let significant = 128 - (value as u128).leading_zeros() as usize;
        let expected = std::cmp::max(1, (significant + GROUP_BITS - 1) / GROUP_BITS);

        unsigned_bytes(value).len() == expected
    }

    #[quickcheck]
    fn signed_encoding_is_shortest(value: i64) -> bool {
        let encoding = signed_bytes(value);
        let groups = encoding.len();

        // The value must need every group: it fits 7 * groups bits as a
        // two's complement integer but not one group fewer.
        let fits = |bits: usize| {
            if bits >= 127 {
                true
            } else {
                let min = -(1i128 << (bits - 1));
                let max = (1i128 << (bits - 1)) - 1;
                min <= value as i128 && value as i128 <= max
            }
        };

        fits(groups * GROUP_BITS) && (groups == 1 || !fits((groups - 1) * GROUP_BITS))
    }

    #[quickcheck]
    fn unsigned_and_signed_agree_on_small_values(value: u8) -> bool {
        let value = value % 64;
        let unsigned = unsigned_bytes(value);
        let signed = signed_bytes(value);

        unsigned.len() == 1 && signed.len() == 1 && unsigned[0] & 0x7F == signed[0] & 0x7F
    }
}
