use thiserror::Error;

/// An error in encoding or decoding an LEB128 integer.
#[derive(Error, Debug)]
pub enum LEB128Error {
    #[error("An IO error occurred.")]
    IO(#[from] std::io::Error),
    #[error("The value {0} is negative and cannot be encoded as an unsigned integer.")]
    Negative(i128),
    #[error("The encoding is {0} bytes long, but the target type fits at most {1}.")]
    Overflow(usize, usize),
    #[error("The input ended before the final LEB128 group.")]
    Invalid,
    #[error("The decoded value does not fit in the target type.")]
    OutOfRange(#[from] std::num::TryFromIntError),
}

impl From<std::convert::Infallible> for LEB128Error {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}
