use crate::leb128::LEB128Error;
use crate::model::Name;
use thiserror::Error;

/// An error in emitting a WebAssembly module in the binary format.
///
/// Errors are raised at the site of the offending construct and abort the
/// encode; partially written output is discarded by the caller.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("An IO error occurred.")]
    IO(#[from] std::io::Error),
    #[error("The name '{0}' does not match any {1} in the module.")]
    UnresolvedName(Name, &'static str),
    #[error("A numeric value violates its precondition: {0}")]
    InvalidValue(String),
    #[error("A module element is malformed: {0}")]
    MalformedInput(String),
}

impl From<LEB128Error> for EmitError {
    fn from(error: LEB128Error) -> Self {
        match error {
            LEB128Error::IO(error) => EmitError::IO(error),
            other => EmitError::InvalidValue(other.to_string()),
        }
    }
}
