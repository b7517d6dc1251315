//! Model for values in the WebAssembly syntax.

use std::borrow::Borrow;
use std::fmt;

/// Names are sequences of characters, which are scalar values as defined by Unicode (Section 2.4).
/// Due to the limitations of the binary format,
/// the length of a name is bounded by the length of its UTF-8 encoding.
///
/// Within this model a name is also the sole external identifier of a
/// module-scoped entity or block label; the encoder resolves names to
/// indices, so two entities of the same kind must not share one.
///
/// See <https://webassembly.github.io/spec/core/syntax/values.html#names>
///
/// # Examples
/// ```rust
/// use wasm_composer::Name;
///
/// let text = "test";
/// let name = Name::new(String::from(text));
///
/// assert_eq!(name, Name::from(text));
/// assert_eq!(name.as_bytes(), text.as_bytes());
/// assert_eq!(name.len(), text.len());
/// assert_eq!(name.is_empty(), false);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Name {
    value: String,
}

impl Name {
    /// Creates a new name with the given Unicode text.
    pub fn new(value: String) -> Self {
        Name { value }
    }

    /// Returns a byte slice of this `Name`’s contents.
    pub fn as_bytes(&self) -> &[u8] {
        self.value.as_bytes()
    }

    /// Returns the length of this `Name`, in bytes, not chars or graphemes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if this `Name` has a length of zero, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Borrow<str> for Name {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl From<&str> for Name {
    fn from(name: &str) -> Self {
        Name {
            value: name.to_string(),
        }
    }
}

impl From<String> for Name {
    fn from(name: String) -> Self {
        Name { value: name }
    }
}
