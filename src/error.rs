use std::fmt::{self, Debug, Display};

/// Provides `MultikeyError` and maps other error conditions to
/// convert to a `MultikeyError`
#[derive(Debug, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub enum MultikeyError {
    /// A strict lookup (`at`) probed a key with no matching record. The string is the
    /// `Debug` rendering of the key value.
    KeyNotFound(String),
    /// A checked positional access was out of range.
    IndexOutOfRange { index: usize, len: usize },
    /// A fixed-capacity table was constructed from a record list of the wrong length.
    CapacityMismatch { expected: usize, actual: usize },
    MultikeyError(String),
}

impl From<String> for MultikeyError {
    fn from(error: String) -> Self {
        MultikeyError::MultikeyError(error)
    }
}

impl From<&str> for MultikeyError {
    fn from(error: &str) -> Self {
        MultikeyError::MultikeyError(error.to_string())
    }
}

impl std::error::Error for MultikeyError {}

impl Display for MultikeyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Error: {self:?}")?;
        Ok(())
    }
}
