//! Error types for buffer and selection operations

use thiserror::Error;

/// Range violations raised by the public buffer and selection APIs.
///
/// These signal caller bugs: a well-behaved host never passes offsets outside
/// the buffer, so there is nothing to recover from beyond reporting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    /// A single offset fell outside `0..=length`
    #[error("offset {index} is out of range for buffer of length {length}")]
    OutOfRange { index: usize, length: usize },

    /// A `(start, length)` pair extends past the end of the buffer
    #[error("range {start}+{length} exceeds buffer of length {buffer_length}")]
    InvalidRange {
        start: usize,
        length: usize,
        buffer_length: usize,
    },
}

pub type EditResult<T> = Result<T, EditError>;
