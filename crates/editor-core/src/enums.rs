#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Original,
    Add,
}

/// Which side of an insertion a position sticks to when the insertion
/// happens exactly at that position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bias {
    /// Stay before the inserted content.
    Left,
    /// Move after the inserted content. Range ends use this so that text
    /// appended at the boundary is included in the range.
    #[default]
    Right,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum MathError {
    /// Wraps the specific error TryInto generates
    #[error("integer conversion failed: {0}")]
    ConversionFailed(#[from] std::num::TryFromIntError),
    /// Represents the `None` case from checked math
    #[error("arithmetic overflow")]
    Overflow,
    #[error("position {pos} out of bounds (len={len})")]
    OutOfBounds { pos: u64, len: u64 },
}
