pub type TextBufferResult<T> = Result<T, TextBufferError>;

#[derive(Debug, thiserror::Error)]
pub enum TextBufferError {
    #[error("i/o error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("integer conversion failed: {0}")]
    ConversionError(std::num::TryFromIntError),
    #[error("position {pos} out of bounds (len={len})")]
    IndexOutOfBounds { pos: u64, len: u64 },
    #[error("invalid range {from}..{to}")]
    InvalidRange { from: u64, to: u64 },
    #[error("arithmetic overflow")]
    Overflow,
}

impl From<crate::enums::MathError> for TextBufferError {
    fn from(value: crate::enums::MathError) -> Self {
        match value {
            crate::enums::MathError::ConversionFailed(val) => TextBufferError::ConversionError(val),
            crate::enums::MathError::OutOfBounds { pos, len } => {
                TextBufferError::IndexOutOfBounds { pos, len }
            }
            crate::enums::MathError::Overflow => TextBufferError::Overflow,
        }
    }
}
