#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub buf_kind: crate::enums::BufferKind,
    /// Byte range into the backing buffer. Always on char boundaries.
    pub range: std::ops::Range<usize>,
    /// Number of chars covered by `range`.
    pub chars: u64,
}

impl Piece {
    /// Length in chars.
    #[inline]
    pub fn len(&self) -> u64 {
        self.chars
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }
}
