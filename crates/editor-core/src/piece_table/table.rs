use std::ops::{AddAssign, SubAssign};

/// Backing storage for the text a document was created with.
#[derive(Debug)]
pub enum Original {
    /// A UTF-8 file mapped read-only into memory.
    Mapped(io::mmap::MmapFile),
    Owned(Box<str>),
}

impl Original {
    #[inline]
    pub fn as_str(&self) -> &str {
        match self {
            Original::Mapped(mmap) => mmap.as_str(),
            Original::Owned(text) => &text[..],
        }
    }
}

#[derive(Debug)]
pub struct PieceTable {
    /// Original unchanged text (shared, zero-copy when mapped).
    pub original: Original,
    /// Append-only buffer storing inserted text.
    pub buf: String,
    /// Ordered list of pieces describing the visible document.
    pub pieces: Vec<crate::piece_table::piece::Piece>,
    /// Cached document length in chars.
    len: u64,
}

/// Byte offset of the `chars`-th char of `text`, or `text.len()` past the end.
fn byte_offset(text: &str, chars: u64) -> Result<usize, crate::enums::MathError> {
    let chars = <u64 as TryInto<usize>>::try_into(chars)?;

    Ok(text
        .char_indices()
        .nth(chars)
        .map_or(text.len(), |(idx, _)| idx))
}

fn char_count(text: &str) -> Result<u64, crate::enums::MathError> {
    Ok(<usize as TryInto<u64>>::try_into(text.chars().count())?)
}

/*

====================================
========= CREATION METHOD ==========
====================================

*/

impl PieceTable {
    pub fn new(original: Original) -> Result<Self, crate::enums::MathError> {
        let text = original.as_str();
        let chars = char_count(text)?;
        let mut pieces = Vec::new();

        if !text.is_empty() {
            pieces.push(crate::piece_table::piece::Piece {
                buf_kind: crate::enums::BufferKind::Original,
                range: 0..text.len(),
                chars,
            });
        }

        Ok(Self {
            original,
            buf: String::with_capacity(crate::piece_table::BASELINE_CAPACITY),
            pieces,
            len: chars,
        })
    }

    pub fn from_text(text: &str) -> Result<Self, crate::enums::MathError> {
        Self::new(Original::Owned(text.into()))
    }
}

/*

====================================
========= INLINE METHODS  ==========
====================================

*/

impl PieceTable {
    /// Total document length in chars
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Finds the piece containing `pos` and the char offset inside it. A
    /// position on a piece boundary resolves to the end of the earlier piece.
    #[inline]
    pub fn locate(&self, mut pos: u64) -> (usize, u64) {
        for (idx, piece) in self.pieces.iter().enumerate() {
            let piece_len = piece.len();

            if pos <= piece_len {
                return (idx, pos);
            }

            pos.sub_assign(piece_len);
        }

        (self.pieces.len(), 0)
    }

    #[inline]
    fn piece_str(&self, piece: &crate::piece_table::piece::Piece) -> &str {
        match piece.buf_kind {
            crate::enums::BufferKind::Original => &self.original.as_str()[piece.range.clone()],
            crate::enums::BufferKind::Add => &self.buf[piece.range.clone()],
        }
    }

    fn check_bounds(&self, pos: u64) -> Result<(), crate::enums::MathError> {
        if pos > self.len {
            return Err(crate::enums::MathError::OutOfBounds { pos, len: self.len });
        }

        Ok(())
    }
}

/*

=====================================
========= INSERT / DELETE  ==========
=====================================

*/

impl PieceTable {
    /// Extends the piece just before the insertion point instead of creating
    /// a new one when the new text directly follows it in the same buffer.
    /// Returns `false` if the insert was absorbed.
    fn merge_or_continue(
        &mut self,
        idx: usize,
        offset: u64,
        new_piece: &crate::piece_table::piece::Piece,
    ) -> bool {
        let pieces_len = self.pieces.len();
        let prev_idx = if idx == pieces_len || offset == 0 {
            idx.checked_sub(1)
        } else if offset == self.pieces[idx].len() {
            Some(idx)
        } else {
            None
        };

        if let Some(prev) = prev_idx.and_then(|i| self.pieces.get_mut(i))
            && prev.buf_kind == new_piece.buf_kind
            && prev.range.end == new_piece.range.start
        {
            prev.range.end = new_piece.range.end;
            prev.chars.add_assign(new_piece.chars);

            return false;
        }

        true
    }

    fn split_piece(
        &self,
        piece: &crate::piece_table::piece::Piece,
        at: u64,
    ) -> Result<
        (
            crate::piece_table::piece::Piece,
            crate::piece_table::piece::Piece,
        ),
        crate::enums::MathError,
    > {
        let mid = piece.range.start + byte_offset(self.piece_str(piece), at)?;

        Ok((
            crate::piece_table::piece::Piece {
                buf_kind: piece.buf_kind,
                range: piece.range.start..mid,
                chars: at,
            },
            crate::piece_table::piece::Piece {
                buf_kind: piece.buf_kind,
                range: mid..piece.range.end,
                chars: piece.chars - at,
            },
        ))
    }

    fn insert_piece(
        &mut self,
        pos: u64,
        new_piece: crate::piece_table::piece::Piece,
    ) -> Result<(), crate::enums::MathError> {
        let (idx, offset) = self.locate(pos);

        if !self.merge_or_continue(idx, offset, &new_piece) {
            return Ok(());
        }

        if idx == self.pieces.len() {
            self.pieces.push(new_piece);

            return Ok(());
        }

        if offset == 0 {
            self.pieces.insert(idx, new_piece);

            return Ok(());
        }

        if offset == self.pieces[idx].len() {
            self.pieces.insert(idx + 1, new_piece);

            return Ok(());
        }

        let (left, right) = self.split_piece(&self.pieces[idx], offset)?;

        self.pieces.splice(idx..=idx, [left, new_piece, right]);

        Ok(())
    }

    /// Inserts `text` so that its first char lands at char position `pos`.
    pub fn insert(&mut self, pos: u64, text: &str) -> Result<(), crate::enums::MathError> {
        if text.is_empty() {
            return Ok(());
        }

        self.check_bounds(pos)?;

        let chars = char_count(text)?;
        let new_len = self
            .len
            .checked_add(chars)
            .ok_or(crate::enums::MathError::Overflow)?;
        let start = self.buf.len();

        self.buf.push_str(text);
        self.insert_piece(
            pos,
            crate::piece_table::piece::Piece {
                buf_kind: crate::enums::BufferKind::Add,
                range: start..self.buf.len(),
                chars,
            },
        )?;
        self.len = new_len;

        Ok(())
    }

    /// Removes `len` chars starting at `pos` and returns the removed text.
    pub fn delete(&mut self, pos: u64, len: u64) -> Result<String, crate::enums::MathError> {
        if len == 0 {
            return Ok(String::new());
        }

        let end = pos
            .checked_add(len)
            .ok_or(crate::enums::MathError::Overflow)?;

        self.check_bounds(end)?;

        let (mut idx, mut offset) = self.locate(pos);
        let mut remaining = len;
        let mut removed = String::new();

        while remaining > 0 && idx < self.pieces.len() {
            let piece = self.pieces[idx].clone();
            let piece_len = piece.len();

            if offset == piece_len {
                // `locate` resolved to the end of the previous piece.
                idx.add_assign(1);
                offset = 0;

                continue;
            }

            let delete_start = offset;
            let delete_end = (offset + remaining).min(piece_len);
            let remove_len = delete_end - delete_start;
            let text = self.piece_str(&piece);
            let byte_start = byte_offset(text, delete_start)?;
            let byte_end = byte_offset(text, delete_end)?;

            removed.push_str(&text[byte_start..byte_end]);

            if delete_start == 0 && delete_end == piece_len {
                // Full delete: just drop the piece
                self.pieces.remove(idx);
            } else if delete_start == 0 {
                // Delete start: shrink the piece from the left
                let shrunk = &mut self.pieces[idx];

                shrunk.range.start.add_assign(byte_end);
                shrunk.chars.sub_assign(remove_len);
                idx.add_assign(1);
            } else if delete_end == piece_len {
                // Delete end: shrink the piece from the right
                let shrunk = &mut self.pieces[idx];

                shrunk.range.end = piece.range.start + byte_start;
                shrunk.chars = delete_start;
                idx.add_assign(1);
            } else {
                self.pieces.splice(
                    idx..=idx,
                    [
                        crate::piece_table::piece::Piece {
                            buf_kind: piece.buf_kind,
                            range: piece.range.start..piece.range.start + byte_start,
                            chars: delete_start,
                        },
                        crate::piece_table::piece::Piece {
                            buf_kind: piece.buf_kind,
                            range: piece.range.start + byte_end..piece.range.end,
                            chars: piece_len - delete_end,
                        },
                    ],
                );
                idx.add_assign(2);
            }

            remaining.sub_assign(remove_len);
            offset = 0;
        }

        self.len.sub_assign(len);

        Ok(removed)
    }
}

/*

====================================
========== MISCELLANEOUS ===========
====================================

*/

impl PieceTable {
    /// Returns `len` chars starting at char position `pos`.
    pub fn text_at(&self, mut pos: u64, mut len: u64) -> Result<String, crate::enums::MathError> {
        let end = pos
            .checked_add(len)
            .ok_or(crate::enums::MathError::Overflow)?;

        self.check_bounds(end)?;

        let mut res = String::new();

        for piece in &self.pieces {
            if len == 0 {
                break;
            }

            let piece_len = piece.len();

            if pos >= piece_len {
                pos.sub_assign(piece_len);

                continue;
            }

            let take = (piece_len - pos).min(len);
            let text = self.piece_str(piece);

            res.push_str(&text[byte_offset(text, pos)?..byte_offset(text, pos + take)?]);
            len.sub_assign(take);
            pos = 0;
        }

        Ok(res)
    }

    /// Yields the document as sequential zero-copy string slices.
    pub fn iter_str(&self) -> impl Iterator<Item = &str> + '_ {
        self.pieces.iter().map(move |piece| self.piece_str(piece))
    }
}
