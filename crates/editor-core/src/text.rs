/// # The Core Philosophies of This API
///
/// - Position-Based: callers address the document by char position. The
///   `TextBuffer` resolves those into piece / byte offsets internally.
/// - Every edit reports itself: `insert`, `delete` and `replace` return the
///   [`crate::mapping::Mutation`] they performed so that anything tracking
///   positions (selections, highlighted ranges) can be mapped through it.
/// - Immutability for Reads: functions that only query data take `&self`.
#[derive(Debug)]
pub struct TextBuffer {
    piece_table: crate::piece_table::table::PieceTable,
}

/*

===========================
===== CREATION & OPEN =====
===========================

*/

impl TextBuffer {
    /// Creates an in-memory text buffer with base text.
    pub fn new_with_text(text: &str) -> crate::errors::TextBufferResult<Self> {
        Ok(Self {
            piece_table: crate::piece_table::table::PieceTable::from_text(text)?,
        })
    }

    /// Opens a UTF-8 file and maps it into memory as the original text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, lacks read permissions,
    /// is not valid UTF-8, or if the memory mapping operation fails.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> crate::errors::TextBufferResult<Self> {
        let path_buf = path.as_ref().to_path_buf();
        // The OS sets up the page tables but doesn't read the whole file into RAM yet.
        let mmap_file = io::mmap::MmapFile::open_utf8(&path_buf)?;
        let piece_table = crate::piece_table::table::PieceTable::new(
            crate::piece_table::table::Original::Mapped(mmap_file),
        )?;

        tracing::debug!(
            path = %path_buf.display(),
            chars = piece_table.len(),
            "opened text buffer"
        );

        Ok(Self { piece_table })
    }
}

/*

==========================
===== INLINE METHODS =====
==========================

*/

impl TextBuffer {
    /// Returns the total length of the document in chars.
    #[inline]
    pub fn len(&self) -> u64 {
        self.piece_table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.piece_table.is_empty()
    }
}

/*

===========================
========= GETTERS =========
===========================

*/

impl TextBuffer {
    /// Returns the text in `[from, to)`.
    pub fn text_between(&self, from: u64, to: u64) -> crate::errors::TextBufferResult<String> {
        if from > to {
            return Err(crate::errors::TextBufferError::InvalidRange { from, to });
        }

        Ok(self.piece_table.text_at(from, to - from)?)
    }
}

/*

========================================
========= INSERTION & DELETION =========
========================================

*/

impl TextBuffer {
    /// Inserts `text` at `pos`.
    pub fn insert(
        &mut self,
        pos: u64,
        text: &str,
    ) -> crate::errors::TextBufferResult<crate::mapping::Mutation> {
        self.piece_table.insert(pos, text)?;

        let inserted = <usize as TryInto<u64>>::try_into(text.chars().count())
            .map_err(crate::errors::TextBufferError::ConversionError)?;

        Ok(crate::mapping::Mutation::insertion(pos, inserted))
    }

    /// Deletes the text in `[from, to)`.
    pub fn delete(
        &mut self,
        from: u64,
        to: u64,
    ) -> crate::errors::TextBufferResult<crate::mapping::Mutation> {
        if from > to {
            return Err(crate::errors::TextBufferError::InvalidRange { from, to });
        }

        self.piece_table.delete(from, to - from)?;

        Ok(crate::mapping::Mutation::deletion(from, to))
    }

    /// Replaces `[from, to)` with `text` as one atomic step.
    ///
    /// The range is validated before anything is removed, so a failed
    /// replace leaves the buffer untouched.
    pub fn replace(
        &mut self,
        from: u64,
        to: u64,
        text: &str,
    ) -> crate::errors::TextBufferResult<crate::mapping::Mutation> {
        if from > to {
            return Err(crate::errors::TextBufferError::InvalidRange { from, to });
        }

        if to > self.len() {
            return Err(crate::errors::TextBufferError::IndexOutOfBounds {
                pos: to,
                len: self.len(),
            });
        }

        self.piece_table.delete(from, to - from)?;
        self.piece_table.insert(from, text)?;

        let inserted = <usize as TryInto<u64>>::try_into(text.chars().count())
            .map_err(crate::errors::TextBufferError::ConversionError)?;

        Ok(crate::mapping::Mutation::replacement(from, to, inserted))
    }
}

impl std::fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for chunk in self.piece_table.iter_str() {
            f.write_str(chunk)?;
        }

        Ok(())
    }
}


#[cfg(test)]
mod text_buffer_editing_tests {
    use super::*;
    use crate::mapping::Mutation;

    // ==========================================
    // INSERT TESTS
    // ==========================================

    #[test]
    fn test_insert_basic_and_multiline() {
        let mut buffer = TextBuffer::new_with_text("Hello").unwrap();

        let mutation = buffer.insert(5, " World").unwrap();
        assert_eq!(buffer.to_string(), "Hello World");
        assert_eq!(mutation, Mutation::insertion(5, 6));

        buffer.insert(5, "\nBrave\n").unwrap();
        assert_eq!(buffer.to_string(), "Hello\nBrave\n World");
    }

    #[test]
    fn test_insert_out_of_bounds_fails() {
        let mut buffer = TextBuffer::new_with_text("Hi").unwrap();

        assert!(buffer.insert(3, "!").is_err());
        assert_eq!(buffer.to_string(), "Hi");
    }

    // ==========================================
    // DELETE TESTS
    // ==========================================

    #[test]
    fn test_delete_range() {
        let mut buffer = TextBuffer::new_with_text("Line 1\nLine 2\nLine 3").unwrap();

        let mutation = buffer.delete(11, 13).unwrap();
        assert_eq!(buffer.to_string(), "Line 1\nLine\nLine 3");
        assert_eq!(mutation, Mutation::deletion(11, 13));

        buffer.delete(6, 12).unwrap();
        assert_eq!(buffer.to_string(), "Line 1Line 3");
    }

    #[test]
    fn test_delete_inverted_range_fails() {
        let mut buffer = TextBuffer::new_with_text("Hello World").unwrap();

        assert!(matches!(
            buffer.delete(8, 3),
            Err(crate::errors::TextBufferError::InvalidRange { from: 8, to: 3 })
        ));
        assert_eq!(buffer.to_string(), "Hello World");
    }

    // ==========================================
    // REPLACE TESTS
    // ==========================================

    #[test]
    fn test_replace_selection() {
        let mut buffer = TextBuffer::new_with_text("Hello World").unwrap();

        let mutation = buffer.replace(6, 11, "Rust").unwrap();

        assert_eq!(buffer.to_string(), "Hello Rust");
        assert_eq!(mutation, Mutation::replacement(6, 11, 4));
        assert_eq!(buffer.text_between(6, 10).unwrap(), "Rust");
    }

    #[test]
    fn test_replace_out_of_bounds_leaves_buffer_untouched() {
        let mut buffer = TextBuffer::new_with_text("abc").unwrap();

        assert!(buffer.replace(1, 9, "x").is_err());
        assert_eq!(buffer.to_string(), "abc");
    }

    #[test]
    fn test_text_between_multibyte() {
        let buffer = TextBuffer::new_with_text("über straße").unwrap();

        assert_eq!(buffer.text_between(5, 11).unwrap(), "straße");
        assert_eq!(buffer.text_between(0, 1).unwrap(), "ü");
    }
}
