/// Lines of context kept on each side of the selection.
pub const CONTEXT_PADDING: usize = 3;

/// A snapshot of the selection to send along with an AI request.
///
/// The snapshot is prompt material only. Positions of a running edit are
/// tracked through document mutations, never through this text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub has_selection: bool,
    pub range: editor_core::mapping::EditRange,
    pub selected_text: String,
    /// The selected lines plus up to [`CONTEXT_PADDING`] lines on each side.
    pub surrounding_context: String,
}

impl SelectionContext {
    /// Captures the document's current selection.
    pub fn capture_selection<D: crate::host::HostDocument>(
        document: &D,
    ) -> Result<Self, crate::host::DocumentError> {
        Self::capture(document, document.current_selection())
    }

    /// Captures `range`. An empty range yields a context with
    /// `has_selection == false` and no text.
    pub fn capture<D: crate::host::HostDocument>(
        document: &D,
        range: editor_core::mapping::EditRange,
    ) -> Result<Self, crate::host::DocumentError> {
        if range.is_empty() {
            return Ok(Self {
                range,
                ..Self::default()
            });
        }

        let full = document.text_between(0, document.len())?;
        let byte_from = byte_index(&full, range.from);
        let byte_to = byte_index(&full, range.to);
        let bytes = full.as_bytes();

        // The line holding `from` starts after the first newline behind it;
        // each further newline adds one line of context.
        let context_start = memchr::memrchr_iter(b'\n', &bytes[..byte_from])
            .nth(CONTEXT_PADDING)
            .map_or(0, |idx| idx + 1);

        let context_end = memchr::memchr_iter(b'\n', &bytes[byte_to..])
            .nth(CONTEXT_PADDING)
            .map_or(bytes.len(), |idx| byte_to + idx);

        Ok(Self {
            has_selection: true,
            range,
            selected_text: full[byte_from..byte_to].to_string(),
            surrounding_context: full[context_start..context_end].to_string(),
        })
    }
}

/// Byte offset of char position `pos`, clamped to the end of `text`.
fn byte_index(text: &str, pos: u64) -> usize {
    let Ok(pos) = <u64 as TryInto<usize>>::try_into(pos) else {
        return text.len();
    };

    text.char_indices()
        .nth(pos)
        .map_or(text.len(), |(idx, _)| idx)
}

#[cfg(test)]
mod context_tests {
    use super::*;
    use crate::document::Document;
    use editor_core::mapping::EditRange;

    const TEXT: &str = "l0\nl1\nl2\nl3\nl4 target\nl5\nl6\nl7\nl8";

    #[test]
    fn empty_selection_has_no_text() {
        let doc = Document::from_text(TEXT).unwrap();

        let ctx = SelectionContext::capture(&doc, EditRange { from: 4, to: 4 }).unwrap();

        assert!(!ctx.has_selection);
        assert_eq!(ctx.range, EditRange { from: 4, to: 4 });
        assert!(ctx.selected_text.is_empty());
        assert!(ctx.surrounding_context.is_empty());
    }

    #[test]
    fn pads_three_lines_each_side() {
        let doc = Document::from_text(TEXT).unwrap();
        let from = TEXT.find("target").unwrap() as u64;

        let ctx = SelectionContext::capture(&doc, EditRange { from, to: from + 6 }).unwrap();

        assert!(ctx.has_selection);
        assert_eq!(ctx.selected_text, "target");
        assert_eq!(ctx.surrounding_context, "l1\nl2\nl3\nl4 target\nl5\nl6\nl7");
    }

    #[test]
    fn context_stops_at_document_edges() {
        let doc = Document::from_text("first\nsecond").unwrap();

        let ctx = SelectionContext::capture(&doc, EditRange { from: 0, to: 5 }).unwrap();

        assert_eq!(ctx.selected_text, "first");
        assert_eq!(ctx.surrounding_context, "first\nsecond");
    }

    #[test]
    fn multibyte_selection_uses_char_positions() {
        let doc = Document::from_text("naïve café\nnext").unwrap();

        let ctx = SelectionContext::capture(&doc, EditRange { from: 6, to: 10 }).unwrap();

        assert_eq!(ctx.selected_text, "café");
        assert_eq!(ctx.surrounding_context, "naïve café\nnext");
    }

    #[test]
    fn captures_live_selection() {
        let mut doc = Document::from_text("alpha beta").unwrap();
        doc.select(10, 6).unwrap();

        let ctx = SelectionContext::capture_selection(&doc).unwrap();

        assert_eq!(ctx.range, EditRange { from: 6, to: 10 });
        assert_eq!(ctx.selected_text, "beta");
    }
}
