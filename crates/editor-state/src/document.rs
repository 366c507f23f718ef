/// An open document: the text, the user's selection and whatever decorations
/// were last handed to it.
///
/// Every mutation, whether it comes from an AI edit or from elsewhere, maps the
/// selection through itself and becomes the "last mutation" that
/// [`crate::host::HostDocument::map_position_through_last_mutation`] maps through.
#[derive(Debug)]
pub struct Document {
    pub text_buffer: editor_core::text::TextBuffer,
    pub cursor: editor_core::cursor::Cursor,

    last_mapping: editor_core::mapping::Mapping,
    decorations: Vec<crate::decoration::DecorationSpan>,
}

impl Document {
    pub fn new(text_buffer: editor_core::text::TextBuffer) -> Self {
        Self {
            text_buffer,
            cursor: editor_core::cursor::Cursor::default(),
            last_mapping: editor_core::mapping::Mapping::new(),
            decorations: Vec::new(),
        }
    }

    pub fn from_text(text: &str) -> editor_core::errors::TextBufferResult<Self> {
        Ok(Self::new(editor_core::text::TextBuffer::new_with_text(text)?))
    }

    /// Loads a UTF-8 file from disk.
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> editor_core::errors::TextBufferResult<Self> {
        Ok(Self::new(editor_core::text::TextBuffer::open(path)?))
    }

    /// Sets the selection. `anchor > head` is a backwards selection.
    pub fn select(&mut self, anchor: u64, head: u64) -> Result<(), crate::host::DocumentError> {
        let len = self.text_buffer.len();

        if let Some(pos) = [anchor, head].into_iter().find(|pos| *pos > len) {
            return Err(crate::host::DocumentError::OutOfBounds { pos, len });
        }

        self.cursor = editor_core::cursor::Cursor::new_selection(anchor, head);

        Ok(())
    }

    /// The spans most recently passed to `render_decorations`.
    #[inline]
    pub fn decorations(&self) -> &[crate::decoration::DecorationSpan] {
        &self.decorations
    }

    /// Records a mutation: it becomes the last mapping and moves the cursor.
    fn record(
        &mut self,
        mutation: editor_core::mapping::Mutation,
    ) -> editor_core::mapping::Mutation {
        self.cursor.map_through(&mutation);
        self.last_mapping = editor_core::mapping::Mapping::from(mutation);

        mutation
    }
}

/*

=================================
========= HOST DOCUMENT =========
=================================

*/

impl crate::host::HostDocument for Document {
    fn current_selection(&self) -> editor_core::mapping::EditRange {
        self.cursor.range()
    }

    #[inline]
    fn len(&self) -> u64 {
        self.text_buffer.len()
    }

    fn text_between(&self, from: u64, to: u64) -> Result<String, crate::host::DocumentError> {
        Ok(self.text_buffer.text_between(from, to)?)
    }

    fn replace_range(
        &mut self,
        from: u64,
        to: u64,
        text: &str,
    ) -> Result<editor_core::mapping::Mutation, crate::host::DocumentError> {
        let mutation = self.text_buffer.replace(from, to, text)?;

        Ok(self.record(mutation))
    }

    fn insert_at(
        &mut self,
        pos: u64,
        text: &str,
    ) -> Result<editor_core::mapping::Mutation, crate::host::DocumentError> {
        let mutation = self.text_buffer.insert(pos, text)?;

        Ok(self.record(mutation))
    }

    fn delete_range(
        &mut self,
        from: u64,
        to: u64,
    ) -> Result<editor_core::mapping::Mutation, crate::host::DocumentError> {
        let mutation = self.text_buffer.delete(from, to)?;

        Ok(self.record(mutation))
    }

    fn map_position_through_last_mutation(&self, pos: u64) -> u64 {
        self.last_mapping.map(pos, editor_core::enums::Bias::Right)
    }

    fn render_decorations(&mut self, spans: &[crate::decoration::DecorationSpan]) {
        if self.decorations != spans {
            tracing::trace!(count = spans.len(), "decorations updated");
        }

        self.decorations.clear();
        self.decorations.extend_from_slice(spans);
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.text_buffer, f)
    }
}
