/// Errors a host document reports for a mutation or read it cannot perform.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Buffer(#[from] editor_core::errors::TextBufferError),
    #[error("position {pos} is past the end of the document (len={len})")]
    OutOfBounds { pos: u64, len: u64 },
}

/// What the AI edit core needs from the document it edits.
///
/// Positions are char offsets. Every mutating call is atomic and returns the
/// [`editor_core::mapping::Mutation`] it performed; the same mutation is what
/// [`HostDocument::map_position_through_last_mutation`] maps through until
/// the next mutation happens.
pub trait HostDocument {
    /// The live selection (or caret, when empty).
    fn current_selection(&self) -> editor_core::mapping::EditRange;

    /// Document length in chars.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn text_between(&self, from: u64, to: u64) -> Result<String, DocumentError>;

    fn replace_range(
        &mut self,
        from: u64,
        to: u64,
        text: &str,
    ) -> Result<editor_core::mapping::Mutation, DocumentError>;

    fn insert_at(
        &mut self,
        pos: u64,
        text: &str,
    ) -> Result<editor_core::mapping::Mutation, DocumentError>;

    fn delete_range(
        &mut self,
        from: u64,
        to: u64,
    ) -> Result<editor_core::mapping::Mutation, DocumentError>;

    /// Maps a position recorded before the last mutation into the current
    /// document, sticking after insertions made exactly at it.
    fn map_position_through_last_mutation(&self, pos: u64) -> u64;

    /// Purely advisory: show these spans. Replaces whatever was shown before.
    fn render_decorations(&mut self, spans: &[crate::decoration::DecorationSpan]);
}
