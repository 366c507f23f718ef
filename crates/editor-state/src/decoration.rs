//! Visual annotations for an AI edit region.
//!
//! Decorations are a pure projection of [`crate::ai_edit::AiEditState`]: they
//! carry no behaviour, are recomputed from scratch on every state change and
//! are handed to [`crate::host::HostDocument::render_decorations`] as is.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorationKind {
    /// The selected text before streaming starts.
    PendingHighlight,
    /// Text the AI has already written.
    NewText,
    /// Original text that is still waiting to be replaced.
    PendingOldText,
    /// The finished replacement, shown briefly after the stream ends.
    Done,
}

impl DecorationKind {
    /// Presentation class the renderer styles this span with.
    pub fn class_name(self) -> &'static str {
        match self {
            DecorationKind::PendingHighlight => "ai-edit-highlight",
            DecorationKind::NewText => "ai-edit-new-text",
            DecorationKind::PendingOldText => "ai-edit-pending",
            DecorationKind::Done => "ai-edit-done",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecorationSpan {
    pub from: u64,
    pub to: u64,
    pub kind: DecorationKind,
}

impl DecorationSpan {
    #[inline]
    pub fn overlaps(&self, other: &DecorationSpan) -> bool {
        self.from < other.to && other.from < self.to
    }
}

/// Everything the highlighter looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecorationInput {
    pub phase: crate::ai_edit::AiEditPhase,
    pub from: u64,
    pub to: u64,
    pub insert_pos: u64,
    pub inserted_len: u64,
    pub document_len: u64,
}

/// Computes the non-overlapping spans for one state snapshot.
pub fn build_decorations(input: &DecorationInput) -> Vec<DecorationSpan> {
    let mut spans = Vec::with_capacity(2);
    // `insert_pos - inserted_len`, never below zero.
    let new_from = input.insert_pos.saturating_sub(input.inserted_len);

    match input.phase {
        crate::ai_edit::AiEditPhase::Idle => {}
        crate::ai_edit::AiEditPhase::Highlight => {
            if input.from < input.to {
                spans.push(DecorationSpan {
                    from: input.from,
                    to: input.to,
                    kind: DecorationKind::PendingHighlight,
                });
            }
        }
        crate::ai_edit::AiEditPhase::Streaming => {
            if input.inserted_len > 0
                && input.insert_pos > input.from
                && new_from < input.insert_pos
            {
                spans.push(DecorationSpan {
                    from: new_from,
                    to: input.insert_pos,
                    kind: DecorationKind::NewText,
                });
            }

            if input.insert_pos < input.to {
                spans.push(DecorationSpan {
                    from: input.insert_pos,
                    to: input.to,
                    kind: DecorationKind::PendingOldText,
                });
            }
        }
        crate::ai_edit::AiEditPhase::Done => {
            // A position past the end means the document changed under us.
            if new_from < input.insert_pos && input.insert_pos <= input.document_len {
                spans.push(DecorationSpan {
                    from: new_from,
                    to: input.insert_pos,
                    kind: DecorationKind::Done,
                });
            }
        }
    }

    spans
}
