//! The AI edit state machine.
//!
//! ```text
//! idle --start-highlight--> highlight --start-streaming--> streaming --finish--> done
//!   ^                          |                             |  ^                 |
//!   |                          |                             |  insert-char       |
//!   +---------------------- cancel (from any phase, or after the done delay) -----+
//! ```
//!
//! The machine never touches the document itself. [`AiEditState::apply`]
//! receives the position map of the mutation that accompanied the action
//! (if any) and only updates bookkeeping; [`crate::session::EditSession`]
//! performs the document side.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AiEditPhase {
    #[default]
    Idle,
    /// Selection is highlighted, waiting for the stream.
    Highlight,
    /// Chunks are being written into the document.
    Streaming,
    /// Edit finished; the new text stays marked until the reset.
    Done,
}

impl AiEditPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            AiEditPhase::Idle => "idle",
            AiEditPhase::Highlight => "highlight",
            AiEditPhase::Streaming => "streaming",
            AiEditPhase::Done => "done",
        }
    }
}

impl std::fmt::Display for AiEditPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiEditAction {
    StartHighlight { from: u64, to: u64 },
    StartStreaming,
    /// `text` has already been written at `insert_pos` by the caller.
    InsertChar { text: String },
    Finish,
    Cancel,
}

impl AiEditAction {
    pub fn name(&self) -> &'static str {
        match self {
            AiEditAction::StartHighlight { .. } => "start-highlight",
            AiEditAction::StartStreaming => "start-streaming",
            AiEditAction::InsertChar { .. } => "insert-char",
            AiEditAction::Finish => "finish",
            AiEditAction::Cancel => "cancel",
        }
    }
}

/// Why an action was dropped. The state is unchanged whenever one of these
/// is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("invalid range {from}..{to} (document len {len})")]
    InvalidRange { from: u64, to: u64, len: u64 },
    #[error("`{action}` requires an active edit range")]
    MissingContext { action: &'static str },
    #[error("`{action}` is not valid while {phase}")]
    InvalidPhase {
        action: &'static str,
        phase: AiEditPhase,
    },
}

/// Phase before and after one applied action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub previous: AiEditPhase,
    pub current: AiEditPhase,
}

impl Transition {
    #[inline]
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AiEditState {
    phase: AiEditPhase,
    /// Span still holding unreplaced old text plus the new text written so far.
    original_range: Option<editor_core::mapping::EditRange>,
    /// Right after the most recently written char.
    insert_pos: u64,
    /// Chars written so far; `[insert_pos - inserted_len, insert_pos)` is new text.
    inserted_len: u64,
    decorations: Vec<crate::decoration::DecorationSpan>,
}

/*

===========================
========= GETTERS =========
===========================

*/

impl AiEditState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> AiEditPhase {
        self.phase
    }

    #[inline]
    pub fn original_range(&self) -> Option<editor_core::mapping::EditRange> {
        self.original_range
    }

    #[inline]
    pub fn insert_pos(&self) -> u64 {
        self.insert_pos
    }

    #[inline]
    pub fn inserted_len(&self) -> u64 {
        self.inserted_len
    }

    #[inline]
    pub fn decorations(&self) -> &[crate::decoration::DecorationSpan] {
        &self.decorations
    }

    /// True when the next chunk replaces an old char instead of being inserted.
    #[inline]
    pub fn has_old_text_at_cursor(&self) -> bool {
        self.original_range
            .is_some_and(|range| self.insert_pos < range.to)
    }

    /// `[insert_pos, range.to)` when old text is left over, else `None`.
    pub fn remaining_old_text(&self) -> Option<editor_core::mapping::EditRange> {
        let range = self.original_range?;

        (self.insert_pos < range.to).then_some(editor_core::mapping::EditRange {
            from: self.insert_pos,
            to: range.to,
        })
    }

    /// `[insert_pos - inserted_len, insert_pos)`.
    pub fn inserted_range(&self) -> editor_core::mapping::EditRange {
        editor_core::mapping::EditRange {
            from: self.insert_pos.saturating_sub(self.inserted_len),
            to: self.insert_pos,
        }
    }
}

/*

===============================
========= TRANSITIONS =========
===============================

*/

impl AiEditState {
    /// Applies one action.
    ///
    /// `map` translates positions through the document mutation that came
    /// with the action (identity when there was none); `document_len` is the
    /// post-mutation length.
    pub fn apply<M>(
        &mut self,
        action: &AiEditAction,
        map: M,
        document_len: u64,
    ) -> Result<Transition, Rejection>
    where
        M: Fn(u64) -> u64,
    {
        let previous = self.phase;

        match action {
            AiEditAction::StartHighlight { from, to } => {
                self.require_phase(action, &[AiEditPhase::Idle])?;

                let range = editor_core::mapping::EditRange::new(*from, *to)
                    .filter(|range| range.to <= document_len)
                    .ok_or(Rejection::InvalidRange {
                        from: *from,
                        to: *to,
                        len: document_len,
                    })?;

                self.phase = AiEditPhase::Highlight;
                self.original_range = Some(range);
                self.insert_pos = range.from;
                self.inserted_len = 0;
            }
            AiEditAction::StartStreaming => {
                let range = self.require_range(action)?;
                self.require_phase(action, &[AiEditPhase::Highlight])?;

                self.phase = AiEditPhase::Streaming;
                self.insert_pos = range.from;
                self.inserted_len = 0;
            }
            AiEditAction::InsertChar { text } => {
                let range = self.ensure_streaming(action)?;

                let len = <usize as TryInto<u64>>::try_into(text.chars().count())
                    .unwrap_or(u64::MAX);

                self.inserted_len = self.inserted_len.saturating_add(len);
                self.insert_pos = self.insert_pos.saturating_add(len);
                self.original_range = Some(editor_core::mapping::EditRange {
                    from: range.from,
                    to: map(range.to).max(range.from),
                });
            }
            AiEditAction::Finish => {
                self.require_range(action)?;
                self.require_phase(action, &[AiEditPhase::Streaming])?;

                self.phase = AiEditPhase::Done;
            }
            AiEditAction::Cancel => {
                *self = Self::default();
            }
        }

        self.recompute_decorations(document_len);

        let transition = Transition {
            previous,
            current: self.phase,
        };

        if transition.changed() {
            tracing::debug!(
                action = action.name(),
                from = %transition.previous,
                to = %transition.current,
                "ai edit phase changed"
            );
        }

        Ok(transition)
    }

    /// Follows a document mutation that was not an AI action (leftover
    /// cleanup, or an edit from elsewhere). `map` takes a bias so the range
    /// start can stay before insertions while its end grows with them.
    pub fn map_through<M>(&mut self, map: M, document_len: u64)
    where
        M: Fn(u64, editor_core::enums::Bias) -> u64,
    {
        let Some(range) = self.original_range else {
            return;
        };

        // Once the old text is used up, text typed at the cursor is not part
        // of the range and must not be replaced by later chunks.
        let to_bias = if range.to == self.insert_pos {
            editor_core::enums::Bias::Left
        } else {
            editor_core::enums::Bias::Right
        };

        let from = map(range.from, editor_core::enums::Bias::Left);
        let to = map(range.to, to_bias).max(from);
        let insert_pos = map(self.insert_pos, editor_core::enums::Bias::Left).clamp(from, to);

        self.original_range = Some(editor_core::mapping::EditRange { from, to });
        // New text that was deleted under us no longer counts.
        self.inserted_len = self.inserted_len.min(insert_pos - from);
        self.insert_pos = insert_pos;
        self.recompute_decorations(document_len);
    }

    /// Succeeds when a chunk may be written: streaming with a tracked range.
    pub fn ensure_streaming(
        &self,
        action: &AiEditAction,
    ) -> Result<editor_core::mapping::EditRange, Rejection> {
        let range = self.require_range(action)?;
        self.require_phase(action, &[AiEditPhase::Streaming])?;

        Ok(range)
    }

    fn require_range(
        &self,
        action: &AiEditAction,
    ) -> Result<editor_core::mapping::EditRange, Rejection> {
        self.original_range.ok_or(Rejection::MissingContext {
            action: action.name(),
        })
    }

    fn require_phase(
        &self,
        action: &AiEditAction,
        allowed: &[AiEditPhase],
    ) -> Result<(), Rejection> {
        if allowed.contains(&self.phase) {
            return Ok(());
        }

        Err(Rejection::InvalidPhase {
            action: action.name(),
            phase: self.phase,
        })
    }

    fn recompute_decorations(&mut self, document_len: u64) {
        let range = self.original_range.unwrap_or_default();

        let input = crate::decoration::DecorationInput {
            phase: self.phase,
            from: range.from,
            to: range.to,
            insert_pos: self.insert_pos,
            inserted_len: self.inserted_len,
            document_len,
        };

        self.decorations = crate::decoration::build_decorations(&input);
    }
}
