/// Failure of one session command.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The state machine dropped the action; nothing changed.
    #[error(transparent)]
    Rejected(#[from] crate::ai_edit::Rejection),
    /// The document refused the mutation; the state machine was not advanced.
    #[error(transparent)]
    Document(#[from] crate::host::DocumentError),
}

/// One editing session: the document and the AI edit state that tracks a
/// range inside it.
///
/// Every AI action goes through [`EditSession::dispatch`], which performs the
/// document side of the action first and then advances the state machine with
/// the mapping of exactly that mutation.
#[derive(Debug)]
pub struct EditSession<D: crate::host::HostDocument> {
    document: D,
    state: crate::ai_edit::AiEditState,
}

/*

===========================
========= GETTERS =========
===========================

*/

impl<D: crate::host::HostDocument> EditSession<D> {
    pub fn new(document: D) -> Self {
        Self {
            document,
            state: crate::ai_edit::AiEditState::new(),
        }
    }

    #[inline]
    pub fn document(&self) -> &D {
        &self.document
    }

    #[inline]
    pub fn state(&self) -> &crate::ai_edit::AiEditState {
        &self.state
    }

    #[inline]
    pub fn phase(&self) -> crate::ai_edit::AiEditPhase {
        self.state.phase()
    }

    pub fn into_document(self) -> D {
        self.document
    }
}

/*

============================
========= COMMANDS =========
============================

*/

impl<D: crate::host::HostDocument> EditSession<D> {
    /// Applies one action to the document and the state machine.
    ///
    /// `InsertChar` writes its text at the insertion point first: it replaces
    /// exactly one old char while old text remains under the cursor and is a
    /// pure insertion afterwards. An empty chunk changes nothing.
    pub fn dispatch(
        &mut self,
        action: &crate::ai_edit::AiEditAction,
    ) -> Result<crate::ai_edit::Transition, SessionError> {
        let transition = match action {
            crate::ai_edit::AiEditAction::InsertChar { text } => self.write_chunk(action, text)?,
            _ => {
                let len = self.document.len();
                self.state.apply(action, |pos| pos, len).inspect_err(|rejection| {
                    tracing::debug!(%rejection, "ai edit action rejected");
                })?
            }
        };

        self.document.render_decorations(self.state.decorations());

        Ok(transition)
    }

    /// Removes `[insert_pos, range.to)` once the stream has ended, so that a
    /// replacement shorter than the selection does not leave old text behind.
    ///
    /// Returns the number of chars removed.
    pub fn delete_remaining_old_text(&mut self) -> Result<u64, SessionError> {
        if self.state.phase() != crate::ai_edit::AiEditPhase::Streaming {
            return Err(crate::ai_edit::Rejection::InvalidPhase {
                action: "delete-remaining",
                phase: self.state.phase(),
            }
            .into());
        }

        let Some(leftover) = self.state.remaining_old_text() else {
            return Ok(0);
        };

        let mutation = self.document.delete_range(leftover.from, leftover.to)?;
        let len = self.document.len();

        self.state.map_through(|pos, bias| mutation.map(pos, bias), len);
        self.document.render_decorations(self.state.decorations());

        tracing::debug!(range = %leftover, "removed leftover old text");

        Ok(mutation.deleted())
    }

    /// Runs an edit that is not part of the AI stream and keeps the tracked
    /// range attached to the same text.
    pub fn edit_document<F>(
        &mut self,
        edit: F,
    ) -> Result<editor_core::mapping::Mutation, SessionError>
    where
        F: FnOnce(&mut D) -> Result<editor_core::mapping::Mutation, crate::host::DocumentError>,
    {
        let mutation = edit(&mut self.document)?;
        let len = self.document.len();

        self.state.map_through(|pos, bias| mutation.map(pos, bias), len);
        self.document.render_decorations(self.state.decorations());

        Ok(mutation)
    }

    fn write_chunk(
        &mut self,
        action: &crate::ai_edit::AiEditAction,
        text: &str,
    ) -> Result<crate::ai_edit::Transition, SessionError> {
        // Validate before touching the document.
        self.state.ensure_streaming(action).inspect_err(|rejection| {
            tracing::debug!(%rejection, "ai edit action rejected");
        })?;

        if text.is_empty() {
            let phase = self.state.phase();

            return Ok(crate::ai_edit::Transition {
                previous: phase,
                current: phase,
            });
        }

        let at = self.state.insert_pos();

        // 1. Mutate the document: replace one old char, or insert past the old text.
        if self.state.has_old_text_at_cursor() {
            self.document.replace_range(at, at + 1, text)?;
        } else {
            self.document.insert_at(at, text)?;
        }

        // 2. Advance the state through the mapping of that mutation.
        let len = self.document.len();
        let document = &self.document;

        Ok(self
            .state
            .apply(action, |pos| document.map_position_through_last_mutation(pos), len)?)
    }
}
