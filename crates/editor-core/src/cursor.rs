/// Represents a cursor and its associated selection range over char positions.
/// Uses the "Anchor and Head" directional selection model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// The fixed starting point of a selection.
    pub anchor: u64,
    /// The active, moving end of a selection (where the caret is).
    pub head: u64,
}

impl Cursor {
    #[must_use]
    pub fn new(pos: u64) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Creates a selection from an anchor to a head.
    #[must_use]
    pub fn new_selection(anchor: u64, head: u64) -> Self {
        Self { anchor, head }
    }

    /// Returns true if this is just a cursor (no text selected).
    #[inline]
    #[must_use]
    pub fn no_selection(&self) -> bool {
        self.anchor == self.head
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> u64 {
        std::cmp::min(self.anchor, self.head)
    }

    #[inline]
    #[must_use]
    pub fn end(&self) -> u64 {
        std::cmp::max(self.anchor, self.head)
    }

    /// Returns the normalized range regardless of selection direction.
    #[inline]
    #[must_use]
    pub fn range(&self) -> crate::mapping::EditRange {
        crate::mapping::EditRange {
            from: self.start(),
            to: self.end(),
        }
    }

    /// Keeps the selection attached to the same text across a mutation.
    /// The head follows insertions at its position, the anchor does not
    /// unless it coincides with the head.
    pub fn map_through(&mut self, mutation: &crate::mapping::Mutation) {
        if self.no_selection() {
            let pos = mutation.map(self.head, crate::enums::Bias::Right);

            self.anchor = pos;
            self.head = pos;

            return;
        }

        self.anchor = mutation.map(self.anchor, crate::enums::Bias::Left);
        self.head = mutation.map(self.head, crate::enums::Bias::Right);
    }
}
