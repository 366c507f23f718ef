//! Position mapping across document mutations.
//!
//! Every edit to a [`crate::text::TextBuffer`] is described by a [`Mutation`]:
//! "the char range `from..to` was replaced by `inserted` chars". Pure
//! insertions have `from == to`, pure deletions have `inserted == 0`.
//! Positions recorded before the edit are translated with [`Mutation::map`],
//! ranges with [`EditRange::map_through`].

/// A half-open `[from, to)` char range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EditRange {
    pub from: u64,
    pub to: u64,
}

impl EditRange {
    /// Returns `None` when `from > to`.
    #[must_use]
    pub fn new(from: u64, to: u64) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> u64 {
        self.to.saturating_sub(self.from)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.from >= self.to
    }

    /// Maps both endpoints. `from` sticks before insertions at its position,
    /// `to` sticks after them, and `to` never ends up below `from`.
    #[must_use]
    pub fn map_through(&self, mutation: &Mutation) -> Self {
        let from = mutation.map(self.from, crate::enums::Bias::Left);
        let to = mutation.map(self.to, crate::enums::Bias::Right).max(from);

        Self { from, to }
    }
}

impl std::fmt::Display for EditRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// One atomic replacement: `from..to` (pre-edit positions) was removed and
/// `inserted` chars were written at `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mutation {
    pub from: u64,
    pub to: u64,
    pub inserted: u64,
}

impl Mutation {
    #[must_use]
    pub fn insertion(at: u64, len: u64) -> Self {
        Self {
            from: at,
            to: at,
            inserted: len,
        }
    }

    /// `from > to` is normalised by swapping the endpoints.
    #[must_use]
    pub fn deletion(from: u64, to: u64) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
            inserted: 0,
        }
    }

    #[must_use]
    pub fn replacement(from: u64, to: u64, inserted: u64) -> Self {
        Self {
            from: from.min(to),
            to: from.max(to),
            inserted,
        }
    }

    #[inline]
    #[must_use]
    pub fn deleted(&self) -> u64 {
        self.to - self.from
    }

    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to && self.inserted == 0
    }

    /// Translates a pre-mutation position into the post-mutation document.
    ///
    /// - before `from`: unchanged
    /// - at an insertion point: `bias` decides before / after the new text
    /// - inside the deleted span: collapses to `from` (or to the end of the
    ///   replacement text with [`crate::enums::Bias::Right`])
    /// - at or after `to`: shifted by `inserted - deleted`
    #[must_use]
    pub fn map(&self, pos: u64, bias: crate::enums::Bias) -> u64 {
        if pos < self.from {
            return pos;
        }

        if pos >= self.to && (pos > self.from || self.deleted() > 0) {
            // Saturating keeps positions beyond the document end total.
            return (pos - self.to).saturating_add(self.from + self.inserted);
        }

        match bias {
            crate::enums::Bias::Left => self.from,
            crate::enums::Bias::Right => self.from + self.inserted,
        }
    }
}

/// An ordered list of mutations produced by one logical change. Mapping
/// through it maps through each mutation in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    pub mutations: Vec<Mutation>,
}

impl Mapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mutation: Mutation) {
        if !mutation.is_noop() {
            self.mutations.push(mutation);
        }
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }

    #[must_use]
    pub fn map(&self, pos: u64, bias: crate::enums::Bias) -> u64 {
        self.mutations
            .iter()
            .fold(pos, |pos, mutation| mutation.map(pos, bias))
    }

    #[must_use]
    pub fn map_range(&self, range: &EditRange) -> EditRange {
        self.mutations
            .iter()
            .fold(*range, |range, mutation| range.map_through(mutation))
    }
}

impl From<Mutation> for Mapping {
    fn from(mutation: Mutation) -> Self {
        let mut mapping = Mapping::new();
        mapping.push(mutation);
        mapping
    }
}
