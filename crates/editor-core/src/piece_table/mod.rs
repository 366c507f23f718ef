/// # Piece Table Module.
///
/// The document is an ordered list of pieces, each pointing into either the
/// original text (memory-mapped or owned) or an append-only buffer. Public
/// addressing is by char position; pieces remember their byte range and
/// char count so lookups never re-scan the whole document.
pub mod piece;
pub mod table;

/// Initial capacity of the append buffer, in bytes.
pub const BASELINE_CAPACITY: usize = 4096;
