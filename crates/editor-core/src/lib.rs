//! Document primitives: a char-addressed piece-table buffer, selection
//! cursors, and the mutation / position-mapping model every position tracker
//! in the editor is built on.

pub mod cursor;
pub mod enums;
pub mod errors;
pub mod mapping;
pub mod piece_table;
pub mod text;
