//! Drives AI edits into a document over time: a text source delivers chunks,
//! the controller paces them into an [`editor_state::session::EditSession`]
//! and handles cancellation and the post-edit reset.

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod pacing;
pub mod simulate;
pub mod source;
