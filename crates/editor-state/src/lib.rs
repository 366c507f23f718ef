//! The AI edit core that sits on top of a document: the edit state machine,
//! the decorations it projects, and the session that applies its actions to a
//! [`host::HostDocument`].

pub mod ai_edit;
pub mod context;
pub mod decoration;
pub mod document;
pub mod host;
pub mod session;
