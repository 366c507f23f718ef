/// Why a streamed edit stopped early.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The session refused a step (bad range, or the document rejected a mutation).
    #[error(transparent)]
    Session(#[from] editor_state::session::SessionError),
    /// The text source gave up before the end of its text.
    #[error("text source failed: {0}")]
    Source(String),
}

impl From<editor_state::ai_edit::Rejection> for StreamError {
    fn from(rejection: editor_state::ai_edit::Rejection) -> Self {
        StreamError::Session(rejection.into())
    }
}
