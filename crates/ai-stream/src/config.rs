pub const DEFAULT_HIGHLIGHT_DELAY: std::time::Duration = std::time::Duration::from_millis(600);
pub const DEFAULT_STREAM_START_DELAY: std::time::Duration = std::time::Duration::from_millis(200);
pub const DEFAULT_DONE_DISPLAY: std::time::Duration = std::time::Duration::from_millis(2000);

/// Timing of one streamed edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingConfig {
    /// Highlight shown before streaming starts.
    pub highlight_delay: std::time::Duration,
    /// Pause between entering streaming and the first chunk.
    pub stream_start_delay: std::time::Duration,
    /// How long the finished edit stays marked before the reset to idle.
    pub done_display: std::time::Duration,
    pub pacing: crate::pacing::Pacing,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            highlight_delay: DEFAULT_HIGHLIGHT_DELAY,
            stream_start_delay: DEFAULT_STREAM_START_DELAY,
            done_display: DEFAULT_DONE_DISPLAY,
            pacing: crate::pacing::Pacing::Realistic,
        }
    }
}

impl StreamingConfig {
    /// Defaults overridden by `AI_EDIT_HIGHLIGHT_DELAY_MS`,
    /// `AI_EDIT_STREAM_START_DELAY_MS`, `AI_EDIT_DONE_DISPLAY_MS` and
    /// `AI_EDIT_PACING`. Unparseable values fall back to the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str, default: std::time::Duration| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .map(std::time::Duration::from_millis)
                .unwrap_or(default)
        };

        Self {
            highlight_delay: millis("AI_EDIT_HIGHLIGHT_DELAY_MS", DEFAULT_HIGHLIGHT_DELAY),
            stream_start_delay: millis("AI_EDIT_STREAM_START_DELAY_MS", DEFAULT_STREAM_START_DELAY),
            done_display: millis("AI_EDIT_DONE_DISPLAY_MS", DEFAULT_DONE_DISPLAY),
            pacing: lookup("AI_EDIT_PACING")
                .and_then(|v| v.parse().ok())
                .unwrap_or_default(),
        }
    }

    /// No waits anywhere except the done display. Handy for batch runs.
    pub fn instant() -> Self {
        Self {
            highlight_delay: std::time::Duration::ZERO,
            stream_start_delay: std::time::Duration::ZERO,
            pacing: crate::pacing::Pacing::Instant,
            ..Self::default()
        }
    }
}
