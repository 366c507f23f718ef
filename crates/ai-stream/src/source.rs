//! Suppliers of replacement text.
//!
//! The controller assumes nothing about a source beyond "chunks arrive in
//! order, eventually". Every await on a source is raced against cancellation.

/// Response latency of [`SimulatedSource`].
pub const SIMULATED_LATENCY: std::time::Duration = std::time::Duration::from_millis(800);

/// What a source yields for each request.
pub type ChunkResult = Result<Option<String>, crate::error::StreamError>;

pub trait TextSource: Send {
    /// The next chunk, or `Ok(None)` once the text is complete.
    fn next_chunk(&mut self) -> impl std::future::Future<Output = ChunkResult> + Send;
}

/// A fixed text, delivered without waiting.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    chunks: std::collections::VecDeque<String>,
}

impl StaticSource {
    /// One chunk per char.
    pub fn new(text: &str) -> Self {
        Self {
            chunks: text.chars().map(String::from).collect(),
        }
    }

    pub fn from_chunks<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }
}

impl TextSource for StaticSource {
    async fn next_chunk(&mut self) -> ChunkResult {
        Ok(self.chunks.pop_front())
    }
}

/// The simulated AI: waits a response latency, then types out a
/// [`crate::simulate::simulate_rewrite`] of the selection one char at a time.
#[derive(Clone, Debug)]
pub struct SimulatedSource {
    latency: std::time::Duration,
    responded: bool,
    explanation: String,
    pending: StaticSource,
}

impl SimulatedSource {
    pub fn new(selected: &str, instruction: Option<&str>) -> Self {
        let rewrite = crate::simulate::simulate_rewrite(selected, instruction);

        tracing::debug!(explanation = %rewrite.explanation, "simulated rewrite ready");

        Self {
            latency: SIMULATED_LATENCY,
            responded: false,
            explanation: rewrite.explanation,
            pending: StaticSource::new(&rewrite.text),
        }
    }

    #[must_use]
    pub fn with_latency(mut self, latency: std::time::Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

impl TextSource for SimulatedSource {
    async fn next_chunk(&mut self) -> ChunkResult {
        if !self.responded {
            tokio::time::sleep(self.latency).await;
            self.responded = true;
        }

        self.pending.next_chunk().await
    }
}

/// Chunks pushed by another task, e.g. a real inference client. The text is
/// complete when every sender is dropped.
#[derive(Debug)]
pub struct ChannelSource {
    rx: tokio::sync::mpsc::Receiver<Result<String, String>>,
}

/// Creates a bounded channel and the source reading from it. Send `Err` to
/// abort the edit with [`crate::error::StreamError::Source`].
pub fn channel(
    buffer: usize,
) -> (tokio::sync::mpsc::Sender<Result<String, String>>, ChannelSource) {
    let (tx, rx) = tokio::sync::mpsc::channel(buffer.max(1));

    (tx, ChannelSource { rx })
}

impl TextSource for ChannelSource {
    async fn next_chunk(&mut self) -> ChunkResult {
        match self.rx.recv().await {
            Some(Ok(chunk)) => Ok(Some(chunk)),
            Some(Err(message)) => Err(crate::error::StreamError::Source(message)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod source_tests {
    use super::*;

    async fn drain<S: TextSource>(source: &mut S) -> Vec<String> {
        let mut chunks = Vec::new();
        while let Some(chunk) = source.next_chunk().await.unwrap() {
            chunks.push(chunk);
        }
        chunks
    }

    #[tokio::test]
    async fn static_source_yields_chars() {
        let mut source = StaticSource::new("hé!");

        assert_eq!(drain(&mut source).await, vec!["h", "é", "!"]);
        assert_eq!(source.next_chunk().await.unwrap(), None);
    }

    #[tokio::test]
    async fn static_source_from_chunks() {
        let mut source = StaticSource::from_chunks(["Hello", ", ", "world"]);

        assert_eq!(drain(&mut source).await, vec!["Hello", ", ", "world"]);
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_source_waits_then_types() {
        let mut source = SimulatedSource::new("$10", Some("double"));
        let start = tokio::time::Instant::now();

        let first = source.next_chunk().await.unwrap();
        assert_eq!(first.as_deref(), Some("$"));
        assert_eq!(start.elapsed(), SIMULATED_LATENCY);

        assert_eq!(drain(&mut source).await, vec!["2", "0"]);
        assert_eq!(start.elapsed(), SIMULATED_LATENCY);
        assert_eq!(source.explanation(), "Doubled all numeric values in selection");
    }

    #[tokio::test]
    async fn channel_source_ends_when_senders_drop() {
        let (tx, mut source) = channel(4);

        tx.send(Ok("ab".into())).await.unwrap();
        tx.send(Ok("c".into())).await.unwrap();
        drop(tx);

        assert_eq!(drain(&mut source).await, vec!["ab", "c"]);
    }

    #[tokio::test]
    async fn channel_source_reports_errors() {
        let (tx, mut source) = channel(1);

        tx.send(Err("backend went away".into())).await.unwrap();

        assert!(matches!(
            source.next_chunk().await,
            Err(crate::error::StreamError::Source(message)) if message == "backend went away"
        ));
    }
}
