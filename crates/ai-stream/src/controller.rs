use std::ops::AddAssign;

/// How a call to [`StreamingEditController::start_edit`] ended.
#[derive(Debug)]
pub enum EditOutcome {
    /// Another edit was in flight, or the last one is still on display.
    /// Nothing changed.
    Rejected,
    /// All text was written. `removed_leftover` old chars were deleted after it.
    Completed { inserted: u64, removed_leftover: u64 },
    /// Stopped by [`StreamingEditController::cancel_edit`]. The text written
    /// so far stays in the document.
    Cancelled { inserted: u64 },
    /// The edit could not start or could not continue. The session is back
    /// to idle; partial text stays in the document.
    Failed(crate::error::StreamError),
}

/// Runs AI edits against one document, one at a time.
///
/// The controller is a cheap handle: clones share the same session, so one
/// clone can run [`StreamingEditController::start_edit`] in a task while
/// another cancels it or queries the phase.
pub struct StreamingEditController<D: editor_state::host::HostDocument> {
    shared: std::sync::Arc<Shared<D>>,
}

impl<D: editor_state::host::HostDocument> Clone for StreamingEditController<D> {
    fn clone(&self) -> Self {
        Self {
            shared: std::sync::Arc::clone(&self.shared),
        }
    }
}

struct Shared<D: editor_state::host::HostDocument> {
    session: std::sync::Mutex<editor_state::session::EditSession<D>>,
    config: crate::config::StreamingConfig,
    /// Set for the lifetime of one `start_edit` call.
    in_flight: std::sync::atomic::AtomicBool,
    /// Token of the current (or last) edit.
    cancel: std::sync::Mutex<tokio_util::sync::CancellationToken>,
    /// Pending done → idle reset.
    reset_task: std::sync::Mutex<Option<tokio::task::JoinHandle<()>>>,
    events: crate::events::PhaseEvents,
}

/*

===========================
========= SESSION =========
===========================

*/

impl<D: editor_state::host::HostDocument> Shared<D> {
    fn dispatch(
        &self,
        action: &editor_state::ai_edit::AiEditAction,
    ) -> Result<editor_state::ai_edit::Transition, editor_state::session::SessionError> {
        let transition = crate::events::lock(&self.session).dispatch(action)?;
        self.events.emit(transition);

        Ok(transition)
    }

    /// Like `dispatch`, but checks the token under the session lock so a
    /// cancel that already happened can never be followed by another step.
    /// Returns `None` when cancelled.
    fn step(
        &self,
        token: &tokio_util::sync::CancellationToken,
        action: &editor_state::ai_edit::AiEditAction,
    ) -> Result<Option<editor_state::ai_edit::Transition>, editor_state::session::SessionError> {
        let transition = {
            let mut session = crate::events::lock(&self.session);

            if token.is_cancelled() {
                return Ok(None);
            }

            session.dispatch(action)?
        };
        self.events.emit(transition);

        Ok(Some(transition))
    }

    fn remove_leftover(
        &self,
        token: &tokio_util::sync::CancellationToken,
    ) -> Result<Option<u64>, editor_state::session::SessionError> {
        let mut session = crate::events::lock(&self.session);

        if token.is_cancelled() {
            return Ok(None);
        }

        session.delete_remaining_old_text().map(Some)
    }

    /// Back to idle. Never fails.
    fn reset(&self) {
        match self.dispatch(&editor_state::ai_edit::AiEditAction::Cancel) {
            Ok(_) => {}
            Err(err) => tracing::warn!(%err, "cancel was refused"),
        }
    }

    fn abort_reset_task(&self) {
        if let Some(handle) = crate::events::lock(&self.reset_task).take() {
            handle.abort();
        }
    }
}

/// Clears the in-flight flag when `start_edit` returns or is dropped. A
/// dropped edit is cancelled so the session never stays mid-stream.
struct InFlight<'a, D: editor_state::host::HostDocument> {
    shared: &'a Shared<D>,
    live: bool,
}

impl<D: editor_state::host::HostDocument> Drop for InFlight<'_, D> {
    fn drop(&mut self) {
        if self.live {
            tracing::debug!("edit dropped mid-stream, cancelling");
            crate::events::lock(&self.shared.cancel).cancel();
            self.shared.reset();
        }

        self.shared
            .in_flight
            .store(false, std::sync::atomic::Ordering::Release);
    }
}

/*

===========================
========= GETTERS =========
===========================

*/

impl<D: editor_state::host::HostDocument + Send + 'static> StreamingEditController<D> {
    pub fn new(document: D, config: crate::config::StreamingConfig) -> Self {
        Self {
            shared: std::sync::Arc::new(Shared {
                session: std::sync::Mutex::new(editor_state::session::EditSession::new(document)),
                config,
                in_flight: std::sync::atomic::AtomicBool::new(false),
                cancel: std::sync::Mutex::new(tokio_util::sync::CancellationToken::new()),
                reset_task: std::sync::Mutex::new(None),
                events: crate::events::PhaseEvents::default(),
            }),
        }
    }

    pub fn phase(&self) -> editor_state::ai_edit::AiEditPhase {
        crate::events::lock(&self.shared.session).phase()
    }

    /// True while a `start_edit` call is running.
    pub fn is_editing(&self) -> bool {
        self.shared
            .in_flight
            .load(std::sync::atomic::Ordering::Acquire)
    }

    pub fn config(&self) -> &crate::config::StreamingConfig {
        &self.shared.config
    }

    /// Calls `callback` after every phase change.
    pub fn on_phase_change<F>(&self, callback: F)
    where
        F: Fn(crate::events::PhaseChange) + Send + Sync + 'static,
    {
        self.shared.events.on_phase_change(callback);
    }

    pub fn subscribe(&self) -> crossbeam_channel::Receiver<crate::events::PhaseChange> {
        self.shared.events.subscribe()
    }

    /// Read access to the session. The session is locked while `f` runs.
    pub fn with_session<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&editor_state::session::EditSession<D>) -> R,
    {
        f(&crate::events::lock(&self.shared.session))
    }

    /// Applies an edit from outside the AI stream; the tracked range follows it.
    pub fn edit_document<F>(
        &self,
        edit: F,
    ) -> Result<editor_core::mapping::Mutation, editor_state::session::SessionError>
    where
        F: FnOnce(
            &mut D,
        ) -> Result<editor_core::mapping::Mutation, editor_state::host::DocumentError>,
    {
        crate::events::lock(&self.shared.session).edit_document(edit)
    }
}

/*

==========================
========= EDITS ==========
==========================

*/

impl<D: editor_state::host::HostDocument + Send + 'static> StreamingEditController<D> {
    /// Replaces `[from, to)` with the text `source` delivers.
    ///
    /// 1. highlight the range, wait `highlight_delay`
    /// 2. start streaming, wait `stream_start_delay`
    /// 3. write each chunk, then pause per the pacing
    /// 4. delete old text the new text did not cover, finish
    /// 5. reset to idle after `done_display`
    ///
    /// Every wait races the edit's cancellation token.
    pub async fn start_edit<S: crate::source::TextSource>(
        &self,
        from: u64,
        to: u64,
        source: S,
    ) -> EditOutcome {
        // 1. At most one edit per controller. The flag is published under the
        //    lock `cancel_edit` takes, together with the fresh token, so a
        //    concurrent cancel either precedes this edit or reaches its token.
        let token = tokio_util::sync::CancellationToken::new();
        let mut guard = {
            let mut current = crate::events::lock(&self.shared.cancel);

            if self
                .shared
                .in_flight
                .compare_exchange(
                    false,
                    true,
                    std::sync::atomic::Ordering::AcqRel,
                    std::sync::atomic::Ordering::Acquire,
                )
                .is_err()
            {
                tracing::debug!(from, to, "edit already in flight, start rejected");

                return EditOutcome::Rejected;
            }

            let guard = InFlight {
                shared: &self.shared,
                live: false,
            };

            let phase = self.phase();
            if phase != editor_state::ai_edit::AiEditPhase::Idle {
                tracing::debug!(%phase, "previous edit still on display, start rejected");

                return EditOutcome::Rejected;
            }

            *current = token.clone();

            guard
        };

        // 2. Highlight.
        if let Err(err) = self
            .shared
            .dispatch(&editor_state::ai_edit::AiEditAction::StartHighlight { from, to })
        {
            tracing::debug!(%err, "edit did not start");

            return EditOutcome::Failed(err.into());
        }

        guard.live = true;
        tracing::info!(from, to, "ai edit started");

        let mut inserted = 0;
        let result = self.stream(&token, source, &mut inserted).await;

        guard.live = false;

        match result {
            Ok(Some(removed_leftover)) => {
                tracing::info!(inserted, removed_leftover, "ai edit completed");
                self.schedule_reset(token);

                EditOutcome::Completed {
                    inserted,
                    removed_leftover,
                }
            }
            Ok(None) => {
                self.shared.reset();
                tracing::info!(inserted, "ai edit cancelled");

                EditOutcome::Cancelled { inserted }
            }
            // A step refused because a cancel got in first.
            Err(_) if token.is_cancelled() => {
                self.shared.reset();
                tracing::info!(inserted, "ai edit cancelled");

                EditOutcome::Cancelled { inserted }
            }
            Err(err) => {
                tracing::warn!(%err, inserted, "ai edit aborted");
                token.cancel();
                self.shared.reset();

                EditOutcome::Failed(err)
            }
        }
    }

    /// Stops the current edit at its next suspension point and returns the
    /// session to idle right away. Text already written stays. Safe to call
    /// in any phase.
    pub fn cancel_edit(&self) {
        crate::events::lock(&self.shared.cancel).cancel();
        self.shared.abort_reset_task();
        self.shared.reset();

        tracing::debug!("cancel requested");
    }

    /// Steps 1 to 4 after the highlight. `Ok(None)` means cancelled.
    async fn stream<S: crate::source::TextSource>(
        &self,
        token: &tokio_util::sync::CancellationToken,
        mut source: S,
        inserted: &mut u64,
    ) -> Result<Option<u64>, crate::error::StreamError> {
        let config = &self.shared.config;

        if !pause(token, config.highlight_delay).await {
            return Ok(None);
        }

        if self
            .shared
            .step(token, &editor_state::ai_edit::AiEditAction::StartStreaming)?
            .is_none()
        {
            return Ok(None);
        }

        if !pause(token, config.stream_start_delay).await {
            return Ok(None);
        }

        loop {
            let next = tokio::select! {
                biased;
                () = token.cancelled() => return Ok(None),
                next = source.next_chunk() => next?,
            };

            let Some(text) = next else {
                break;
            };

            let delay = config.pacing.delay_for(&text);
            let len = <usize as TryInto<u64>>::try_into(text.chars().count()).unwrap_or(u64::MAX);

            if self
                .shared
                .step(token, &editor_state::ai_edit::AiEditAction::InsertChar { text })?
                .is_none()
            {
                return Ok(None);
            }

            inserted.add_assign(len);

            if !pause(token, delay).await {
                return Ok(None);
            }
        }

        let Some(removed) = self.shared.remove_leftover(token)? else {
            return Ok(None);
        };

        if self
            .shared
            .step(token, &editor_state::ai_edit::AiEditAction::Finish)?
            .is_none()
        {
            return Ok(None);
        }

        Ok(Some(removed))
    }

    fn schedule_reset(&self, token: tokio_util::sync::CancellationToken) {
        let shared = std::sync::Arc::clone(&self.shared);
        let delay = self.shared.config.done_display;

        let handle = tokio::spawn(async move {
            tokio::select! {
                biased;
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    tracing::debug!("done display elapsed");
                    shared.reset();
                }
            }
        });

        if let Some(previous) = crate::events::lock(&self.shared.reset_task).replace(handle) {
            previous.abort();
        }
    }
}

/// Waits `delay` unless cancelled first. Returns `false` when cancelled.
/// A zero delay still yields once so other tasks (a cancel, say) can run.
async fn pause(token: &tokio_util::sync::CancellationToken, delay: std::time::Duration) -> bool {
    if delay.is_zero() {
        tokio::task::yield_now().await;

        return !token.is_cancelled();
    }

    tokio::select! {
        biased;
        () = token.cancelled() => false,
        () = tokio::time::sleep(delay) => true,
    }
}

#[cfg(test)]
mod controller_tests {
    use super::*;
    use crate::config::StreamingConfig;
    use crate::pacing::Pacing;
    use crate::source::StaticSource;
    use editor_state::ai_edit::AiEditPhase;
    use editor_state::document::Document;
    use editor_state::host::{DocumentError, HostDocument};
    use std::time::Duration;

    const HIGHLIGHT: Duration = Duration::from_millis(600);
    const START: Duration = Duration::from_millis(200);
    const DONE: Duration = Duration::from_millis(2000);
    const TICK: Duration = Duration::from_millis(10);

    fn config() -> StreamingConfig {
        StreamingConfig {
            pacing: Pacing::Fixed(TICK),
            ..StreamingConfig::default()
        }
    }

    fn controller(text: &str) -> StreamingEditController<Document> {
        StreamingEditController::new(Document::from_text(text).unwrap(), config())
    }

    fn text<D>(controller: &StreamingEditController<D>) -> String
    where
        D: HostDocument + std::fmt::Display + Send + 'static,
    {
        controller.with_session(|session| session.document().to_string())
    }

    async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[tokio::test(start_paused = true)]
    async fn full_edit_cycle() {
        let controller = controller("the quick fox");
        let events = controller.subscribe();

        let outcome = controller.start_edit(4, 9, StaticSource::new("slow")).await;

        assert!(matches!(
            outcome,
            EditOutcome::Completed {
                inserted: 4,
                removed_leftover: 1
            }
        ));
        assert_eq!(text(&controller), "the slow fox");
        assert_eq!(controller.phase(), AiEditPhase::Done);
        assert!(!controller.is_editing());

        sleep(DONE + TICK).await;

        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert_eq!(text(&controller), "the slow fox");

        let phases: Vec<_> = events.try_iter().map(|c| (c.previous, c.current)).collect();
        assert_eq!(
            phases,
            vec![
                (AiEditPhase::Idle, AiEditPhase::Highlight),
                (AiEditPhase::Highlight, AiEditPhase::Streaming),
                (AiEditPhase::Streaming, AiEditPhase::Done),
                (AiEditPhase::Done, AiEditPhase::Idle),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn highlight_is_shown_before_streaming() {
        let controller = controller("0123456789");
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.start_edit(2, 5, StaticSource::new("abc")).await }
        });

        sleep(HIGHLIGHT - Duration::from_millis(1)).await;
        assert_eq!(controller.phase(), AiEditPhase::Highlight);
        assert_eq!(text(&controller), "0123456789");

        sleep(Duration::from_millis(2)).await;
        assert_eq!(controller.phase(), AiEditPhase::Streaming);
        // The first chunk waits for the stream start delay.
        assert_eq!(text(&controller), "0123456789");

        assert!(matches!(task.await.unwrap(), EditOutcome::Completed { .. }));
        assert_eq!(text(&controller), "01abc56789");
    }

    #[tokio::test(start_paused = true)]
    async fn second_start_is_rejected_while_in_flight() {
        let controller = controller("hello world");
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.start_edit(0, 5, StaticSource::new("HELLO")).await }
        });

        sleep(HIGHLIGHT + START + TICK).await;
        let phase = controller.phase();
        let before = text(&controller);

        let second = controller.start_edit(6, 11, StaticSource::new("there")).await;

        assert!(matches!(second, EditOutcome::Rejected));
        assert_eq!(controller.phase(), phase);
        assert_eq!(text(&controller), before);

        assert!(matches!(task.await.unwrap(), EditOutcome::Completed { inserted: 5, .. }));
        assert_eq!(text(&controller), "HELLO world");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn in_flight_is_published_with_the_new_token() {
        let document = Document::from_text("abc").unwrap();
        let controller = StreamingEditController::new(document, StreamingConfig::instant());

        // While the token slot is held, a starting edit must not look in flight:
        // a cancel arriving then would hit the previous edit's token.
        let held = crate::events::lock(&controller.shared.cancel);
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.start_edit(0, 3, StaticSource::new("xyz")).await }
        });
        std::thread::sleep(Duration::from_millis(50));

        assert!(!controller.is_editing());
        assert_eq!(controller.phase(), AiEditPhase::Idle);
        drop(held);

        assert!(matches!(task.await.unwrap(), EditOutcome::Completed { inserted: 3, .. }));
        assert_eq!(text(&controller), "xyz");
    }

    #[tokio::test(start_paused = true)]
    async fn start_during_done_display_is_rejected() {
        let controller = controller("abc");

        controller.start_edit(0, 1, StaticSource::new("x")).await;
        assert_eq!(controller.phase(), AiEditPhase::Done);

        let outcome = controller.start_edit(1, 2, StaticSource::new("y")).await;

        assert!(matches!(outcome, EditOutcome::Rejected));
        assert_eq!(text(&controller), "xbc");

        sleep(DONE + TICK).await;
        assert!(matches!(
            controller.start_edit(1, 2, StaticSource::new("y")).await,
            EditOutcome::Completed { .. }
        ));
        assert_eq!(text(&controller), "xyc");
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_stream_keeps_partial_text() {
        let controller = controller("0123456789");
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.start_edit(0, 10, StaticSource::new("abcdefgh")).await }
        });

        // Chunks land at 800, 810 and 820 ms.
        sleep(HIGHLIGHT + START + Duration::from_millis(25)).await;
        controller.cancel_edit();

        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert!(matches!(task.await.unwrap(), EditOutcome::Cancelled { inserted: 3 }));
        assert_eq!(text(&controller), "abc3456789");
        assert!(!controller.is_editing());
        assert!(controller.with_session(|s| s.document().decorations().is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_highlight() {
        let controller = controller("keep me");
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.start_edit(0, 4, StaticSource::new("lose")).await }
        });

        sleep(Duration::from_millis(300)).await;
        controller.cancel_edit();

        assert!(matches!(task.await.unwrap(), EditOutcome::Cancelled { inserted: 0 }));
        assert_eq!(text(&controller), "keep me");
        assert_eq!(controller.phase(), AiEditPhase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_done_resets_immediately() {
        let controller = controller("abc");
        let events = controller.subscribe();

        controller.start_edit(0, 3, StaticSource::new("xyz")).await;
        controller.cancel_edit();

        assert_eq!(controller.phase(), AiEditPhase::Idle);

        // The aborted reset timer must not fire a second reset.
        sleep(DONE + TICK).await;
        let resets = events
            .try_iter()
            .filter(|c| c.current == AiEditPhase::Idle)
            .count();
        assert_eq!(resets, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_when_idle_is_harmless() {
        let controller = controller("abc");

        controller.cancel_edit();
        controller.cancel_edit();

        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert!(matches!(
            controller.start_edit(0, 0, StaticSource::new("!")).await,
            EditOutcome::Completed { inserted: 1, .. }
        ));
        assert_eq!(text(&controller), "!abc");
    }

    #[tokio::test(start_paused = true)]
    async fn empty_selection_inserts() {
        let controller = controller("0123456789");

        let outcome = controller.start_edit(5, 5, StaticSource::new("hi")).await;

        assert!(matches!(
            outcome,
            EditOutcome::Completed {
                inserted: 2,
                removed_leftover: 0
            }
        ));
        assert_eq!(text(&controller), "01234hi56789");
        controller.with_session(|session| {
            assert_eq!(session.state().insert_pos(), 7);
            assert_eq!(session.state().inserted_len(), 2);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_range_does_not_start() {
        let controller = controller("short");

        let outcome = controller.start_edit(4, 2, StaticSource::new("x")).await;

        assert!(matches!(outcome, EditOutcome::Failed(_)));
        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert!(!controller.is_editing());

        let outcome = controller.start_edit(0, 99, StaticSource::new("x")).await;
        assert!(matches!(outcome, EditOutcome::Failed(_)));
        assert_eq!(text(&controller), "short");
    }

    #[tokio::test(start_paused = true)]
    async fn source_error_aborts_edit() {
        let controller = controller("abcdef");
        let (tx, source) = crate::source::channel(4);

        tx.send(Ok("X".into())).await.unwrap();
        tx.send(Err("backend went away".into())).await.unwrap();

        let outcome = controller.start_edit(0, 3, source).await;

        assert!(matches!(
            outcome,
            EditOutcome::Failed(crate::error::StreamError::Source(_))
        ));
        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert_eq!(text(&controller), "Xbcdef");
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_edit_is_cancelled() {
        let controller = controller("0123456789");
        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.start_edit(0, 5, StaticSource::new("abcde")).await }
        });

        sleep(HIGHLIGHT + START + TICK).await;
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());

        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert!(!controller.is_editing());
    }

    #[tokio::test(start_paused = true)]
    async fn observers_may_query_the_controller() {
        let controller = controller("abc");
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));

        controller.on_phase_change({
            let controller = controller.clone();
            let seen = std::sync::Arc::clone(&seen);
            move |change| {
                assert_eq!(controller.phase(), change.current);
                seen.lock().unwrap().push(change.current);
            }
        });

        controller.start_edit(0, 1, StaticSource::new("z")).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![AiEditPhase::Highlight, AiEditPhase::Streaming, AiEditPhase::Done]
        );
    }

    /// A document whose `replace_range` starts failing after `budget` calls.
    struct FlakyDocument {
        inner: Document,
        budget: usize,
    }

    impl std::fmt::Display for FlakyDocument {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            std::fmt::Display::fmt(&self.inner, f)
        }
    }

    impl HostDocument for FlakyDocument {
        fn current_selection(&self) -> editor_core::mapping::EditRange {
            self.inner.current_selection()
        }

        fn len(&self) -> u64 {
            self.inner.len()
        }

        fn text_between(&self, from: u64, to: u64) -> Result<String, DocumentError> {
            self.inner.text_between(from, to)
        }

        fn replace_range(
            &mut self,
            from: u64,
            to: u64,
            text: &str,
        ) -> Result<editor_core::mapping::Mutation, DocumentError> {
            if self.budget == 0 {
                return Err(DocumentError::OutOfBounds {
                    pos: to,
                    len: self.inner.len(),
                });
            }

            self.budget -= 1;
            self.inner.replace_range(from, to, text)
        }

        fn insert_at(
            &mut self,
            pos: u64,
            text: &str,
        ) -> Result<editor_core::mapping::Mutation, DocumentError> {
            self.inner.insert_at(pos, text)
        }

        fn delete_range(
            &mut self,
            from: u64,
            to: u64,
        ) -> Result<editor_core::mapping::Mutation, DocumentError> {
            self.inner.delete_range(from, to)
        }

        fn map_position_through_last_mutation(&self, pos: u64) -> u64 {
            self.inner.map_position_through_last_mutation(pos)
        }

        fn render_decorations(&mut self, spans: &[editor_state::decoration::DecorationSpan]) {
            self.inner.render_decorations(spans);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn document_failure_aborts_edit() {
        let document = FlakyDocument {
            inner: Document::from_text("abcdef").unwrap(),
            budget: 2,
        };
        let controller = StreamingEditController::new(document, StreamingConfig::instant());

        let outcome = controller.start_edit(0, 6, StaticSource::new("uvwxyz")).await;

        assert!(matches!(
            outcome,
            EditOutcome::Failed(crate::error::StreamError::Session(
                editor_state::session::SessionError::Document(DocumentError::OutOfBounds { .. })
            ))
        ));
        assert_eq!(controller.phase(), AiEditPhase::Idle);
        assert_eq!(text(&controller), "uvcdef");
        assert!(!controller.is_editing());
    }
}
