/// A phase change, as delivered to observers.
pub type PhaseChange = editor_state::ai_edit::Transition;

type Callback = Box<dyn Fn(PhaseChange) + Send + Sync>;

/// Fan-out of phase changes to callbacks and channel subscribers.
///
/// Observers run on the thread that applied the action, after the session
/// lock has been released, so they may query the controller. They must not
/// register further observers.
#[derive(Default)]
pub struct PhaseEvents {
    callbacks: std::sync::Mutex<Vec<Callback>>,
    subscribers: std::sync::Mutex<Vec<crossbeam_channel::Sender<PhaseChange>>>,
}

impl PhaseEvents {
    pub fn on_phase_change<F>(&self, callback: F)
    where
        F: Fn(PhaseChange) + Send + Sync + 'static,
    {
        lock(&self.callbacks).push(Box::new(callback));
    }

    /// Every later change is sent to the returned receiver. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&self) -> crossbeam_channel::Receiver<PhaseChange> {
        let (tx, rx) = crossbeam_channel::unbounded();
        lock(&self.subscribers).push(tx);

        rx
    }

    pub fn emit(&self, change: PhaseChange) {
        if !change.changed() {
            return;
        }

        for callback in lock(&self.callbacks).iter() {
            callback(change);
        }

        lock(&self.subscribers).retain(|tx| tx.send(change).is_ok());
    }
}

impl std::fmt::Debug for PhaseEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseEvents")
            .field("callbacks", &lock(&self.callbacks).len())
            .field("subscribers", &lock(&self.subscribers).len())
            .finish()
    }
}

/// Locks a mutex, ignoring poisoning. The protected data is always left
/// consistent between statements.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
