//! Lifecycle state machine for the shared chat client.
//!
//! Every transition here happens while the coordinator's state lock is
//! held. Blocking work (client construction, teardown, waiting on a
//! completion signal) always runs outside the lock.

use std::sync::Arc;

use tokio::sync::broadcast;

/// Phase of the shared client lifecycle. Exactly one value holds at any
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// No client exists; startup may begin.
    Idle,
    /// A client is being constructed.
    Starting,
    /// A live client is installed and may be borrowed.
    Started,
    /// A teardown is in flight; late callers join it.
    ShuttingDown,
}

/// Outcome of asking to shut down, decided under the state lock.
pub(crate) enum ShutdownTicket<H> {
    /// This caller won the race: it owns the extracted handle, runs the
    /// teardown, and marks the episode complete.
    Leader { handle: Arc<H> },
    /// Another caller is already tearing down; wait for its signal.
    Follower(broadcast::Receiver<()>),
    /// A startup is still in flight; wait for it to settle, then ask again.
    AwaitStartup(broadcast::Receiver<()>),
    /// Nothing to do, the client is already gone.
    Clear,
}

/// Guarded lifecycle state: the current phase, the client slot, and the
/// per-episode completion channels.
///
/// Invariant: `handle` is `Some` exactly while `state` is `Started`.
pub(crate) struct LifecycleSlot<H> {
    pub(crate) state: LifecycleState,
    pub(crate) handle: Option<Arc<H>>,
    startup_done: Option<broadcast::Sender<()>>,
    shutdown_done: Option<broadcast::Sender<()>>,
}

impl<H> LifecycleSlot<H> {
    pub(crate) fn new() -> Self {
        Self {
            state: LifecycleState::Idle,
            handle: None,
            startup_done: None,
            shutdown_done: None,
        }
    }

    /// Claim the `Idle -> Starting` transition.
    ///
    /// Returns false whenever any other phase holds: a second starter, a
    /// live client, and an in-flight shutdown all observe a busy slot.
    pub(crate) fn try_begin_startup(&mut self) -> bool {
        if self.state != LifecycleState::Idle {
            return false;
        }
        let (tx, _) = broadcast::channel(1);
        self.startup_done = Some(tx);
        self.state = LifecycleState::Starting;
        true
    }

    /// Install a freshly constructed client: `Starting -> Started`.
    pub(crate) fn complete_startup(&mut self, handle: Arc<H>) {
        self.handle = Some(handle);
        self.state = LifecycleState::Started;
        self.notify_startup_settled();
    }

    /// Roll back a failed construction: `Starting -> Idle`.
    pub(crate) fn abort_startup(&mut self) {
        self.handle = None;
        self.state = LifecycleState::Idle;
        self.notify_startup_settled();
    }

    /// Decide this caller's role in a shutdown episode.
    pub(crate) fn begin_shutdown_or_join(&mut self) -> ShutdownTicket<H> {
        match self.state {
            LifecycleState::Idle => ShutdownTicket::Clear,
            LifecycleState::Starting => match &self.startup_done {
                Some(tx) => ShutdownTicket::AwaitStartup(tx.subscribe()),
                None => ShutdownTicket::Clear,
            },
            LifecycleState::Started => match self.handle.take() {
                Some(handle) => {
                    let (tx, _) = broadcast::channel(1);
                    self.shutdown_done = Some(tx);
                    self.state = LifecycleState::ShuttingDown;
                    ShutdownTicket::Leader { handle }
                }
                None => ShutdownTicket::Clear,
            },
            LifecycleState::ShuttingDown => match &self.shutdown_done {
                Some(tx) => ShutdownTicket::Follower(tx.subscribe()),
                None => ShutdownTicket::Clear,
            },
        }
    }

    /// Finish a shutdown episode: `ShuttingDown -> Idle`, waking every
    /// follower. Runs whether or not the teardown itself succeeded.
    pub(crate) fn complete_shutdown(&mut self) {
        self.state = LifecycleState::Idle;
        if let Some(tx) = self.shutdown_done.take() {
            let _ = tx.send(());
        }
    }

    fn notify_startup_settled(&mut self) {
        if let Some(tx) = self.startup_done.take() {
            let _ = tx.send(());
        }
    }
}
