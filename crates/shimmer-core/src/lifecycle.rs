//! Attach/detach lifecycle: cancellation tokens and attach sessions.
//!
//! A widget owns at most one live [`AttachSession`] at a time. Attaching
//! begins a fresh session (new token, next id); detaching cancels the
//! token. In-flight work holds a clone of the token plus the session id it
//! was started under, so a loop that outlives its session can positively
//! detect staleness instead of relying on cancellation timing alone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation handle shared with in-flight work.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a new, un-canceled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }
}

/// Identifier of one attach session, monotonically increasing per widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

impl SessionId {
    /// Create a session ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// One attached-to-the-tree session: a token and its id.
#[derive(Debug, Clone)]
pub struct AttachSession {
    /// Session identifier
    pub id: SessionId,
    /// Cancellation token for work started under this session
    pub token: CancelToken,
}

/// Issues attach sessions with increasing ids.
#[derive(Debug, Default)]
pub struct SessionCounter {
    next: u64,
}

impl SessionCounter {
    /// Create a counter starting at session 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a fresh session with a new token.
    pub fn begin(&mut self) -> AttachSession {
        let id = SessionId::new(self.next);
        self.next += 1;
        AttachSession {
            id,
            token: CancelToken::new(),
        }
    }
}

/// Visibility state of a widget, driven by the host's attach/detach
/// signals. Re-entering `Attached` from `Idle` is an ordinary transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttachState {
    /// Not in the visible tree.
    #[default]
    Idle,
    /// In the visible tree; animation may run.
    Attached,
}

impl AttachState {
    /// Whether the widget is currently attached.
    #[must_use]
    pub fn is_attached(self) -> bool {
        self == Self::Attached
    }
}
