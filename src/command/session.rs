// ============================================================================
// Transactional Sessions
// ============================================================================
//
// A session is the unit of work a command runs in. The command executor
// opens one per command and always ends it: commit on success, rollback on
// any error, timeout, or early drop.
//
// State transitions:
//   Active ──commit──> Committed
//     │
//     └──rollback──> RolledBack
//
// ============================================================================

use crate::core::StorageError;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{Level, event};
use uuid::Uuid;

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Committed,
    RolledBack,
}

impl SessionState {
    pub fn is_active(&self) -> bool {
        matches!(self, SessionState::Active)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }
}

/// Transaction boundary owned by the storage layer.
#[async_trait]
pub trait TransactionSession: Send {
    fn id(&self) -> Uuid;

    fn state(&self) -> SessionState;

    async fn commit(&mut self) -> StorageResult<()>;

    async fn rollback(&mut self) -> StorageResult<()>;
}

/// Opens transactional sessions for the command executor.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open_session(&self) -> StorageResult<Box<dyn TransactionSession>>;
}

/// Commit/rollback counters shared by every session a [`LocalSessionFactory`] opens.
#[derive(Debug, Default)]
pub struct SessionStats {
    opened: AtomicU64,
    committed: AtomicU64,
    rolled_back: AtomicU64,
}

impl SessionStats {
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn committed(&self) -> u64 {
        self.committed.load(Ordering::SeqCst)
    }

    pub fn rolled_back(&self) -> u64 {
        self.rolled_back.load(Ordering::SeqCst)
    }

    /// Sessions opened but not yet ended.
    ///
    /// The counters are read one at a time, so under concurrent commits
    /// this is a snapshot and never underflows.
    pub fn open(&self) -> u64 {
        let ended = self.committed().saturating_add(self.rolled_back());
        self.opened().saturating_sub(ended)
    }
}

/// In-process session with no storage of its own.
///
/// Used when domain managers handle their own storage access and only need
/// a scoped unit of work around each command.
pub struct LocalSession {
    id: Uuid,
    state: SessionState,
    stats: Arc<SessionStats>,
}

impl LocalSession {
    fn new(stats: Arc<SessionStats>) -> Self {
        stats.opened.fetch_add(1, Ordering::SeqCst);
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Active,
            stats,
        }
    }

    fn end(&mut self, next: SessionState) -> StorageResult<()> {
        if !self.state.is_active() {
            return Err(StorageError::Other(format!(
                "Session {} is not active",
                self.id
            )));
        }

        self.state = next;
        match next {
            SessionState::Committed => self.stats.committed.fetch_add(1, Ordering::SeqCst),
            SessionState::RolledBack => self.stats.rolled_back.fetch_add(1, Ordering::SeqCst),
            SessionState::Active => 0,
        };
        Ok(())
    }
}

#[async_trait]
impl TransactionSession for LocalSession {
    fn id(&self) -> Uuid {
        self.id
    }

    fn state(&self) -> SessionState {
        self.state
    }

    async fn commit(&mut self) -> StorageResult<()> {
        self.end(SessionState::Committed)
    }

    async fn rollback(&mut self) -> StorageResult<()> {
        self.end(SessionState::RolledBack)
    }
}

impl Drop for LocalSession {
    fn drop(&mut self) {
        if self.state.is_active() {
            event!(Level::WARN, session = %self.id, "session dropped while active, rolling back");
            let _ = self.end(SessionState::RolledBack);
        }
    }
}

#[derive(Default, Clone)]
pub struct LocalSessionFactory {
    stats: Arc<SessionStats>,
}

impl LocalSessionFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> &Arc<SessionStats> {
        &self.stats
    }
}

#[async_trait]
impl SessionFactory for LocalSessionFactory {
    async fn open_session(&self) -> StorageResult<Box<dyn TransactionSession>> {
        Ok(Box::new(LocalSession::new(Arc::clone(&self.stats))))
    }
}
