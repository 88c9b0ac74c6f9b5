// ============================================================================
// Command Layer
// ============================================================================
//
// Commands run inside a CommandContext that the CommandExecutor scopes to
// one transactional session. The transaction boundary belongs here, never
// to the queries that run inside it.
//
// ============================================================================

pub mod context;
pub mod executor;
pub mod session;

pub use context::CommandContext;
pub use executor::{Command, CommandExecutor};
pub use session::{
    LocalSession, LocalSessionFactory, SessionFactory, SessionState, SessionStats,
    StorageResult, TransactionSession,
};
