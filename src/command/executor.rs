use super::{CommandContext, SessionFactory};
use crate::core::{EngineError, Result};
use crate::native::ManagerRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Instrument, Level, event, info_span};

/// A unit of work executed inside its own transactional session.
#[async_trait]
pub trait Command: Send + Sync {
    type Output: Send;

    fn name(&self) -> &'static str;

    async fn execute(&self, ctx: &CommandContext) -> Result<Self::Output>;

    /// Error reported when the command exceeds the statement timeout.
    fn timeout_error(&self, limit: Duration) -> EngineError {
        EngineError::CommandTimeout {
            command: self.name().to_string(),
            limit,
        }
    }
}

/// Runs commands with scoped session acquisition.
///
/// Every command gets a fresh session. It is committed when the command
/// succeeds and rolled back on error or timeout; a rollback failure is
/// logged and the command's own error is returned.
pub struct CommandExecutor {
    managers: Arc<ManagerRegistry>,
    sessions: Arc<dyn SessionFactory>,
    statement_timeout: Option<Duration>,
}

impl CommandExecutor {
    pub fn new(managers: Arc<ManagerRegistry>, sessions: Arc<dyn SessionFactory>) -> Self {
        Self {
            managers,
            sessions,
            statement_timeout: None,
        }
    }

    pub fn with_statement_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.statement_timeout = timeout;
        self
    }

    pub fn statement_timeout(&self) -> Option<Duration> {
        self.statement_timeout
    }

    pub fn managers(&self) -> &Arc<ManagerRegistry> {
        &self.managers
    }

    pub async fn execute<C>(&self, command: &C) -> Result<C::Output>
    where
        C: Command + ?Sized,
    {
        let mut session = self
            .sessions
            .open_session()
            .await
            .map_err(EngineError::Transaction)?;

        let span = info_span!(
            "command.execute",
            command = %command.name(),
            session = %session.id()
        );

        async move {
            let ctx = CommandContext::new(session.id(), Arc::clone(&self.managers));

            let outcome = match self.statement_timeout {
                Some(limit) => match tokio::time::timeout(limit, command.execute(&ctx)).await {
                    Ok(result) => result,
                    Err(_) => {
                        event!(Level::WARN, timeout = ?limit, "command timed out");
                        Err(command.timeout_error(limit))
                    }
                },
                None => command.execute(&ctx).await,
            };

            match outcome {
                Ok(output) => match session.commit().await {
                    Ok(()) => {
                        event!(Level::DEBUG, "command committed");
                        Ok(output)
                    }
                    Err(err) => {
                        event!(Level::ERROR, error = %err, "session commit failed");
                        Err(EngineError::Transaction(err))
                    }
                },
                Err(err) => {
                    if let Err(rollback_err) = session.rollback().await {
                        event!(Level::ERROR, error = %rollback_err, "session rollback failed");
                    }
                    event!(Level::DEBUG, error = %err, "command rolled back");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
