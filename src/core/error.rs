use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Operation a query was performing when storage failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryOperation {
    List,
    ListPage,
    Count,
    SingleResult,
}

impl QueryOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::ListPage => "listPage",
            Self::Count => "count",
            Self::SingleResult => "singleResult",
        }
    }
}

impl fmt::Display for QueryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a domain manager or by the session that hosts it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("Malformed statement: {0}")]
    MalformedStatement(String),

    #[error("Missing parameter '{0}'")]
    MissingParameter(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Statement timed out after {0:?}")]
    Timeout(Duration),

    #[error("Storage error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Unknown property '{name}' for query domain '{domain}'")]
    UnknownProperty { domain: String, name: String },

    #[error("Unknown query domain '{0}'")]
    UnknownDomain(String),

    #[error("Native query {operation} on domain '{domain}' failed")]
    QueryExecution {
        domain: String,
        operation: QueryOperation,
        #[source]
        source: StorageError,
    },

    #[error("Invalid query usage: {0}")]
    InvalidQuery(String),

    #[error("Cannot create artifact '{artifact}': {reason}")]
    ArtifactCreation { artifact: String, reason: String },

    #[error("Transaction error: {0}")]
    Transaction(#[source] StorageError),

    #[error("Command '{command}' timed out after {limit:?}")]
    CommandTimeout { command: String, limit: Duration },
}

impl EngineError {
    pub fn unknown_property(domain: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownProperty {
            domain: domain.into(),
            name: name.into(),
        }
    }

    pub fn query_execution(
        domain: impl Into<String>,
        operation: QueryOperation,
        source: StorageError,
    ) -> Self {
        Self::QueryExecution {
            domain: domain.into(),
            operation,
            source,
        }
    }

    pub fn artifact_creation(artifact: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ArtifactCreation {
            artifact: artifact.into(),
            reason: reason.into(),
        }
    }

    /// Storage cause of a failed native query, if this is one.
    pub fn storage_cause(&self) -> Option<&StorageError> {
        match self {
            Self::QueryExecution { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
