// ============================================================================
// bpm-query-core
// ============================================================================
//
// Typed query properties per query domain, native (raw statement) queries
// with uniform pagination and counting, and the pluggable strategy the
// engine uses to instantiate host-supplied types.
//
// ============================================================================

pub mod artifact;
pub mod command;
pub mod core;
pub mod facade;
pub mod native;
pub mod prelude;
pub mod query;

pub use artifact::{
    ArtifactFactory, ArtifactFactoryExt, ArtifactType, ArtifactTypeRegistry,
    ContainerArtifactFactory, DefaultArtifactFactory,
};
pub use command::{Command, CommandContext, CommandExecutor, LocalSessionFactory, SessionFactory};
pub use core::{EngineError, QueryOperation, Result, StorageError, Value};
pub use facade::{ArtifactStrategy, EngineConfig, QueryEngine, QueryEngineBuilder};
pub use native::{
    ManagerRegistry, NativeEntity, NativeQuery, NativeQueryManager, NativeQueryRequest, Page,
};
pub use query::{Direction, PropertyCatalog, QueryOrdering, QueryProperty, QueryPropertyRegistry};
