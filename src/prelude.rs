//! Common imports for code that builds on the engine.
//!
//! `use bpm_query_core::prelude::*;` brings in the query vocabulary, native
//! query building blocks and the artifact strategy traits.

pub use crate::artifact::{ArtifactFactory, ArtifactFactoryExt, ArtifactType};
pub use crate::command::{CommandContext, StorageResult};
pub use crate::core::{EngineError, Result, StorageError, Value};
pub use crate::facade::{EngineConfig, QueryEngine};
pub use crate::native::{NativeEntity, NativeQuery, NativeQueryManager, NativeQueryRequest, Page};
pub use crate::query::vocabulary;
pub use crate::query::{Direction, PropertyCatalog, QueryOrdering, QueryProperty};
pub use async_trait::async_trait;
