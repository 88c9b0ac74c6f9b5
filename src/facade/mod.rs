pub mod config;
pub mod engine;

pub use config::{ArtifactStrategy, EngineConfig};
pub use engine::{QueryEngine, QueryEngineBuilder};
