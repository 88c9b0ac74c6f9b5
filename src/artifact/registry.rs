use super::ArtifactType;
use crate::core::{EngineError, Result};
use std::collections::HashMap;

/// Maps type names used in configuration and deployed definitions to
/// artifact descriptors.
#[derive(Debug, Clone, Default)]
pub struct ArtifactTypeRegistry {
    types: HashMap<&'static str, ArtifactType>,
}

impl ArtifactTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, artifact: ArtifactType) -> Result<Self> {
        if self.types.contains_key(artifact.name()) {
            return Err(EngineError::Configuration(format!(
                "Artifact type '{}' is already registered",
                artifact.name()
            )));
        }

        self.types.insert(artifact.name(), artifact);
        Ok(self)
    }

    /// Descriptor for `name`; an unknown name fails like any other
    /// construction failure.
    pub fn resolve(&self, name: &str) -> Result<&ArtifactType> {
        self.types
            .get(name)
            .ok_or_else(|| EngineError::artifact_creation(name, "unknown artifact type"))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
