use super::{ArtifactType, ArtifactTypeRegistry};
use crate::core::{EngineError, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{Level, event};

/// Strategy the engine uses to instantiate types it did not author
/// (listeners, plugins, custom behaviors).
///
/// Implementations must be safe to call from many threads at once.
pub trait ArtifactFactory: Send + Sync {
    /// Produce an instance of the described type.
    ///
    /// The returned box must hold a value of exactly `artifact`'s type.
    fn create_artifact(&self, artifact: &ArtifactType) -> Result<Box<dyn Any + Send>>;

    fn name(&self) -> &'static str;
}

/// Typed helpers over any [`ArtifactFactory`].
pub trait ArtifactFactoryExt: ArtifactFactory {
    fn create<T: Send + 'static>(&self, artifact: &ArtifactType) -> Result<T> {
        if !artifact.is::<T>() {
            return Err(EngineError::artifact_creation(
                artifact.name(),
                format!("descriptor does not describe '{}'", std::any::type_name::<T>()),
            ));
        }

        let instance = self.create_artifact(artifact)?;
        instance.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            EngineError::artifact_creation(
                artifact.name(),
                format!("strategy '{}' produced an instance of another type", self.name()),
            )
        })
    }

    fn create_default<T: Default + Send + 'static>(&self) -> Result<T> {
        self.create(&ArtifactType::of::<T>())
    }

    /// Instantiate a type referenced by name in configuration.
    fn create_by_name<T: Send + 'static>(
        &self,
        types: &ArtifactTypeRegistry,
        name: &str,
    ) -> Result<T> {
        self.create(types.resolve(name)?)
    }
}

impl<F: ArtifactFactory + ?Sized> ArtifactFactoryExt for F {}

/// Direct construction through the type's zero-argument constructor.
///
/// Holds no state, so concurrent calls never contend and every call returns
/// a new instance.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultArtifactFactory;

impl DefaultArtifactFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ArtifactFactory for DefaultArtifactFactory {
    fn create_artifact(&self, artifact: &ArtifactType) -> Result<Box<dyn Any + Send>> {
        let constructor = artifact.constructor().ok_or_else(|| {
            event!(Level::WARN, artifact = %artifact.name(), "artifact has no default constructor");
            EngineError::artifact_creation(artifact.name(), "no zero-argument constructor")
        })?;

        guarded_construct(artifact, constructor)
    }

    fn name(&self) -> &'static str {
        "default"
    }
}

/// Run a constructor, turning a panic into [`EngineError::ArtifactCreation`].
pub(crate) fn guarded_construct<F>(
    artifact: &ArtifactType,
    constructor: F,
) -> Result<Box<dyn Any + Send>>
where
    F: FnOnce() -> Box<dyn Any + Send>,
{
    panic::catch_unwind(AssertUnwindSafe(constructor)).map_err(|payload| {
        let reason = panic_message(payload.as_ref());
        event!(
            Level::WARN,
            artifact = %artifact.name(),
            reason = %reason,
            "artifact constructor panicked"
        );
        EngineError::artifact_creation(
            artifact.name(),
            format!("constructor panicked: {}", reason),
        )
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug)]
    struct Counter {
        hits: u32,
    }

    struct Exploding;

    impl Default for Exploding {
        fn default() -> Self {
            panic!("listener misconfigured")
        }
    }

    #[test]
    fn test_creates_fresh_default_instances() {
        let factory = DefaultArtifactFactory::new();
        let mut first: Counter = factory.create_default().unwrap();
        first.hits += 1;
        let second: Counter = factory.create_default().unwrap();
        assert_eq!(second.hits, 0);
    }

    #[test]
    fn test_panicking_constructor_is_reported() {
        let err = DefaultArtifactFactory
            .create_default::<Exploding>()
            .err()
            .unwrap();
        match err {
            EngineError::ArtifactCreation { reason, .. } => {
                assert!(reason.contains("listener misconfigured"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_descriptor_type_mismatch() {
        let err = DefaultArtifactFactory
            .create::<String>(&ArtifactType::of::<Counter>())
            .unwrap_err();
        assert!(matches!(err, EngineError::ArtifactCreation { .. }));
    }
}
