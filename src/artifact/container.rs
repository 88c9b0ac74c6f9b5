use super::factory::guarded_construct;
use super::{ArtifactFactory, ArtifactType};
use crate::core::{EngineError, Result};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{Level, event};

type Provider = Arc<dyn Fn() -> Box<dyn Any + Send> + Send + Sync>;

/// Strategy backed by providers registered by the host, the way a
/// dependency-injection container hands out beans.
///
/// Providers are registered before the engine starts; the container is
/// read-only afterwards. Types without a provider go to the fallback
/// strategy when one is configured and fail otherwise.
#[derive(Clone, Default)]
pub struct ContainerArtifactFactory {
    providers: HashMap<TypeId, Provider>,
    fallback: Option<Arc<dyn ArtifactFactory>>,
}

impl ContainerArtifactFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn ArtifactFactory>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// A new instance from `provider` on every request.
    pub fn with_provider<T, F>(mut self, provider: F) -> Self
    where
        T: Send + 'static,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.providers.insert(
            TypeId::of::<T>(),
            Arc::new(move || Box::new(provider()) as Box<dyn Any + Send>),
        );
        self
    }

    /// A clone of `instance` on every request.
    ///
    /// Register an `Arc<X>` to have every caller share one `X`.
    pub fn with_singleton<T>(mut self, instance: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.providers.insert(
            TypeId::of::<T>(),
            Arc::new(move || Box::new(instance.clone()) as Box<dyn Any + Send>),
        );
        self
    }

    pub fn provides(&self, artifact: &ArtifactType) -> bool {
        self.providers.contains_key(&artifact.type_id())
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

impl ArtifactFactory for ContainerArtifactFactory {
    fn create_artifact(&self, artifact: &ArtifactType) -> Result<Box<dyn Any + Send>> {
        if let Some(provider) = self.providers.get(&artifact.type_id()) {
            return guarded_construct(artifact, || provider());
        }

        match &self.fallback {
            Some(fallback) => {
                event!(
                    Level::DEBUG,
                    artifact = %artifact.name(),
                    fallback = %fallback.name(),
                    "no container provider, using fallback strategy"
                );
                fallback.create_artifact(artifact)
            }
            None => {
                event!(Level::WARN, artifact = %artifact.name(), "no container provider");
                Err(EngineError::artifact_creation(
                    artifact.name(),
                    "no provider registered in container",
                ))
            }
        }
    }

    fn name(&self) -> &'static str {
        "container"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactFactoryExt, DefaultArtifactFactory};

    struct MailSender {
        host: String,
    }

    #[derive(Default)]
    struct NoopListener;

    #[test]
    fn test_provider_builds_types_without_default() {
        let container = ContainerArtifactFactory::new().with_provider(|| MailSender {
            host: "smtp.local".into(),
        });
        let sender: MailSender = container
            .create(&ArtifactType::opaque::<MailSender>())
            .ok()
            .unwrap();
        assert_eq!(sender.host, "smtp.local");
    }

    #[test]
    fn test_singleton_shares_instance() {
        let shared = Arc::new(NoopListener);
        let container = ContainerArtifactFactory::new().with_singleton(Arc::clone(&shared));

        let a: Arc<NoopListener> = container
            .create(&ArtifactType::opaque::<Arc<NoopListener>>())
            .ok()
            .unwrap();
        assert!(Arc::ptr_eq(&a, &shared));
    }

    #[test]
    fn test_fallback_and_missing_provider() {
        let strict = ContainerArtifactFactory::new();
        assert!(matches!(
            strict.create_default::<NoopListener>(),
            Err(EngineError::ArtifactCreation { .. })
        ));

        let lenient =
            ContainerArtifactFactory::new().with_fallback(Arc::new(DefaultArtifactFactory));
        assert!(lenient.create_default::<NoopListener>().is_ok());
    }
}
