use super::config::{ArtifactStrategy, EngineConfig};
use crate::artifact::{ArtifactFactory, ContainerArtifactFactory, DefaultArtifactFactory};
use crate::command::{Command, CommandExecutor, LocalSessionFactory, SessionFactory};
use crate::core::{EngineError, Result};
use crate::native::{ManagerRegistry, NativeEntity, NativeQuery};
use crate::query::{PropertyCatalog, QueryProperty};
use std::sync::Arc;
use tracing::{Level, event};

/// Entry point tying the query vocabulary, native query execution and the
/// artifact strategy together.
///
/// # Examples
///
/// ```
/// use bpm_query_core::{EngineConfig, QueryEngine};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let engine = QueryEngine::builder(EngineConfig::new()).build()?;
/// assert_eq!(engine.resolve_property("externalTask", "PRIORITY")?, "PRIORITY_");
/// # Ok(())
/// # }
/// ```
pub struct QueryEngine {
    config: EngineConfig,
    catalog: PropertyCatalog,
    executor: Arc<CommandExecutor>,
    artifacts: Arc<dyn ArtifactFactory>,
}

impl QueryEngine {
    pub fn builder(config: EngineConfig) -> QueryEngineBuilder {
        QueryEngineBuilder::new(config)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &PropertyCatalog {
        &self.catalog
    }

    pub fn command_executor(&self) -> &Arc<CommandExecutor> {
        &self.executor
    }

    pub fn artifact_factory(&self) -> &Arc<dyn ArtifactFactory> {
        &self.artifacts
    }

    pub fn create_native_query<T: NativeEntity>(&self) -> NativeQuery<T> {
        NativeQuery::new(Arc::clone(&self.executor))
    }

    pub fn resolve_property(&self, domain: &str, name: &str) -> Result<&str> {
        self.catalog.resolve(domain, name)
    }

    pub fn list_properties(&self, domain: &str) -> Result<&[QueryProperty]> {
        self.catalog.list_properties(domain)
    }

    pub async fn execute<C: Command>(&self, command: &C) -> Result<C::Output> {
        self.executor.execute(command).await
    }
}

pub struct QueryEngineBuilder {
    config: EngineConfig,
    catalog: Option<PropertyCatalog>,
    managers: ManagerRegistry,
    sessions: Option<Arc<dyn SessionFactory>>,
    container: Option<ContainerArtifactFactory>,
    artifact_factory: Option<Arc<dyn ArtifactFactory>>,
}

impl QueryEngineBuilder {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            catalog: None,
            managers: ManagerRegistry::new(),
            sessions: None,
            container: None,
            artifact_factory: None,
        }
    }

    /// Use `catalog` instead of the built-in domains.
    pub fn catalog(mut self, catalog: PropertyCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn managers(mut self, managers: ManagerRegistry) -> Self {
        self.managers = managers;
        self
    }

    pub fn session_factory(mut self, sessions: Arc<dyn SessionFactory>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Providers for the `container` artifact strategy. `build` fails if
    /// the configured strategy would leave them unused.
    pub fn container(mut self, container: ContainerArtifactFactory) -> Self {
        self.container = Some(container);
        self
    }

    /// Replace the artifact strategy outright, ignoring `artifact_strategy`.
    pub fn artifact_factory(mut self, factory: Arc<dyn ArtifactFactory>) -> Self {
        self.artifact_factory = Some(factory);
        self
    }

    pub fn build(self) -> Result<QueryEngine> {
        self.config.validate()?;

        let artifacts = match (self.artifact_factory, self.container) {
            (Some(_), Some(_)) => {
                event!(Level::ERROR, "container supplied alongside an explicit artifact factory");
                return Err(EngineError::Configuration(
                    "A container was supplied but an explicit artifact factory replaces it".into(),
                ));
            }
            (Some(factory), None) => factory,
            (None, container) => artifact_factory_for(&self.config, container)?,
        };

        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(LocalSessionFactory::new()));
        let executor = CommandExecutor::new(Arc::new(self.managers), sessions)
            .with_statement_timeout(self.config.statement_timeout());
        let catalog = self
            .catalog
            .unwrap_or_else(|| PropertyCatalog::builtin().clone());

        event!(
            Level::INFO,
            domains = catalog.list_domains().len(),
            artifact_strategy = %artifacts.name(),
            statement_timeout_ms = ?self.config.statement_timeout_ms,
            "query engine built"
        );

        Ok(QueryEngine {
            config: self.config,
            catalog,
            executor: Arc::new(executor),
            artifacts,
        })
    }
}

fn artifact_factory_for(
    config: &EngineConfig,
    container: Option<ContainerArtifactFactory>,
) -> Result<Arc<dyn ArtifactFactory>> {
    match config.artifact_strategy {
        ArtifactStrategy::Default if container.is_some() => {
            event!(Level::ERROR, "container supplied but artifact strategy is 'default'");
            Err(EngineError::Configuration(
                "A container was supplied but artifact_strategy is 'default'; \
                 set it to 'container' to use it"
                    .into(),
            ))
        }
        ArtifactStrategy::Default => Ok(Arc::new(DefaultArtifactFactory::new())),
        ArtifactStrategy::Container => {
            let container = container.ok_or_else(|| {
                EngineError::Configuration(
                    "Artifact strategy 'container' needs a container to be supplied".into(),
                )
            })?;
            let container = if config.container_fallback && !container.has_fallback() {
                container.with_fallback(Arc::new(DefaultArtifactFactory::new()))
            } else {
                container
            };
            Ok(Arc::new(container))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_uses_builtin_catalog() {
        let engine = QueryEngine::builder(EngineConfig::new()).build().unwrap();
        assert_eq!(engine.artifact_factory().name(), "default");
        assert_eq!(
            engine.catalog().list_domains(),
            PropertyCatalog::builtin().list_domains()
        );
        assert!(engine.command_executor().statement_timeout().is_none());
    }

    #[test]
    fn test_container_strategy_requires_container() {
        let config = EngineConfig::new().artifact_strategy(ArtifactStrategy::Container);
        assert!(matches!(
            QueryEngine::builder(config.clone()).build(),
            Err(EngineError::Configuration(_))
        ));

        let engine = QueryEngine::builder(config)
            .container(ContainerArtifactFactory::new())
            .build()
            .unwrap();
        assert_eq!(engine.artifact_factory().name(), "container");
    }

    #[test]
    fn test_unused_container_is_rejected() {
        let err = QueryEngine::builder(EngineConfig::new())
            .container(ContainerArtifactFactory::new())
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::Configuration(ref m) if m.contains("'default'")));

        let err = QueryEngine::builder(EngineConfig::new())
            .container(ContainerArtifactFactory::new())
            .artifact_factory(Arc::new(DefaultArtifactFactory::new()))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = PropertyCatalog::new()
            .register("deployment", "NAME", "NAME_")
            .unwrap();
        let engine = QueryEngine::builder(EngineConfig::new())
            .catalog(catalog)
            .build()
            .unwrap();
        assert_eq!(engine.resolve_property("deployment", "NAME").unwrap(), "NAME_");
        assert!(matches!(
            engine.resolve_property("externalTask", "ID"),
            Err(EngineError::UnknownDomain(_))
        ));
    }
}
