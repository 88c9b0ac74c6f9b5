use super::{QueryProperty, QueryPropertyRegistry};
use crate::core::{EngineError, Result};
use std::collections::HashMap;
use std::sync::Arc;

/// Every query domain's property registry, keyed by domain name.
///
/// Immutable once built: adding a domain returns a new catalog and leaves
/// the old one untouched, so clones are cheap and never need a lock.
#[derive(Debug, Clone, Default)]
pub struct PropertyCatalog {
    registries: Arc<Vec<Arc<QueryPropertyRegistry>>>,
    /// domain -> position in `registries`
    index: Arc<HashMap<String, usize>>,
}

impl PropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a whole domain registry. Fails if the domain already exists.
    pub fn with_domain(self, registry: QueryPropertyRegistry) -> Result<Self> {
        if self.index.contains_key(registry.domain()) {
            return Err(EngineError::Configuration(format!(
                "Query domain '{}' is already registered",
                registry.domain()
            )));
        }

        let mut registries = (*self.registries).clone();
        let mut index = (*self.index).clone();
        index.insert(registry.domain().to_string(), registries.len());
        registries.push(Arc::new(registry));

        Ok(Self {
            registries: Arc::new(registries),
            index: Arc::new(index),
        })
    }

    /// Register a single property, creating the domain on first use.
    ///
    /// The same name may be registered in different domains; within one
    /// domain it must be unique.
    pub fn register(self, domain: &str, name: &str, locator: &str) -> Result<Self> {
        let Some(&position) = self.index.get(domain) else {
            let registry = QueryPropertyRegistry::builder(domain)
                .register(name, locator)?
                .build();
            return self.with_domain(registry);
        };

        let existing = &self.registries[position];
        let mut builder = QueryPropertyRegistry::builder(domain);
        for property in existing.list_properties() {
            builder = builder.register_property(property.clone())?;
        }
        let updated = builder.register(name, locator)?.build();

        let mut registries = (*self.registries).clone();
        registries[position] = Arc::new(updated);

        Ok(Self {
            registries: Arc::new(registries),
            index: self.index,
        })
    }

    pub fn domain(&self, domain: &str) -> Result<&QueryPropertyRegistry> {
        self.index
            .get(domain)
            .map(|&position| self.registries[position].as_ref())
            .ok_or_else(|| EngineError::UnknownDomain(domain.to_string()))
    }

    /// Shared handle to a domain registry.
    pub fn shared_domain(&self, domain: &str) -> Result<Arc<QueryPropertyRegistry>> {
        self.index
            .get(domain)
            .map(|&position| Arc::clone(&self.registries[position]))
            .ok_or_else(|| EngineError::UnknownDomain(domain.to_string()))
    }

    pub fn resolve(&self, domain: &str, name: &str) -> Result<&str> {
        self.domain(domain)?.resolve(name)
    }

    pub fn list_properties(&self, domain: &str) -> Result<&[QueryProperty]> {
        Ok(self.domain(domain)?.list_properties())
    }

    pub fn domain_exists(&self, domain: &str) -> bool {
        self.index.contains_key(domain)
    }

    /// Domain names in the order they were added.
    pub fn list_domains(&self) -> Vec<&str> {
        self.registries.iter().map(|r| r.domain()).collect()
    }
}
