use super::QueryProperty;
use crate::core::{EngineError, Result};
use std::collections::HashMap;
use tracing::{Level, event};

/// Closed, ordered vocabulary of query properties for one query domain.
///
/// Built once through [`RegistryBuilder`] and read-only afterwards, so it can
/// be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct QueryPropertyRegistry {
    domain: String,
    properties: Vec<QueryProperty>,
    /// name -> position in `properties`
    index: HashMap<String, usize>,
}

impl QueryPropertyRegistry {
    pub fn builder(domain: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder::new(domain)
    }

    /// Build a registry from `(name, locator)` pairs in the given order.
    pub fn from_pairs<'a, I>(domain: impl Into<String>, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut builder = Self::builder(domain);
        for (name, locator) in pairs {
            builder = builder.register(name, locator)?;
        }
        Ok(builder.build())
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Look up a property by its logical name. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Result<&QueryProperty> {
        self.index
            .get(name)
            .map(|&position| &self.properties[position])
            .ok_or_else(|| EngineError::unknown_property(&self.domain, name))
    }

    /// Physical locator for a logical property name.
    pub fn resolve(&self, name: &str) -> Result<&str> {
        self.get(name).map(QueryProperty::locator)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Properties in registration order.
    pub fn list_properties(&self) -> &[QueryProperty] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Accumulates registrations for one domain.
///
/// Any failed registration consumes the builder, so a registry is never
/// observable in a partially registered state.
#[derive(Debug)]
pub struct RegistryBuilder {
    domain: String,
    properties: Vec<QueryProperty>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            properties: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn register(self, name: &str, locator: &str) -> Result<Self> {
        self.register_property(QueryProperty::new(name, locator))
    }

    pub fn register_property(mut self, property: QueryProperty) -> Result<Self> {
        if self.domain.is_empty() {
            return Err(EngineError::Configuration(
                "Query domain name must not be empty".into(),
            ));
        }

        if property.name().is_empty() || property.locator().is_empty() {
            return Err(EngineError::Configuration(format!(
                "Property in domain '{}' needs a non-empty name and locator",
                self.domain
            )));
        }

        if self.index.contains_key(property.name()) {
            event!(
                Level::ERROR,
                domain = %self.domain,
                property = %property.name(),
                "duplicate query property registration"
            );
            return Err(EngineError::Configuration(format!(
                "Property '{}' is already registered for domain '{}'",
                property.name(),
                self.domain
            )));
        }

        self.index
            .insert(property.name().to_string(), self.properties.len());
        self.properties.push(property);
        Ok(self)
    }

    pub fn build(self) -> QueryPropertyRegistry {
        event!(
            Level::DEBUG,
            domain = %self.domain,
            properties = self.properties.len(),
            "query property registry built"
        );
        QueryPropertyRegistry {
            domain: self.domain,
            properties: self.properties,
            index: self.index,
        }
    }
}
