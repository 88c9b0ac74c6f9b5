use super::{NativeQueryRequest, Page};
use crate::command::session::StorageResult;
use crate::core::{EngineError, Result};
use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

/// A result entity that native queries can return.
///
/// `DOMAIN` selects the manager that runs the query; it is never
/// interpreted by the query layer itself.
pub trait NativeEntity: Send + 'static {
    const DOMAIN: &'static str;
}

/// Storage-side manager for one query domain.
///
/// Implementations own statement interpretation, including adapting the
/// statement into a count form for `count_by_native_query`.
#[async_trait]
pub trait NativeQueryManager<T: NativeEntity>: Send + Sync {
    async fn find_by_native_query(
        &self,
        request: &NativeQueryRequest,
        page: Page,
    ) -> StorageResult<Vec<T>>;

    async fn count_by_native_query(&self, request: &NativeQueryRequest) -> StorageResult<u64>;
}

/// One native query manager per result domain.
///
/// Populated before the engine starts and read-only afterwards.
#[derive(Default)]
pub struct ManagerRegistry {
    /// domain -> `Arc<dyn NativeQueryManager<T>>` for that domain's `T`
    managers: HashMap<&'static str, Box<dyn Any + Send + Sync>>,
}

impl ManagerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manager<T, M>(self, manager: M) -> Result<Self>
    where
        T: NativeEntity,
        M: NativeQueryManager<T> + 'static,
    {
        self.with_shared_manager::<T>(Arc::new(manager))
    }

    pub fn with_shared_manager<T: NativeEntity>(
        mut self,
        manager: Arc<dyn NativeQueryManager<T>>,
    ) -> Result<Self> {
        if self.managers.contains_key(T::DOMAIN) {
            return Err(EngineError::Configuration(format!(
                "A native query manager is already registered for domain '{}'",
                T::DOMAIN
            )));
        }

        self.managers.insert(T::DOMAIN, Box::new(manager));
        Ok(self)
    }

    pub fn manager<T: NativeEntity>(&self) -> Result<Arc<dyn NativeQueryManager<T>>> {
        let entry = self
            .managers
            .get(T::DOMAIN)
            .ok_or_else(|| EngineError::UnknownDomain(T::DOMAIN.to_string()))?;

        entry
            .downcast_ref::<Arc<dyn NativeQueryManager<T>>>()
            .cloned()
            .ok_or_else(|| {
                EngineError::Configuration(format!(
                    "Manager registered for domain '{}' does not produce '{}'",
                    T::DOMAIN,
                    std::any::type_name::<T>()
                ))
            })
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.managers.contains_key(domain)
    }

    pub fn domains(&self) -> Vec<&'static str> {
        let mut domains: Vec<_> = self.managers.keys().copied().collect();
        domains.sort_unstable();
        domains
    }
}
