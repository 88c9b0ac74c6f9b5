use super::{NativeEntity, NativeQueryRequest, NativeQuerySpec, Page};
use crate::command::{Command, CommandContext, CommandExecutor};
use crate::core::{EngineError, QueryOperation, Result, StorageError, Value};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::{Level, event};

/// Raw statement query returning entities of type `T`.
///
/// The statement is opaque here: it is passed unchanged to the manager of
/// `T::DOMAIN`, which also turns it into a count for [`NativeQuery::count`].
/// Nothing stops a caller from passing a mutating statement; native queries
/// are meant for reads only.
///
/// `list` and `count` run as separate commands. Unless storage provides
/// repeatable reads across sessions, a count may not match a later listing
/// under concurrent writers.
pub struct NativeQuery<T: NativeEntity> {
    executor: Option<Arc<CommandExecutor>>,
    statement: Option<String>,
    parameters: BTreeMap<String, Value>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: NativeEntity> NativeQuery<T> {
    /// Query that runs each operation in its own command.
    pub fn new(executor: Arc<CommandExecutor>) -> Self {
        Self {
            executor: Some(executor),
            statement: None,
            parameters: BTreeMap::new(),
            _entity: PhantomData,
        }
    }

    /// Query usable only inside an existing command, through the `*_in` methods.
    pub fn detached() -> Self {
        Self {
            executor: None,
            statement: None,
            parameters: BTreeMap::new(),
            _entity: PhantomData,
        }
    }

    pub fn sql(mut self, statement: impl Into<String>) -> Self {
        self.statement = Some(statement.into());
        self
    }

    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref()
    }

    pub fn parameters(&self) -> &BTreeMap<String, Value> {
        &self.parameters
    }

    pub fn domain(&self) -> &'static str {
        T::DOMAIN
    }

    pub fn to_spec(&self, page: Page) -> Result<NativeQuerySpec> {
        let statement = self.statement.clone().ok_or_else(|| {
            EngineError::InvalidQuery(format!(
                "Native query on domain '{}' has no statement",
                T::DOMAIN
            ))
        })?;

        Ok(NativeQuerySpec {
            domain: T::DOMAIN,
            request: NativeQueryRequest {
                statement,
                parameters: self.parameters.clone(),
            },
            page,
        })
    }

    fn executor(&self) -> Result<&CommandExecutor> {
        self.executor.as_deref().ok_or_else(|| {
            EngineError::InvalidQuery(
                "Query is not bound to a command executor; run it inside a command".into(),
            )
        })
    }

    pub async fn list(&self) -> Result<Vec<T>> {
        let spec = self.to_spec(Page::all())?;
        self.executor()?
            .execute(&ListCommand::<T>::new(&spec, QueryOperation::List))
            .await
    }

    pub async fn list_page(&self, first_result: usize, max_results: usize) -> Result<Vec<T>> {
        let spec = self.to_spec(Page::new(first_result, max_results))?;
        self.executor()?
            .execute(&ListCommand::<T>::new(&spec, QueryOperation::ListPage))
            .await
    }

    pub async fn count(&self) -> Result<u64> {
        let spec = self.to_spec(Page::all())?;
        self.executor()?
            .execute(&CountCommand::<T>::new(&spec.request))
            .await
    }

    /// The only matching entity, `None` if nothing matches.
    pub async fn single_result(&self) -> Result<Option<T>> {
        let spec = self.to_spec(Page::all())?;
        let rows = self
            .executor()?
            .execute(&ListCommand::<T>::new(&spec, QueryOperation::SingleResult))
            .await?;
        into_single::<T>(rows)
    }

    pub async fn list_in(&self, ctx: &CommandContext) -> Result<Vec<T>> {
        let spec = self.to_spec(Page::all())?;
        execute_list(ctx, &spec, QueryOperation::List).await
    }

    pub async fn list_page_in(
        &self,
        ctx: &CommandContext,
        first_result: usize,
        max_results: usize,
    ) -> Result<Vec<T>> {
        let spec = self.to_spec(Page::new(first_result, max_results))?;
        execute_list(ctx, &spec, QueryOperation::ListPage).await
    }

    pub async fn count_in(&self, ctx: &CommandContext) -> Result<u64> {
        let spec = self.to_spec(Page::all())?;
        execute_count::<T>(ctx, &spec.request).await
    }

    pub async fn single_result_in(&self, ctx: &CommandContext) -> Result<Option<T>> {
        let spec = self.to_spec(Page::all())?;
        let rows = execute_list(ctx, &spec, QueryOperation::SingleResult).await?;
        into_single::<T>(rows)
    }
}

impl<T: NativeEntity> Clone for NativeQuery<T> {
    fn clone(&self) -> Self {
        Self {
            executor: self.executor.clone(),
            statement: self.statement.clone(),
            parameters: self.parameters.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: NativeEntity> fmt::Debug for NativeQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeQuery")
            .field("domain", &T::DOMAIN)
            .field("statement", &self.statement)
            .field("parameters", &self.parameters)
            .field("bound", &self.executor.is_some())
            .finish()
    }
}

fn into_single<T: NativeEntity>(mut rows: Vec<T>) -> Result<Option<T>> {
    match rows.len() {
        0 => Ok(None),
        1 => Ok(rows.pop()),
        n => Err(EngineError::InvalidQuery(format!(
            "Native query on domain '{}' returned {} results instead of max 1",
            T::DOMAIN,
            n
        ))),
    }
}

/// Run `spec` as a listing against the manager for `T`.
pub async fn execute_list<T: NativeEntity>(
    ctx: &CommandContext,
    spec: &NativeQuerySpec,
    operation: QueryOperation,
) -> Result<Vec<T>> {
    let manager = ctx.manager::<T>()?;
    event!(
        Level::DEBUG,
        domain = %T::DOMAIN,
        operation = %operation,
        first_result = spec.page.first_result,
        max_results = ?spec.page.max_results,
        "native query dispatched"
    );

    manager
        .find_by_native_query(&spec.request, spec.page)
        .await
        .map_err(|err| {
            event!(
                Level::ERROR,
                domain = %T::DOMAIN,
                operation = %operation,
                error = %err,
                "native query failed"
            );
            EngineError::query_execution(T::DOMAIN, operation, err)
        })
}

/// Run `request` as a count against the manager for `T`. No window applies.
pub async fn execute_count<T: NativeEntity>(
    ctx: &CommandContext,
    request: &NativeQueryRequest,
) -> Result<u64> {
    let manager = ctx.manager::<T>()?;
    event!(
        Level::DEBUG,
        domain = %T::DOMAIN,
        operation = %QueryOperation::Count,
        "native query dispatched"
    );

    manager.count_by_native_query(request).await.map_err(|err| {
        event!(
            Level::ERROR,
            domain = %T::DOMAIN,
            operation = "count",
            error = %err,
            "native query failed"
        );
        EngineError::query_execution(T::DOMAIN, QueryOperation::Count, err)
    })
}

struct ListCommand<'q, T> {
    spec: &'q NativeQuerySpec,
    operation: QueryOperation,
    _entity: PhantomData<fn() -> T>,
}

impl<'q, T> ListCommand<'q, T> {
    fn new(spec: &'q NativeQuerySpec, operation: QueryOperation) -> Self {
        Self {
            spec,
            operation,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<'q, T: NativeEntity> Command for ListCommand<'q, T> {
    type Output = Vec<T>;

    fn name(&self) -> &'static str {
        "nativeQuery.list"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<Vec<T>> {
        execute_list(ctx, self.spec, self.operation).await
    }

    fn timeout_error(&self, limit: Duration) -> EngineError {
        EngineError::query_execution(T::DOMAIN, self.operation, StorageError::Timeout(limit))
    }
}

struct CountCommand<'q, T> {
    request: &'q NativeQueryRequest,
    _entity: PhantomData<fn() -> T>,
}

impl<'q, T> CountCommand<'q, T> {
    fn new(request: &'q NativeQueryRequest) -> Self {
        Self {
            request,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<'q, T: NativeEntity> Command for CountCommand<'q, T> {
    type Output = u64;

    fn name(&self) -> &'static str {
        "nativeQuery.count"
    }

    async fn execute(&self, ctx: &CommandContext) -> Result<u64> {
        execute_count::<T>(ctx, self.request).await
    }

    fn timeout_error(&self, limit: Duration) -> EngineError {
        EngineError::query_execution(T::DOMAIN, QueryOperation::Count, StorageError::Timeout(limit))
    }
}
