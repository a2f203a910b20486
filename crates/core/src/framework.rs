//! Executor registry and query construction
//!
//! A [`SearchFramework`] owns an ordered list of [`QueryExecutor`]s. Each
//! search invokes every executor once with the request parameters and an
//! explicit [`SearchContext`], then drains the nested requests the executors
//! registered on it.

use crate::config::FrameworkConfig;
use crate::context::{SearchContext, SearchLineage};
use crate::error::{Error, Result};
use crate::query::{BoxQuery, Completion, EmptyQuery, Query};
use std::marker::PhantomData;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::{debug, debug_span, warn};

/// Request-interceptor hook invoked once per search request
pub trait QueryExecutor<P, T>: Send + Sync {
    /// Name used in logs and errors
    fn name(&self) -> &str;

    /// Processes one request
    ///
    /// Items may be fed to `consumer` directly or through nested requests
    /// registered on `ctx`. Returns `false` if the consumer asked to stop.
    fn execute(
        &self,
        params: &P,
        ctx: &mut SearchContext<T>,
        consumer: &mut dyn FnMut(T) -> bool,
    ) -> Result<bool>;
}

/// Anything that can turn request parameters into a query
pub trait QuerySource<P, T>: Send + Sync {
    /// Builds a query that runs as part of the search chain `lineage`
    fn search_in(&self, params: P, lineage: SearchLineage) -> BoxQuery<'static, T>;

    /// Builds a query that starts a new search chain
    fn search(&self, params: P) -> BoxQuery<'static, T> {
        self.search_in(params, SearchLineage::root())
    }
}

type ExecutorList<P, T> = Vec<Arc<dyn QueryExecutor<P, T>>>;

/// Ordered registry of executors for one result type
pub struct SearchFramework<P, T> {
    name: String,
    max_depth: usize,
    executors: RwLock<ExecutorList<P, T>>,
}

impl<P, T> SearchFramework<P, T>
where
    P: Send + Sync + 'static,
    T: 'static,
{
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, &FrameworkConfig::default())
    }

    pub fn from_config(name: impl Into<String>, config: &FrameworkConfig) -> Self {
        Self {
            name: name.into(),
            max_depth: config.max_nesting_depth,
            executors: RwLock::new(Vec::new()),
        }
    }

    /// Overrides the nested search depth limit
    pub fn with_depth_limit(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends an executor; it runs after those already registered
    pub fn register(&self, executor: Arc<dyn QueryExecutor<P, T>>) {
        debug!(framework = %self.name, executor = executor.name(), "Registered executor");
        self.executors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(executor);
    }

    pub fn executor_count(&self) -> usize {
        self.executors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// A source that searches this framework without keeping it alive
    pub fn downgrade(self: &Arc<Self>) -> WeakFramework<P, T> {
        WeakFramework {
            inner: Arc::downgrade(self),
        }
    }

    fn build_query(&self, params: P, lineage: SearchLineage) -> FrameworkQuery<P, T> {
        let executors = self
            .executors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        FrameworkQuery {
            framework: self.name.clone(),
            max_depth: self.max_depth,
            executors,
            params,
            lineage,
            _item: PhantomData,
        }
    }
}

impl<P, T> QuerySource<P, T> for SearchFramework<P, T>
where
    P: Send + Sync + 'static,
    T: 'static,
{
    fn search_in(&self, params: P, lineage: SearchLineage) -> BoxQuery<'static, T> {
        Box::new(self.build_query(params, lineage))
    }
}

/// Weak handle to a framework; searching a dropped framework yields nothing
pub struct WeakFramework<P, T> {
    inner: Weak<SearchFramework<P, T>>,
}

impl<P, T> QuerySource<P, T> for WeakFramework<P, T>
where
    P: Send + Sync + 'static,
    T: 'static,
{
    fn search_in(&self, params: P, lineage: SearchLineage) -> BoxQuery<'static, T> {
        match self.inner.upgrade() {
            Some(framework) => framework.search_in(params, lineage),
            None => {
                warn!("Search issued against a dropped framework");
                Box::new(EmptyQuery)
            }
        }
    }
}

/// Query source backed by a closure
pub struct FnSource<F>(pub F);

impl<P, T, F> QuerySource<P, T> for FnSource<F>
where
    F: Fn(P, SearchLineage) -> BoxQuery<'static, T> + Send + Sync,
{
    fn search_in(&self, params: P, lineage: SearchLineage) -> BoxQuery<'static, T> {
        (self.0)(params, lineage)
    }
}

/// One pending search against a framework's executor snapshot
struct FrameworkQuery<P, T> {
    framework: String,
    max_depth: usize,
    executors: ExecutorList<P, T>,
    params: P,
    lineage: SearchLineage,
    _item: PhantomData<fn() -> T>,
}

impl<P, T> Query<T> for FrameworkQuery<P, T> {
    fn run(self: Box<Self>, consumer: &mut dyn FnMut(T) -> bool) -> Result<Completion> {
        let FrameworkQuery {
            framework,
            max_depth,
            executors,
            params,
            lineage,
            ..
        } = *self;

        let span = debug_span!(
            "search",
            framework = %framework,
            session = %lineage.session_id(),
            depth = lineage.depth()
        );
        let _guard = span.enter();

        if lineage.depth() > max_depth {
            return Err(Error::NestingTooDeep {
                depth: lineage.depth(),
                limit: max_depth,
            });
        }
        lineage.check_cancelled()?;

        let mut ctx = SearchContext::new(framework, lineage);
        for executor in &executors {
            let keep_going = executor
                .execute(&params, &mut ctx, consumer)
                .map_err(|e| attribute(executor.name(), e))?;
            ctx.check_cancelled()?;
            if !keep_going {
                debug!(executor = executor.name(), "Consumer stopped search");
                return Ok(Completion::Stopped);
            }
        }

        ctx.drain(consumer)
    }
}

/// Names the failing executor unless the error already speaks for the search
fn attribute(executor: &str, error: Error) -> Error {
    match error {
        Error::Cancelled
        | Error::NestingTooDeep { .. }
        | Error::UnsupportedResult { .. }
        | Error::Executor { .. } => error,
        other => Error::executor(executor, other.to_string()),
    }
}
