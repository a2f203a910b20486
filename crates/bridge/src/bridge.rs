//! Executor that answers a search in one framework with results from another
//!
//! A [`QueryBridge`] is registered as an executor on framework B. For every
//! request it maps the target into framework A, searches A with the same scope
//! and access flag, adapts A's results into B's item type and queues them as a
//! nested request on B's search context. Requests that a bridge forwarded
//! itself are never bridged again, which keeps two bridges pointing at each
//! other from recursing forever.

use crate::adapt::{Adaptation, ResultAdapter, TargetAdapter};
use refsearch_core::{
    BoxQuery, BridgeConfig, Completion, Error, MappedQuery, NestedRequest,
    QueryExecutor, QuerySource, Result, SearchContext, SearchLineage, SearchParameters,
    UnsupportedResultPolicy,
};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Bridges searches for `TB` targets in framework B to `TA` targets in framework A
///
/// `IA` and `IB` are the result item types of A and B.
pub struct QueryBridge<TB, TA, IA, IB> {
    name: String,
    source_name: String,
    config: BridgeConfig,
    source: Arc<dyn QuerySource<SearchParameters<TA>, IA>>,
    targets: Arc<dyn TargetAdapter<TB, TA>>,
    results: Arc<dyn ResultAdapter<IA, IB>>,
}

impl<TB, TA, IA, IB> QueryBridge<TB, TA, IA, IB>
where
    TB: 'static,
    TA: 'static,
    IA: 'static,
    IB: 'static,
{
    /// Creates a bridge searching `source`, named `source_name` in logs and errors
    pub fn new(
        source_name: impl Into<String>,
        source: Arc<dyn QuerySource<SearchParameters<TA>, IA>>,
        targets: impl TargetAdapter<TB, TA> + 'static,
        results: impl ResultAdapter<IA, IB> + 'static,
    ) -> Self {
        let source_name = source_name.into();
        Self {
            name: format!("bridge-from-{source_name}"),
            source_name,
            config: BridgeConfig::default(),
            source,
            targets: Arc::new(targets),
            results: Arc::new(results),
        }
    }

    pub fn with_config(mut self, config: &BridgeConfig) -> Self {
        self.config = config.clone();
        self
    }

    pub fn with_unsupported_policy(mut self, policy: UnsupportedResultPolicy) -> Self {
        self.config.unsupported_results = policy;
        self
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Builds the adapted framework-A query for `params`, if there is one to run
    ///
    /// Returns `None` when the bridge is disabled, when `params` was forwarded
    /// by a bridge, or when the target has no counterpart in framework A.
    pub fn sub_query(
        &self,
        params: &SearchParameters<TB>,
        lineage: SearchLineage,
    ) -> Option<BoxQuery<'static, IB>> {
        if !self.config.enabled {
            trace!(bridge = %self.name, "Bridge disabled");
            return None;
        }
        if params.is_bridged() {
            trace!(bridge = %self.name, "Request was forwarded by a bridge, not bridging it back");
            return None;
        }
        let Some(target) = TargetAdapter::adapt(self.targets.as_ref(), &params.target) else {
            trace!(bridge = %self.name, "Target has no counterpart in {}", self.source_name);
            return None;
        };

        debug!(
            bridge = %self.name,
            depth = lineage.depth(),
            "Forwarding search to {}",
            self.source_name
        );
        let forwarded = params.forwarded(target);
        let query = self.source.search_in(forwarded, lineage);
        Some(Box::new(MappedQuery::new(query, self.item_adapter())))
    }

    /// Searches framework A for `params` and feeds adapted results to `consumer`
    ///
    /// Standalone form of the bridge for callers without a framework of their
    /// own; results arrive in the order framework A produces them.
    pub fn bridge(
        &self,
        params: &SearchParameters<TB>,
        consumer: &mut dyn FnMut(IB) -> bool,
    ) -> Result<Completion> {
        self.bridge_in(params, SearchLineage::root(), consumer)
    }

    /// Like [`QueryBridge::bridge`], running as part of the search chain `lineage`
    pub fn bridge_in(
        &self,
        params: &SearchParameters<TB>,
        lineage: SearchLineage,
        consumer: &mut dyn FnMut(IB) -> bool,
    ) -> Result<Completion> {
        let Some(query) = self.sub_query(params, lineage.child()) else {
            return Ok(Completion::Exhausted);
        };
        let completion = query.run(&mut |item| !lineage.is_cancelled() && consumer(item))?;
        lineage.check_cancelled()?;
        Ok(completion)
    }

    fn item_adapter(&self) -> impl FnMut(IA) -> Result<Option<IB>> + Send + 'static {
        let results = Arc::clone(&self.results);
        let policy = self.config.unsupported_results;
        let source_name = self.source_name.clone();

        move |item| match ResultAdapter::adapt(results.as_ref(), item) {
            Adaptation::Adapted(item) => Ok(Some(item)),
            Adaptation::Unsupported(reason) => match policy {
                UnsupportedResultPolicy::Skip => Ok(None),
                UnsupportedResultPolicy::Log => {
                    warn!(source = %source_name, %reason, "Dropping result with no counterpart");
                    Ok(None)
                }
                UnsupportedResultPolicy::Fail => {
                    Err(Error::unsupported_result(source_name.as_str(), reason))
                }
            },
        }
    }
}

impl<TB, TA, IA, IB> QueryExecutor<SearchParameters<TB>, IB> for QueryBridge<TB, TA, IA, IB>
where
    TB: 'static,
    TA: 'static,
    IA: 'static,
    IB: 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        params: &SearchParameters<TB>,
        ctx: &mut SearchContext<IB>,
        _consumer: &mut dyn FnMut(IB) -> bool,
    ) -> Result<bool> {
        if let Some(query) = self.sub_query(params, ctx.lineage().child()) {
            ctx.register_nested(NestedRequest::new(self.name.clone(), query));
        }
        Ok(true)
    }
}
