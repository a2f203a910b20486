//! Per-search context handed to every executor
//!
//! The context is the explicit replacement for a framework-global request
//! collector: executors register nested queries on it, and the framework
//! drains them into the caller's consumer once all executors have run.

use crate::error::{Error, Result};
use crate::query::{BoxQuery, Completion};
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::hash::Hash;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use uuid::Uuid;

/// How the results of a nested request are merged into the outer stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MergePolicy {
    /// Forward every item in production order
    #[default]
    Preserve,
    /// Drop items already delivered by an earlier nested request of the same context
    Deduplicate,
}

/// Identity, depth and cancellation shared by a chain of nested searches
#[derive(Debug, Clone)]
pub struct SearchLineage {
    session: Uuid,
    depth: usize,
    cancellation: CancellationToken,
}

impl SearchLineage {
    /// Starts a new chain with a fresh session id
    pub fn root() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Starts a new chain cancelled through `token`
    pub fn with_cancellation(token: CancellationToken) -> Self {
        Self {
            session: Uuid::new_v4(),
            depth: 0,
            cancellation: token,
        }
    }

    /// Lineage for a search issued from within this one
    pub fn child(&self) -> Self {
        Self {
            session: self.session,
            depth: self.depth + 1,
            cancellation: self.cancellation.clone(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session
    }

    /// Number of searches between this one and the root
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fails with [`Error::Cancelled`] once the token is cancelled
    pub fn check_cancelled(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for SearchLineage {
    fn default() -> Self {
        Self::root()
    }
}

/// Items already delivered by the nested requests of one context
trait DeliveredItems<T> {
    /// Records `item`; returns false if it was recorded before
    fn record(&mut self, item: &T) -> bool;

    fn recorded(&self) -> usize;
}

impl<T: Clone + Eq + Hash> DeliveredItems<T> for HashSet<T> {
    fn record(&mut self, item: &T) -> bool {
        if self.contains(item) {
            return false;
        }
        self.insert(item.clone());
        true
    }

    fn recorded(&self) -> usize {
        self.len()
    }
}

fn delivered_set<T: Clone + Eq + Hash + 'static>() -> Box<dyn DeliveredItems<T>> {
    Box::new(HashSet::<T>::new())
}

/// A query registered to run after the executors of the current search
pub struct NestedRequest<T> {
    label: String,
    query: BoxQuery<'static, T>,
    policy: MergePolicy,
    tracker: Option<fn() -> Box<dyn DeliveredItems<T>>>,
}

impl<T> NestedRequest<T> {
    /// A request whose items are forwarded as produced
    pub fn new(label: impl Into<String>, query: BoxQuery<'static, T>) -> Self {
        Self {
            label: label.into(),
            query,
            policy: MergePolicy::Preserve,
            tracker: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn policy(&self) -> MergePolicy {
        self.policy
    }
}

impl<T: Clone + Eq + Hash + 'static> NestedRequest<T> {
    /// A request whose items are dropped if an earlier nested request delivered them
    pub fn deduplicated(label: impl Into<String>, query: BoxQuery<'static, T>) -> Self {
        Self {
            label: label.into(),
            query,
            policy: MergePolicy::Deduplicate,
            tracker: Some(delivered_set::<T>),
        }
    }
}

impl<T> fmt::Debug for NestedRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedRequest")
            .field("label", &self.label)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Mutable state of one search invocation
pub struct SearchContext<T> {
    framework: String,
    lineage: SearchLineage,
    pending: VecDeque<NestedRequest<T>>,
    delivered: Option<Box<dyn DeliveredItems<T>>>,
}

impl<T> SearchContext<T> {
    pub fn new(framework: impl Into<String>, lineage: SearchLineage) -> Self {
        Self {
            framework: framework.into(),
            lineage,
            pending: VecDeque::new(),
            delivered: None,
        }
    }

    /// Name of the framework running this search
    pub fn framework(&self) -> &str {
        &self.framework
    }

    pub fn lineage(&self) -> &SearchLineage {
        &self.lineage
    }

    /// Fails with [`Error::Cancelled`] once the search is cancelled
    pub fn check_cancelled(&self) -> Result<()> {
        self.lineage.check_cancelled()
    }

    /// Queues a nested request; it runs after every executor has been invoked
    pub fn register_nested(&mut self, request: NestedRequest<T>) {
        trace!(
            framework = %self.framework,
            label = %request.label,
            policy = ?request.policy,
            "Registered nested request"
        );
        self.pending.push_back(request);
    }

    /// Number of nested requests waiting to run
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of items remembered for deduplication
    pub fn delivered_count(&self) -> usize {
        self.delivered.as_ref().map_or(0, |delivered| delivered.recorded())
    }

    /// Runs queued nested requests in registration order
    ///
    /// Stops at the first request whose consumer asks to stop. Cancellation
    /// is checked before each request, before each item and after each
    /// request finishes. Items are remembered only while a deduplicating
    /// request is still waiting to run.
    pub fn drain(&mut self, consumer: &mut dyn FnMut(T) -> bool) -> Result<Completion> {
        while let Some(request) = self.pending.pop_front() {
            self.lineage.check_cancelled()?;

            let NestedRequest {
                label,
                query,
                policy,
                tracker,
            } = request;
            debug!(framework = %self.framework, label = %label, "Running nested request");

            let dedup_pending = self
                .pending
                .iter()
                .any(|r| r.policy == MergePolicy::Deduplicate);
            if self.delivered.is_none() {
                self.delivered = tracker
                    .or_else(|| self.pending.iter().find_map(|r| r.tracker))
                    .map(|new_set| new_set());
            }
            let deduplicate = policy == MergePolicy::Deduplicate;
            let remember = deduplicate || dedup_pending;

            let lineage = &self.lineage;
            let delivered = &mut self.delivered;

            let completion = query.run(&mut |item| {
                if lineage.is_cancelled() {
                    return false;
                }
                if remember {
                    if let Some(delivered) = delivered.as_mut() {
                        if !delivered.record(&item) && deduplicate {
                            return true;
                        }
                    }
                }
                consumer(item)
            })?;
            self.lineage.check_cancelled()?;

            if completion == Completion::Stopped {
                debug!(framework = %self.framework, label = %label, "Consumer stopped nested results");
                self.pending.clear();
                self.delivered = None;
                return Ok(Completion::Stopped);
            }
            if !dedup_pending {
                self.delivered = None;
            }
        }
        self.lineage.check_cancelled()?;
        Ok(Completion::Exhausted)
    }
}
