//! Mock query source for testing

use refsearch_core::query::from_iter;
use refsearch_core::{BoxQuery, QuerySource, SearchLineage, SearchParameters};
use std::sync::{Mutex, PoisonError};

/// Query source that records every request and answers with fixed items
pub struct RecordingSource<T, I> {
    items: Vec<I>,
    issued: Mutex<Vec<(SearchParameters<T>, SearchLineage)>>,
}

impl<T, I> RecordingSource<T, I> {
    /// Create a source answering every request with `items`
    pub fn new(items: Vec<I>) -> Self {
        Self {
            items,
            issued: Mutex::new(Vec::new()),
        }
    }

    /// Number of queries built so far
    pub fn search_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SearchParameters<T>, SearchLineage)>> {
        self.issued.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone, I> RecordingSource<T, I> {
    /// Parameters of every request, oldest first
    pub fn issued(&self) -> Vec<SearchParameters<T>> {
        self.lock().iter().map(|(params, _)| params.clone()).collect()
    }

    /// Lineage of every request, oldest first
    pub fn lineages(&self) -> Vec<SearchLineage> {
        self.lock().iter().map(|(_, lineage)| lineage.clone()).collect()
    }
}

impl<T, I> QuerySource<SearchParameters<T>, I> for RecordingSource<T, I>
where
    T: Send,
    I: Clone + Send + Sync + 'static,
{
    fn search_in(&self, params: SearchParameters<T>, lineage: SearchLineage) -> BoxQuery<'static, I> {
        self.lock().push((params, lineage));
        from_iter(self.items.clone())
    }
}
