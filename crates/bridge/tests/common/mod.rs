//! Shared fixtures for bridge tests
#![allow(dead_code)]

use refsearch_bridge::Adaptation;
use refsearch_core::{Origin, QueryExecutor, Result, SearchContext, SearchParameters};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging from `REFSEARCH_TEST_LOG` or `RUST_LOG` (default: error)
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let log_level = std::env::var("REFSEARCH_TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "error".to_string());

        tracing_subscriber::fmt()
            .with_env_filter(log_level)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// Element of the syntax-tree framework
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PsiElement(pub String);

/// Element of the semantic model framework
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelElement(pub String);

/// Reference found in a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PsiRef {
    pub file: String,
    pub offset: u32,
}

pub fn psi_ref(file: &str, offset: u32) -> PsiRef {
    PsiRef {
        file: file.to_string(),
        offset,
    }
}

/// Reference found by the model framework; only source references have a PSI form
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModelRef {
    Source(PsiRef),
    Symbolic(String),
}

/// Local elements have no model counterpart
pub fn psi_to_model_target(element: &PsiElement) -> Option<ModelElement> {
    if element.0.starts_with("local:") {
        None
    } else {
        Some(ModelElement(element.0.clone()))
    }
}

pub fn model_to_psi_target(element: &ModelElement) -> Option<PsiElement> {
    Some(PsiElement(element.0.clone()))
}

pub fn model_to_psi(reference: ModelRef) -> Adaptation<PsiRef> {
    match reference {
        ModelRef::Source(psi) => Adaptation::Adapted(psi),
        ModelRef::Symbolic(name) => Adaptation::Unsupported(format!("symbolic reference {name}")),
    }
}

pub fn psi_to_model(reference: PsiRef) -> Adaptation<ModelRef> {
    Adaptation::Adapted(ModelRef::Source(reference))
}

/// Executor answering from a fixed table of (target, reference) pairs
pub struct IndexExecutor<T, I> {
    name: String,
    entries: Vec<(T, I)>,
    calls: AtomicUsize,
    origins: Mutex<Vec<Origin>>,
}

impl<T, I> IndexExecutor<T, I> {
    pub fn new(name: &str, entries: Vec<(T, I)>) -> Self {
        Self {
            name: name.to_string(),
            entries,
            calls: AtomicUsize::new(0),
            origins: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn origins(&self) -> Vec<Origin> {
        self.origins.lock().unwrap().clone()
    }
}

impl<T, I> QueryExecutor<SearchParameters<T>, I> for IndexExecutor<T, I>
where
    T: PartialEq + Send + Sync,
    I: Clone + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn execute(
        &self,
        params: &SearchParameters<T>,
        _ctx: &mut SearchContext<I>,
        consumer: &mut dyn FnMut(I) -> bool,
    ) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.origins.lock().unwrap().push(params.origin);
        for (target, item) in &self.entries {
            if *target == params.target && !consumer(item.clone()) {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
