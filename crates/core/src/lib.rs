//! Core types for pull-based reference search
//!
//! This crate provides the abstractions shared by every search framework and
//! by the bridges that connect them:
//!
//! - **Queries**: one-shot result producers feeding a stop-aware consumer
//! - **Parameters**: search target, scope, access flag and request origin
//! - **Context**: per-search state, nested request collection and cancellation
//! - **Frameworks**: ordered executor registries that build queries
//! - **Configuration** and **error handling**

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod config;
pub mod context;
pub mod error;
pub mod framework;
pub mod logging;
pub mod params;
pub mod query;

// Re-export main types for convenience
pub use config::{BridgeConfig, Config, FrameworkConfig, LoggingConfig, UnsupportedResultPolicy};
pub use context::{MergePolicy, NestedRequest, SearchContext, SearchLineage};
pub use error::{Error, Result, ResultExt};
pub use framework::{FnSource, QueryExecutor, QuerySource, SearchFramework, WeakFramework};
pub use params::{Origin, SearchParameters, SearchScope};
pub use query::{BoxQuery, Completion, EmptyQuery, IterQuery, MappedQuery, Query};

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::SearchContext;
    pub use crate::error::{Result, ResultExt};
    pub use crate::framework::{QueryExecutor, QuerySource, SearchFramework};
    pub use crate::params::{SearchParameters, SearchScope};
    pub use crate::query::{BoxQuery, Query};
}
