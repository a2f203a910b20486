//! Bridges between reference search frameworks
//!
//! A bridge makes the results of a search in one framework show up in the
//! results of the equivalent search in another. Searches forwarded by a bridge
//! carry [`Origin::Bridged`](refsearch_core::Origin) and are never forwarded
//! again, so two frameworks can be bridged in both directions.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod adapt;
pub mod bridge;
pub mod mock;
pub mod wiring;

pub use adapt::{Adaptation, PassThrough, ResultAdapter, TargetAdapter};
pub use bridge::QueryBridge;
pub use mock::RecordingSource;
pub use wiring::{install_bidirectional, BridgePair, Direction, ReferenceFramework};
