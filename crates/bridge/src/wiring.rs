//! Registering bridges between two frameworks

use crate::adapt::{ResultAdapter, TargetAdapter};
use crate::bridge::QueryBridge;
use refsearch_core::{BridgeConfig, QuerySource, SearchFramework, SearchParameters};
use std::sync::Arc;
use tracing::info;

/// Framework whose requests are [`SearchParameters`] over targets `T`
pub type ReferenceFramework<T, I> = SearchFramework<SearchParameters<T>, I>;

/// Adapters needed to carry a search from one framework into another
pub struct Direction<TFrom, TTo, ITo, IFrom, Targets, Results> {
    pub targets: Targets,
    pub results: Results,
    _types: std::marker::PhantomData<fn(TFrom, ITo) -> (TTo, IFrom)>,
}

impl<TFrom, TTo, ITo, IFrom, Targets, Results> Direction<TFrom, TTo, ITo, IFrom, Targets, Results>
where
    Targets: TargetAdapter<TFrom, TTo>,
    Results: ResultAdapter<ITo, IFrom>,
{
    /// `targets` maps a request's target forward, `results` maps found items back
    pub fn new(targets: Targets, results: Results) -> Self {
        Self {
            targets,
            results,
            _types: std::marker::PhantomData,
        }
    }
}

/// The two bridges installed by [`install_bidirectional`]
pub struct BridgePair<TA, IA, TB, IB> {
    /// Registered on `a`, brings results of `b` into searches of `a`
    pub into_a: Arc<QueryBridge<TA, TB, IB, IA>>,
    /// Registered on `b`, brings results of `a` into searches of `b`
    pub into_b: Arc<QueryBridge<TB, TA, IA, IB>>,
}

/// Registers a bridge on each framework that searches the other one
///
/// Each bridge holds the other framework weakly, so the pair does not keep
/// either framework alive. Requests forwarded by one bridge are ignored by
/// the other.
pub fn install_bidirectional<TA, IA, TB, IB, AtoB, ItemsBtoA, BtoA, ItemsAtoB>(
    a: &Arc<ReferenceFramework<TA, IA>>,
    b: &Arc<ReferenceFramework<TB, IB>>,
    config: &BridgeConfig,
    a_to_b: Direction<TA, TB, IB, IA, AtoB, ItemsBtoA>,
    b_to_a: Direction<TB, TA, IA, IB, BtoA, ItemsAtoB>,
) -> BridgePair<TA, IA, TB, IB>
where
    TA: Send + Sync + 'static,
    TB: Send + Sync + 'static,
    IA: 'static,
    IB: 'static,
    AtoB: TargetAdapter<TA, TB> + 'static,
    ItemsBtoA: ResultAdapter<IB, IA> + 'static,
    BtoA: TargetAdapter<TB, TA> + 'static,
    ItemsAtoB: ResultAdapter<IA, IB> + 'static,
{
    let a_source: Arc<dyn QuerySource<SearchParameters<TA>, IA>> = Arc::new(a.downgrade());
    let b_source: Arc<dyn QuerySource<SearchParameters<TB>, IB>> = Arc::new(b.downgrade());

    let into_a: Arc<QueryBridge<TA, TB, IB, IA>> = Arc::new(
        QueryBridge::new(b.name(), b_source, a_to_b.targets, a_to_b.results).with_config(config),
    );
    let into_b: Arc<QueryBridge<TB, TA, IA, IB>> = Arc::new(
        QueryBridge::new(a.name(), a_source, b_to_a.targets, b_to_a.results).with_config(config),
    );

    a.register(into_a.clone());
    b.register(into_b.clone());
    info!(a = a.name(), b = b.name(), "Installed bidirectional bridge");

    BridgePair { into_a, into_b }
}
