//! Bridges chained into a cycle that the forwarding marker cannot see

mod common;

use common::*;
use pretty_assertions::assert_eq;
use refsearch_bridge::{Adaptation, QueryBridge, ReferenceFramework};
use refsearch_core::{
    BoxQuery, Error, FnSource, FrameworkConfig, Origin, QuerySource, SearchLineage,
    SearchParameters, SearchScope,
};
use std::sync::Arc;

type Framework = ReferenceFramework<String, u32>;

/// Bridges `from` to `to` through a relay that clears the forwarding marker
fn relay(from: &Arc<Framework>, to: &Arc<Framework>) {
    let target = to.downgrade();
    let source = FnSource(
        move |params: SearchParameters<String>, lineage: SearchLineage| -> BoxQuery<'static, u32> {
            let params = SearchParameters {
                origin: Origin::Native,
                ..params
            };
            target.search_in(params, lineage)
        },
    );
    let source: Arc<dyn QuerySource<SearchParameters<String>, u32>> = Arc::new(source);
    from.register(Arc::new(QueryBridge::new(
        to.name().to_string(),
        source,
        |target: &String| Some(target.clone()),
        |item: u32| Adaptation::Adapted(item),
    )));
}

fn framework(name: &str, item: u32) -> Arc<Framework> {
    let config = FrameworkConfig {
        max_nesting_depth: 4,
    };
    let framework: Arc<Framework> = Arc::new(Framework::from_config(name, &config));
    framework.register(Arc::new(IndexExecutor::new(
        &format!("{name}-index"),
        vec![("Foo".to_string(), item)],
    )));
    framework
}

#[test]
fn test_three_framework_cycle_trips_depth_guard() {
    init_test_logging();

    let a = framework("a", 1);
    let b = framework("b", 2);
    let c = framework("c", 3);
    relay(&a, &b);
    relay(&b, &c);
    relay(&c, &a);

    let mut found = Vec::new();
    let result = a
        .search(SearchParameters::new("Foo".to_string(), SearchScope::Everything))
        .run(&mut |item| {
            found.push(item);
            true
        });

    assert!(matches!(
        result,
        Err(Error::NestingTooDeep { depth: 5, limit: 4 })
    ));
    // every framework within the limit answered before the guard tripped
    assert_eq!(found, vec![1, 2, 3, 1, 2]);
}

#[test]
fn test_open_chain_completes_below_limit() {
    init_test_logging();

    let a = framework("a", 1);
    let b = framework("b", 2);
    relay(&a, &b);

    let found = refsearch_core::query::collect_all(
        a.search(SearchParameters::new("Foo".to_string(), SearchScope::Everything)),
    )
    .expect("search failed");

    assert_eq!(found, vec![1, 2]);
}
