//! Property tests for queue ordering and shortest-distance invariants.

use courier_lib::{
    shortest_distances, DeliveryTier, DispatchQueue, LocationCatalog, LocationId, RouteGraph,
};
use proptest::prelude::*;

const CODES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

fn code() -> impl Strategy<Value = &'static str> {
    prop::sample::select(CODES.to_vec())
}

fn edges() -> impl Strategy<Value = Vec<(&'static str, &'static str, u32)>> {
    prop::collection::vec((code(), code(), 0u32..200), 0..24)
}

fn build(edges: &[(&'static str, &'static str, u32)]) -> RouteGraph {
    let mut graph = RouteGraph::new(LocationCatalog::builtin());
    for (start, end, weight) in edges {
        graph.add_edge(*start, *end, *weight).expect("catalog codes");
    }
    graph
}

proptest! {
    #[test]
    fn expedited_first_then_fifo_within_tier(tiers in prop::collection::vec(any::<bool>(), 0..40)) {
        let mut queue = DispatchQueue::with_available([LocationId::from("A")]);
        for (index, expedited) in tiers.iter().enumerate() {
            queue
                .enqueue(index.to_string(), DeliveryTier::from(*expedited), "A")
                .unwrap();
        }

        let drained: Vec<(DeliveryTier, usize)> = std::iter::from_fn(|| queue.dequeue())
            .map(|order| (order.tier(), order.name().parse().unwrap()))
            .collect();

        let mut expected: Vec<(DeliveryTier, usize)> = tiers
            .iter()
            .enumerate()
            .map(|(index, expedited)| (DeliveryTier::from(*expedited), index))
            .collect();
        expected.sort();

        prop_assert_eq!(drained, expected);
        prop_assert!(queue.dequeue().is_none());
    }

    #[test]
    fn source_distance_is_zero(edges in edges(), source in code()) {
        let graph = build(&edges);
        let distances = shortest_distances(&graph, &LocationId::from(source));
        prop_assert_eq!(distances.distance_to(source), Some(0));
    }

    #[test]
    fn direct_edge_bounds_distance_both_ways(edges in edges()) {
        let graph = build(&edges);
        for (start, end, weight) in &edges {
            let forward = shortest_distances(&graph, &LocationId::from(*start));
            let backward = shortest_distances(&graph, &LocationId::from(*end));
            prop_assert!(forward.distance_to(end).is_some_and(|d| d <= u64::from(*weight)));
            prop_assert!(backward.distance_to(start).is_some_and(|d| d <= u64::from(*weight)));
        }
    }

    #[test]
    fn distances_are_idempotent(edges in edges(), source in code()) {
        let graph = build(&edges);
        let source = LocationId::from(source);
        prop_assert_eq!(
            shortest_distances(&graph, &source),
            shortest_distances(&graph, &source)
        );
    }

    #[test]
    fn triangle_inequality_holds(edges in edges(), source in code()) {
        let graph = build(&edges);
        let distances = shortest_distances(&graph, &LocationId::from(source));
        for (b, c, weight) in &edges {
            for (from, to) in [(b, c), (c, b)] {
                if let Some(via) = distances.distance_to(from) {
                    let direct = distances.distance_to(to);
                    prop_assert!(direct.is_some_and(|d| d <= via + u64::from(*weight)));
                }
            }
        }
    }

    #[test]
    fn symmetric_distances(edges in edges(), a in code(), b in code()) {
        let graph = build(&edges);
        let from_a = shortest_distances(&graph, &LocationId::from(a)).distance_to(b);
        let from_b = shortest_distances(&graph, &LocationId::from(b)).distance_to(a);
        prop_assert_eq!(from_a, from_b);
    }
}
