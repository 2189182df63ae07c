//! Property tests for structural invariants over random small graphs.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use petgraph::graph::{NodeIndex, UnGraph};
use proptest::prelude::*;

use dgscope_core::{DirectedGraph, TriangleSurvey, TriangleTopology, VertexLookup, VertexProp};

const MAX_VERTICES: usize = 12;

fn name(i: usize) -> String {
    format!("v{i}")
}

/// Raw `(source, target)` pairs, self-loops and repeats included.
fn arb_pairs() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..MAX_VERTICES, 0..MAX_VERTICES), 0..60)
}

fn build(pairs: &[(usize, usize)]) -> DirectedGraph {
    let mut g = DirectedGraph::new();
    for &(u, v) in pairs {
        g.add_edge_by_name(&name(u), &name(v), VertexLookup::Create);
    }
    g
}

/// Triangle count by checking every vertex triple in an undirected petgraph
/// copy of the edge set.
fn brute_force_triangles(g: &DirectedGraph) -> usize {
    let n = g.vertex_count();
    let mut und = UnGraph::<(), ()>::with_capacity(n, g.edge_count());
    for _ in 0..n {
        und.add_node(());
    }
    for (u, v) in g.edges() {
        und.update_edge(NodeIndex::new(u), NodeIndex::new(v), ());
    }
    let linked = |a: usize, b: usize| und.contains_edge(NodeIndex::new(a), NodeIndex::new(b));

    let mut count = 0;
    for a in 0..n {
        for b in a + 1..n {
            if !linked(a, b) {
                continue;
            }
            for c in b + 1..n {
                if linked(b, c) && linked(a, c) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Unordered pairs `{u, v}` with edges in both directions.
fn brute_force_mutual_pairs(g: &DirectedGraph) -> usize {
    let n = g.vertex_count();
    (0..n)
        .flat_map(|u| (u + 1..n).map(move |v| (u, v)))
        .filter(|&(u, v)| g.has_edge(u, v) && g.has_edge(v, u))
        .count()
}

/// Directed edges among the three vertices of a triangle (3 to 6).
fn edges_within(g: &DirectedGraph, [a, b, c]: [usize; 3]) -> usize {
    [(a, b), (b, a), (b, c), (c, b), (c, a), (a, c)]
        .into_iter()
        .filter(|&(x, y)| g.has_edge(x, y))
        .count()
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn edge_count_matches_distinct_non_loop_pairs(pairs in arb_pairs()) {
        let g = build(&pairs);
        let mut distinct: Vec<(usize, usize)> =
            pairs.iter().copied().filter(|(u, v)| u != v).collect();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(g.edge_count(), distinct.len());
        prop_assert!(g.edges().all(|(u, v)| u != v));
    }

    #[test]
    fn degree_sums_equal_edge_count(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        g.compute_degrees();
        let total_in: f64 = g.vertex_property(VertexProp::InDegree.name()).expect("computed").iter().sum();
        let total_out: f64 = g.vertex_property(VertexProp::OutDegree.name()).expect("computed").iter().sum();
        prop_assert_eq!(total_in as usize, g.edge_count());
        prop_assert_eq!(total_out as usize, g.edge_count());
    }

    #[test]
    fn reciprocal_edges_are_even_and_bounded(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let r = g.reciprocity();
        prop_assert_eq!(r.reciprocal_edges % 2, 0);
        prop_assert!(r.reciprocal_edges <= g.edge_count());
        prop_assert!((0.0..=1.0).contains(&r.ratio));

        let rec: f64 = g.vertex_property(VertexProp::ReciprocalDegree.name()).expect("computed").iter().sum();
        prop_assert_eq!(rec as usize, r.reciprocal_edges);
    }

    #[test]
    fn reciprocal_edges_are_twice_the_mutual_pairs(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let expected = 2 * brute_force_mutual_pairs(&g);
        prop_assert_eq!(g.reciprocal_edge_count(), expected);
    }

    #[test]
    fn triangle_count_matches_brute_force(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let expected = brute_force_triangles(&g);
        prop_assert_eq!(g.triangle_count(), expected);

        let list = g.triangles().expect("list built");
        prop_assert_eq!(list.len(), expected);
        prop_assert!(list.iter().all(|[a, b, c]| a < b && b < c));
    }

    #[test]
    fn spectrum_sums_to_triangle_count(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let spectrum = g.triangle_spectrum();
        prop_assert_eq!(spectrum.total(), g.triangle_count());
    }

    #[test]
    fn spectrum_classes_match_edges_per_triangle(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let spectrum = g.triangle_spectrum();
        let list = g.triangles().expect("list built").to_vec();

        let mut by_edges = [0_usize; 7];
        for triangle in list {
            by_edges[edges_within(&g, triangle)] += 1;
        }
        prop_assert_eq!(by_edges[0] + by_edges[1] + by_edges[2], 0);
        prop_assert_eq!(
            by_edges[3],
            spectrum.get(TriangleTopology::ThreeCycle) + spectrum.get(TriangleTopology::ThreeNoCycle)
        );
        prop_assert_eq!(
            by_edges[4],
            spectrum.get(TriangleTopology::FourCycle)
                + spectrum.get(TriangleTopology::FourOutward)
                + spectrum.get(TriangleTopology::FourInward)
        );
        prop_assert_eq!(by_edges[5], spectrum.get(TriangleTopology::FiveCycle));
        prop_assert_eq!(by_edges[6], spectrum.get(TriangleTopology::SixCycle));
    }

    #[test]
    fn clustering_stays_in_unit_interval(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let census = g.survey_triangles(TriangleSurvey::default());
        prop_assert!((0.0..=1.0).contains(&census.global_clustering));
        let local = g.vertex_property(VertexProp::UndirLocalClust.name()).expect("computed");
        prop_assert!(local.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn recomputation_is_idempotent(pairs in arb_pairs()) {
        let mut g = build(&pairs);
        let first = g.summarize().expect("summary");
        let in_first = g.vertex_property(VertexProp::InDegree.name()).expect("computed").to_vec();
        let second = g.summarize().expect("summary");
        let in_second = g.vertex_property(VertexProp::InDegree.name()).expect("computed").to_vec();
        prop_assert_eq!(first, second);
        prop_assert_eq!(in_first, in_second);
    }

    #[test]
    fn insertion_order_does_not_change_counts(pairs in arb_pairs()) {
        let mut forward = build(&pairs);
        let reversed: Vec<_> = pairs.iter().rev().copied().collect();
        let mut backward = build(&reversed);
        prop_assert_eq!(forward.edge_count(), backward.edge_count());
        prop_assert_eq!(forward.triangle_count(), backward.triangle_count());
        prop_assert_eq!(forward.reciprocal_edge_count(), backward.reciprocal_edge_count());
        prop_assert_eq!(forward.triangle_spectrum(), backward.triangle_spectrum());
    }
}
