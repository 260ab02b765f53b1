use std::path::{Path, PathBuf};

use float_cmp::assert_approx_eq;
use proptest::prelude::*;
use sankey_layout::config::load_config;
use sankey_layout::{
    Graph, LayoutWarning, Link, LinkLayout, Node, NodeLayout, Sankey, SankeyConfig,
    SankeyLayout, compute_layout, relayout,
};

const EPS: f64 = 1e-6;

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_graph(name: &str) -> Graph {
    let input = std::fs::read_to_string(fixture_path(name)).expect("fixture read failed");
    serde_json::from_str(&input).expect("fixture parse failed")
}

fn assert_value_aggregation(layout: &SankeyLayout) {
    for node in &layout.nodes {
        let outgoing: f64 = node.source_links.iter().map(|&l| layout.links[l].value).sum();
        let incoming: f64 = node.target_links.iter().map(|&l| layout.links[l].value).sum();
        assert_approx_eq!(f64, node.value, outgoing.max(incoming), epsilon = EPS);
    }
}

fn assert_columns_fit(layout: &SankeyLayout) {
    for (column, members) in layout.columns() {
        let mut members = members;
        members.sort_by(|&a, &b| layout.nodes[a].y.total_cmp(&layout.nodes[b].y));
        let first = &layout.nodes[members[0]];
        let last = &layout.nodes[members[members.len() - 1]];
        assert!(first.y >= -EPS, "column {column}: top node at {}", first.y);
        assert!(
            last.bottom() <= layout.height + EPS,
            "column {column}: bottom at {}",
            last.bottom()
        );
        for pair in members.windows(2) {
            let gap = layout.nodes[pair[1]].y - layout.nodes[pair[0]].bottom();
            assert!(
                gap >= layout.node_padding - EPS,
                "column {column}: gap {gap} below padding"
            );
        }
    }
}

fn assert_stack_fits(
    layout: &SankeyLayout,
    node: &NodeLayout,
    stack: &[usize],
    offset_of: impl Fn(&LinkLayout) -> f64,
) {
    let mut previous = f64::NEG_INFINITY;
    for &link_idx in stack {
        let offset = offset_of(&layout.links[link_idx]);
        assert!(offset >= previous, "{}: offsets out of order", node.id);
        previous = offset;
    }
    if let Some(&last) = stack.last() {
        let link = &layout.links[last];
        assert!(offset_of(link) + link.height <= node.height + EPS);
    }
}

fn assert_stacks_fit(layout: &SankeyLayout) {
    for node in &layout.nodes {
        assert_stack_fits(layout, node, &node.source_links, |l| l.source_offset);
        assert_stack_fits(layout, node, &node.target_links, |l| l.target_offset);
    }
}

#[test]
fn two_node_fixture_matches_hand_computation() {
    let graph = load_graph("two_nodes.json");
    let config = SankeyConfig {
        node_width: 10.0,
        node_padding: 2.0,
        size: [100.0, 100.0],
    };
    let layout = compute_layout(&graph, &config, 0).unwrap();
    let a = layout.node("A").unwrap();
    let b = layout.node("B").unwrap();
    assert_eq!(a.x, 0.0);
    assert_approx_eq!(f64, b.x, 90.0);
    assert_eq!((a.value, b.value), (10.0, 10.0));
    assert_approx_eq!(f64, layout.ky, 10.0);
    assert_approx_eq!(f64, a.height, 100.0);
    assert_approx_eq!(f64, b.height, 100.0);
    assert_approx_eq!(f64, layout.links[0].height, 100.0);
    assert_eq!(layout.links[0].source_offset, 0.0);
    assert_eq!(layout.links[0].target_offset, 0.0);
}

#[test]
fn single_column_gaps_equal_padding() {
    let mut graph = Graph::new();
    for id in ["a", "b", "c"] {
        graph.add_node(Node::new(id, 0));
    }
    graph.add_node(Node::new("sink", 1));
    for source in 0..3 {
        graph.add_link(Link::new(source, 3, 5.0));
    }
    let config = SankeyConfig {
        node_width: 10.0,
        node_padding: 10.0,
        size: [100.0, 100.0],
    };
    let layout = compute_layout(&graph, &config, 0).unwrap();
    // Column 0 is the tighter one: three nodes share 80 units of height.
    assert_approx_eq!(f64, layout.ky, 80.0 / 15.0, epsilon = 1e-12);
    let column: Vec<_> = layout.nodes[..3].iter().collect();
    for pair in column.windows(2) {
        assert_approx_eq!(f64, pair[1].y - pair[0].bottom(), 10.0, epsilon = 1e-9);
    }
}

#[test]
fn energy_fixture_satisfies_layout_invariants() {
    let graph = load_graph("energy.json");
    let config = load_config(Some(fixture_path("config.json").as_path())).unwrap();
    let layout = compute_layout(&graph, &config.sankey, config.iterations).unwrap();

    assert!(layout.warnings.is_empty());
    assert_value_aggregation(&layout);
    assert_columns_fit(&layout);
    assert_stacks_fit(&layout);

    let xs: Vec<f64> = layout.nodes.iter().map(|n| n.x).collect();
    assert_eq!(xs.iter().copied().fold(f64::INFINITY, f64::min), 0.0);
    assert_approx_eq!(
        f64,
        xs.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        960.0 - 15.0
    );
}

#[test]
fn energy_fixture_relayout_is_idempotent() {
    let graph = load_graph("energy.json");
    let mut sankey = Sankey::with_config(SankeyConfig {
        node_width: 15.0,
        node_padding: 10.0,
        size: [960.0, 500.0],
    });
    sankey.set_graph(graph);
    let first = sankey.layout(32).unwrap().relayout().result().unwrap().clone();
    let second = sankey.relayout().result().unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn sorted_columns_follow_explicit_keys() {
    let graph = load_graph("sorted_columns.json");
    let config = SankeyConfig {
        node_width: 15.0,
        node_padding: 10.0,
        size: [960.0, 500.0],
    };
    let layout = compute_layout(&graph, &config, 32).unwrap();
    let y = |id: &str| layout.node(id).unwrap().y;

    assert!(y("q1") < y("q2"));
    assert!(y("q2") < y("q3"));
    // Text keys, direction taken from "beta" (descending).
    assert!(y("beta") < y("alpha"));
    assert_columns_fit(&layout);
}

#[test]
fn zero_flow_column_is_reported_and_sized_to_zero() {
    let mut graph = load_graph("two_nodes.json");
    graph.add_node(Node::new("idle", 2));
    let config = SankeyConfig {
        node_width: 10.0,
        node_padding: 2.0,
        size: [100.0, 100.0],
    };
    let layout = compute_layout(&graph, &config, 4).unwrap();
    assert_eq!(
        layout.warnings,
        vec![LayoutWarning::DegenerateColumn { column: 2 }]
    );
    assert_eq!(layout.node("idle").unwrap().height, 0.0);
    assert_approx_eq!(f64, layout.node("B").unwrap().x, 45.0);
}

#[test]
fn moving_nodes_and_relayout_restacks_links() {
    let graph = load_graph("energy.json");
    let config = SankeyConfig {
        node_width: 15.0,
        node_padding: 10.0,
        size: [960.0, 500.0],
    };
    let mut layout = compute_layout(&graph, &config, 16).unwrap();
    let grid = layout.nodes.iter().position(|n| n.id == "grid").unwrap();
    let order_before = layout.nodes[grid].source_links.clone();

    // Flip the sink column upside down.
    for node in layout.nodes.iter_mut().filter(|n| n.column == 2) {
        node.y = 500.0 - node.y - node.height;
    }
    relayout(&mut layout);

    let mut reversed = order_before;
    reversed.reverse();
    assert_eq!(layout.nodes[grid].source_links, reversed);
    assert_stacks_fit(&layout);
}

fn graph_strategy() -> impl Strategy<Value = Graph> {
    prop::collection::vec(1usize..=5, 2..=4)
        .prop_flat_map(|sizes| {
            let total: usize = sizes.iter().sum();
            let links = prop::collection::vec((0..total, 0..total, 0.1f64..50.0), 1..20);
            (Just(sizes), links)
        })
        .prop_map(|(sizes, raw_links)| {
            let mut graph = Graph::new();
            let mut columns = Vec::new();
            for (column, size) in sizes.iter().enumerate() {
                for i in 0..*size {
                    graph.add_node(Node::new(format!("c{column}n{i}"), column));
                    columns.push(column);
                }
            }
            for (a, b, value) in raw_links {
                if columns[a] == columns[b] {
                    continue;
                }
                let (source, target) = if columns[a] < columns[b] { (a, b) } else { (b, a) };
                graph.add_link(Link::new(source, target, value));
            }
            graph
        })
}

proptest! {
    #[test]
    fn layout_invariants_hold(graph in graph_strategy(), iterations in 0usize..40) {
        let config = SankeyConfig {
            node_width: 20.0,
            node_padding: 6.0,
            size: [640.0, 480.0],
        };
        let layout = compute_layout(&graph, &config, iterations).unwrap();
        let has_column_overflow = layout
            .warnings
            .iter()
            .any(|w| matches!(w, LayoutWarning::ColumnOverflow { .. }));
        prop_assert!(!has_column_overflow);

        assert_value_aggregation(&layout);
        assert_columns_fit(&layout);
        assert_stacks_fit(&layout);

        let min_x = layout.nodes.iter().map(|n| n.x).fold(f64::INFINITY, f64::min);
        let max_x = layout.nodes.iter().map(|n| n.x).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(min_x.abs() < EPS);
        prop_assert!((max_x - (640.0 - 20.0)).abs() < EPS);
    }

    #[test]
    fn relayout_twice_is_stable(graph in graph_strategy(), iterations in 0usize..20) {
        let config = SankeyConfig {
            node_width: 20.0,
            node_padding: 6.0,
            size: [640.0, 480.0],
        };
        let mut layout = compute_layout(&graph, &config, iterations).unwrap();
        relayout(&mut layout);
        let once = layout.clone();
        relayout(&mut layout);
        prop_assert_eq!(once, layout);
    }
}
