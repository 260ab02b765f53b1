use super::{LinkLayout, NodeLayout};

/// Weight of a link in aggregation and relaxation.
pub(super) fn link_value(link: &LinkLayout) -> f64 {
    link.value
}

pub(super) fn sum_values(link_ids: &[usize], links: &[LinkLayout]) -> f64 {
    link_ids.iter().map(|&idx| link_value(&links[idx])).sum()
}

/// A node's value is the larger of its outgoing and incoming totals, so pure
/// sources and sinks are still sized.
pub(super) fn compute_node_values(nodes: &mut [NodeLayout], links: &[LinkLayout]) {
    for node in nodes.iter_mut() {
        let outgoing = sum_values(&node.source_links, links);
        let incoming = sum_values(&node.target_links, links);
        node.value = outgoing.max(incoming);
    }
}
