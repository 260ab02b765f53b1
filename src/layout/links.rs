use super::{LinkLayout, NodeLayout};

/// Orders every node's link stacks and assigns cumulative offsets.
///
/// Outgoing links are ordered by their *target's* depth and incoming links by
/// their *source's* depth, so bands leave and enter a node in the same
/// vertical order as the nodes they connect to. Sorts are stable, which makes
/// repeated calls idempotent.
pub(super) fn compute_link_depths(nodes: &mut [NodeLayout], links: &mut [LinkLayout]) {
    let depths: Vec<f64> = nodes.iter().map(|node| node.y).collect();
    for node in nodes.iter_mut() {
        node.source_links
            .sort_by(|&a, &b| depths[links[a].target].total_cmp(&depths[links[b].target]));
        node.target_links
            .sort_by(|&a, &b| depths[links[a].source].total_cmp(&depths[links[b].source]));
    }

    for node in nodes.iter() {
        let mut sy = 0.0;
        for &link_idx in &node.source_links {
            links[link_idx].source_offset = sy;
            sy += links[link_idx].height;
        }
        let mut ty = 0.0;
        for &link_idx in &node.target_links {
            links[link_idx].target_offset = ty;
            ty += links[link_idx].height;
        }
    }
}
