use crate::config::SankeyConfig;

use super::NodeLayout;

/// Places nodes on their caller-assigned columns and stretches the columns
/// so the last one ends flush with the canvas' right edge.
pub(super) fn compute_node_breadths(nodes: &mut [NodeLayout], config: &SankeyConfig) {
    let mut max_column = 0usize;
    for node in nodes.iter_mut() {
        node.x = node.column as f64;
        node.width = config.node_width;
        max_column = max_column.max(node.column);
    }

    // A single column has no span to scale across.
    if max_column == 0 {
        for node in nodes.iter_mut() {
            node.x = 0.0;
        }
        return;
    }

    let kx = (config.width() - config.node_width) / max_column as f64;
    for node in nodes.iter_mut() {
        node.x *= kx;
    }
}
