mod breadth;
mod depth;
mod index;
mod links;
mod ordering;
pub(crate) mod types;
mod values;
pub use types::*;

use breadth::compute_node_breadths;
use depth::compute_node_depths;
use index::{index_graph, validate_link_values};
use links::compute_link_depths;
use log::debug;
use values::compute_node_values;

use crate::config::SankeyConfig;
use crate::error::LayoutError;
use crate::ir::Graph;

/// Runs the full pipeline: indexing, value aggregation, breadths, depth
/// relaxation and link stacking. The input graph is never modified.
pub fn compute_layout(
    graph: &Graph,
    config: &SankeyConfig,
    iterations: usize,
) -> Result<SankeyLayout, LayoutError> {
    config.validate()?;
    validate_link_values(graph)?;
    let (mut nodes, mut links) = index_graph(graph)?;
    debug!(nodes = nodes.len(), links = links.len(), iterations; "computing sankey layout");

    compute_node_values(&mut nodes, &links);
    compute_node_breadths(&mut nodes, config);
    let depth = compute_node_depths(&mut nodes, &mut links, &graph.nodes, config, iterations);
    compute_link_depths(&mut nodes, &mut links);

    Ok(SankeyLayout {
        width: config.width(),
        height: config.height(),
        node_width: config.node_width,
        node_padding: config.node_padding,
        ky: depth.ky,
        nodes,
        links,
        warnings: depth.warnings,
    })
}

/// Re-stacks links against the node depths currently stored in `layout`.
/// Nothing else is recomputed.
pub fn relayout(layout: &mut SankeyLayout) {
    compute_link_depths(&mut layout.nodes, &mut layout.links);
}
