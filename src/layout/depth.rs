use std::collections::BTreeMap;

use log::{debug, trace, warn};

use crate::config::SankeyConfig;
use crate::ir::Node;

use super::ordering::sort_column;
use super::values::{link_value, sum_values};
use super::{LayoutWarning, LinkLayout, NodeLayout};

const COOLING: f64 = 0.99;

/// Which neighbours a relaxation pass pulls a node toward.
#[derive(Debug, Clone, Copy)]
enum Pull {
    /// Outgoing links, toward target centers (right-to-left pass).
    Targets,
    /// Incoming links, toward source centers (left-to-right pass).
    Sources,
}

pub(super) struct DepthOutcome {
    pub ky: f64,
    pub warnings: Vec<LayoutWarning>,
}

pub(super) fn compute_node_depths(
    nodes: &mut [NodeLayout],
    links: &mut [LinkLayout],
    specs: &[Node],
    config: &SankeyConfig,
    iterations: usize,
) -> DepthOutcome {
    let mut solver = DepthSolver::new(nodes, specs, config);
    let mut warnings = Vec::new();

    let ky = solver.initialize(nodes, links, &mut warnings);
    solver.check_capacity(nodes, &mut warnings);
    solver.resolve_collisions(nodes);

    let mut alpha = 1.0;
    for iteration in 0..iterations {
        alpha *= COOLING;
        trace!(iteration, alpha; "relaxing node depths");
        solver.relax(nodes, links, alpha, Pull::Targets);
        solver.resolve_collisions(nodes);
        solver.relax(nodes, links, alpha, Pull::Sources);
        solver.resolve_collisions(nodes);
    }

    for warning in &warnings {
        warn!(warning:?; "sankey depth scaling degraded");
    }
    DepthOutcome { ky, warnings }
}

struct DepthSolver<'a> {
    specs: &'a [Node],
    padding: f64,
    height: f64,
    /// Node indices per column, ascending by column. The order inside each
    /// column persists from one collision pass to the next.
    columns: Vec<(usize, Vec<usize>)>,
}

impl<'a> DepthSolver<'a> {
    fn new(nodes: &[NodeLayout], specs: &'a [Node], config: &SankeyConfig) -> Self {
        let mut by_column: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            by_column.entry(node.column).or_default().push(idx);
        }
        Self {
            specs,
            padding: config.node_padding,
            height: config.height(),
            columns: by_column.into_iter().collect(),
        }
    }

    /// Stacks nodes by their index in the column and sizes nodes and links
    /// with the tightest column's scale.
    fn initialize(
        &self,
        nodes: &mut [NodeLayout],
        links: &mut [LinkLayout],
        warnings: &mut Vec<LayoutWarning>,
    ) -> f64 {
        let mut ky = f64::INFINITY;
        for (column, members) in &self.columns {
            let total: f64 = members.iter().map(|&idx| nodes[idx].value).sum();
            if total <= 0.0 {
                warnings.push(LayoutWarning::DegenerateColumn { column: *column });
                continue;
            }
            let available = self.height - (members.len() as f64 - 1.0) * self.padding;
            ky = ky.min(available / total);
        }
        // No column constrains the scale, or padding alone overflows one.
        let ky = if ky.is_finite() { ky.max(0.0) } else { 0.0 };

        for (_, members) in &self.columns {
            for (i, &idx) in members.iter().enumerate() {
                nodes[idx].y = i as f64;
                nodes[idx].height = nodes[idx].value * ky;
            }
        }
        for link in links.iter_mut() {
            link.height = link_value(link) * ky;
        }

        debug!(columns = self.columns.len(), ky; "initialized node depths");
        ky
    }

    fn check_capacity(&self, nodes: &[NodeLayout], warnings: &mut Vec<LayoutWarning>) {
        let tolerance = 1e-9 * self.height.max(1.0);
        for (column, members) in &self.columns {
            let heights: f64 = members.iter().map(|&idx| nodes[idx].height).sum();
            let required = heights + (members.len() as f64 - 1.0) * self.padding;
            if required - self.height > tolerance {
                warnings.push(LayoutWarning::ColumnOverflow {
                    column: *column,
                    required,
                    available: self.height,
                });
            }
        }
    }

    /// Moves each node toward the value-weighted center of its neighbours on
    /// one side. Updates are applied in place, column by column.
    fn relax(&self, nodes: &mut [NodeLayout], links: &[LinkLayout], alpha: f64, pull: Pull) {
        let columns: Box<dyn Iterator<Item = &(usize, Vec<usize>)>> = match pull {
            Pull::Targets => Box::new(self.columns.iter().rev()),
            Pull::Sources => Box::new(self.columns.iter()),
        };
        for (_, members) in columns {
            for &idx in members {
                let node = &nodes[idx];
                let link_ids = match pull {
                    Pull::Targets => &node.source_links,
                    Pull::Sources => &node.target_links,
                };
                if link_ids.is_empty() {
                    continue;
                }
                // All-zero links have no meaningful center.
                let total = sum_values(link_ids, links);
                if total <= 0.0 {
                    continue;
                }
                let weighted: f64 = link_ids
                    .iter()
                    .map(|&link_idx| {
                        let link = &links[link_idx];
                        let neighbour = match pull {
                            Pull::Targets => link.target,
                            Pull::Sources => link.source,
                        };
                        nodes[neighbour].center() * link_value(link)
                    })
                    .sum();
                let shift = (weighted / total - node.center()) * alpha;
                nodes[idx].y += shift;
            }
        }
    }

    /// Pushes overlapping nodes down, then pulls the column back inside the
    /// canvas from the bottom up.
    fn resolve_collisions(&mut self, nodes: &mut [NodeLayout]) {
        let padding = self.padding;
        let height = self.height;
        for (_, members) in self.columns.iter_mut() {
            sort_column(members, nodes, self.specs);

            let mut y0 = 0.0;
            for &idx in members.iter() {
                let node = &mut nodes[idx];
                let dy = y0 - node.y;
                if dy > 0.0 {
                    node.y += dy;
                }
                y0 = node.y + node.height + padding;
            }

            let dy = y0 - padding - height;
            if dy <= 0.0 {
                continue;
            }
            let Some((&last, rest)) = members.split_last() else {
                continue;
            };
            nodes[last].y -= dy;
            let mut y0 = nodes[last].y;
            for &idx in rest.iter().rev() {
                let node = &mut nodes[idx];
                let dy = node.y + node.height + padding - y0;
                if dy > 0.0 {
                    node.y -= dy;
                }
                y0 = node.y;
            }
        }
    }
}
