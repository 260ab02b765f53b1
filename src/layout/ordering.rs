use crate::ir::Node;

use super::NodeLayout;

/// How a column is ordered before the collision sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ColumnOrder {
    /// Ascending current depth.
    ByPosition,
    /// Ascending depth, then the keyed nodes are reordered by key among the
    /// slots they occupy. Unkeyed nodes keep their slots.
    ByKey { descending: bool },
}

impl ColumnOrder {
    /// `column` is expected in depth order; the direction comes from the
    /// first keyed node that sets one.
    pub(super) fn resolve(column: &[usize], specs: &[Node]) -> Self {
        let mut keyed = column
            .iter()
            .map(|&idx| &specs[idx])
            .filter(|spec| spec.sort_val.is_some())
            .peekable();
        if keyed.peek().is_none() {
            return Self::ByPosition;
        }
        let descending = keyed
            .find_map(|spec| spec.sort_dir)
            .map(|ascending| !ascending)
            .unwrap_or(false);
        Self::ByKey { descending }
    }
}

/// Stable sort of a column's node indices; equal keys keep their order.
pub(super) fn sort_column(column: &mut [usize], nodes: &[NodeLayout], specs: &[Node]) {
    column.sort_by(|&a, &b| nodes[a].y.total_cmp(&nodes[b].y));

    let ColumnOrder::ByKey { descending } = ColumnOrder::resolve(column, specs) else {
        return;
    };
    let mut slots = Vec::new();
    let mut keyed = Vec::new();
    for (slot, &idx) in column.iter().enumerate() {
        if let Some(key) = &specs[idx].sort_val {
            slots.push(slot);
            keyed.push((idx, key));
        }
    }
    keyed.sort_by(|(_, a), (_, b)| {
        let ordering = a.total_cmp(b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
    for (slot, (idx, _)) in slots.into_iter().zip(keyed) {
        column[slot] = idx;
    }
}
