use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeLayout {
    pub id: String,
    pub label: String,
    pub column: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Outgoing link indices, in stacking order.
    pub source_links: Vec<usize>,
    /// Incoming link indices, in stacking order.
    pub target_links: Vec<usize>,
}

impl NodeLayout {
    pub fn center(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkLayout {
    pub source: usize,
    pub target: usize,
    pub value: f64,
    pub height: f64,
    pub source_offset: f64,
    pub target_offset: f64,
}

/// Non-fatal numerical conditions met while solving depths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    /// Column total value is zero; it does not constrain the depth scale and
    /// its nodes get zero height.
    DegenerateColumn { column: usize },
    /// Column heights plus padding exceed the canvas; overlap may remain.
    ColumnOverflow {
        column: usize,
        required: f64,
        available: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SankeyLayout {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    pub node_padding: f64,
    /// Global depth scale: value units to pixels.
    pub ky: f64,
    pub nodes: Vec<NodeLayout>,
    pub links: Vec<LinkLayout>,
    pub warnings: Vec<LayoutWarning>,
}

impl SankeyLayout {
    pub fn node(&self, id: &str) -> Option<&NodeLayout> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Node indices grouped by column, ascending; input order within a column.
    pub fn columns(&self) -> Vec<(usize, Vec<usize>)> {
        let mut columns: std::collections::BTreeMap<usize, Vec<usize>> =
            std::collections::BTreeMap::new();
        for (idx, node) in self.nodes.iter().enumerate() {
            columns.entry(node.column).or_default().push(idx);
        }
        columns.into_iter().collect()
    }
}
