use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Reference from a link to one of its endpoints.
///
/// JSON accepts either a bare integer (position in the node list) or a
/// string (node id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Index(usize),
    Id(String),
}

impl From<usize> for NodeRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        Self::Id(id.to_string())
    }
}

/// Explicit collision-resolution key for a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortKey {
    Number(f64),
    Text(String),
}

impl SortKey {
    /// Total order over keys: numbers compare numerically, text compares
    /// lexically, and every number sorts before every text key.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Number(_), Self::Text(_)) => Ordering::Less,
            (Self::Text(_), Self::Number(_)) => Ordering::Greater,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub dim_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_val: Option<SortKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<bool>,
}

impl Node {
    pub fn new(id: impl Into<String>, dim_index: usize) -> Self {
        Self {
            id: id.into(),
            label: None,
            dim_index,
            sort_val: None,
            sort_dir: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_sort(mut self, key: SortKey, ascending: Option<bool>) -> Self {
        self.sort_val = Some(key);
        self.sort_dir = ascending;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub source: NodeRef,
    pub target: NodeRef,
    pub value: f64,
}

impl Link {
    pub fn new(source: impl Into<NodeRef>, target: impl Into<NodeRef>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn add_link(&mut self, link: Link) -> usize {
        self.links.push(link);
        self.links.len() - 1
    }
}
