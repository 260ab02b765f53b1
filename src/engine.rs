use crate::config::SankeyConfig;
use crate::error::LayoutError;
use crate::ir::{Graph, Link, Node};
use crate::layout::{SankeyLayout, compute_layout, relayout};
use crate::path::LinkPath;

/// Chainable front end over [`compute_layout`].
///
/// Setters only store values; everything is validated when
/// [`Sankey::layout`] runs.
#[derive(Debug, Clone, Default)]
pub struct Sankey {
    config: SankeyConfig,
    graph: Graph,
    result: Option<SankeyLayout>,
}

impl Sankey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SankeyConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SankeyConfig {
        &self.config
    }

    pub fn node_width(&self) -> f64 {
        self.config.node_width
    }

    pub fn set_node_width(&mut self, width: f64) -> &mut Self {
        self.config.node_width = width;
        self
    }

    pub fn node_padding(&self) -> f64 {
        self.config.node_padding
    }

    pub fn set_node_padding(&mut self, padding: f64) -> &mut Self {
        self.config.node_padding = padding;
        self
    }

    pub fn size(&self) -> [f64; 2] {
        self.config.size
    }

    pub fn set_size(&mut self, size: [f64; 2]) -> &mut Self {
        self.config.size = size;
        self
    }

    pub fn nodes(&self) -> &[Node] {
        &self.graph.nodes
    }

    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> &mut Self {
        self.graph.nodes = nodes;
        self
    }

    pub fn links(&self) -> &[Link] {
        &self.graph.links
    }

    pub fn set_links(&mut self, links: Vec<Link>) -> &mut Self {
        self.graph.links = links;
        self
    }

    pub fn set_graph(&mut self, graph: Graph) -> &mut Self {
        self.graph = graph;
        self
    }

    /// Runs the full pipeline. On error the previous result is kept.
    pub fn layout(&mut self, iterations: usize) -> Result<&mut Self, LayoutError> {
        self.result = Some(compute_layout(&self.graph, &self.config, iterations)?);
        Ok(self)
    }

    /// Re-stacks links on the current depths. Does nothing before the first
    /// successful [`Sankey::layout`].
    pub fn relayout(&mut self) -> &mut Self {
        if let Some(result) = self.result.as_mut() {
            relayout(result);
        }
        self
    }

    pub fn result(&self) -> Option<&SankeyLayout> {
        self.result.as_ref()
    }

    /// Mutable access for callers that reposition nodes before
    /// [`Sankey::relayout`].
    pub fn result_mut(&mut self) -> Option<&mut SankeyLayout> {
        self.result.as_mut()
    }

    pub fn link(&self) -> LinkPath {
        LinkPath::default()
    }
}
