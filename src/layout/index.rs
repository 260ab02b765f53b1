use std::collections::HashMap;

use crate::error::LayoutError;
use crate::ir::{Graph, NodeRef};

use super::{LinkLayout, NodeLayout};

pub(super) fn validate_link_values(graph: &Graph) -> Result<(), LayoutError> {
    for (link, raw) in graph.links.iter().enumerate() {
        if !raw.value.is_finite() || raw.value < 0.0 {
            return Err(LayoutError::InvalidLinkValue {
                link,
                value: raw.value,
            });
        }
    }
    Ok(())
}

/// Resolves every link endpoint to a node index and fills each node's
/// outgoing/incoming lists in link input order.
pub(super) fn index_graph(
    graph: &Graph,
) -> Result<(Vec<NodeLayout>, Vec<LinkLayout>), LayoutError> {
    let mut id_to_idx: HashMap<&str, usize> = HashMap::with_capacity(graph.nodes.len());
    for (idx, node) in graph.nodes.iter().enumerate() {
        if id_to_idx.insert(node.id.as_str(), idx).is_some() {
            return Err(LayoutError::DuplicateNode {
                id: node.id.clone(),
            });
        }
    }

    let resolve = |link: usize, reference: &NodeRef| -> Result<usize, LayoutError> {
        match reference {
            NodeRef::Index(index) if *index < graph.nodes.len() => Ok(*index),
            NodeRef::Index(index) => Err(LayoutError::InvalidReference {
                link,
                index: *index,
                len: graph.nodes.len(),
            }),
            NodeRef::Id(id) => {
                id_to_idx
                    .get(id.as_str())
                    .copied()
                    .ok_or_else(|| LayoutError::UnknownNode {
                        link,
                        id: id.clone(),
                    })
            }
        }
    };

    let mut links = Vec::with_capacity(graph.links.len());
    for (link_idx, raw) in graph.links.iter().enumerate() {
        let source = resolve(link_idx, &raw.source)?;
        let target = resolve(link_idx, &raw.target)?;
        links.push(LinkLayout {
            source,
            target,
            value: raw.value,
            height: 0.0,
            source_offset: 0.0,
            target_offset: 0.0,
        });
    }

    let mut nodes: Vec<NodeLayout> = graph
        .nodes
        .iter()
        .map(|node| NodeLayout {
            id: node.id.clone(),
            label: node.label.clone().unwrap_or_else(|| node.id.clone()),
            column: node.dim_index,
            value: 0.0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            source_links: Vec::new(),
            target_links: Vec::new(),
        })
        .collect();
    for (link_idx, link) in links.iter().enumerate() {
        nodes[link.source].source_links.push(link_idx);
        nodes[link.target].target_links.push(link_idx);
    }

    Ok((nodes, links))
}
