use crate::layout::{LayoutWarning, SankeyLayout};
use crate::path::LinkPath;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub width: f64,
    pub height: f64,
    pub node_width: f64,
    pub node_padding: f64,
    pub ky: f64,
    pub nodes: Vec<NodeDump>,
    pub links: Vec<LinkDump>,
    pub warnings: Vec<LayoutWarning>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    pub label: String,
    pub dim_index: usize,
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDump {
    pub source: String,
    pub target: String,
    pub value: f64,
    pub height: f64,
    pub source_offset: f64,
    pub target_offset: f64,
    pub path: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &SankeyLayout, curvature: f64) -> Self {
        let mut generator = LinkPath::new();
        generator.set_curvature(curvature);

        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                label: node.label.clone(),
                dim_index: node.column,
                value: node.value,
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
            })
            .collect();

        let links = layout
            .links
            .iter()
            .map(|link| LinkDump {
                source: layout.nodes[link.source].id.clone(),
                target: layout.nodes[link.target].id.clone(),
                value: link.value,
                height: link.height,
                source_offset: link.source_offset,
                target_offset: link.target_offset,
                path: generator.path(layout, link),
            })
            .collect();

        LayoutDump {
            width: layout.width,
            height: layout.height,
            node_width: layout.node_width,
            node_padding: layout.node_padding,
            ky: layout.ky,
            nodes,
            links,
            warnings: layout.warnings.clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(
    path: Option<&Path>,
    layout: &SankeyLayout,
    curvature: f64,
) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout, curvature);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &dump)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, &dump)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SankeyConfig;
    use crate::ir::{Graph, Link, Node};
    use crate::layout::compute_layout;

    #[test]
    fn dump_names_endpoints_and_carries_paths() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("A", 0).with_label("Alpha"));
        graph.add_node(Node::new("B", 1));
        graph.add_link(Link::new("A", "B", 10.0));
        let config = SankeyConfig {
            node_width: 10.0,
            node_padding: 2.0,
            size: [100.0, 100.0],
        };
        let layout = compute_layout(&graph, &config, 0).unwrap();
        let dump = LayoutDump::from_layout(&layout, 0.5);
        assert_eq!(dump.nodes[0].label, "Alpha");
        assert_eq!(dump.links[0].source, "A");
        assert_eq!(dump.links[0].target, "B");
        assert_eq!(dump.links[0].path, "M10,50C50,50 50,50 90,50");

        let json: serde_json::Value = serde_json::from_str(&dump.to_json().unwrap()).unwrap();
        assert_eq!(json["nodes"][1]["dimIndex"], 1);
        assert_eq!(json["links"][0]["sourceOffset"], 0.0);
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
