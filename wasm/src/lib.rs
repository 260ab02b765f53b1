use sankey_layout::{Graph, LayoutDump, SankeyConfig, compute_layout};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SankeyLayoutOptions {
    node_width: Option<f64>,
    node_padding: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    iterations: Option<usize>,
    curvature: Option<f64>,
}

fn build_config(options: &SankeyLayoutOptions) -> SankeyConfig {
    let mut config = SankeyConfig::default();
    if let Some(node_width) = options.node_width {
        config.node_width = node_width;
    }
    if let Some(node_padding) = options.node_padding {
        config.node_padding = node_padding;
    }
    if let Some(width) = options.width {
        config.size[0] = width;
    }
    if let Some(height) = options.height {
        config.size[1] = height;
    }
    config
}

fn layout_json(graph_json: &str, options: SankeyLayoutOptions) -> Result<String, String> {
    let graph: Graph = serde_json::from_str(graph_json).map_err(|error| error.to_string())?;
    let config = build_config(&options);
    let iterations = options
        .iterations
        .unwrap_or(sankey_layout::config::DEFAULT_ITERATIONS);
    let curvature = options
        .curvature
        .unwrap_or(sankey_layout::path::DEFAULT_CURVATURE);
    let layout = compute_layout(&graph, &config, iterations).map_err(|error| error.to_string())?;
    LayoutDump::from_layout(&layout, curvature)
        .to_json()
        .map_err(|error| error.to_string())
}

#[wasm_bindgen]
pub fn layout_sankey(graph_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<SankeyLayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        SankeyLayoutOptions::default()
    };

    layout_json(graph_json, options).map_err(|error| JsValue::from_str(&error))
}
