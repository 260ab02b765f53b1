use crate::error::LayoutError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ITERATIONS: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SankeyConfig {
    pub node_width: f64,
    pub node_padding: f64,
    /// Canvas `[width, height]`.
    pub size: [f64; 2],
}

impl Default for SankeyConfig {
    fn default() -> Self {
        Self {
            node_width: 24.0,
            node_padding: 8.0,
            size: [960.0, 500.0],
        }
    }
}

impl SankeyConfig {
    pub fn width(&self) -> f64 {
        self.size[0]
    }

    pub fn height(&self) -> f64 {
        self.size[1]
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let checks = [
            ("nodeWidth", self.node_width),
            ("nodePadding", self.node_padding),
            ("size.width", self.size[0]),
            ("size.height", self.size[1]),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value <= 0.0 {
                return Err(LayoutError::InvalidConfiguration { field, value });
            }
        }
        // The last column's left edge sits at width - nodeWidth.
        if self.size[0] < self.node_width {
            return Err(LayoutError::InvalidConfiguration {
                field: "size.width",
                value: self.size[0],
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub sankey: SankeyConfig,
    pub iterations: usize,
    pub curvature: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sankey: SankeyConfig::default(),
            iterations: DEFAULT_ITERATIONS,
            curvature: crate::path::DEFAULT_CURVATURE,
        }
    }
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    Ok(config)
}
