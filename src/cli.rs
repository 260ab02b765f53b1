use crate::config::{Config, load_config};
use crate::ir::Graph;
use crate::layout::compute_layout;
use crate::layout_dump::write_layout_dump;
use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "sankey", version, about = "Sankey diagram layout engine")]
pub struct Args {
    /// Input graph (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file for the layout JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config JSON file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Relaxation iterations
    #[arg(short = 'n', long = "iterations")]
    pub iterations: Option<usize>,

    /// Canvas width
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// Canvas height
    #[arg(short = 'H', long = "height")]
    pub height: Option<f64>,

    /// Node width
    #[arg(long = "nodeWidth")]
    pub node_width: Option<f64>,

    /// Vertical padding between nodes in a column
    #[arg(long = "nodePadding")]
    pub node_padding: Option<f64>,

    /// Link curvature in [0, 1]
    #[arg(long = "curvature")]
    pub curvature: Option<f64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    pub log_level: String,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logger(&args.log_level);
    debug!(args:?; "parsed arguments");

    let config = apply_overrides(load_config(args.config.as_deref())?, &args);
    let input = read_input(args.input.as_deref())?;
    let graph: Graph = serde_json::from_str(&input).context("failed to parse input graph")?;

    let layout = compute_layout(&graph, &config.sankey, config.iterations)?;
    info!(
        nodes = layout.nodes.len(),
        links = layout.links.len(),
        warnings = layout.warnings.len();
        "layout complete"
    );
    write_layout_dump(args.output.as_deref(), &layout, config.curvature)?;
    Ok(())
}

fn init_logger(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Invalid log level: {level}. Using 'warn' instead.");
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

fn apply_overrides(mut config: Config, args: &Args) -> Config {
    if let Some(iterations) = args.iterations {
        config.iterations = iterations;
    }
    if let Some(width) = args.width {
        config.sankey.size[0] = width;
    }
    if let Some(height) = args.height {
        config.sankey.size[1] = height;
    }
    if let Some(node_width) = args.node_width {
        config.sankey.node_width = node_width;
    }
    if let Some(node_padding) = args.node_padding {
        config.sankey.node_padding = node_padding;
    }
    if let Some(curvature) = args.curvature {
        config.curvature = curvature;
    }
    config
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_file_values() {
        let args = Args::parse_from([
            "sankey",
            "-n",
            "5",
            "-w",
            "960",
            "-H",
            "500",
            "--nodeWidth",
            "15",
            "--curvature",
            "0.3",
        ]);
        let config = apply_overrides(Config::default(), &args);
        assert_eq!(config.iterations, 5);
        assert_eq!(config.sankey.size, [960.0, 500.0]);
        assert_eq!(config.sankey.node_width, 15.0);
        assert_eq!(config.sankey.node_padding, 8.0);
        assert_eq!(config.curvature, 0.3);
    }

    #[test]
    fn long_flag_names_parse() {
        let args = Args::parse_from([
            "sankey",
            "--configFile",
            "sankey.json",
            "--nodeWidth",
            "12",
            "--nodePadding",
            "3",
            "--curvature",
            "0.25",
        ]);
        assert_eq!(args.config.as_deref(), Some(Path::new("sankey.json")));
        let config = apply_overrides(Config::default(), &args);
        assert_eq!(config.sankey.node_width, 12.0);
        assert_eq!(config.sankey.node_padding, 3.0);
        assert_eq!(config.curvature, 0.25);
    }

    #[test]
    fn absent_flags_keep_config() {
        let args = Args::parse_from(["sankey"]);
        let config = apply_overrides(Config::default(), &args);
        assert_eq!(config, Config::default());
        assert_eq!(args.log_level, "warn");
    }
}
