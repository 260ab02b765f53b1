#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod path;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, SankeyConfig};
pub use engine::Sankey;
pub use error::LayoutError;
pub use ir::{Graph, Link, Node, NodeRef, SortKey};
pub use layout::{
    LayoutWarning, LinkLayout, NodeLayout, SankeyLayout, compute_layout, relayout,
};
pub use layout_dump::LayoutDump;
pub use path::LinkPath;
