use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("link {link} references node index {index}, but only {len} nodes exist")]
    InvalidReference { link: usize, index: usize, len: usize },

    #[error("link {link} references unknown node id {id:?}")]
    UnknownNode { link: usize, id: String },

    #[error("duplicate node id {id:?}")]
    DuplicateNode { id: String },

    #[error("link {link} has invalid value {value} (must be finite and non-negative)")]
    InvalidLinkValue { link: usize, value: f64 },

    #[error("invalid configuration: {field} = {value}")]
    InvalidConfiguration { field: &'static str, value: f64 },
}
