use thiserror::Error;

use crate::NodeId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid node: {0} is not part of the graph")]
    InvalidNode(NodeId),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
