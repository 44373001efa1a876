//! Error types.
//!
//! Geometry and routing problems are recovered where they occur (a bad
//! length becomes 0, an event for a vanished id is dropped) and only traced.
//! The variants that reach callers as `Err` are structural misuse of the
//! tree or builder, and configuration loading failures.

use thiserror::Error;

use crate::layout::NodeId;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("missing intrinsic size: {0}")]
    MissingIntrinsicSize(String),

    #[error("unaddressable target: {0}")]
    UnaddressableTarget(String),

    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} is not a container")]
    NotAContainer(NodeId),

    #[error("moving {node:?} under {parent:?} would create a cycle")]
    WouldCycle { node: NodeId, parent: NodeId },

    #[error("builder finished with {0} container(s) still open")]
    UnbalancedBuilder(usize),

    #[error("no container is open")]
    NoOpenContainer,

    #[error("tree has no root")]
    EmptyTree,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
