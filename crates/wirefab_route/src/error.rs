//! Route-tree errors.

use crate::ids::NodeId;
use wirefab_device::{Connection, Wire};

/// Errors raised by route-tree mutations.
///
/// Every failing operation leaves the forest exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTreeError {
    /// A node handle does not refer to a live node of this forest.
    #[error("invalid argument: {0} is not a live node of this forest")]
    InvalidArgument(NodeId),

    /// A connection does not start at the wire of the node being extended.
    #[error("connection starts at {found}, but the node occupies {expected}")]
    WireMismatch {
        /// The wire of the node being extended.
        expected: Wire,
        /// The source wire of the connection.
        found: Wire,
    },

    /// The node to adopt already has a parent.
    #[error("node {0} already has a parent")]
    AlreadySourced(NodeId),

    /// No child of the node is reached through the given connection.
    #[error("no child of {node} is reached through {connection}")]
    NotFound {
        /// The node searched.
        node: NodeId,
        /// The connection looked for.
        connection: Connection,
    },

    /// Joining two trees would break the tree structure.
    #[error("cannot join route trees: {0}")]
    DesignAssembly(String),
}

/// Result alias for route-tree operations.
pub type RouteResult<T> = Result<T, RouteTreeError>;
