//! Route trees for FPGA interconnect routing.
//!
//! A route tree records how one signal travels through the fabric: each node
//! occupies a physical [`Wire`](wirefab_device::Wire), and each edge is the
//! [`Connection`](wirefab_device::Connection) (a PIP or a fixed wire step)
//! from the parent's wire to the child's.
//!
//! Nodes live in a [`RouteForest`] and are addressed by [`NodeId`] handles.
//! A forest can hold many trees at once; trees are grafted together with
//! [`RouteForest::adopt`], split with [`RouteForest::disconnect`], trimmed to
//! the branches that reach a set of terminals with [`RouteForest::prune`],
//! and copied with [`RouteForest::deep_copy`].

#![warn(missing_docs)]

pub mod check;
pub mod error;
pub mod forest;
pub mod ids;
pub mod iter;

pub use error::{RouteResult, RouteTreeError};
pub use forest::RouteForest;
pub use ids::NodeId;
pub use iter::{Iter, Preorder};
