//! Route-tree node handles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A handle to a node of a [`RouteForest`](crate::RouteForest).
///
/// Handles carry the generation of the slot they were issued for, so a handle
/// to a node freed by [`release`](crate::RouteForest::release) is never
/// confused with a node later allocated in the same slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index of this handle.
    pub fn index(self) -> u32 {
        self.index
    }

    /// Returns the slot generation this handle was issued for.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "n{}", self.index)
        } else {
            write!(f, "n{}.{}", self.index, self.generation)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(NodeId::new(3, 0).to_string(), "n3");
        assert_eq!(NodeId::new(3, 2).to_string(), "n3.2");
    }

    #[test]
    fn generation_distinguishes_handles() {
        assert_ne!(NodeId::new(1, 0), NodeId::new(1, 1));
    }

    #[test]
    fn serde_roundtrip() {
        let id = NodeId::new(7, 1);
        let json = serde_json::to_string(&id).unwrap();
        let back: NodeId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
