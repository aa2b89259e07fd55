use std::fmt::{Display, Formatter};

/// Stable handle of a node that was queued during an enumeration.
///
/// Handles are allocated in push order, starting from the root at `@0`, and
/// double as indices into the [`Diagram`][crate::diagram::Diagram].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the index of the handle.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.0)
    }
}
