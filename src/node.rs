use std::fmt::{Display, Formatter};

use crate::reference::NodeId;

/// A decision node: `low` when `top_var` is false, `high` when it is true.
///
/// Terminals branch on themselves (`top_var` equals their own identifier) and
/// point to themselves on both edges. A variable node also branches on itself,
/// with `low = FALSE` and `high = TRUE`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Node {
    pub low: NodeId,
    pub high: NodeId,
    pub top_var: NodeId,
}

impl Node {
    pub const FALSE: Node = Node::new(NodeId::FALSE, NodeId::FALSE, NodeId::FALSE);
    pub const TRUE: Node = Node::new(NodeId::TRUE, NodeId::TRUE, NodeId::TRUE);

    pub const fn new(low: NodeId, high: NodeId, top_var: NodeId) -> Self {
        Self { low, high, top_var }
    }

    /// The node of a fresh variable that will be stored under `id`.
    pub const fn variable(id: NodeId) -> Self {
        Self::new(NodeId::FALSE, NodeId::TRUE, id)
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.low, self.high, self.top_var)
    }
}
