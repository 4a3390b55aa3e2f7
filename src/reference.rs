use std::fmt::{Display, Formatter};

/// Identifier of a node in the [`Bdd`][crate::bdd::Bdd] store.
///
/// Identifiers are dense indices into the node arena. They are handed out in
/// creation order and are never reused, so a variable's identifier doubles as
/// its position in the variable order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The constant false function.
    pub const FALSE: NodeId = NodeId(0);
    /// The constant true function.
    pub const TRUE: NodeId = NodeId(1);

    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Return the raw identifier.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Return the identifier as an index into the node arena.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn is_constant(self) -> bool {
        self.0 <= 1
    }
}

impl From<bool> for NodeId {
    fn from(value: bool) -> Self {
        if value {
            NodeId::TRUE
        } else {
            NodeId::FALSE
        }
    }
}

impl From<NodeId> for u32 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(NodeId::FALSE.get(), 0);
        assert_eq!(NodeId::TRUE.get(), 1);
        assert!(NodeId::FALSE.is_constant());
        assert!(NodeId::TRUE.is_constant());
        assert!(!NodeId::new(2).is_constant());
    }

    #[test]
    fn test_from_bool() {
        assert_eq!(NodeId::from(false), NodeId::FALSE);
        assert_eq!(NodeId::from(true), NodeId::TRUE);
    }

    #[test]
    fn test_order_follows_creation() {
        assert!(NodeId::new(2) < NodeId::new(3));
        assert_eq!(NodeId::new(7).index(), 7);
        assert_eq!(NodeId::new(7).to_string(), "7");
    }
}
