use std::ops::Index;

use log::debug;

use crate::cache::{Cache, CacheStats};
use crate::error::{BddError, Result};
use crate::node::Node;
use crate::reference::NodeId;

/// Append-only node arena together with its unique table.
///
/// Every stored triple is registered in the unique table, so [`put`][Table::put]
/// returns the same identifier for the same `(low, high, top_var)` triple.
/// Nodes are never removed.
pub struct Table {
    nodes: Vec<Node>,
    unique: Cache<Node, NodeId>,
}

impl Table {
    /// Create a table holding only the two terminals, with room for `2^bits` nodes.
    pub fn new(bits: usize) -> Self {
        assert!(bits <= 31, "Storage bits should be in the range 0..=31");

        let mut table = Self {
            nodes: Vec::with_capacity(1 << bits),
            unique: Cache::new(bits),
        };
        let zero = table.put(Node::FALSE);
        let one = table.put(Node::TRUE);
        assert_eq!(zero, NodeId::FALSE);
        assert_eq!(one, NodeId::TRUE);
        table
    }

    /// Create a table pre-seeded with `nodes`, stored at their positions.
    ///
    /// The first two entries must be exactly the false and true terminals, and
    /// every edge and top variable must point inside the seed. The remaining
    /// nodes must be reduced, ordered and pairwise distinct.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        if nodes.len() < 2 {
            return Err(BddError::InvalidConstruction {
                reason: format!("expected at least the two terminal nodes, got {} node(s)", nodes.len()),
            });
        }
        if nodes[0] != Node::FALSE || nodes[1] != Node::TRUE {
            return Err(BddError::InvalidConstruction {
                reason: "true and false nodes are invalid".to_string(),
            });
        }
        let len = nodes.len();
        for (i, node) in nodes.iter().enumerate() {
            if [node.low, node.high, node.top_var].iter().any(|id| id.index() >= len) {
                return Err(BddError::InvalidConstruction {
                    reason: format!("node {} = {} points outside of the {} seeded nodes", i, node, len),
                });
            }
        }

        for (i, node) in nodes.iter().enumerate().skip(2) {
            check_seeded(&nodes, NodeId::new(i as u32), node)?;
        }

        let mut unique = Cache::new(0);
        for (i, &node) in nodes.iter().enumerate() {
            let id = NodeId::new(i as u32);
            let existing = unique.insert(node, id);
            if existing != id {
                return Err(BddError::InvalidConstruction {
                    reason: format!("node {} = {} duplicates node {}", id, node, existing),
                });
            }
        }
        debug!("seeded table with {} nodes ({} unique)", len, unique.len());

        Ok(Self { nodes, unique })
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of entries in the unique table.
    pub fn unique_len(&self) -> usize {
        self.unique.len()
    }

    pub fn stats(&self) -> CacheStats {
        self.unique.stats()
    }

    /// Identifier the next appended node will receive.
    pub fn next_id(&self) -> NodeId {
        NodeId::new(self.nodes.len() as u32)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Bounds-checked lookup.
    pub fn try_get(&self, id: NodeId) -> Result<Node> {
        self.get(id).copied().ok_or(BddError::InvalidIdentifier {
            id,
            size: self.nodes.len(),
        })
    }

    /// Return the identifier of `node`, appending it if the triple is new.
    ///
    /// No reduction is applied here: callers must not pass `low == high` for
    /// non-terminal nodes.
    pub fn put(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.unique.get(&node) {
            return id;
        }
        let id = self.next_id();
        assert!(id.get() < u32::MAX, "Storage is full");
        self.nodes.push(node);
        self.unique.insert(node, id);
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId::new(i as u32), node))
    }
}

/// Check that the non-terminal `node` stored under `id` is a variable node or a
/// reduced node whose children branch on later variables.
fn check_seeded(nodes: &[Node], id: NodeId, node: &Node) -> Result<()> {
    let invalid = |reason: &str| BddError::InvalidConstruction {
        reason: format!("node {} = {} {}", id, node, reason),
    };

    if node.top_var == id {
        if node.low != NodeId::FALSE || node.high != NodeId::TRUE {
            return Err(invalid("branches on itself but is not a variable"));
        }
        return Ok(());
    }
    if node.top_var.is_constant() || nodes[node.top_var.index()] != Node::variable(node.top_var) {
        return Err(invalid("does not branch on a variable"));
    }
    if node.low == node.high {
        return Err(invalid("is redundant"));
    }
    for child in [node.low, node.high] {
        if !child.is_constant() && nodes[child.index()].top_var <= node.top_var {
            return Err(invalid("breaks the variable order"));
        }
    }
    Ok(())
}

impl Index<NodeId> for Table {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        match self.nodes.get(id.index()) {
            Some(node) => node,
            None => panic!("Invalid node identifier {} (store holds {} nodes)", id, self.nodes.len()),
        }
    }
}
