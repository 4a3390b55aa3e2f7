//! Diagram export: Mermaid state diagrams and DOT (Graphviz).
//!
//! Both exporters are read-only traversals of the node store. They return the
//! rendered text; writing it somewhere is up to the caller.
//!
//! # Mermaid
//!
//! [`to_mermaid`][Bdd::to_mermaid] renders the subgraph below one root as a
//! `stateDiagram-v2` inside a fenced `mermaid` block, ready to be pasted into
//! Markdown. Each non-terminal node contributes two transitions, `id --> low: 0`
//! and `id --> high: 1`. The terminals are styled as leaves.
//!
//! # DOT
//!
//! [`to_dot`][Bdd::to_dot] follows the usual conventions:
//! - **Terminal nodes** (0 and 1) are squares at the bottom (sink rank)
//! - **Variable nodes** are circles labelled with the variable name, grouped by level
//! - **Edges**: solid lines for high edges, dashed lines for low edges
//! - **Root nodes** are rectangles at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use reach_bdd::bdd::Bdd;
//!
//! let bdd = Bdd::default();
//! let x = bdd.create_var("x");
//! let y = bdd.create_var("y");
//! let f = bdd.apply_and(x, y);
//!
//! let mermaid = bdd.to_mermaid(f).unwrap();
//! assert!(mermaid.starts_with("```mermaid\nstateDiagram-v2\n"));
//!
//! let dot = bdd.to_dot(&[f]).unwrap();
//! // Render with: dot -Tpng output.dot -o output.png
//! assert!(dot.starts_with("graph {"));
//! ```

use std::collections::{BTreeMap, HashSet};
use std::fmt::Write as _;

use crate::bdd::Bdd;
use crate::reference::NodeId;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for variable nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for terminal nodes (default: "square")
    pub terminal_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for high (then) edges (default: "solid")
    pub high_edge_style: &'static str,
    /// Style for low (else) edges (default: "dashed")
    pub low_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            root_shape: "rect",
            high_edge_style: "solid",
            low_edge_style: "dashed",
        }
    }
}

impl Bdd {
    /// The `(id, low, high)` triple of every non-terminal node below `root`.
    ///
    /// Nodes are listed in pre-order (high branch first) and each appears once.
    ///
    /// # Panics
    ///
    /// Panics if `root` is not a stored identifier.
    pub fn edges(&self, root: NodeId) -> Vec<(NodeId, NodeId, NodeId)> {
        self.assert_valid(root);
        let mut edges = Vec::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(f) = stack.pop() {
            if f.is_constant() || !visited.insert(f) {
                continue;
            }
            let node = self.get_node(f);
            edges.push((f, node.low, node.high));
            stack.push(node.low);
            stack.push(node.high);
        }

        edges
    }

    /// Render the subgraph below `root` as a Mermaid state diagram.
    pub fn to_mermaid(&self, root: NodeId) -> Result<String, std::fmt::Error> {
        let mut out = String::new();
        writeln!(out, "```mermaid")?;
        writeln!(out, "stateDiagram-v2")?;
        for (id, low, high) in self.edges(root) {
            writeln!(out, "{} --> {}: 0", id, low)?;
            writeln!(out, "{} --> {}: 1", id, high)?;
        }
        writeln!(out, "classDef leaf fill:white")?;
        writeln!(out, "class 1 leaf")?;
        writeln!(out, "class 0 leaf")?;
        write!(out, "```")?;
        Ok(out)
    }

    /// Render every node reachable from `roots` in DOT format.
    ///
    /// Shared nodes are emitted once, so several related functions can be drawn together.
    pub fn to_dot(&self, roots: &[NodeId]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    pub fn to_dot_with_config(&self, roots: &[NodeId], config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "graph {{")?;
        writeln!(dot, "node [shape={}, fixedsize=true];", config.node_shape)?;

        // Terminal nodes
        writeln!(dot, "{{ rank=sink")?;
        writeln!(dot, "0 [shape={}, label=\"0\"];", config.terminal_shape)?;
        writeln!(dot, "1 [shape={}, label=\"1\"];", config.terminal_shape)?;
        writeln!(dot, "}}")?;

        let mut all_edges = Vec::new();
        let mut seen = HashSet::new();
        for &root in roots {
            for edge in self.edges(root) {
                if seen.insert(edge.0) {
                    all_edges.push(edge);
                }
            }
        }

        // Group nodes by their variable, so that each level gets its own rank
        let mut levels = BTreeMap::<NodeId, Vec<NodeId>>::new();
        for &(id, _, _) in &all_edges {
            levels.entry(self.var_of(id)).or_default().push(id);
        }
        for (var, ids) in &levels {
            let name = self.label_or_id(*var);
            writeln!(dot, "{{ rank=same")?;
            for id in ids {
                writeln!(dot, "{} [label=\"{}\"];", id, name)?;
            }
            writeln!(dot, "}}")?;
        }

        for &(id, low, high) in &all_edges {
            writeln!(dot, "{} -- {} [style={}];", id, high, config.high_edge_style)?;
            writeln!(dot, "{} -- {} [style={}];", id, low, config.low_edge_style)?;
        }

        writeln!(dot, "{{ rank=source")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} [shape={}, label=\"{}\"];", i, config.root_shape, root)?;
        }
        writeln!(dot, "}}")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -- {};", i, root)?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
