//! Debug utilities: labels, graph discovery and node inspection.
//!
//! Nothing here is needed for correctness. Labels are attached at variable
//! creation (and optionally to operator results, see
//! [`BddConfig::label_operations`][crate::bdd::BddConfig::label_operations]).

use std::collections::{BTreeSet, HashSet};

use crate::bdd::Bdd;
use crate::error::Result;
use crate::reference::NodeId;

/// Detailed information about a single node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NodeInfo {
    pub id: NodeId,
    pub top_var: NodeId,
    pub low: NodeId,
    pub high: NodeId,
    pub label: Option<String>,
    pub top_var_name: String,
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.id.is_constant() {
            return write!(f, "{}", if self.id == NodeId::TRUE { "ONE" } else { "ZERO" });
        }
        write!(
            f,
            "{}(var={}, low={}, high={})",
            self.id,
            if self.top_var_name.is_empty() {
                self.top_var.to_string()
            } else {
                self.top_var_name.clone()
            },
            self.low,
            self.high,
        )?;
        if let Some(label) = &self.label {
            write!(f, " \"{}\"", label)?;
        }
        Ok(())
    }
}

impl Bdd {
    /// Label attached to `f`, if any.
    pub fn label(&self, f: NodeId) -> Result<Option<String>> {
        self.check(f)?;
        Ok(self.labels.borrow().get(&f).cloned())
    }

    /// Label of the variable (or terminal) that `f` branches on, empty if unlabelled.
    pub fn top_var_name(&self, f: NodeId) -> Result<String> {
        let top_var = self.top_var(f)?;
        Ok(self.labels.borrow().get(&top_var).cloned().unwrap_or_default())
    }

    pub(crate) fn label_or_id(&self, f: NodeId) -> String {
        self.labels
            .borrow()
            .get(&f)
            .cloned()
            .unwrap_or_else(|| f.to_string())
    }

    pub fn node_info(&self, f: NodeId) -> Result<NodeInfo> {
        let node = self.node(f)?;
        Ok(NodeInfo {
            id: f,
            top_var: node.top_var,
            low: node.low,
            high: node.high,
            label: self.label(f)?,
            top_var_name: self.top_var_name(f)?,
        })
    }

    /// All nodes reachable from `root`, including `root` itself and the reached terminals.
    pub fn find_nodes(&self, root: NodeId) -> Result<BTreeSet<NodeId>> {
        self.check(root)?;
        let mut visited = BTreeSet::new();
        let mut stack = vec![root];

        while let Some(f) = stack.pop() {
            if visited.insert(f) && !f.is_constant() {
                let node = self.get_node(f);
                stack.push(node.low);
                stack.push(node.high);
            }
        }

        Ok(visited)
    }

    /// The support of `root`: every variable some reachable node branches on.
    pub fn find_vars(&self, root: NodeId) -> Result<BTreeSet<NodeId>> {
        self.check(root)?;
        let mut vars = BTreeSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![root];

        while let Some(f) = stack.pop() {
            if f.is_constant() || !visited.insert(f) {
                continue;
            }
            let node = self.get_node(f);
            vars.insert(node.top_var);
            stack.push(node.low);
            stack.push(node.high);
        }

        Ok(vars)
    }

    /// Number of nodes reachable from `f`, terminals included.
    pub fn size(&self, f: NodeId) -> Result<usize> {
        self.find_nodes(f).map(|nodes| nodes.len())
    }

    /// Evaluate `f` under the assignment `value(var)`.
    pub fn evaluate(&self, f: NodeId, value: impl Fn(NodeId) -> bool) -> Result<bool> {
        self.check(f)?;
        let mut current = f;
        while !current.is_constant() {
            let node = self.get_node(current);
            current = if value(node.top_var) { node.high } else { node.low };
        }
        Ok(current == NodeId::TRUE)
    }

    /// Check `root` against `expected_fn` on every assignment of `vars`.
    ///
    /// Returns the failing assignments together with the expected and actual values.
    pub fn verify_truth_table(
        &self,
        root: NodeId,
        vars: &[NodeId],
        expected_fn: impl Fn(&[bool]) -> bool,
    ) -> Result<Vec<(Vec<bool>, bool, bool)>> {
        let mut failures = Vec::new();
        let n = vars.len();

        for bits in 0..(1u64 << n) {
            let assignment: Vec<bool> = (0..n).map(|i| (bits >> i) & 1 == 1).collect();
            let actual = self.evaluate(root, |v| {
                vars.iter()
                    .position(|&u| u == v)
                    .is_some_and(|i| assignment[i])
            })?;
            let expected = expected_fn(&assignment);

            if actual != expected {
                failures.push((assignment, expected, actual));
            }
        }

        Ok(failures)
    }
}
