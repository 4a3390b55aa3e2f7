use std::collections::HashMap;

use num_bigint::BigUint;

use crate::bdd::Bdd;
use crate::reference::NodeId;

impl Bdd {
    /// Returns one satisfying assignment for the function, if any exists.
    ///
    /// The assignment lists the variables along one path to the true terminal
    /// together with their values. Variables not on the path are free.
    ///
    /// Returns `None` if `node` is the constant false function.
    pub fn one_sat(&self, node: NodeId) -> Option<Vec<(NodeId, bool)>> {
        self.assert_valid(node);
        if self.is_zero(node) {
            return None;
        }

        let mut path = Vec::new();
        let mut current = node;

        // In a reduced diagram every non-false node has a path to true,
        // so the walk never gets stuck.
        while !self.is_one(current) {
            let node = self.get_node(current);
            if !self.is_zero(node.high) {
                path.push((node.top_var, true));
                current = node.high;
            } else {
                path.push((node.top_var, false));
                current = node.low;
            }
        }

        Some(path)
    }

    /// Number of satisfying assignments of `node` over `num_vars` variables.
    ///
    /// `num_vars` must cover every variable in the support of `node`.
    pub fn sat_count(&self, node: NodeId, num_vars: usize) -> BigUint {
        self.assert_valid(node);
        let mut cache = HashMap::new();
        let max = BigUint::from(2u32).pow(num_vars as u32);
        self.sat_count_(node, &max, &mut cache)
    }

    fn sat_count_(&self, node: NodeId, max: &BigUint, cache: &mut HashMap<NodeId, BigUint>) -> BigUint {
        if self.is_zero(node) {
            return BigUint::ZERO;
        } else if self.is_one(node) {
            return max.clone();
        }

        if let Some(count) = cache.get(&node) {
            return count.clone();
        }

        let n = self.get_node(node);
        let count_low = self.sat_count_(n.low, max, cache);
        let count_high = self.sat_count_(n.high, max, cache);

        // Each branch fixes the top variable, halving the space it counts over.
        let count: BigUint = (count_low + count_high) >> 1;

        cache.insert(node, count.clone());
        count
    }
}
