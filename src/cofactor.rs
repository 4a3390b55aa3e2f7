//! Cofactors (restriction of one variable) and existential quantification.

use std::collections::HashMap;

use log::debug;

use crate::bdd::Bdd;
use crate::reference::NodeId;

impl Bdd {
    /// Positive cofactor `f|x=1`.
    ///
    /// `x` is the identifier of a variable. Returns `f` unchanged when `f` does
    /// not depend on `x`.
    pub fn cofactor_true(&self, f: NodeId, x: NodeId) -> NodeId {
        self.assert_valid(f);
        self.assert_valid(x);
        self.cofactor(f, x, true)
    }

    /// Negative cofactor `f|x=0`.
    pub fn cofactor_false(&self, f: NodeId, x: NodeId) -> NodeId {
        self.assert_valid(f);
        self.assert_valid(x);
        self.cofactor(f, x, false)
    }

    /// Positive cofactor of `f` w.r.t. its own top variable, i.e. its high child.
    pub fn cofactor_true_top(&self, f: NodeId) -> NodeId {
        self.assert_valid(f);
        self.cofactor(f, self.var_of(f), true)
    }

    /// Negative cofactor of `f` w.r.t. its own top variable, i.e. its low child.
    pub fn cofactor_false_top(&self, f: NodeId) -> NodeId {
        self.assert_valid(f);
        self.cofactor(f, self.var_of(f), false)
    }

    fn cofactor(&self, f: NodeId, x: NodeId, value: bool) -> NodeId {
        debug!("cofactor(f = {}, x = {}, value = {})", f, x, value);
        let mut cache = HashMap::new();
        self.cofactor_(f, x, value, &mut cache)
    }

    fn cofactor_(&self, f: NodeId, x: NodeId, value: bool, cache: &mut HashMap<NodeId, NodeId>) -> NodeId {
        if f.is_constant() || x.is_constant() {
            return f;
        }

        let node = self.get_node(f);
        if node.top_var > x {
            // 'f' does not depend on 'x'
            return f;
        }
        if node.top_var == x {
            return if value { node.high } else { node.low };
        }

        if let Some(&res) = cache.get(&f) {
            return res;
        }

        let high = self.cofactor_(node.high, x, value, cache);
        let low = self.cofactor_(node.low, x, value, cache);
        let res = self.apply_ite(node.top_var, high, low);
        cache.insert(f, res);
        res
    }

    /// Existential quantification `∃vars. f`.
    ///
    /// Each variable is eliminated as `f|v=1 ∨ f|v=0`. The result does not
    /// depend on the order of `vars`.
    pub fn exists(&self, f: NodeId, vars: impl IntoIterator<Item = NodeId>) -> NodeId {
        debug!("exists(f = {}, ...)", f);
        self.assert_valid(f);
        let mut res = f;
        for v in vars {
            self.assert_valid(v);
            if res.is_constant() {
                break;
            }
            let high = self.cofactor(res, v, true);
            let low = self.cofactor(res, v, false);
            res = self.apply_ite(high, NodeId::TRUE, low);
        }
        res
    }
}
