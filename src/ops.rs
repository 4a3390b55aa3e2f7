//! Boolean operators derived from [`ite`][Bdd::ite].

use log::debug;

use crate::bdd::Bdd;
use crate::reference::NodeId;

impl Bdd {
    pub fn apply_not(&self, f: NodeId) -> NodeId {
        debug!("apply_not(f = {})", f);
        self.assert_valid(f);
        let res = self.apply_ite(f, NodeId::FALSE, NodeId::TRUE);
        if self.label_operations {
            let label = format!("~{}", self.label_or_id(f));
            self.labels.borrow_mut().entry(res).or_insert(label);
        }
        res
    }

    pub fn apply_and(&self, u: NodeId, v: NodeId) -> NodeId {
        debug!("apply_and(u = {}, v = {})", u, v);
        self.binary("and2", u, v, |bdd| bdd.apply_ite(u, v, NodeId::FALSE))
    }

    pub fn apply_or(&self, u: NodeId, v: NodeId) -> NodeId {
        debug!("apply_or(u = {}, v = {})", u, v);
        self.binary("or2", u, v, |bdd| bdd.apply_ite(u, NodeId::TRUE, v))
    }

    pub fn apply_xor(&self, u: NodeId, v: NodeId) -> NodeId {
        debug!("apply_xor(u = {}, v = {})", u, v);
        self.binary("xor2", u, v, |bdd| {
            let not_v = bdd.apply_ite(v, NodeId::FALSE, NodeId::TRUE);
            bdd.apply_ite(u, not_v, v)
        })
    }

    pub fn apply_nand(&self, u: NodeId, v: NodeId) -> NodeId {
        debug!("apply_nand(u = {}, v = {})", u, v);
        self.binary("nand2", u, v, |bdd| {
            let not_v = bdd.apply_ite(v, NodeId::FALSE, NodeId::TRUE);
            bdd.apply_ite(u, not_v, NodeId::TRUE)
        })
    }

    pub fn apply_nor(&self, u: NodeId, v: NodeId) -> NodeId {
        debug!("apply_nor(u = {}, v = {})", u, v);
        self.binary("nor2", u, v, |bdd| {
            let not_v = bdd.apply_ite(v, NodeId::FALSE, NodeId::TRUE);
            bdd.apply_ite(u, NodeId::FALSE, not_v)
        })
    }

    /// Equivalence, `u ↔ v`.
    pub fn apply_xnor(&self, u: NodeId, v: NodeId) -> NodeId {
        debug!("apply_xnor(u = {}, v = {})", u, v);
        self.binary("xnor2", u, v, |bdd| {
            let not_v = bdd.apply_ite(v, NodeId::FALSE, NodeId::TRUE);
            bdd.apply_ite(u, v, not_v)
        })
    }

    pub fn apply_and_many(&self, nodes: impl IntoIterator<Item = NodeId>) -> NodeId {
        debug!("apply_and_many(...)");
        let mut res = NodeId::TRUE;
        for node in nodes {
            res = self.apply_and(res, node);
        }
        res
    }

    pub fn apply_or_many(&self, nodes: impl IntoIterator<Item = NodeId>) -> NodeId {
        debug!("apply_or_many(...)");
        let mut res = NodeId::FALSE;
        for node in nodes {
            res = self.apply_or(res, node);
        }
        res
    }

    fn binary(&self, op: &str, u: NodeId, v: NodeId, apply: impl FnOnce(&Self) -> NodeId) -> NodeId {
        self.assert_valid(u);
        self.assert_valid(v);
        let res = apply(self);
        if self.label_operations {
            let label = format!("{}({},{})", op, self.label_or_id(u), self.label_or_id(v));
            self.labels.borrow_mut().entry(res).or_insert(label);
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::bdd::BddConfig;

    const T: NodeId = NodeId::TRUE;
    const F: NodeId = NodeId::FALSE;

    #[test]
    fn test_truth_tables() {
        let bdd = Bdd::default();
        let b = |x: bool| NodeId::from(x);

        for x in [false, true] {
            for y in [false, true] {
                assert_eq!(bdd.apply_and(b(x), b(y)), b(x && y), "and({}, {})", x, y);
                assert_eq!(bdd.apply_or(b(x), b(y)), b(x || y), "or({}, {})", x, y);
                assert_eq!(bdd.apply_xor(b(x), b(y)), b(x ^ y), "xor({}, {})", x, y);
                assert_eq!(bdd.apply_nand(b(x), b(y)), b(!(x && y)), "nand({}, {})", x, y);
                assert_eq!(bdd.apply_nor(b(x), b(y)), b(!(x || y)), "nor({}, {})", x, y);
                assert_eq!(bdd.apply_xnor(b(x), b(y)), b(x == y), "xnor({}, {})", x, y);
            }
            assert_eq!(bdd.apply_not(b(x)), b(!x));
        }
    }

    #[test]
    fn test_absorbing_elements() {
        let bdd = Bdd::default();
        let x = bdd.create_var("x");

        assert_eq!(bdd.apply_and(F, x), F);
        assert_eq!(bdd.apply_and(x, T), x);
        assert_eq!(bdd.apply_or(T, x), T);
        assert_eq!(bdd.apply_or(x, F), x);
        assert_eq!(bdd.apply_xor(x, x), F);
        assert_eq!(bdd.apply_xnor(x, x), T);
        assert_eq!(bdd.apply_and(x, bdd.apply_not(x)), F);
        assert_eq!(bdd.apply_or(x, bdd.apply_not(x)), T);
    }

    #[test]
    fn test_double_negation() {
        let bdd = Bdd::default();
        let x = bdd.create_var("x");
        let y = bdd.create_var("y");
        let f = bdd.apply_and(x, y);

        assert_eq!(bdd.apply_not(bdd.apply_not(f)), f);
    }

    #[test]
    fn test_de_morgan() {
        let bdd = Bdd::default();
        let x = bdd.create_var("x");
        let y = bdd.create_var("y");

        let f = bdd.apply_not(bdd.apply_and(x, y));
        let g = bdd.apply_or(bdd.apply_not(x), bdd.apply_not(y));
        assert_eq!(f, g);
        assert_eq!(f, bdd.apply_nand(x, y));

        let f = bdd.apply_not(bdd.apply_or(x, y));
        let g = bdd.apply_and(bdd.apply_not(x), bdd.apply_not(y));
        assert_eq!(f, g);
        assert_eq!(f, bdd.apply_nor(x, y));
    }

    #[test]
    fn test_commutativity() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");
        let c = bdd.create_var("c");
        let f = bdd.apply_xor(a, c);
        let g = bdd.apply_or(b, c);

        assert_eq!(bdd.apply_and(f, g), bdd.apply_and(g, f));
        assert_eq!(bdd.apply_or(f, g), bdd.apply_or(g, f));
        assert_eq!(bdd.apply_xor(f, g), bdd.apply_xor(g, f));
        assert_eq!(bdd.apply_xnor(f, g), bdd.apply_xnor(g, f));
    }

    #[test]
    fn test_xnor_is_not_xor() {
        let bdd = Bdd::default();
        let x = bdd.create_var("x");
        let y = bdd.create_var("y");

        assert_eq!(bdd.apply_xnor(x, y), bdd.apply_not(bdd.apply_xor(x, y)));
    }

    #[test]
    fn test_and_or_many() {
        let bdd = Bdd::default();
        let x = bdd.create_var("x");
        let y = bdd.create_var("y");
        let z = bdd.create_var("z");

        assert_eq!(bdd.apply_and_many([]), T);
        assert_eq!(bdd.apply_or_many([]), F);
        assert_eq!(bdd.apply_and_many([x, y, z]), bdd.apply_and(bdd.apply_and(x, y), z));
        assert_eq!(bdd.apply_or_many([x, y, z]), bdd.apply_or(x, bdd.apply_or(y, z)));
    }

    #[test]
    fn test_operation_labels() {
        let bdd = Bdd::with_config(&BddConfig {
            label_operations: true,
            ..BddConfig::default()
        });
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");

        let f = bdd.apply_and(a, b);
        assert_eq!(bdd.label(f).unwrap().as_deref(), Some("and2(a,b)"));

        // The first label wins.
        let g = bdd.apply_and(b, a);
        assert_eq!(g, f);
        assert_eq!(bdd.label(g).unwrap().as_deref(), Some("and2(a,b)"));

        let h = bdd.apply_not(a);
        assert_eq!(bdd.label(h).unwrap().as_deref(), Some("~a"));
    }

    #[test]
    fn test_no_operation_labels_by_default() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");

        let f = bdd.apply_or(a, b);
        assert_eq!(bdd.label(f).unwrap(), None);
    }
}
