//! The [`Bdd`] manager: canonical node store and the ITE engine.
//!
//! Every Boolean function is a [`NodeId`] into one append-only store. The store
//! keeps two tables:
//!
//! - the **unique table** maps each `(low, high, top_var)` triple to exactly one
//!   identifier, so two equivalent functions always share an identifier;
//! - the **computed table** memoizes [`ite`][Bdd::ite] calls. It can be cleared
//!   at any time with [`clear_cache`][Bdd::clear_cache] without changing results.
//!
//! Variables are ordered by creation: a variable's identifier is its position in
//! the order, and every low/high chain visits strictly increasing top variables.
//!
//! # Recursion depth
//!
//! [`ite`][Bdd::ite] recurses once per variable on the path from the current top
//! variable to the terminals, so the stack depth is bounded by the number of
//! created variables, not by the number of nodes. Cofactors and
//! [`sat_count`][Bdd::sat_count] recurse the same way.
//!
//! Diagrams with up to 500 variables fit on the default 2 MiB stack of a
//! spawned thread, debug builds included. Deeper diagrams (debug builds overflow
//! around 1500 variables) need a thread with a larger stack, see
//! [`std::thread::Builder::stack_size`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;

use log::debug;

use crate::cache::{Cache, CacheStats};
use crate::error::Result;
use crate::node::Node;
use crate::reference::NodeId;
use crate::table::Table;

/// Key of the computed table: the `(i, t, e)` triple an ITE call recursed on.
type IteKey = (NodeId, NodeId, NodeId);

/// Construction options for a [`Bdd`] manager.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BddConfig {
    /// Initial node capacity, as a power of two. The store grows beyond it on demand.
    pub storage_bits: usize,
    /// Initial computed table capacity, as a power of two.
    pub cache_bits: usize,
    /// Label operator results with their expression, e.g. `and2(a,b)`.
    pub label_operations: bool,
}

impl Default for BddConfig {
    fn default() -> Self {
        Self {
            storage_bits: 16,
            cache_bits: 14,
            label_operations: false,
        }
    }
}

pub struct Bdd {
    storage: RefCell<Table>,
    cache: RefCell<Cache<IteKey, NodeId>>,
    pub(crate) labels: RefCell<HashMap<NodeId, String>>,
    pub(crate) label_operations: bool,
}

impl Bdd {
    pub fn new(storage_bits: usize) -> Self {
        Self::with_config(&BddConfig {
            storage_bits,
            ..BddConfig::default()
        })
    }

    pub fn with_config(config: &BddConfig) -> Self {
        assert!(
            config.storage_bits <= 31,
            "Storage bits should be in the range 0..=31"
        );
        assert!(
            config.cache_bits <= 31,
            "Cache bits should be in the range 0..=31"
        );

        Self {
            storage: RefCell::new(Table::new(config.storage_bits)),
            cache: RefCell::new(Cache::new(config.cache_bits)),
            labels: RefCell::new(terminal_labels()),
            label_operations: config.label_operations,
        }
    }

    /// Create a manager whose store is pre-seeded with `nodes`.
    ///
    /// Position 0 must be the false terminal and position 1 the true terminal.
    /// The remaining nodes keep their positions as identifiers.
    pub fn from_nodes(nodes: Vec<Node>) -> Result<Self> {
        let storage = Table::from_nodes(nodes)?;
        Ok(Self {
            storage: RefCell::new(storage),
            cache: RefCell::new(Cache::default()),
            labels: RefCell::new(terminal_labels()),
            label_operations: false,
        })
    }
}

fn terminal_labels() -> HashMap<NodeId, String> {
    HashMap::from([
        (NodeId::FALSE, "0".to_string()),
        (NodeId::TRUE, "1".to_string()),
    ])
}

impl Default for Bdd {
    fn default() -> Self {
        Bdd::with_config(&BddConfig::default())
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let storage = self.storage.borrow();
        f.debug_struct("Bdd")
            .field("nodes", &storage.len())
            .field("unique", &storage.unique_len())
            .field("computed", &self.cache.borrow().len())
            .finish()
    }
}

impl Bdd {
    pub fn zero(&self) -> NodeId {
        NodeId::FALSE
    }
    pub fn one(&self) -> NodeId {
        NodeId::TRUE
    }

    pub fn is_zero(&self, f: NodeId) -> bool {
        f == NodeId::FALSE
    }
    pub fn is_one(&self, f: NodeId) -> bool {
        f == NodeId::TRUE
    }
    /// Whether `f` is one of the two terminals.
    pub fn is_constant(&self, f: NodeId) -> Result<bool> {
        self.check(f).map(|f| f.is_constant())
    }

    /// Number of nodes in the store.
    pub fn num_nodes(&self) -> usize {
        self.storage.borrow().len()
    }

    /// Number of entries in the unique table. Never decreases.
    pub fn unique_table_size(&self) -> usize {
        self.storage.borrow().unique_len()
    }

    /// Statistics of the computed (ITE memo) table.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    /// Statistics of the unique table lookups.
    pub fn unique_stats(&self) -> CacheStats {
        self.storage.borrow().stats()
    }

    /// Drop all memoized ITE results. The unique table is untouched.
    pub fn clear_cache(&self) {
        debug!("clearing computed table");
        self.cache.borrow_mut().clear();
    }

    pub fn contains(&self, f: NodeId) -> bool {
        self.storage.borrow().contains(f)
    }

    /// Return `f` if it names a stored node, or [`InvalidIdentifier`][crate::error::BddError::InvalidIdentifier].
    pub fn check(&self, f: NodeId) -> Result<NodeId> {
        self.storage.borrow().try_get(f).map(|_| f)
    }

    pub fn node(&self, f: NodeId) -> Result<Node> {
        self.storage.borrow().try_get(f)
    }
    pub fn low(&self, f: NodeId) -> Result<NodeId> {
        self.node(f).map(|node| node.low)
    }
    pub fn high(&self, f: NodeId) -> Result<NodeId> {
        self.node(f).map(|node| node.high)
    }
    pub fn top_var(&self, f: NodeId) -> Result<NodeId> {
        self.node(f).map(|node| node.top_var)
    }

    /// Whether `f` is a variable node: it branches on itself and is not a terminal.
    pub fn is_variable(&self, f: NodeId) -> Result<bool> {
        let node = self.node(f)?;
        Ok(!f.is_constant() && node.top_var == f)
    }

    /// Whether `f` is an internal node: neither a terminal nor a variable.
    pub fn is_expression(&self, f: NodeId) -> Result<bool> {
        Ok(!f.is_constant() && !self.is_variable(f)?)
    }

    /// Unchecked lookup for identifiers produced by this manager.
    pub(crate) fn get_node(&self, f: NodeId) -> Node {
        self.storage.borrow()[f]
    }

    pub(crate) fn var_of(&self, f: NodeId) -> NodeId {
        self.get_node(f).top_var
    }

    fn is_expr(&self, f: NodeId) -> bool {
        !f.is_constant() && self.var_of(f) != f
    }

    pub(crate) fn assert_valid(&self, f: NodeId) {
        let size = self.num_nodes();
        assert!(
            f.index() < size,
            "Invalid node identifier {} (store holds {} nodes)",
            f,
            size
        );
    }

    /// Create a fresh variable, ordered after every existing node.
    ///
    /// Every call yields a distinct variable, even when labels repeat.
    pub fn create_var(&self, label: impl Into<String>) -> NodeId {
        let label = label.into();
        let id = {
            let mut storage = self.storage.borrow_mut();
            let id = storage.next_id();
            storage.put(Node::variable(id))
        };
        debug!("create_var(label = {:?}) -> {}", label, id);
        self.labels.borrow_mut().insert(id, label);
        id
    }

    fn mk_node(&self, top_var: NodeId, low: NodeId, high: NodeId) -> NodeId {
        debug!("mk(v = {}, low = {}, high = {})", top_var, low, high);

        if low == high {
            debug!("mk: duplicates {} == {}", low, high);
            return low;
        }

        self.storage.borrow_mut().put(Node::new(low, high, top_var))
    }

    /// Cofactors `(f|v=0, f|v=1)` of `f` w.r.t. a variable `v` that is not below `f`'s top variable.
    pub(crate) fn top_cofactors(&self, f: NodeId, v: NodeId) -> (NodeId, NodeId) {
        if f.is_constant() {
            return (f, f);
        }
        let node = self.get_node(f);
        if node.top_var == v {
            (node.low, node.high)
        } else {
            debug_assert!(node.top_var > v, "{} is below the top variable of {}", v, f);
            (f, f)
        }
    }

    /// Whether `a` comes before `b` in the canonical operand order:
    /// top variable first, identifier as the tie-break.
    fn precedes(&self, a: NodeId, b: NodeId) -> bool {
        (self.var_of(a), a) < (self.var_of(b), b)
    }

    /// Apply the ITE operation to the arguments.
    ///
    /// ```text
    /// ITE(i, t, e) = (i ∧ t) ∨ (¬i ∧ e)
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if any argument is not a stored identifier.
    ///
    /// # Examples
    ///
    /// ```
    /// use reach_bdd::bdd::Bdd;
    ///
    /// let bdd = Bdd::default();
    /// let x = bdd.create_var("x");
    /// let y = bdd.create_var("y");
    /// let z = bdd.create_var("z");
    /// let f = bdd.ite(x, y, z);
    /// let x_and_y = bdd.apply_and(x, y);
    /// let not_x_and_z = bdd.apply_and(bdd.apply_not(x), z);
    /// assert_eq!(f, bdd.apply_or(x_and_y, not_x_and_z));
    /// ```
    pub fn ite(&self, i: NodeId, t: NodeId, e: NodeId) -> NodeId {
        self.assert_valid(i);
        self.assert_valid(t);
        self.assert_valid(e);
        self.apply_ite(i, t, e)
    }

    pub(crate) fn apply_ite(&self, i: NodeId, t: NodeId, e: NodeId) -> NodeId {
        debug!("apply_ite(i = {}, t = {}, e = {})", i, t, e);

        // Base cases:
        //   ite(1,G,H) => G
        //   ite(0,G,H) => H
        //   ite(F,1,0) => F
        //   ite(F,G,G) => G
        if self.is_one(i) {
            debug!("ite(1,G,H) => G");
            return t;
        }
        if self.is_zero(i) {
            debug!("ite(0,G,H) => H");
            return e;
        }
        if self.is_one(t) && self.is_zero(e) {
            debug!("ite(F,1,0) => F");
            return i;
        }
        if t == e {
            debug!("ite(F,G,G) => G");
            return t;
        }

        // Standard triples:
        //   ite(F,G,F) => ite(F,G,0)
        //   ite(F,G,0) == ite(G,F,0)
        //   ite(F,1,G) == ite(G,1,F)
        //   ite(F,F,G) => ite(F,1,G)
        // (equivalent pairs keep the operand that comes first in the order)
        let (mut i, mut t, mut e) = (i, t, e);
        if self.is_expr(t) {
            if i == e {
                debug!("ite(F,G,F) => ite(F,G,0)");
                e = NodeId::FALSE;
            }
            if self.is_zero(e) && self.precedes(t, i) {
                debug!("ite(F,G,0) => ite(G,F,0)");
                std::mem::swap(&mut i, &mut t);
            }
        } else if self.is_expr(e) && self.is_one(t) && self.precedes(e, i) {
            debug!("ite(F,1,G) => ite(G,1,F)");
            std::mem::swap(&mut i, &mut e);
        }
        if i == t {
            debug!("ite(F,F,G) => ite(F,1,G)");
            t = NodeId::TRUE;
        }

        let key = (i, t, e);
        let cached = self.cache.borrow_mut().get(&key);
        if let Some(res) = cached {
            debug!("cache: apply_ite(i = {}, t = {}, e = {}) -> {}", i, t, e, res);
            return res;
        }

        // Determine the top variable:
        let mut top = self.var_of(i);
        if !t.is_constant() {
            top = top.min(self.var_of(t));
        }
        if !e.is_constant() {
            top = top.min(self.var_of(e));
        }
        debug!("min variable = {}", top);

        let (i0, i1) = self.top_cofactors(i, top);
        let (t0, t1) = self.top_cofactors(t, top);
        let (e0, e1) = self.top_cofactors(e, top);

        let high = self.apply_ite(i1, t1, e1);
        let low = self.apply_ite(i0, t0, e0);

        let res = self.mk_node(top, low, high);
        debug!("computed: apply_ite(i = {}, t = {}, e = {}) -> {}", i, t, e, res);
        self.cache.borrow_mut().insert(key, res);
        res
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::error::BddError;

    #[test]
    fn test_terminals() {
        let bdd = Bdd::default();

        assert_eq!(bdd.zero(), NodeId::FALSE);
        assert_eq!(bdd.one(), NodeId::TRUE);
        assert_eq!(bdd.node(bdd.zero()), Ok(Node::FALSE));
        assert_eq!(bdd.node(bdd.one()), Ok(Node::TRUE));
        assert_eq!(bdd.unique_table_size(), 2);

        assert_eq!(bdd.is_constant(bdd.zero()), Ok(true));
        assert_eq!(bdd.is_constant(bdd.one()), Ok(true));
        assert!(!bdd.is_variable(bdd.one()).unwrap());
        assert!(!bdd.is_expression(bdd.one()).unwrap());
    }

    #[test]
    fn test_create_var() {
        let bdd = Bdd::default();

        let a = bdd.create_var("a");
        let b = bdd.create_var("b");

        assert_eq!(a, NodeId::new(2));
        assert_eq!(b, NodeId::new(3));
        assert_eq!(bdd.node(a), Ok(Node::new(NodeId::FALSE, NodeId::TRUE, a)));
        assert_eq!(bdd.node(b), Ok(Node::new(NodeId::FALSE, NodeId::TRUE, b)));
        assert!(bdd.is_variable(a).unwrap());
        assert!(!bdd.is_expression(a).unwrap());
    }

    #[test]
    fn test_create_var_duplicate_label() {
        let bdd = Bdd::default();

        let a1 = bdd.create_var("a");
        let a2 = bdd.create_var("a");

        assert_ne!(a1, a2);
        assert_eq!(bdd.unique_table_size(), 4);
    }

    #[test]
    fn test_accessors_out_of_range() {
        let bdd = Bdd::default();
        let missing = NodeId::new(2);
        let err = BddError::InvalidIdentifier { id: missing, size: 2 };

        assert_eq!(bdd.node(missing), Err(err.clone()));
        assert_eq!(bdd.low(missing), Err(err.clone()));
        assert_eq!(bdd.high(missing), Err(err.clone()));
        assert_eq!(bdd.top_var(missing), Err(err.clone()));
        assert_eq!(bdd.is_variable(missing), Err(err.clone()));
        assert_eq!(bdd.is_expression(missing), Err(err.clone()));
        assert_eq!(bdd.is_constant(missing), Err(err.clone()));
        assert_eq!(bdd.check(missing), Err(err));
        assert!(!bdd.contains(missing));
    }

    #[test]
    #[should_panic(expected = "Invalid node identifier")]
    fn test_ite_rejects_unknown_identifier() {
        let bdd = Bdd::default();
        let x = bdd.create_var("x");
        bdd.ite(x, NodeId::new(100), bdd.zero());
    }

    #[test]
    fn test_ite_terminal_cases() {
        let bdd = Bdd::default();
        let f = bdd.create_var("f");
        let g = bdd.create_var("g");
        let h = bdd.create_var("h");

        assert_eq!(bdd.ite(bdd.one(), g, h), g);
        assert_eq!(bdd.ite(bdd.zero(), g, h), h);
        assert_eq!(bdd.ite(f, bdd.one(), bdd.zero()), f);
        assert_eq!(bdd.ite(f, g, g), g);

        let e = bdd.ite(f, g, h);
        assert_eq!(bdd.ite(e, bdd.one(), bdd.zero()), e);
    }

    #[test]
    fn test_ite_structure() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");

        // a ∨ b = (a ? 1 : b)
        let f = bdd.ite(a, bdd.one(), b);
        assert_eq!(bdd.node(f), Ok(Node::new(b, bdd.one(), a)));
        assert!(bdd.is_expression(f).unwrap());
        assert_eq!(bdd.top_var(f), Ok(a));
        assert_eq!(bdd.low(f), Ok(b));
        assert_eq!(bdd.high(f), Ok(bdd.one()));
    }

    #[test]
    fn test_ite_idempotent() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");
        let c = bdd.create_var("c");

        let f = bdd.ite(a, b, c);
        let size = bdd.unique_table_size();
        let g = bdd.ite(a, b, c);

        assert_eq!(f, g);
        assert_eq!(bdd.unique_table_size(), size);
        assert!(bdd.cache_stats().hits > 0);
    }

    #[test]
    fn test_operand_order_is_canonical() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");
        let c = bdd.create_var("c");
        let d = bdd.create_var("d");

        let f = bdd.ite(a, b, c);
        let g = bdd.ite(b, d, c);

        // ite(F,G,0) == ite(G,F,0)
        assert_eq!(bdd.ite(f, g, bdd.zero()), bdd.ite(g, f, bdd.zero()));
        // ite(F,1,G) == ite(G,1,F)
        assert_eq!(bdd.ite(f, bdd.one(), g), bdd.ite(g, bdd.one(), f));
        // ite(F,G,F) == ite(F,G,0)
        assert_eq!(bdd.ite(f, g, f), bdd.ite(f, g, bdd.zero()));
        // ite(F,F,G) == ite(F,1,G)
        assert_eq!(bdd.ite(f, f, g), bdd.ite(f, bdd.one(), g));
    }

    #[test]
    fn test_operand_order_tie_break() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");
        let c = bdd.create_var("c");

        // Same top variable, so only the identifiers decide the order
        let f = bdd.ite(a, b, c);
        let g = bdd.ite(a, c, b);
        assert_eq!(bdd.top_var(f), bdd.top_var(g));
        assert!(f < g);

        // ite(F,G,0) == ite(G,F,0), sharing one computed table entry
        let h = bdd.ite(f, g, bdd.zero());
        let computed = bdd.cache_stats().len;
        assert_eq!(bdd.ite(g, f, bdd.zero()), h);
        assert_eq!(bdd.cache_stats().len, computed);

        // ite(F,1,G) == ite(G,1,F), sharing one computed table entry
        let h = bdd.ite(f, bdd.one(), g);
        let computed = bdd.cache_stats().len;
        assert_eq!(bdd.ite(g, bdd.one(), f), h);
        assert_eq!(bdd.cache_stats().len, computed);
    }

    #[test]
    fn test_deep_recursion() {
        let bdd = Bdd::default();
        let vars: Vec<NodeId> = (0..500).map(|i| bdd.create_var(format!("x{}", i))).collect();

        let f = bdd.apply_and_many(vars.iter().copied());
        let g = bdd.apply_not(f);
        assert_eq!(bdd.apply_or(f, g), bdd.one());
        assert_eq!(bdd.cofactor_false(g, vars[499]), bdd.one());
        assert_eq!(bdd.size(g).unwrap(), 502);
    }

    #[test]
    fn test_clear_cache_keeps_results() {
        let bdd = Bdd::default();
        let a = bdd.create_var("a");
        let b = bdd.create_var("b");
        let c = bdd.create_var("c");

        let f = bdd.ite(a, b, c);
        bdd.clear_cache();
        assert_eq!(bdd.cache_stats().len, 0);
        assert_eq!(bdd.ite(a, b, c), f);
    }

    #[test]
    fn test_unique_table_grows_monotonically() {
        let bdd = Bdd::default();
        let vars: Vec<NodeId> = (0..4).map(|i| bdd.create_var(format!("x{}", i))).collect();

        let mut last = bdd.unique_table_size();
        let mut f = bdd.zero();
        for &x in &vars {
            f = bdd.ite(x, bdd.apply_not(f), f);
            let size = bdd.unique_table_size();
            assert!(size >= last);
            last = size;
        }
        bdd.clear_cache();
        assert_eq!(bdd.unique_table_size(), last);
    }

    fn seeded() -> Bdd {
        let n = NodeId::new;
        Bdd::from_nodes(vec![
            Node::FALSE,
            Node::TRUE,
            Node::variable(n(2)),           // a
            Node::variable(n(3)),           // b
            Node::variable(n(4)),           // c
            Node::variable(n(5)),           // d
            Node::new(n(3), n(1), n(2)),    // a ∨ b
            Node::new(n(0), n(5), n(4)),    // c ∧ d
        ])
        .unwrap()
    }

    #[test]
    fn test_from_nodes_reuses_seeded_nodes() {
        let bdd = seeded();
        let n = NodeId::new;
        assert_eq!(bdd.unique_table_size(), 8);

        assert_eq!(bdd.ite(n(2), bdd.one(), n(3)), n(6));
        assert_eq!(bdd.ite(n(4), n(5), bdd.zero()), n(7));
        assert_eq!(bdd.unique_table_size(), 8);

        assert!(bdd.is_variable(n(5)).unwrap());
        assert!(bdd.is_expression(n(6)).unwrap());
    }

    #[test]
    fn test_from_nodes_rejects_invalid_terminals() {
        let res = Bdd::from_nodes(vec![Node::FALSE, Node::FALSE]);
        assert!(matches!(res, Err(BddError::InvalidConstruction { .. })));
    }

    #[test]
    fn test_from_nodes_rejects_duplicate_triples() {
        let a = NodeId::new(2);
        let res = Bdd::from_nodes(vec![Node::FALSE, Node::TRUE, Node::variable(a), Node::variable(a)]);
        assert!(matches!(res, Err(BddError::InvalidConstruction { .. })));
    }

    #[test]
    fn test_seeded_identifiers_are_all_unique() {
        let bdd = seeded();
        assert_eq!(bdd.unique_table_size(), bdd.num_nodes());
        assert!(bdd.check(NodeId::new(bdd.unique_table_size() as u32)).is_err());
    }
}
