//! Symbolic reachability analysis of finite-state machines.
//!
//! A [`Reachability`] engine owns a [`Bdd`] manager and three blocks of variables,
//! created once in this order: current-state variables `s0, s1, ...`, next-state
//! variables `s0', s1', ...` and input variables `i0, i1, ...`. Sets of states are
//! characteristic functions over the current-state variables.
//!
//! The machine is described by one transition function per state variable (a
//! function over the current-state and input variables) and one initial state.
//! By default every state variable keeps its value and the initial state is all-false.
//!
//! # Examples
//!
//! ```
//! use reach_bdd::reach::Reachability;
//!
//! // A 2-bit counter.
//! let mut reach = Reachability::new(2, 0).unwrap();
//! let s = reach.states().to_vec();
//! let bdd = reach.bdd();
//! let fns = vec![bdd.apply_not(s[0]), bdd.apply_xor(s[1], s[0])];
//! reach.set_transition_functions(&fns).unwrap();
//!
//! assert_eq!(reach.state_distance(&[true, true]).unwrap(), Some(3));
//! assert!(reach.is_reachable(&[false, true]).unwrap());
//! ```

use log::{debug, info};
use num_bigint::BigUint;

use crate::bdd::{Bdd, BddConfig};
use crate::error::{BddError, Result};
use crate::reference::NodeId;

pub struct Reachability {
    bdd: Bdd,
    states: Vec<NodeId>,
    next_states: Vec<NodeId>,
    inputs: Vec<NodeId>,
    transitions: Vec<NodeId>,
    init: Vec<bool>,
}

impl Reachability {
    /// Create an engine with `state_size` state bits and `input_size` input bits.
    ///
    /// Fails with [`ZeroStateSize`][BddError::ZeroStateSize] when `state_size == 0`.
    pub fn new(state_size: usize, input_size: usize) -> Result<Self> {
        Self::with_config(state_size, input_size, &BddConfig::default())
    }

    pub fn with_config(state_size: usize, input_size: usize, config: &BddConfig) -> Result<Self> {
        if state_size == 0 {
            return Err(BddError::ZeroStateSize);
        }

        let bdd = Bdd::with_config(config);
        let states: Vec<NodeId> = (0..state_size).map(|i| bdd.create_var(format!("s{}", i))).collect();
        let next_states: Vec<NodeId> = (0..state_size).map(|i| bdd.create_var(format!("s{}'", i))).collect();
        let inputs: Vec<NodeId> = (0..input_size).map(|i| bdd.create_var(format!("i{}", i))).collect();
        debug!(
            "created reachability engine with {} state and {} input variables",
            state_size, input_size
        );

        Ok(Self {
            bdd,
            transitions: states.clone(),
            init: vec![false; state_size],
            states,
            next_states,
            inputs,
        })
    }

    /// The underlying manager, for building transition functions.
    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    pub fn state_size(&self) -> usize {
        self.states.len()
    }

    pub fn input_size(&self) -> usize {
        self.inputs.len()
    }

    /// Current-state variables.
    pub fn states(&self) -> &[NodeId] {
        &self.states
    }

    /// Next-state variables, paired by position with [`states`][Self::states].
    pub fn next_states(&self) -> &[NodeId] {
        &self.next_states
    }

    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    pub fn transition_functions(&self) -> &[NodeId] {
        &self.transitions
    }

    pub fn init_state(&self) -> &[bool] {
        &self.init
    }

    /// Replace the transition functions, one per state variable.
    ///
    /// Nothing changes unless every function is a stored identifier and the
    /// number of functions matches the state size.
    pub fn set_transition_functions(&mut self, functions: &[NodeId]) -> Result<()> {
        self.check_size("transition functions", functions.len())?;
        for &f in functions {
            self.bdd.check(f)?;
        }
        self.transitions = functions.to_vec();
        Ok(())
    }

    /// Replace the initial state. Nothing changes on a size mismatch.
    pub fn set_init_state(&mut self, state: &[bool]) -> Result<()> {
        self.check_size("initial state", state.len())?;
        self.init = state.to_vec();
        Ok(())
    }

    fn check_size(&self, what: &'static str, actual: usize) -> Result<()> {
        let expected = self.state_size();
        if actual != expected {
            return Err(BddError::InvalidSize { what, expected, actual });
        }
        Ok(())
    }

    /// `∧ (vars_i ↔ fns_i)`
    fn characteristic(&self, vars: &[NodeId], fns: &[NodeId]) -> NodeId {
        let bdd = &self.bdd;
        bdd.apply_and_many(vars.iter().zip(fns).map(|(&v, &f)| bdd.apply_xnor(v, f)))
    }

    /// The transition relation `T(s, i, s') = ∧ (s'_k ↔ δ_k(s, i))`.
    pub fn transition_relation(&self) -> NodeId {
        self.characteristic(&self.next_states, &self.transitions)
    }

    /// The characteristic function of the single initial state.
    pub fn initial_states(&self) -> NodeId {
        self.state_cube(&self.init)
    }

    fn state_cube(&self, state: &[bool]) -> NodeId {
        let bits: Vec<NodeId> = state.iter().map(|&b| NodeId::from(b)).collect();
        self.characteristic(&self.states, &bits)
    }

    /// States reachable from `set` in exactly one step.
    ///
    /// `set` is a function over the current-state variables; so is the result.
    ///
    /// # Panics
    ///
    /// Panics if `set` is not a stored identifier.
    pub fn image(&self, set: NodeId) -> NodeId {
        self.image_with(self.transition_relation(), set)
    }

    fn image_with(&self, tau: NodeId, set: NodeId) -> NodeId {
        let bdd = &self.bdd;

        // ∃s,i. T(s, i, s') ∧ set(s)
        let next = bdd.apply_and(tau, set);
        let next = bdd.exists(next, self.states.iter().chain(&self.inputs).copied());

        // Rename s' back to s
        let renaming = self.characteristic(&self.states, &self.next_states);
        let image = bdd.apply_and(next, renaming);
        bdd.exists(image, self.next_states.iter().copied())
    }

    /// Whether the concrete `state` lies in `set`.
    fn contains_state(&self, set: NodeId, state: &[bool]) -> bool {
        let bdd = &self.bdd;
        let member = bdd.apply_and(set, self.state_cube(state));
        bdd.exists(member, self.states.iter().copied()) == NodeId::TRUE
    }

    /// All states reachable from the initial state.
    pub fn reachable_states(&self) -> NodeId {
        let tau = self.transition_relation();
        let mut reached = self.initial_states();
        let mut step = 0;
        loop {
            let image = self.image_with(tau, reached);
            let next = self.bdd.apply_or(reached, image);
            step += 1;
            debug!(
                "[step:{}] reached set {} (unique table size {})",
                step,
                next,
                self.bdd.unique_table_size()
            );
            if next == reached {
                return reached;
            }
            reached = next;
        }
    }

    /// Number of reachable states.
    pub fn reachable_state_count(&self) -> BigUint {
        self.bdd.sat_count(self.reachable_states(), self.state_size())
    }

    pub fn is_reachable(&self, state: &[bool]) -> Result<bool> {
        Ok(self.state_distance(state)?.is_some())
    }

    /// Length of a shortest path from the initial state to `state`,
    /// or `None` when `state` is unreachable.
    pub fn state_distance(&self, state: &[bool]) -> Result<Option<usize>> {
        self.check_size("target state", state.len())?;
        info!(
            "state_distance(target = {:?}) with {} state and {} input variables",
            state,
            self.state_size(),
            self.input_size()
        );

        if state == self.init.as_slice() {
            return Ok(Some(0));
        }

        let tau = self.transition_relation();
        let mut reached = self.initial_states();
        let mut step = 0;
        loop {
            let image = self.image_with(tau, reached);
            let next = self.bdd.apply_or(reached, image);
            step += 1;
            debug!(
                "[step:{}] reached set {} (unique table size {})",
                step,
                next,
                self.bdd.unique_table_size()
            );

            if self.contains_state(next, state) {
                info!("target reached after {} step(s)", step);
                return Ok(Some(step));
            }
            if next == reached {
                info!("fixed point after {} step(s), target unreachable", step);
                return Ok(None);
            }
            reached = next;
        }
    }
}
