//! # reach-bdd: Reduced Ordered BDDs and symbolic reachability
//!
//! **`reach-bdd`** is a small, manager-centric library for **Reduced Ordered Binary Decision
//! Diagrams (ROBDDs)**, together with a symbolic reachability analyzer for finite-state machines.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a boolean function as a directed acyclic graph.
//! For a fixed variable order it is **canonical**: every boolean function has exactly one
//! representation, so two functions are equivalent iff their identifiers are equal.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: All operations go through the [`Bdd`][crate::bdd::Bdd] manager,
//!   which owns an append-only node store and its unique table (hash consing).
//! - **Plain identifiers**: Functions are [`NodeId`][crate::reference::NodeId] values. `0` is false,
//!   `1` is true, and a variable's identifier is its position in the variable order.
//! - **One normalizing operation**: Every operator is derived from [`ite`][crate::bdd::Bdd::ite],
//!   whose results are memoized in a computed table.
//! - **Reachability**: [`Reachability`][crate::reach::Reachability] computes reachable state sets
//!   by fixed-point image iteration and answers shortest-distance queries.
//!
//! ## Basic Usage
//!
//! ```rust
//! use reach_bdd::bdd::Bdd;
//!
//! // 1. Initialize the manager
//! let bdd = Bdd::default();
//!
//! // 2. Create variables, in order
//! let x1 = bdd.create_var("x1");
//! let x2 = bdd.create_var("x2");
//!
//! // 3. Build a formula: f = x1 AND (NOT x2)
//! let not_x2 = bdd.apply_not(x2);
//! let f = bdd.apply_and(x1, not_x2);
//!
//! // 4. Check properties
//! assert!(!bdd.is_zero(f)); // It is satisfiable
//! assert!(!bdd.is_one(f));  // It is not a tautology
//!
//! // 5. Restrict (x1=true, x2=false) -> should be true
//! let res = bdd.cofactor_false(bdd.cofactor_true(f, x1), x2);
//! assert!(bdd.is_one(res));
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: The [`Bdd`][crate::bdd::Bdd] manager and the ITE engine.
//! - **[`ops`]**, **[`cofactor`]**: Boolean operators, cofactors and existential quantification.
//! - **[`reach`]**: The reachability engine.
//! - **[`dot`]**: Mermaid and Graphviz export.
//! - **[`sat`]**: Model counting and satisfying assignments.

pub mod bdd;
pub mod cache;
pub mod cofactor;
pub mod debug;
pub mod dot;
pub mod error;
pub mod node;
pub mod ops;
pub mod reach;
pub mod reference;
pub mod sat;
pub mod table;
