//! # crease-zdd: counting flat-foldable grid crease patterns
//!
//! **`crease-zdd`** counts the crease patterns on an `M × N` grid of unit squares,
//! subdivided by both 45° diagonals, that are flat-foldable at every internal
//! vertex. Local flat-foldability is given by a catalog of valid 8-edge
//! configurations ("tiles"); the reference catalog in `data/tiles.csv` has 36.
//!
//! ## How it works
//!
//! Vertices are decided one at a time in row-major order, trying every tile.
//! Two partial patterns that agree on the *frontier* (the edges still touching
//! undecided vertices) have the same completions, so they are merged and
//! their path counts added. The result is a reduced decision diagram whose
//! nodes branch once per tile instead of twice, and the number of nodes per
//! level is bounded by the number of distinct frontiers rather than by
//! `|catalog|^level`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use crease_zdd::catalog::TileCatalog;
//! use crease_zdd::context::Context;
//! use crease_zdd::engine::Enumeration;
//! use num_bigint::BigUint;
//!
//! let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tiles.csv");
//! let catalog = TileCatalog::from_path(path).unwrap();
//! let ctx = Context::for_grid(2, 2, catalog);
//!
//! let outcome = Enumeration::new(&ctx).run();
//! // A single internal vertex accepts every tile.
//! assert_eq!(outcome.grand_total, BigUint::from(36u32));
//! assert_eq!(outcome.reported_total(), BigUint::from(576u32));
//! ```
//!
//! ## Core Components
//!
//! - **[`topology`]**: edge and vertex indexing of the grid.
//! - **[`assignment`]**: partial patterns, placement and frontier signatures.
//! - **[`engine`]**: the breadth-first construction with node merging.
//! - **[`diagram`]**: the resulting diagram, its paths and accepted patterns.
//! - **[`symmetry`]**: rotations, reflections and orbit counting.

pub mod assignment;
pub mod catalog;
pub mod context;
pub mod debug;
pub mod diagram;
pub mod dot;
pub mod engine;
pub mod node;
pub mod queue;
pub mod reference;
pub mod symmetry;
pub mod topology;
pub mod types;
