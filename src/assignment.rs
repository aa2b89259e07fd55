//! Partial crease patterns.
//!
//! An [`EdgeAssignment`] holds one [`EdgeState`] per edge of the grid. Vertices
//! are placed one at a time by fixing all 8 incident edges to a tile; a
//! placement is only performed when it agrees with every edge already fixed
//! by earlier placements, so fixed edges are never overwritten.

use std::fmt;

use crate::catalog::Tile;
use crate::topology::GridTopology;
use crate::types::EdgeState;

/// A full or partial assignment of states to the edges of a grid.
///
/// The derived ordering compares the edge vectors lexicographically in
/// edge-index order.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeAssignment {
    edges: Vec<EdgeState>,
}

/// Incident-edge values of all frontier vertices, concatenated in vertex order.
///
/// Two partial assignments at the same label with equal signatures admit
/// exactly the same completions.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct FrontierSignature(Vec<EdgeState>);

impl FrontierSignature {
    /// Number of frontier vertices covered.
    pub fn width(&self) -> usize {
        self.0.len() / 8
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn states(&self) -> &[EdgeState] {
        &self.0
    }
}

impl EdgeAssignment {
    /// An assignment with every edge undefined.
    pub fn empty(topology: &GridTopology) -> Self {
        Self {
            edges: vec![EdgeState::Undefined; topology.num_edges()],
        }
    }

    pub(crate) fn from_edges(edges: Vec<EdgeState>) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn get(&self, e: usize) -> EdgeState {
        self.edges[e]
    }

    pub fn edges(&self) -> &[EdgeState] {
        &self.edges
    }

    /// True when every edge around every internal vertex is defined.
    ///
    /// Boundary diagonals that touch no internal vertex stay undefined in
    /// every accepted pattern and are not checked.
    pub fn is_complete(&self, topology: &GridTopology) -> bool {
        (0..topology.num_vertices())
            .all(|v| self.incident_values(topology, v).iter().all(|e| e.is_defined()))
    }

    /// Current values of the 8 edges around vertex `v`, in direction order.
    pub fn incident_values(&self, topology: &GridTopology, v: usize) -> [EdgeState; 8] {
        topology.incident_edges(v).map(|e| self.edges[e])
    }

    /// Whether `tile` agrees with every already-fixed edge around `v`.
    pub fn can_place(&self, topology: &GridTopology, v: usize, tile: &Tile) -> bool {
        self.incident_values(topology, v)
            .iter()
            .zip(tile.states())
            .all(|(&current, &wanted)| current == EdgeState::Undefined || current == wanted)
    }

    fn place(&mut self, topology: &GridTopology, v: usize, tile: &Tile) {
        for (&e, &state) in topology.incident_edges(v).iter().zip(tile.states()) {
            self.edges[e] = state;
        }
    }

    /// Places `tile` at vertex `v` if it is compatible with the fixed edges.
    ///
    /// Returns `false` and leaves the assignment untouched otherwise.
    pub fn try_place(&mut self, topology: &GridTopology, v: usize, tile: &Tile) -> bool {
        if !self.can_place(topology, v, tile) {
            return false;
        }
        self.place(topology, v, tile);
        true
    }

    /// A vertex is on the frontier when some, but not all, of its edges are fixed.
    pub fn is_frontier(&self, topology: &GridTopology, v: usize) -> bool {
        let undefined = topology
            .incident_edges(v)
            .iter()
            .filter(|&&e| self.edges[e] == EdgeState::Undefined)
            .count();
        undefined > 0 && undefined < 8
    }

    pub fn frontier_signature(&self, topology: &GridTopology) -> FrontierSignature {
        let mut signature = Vec::new();
        for v in 0..topology.num_vertices() {
            if self.is_frontier(topology, v) {
                signature.extend(self.incident_values(topology, v));
            }
        }
        FrontierSignature(signature)
    }
}

/// Space-separated `-`/`0`/`1` tokens, one per edge.
impl fmt::Display for EdgeAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", e)?;
        }
        Ok(())
    }
}
