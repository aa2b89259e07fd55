//! Rotations and reflections of crease patterns.
//!
//! A transform acts on edges geometrically: each edge index is turned into its
//! [`Segment`], the segment is moved, and the result is indexed again. Both
//! diagonal blocks swap under a quarter turn and under a reflection, and the
//! horizontal and vertical blocks swap under a quarter turn.
//!
//! The shape-preserving symmetries of an `M × N` grid form a dihedral group
//! of order 8 when `M = N` and of order 4 otherwise. Counting one canonical
//! representative per orbit gives the number of patterns up to symmetry.

use std::collections::HashSet;

use log::info;

use crate::assignment::EdgeAssignment;
use crate::context::Context;
use crate::diagram::Diagram;
use crate::topology::{GridTopology, Segment};
use crate::types::EdgeState;

impl Segment {
    /// Image under a quarter turn clockwise of a grid with `rows` rows.
    ///
    /// Grid point `(px, py)` moves to `(rows - py, px)`.
    pub fn rotate90(self, rows: usize) -> Segment {
        match self {
            Segment::Backslash { col, row } => Segment::Slash {
                col: rows - 1 - row,
                row: col,
            },
            Segment::Slash { col, row } => Segment::Backslash {
                col: rows - 1 - row,
                row: col,
            },
            Segment::Horizontal { col, row } => Segment::Vertical { col: rows - row, row: col },
            Segment::Vertical { col, row } => Segment::Horizontal {
                col: rows - row - 1,
                row: col,
            },
        }
    }

    /// Image under the left-right reflection of a grid with `cols` columns.
    ///
    /// Grid point `(px, py)` moves to `(cols - px, py)`.
    pub fn mirror(self, cols: usize) -> Segment {
        match self {
            Segment::Backslash { col, row } => Segment::Slash { col: cols - 1 - col, row },
            Segment::Slash { col, row } => Segment::Backslash { col: cols - 1 - col, row },
            Segment::Horizontal { col, row } => Segment::Horizontal { col: cols - 1 - col, row },
            Segment::Vertical { col, row } => Segment::Vertical { col: cols - col, row },
        }
    }
}

/// A permutation of edge indices; `map[e]` is where edge `e` lands.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Transform {
    map: Vec<usize>,
}

impl Transform {
    pub fn identity(topology: &GridTopology) -> Self {
        Self {
            map: (0..topology.num_edges()).collect(),
        }
    }

    /// Quarter turn clockwise; images are indexed by `topology.rotated()`.
    pub fn rotation(topology: &GridTopology) -> Self {
        let rotated = topology.rotated();
        let map = (0..topology.num_edges())
            .map(|e| rotated.edge(topology.segment(e).rotate90(topology.rows())))
            .collect();
        Self { map }
    }

    /// Left-right reflection.
    pub fn reflection(topology: &GridTopology) -> Self {
        let map = (0..topology.num_edges())
            .map(|e| topology.edge(topology.segment(e).mirror(topology.cols())))
            .collect();
        Self { map }
    }

    /// `self` followed by `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            map: self.map.iter().map(|&e| other.map[e]).collect(),
        }
    }

    pub fn apply(&self, assignment: &EdgeAssignment) -> EdgeAssignment {
        assert_eq!(assignment.len(), self.map.len());
        let mut edges = vec![EdgeState::Undefined; self.map.len()];
        for (e, &target) in self.map.iter().enumerate() {
            edges[target] = assignment.get(e);
        }
        EdgeAssignment::from_edges(edges)
    }
}

impl EdgeAssignment {
    /// The pattern turned a quarter clockwise, indexed by `topology.rotated()`.
    pub fn rotate90(&self, topology: &GridTopology) -> EdgeAssignment {
        Transform::rotation(topology).apply(self)
    }

    /// The pattern reflected left-right.
    pub fn mirror(&self, topology: &GridTopology) -> EdgeAssignment {
        Transform::reflection(topology).apply(self)
    }
}

/// The symmetries of a grid that map it onto itself, identity first.
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    elements: Vec<Transform>,
}

impl SymmetryGroup {
    pub fn new(topology: &GridTopology) -> Self {
        let shape = (topology.rows(), topology.cols());
        let mut elements = Vec::new();

        let mut current = Transform::identity(topology);
        let mut grid = topology.clone();
        for _ in 0..4 {
            if (grid.rows(), grid.cols()) == shape {
                let reflected = current.then(&Transform::reflection(&grid));
                elements.push(current.clone());
                elements.push(reflected);
            }
            current = current.then(&Transform::rotation(&grid));
            grid = grid.rotated();
        }
        debug_assert_eq!(current, Transform::identity(topology));

        Self { elements }
    }

    pub fn order(&self) -> usize {
        self.elements.len()
    }

    pub fn elements(&self) -> &[Transform] {
        &self.elements
    }

    /// All images of `assignment`, one per group element (with repetitions).
    pub fn orbit(&self, assignment: &EdgeAssignment) -> Vec<EdgeAssignment> {
        self.elements.iter().map(|t| t.apply(assignment)).collect()
    }

    /// The lexicographically largest image of `assignment`.
    pub fn canonical(&self, assignment: &EdgeAssignment) -> EdgeAssignment {
        self.elements
            .iter()
            .map(|t| t.apply(assignment))
            .max()
            .unwrap_or_else(|| assignment.clone())
    }

    pub fn is_canonical(&self, assignment: &EdgeAssignment) -> bool {
        self.elements.iter().all(|t| t.apply(assignment) <= *assignment)
    }
}

/// Number of accepted patterns up to rotation and reflection.
///
/// Replays every accepted pattern from `diagram` and keeps one canonical
/// representative per orbit, so the cost grows with the grand total.
pub fn count_orbits(ctx: &Context, diagram: &Diagram) -> usize {
    let group = SymmetryGroup::new(&ctx.topology);
    let mut seen = HashSet::new();
    let mut accepted = 0usize;
    for assignment in diagram.assignments(ctx) {
        accepted += 1;
        seen.insert(group.canonical(&assignment));
    }
    info!(
        "{} accepted patterns fall into {} orbits under a group of order {}",
        accepted,
        seen.len(),
        group.order()
    );
    seen.len()
}
