//! Edge and vertex indexing for an `M × N` grid of unit squares with both diagonals.
//!
//! The grid has `M` rows and `N` columns of squares. Grid points are addressed
//! as `(px, py)` with `0 <= px <= N` and `0 <= py <= M`, `y` growing downward.
//! Only the `(M-1) × (N-1)` internal grid points are decision vertices; they are
//! numbered row-major, so vertex `i` sits at grid point `(i % (N-1) + 1, i / (N-1) + 1)`.
//!
//! Edges are the unit segments that can carry a crease. They are laid out in
//! four consecutive blocks:
//!
//! ```text
//! [0, MN)                backslash diagonal of square (c, r)  ->  c + r*N
//! [MN, 2MN)              slash diagonal of square (c, r)      ->  MN + c + r*N
//! [2MN, 2MN + (M-1)N)    horizontal, left end (c, py)          ->  2MN + c + (py-1)*N
//! [.., 4MN - M - N)      vertical, top end (px, r)             ->  2MN + (M-1)N + (px-1) + r*(N-1)
//! ```
//!
//! Boundary segments of the paper are never creases and have no index.

use std::collections::BTreeSet;
use std::fmt;

use crate::types::Direction;

/// Geometric view of an edge index.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Segment {
    /// Diagonal from the upper-left to the lower-right corner of square `(col, row)`.
    Backslash { col: usize, row: usize },
    /// Diagonal from the upper-right to the lower-left corner of square `(col, row)`.
    Slash { col: usize, row: usize },
    /// Segment from grid point `(col, row)` to `(col + 1, row)`, with `1 <= row < M`.
    Horizontal { col: usize, row: usize },
    /// Segment from grid point `(col, row)` to `(col, row + 1)`, with `1 <= col < N`.
    Vertical { col: usize, row: usize },
}

/// Immutable indexing tables for one grid size.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GridTopology {
    rows: usize,
    cols: usize,
    num_edges: usize,
    num_vertices: usize,
    /// `incident[v][d]` is the edge leaving vertex `v` in direction `d`.
    incident: Vec<[usize; 8]>,
    /// `frontiers[v]` is the frontier estimate after placing vertices `0..=v`.
    frontiers: Vec<Vec<usize>>,
}

impl GridTopology {
    /// Builds the tables for a grid of `rows × cols` unit squares.
    ///
    /// # Panics
    ///
    /// Panics if `rows < 2` or `cols < 2`: such grids have no internal vertex.
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows >= 2, "Grid must have at least 2 rows, got {}", rows);
        assert!(cols >= 2, "Grid must have at least 2 columns, got {}", cols);

        let num_edges = 4 * rows * cols - rows - cols;
        let num_vertices = (rows - 1) * (cols - 1);

        let mut topology = Self {
            rows,
            cols,
            num_edges,
            num_vertices,
            incident: Vec::with_capacity(num_vertices),
            frontiers: Vec::with_capacity(num_vertices),
        };

        for v in 0..num_vertices {
            let (x, y) = topology.vertex_coords(v);
            let edges = Direction::ALL.map(|dir| topology.edge_index(x, y, dir));
            topology.incident.push(edges);
        }

        let mut pending = BTreeSet::new();
        for v in 0..num_vertices {
            let (x, y) = topology.vertex_coords(v);
            if x != cols - 2 {
                pending.insert(v + 1);
            }
            if y != rows - 2 {
                pending.insert(v + cols - 1);
            }
            pending.retain(|&u| u > v);
            topology.frontiers.push(pending.iter().copied().collect());
        }

        topology
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Number of edges, `E = 4MN - M - N`.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }
    /// Number of internal vertices, `V = (M-1)(N-1)`.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Internal coordinates `(x, y)` of vertex `v`, with `0 <= x < N-1`, `0 <= y < M-1`.
    pub fn vertex_coords(&self, v: usize) -> (usize, usize) {
        (v % (self.cols - 1), v / (self.cols - 1))
    }

    /// Index of the edge leaving internal vertex `(x, y)` in direction `dir`.
    pub fn edge_index(&self, x: usize, y: usize, dir: Direction) -> usize {
        let m = self.rows;
        let n = self.cols;
        let slash = m * n;
        let horizontal = 2 * m * n;
        let vertical = 2 * m * n + (m - 1) * n;
        match dir {
            Direction::Up => vertical + x + y * (n - 1),
            Direction::UpperRight => slash + (x + 1) + y * n,
            Direction::Right => horizontal + (x + 1) + y * n,
            Direction::LowerRight => (x + 1) + (y + 1) * n,
            Direction::Down => vertical + x + (y + 1) * (n - 1),
            Direction::LowerLeft => slash + x + (y + 1) * n,
            Direction::Left => horizontal + x + y * n,
            Direction::UpperLeft => x + y * n,
        }
    }

    /// The 8 incident edges of vertex `v`, in [`Direction`] order.
    pub fn incident_edges(&self, v: usize) -> &[usize; 8] {
        &self.incident[v]
    }

    /// Frontier estimate after placing vertices `0..=v`: right and lower
    /// neighbours of every placed vertex that are not placed themselves,
    /// in increasing order.
    ///
    /// The rule is cumulative over all placed vertices, not just `v`'s own
    /// neighbours, and it ignores lower-right diagonal neighbours. Merging
    /// never uses it; see [`EdgeAssignment::frontier_signature`].
    ///
    /// [`EdgeAssignment::frontier_signature`]: crate::assignment::EdgeAssignment::frontier_signature
    pub fn frontier(&self, v: usize) -> &[usize] {
        &self.frontiers[v]
    }

    /// Largest frontier estimate over the visiting order.
    pub fn max_frontier_width(&self) -> usize {
        self.frontiers.iter().map(|f| f.len()).max().unwrap_or(0)
    }

    /// Geometric segment of edge `e`.
    pub fn segment(&self, e: usize) -> Segment {
        assert!(e < self.num_edges, "Edge index {} out of range 0..{}", e, self.num_edges);

        let m = self.rows;
        let n = self.cols;
        let mut e = e;
        if e < m * n {
            return Segment::Backslash { col: e % n, row: e / n };
        }
        e -= m * n;
        if e < m * n {
            return Segment::Slash { col: e % n, row: e / n };
        }
        e -= m * n;
        if e < (m - 1) * n {
            return Segment::Horizontal {
                col: e % n,
                row: e / n + 1,
            };
        }
        e -= (m - 1) * n;
        Segment::Vertical {
            col: e % (n - 1) + 1,
            row: e / (n - 1),
        }
    }

    /// Edge index of a segment; inverse of [`segment`][Self::segment].
    pub fn edge(&self, segment: Segment) -> usize {
        let m = self.rows;
        let n = self.cols;
        match segment {
            Segment::Backslash { col, row } => {
                assert!(col < n && row < m, "{:?} outside {}", segment, self);
                col + row * n
            }
            Segment::Slash { col, row } => {
                assert!(col < n && row < m, "{:?} outside {}", segment, self);
                m * n + col + row * n
            }
            Segment::Horizontal { col, row } => {
                assert!(col < n && row >= 1 && row < m, "{:?} outside {}", segment, self);
                2 * m * n + col + (row - 1) * n
            }
            Segment::Vertical { col, row } => {
                assert!(col >= 1 && col < n && row < m, "{:?} outside {}", segment, self);
                2 * m * n + (m - 1) * n + (col - 1) + row * (n - 1)
            }
        }
    }

    /// Topology of the same grid rotated by 90°, i.e. `N` rows and `M` columns.
    pub fn rotated(&self) -> GridTopology {
        GridTopology::new(self.cols, self.rows)
    }
}

impl fmt::Display for GridTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} grid (E={}, V={})",
            self.rows, self.cols, self.num_edges, self.num_vertices
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    #[test]
    fn test_sizes() {
        let t = GridTopology::new(3, 3);
        assert_eq!(t.num_edges(), 30);
        assert_eq!(t.num_vertices(), 4);

        let t = GridTopology::new(2, 2);
        assert_eq!(t.num_edges(), 12);
        assert_eq!(t.num_vertices(), 1);

        let t = GridTopology::new(4, 5);
        assert_eq!(t.num_edges(), 71);
        assert_eq!(t.num_vertices(), 12);
    }

    #[test]
    #[should_panic]
    fn test_too_small() {
        GridTopology::new(1, 4);
    }

    #[test]
    fn test_single_vertex_uses_every_edge_once() {
        let t = GridTopology::new(2, 2);
        let mut edges: Vec<usize> = t.incident_edges(0).to_vec();
        edges.sort();
        edges.dedup();
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().all(|&e| e < t.num_edges()));
        // Four diagonals, two horizontals, two verticals; nothing else exists.
        assert_eq!(t.num_edges(), 12);
    }

    #[test]
    fn test_incident_edges_in_range_and_distinct() {
        for (m, n) in [(2, 3), (3, 3), (3, 4), (5, 2)] {
            let t = GridTopology::new(m, n);
            for v in 0..t.num_vertices() {
                let edges = t.incident_edges(v);
                assert!(edges.iter().all(|&e| e < t.num_edges()));
                let distinct: HashSet<_> = edges.iter().collect();
                assert_eq!(distinct.len(), 8, "vertex {} of {}", v, t);
            }
        }
    }

    #[test]
    fn test_neighbours_share_edges() {
        let t = GridTopology::new(3, 3);
        // Vertex 0 = (0,0), 1 = (1,0), 2 = (0,1), 3 = (1,1).
        let e = |v: usize, d: Direction| t.incident_edges(v)[d.index()];
        assert_eq!(e(0, Direction::Right), e(1, Direction::Left));
        assert_eq!(e(0, Direction::Down), e(2, Direction::Up));
        assert_eq!(e(0, Direction::LowerRight), e(3, Direction::UpperLeft));
        assert_eq!(e(1, Direction::LowerLeft), e(2, Direction::UpperRight));
    }

    #[test]
    fn test_segment_roundtrip() {
        let t = GridTopology::new(3, 4);
        for e in 0..t.num_edges() {
            assert_eq!(t.edge(t.segment(e)), e);
        }
    }

    #[test]
    fn test_segment_geometry() {
        let t = GridTopology::new(3, 3);
        // Vertex 0 sits at grid point (1, 1).
        let e = t.incident_edges(0);
        assert_eq!(t.segment(e[Direction::UpperLeft.index()]), Segment::Backslash { col: 0, row: 0 });
        assert_eq!(t.segment(e[Direction::LowerRight.index()]), Segment::Backslash { col: 1, row: 1 });
        assert_eq!(t.segment(e[Direction::UpperRight.index()]), Segment::Slash { col: 1, row: 0 });
        assert_eq!(t.segment(e[Direction::Left.index()]), Segment::Horizontal { col: 0, row: 1 });
        assert_eq!(t.segment(e[Direction::Right.index()]), Segment::Horizontal { col: 1, row: 1 });
        assert_eq!(t.segment(e[Direction::Up.index()]), Segment::Vertical { col: 1, row: 0 });
        assert_eq!(t.segment(e[Direction::Down.index()]), Segment::Vertical { col: 1, row: 1 });
    }

    #[test]
    fn test_frontiers() {
        let t = GridTopology::new(4, 4);
        // 3x3 internal vertices, numbered row-major.
        assert_eq!(t.frontier(0), &[1, 3]);
        assert_eq!(t.frontier(1), &[2, 3, 4]);
        assert_eq!(t.frontier(2), &[3, 4, 5]);
        assert_eq!(t.frontier(4), &[5, 6, 7]);
        assert_eq!(t.frontier(8), &[] as &[usize]);
        assert_eq!(t.max_frontier_width(), 3);
    }

    #[test]
    fn test_rotated() {
        let t = GridTopology::new(2, 5);
        let r = t.rotated();
        assert_eq!((r.rows(), r.cols()), (5, 2));
        assert_eq!(r.num_edges(), t.num_edges());
        assert_eq!(r.num_vertices(), t.num_vertices());
    }
}
