//! The multi-way decision diagram built by an enumeration.
//!
//! Every node that was ever queued gets an entry, indexed by its [`NodeId`].
//! Once expanded, a node carries one [`Arc`] per catalog tile, in catalog
//! order. Arcs of merged children point at the surviving node, so the
//! diagram is a DAG whose root-to-terminal paths are exactly the accepted
//! tile sequences.
//!
//! # Example
//!
//! ```
//! use crease_zdd::catalog::TileCatalog;
//! use crease_zdd::context::Context;
//! use crease_zdd::engine::Enumeration;
//!
//! let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tiles.csv");
//! let ctx = Context::for_grid(2, 3, TileCatalog::from_path(path).unwrap());
//! let outcome = Enumeration::new(&ctx).run();
//!
//! assert_eq!(outcome.diagram.count_paths(), outcome.grand_total);
//! for assignment in outcome.diagram.assignments(&ctx).take(3) {
//!     println!("{}", assignment);
//! }
//! ```

use num_bigint::BigUint;

use crate::assignment::EdgeAssignment;
use crate::context::Context;
use crate::reference::NodeId;

/// Target of one tile slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Arc {
    Sink,
    Node(NodeId),
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DiagramNode {
    /// Vertex decided by this node.
    pub label: usize,
    /// Empty until the node has been expanded; terminals stay empty.
    pub arcs: Vec<Arc>,
}

#[derive(Debug, Clone)]
pub struct Diagram {
    nodes: Vec<DiagramNode>,
    num_vertices: usize,
    terminal: Option<NodeId>,
}

impl Diagram {
    pub fn new(num_vertices: usize) -> Self {
        Self {
            nodes: Vec::new(),
            num_vertices,
            terminal: None,
        }
    }

    pub(crate) fn add_node(&mut self, id: NodeId, label: usize) {
        assert_eq!(id.index(), self.nodes.len(), "Diagram nodes must be added in handle order");
        if label == self.num_vertices {
            // All terminals share the empty signature and merge into one.
            assert!(self.terminal.is_none(), "Second terminal {} at label {}", id, label);
            self.terminal = Some(id);
        }
        self.nodes.push(DiagramNode { label, arcs: Vec::new() });
    }

    pub(crate) fn set_arcs(&mut self, id: NodeId, arcs: Vec<Arc>) {
        self.nodes[id.index()].arcs = arcs;
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn node(&self, id: NodeId) -> &DiagramNode {
        &self.nodes[id.index()]
    }

    /// The single node at the final label, if any pattern was accepted.
    pub fn terminal(&self) -> Option<NodeId> {
        self.terminal
    }

    pub fn is_terminal(&self, id: NodeId) -> bool {
        self.terminal == Some(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DiagramNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId::new(i as u32), n))
    }

    /// Number of nodes at each label.
    pub fn level_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.num_vertices + 1];
        for node in &self.nodes {
            sizes[node.label] += 1;
        }
        sizes
    }

    /// Number of root-to-terminal paths.
    pub fn count_paths(&self) -> BigUint {
        // Children always carry larger handles than their parents.
        let mut counts = vec![BigUint::ZERO; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate().rev() {
            if self.is_terminal(NodeId::new(i as u32)) {
                counts[i] = BigUint::from(1u32);
                continue;
            }
            let mut total = BigUint::ZERO;
            for arc in &node.arcs {
                if let Arc::Node(child) = arc {
                    debug_assert!(child.index() > i);
                    total += &counts[child.index()];
                }
            }
            counts[i] = total;
        }
        counts.into_iter().next().unwrap_or(BigUint::ZERO)
    }

    /// Iterator over the tile-index sequences of all accepted patterns.
    ///
    /// The number of paths can be exponential in the grid size.
    pub fn paths(&self) -> DiagramPaths<'_> {
        DiagramPaths::new(self)
    }

    /// Iterator over the complete assignments of all accepted patterns.
    pub fn assignments<'a>(&'a self, ctx: &'a Context) -> impl Iterator<Item = EdgeAssignment> + 'a {
        self.paths().map(move |tiles| replay(ctx, &tiles))
    }
}

/// Rebuilds the assignment reached by placing `tiles[v]` at each vertex `v`.
///
/// # Panics
///
/// Panics if a tile conflicts with an earlier placement. Sequences taken
/// from [`Diagram::paths`] never do.
pub fn replay(ctx: &Context, tiles: &[usize]) -> EdgeAssignment {
    let topology = &ctx.topology;
    let mut assignment = EdgeAssignment::empty(topology);
    for (v, &t) in tiles.iter().enumerate() {
        let placed = assignment.try_place(topology, v, ctx.catalog.tile(t));
        assert!(placed, "Tile {} does not fit at vertex {}", t, v);
    }
    assignment
}

#[derive(Debug)]
struct Frame {
    node: NodeId,
    next: usize,
}

/// Depth-first iterator over accepted tile sequences.
///
/// Created by [`Diagram::paths`].
pub struct DiagramPaths<'a> {
    diagram: &'a Diagram,
    stack: Vec<Frame>,
    /// Tile chosen at each vertex along the current branch.
    path: Vec<usize>,
}

impl<'a> DiagramPaths<'a> {
    fn new(diagram: &'a Diagram) -> Self {
        let stack = if diagram.is_empty() {
            Vec::new()
        } else {
            vec![Frame { node: NodeId::ROOT, next: 0 }]
        };
        Self {
            diagram,
            stack,
            path: Vec::new(),
        }
    }
}

impl Iterator for DiagramPaths<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let diagram = self.diagram;
        loop {
            let frame = self.stack.last_mut()?;

            if diagram.is_terminal(frame.node) {
                let result = self.path.clone();
                self.stack.pop();
                self.path.pop();
                return Some(result);
            }

            let arcs = &diagram.node(frame.node).arcs;
            if frame.next < arcs.len() {
                let slot = frame.next;
                frame.next += 1;
                if let Arc::Node(child) = arcs[slot] {
                    self.path.push(slot);
                    self.stack.push(Frame { node: child, next: 0 });
                }
            } else {
                self.stack.pop();
                self.path.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use test_log::test;

    use super::*;

    /// root --0--> a --0--> t
    ///      \-1--> b --1--> t
    ///       2 -> sink
    fn small() -> Diagram {
        let mut d = Diagram::new(2);
        d.add_node(NodeId::new(0), 0);
        d.add_node(NodeId::new(1), 1);
        d.add_node(NodeId::new(2), 1);
        d.add_node(NodeId::new(3), 2);
        d.set_arcs(
            NodeId::new(0),
            vec![Arc::Node(NodeId::new(1)), Arc::Node(NodeId::new(2)), Arc::Sink],
        );
        d.set_arcs(NodeId::new(1), vec![Arc::Node(NodeId::new(3)), Arc::Sink, Arc::Sink]);
        d.set_arcs(
            NodeId::new(2),
            vec![Arc::Node(NodeId::new(3)), Arc::Node(NodeId::new(3)), Arc::Sink],
        );
        d
    }

    #[test]
    fn test_count_paths() {
        let d = small();
        assert_eq!(d.terminal(), Some(NodeId::new(3)));
        assert_eq!(d.count_paths(), BigUint::from(3u32));
        assert_eq!(d.level_sizes(), vec![1, 2, 1]);
    }

    #[test]
    fn test_paths() {
        let d = small();
        let paths: Vec<Vec<usize>> = d.paths().collect();
        assert_eq!(paths, vec![vec![0, 0], vec![1, 0], vec![1, 1]]);
        let distinct: HashSet<_> = paths.iter().collect();
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn test_empty_diagram() {
        let d = Diagram::new(4);
        assert_eq!(d.count_paths(), BigUint::ZERO);
        assert_eq!(d.paths().count(), 0);
    }

    #[test]
    fn test_no_terminal() {
        let mut d = Diagram::new(1);
        d.add_node(NodeId::ROOT, 0);
        d.set_arcs(NodeId::ROOT, vec![Arc::Sink, Arc::Sink]);
        assert_eq!(d.count_paths(), BigUint::ZERO);
        assert_eq!(d.paths().count(), 0);
    }

    #[test]
    #[should_panic]
    fn test_out_of_order_handles() {
        let mut d = Diagram::new(1);
        d.add_node(NodeId::new(1), 0);
    }
}
