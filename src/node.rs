use num_bigint::BigUint;

use crate::assignment::{EdgeAssignment, FrontierSignature};
use crate::context::Context;
use crate::topology::GridTopology;

/// A partial crease pattern waiting for a decision at vertex `label`,
/// together with the number of distinct tile sequences that reach it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SearchNode {
    assignment: EdgeAssignment,
    label: usize,
    count: BigUint,
}

/// One outgoing slot of an expanded node.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Slot {
    /// The tile fits: a new node one label further down.
    Child(SearchNode),
    /// The tile conflicts with fixed edges; the path ends in the sink.
    Sink,
}

/// Accumulator for the multiplicity of every locally infeasible branch.
///
/// Never queued and never expanded.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Sink {
    count: BigUint,
}

impl Sink {
    pub fn absorb(&mut self, count: &BigUint) {
        self.count += count;
    }

    pub fn count(&self) -> &BigUint {
        &self.count
    }
}

impl SearchNode {
    /// The empty assignment at label 0 with multiplicity 1.
    pub fn root(topology: &GridTopology) -> Self {
        Self {
            assignment: EdgeAssignment::empty(topology),
            label: 0,
            count: BigUint::from(1u32),
        }
    }

    pub fn label(&self) -> usize {
        self.label
    }
    pub fn count(&self) -> &BigUint {
        &self.count
    }
    pub fn assignment(&self) -> &EdgeAssignment {
        &self.assignment
    }

    /// Every vertex has been decided.
    pub fn is_terminal(&self, topology: &GridTopology) -> bool {
        self.label == topology.num_vertices()
    }

    pub fn signature(&self, topology: &GridTopology) -> FrontierSignature {
        self.assignment.frontier_signature(topology)
    }

    /// Tries every tile, in catalog order, at vertex `label`.
    ///
    /// Returns exactly one slot per tile. Each conflicting tile adds this
    /// node's multiplicity to `sink`; each fitting tile yields a child with
    /// the same multiplicity.
    pub fn expand(&self, ctx: &Context, sink: &mut Sink) -> Vec<Slot> {
        assert!(
            !self.is_terminal(&ctx.topology),
            "Cannot expand a terminal node (label {})",
            self.label
        );

        ctx.catalog
            .iter()
            .map(|tile| {
                let mut assignment = self.assignment.clone();
                if assignment.try_place(&ctx.topology, self.label, tile) {
                    Slot::Child(SearchNode {
                        assignment,
                        label: self.label + 1,
                        count: self.count.clone(),
                    })
                } else {
                    sink.absorb(&self.count);
                    Slot::Sink
                }
            })
            .collect()
    }

    /// Folds an equivalent node into this one, keeping its paths.
    pub fn merge(&mut self, other: SearchNode) {
        debug_assert_eq!(self.label, other.label);
        self.count += other.count;
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::catalog::{Tile, TileCatalog};

    fn catalog(rows: &[[u8; 8]]) -> TileCatalog {
        TileCatalog::new(rows.iter().map(|&bits| Tile::from_bits(bits).unwrap()).collect())
    }

    #[test]
    fn test_root() {
        let t = GridTopology::new(3, 3);
        let root = SearchNode::root(&t);
        assert_eq!(root.label(), 0);
        assert_eq!(root.count(), &BigUint::from(1u32));
        assert!(!root.is_terminal(&t));
        assert!(root.signature(&t).is_empty());
    }

    #[test]
    fn test_expand_root_fills_every_slot() {
        let ctx = Context::for_grid(3, 3, catalog(&[[0; 8], [1, 0, 0, 0, 1, 0, 0, 0], [1; 8]]));
        let mut sink = Sink::default();
        let slots = SearchNode::root(&ctx.topology).expand(&ctx, &mut sink);

        assert_eq!(slots.len(), 3);
        for slot in &slots {
            match slot {
                Slot::Child(child) => {
                    assert_eq!(child.label(), 1);
                    assert_eq!(child.count(), &BigUint::from(1u32));
                }
                Slot::Sink => panic!("root has no fixed edges"),
            }
        }
        assert_eq!(sink.count(), &BigUint::ZERO);
    }

    #[test]
    fn test_expand_routes_conflicts_to_sink() {
        let vertical = [1, 0, 0, 0, 1, 0, 0, 0];
        let horizontal = [0, 0, 1, 0, 0, 0, 1, 0];
        let ctx = Context::for_grid(3, 3, catalog(&[vertical, horizontal]));
        let mut sink = Sink::default();

        let slots = SearchNode::root(&ctx.topology).expand(&ctx, &mut sink);
        let Slot::Child(mut first) = slots[0].clone() else {
            panic!("expected a child");
        };
        first.count = BigUint::from(5u32);

        // Vertex 1 sees vertex 0's right edge, which the vertical tile left unused.
        let slots = first.expand(&ctx, &mut sink);
        assert_eq!(slots.len(), 2);
        assert!(matches!(slots[0], Slot::Child(_)));
        assert_eq!(slots[1], Slot::Sink);
        assert_eq!(sink.count(), &BigUint::from(5u32));
    }

    #[test]
    fn test_expand_empty_catalog() {
        let ctx = Context::for_grid(2, 2, TileCatalog::default());
        let mut sink = Sink::default();
        let slots = SearchNode::root(&ctx.topology).expand(&ctx, &mut sink);
        assert!(slots.is_empty());
        assert_eq!(sink.count(), &BigUint::ZERO);
    }

    #[test]
    fn test_merge() {
        let t = GridTopology::new(2, 2);
        let mut a = SearchNode::root(&t);
        let b = SearchNode::root(&t);
        a.merge(b);
        assert_eq!(a.count(), &BigUint::from(2u32));
    }
}
