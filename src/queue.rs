//! FIFO of nodes awaiting expansion, indexed by frontier signature.
//!
//! Nodes are pushed in non-decreasing label order, so at any time the queue
//! holds at most two consecutive labels. A signature records edge values
//! but not which vertices they belong to, so nodes of both labels can share
//! one while queued together. The equivalence index is therefore keyed by
//! label first and then by the exact [`FrontierSignature`]; a lookup only
//! succeeds on full signature equality, never on a hash match alone.

use std::collections::{HashMap, VecDeque};

use num_bigint::BigUint;

use crate::assignment::FrontierSignature;
use crate::node::SearchNode;
use crate::reference::NodeId;

struct Entry {
    id: NodeId,
    node: SearchNode,
    signature: FrontierSignature,
}

#[derive(Default)]
pub struct LevelQueue {
    entries: VecDeque<Entry>,
    /// label -> signature -> queued node.
    index: HashMap<usize, HashMap<FrontierSignature, NodeId>>,
    next_id: u32,
    max_len: usize,
}

impl LevelQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest number of nodes queued at once so far.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Number of handles allocated so far.
    pub fn num_allocated(&self) -> usize {
        self.next_id as usize
    }

    /// Enqueues `node` under its frontier signature and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if the label order would decrease, or if an equivalent node is
    /// already queued (callers must merge instead).
    pub fn push(&mut self, node: SearchNode, signature: FrontierSignature) -> NodeId {
        if let Some(back) = self.entries.back() {
            assert!(
                back.node.label() <= node.label(),
                "Queue labels must be non-decreasing: {} after {}",
                node.label(),
                back.node.label()
            );
        }

        let id = NodeId::new(self.next_id);
        self.next_id += 1;

        let previous = self
            .index
            .entry(node.label())
            .or_default()
            .insert(signature.clone(), id);
        assert!(previous.is_none(), "Equivalent node already queued: {:?}", previous);

        self.entries.push_back(Entry { id, node, signature });
        self.max_len = self.max_len.max(self.entries.len());
        id
    }

    pub fn pop(&mut self) -> Option<(NodeId, SearchNode)> {
        let entry = self.entries.pop_front()?;
        let label = entry.node.label();
        if let Some(level) = self.index.get_mut(&label) {
            level.remove(&entry.signature);
            if level.is_empty() {
                self.index.remove(&label);
            }
        }
        Some((entry.id, entry.node))
    }

    /// The queued node at `label` whose signature equals `signature`, if any.
    pub fn find_equivalent(&self, label: usize, signature: &FrontierSignature) -> Option<NodeId> {
        self.index.get(&label)?.get(signature).copied()
    }

    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        let pos = self.position(id)?;
        Some(&self.entries[pos].node)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SearchNode> {
        let pos = self.position(id)?;
        Some(&mut self.entries[pos].node)
    }

    /// Folds `node` into the queued node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not queued.
    pub fn merge(&mut self, id: NodeId, node: SearchNode) {
        match self.get_mut(id) {
            Some(survivor) => survivor.merge(node),
            None => panic!("Node {} is not queued", id),
        }
    }

    /// Sum of multiplicities over all queued nodes.
    pub fn total_count(&self) -> BigUint {
        self.entries.iter().map(|e| e.node.count()).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.entries.iter().map(|e| (e.id, &e.node))
    }

    // Handles are consecutive, so the offset from the front is the position.
    fn position(&self, id: NodeId) -> Option<usize> {
        let front = self.entries.front()?.id;
        if id < front {
            return None;
        }
        let pos = (id.get() - front.get()) as usize;
        if pos < self.entries.len() {
            debug_assert_eq!(self.entries[pos].id, id);
            Some(pos)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::catalog::{Tile, TileCatalog};
    use crate::context::Context;
    use crate::node::{Sink, Slot};

    fn children(ctx: &Context) -> Vec<SearchNode> {
        let mut sink = Sink::default();
        SearchNode::root(&ctx.topology)
            .expand(ctx, &mut sink)
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Child(node) => Some(node),
                Slot::Sink => None,
            })
            .collect()
    }

    fn context() -> Context {
        let tiles = [[0; 8], [1, 0, 0, 0, 1, 0, 0, 0], [0, 1, 0, 0, 0, 1, 0, 0]];
        let catalog = TileCatalog::new(tiles.iter().map(|&b| Tile::from_bits(b).unwrap()).collect());
        Context::for_grid(3, 3, catalog)
    }

    #[test]
    fn test_fifo() {
        let ctx = context();
        let t = &ctx.topology;
        let mut queue = LevelQueue::new();
        assert!(queue.is_empty());

        let root = SearchNode::root(t);
        let sig = root.signature(t);
        let id = queue.push(root, sig);
        assert_eq!(id, NodeId::ROOT);

        let (popped, node) = queue.pop().unwrap();
        assert_eq!(popped, NodeId::ROOT);
        assert_eq!(node.label(), 0);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_find_equivalent_and_merge() {
        let ctx = context();
        let t = &ctx.topology;
        let mut queue = LevelQueue::new();

        let nodes = children(&ctx);
        assert_eq!(nodes.len(), 3);
        let flat = queue.push(nodes[0].clone(), nodes[0].signature(t));
        let vertical = queue.push(nodes[1].clone(), nodes[1].signature(t));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.find_equivalent(1, &nodes[1].signature(t)), Some(vertical));

        // The third tile only touches vertex 0's private diagonals, so its
        // frontier matches the flat tile's.
        let sig = nodes[2].signature(t);
        assert_eq!(queue.find_equivalent(1, &sig), Some(flat));
        assert_eq!(queue.find_equivalent(2, &sig), None);

        queue.merge(flat, nodes[2].clone());
        assert_eq!(queue.get(flat).unwrap().count(), &BigUint::from(2u32));
        assert_eq!(queue.total_count(), BigUint::from(3u32));
    }

    #[test]
    fn test_pop_clears_index() {
        let ctx = context();
        let t = &ctx.topology;
        let mut queue = LevelQueue::new();
        let node = children(&ctx).remove(0);
        let sig = node.signature(t);
        let id = queue.push(node, sig.clone());

        assert_eq!(queue.find_equivalent(1, &sig), Some(id));
        queue.pop();
        assert_eq!(queue.find_equivalent(1, &sig), None);
        assert!(queue.get(id).is_none());
    }

    #[test]
    fn test_handles_survive_pops() {
        let ctx = context();
        let t = &ctx.topology;
        let mut queue = LevelQueue::new();
        let nodes = children(&ctx);
        let a = queue.push(nodes[0].clone(), nodes[0].signature(t));
        let b = queue.push(nodes[1].clone(), nodes[1].signature(t));

        queue.pop();
        assert!(queue.get(a).is_none());
        assert_eq!(queue.get(b), Some(&nodes[1]));
        assert_eq!(queue.max_len(), 2);
        assert_eq!(queue.num_allocated(), 2);
    }

    #[test]
    #[should_panic]
    fn test_push_rejects_duplicate() {
        let ctx = context();
        let t = &ctx.topology;
        let mut queue = LevelQueue::new();
        let node = children(&ctx).remove(0);
        queue.push(node.clone(), node.signature(t));
        queue.push(node.clone(), node.signature(t));
    }
}
