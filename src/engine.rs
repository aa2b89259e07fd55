//! Breadth-first construction of the frontier-merged diagram.
//!
//! Starting from the empty assignment, nodes are popped in FIFO order and
//! expanded at their label. Every fitting child either merges into a queued
//! node with the same frontier signature (their multiplicities add up) or is
//! queued itself. Nodes that reach the final label are folded into the grand
//! total. Without merging, the queue could grow as `|catalog|^label`; with it,
//! the queue is bounded by the number of distinct frontier signatures at
//! each label.
//!
//! At any point of the run, the multiplicities held by the queue, the sink,
//! and the grand total add up to the number of branches of the unmerged
//! search tree explored so far: every expansion of a node with multiplicity
//! `c` turns `c` into `|catalog| · c`.
//!
//! # Example
//!
//! ```
//! use crease_zdd::catalog::TileCatalog;
//! use crease_zdd::context::Context;
//! use crease_zdd::engine::Enumeration;
//! use num_bigint::BigUint;
//!
//! let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tiles.csv");
//! let ctx = Context::for_grid(3, 3, TileCatalog::from_path(path).unwrap());
//!
//! let outcome = Enumeration::new(&ctx).run();
//! assert_eq!(outcome.grand_total, BigUint::from(28288u32));
//! assert_eq!(outcome.reported_total(), BigUint::from(452608u32));
//! ```

use log::{debug, info, trace};
use num_bigint::BigUint;

use crate::context::Context;
use crate::diagram::{Arc, Diagram};
use crate::node::{SearchNode, Sink, Slot};
use crate::queue::LevelQueue;
use crate::reference::NodeId;

/// Multiplier applied to the grand total when reporting.
///
/// The count is not reduced by the symmetries of the square; see
/// [`count_orbits`][crate::symmetry::count_orbits] for an exact orbit count.
pub const SYMMETRY_FACTOR: u32 = 16;

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Stats {
    /// Nodes expanded.
    pub expanded: usize,
    /// Nodes folded into the grand total.
    pub finalized: usize,
    /// Children merged into an equivalent queued node.
    pub merged: usize,
    /// Slots routed to the sink.
    pub sunk: usize,
    /// Nodes pushed onto the queue, root included.
    pub queued: usize,
    pub max_queue_len: usize,
}

/// What a single [`Enumeration::step`] did.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Step {
    /// A terminal node's multiplicity was added to the grand total.
    Finalized { id: NodeId, count: BigUint },
    /// A node was expanded into one slot per tile.
    Expanded {
        id: NodeId,
        label: usize,
        count: BigUint,
        queued: usize,
        merged: usize,
        sunk: usize,
    },
}

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub grand_total: BigUint,
    pub sink_total: BigUint,
    pub diagram: Diagram,
    pub stats: Stats,
}

impl Outcome {
    /// `grand_total × SYMMETRY_FACTOR`.
    pub fn reported_total(&self) -> BigUint {
        &self.grand_total * SYMMETRY_FACTOR
    }
}

/// State of a running enumeration.
pub struct Enumeration<'a> {
    ctx: &'a Context,
    queue: LevelQueue,
    sink: Sink,
    grand_total: BigUint,
    diagram: Diagram,
    stats: Stats,
    current_label: usize,
}

impl<'a> Enumeration<'a> {
    /// Seeds the queue with the root node.
    pub fn new(ctx: &'a Context) -> Self {
        info!("Enumerating {} with {} tiles", ctx.topology, ctx.catalog.len());

        let mut queue = LevelQueue::new();
        let mut diagram = Diagram::new(ctx.topology.num_vertices());

        let root = SearchNode::root(&ctx.topology);
        let signature = root.signature(&ctx.topology);
        let id = queue.push(root, signature);
        diagram.add_node(id, 0);

        Self {
            ctx,
            queue,
            sink: Sink::default(),
            grand_total: BigUint::ZERO,
            diagram,
            stats: Stats {
                queued: 1,
                ..Stats::default()
            },
            current_label: 0,
        }
    }

    pub fn context(&self) -> &'a Context {
        self.ctx
    }

    pub fn queue(&self) -> &LevelQueue {
        &self.queue
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_done(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn grand_total(&self) -> &BigUint {
        &self.grand_total
    }

    pub fn sink_total(&self) -> &BigUint {
        self.sink.count()
    }

    /// Sum of multiplicities over all queued nodes.
    pub fn queued_total(&self) -> BigUint {
        self.queue.total_count()
    }

    /// Pops one node and either finalizes or expands it.
    ///
    /// Returns `None` once the queue is exhausted.
    pub fn step(&mut self) -> Option<Step> {
        let ctx = self.ctx;
        let topology = &ctx.topology;

        let (id, node) = self.queue.pop()?;

        if node.label() != self.current_label {
            debug!(
                "Level {}: {} nodes queued, {} allocated so far",
                node.label(),
                self.queue.len() + 1,
                self.queue.num_allocated()
            );
            self.current_label = node.label();
        }

        if node.is_terminal(topology) {
            self.grand_total += node.count();
            self.stats.finalized += 1;
            return Some(Step::Finalized {
                id,
                count: node.count().clone(),
            });
        }

        let slots = node.expand(ctx, &mut self.sink);
        let mut arcs = Vec::with_capacity(slots.len());
        let (mut queued, mut merged, mut sunk) = (0, 0, 0);

        for slot in slots {
            match slot {
                Slot::Sink => {
                    sunk += 1;
                    arcs.push(Arc::Sink);
                }
                Slot::Child(child) => {
                    let signature = child.signature(topology);
                    let label = child.label();
                    if let Some(target) = self.queue.find_equivalent(label, &signature) {
                        trace!("Merging child of {} into {} at label {}", id, target, label);
                        self.queue.merge(target, child);
                        merged += 1;
                        arcs.push(Arc::Node(target));
                    } else {
                        let child_id = self.queue.push(child, signature);
                        self.diagram.add_node(child_id, label);
                        queued += 1;
                        arcs.push(Arc::Node(child_id));
                    }
                }
            }
        }

        self.diagram.set_arcs(id, arcs);
        self.stats.expanded += 1;
        self.stats.queued += queued;
        self.stats.merged += merged;
        self.stats.sunk += sunk;
        self.stats.max_queue_len = self.queue.max_len();

        Some(Step::Expanded {
            id,
            label: node.label(),
            count: node.count().clone(),
            queued,
            merged,
            sunk,
        })
    }

    /// Runs until the queue is empty.
    pub fn run(mut self) -> Outcome {
        while self.step().is_some() {}
        self.stats.max_queue_len = self.queue.max_len();

        info!(
            "Done: grand total {} ({} nodes, {} merges, max queue {})",
            self.grand_total,
            self.diagram.len(),
            self.stats.merged,
            self.stats.max_queue_len
        );

        Outcome {
            grand_total: self.grand_total,
            sink_total: self.sink.count().clone(),
            diagram: self.diagram,
            stats: self.stats,
        }
    }
}

/// Grand total for `ctx`, without the symmetry multiplier.
pub fn count(ctx: &Context) -> BigUint {
    Enumeration::new(ctx).run().grand_total
}
