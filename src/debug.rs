//! Debug utilities for inspecting nodes and a running enumeration.
//!
//! These are primarily useful in tests and during development.

use std::fmt::Write;

use crate::engine::Enumeration;
use crate::node::SearchNode;

impl SearchNode {
    /// Multi-line dump: label, multiplicity and the edge vector.
    pub fn debug_string(&self) -> String {
        let mut result = String::new();
        writeln!(&mut result, "label : {}", self.label()).unwrap();
        writeln!(&mut result, "route : {}", self.count()).unwrap();
        writeln!(&mut result, "{}", self.assignment()).unwrap();
        result
    }
}

impl Enumeration<'_> {
    /// Dump the queue, sink and grand total.
    pub fn dump_state(&self) -> String {
        let mut result = String::new();

        writeln!(&mut result, "=== Enumeration State ===").unwrap();
        writeln!(&mut result, "{}", self.context().topology).unwrap();
        writeln!(&mut result, "Grand total: {}", self.grand_total()).unwrap();
        writeln!(&mut result, "Sink: {}", self.sink_total()).unwrap();
        writeln!(&mut result, "Queued: count={}", self.queue().len()).unwrap();

        for (id, node) in self.queue().iter() {
            let signature = node.signature(&self.context().topology);
            writeln!(
                &mut result,
                "  {} label={} route={} frontier={}",
                id,
                node.label(),
                node.count(),
                signature.width()
            )
            .unwrap();
        }

        result
    }
}
