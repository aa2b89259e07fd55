//! Diagram to DOT (Graphviz) conversion.
//!
//! The generated DOT output follows these conventions:
//! - **Inner nodes** are circles labelled with their handle, grouped by label (one rank per vertex)
//! - **Terminal** and **sink** are squares at the bottom (sink rank)
//! - **Arcs** are directed; parallel arcs between the same pair of nodes are collapsed
//!   into one, labelled with the tile indices it stands for
//! - **Sink arcs** are dashed and can be hidden altogether
//!
//! # Examples
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
//! let dot = outcome.diagram.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::diagram::{Arc, Diagram};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for inner nodes (default: "circle")
    pub node_shape: &'static str,
    /// Shape for the terminal and the sink (default: "square")
    pub terminal_shape: &'static str,
    /// Style for arcs between nodes (default: "solid")
    pub arc_style: &'static str,
    /// Style for arcs into the sink (default: "dashed")
    pub sink_arc_style: &'static str,
    /// Whether to draw the sink and its arcs (default: false)
    pub show_sink: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            node_shape: "circle",
            terminal_shape: "square",
            arc_style: "solid",
            sink_arc_style: "dashed",
            show_sink: false,
        }
    }
}

impl Diagram {
    /// Converts the diagram to DOT format with the default configuration.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the diagram to DOT format.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "node [shape={}];", config.node_shape)?;

        writeln!(dot, "{{ rank=sink")?;
        if let Some(terminal) = self.terminal() {
            writeln!(dot, "{} [shape={}, label=\"T\"];", terminal.get(), config.terminal_shape)?;
        }
        if config.show_sink {
            writeln!(dot, "sink [shape={}, label=\"S\"];", config.terminal_shape)?;
        }
        writeln!(dot, "}}")?;

        let mut levels = BTreeMap::<usize, Vec<u32>>::new();
        for (id, node) in self.iter() {
            if self.is_terminal(id) {
                continue;
            }
            levels.entry(node.label).or_default().push(id.get());
        }
        for (label, ids) in &levels {
            writeln!(dot, "{{ rank=same")?;
            for id in ids {
                writeln!(dot, "{} [label=\"@{}\\nv{}\"];", id, id, label)?;
            }
            writeln!(dot, "}}")?;
        }

        for (id, node) in self.iter() {
            // Group tile slots by target, keeping first-seen order.
            let mut targets: Vec<(Arc, Vec<usize>)> = Vec::new();
            for (slot, &arc) in node.arcs.iter().enumerate() {
                match targets.iter_mut().find(|(a, _)| *a == arc) {
                    Some((_, slots)) => slots.push(slot),
                    None => targets.push((arc, vec![slot])),
                }
            }

            for (arc, slots) in targets {
                let label = slots.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(",");
                match arc {
                    Arc::Node(child) => {
                        writeln!(
                            dot,
                            "{} -> {} [style={}, label=\"{}\"];",
                            id.get(),
                            child.get(),
                            config.arc_style,
                            label
                        )?;
                    }
                    Arc::Sink if config.show_sink => {
                        writeln!(
                            dot,
                            "{} -> sink [style={}, label=\"{}\"];",
                            id.get(),
                            config.sink_arc_style,
                            label
                        )?;
                    }
                    Arc::Sink => {}
                }
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}
