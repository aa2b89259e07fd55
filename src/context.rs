use crate::catalog::TileCatalog;
use crate::topology::GridTopology;

/// Read-only inputs shared by every stage of an enumeration.
///
/// Built once and passed around by reference.
#[derive(Debug, Clone)]
pub struct Context {
    pub topology: GridTopology,
    pub catalog: TileCatalog,
}

impl Context {
    pub fn new(topology: GridTopology, catalog: TileCatalog) -> Self {
        Self { topology, catalog }
    }

    /// Context for a `rows × cols` grid.
    pub fn for_grid(rows: usize, cols: usize, catalog: TileCatalog) -> Self {
        Self::new(GridTopology::new(rows, cols), catalog)
    }
}
