//! The catalog of locally flat-foldable vertex configurations.
//!
//! A [`Tile`] fixes all 8 edges around one internal vertex. The catalog is
//! loaded from a comma-separated file with one tile per row and one `0`/`1`
//! field per [`Direction`], in direction order. Row order is significant:
//! it fixes the tile indices and hence the order of outgoing arcs of every
//! diagram node.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;
use thiserror::Error;

use crate::types::{Direction, EdgeState};

/// Errors raised while loading a tile catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot open catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: expected 8 fields, found {found}")]
    FieldCount { row: usize, found: usize },
    #[error("row {row}, column {column}: expected 0 or 1, found {value:?}")]
    InvalidValue { row: usize, column: usize, value: String },
}

/// One valid configuration of the 8 edges around a vertex.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile([EdgeState; 8]);

impl Tile {
    /// Creates a tile from 8 fixed edge states.
    ///
    /// # Panics
    ///
    /// Panics if any state is [`EdgeState::Undefined`].
    pub fn new(states: [EdgeState; 8]) -> Self {
        assert!(
            states.iter().all(|s| s.is_defined()),
            "Tile edges must all be fixed: {:?}",
            states
        );
        Tile(states)
    }

    /// Creates a tile from `0`/`1` bits in direction order.
    pub fn from_bits(bits: [u8; 8]) -> Option<Self> {
        let mut states = [EdgeState::NotUse; 8];
        for (state, bit) in states.iter_mut().zip(bits) {
            *state = EdgeState::from_bit(bit)?;
        }
        Some(Tile(states))
    }

    pub fn get(&self, dir: Direction) -> EdgeState {
        self.0[dir.index()]
    }

    pub fn states(&self) -> &[EdgeState; 8] {
        &self.0
    }

    /// Number of creases meeting at the vertex.
    pub fn degree(&self) -> usize {
        self.0.iter().filter(|&&s| s == EdgeState::Use).count()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in self.0 {
            write!(f, "{}", state)?;
        }
        Ok(())
    }
}

/// Ordered, immutable list of tiles.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
}

impl TileCatalog {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Loads a catalog file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        debug!("Loading tile catalog from {}", path.display());
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Parses a headerless comma-separated catalog.
    ///
    /// Every row must have exactly 8 fields, each `0` or `1` after trimming.
    /// Row numbers in errors are 1-based.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut tiles = Vec::new();
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            if record.len() != 8 {
                return Err(CatalogError::FieldCount { row, found: record.len() });
            }
            let mut states = [EdgeState::NotUse; 8];
            for (column, (state, field)) in states.iter_mut().zip(record.iter()).enumerate() {
                *state = match field {
                    "0" => EdgeState::NotUse,
                    "1" => EdgeState::Use,
                    _ => {
                        return Err(CatalogError::InvalidValue {
                            row,
                            column: column + 1,
                            value: field.to_string(),
                        })
                    }
                };
            }
            tiles.push(Tile(states));
        }

        debug!("Loaded {} tiles", tiles.len());
        Ok(Self { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    #[test]
    fn test_parse() {
        let data = "0,0,0,0,0,0,0,0\n1,0,0,0,1,0,0,0\n 1 ,1,1,1,1,1,1, 1\n";
        let catalog = TileCatalog::from_reader(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.tile(0).degree(), 0);
        assert_eq!(catalog.tile(1).degree(), 2);
        assert_eq!(catalog.tile(1).get(Direction::Up), EdgeState::Use);
        assert_eq!(catalog.tile(1).get(Direction::Down), EdgeState::Use);
        assert_eq!(catalog.tile(1).get(Direction::Left), EdgeState::NotUse);
        assert_eq!(catalog.tile(2).to_string(), "11111111");
    }

    #[test]
    fn test_empty() {
        let catalog = TileCatalog::from_reader("".as_bytes()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_wrong_field_count() {
        let data = "0,0,0,0,0,0,0,0\n1,0,0,0,1,0,0\n";
        let err = TileCatalog::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, CatalogError::FieldCount { row: 2, found: 7 }), "{:?}", err);
    }

    #[test]
    fn test_invalid_value() {
        let data = "0,0,0,0,0,0,0,2\n";
        let err = TileCatalog::from_reader(data.as_bytes()).unwrap_err();
        match err {
            CatalogError::InvalidValue { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, 8);
                assert_eq!(value, "2");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_reference_catalog() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/tiles.csv");
        let catalog = TileCatalog::from_path(path).unwrap();
        assert_eq!(catalog.len(), 36);
        // Flat-foldable vertices have an even number of creases.
        assert!(catalog.iter().all(|t| t.degree() % 2 == 0));
    }

    #[test]
    #[should_panic]
    fn test_tile_rejects_undefined() {
        Tile::new([EdgeState::Undefined; 8]);
    }
}
