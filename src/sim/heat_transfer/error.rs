use thiserror::Error;

use crate::sim::heat_transfer::boundary::BoundaryCategory;

/// Configuration errors detected before the first relaxation step.
///
/// None of these are recoverable: the driver reports them and exits without
/// producing a result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("unknown wall type {marker:?} at row {row}, column {column}")]
    UnknownMarker {
        marker: char,
        row: usize,
        column: usize,
    },

    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid must be at least 3x3, got {nx}x{ny}")]
    TooSmall { nx: usize, ny: usize },

    #[error("{category} cell at ({i}, {j}) reads a neighbour outside the grid")]
    NeighbourOutsideGrid {
        category: BoundaryCategory,
        i: usize,
        j: usize,
    },

    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    #[error("invalid solver configuration: {0}")]
    InvalidConfig(String),
}
