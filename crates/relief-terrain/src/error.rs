//! Terrain generation error types.

/// Errors raised by the height field, classification, and color map stages.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The terrain-type table has no entries, so no height can be classified.
    #[error("terrain-type table is empty")]
    EmptyTerrainTable,

    /// A grid dimension of zero would divide by zero when normalizing coordinates.
    #[error("grid dimensions must be non-zero (width {width}, depth {depth})")]
    EmptyGrid {
        /// Configured grid width in cells.
        width: u32,
        /// Configured grid depth in cells.
        depth: u32,
    },

    /// The supplied octave offsets do not match the octave count.
    #[error("expected {expected} octave offsets, got {actual}")]
    OffsetCountMismatch {
        /// Number of octaves requested.
        expected: u32,
        /// Number of offsets supplied.
        actual: usize,
    },
}
