use crate::location::Location;
use crate::shape::Connections;

/// Reasons a board operation may fail.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum BoardError {
    /// A character outside the tile alphabet was found while decoding.
    #[error("unknown tile symbol {0:?}")]
    UnknownSymbol(char),
    /// A connection pattern has no tile in the alphabet.
    /// The alphabet is closed under rotation, so this should never come out of a rotation.
    #[error("no tile symbol has connections {0}")]
    NoMatchingSymbol(Connections),
    /// The location lies outside the grid, border included.
    #[error("location {0} is outside the board")]
    OutOfBounds(Location),
    /// A cell of a decoded board is not exactly one character.
    #[error("cell {location} holds {cell:?}, expected a single tile symbol")]
    MalformedCell {
        /// Where the cell sits, border included.
        location: Location,
        /// What the cell held instead.
        cell: String,
    },
    /// Rows of a decoded board differ in length.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Index of the first offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A decoded board has no room for an interior cell inside its border.
    #[error("a board needs at least 3 rows and 3 columns including its border")]
    TooSmall,
    /// The sentinel border of a decoded board holds something other than the empty tile.
    #[error("border cell {0} is not the empty tile")]
    BorderNotEmpty(Location),
    /// The randomizer was asked for a mutation fraction outside `[0, 1]`.
    #[error("mutation fraction {0} is not within [0, 1]")]
    InvalidMutationFraction(f64),
}

/// Reasons a [`LevelBuilder`](crate::builder::LevelBuilder) may be invalid.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BuilderInvalidReason {
    /// The maximum ratio of empty tiles was set outside `[0, 1]`.
    EmptyRatioOutOfRange,
}

/// Reasons level generation may fail.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GenerationFailure {
    /// The builder was configured with settings it cannot generate from.
    #[error("level builder is invalid: {0:?}")]
    Invalid(Vec<BuilderInvalidReason>),
    /// Every allowed attempt ended without a fit board.
    #[error("no fit board found in {attempts} attempts")]
    AttemptsExhausted {
        /// How many fresh starts were made.
        attempts: usize,
    },
}
