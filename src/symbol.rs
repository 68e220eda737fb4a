use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::error::BoardError;
use crate::shape::Connections;

/// A tile of the puzzle, printed as a single character.
///
/// Every variant stands for exactly one [`Connections`] pattern and no two variants share one.
/// The set is closed under rotation: turning any tile yields another tile of the set.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Default, Ord, PartialOrd)]
pub enum Symbol {
    /// `|`
    Vertical,
    /// `-`
    Horizontal,
    /// `<`, top and right
    ElbowUpRight,
    /// `^`, right and bottom
    ElbowRightDown,
    /// `>`, bottom and left
    ElbowDownLeft,
    /// `_`, left and top
    ElbowLeftUp,
    /// `+`
    Cross,
    /// `T`, every side but the top
    TeeNoUp,
    /// `A`, every side but the right
    TeeNoRight,
    /// `I`, every side but the bottom
    TeeNoDown,
    /// `H`, every side but the left
    TeeNoLeft,
    /// `0`, no pipe at all; also fills the board border
    #[default]
    Empty,
}

const STRAIGHT: Connections = Connections::new(true, false, true, false);
const ELBOW: Connections = Connections::new(true, true, false, false);
const TEE: Connections = Connections::new(false, true, true, true);

impl Symbol {
    /// The sides this tile has pipe stubs on.
    pub const fn connections(&self) -> Connections {
        match self {
            Self::Vertical => STRAIGHT,
            Self::Horizontal => STRAIGHT.rotated_clockwise(1),
            Self::ElbowUpRight => ELBOW,
            Self::ElbowRightDown => ELBOW.rotated_clockwise(1),
            Self::ElbowDownLeft => ELBOW.rotated_clockwise(2),
            Self::ElbowLeftUp => ELBOW.rotated_clockwise(3),
            Self::Cross => Connections::new(true, true, true, true),
            Self::TeeNoUp => TEE,
            Self::TeeNoRight => TEE.rotated_clockwise(1),
            Self::TeeNoDown => TEE.rotated_clockwise(2),
            Self::TeeNoLeft => TEE.rotated_clockwise(3),
            Self::Empty => Connections::new(false, false, false, false),
        }
    }

    /// Reverse catalog lookup. [`None`] for the patterns no tile realizes, such as a lone stub.
    pub fn from_connections(connections: Connections) -> Option<Self> {
        Self::VARIANTS.iter()
            .find(|symbol| symbol.connections() == connections)
            .copied()
    }

    /// The tile obtained by turning `self` a quarter clockwise `times` times.
    pub fn rotated(&self, times: usize) -> Result<Self, BoardError> {
        let connections = self.connections().rotated_clockwise(times);
        Self::from_connections(connections).ok_or(BoardError::NoMatchingSymbol(connections))
    }

    /// The character this tile is written as.
    pub const fn as_char(&self) -> char {
        match self {
            Self::Vertical => '|',
            Self::Horizontal => '-',
            Self::ElbowUpRight => '<',
            Self::ElbowRightDown => '^',
            Self::ElbowDownLeft => '>',
            Self::ElbowLeftUp => '_',
            Self::Cross => '+',
            Self::TeeNoUp => 'T',
            Self::TeeNoRight => 'A',
            Self::TeeNoDown => 'I',
            Self::TeeNoLeft => 'H',
            Self::Empty => '0',
        }
    }

    /// Tiles whose every rotation looks the same.
    /// The randomizer always counts these as scrambled since turning them changes nothing.
    pub fn is_rotation_invariant(&self) -> bool {
        matches!(self, Self::Cross | Self::Empty)
    }
}

impl TryFrom<char> for Symbol {
    type Error = BoardError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::VARIANTS.iter()
            .find(|symbol| symbol.as_char() == value)
            .copied()
            .ok_or(BoardError::UnknownSymbol(value))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
