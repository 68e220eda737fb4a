use rand::Rng;
use strum::{Display, EnumString, VariantArray};

use crate::board::Board;
use crate::builder::generate_level;
use crate::error::BoardError;
use crate::location::{Dimension, Location};
use crate::randomize::randomize_level;

/// Named shuffle intensities.
#[derive(Copy, Clone, Debug, Default, Display, EnumString, Eq, Hash, PartialEq, VariantArray)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    /// Scramble 40% of the board.
    Easy,
    /// Scramble 60% of the board.
    Medium,
    /// Scramble 80% of the board.
    #[default]
    Hard,
}

impl Difficulty {
    /// The mutation fraction handed to [`randomize_level`].
    pub fn mutation_fraction(&self) -> f64 {
        match self {
            Self::Easy => 0.4,
            Self::Medium => 0.6,
            Self::Hard => 0.8,
        }
    }
}

/// One round of play: a scrambled board the player turns tile by tile until it is solved.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    won: bool,
}

impl Game {
    /// Generate a fresh board of `rows` by `cols` and scramble it as hard as `difficulty` says.
    pub fn new<R: Rng + ?Sized>(rows: Dimension, cols: Dimension, difficulty: Difficulty, rng: &mut R) -> Result<Self, BoardError> {
        let solved = generate_level(rows, cols, rng);
        Ok(Self::from_board(randomize_level(&solved, difficulty.mutation_fraction(), rng)?))
    }

    /// Play on an existing board. Some boards are solved from the start, e.g. those made only of empty tiles.
    pub fn from_board(board: Board) -> Self {
        let won = board.is_complete();
        Self { board, won }
    }

    /// The board as the player currently sees it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whether the board has been solved.
    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Turn the tile at `location` a quarter clockwise and report whether the board is now solved.
    ///
    /// Once won, the board no longer changes.
    pub fn click(&mut self, location: Location) -> Result<bool, BoardError> {
        if self.won {
            return Ok(true);
        }

        self.board = self.board.rotated(location, 1)?;
        self.won = self.board.is_complete();
        Ok(self.won)
    }

    /// Two clicks in a row; stops after the first if that one solves the board.
    pub fn double_click(&mut self, location: Location) -> Result<bool, BoardError> {
        self.click(location)?;
        self.click(location)
    }
}
