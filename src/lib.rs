#![warn(missing_docs)]

//! # `pipelayer`
//!
//! Level generation and checking for pipe-rotation puzzles: a grid of pipe pieces, each of which the player
//! turns a quarter at a time until every pipe end meets another and the whole board forms one connected system.
//!
//! Begin by generating a solved board with [`generate_level`], or with a [`LevelBuilder`] for more control.
//! Scramble it with [`randomize_level`], then let the player turn pieces with [`Board::rotated`] (or
//! [`Board::rotate_in_place`]) and test for a win with [`Board::is_complete`]. [`Game`] bundles these steps the
//! way an interactive front end uses them.
//!
//! Every random choice is drawn from a caller-supplied [`rand::Rng`], so seeding that generator makes both
//! generation and shuffling reproducible.
//!
//! # Board layout
//! A board of `R` by `C` playable cells is stored as an `(R + 2) x (C + 2)` grid whose outermost ring always holds
//! empty tiles. Locations are `(row, col)` pairs into that grid, so playable cells run from `(1, 1)` to `(R, C)`.
//! The text form used by [`Board::from_rows`], [`Board::to_rows`] and [`Display`](std::fmt::Display) keeps the ring.
//!
//! Pieces are written as single characters:
//!
//! | symbol | stubs |
//! |---|---|
//! | `\|` `-` | straight pipes |
//! | `<` `^` `>` `_` | elbows, top-right, right-bottom, bottom-left, left-top |
//! | `+` | cross |
//! | `T` `A` `I` `H` | tees missing the top, right, bottom, left stub |
//! | `0` | empty |
//!
//! # Internals
//! Generation fills the playable cells in row-major order, choosing among the pieces agreeing with the neighbours
//! already placed (see [`neighbors`]) in random order, and backtracks when no piece fits.
//! A completely filled board is only accepted if at most 30% of it is empty and its pipes form a single
//! system; a rejected board unwinds a random number of placements at once before the search continues.

pub use board::Board;
pub use cell::Connects;
pub use builder::{generate_level, LevelBuilder, DEFAULT_DIMS, DEFAULT_MAX_EMPTY_RATIO};
pub use error::{BoardError, BuilderInvalidReason, GenerationFailure};
pub use game::{Difficulty, Game};
pub use location::{Coord, Dimension, Location};
pub use randomize::{mutation_frequency, randomize_level, DEFAULT_MUTATION_FRACTION};
pub use shape::{Connections, Direction};
pub use symbol::Symbol;

pub(crate) mod board;
mod tests;
pub(crate) mod cell;
pub(crate) mod error;
pub(crate) mod game;
pub(crate) mod location;
pub mod neighbors;
pub(crate) mod randomize;
pub(crate) mod shape;
pub(crate) mod symbol;
pub mod builder;
#[cfg(feature = "wasm")]
mod wasm;

/// A copy of `board` with the piece at `location` turned `rotation` quarter turns clockwise.
pub fn rotate_board_piece(board: &Board, location: Location, rotation: usize) -> Result<Board, BoardError> {
    board.rotated(location, rotation)
}

/// Turn the piece at `location` of `board` by `rotation` quarter turns clockwise, in place.
pub fn rotate_board_piece_in_place(board: &mut Board, location: Location, rotation: usize) -> Result<(), BoardError> {
    board.rotate_in_place(location, rotation)
}

/// Whether every pipe end on `board` meets another.
pub fn check_level_completion(board: &Board) -> bool {
    board.is_complete()
}
