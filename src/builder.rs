//! Generation of solved levels.

use std::num::NonZero;

use itertools::iproduct;
use log::{debug, trace};
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::Board;
use crate::error::{BuilderInvalidReason, GenerationFailure};
use crate::location::{Dimension, Location};
use crate::neighbors::{compatible_symbols, required_connections};
use crate::symbol::Symbol;

/// Largest share of playable cells a generated board may leave empty, unless it is a single row or column.
pub const DEFAULT_MAX_EMPTY_RATIO: f64 = 0.3;

const fn dimension(n: usize) -> Dimension {
    match Dimension::new(n) {
        Some(dim) => dim,
        None => panic!("board dimensions are nonzero"),
    }
}

/// Board size used when nothing else is asked for, as (rows, cols).
pub const DEFAULT_DIMS: (Dimension, Dimension) = (dimension(7), dimension(5));

/// Outcome of filling the board from some cell onwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Attempt {
    Placed,
    /// The fill failed; `jump` counts how many placed cells to unwind before trying another tile.
    /// Most failures unwind a single cell, a rejected full board unwinds a random number of them.
    Backtrack { jump: usize },
}

/// A placed cell together with the tiles still left to try there.
struct Frame {
    location: Location,
    candidates: Vec<Symbol>,
    tried: usize,
}

/// Builds solved levels of a given size.
///
/// Every cell is filled in row-major order with a tile agreeing with the neighbours placed so far, tile order
/// shuffled per cell. Once the board is full it must be "fit": few enough empty tiles and all pipes forming a
/// single system. An unfit board unwinds a random number of cells at once rather than one.
/// If the search unwinds past the first cell, the attempt starts over on a blank board.
///
/// Builders can be [`Clone`]d to keep a configuration around.
#[derive(Clone, Debug)]
pub struct LevelBuilder {
    // rows, cols
    dims: (Dimension, Dimension),
    max_empty_ratio: f64,
    max_attempts: Option<NonZero<usize>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for LevelBuilder {
    fn default() -> Self {
        Self::with_dims(DEFAULT_DIMS)
    }
}

impl LevelBuilder {
    /// Construct a new [`Self`] for boards of `dims` playable cells, in `(rows, cols)` order.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            max_empty_ratio: DEFAULT_MAX_EMPTY_RATIO,
            max_attempts: None,
            invalid_reasons: Default::default(),
        }
    }

    /// Allow at most `ratio` of the playable cells to be empty tiles.
    /// Boards with a single row or column are exempt from this check.
    ///
    /// May cause the builder to enter an [`EmptyRatioOutOfRange`](BuilderInvalidReason::EmptyRatioOutOfRange) invalid state if `ratio` is not within `[0, 1]`.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn max_empty_ratio(&mut self, ratio: f64) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !(0.0..=1.0).contains(&ratio) {
            self.invalid_reasons.push(BuilderInvalidReason::EmptyRatioOutOfRange);
            return self;
        }

        self.max_empty_ratio = ratio;
        self
    }

    /// Give up after `attempts` fresh starts instead of searching forever.
    ///
    /// Without a cap, generation is not guaranteed to finish in bounded time for every size.
    pub fn max_attempts(&mut self, attempts: NonZero<usize>) -> &mut Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Generate a solved board, drawing every random choice from `rng`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Board, GenerationFailure> {
        if !self.invalid_reasons.is_empty() {
            return Err(GenerationFailure::Invalid(self.invalid_reasons.clone()));
        }

        let mut attempts = 0;
        loop {
            if self.max_attempts.is_some_and(|max| attempts >= max.get()) {
                return Err(GenerationFailure::AttemptsExhausted { attempts });
            }
            attempts += 1;

            match attempt(self.dims, self.max_empty_ratio, rng) {
                Some(board) => {
                    debug!("generated {}x{} board after {} attempt(s)", self.dims.0, self.dims.1, attempts);
                    return Ok(board);
                }
                None => debug!("generation attempt {} exhausted the search, starting over", attempts),
            }
        }
    }
}

/// Generate a solved `rows` by `cols` board with the default settings, retrying until one is found.
///
/// There is no bound on the number of retries; use [`LevelBuilder::max_attempts`] where that matters.
pub fn generate_level<R: Rng + ?Sized>(rows: Dimension, cols: Dimension, rng: &mut R) -> Board {
    loop {
        if let Some(board) = attempt((rows, cols), DEFAULT_MAX_EMPTY_RATIO, rng) {
            return board;
        }
        debug!("generation attempt exhausted the search, starting over");
    }
}

#[inline]
fn next_location(location: Location, cols: usize) -> Location {
    if location.1 == cols {
        Location(location.0 + 1, 1)
    } else {
        Location(location.0, location.1 + 1)
    }
}

fn snapshot(grid: &Array2<Option<Symbol>>, dims: (Dimension, Dimension)) -> Board {
    Board {
        cells: grid.map(|cell| cell.unwrap_or(Symbol::Empty)),
        dims,
    }
}

/// Judge a completely filled board.
fn fitness<R: Rng + ?Sized>(board: &Board, max_empty_ratio: f64, rng: &mut R) -> Attempt {
    let (rows, cols) = (board.rows(), board.cols());
    let area = rows * cols;
    let empties = board.empty_count();

    if rows > 1 && cols > 1 && empties as f64 > max_empty_ratio * area as f64 {
        let jump = rng.random_range(0..area);
        trace!("{} of {} tiles empty, unwinding {}", empties, area, jump);
        return Attempt::Backtrack { jump };
    }

    let system = board.pipe_system_len();
    if system + empties < area {
        let jump = rng.random_range(0..area);
        trace!("pipe system covers {} of {} pipe tiles, unwinding {}", system, area - empties, jump);
        return Attempt::Backtrack { jump };
    }

    Attempt::Placed
}

/// One run of the backtracking search from a blank board.
///
/// Cells are filled on an explicit stack of [`Frame`]s, so the call stack stays flat however large the board.
fn attempt<R: Rng + ?Sized>(dims: (Dimension, Dimension), max_empty_ratio: f64, rng: &mut R) -> Option<Board> {
    let (rows, cols) = (dims.0.get(), dims.1.get());
    // the border reads as empty tiles, unplaced cells as unconstrained
    let mut grid: Array2<Option<Symbol>> = Array2::from_elem((rows + 2, cols + 2), Some(Symbol::Empty));
    for index in iproduct!(1..=rows, 1..=cols) {
        grid[index] = None;
    }

    let mut stack: Vec<Frame> = Vec::with_capacity(rows * cols);
    let mut cursor = Location(1, 1);

    loop {
        let mut jump = if cursor.0 > rows {
            let board = snapshot(&grid, dims);
            match fitness(&board, max_empty_ratio, rng) {
                Attempt::Placed => return Some(board),
                Attempt::Backtrack { jump } => jump,
            }
        } else {
            let mut candidates = compatible_symbols(required_connections(&grid, cursor));
            candidates.shuffle(rng);

            match candidates.first() {
                Some(symbol) => {
                    grid[cursor.as_index()] = Some(*symbol);
                    stack.push(Frame { location: cursor, candidates, tried: 0 });
                    cursor = next_location(cursor, cols);
                    continue;
                }
                None => 1,
            }
        };

        loop {
            let frame = stack.last_mut()?;
            let location = frame.location;

            jump = jump.saturating_sub(1);
            if jump > 0 {
                // still unwinding; this cell is abandoned without trying its other tiles
                grid[location.as_index()] = None;
                stack.pop();
                continue;
            }

            frame.tried += 1;
            match frame.candidates.get(frame.tried).copied() {
                Some(symbol) => {
                    grid[location.as_index()] = Some(symbol);
                    cursor = next_location(location, cols);
                    break;
                }
                None => {
                    grid[location.as_index()] = None;
                    stack.pop();
                    jump = 1;
                }
            }
        }
    }
}
