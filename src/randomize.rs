use log::debug;
use rand::Rng;

use crate::board::Board;
use crate::error::BoardError;

/// Share of playable tiles a shuffle must leave scrambled unless asked otherwise.
pub const DEFAULT_MUTATION_FRACTION: f64 = 0.8;

/// Fraction of the playable cells of `scrambled` that count as moved away from `original`.
///
/// Empty tiles and crosses always count, since no rotation can change how they look.
/// Every cell of the grid is scored and the border, which always counts through its empty tiles,
/// is taken back out before dividing by the number of playable cells.
pub fn mutation_frequency(original: &Board, scrambled: &Board) -> f64 {
    let mutated = scrambled.cells.iter()
        .zip(original.cells.iter())
        .filter(|(now, before)| now != before || now.is_rotation_invariant())
        .count();

    let (full_rows, full_cols) = scrambled.cells.dim();
    let border = 2 * full_rows + 2 * full_cols - 4;
    (mutated as f64 - border as f64) / (scrambled.rows() * scrambled.cols()) as f64
}

/// A scrambled copy of `board`; `board` itself is left as it was.
///
/// Every playable tile is turned a random number of quarter turns, drawn from
/// `floor(mutation_fraction)..=floor(4 - mutation_fraction) + floor(mutation_fraction)`, and whole passes
/// are repeated until at least `mutation_fraction` of the tiles count as scrambled by [`mutation_frequency`].
pub fn randomize_level<R: Rng + ?Sized>(board: &Board, mutation_fraction: f64, rng: &mut R) -> Result<Board, BoardError> {
    if !(0.0..=1.0).contains(&mutation_fraction) {
        return Err(BoardError::InvalidMutationFraction(mutation_fraction));
    }

    let mut scrambled = board.clone();
    let mut passes = 0;
    loop {
        for location in board.interior() {
            let turns = (rng.random::<f64>() * (4.0 - mutation_fraction) + mutation_fraction).floor() as usize;
            scrambled.rotate_in_place(location, turns)?;
        }
        passes += 1;

        let frequency = mutation_frequency(board, &scrambled);
        debug!("shuffle pass {} left {:.3} of the board scrambled", passes, frequency);
        if frequency >= mutation_fraction {
            return Ok(scrambled);
        }
    }
}
