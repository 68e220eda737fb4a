//! Entry points for a browser front end, taking and returning boards as `string[][]`.

use js_sys::{Array, Math};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::board::Board;
use crate::builder::generate_level;
use crate::error::BoardError;
use crate::location::{Dimension, Location};
use crate::randomize::{randomize_level, DEFAULT_MUTATION_FRACTION};

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64((Math::random() * u64::MAX as f64) as u64)
}

fn to_js_error(err: BoardError) -> JsError {
    JsError::new(&err.to_string())
}

fn board_from_js(board: &Array) -> Result<Board, JsError> {
    let mut rows = Vec::with_capacity(board.length() as usize);
    for row in board.iter() {
        let row: Array = row.dyn_into().map_err(|_| JsError::new("board rows must be arrays"))?;
        let row = row.iter()
            .map(|cell| cell.as_string())
            .collect::<Option<Vec<String>>>()
            .ok_or_else(|| JsError::new("board cells must be strings"))?;
        rows.push(row);
    }

    Board::from_cells(&rows).map_err(to_js_error)
}

fn board_to_js(board: &Board) -> Array {
    board.to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(JsValue::from).collect::<Array>())
        .collect()
}

/// A solved `rows` by `cols` board.
#[wasm_bindgen(js_name = generateLevel)]
pub fn js_generate_level(rows: u32, cols: u32) -> Result<Array, JsError> {
    let (Some(rows), Some(cols)) = (Dimension::new(rows as usize), Dimension::new(cols as usize)) else {
        return Err(JsError::new("a level needs at least one row and one column"));
    };

    Ok(board_to_js(&generate_level(rows, cols, &mut seeded_rng())))
}

/// Scramble `board` until at least `mutation_fraction` of it differs, 0.8 if omitted.
#[wasm_bindgen(js_name = randomizeLevel)]
pub fn js_randomize_level(board: Array, mutation_fraction: Option<f64>) -> Result<Array, JsError> {
    let board = board_from_js(&board)?;
    let scrambled = randomize_level(&board, mutation_fraction.unwrap_or(DEFAULT_MUTATION_FRACTION), &mut seeded_rng())
        .map_err(to_js_error)?;
    Ok(board_to_js(&scrambled))
}

/// A copy of `board` with the tile at (`row`, `col`) turned `rotation` quarter turns clockwise, one if omitted.
#[wasm_bindgen(js_name = rotateBoardPiece)]
pub fn js_rotate_board_piece(board: Array, row: u32, col: u32, rotation: Option<u32>) -> Result<Array, JsError> {
    let rotated = board_from_js(&board)?
        .rotated(Location(row as usize, col as usize), rotation.unwrap_or(1) as usize)
        .map_err(to_js_error)?;
    Ok(board_to_js(&rotated))
}

/// Whether `board` is solved.
#[wasm_bindgen(js_name = checkLevelCompletion)]
pub fn js_check_level_completion(board: Array) -> Result<bool, JsError> {
    Ok(board_from_js(&board)?.is_complete())
}
