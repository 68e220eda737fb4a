use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::{iproduct, Itertools};
use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use strum::VariantArray;

use crate::error::BoardError;
use crate::location::{Dimension, Location};
use crate::shape::Direction;
use crate::symbol::Symbol;

/// A rectangular puzzle board surrounded by a one cell wide border of [`Symbol::Empty`].
///
/// The border never holds a piece; it exists so every interior cell has four neighbours to look at.
/// Boards come out of [`generate_level`](crate::generate_level) or a [`LevelBuilder`](crate::LevelBuilder),
/// or are decoded from their text form with [`Board::from_rows`].
///
/// A board may well hold pipes pointing nowhere, e.g. right after a rotation; that is a legal state,
/// only [`Board::is_complete`] cares.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pub(crate) cells: Array2<Symbol>,
    // rows, cols; interior only
    pub(crate) dims: (Dimension, Dimension),
}

impl Board {
    /// Interior extent as (rows, cols).
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// Number of playable rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of playable columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.dims.1.get()
    }

    /// Any cell of the grid, border included.
    pub fn get(&self, location: Location) -> Option<Symbol> {
        self.cells.get(location.as_index()).copied()
    }

    /// Whether `location` is a playable cell rather than border or outside the grid.
    pub fn is_interior(&self, location: Location) -> bool {
        (1..=self.rows()).contains(&location.0) && (1..=self.cols()).contains(&location.1)
    }

    /// Playable cells in row-major order.
    pub fn interior(&self) -> impl Iterator<Item = Location> {
        iproduct!(1..=self.rows(), 1..=self.cols()).map(Location::from)
    }

    fn has_matching_neighbor(&self, location: Location, direction: Direction) -> bool {
        self.get(direction.attempt_from(location))
            .is_some_and(|neighbor| neighbor.connections().has(direction.invert()))
    }

    /// Whether the board is solved: every stub of every playable cell meets a stub of its neighbour.
    ///
    /// A stub pointing into the border can never be met.
    pub fn is_complete(&self) -> bool {
        self.interior().all(|location| {
            let connections = self.cells[location.as_index()].connections();
            Direction::VARIANTS.iter()
                .filter(|dir| connections.has(**dir))
                .all(|dir| self.has_matching_neighbor(location, *dir))
        })
    }

    /// Number of playable cells holding [`Symbol::Empty`].
    pub fn empty_count(&self) -> usize {
        self.interior()
            .filter(|location| self.cells[location.as_index()] == Symbol::Empty)
            .count()
    }

    /// Size of the pipe system reached from the first non-empty playable cell in row-major order.
    ///
    /// Two cells belong to the same system when they face each other with matching stubs.
    /// A board of nothing but empty tiles has no pipe system at all and yields 0.
    pub fn pipe_system_len(&self) -> usize {
        let mut graph: UnGraphMap<Location, ()> = UnGraphMap::with_capacity(self.rows() * self.cols(), 0);

        for location in self.interior().filter(|l| self.cells[l.as_index()] != Symbol::Empty) {
            graph.add_node(location);
            let connections = self.cells[location.as_index()].connections();
            // edges to the right and down cover every adjacent pair once
            for direction in [Direction::Right, Direction::Down] {
                let neighbor = direction.attempt_from(location);
                if connections.has(direction) && self.is_interior(neighbor) && self.has_matching_neighbor(location, direction) {
                    graph.add_edge(location, neighbor, ());
                }
            }
        }

        let Some(start) = self.interior().find(|l| self.cells[l.as_index()] != Symbol::Empty) else {
            return 0;
        };

        let mut bfs = Bfs::new(&graph, start);
        let mut visited = 0;
        while bfs.next(&graph).is_some() {
            visited += 1;
        }
        visited
    }

    /// Turn the tile at `location` a quarter clockwise `times` times, in place.
    pub fn rotate_in_place(&mut self, location: Location, times: usize) -> Result<(), BoardError> {
        let cell = self.cells.get_mut(location.as_index())
            .ok_or(BoardError::OutOfBounds(location))?;
        *cell = cell.rotated(times)?;
        Ok(())
    }

    /// A copy of this board with the tile at `location` turned `times` times; `self` is untouched.
    pub fn rotated(&self, location: Location, times: usize) -> Result<Self, BoardError> {
        let mut out = self.clone();
        out.rotate_in_place(location, times)?;
        Ok(out)
    }

    /// Decode a board from rows of tile characters, border included.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BoardError> {
        let parsed: Vec<Vec<Symbol>> = rows.iter()
            .map(|row| row.as_ref().chars().map(Symbol::try_from).collect::<Result<Vec<_>, _>>())
            .collect::<Result<_, _>>()?;

        let width = parsed.first().map_or(0, Vec::len);
        if let Some((row, found)) = parsed.iter().map(Vec::len).find_position(|len| *len != width) {
            return Err(BoardError::Ragged { row, expected: width, found });
        }

        let dims = (
            Dimension::new(parsed.len().saturating_sub(2)).ok_or(BoardError::TooSmall)?,
            Dimension::new(width.saturating_sub(2)).ok_or(BoardError::TooSmall)?,
        );

        let board = Self {
            cells: Array2::from_shape_fn((parsed.len(), width), |(r, c)| parsed[r][c]),
            dims,
        };

        if let Some((index, _)) = board.cells.indexed_iter()
            .find(|(index, symbol)| !board.is_interior(Location::from(*index)) && **symbol != Symbol::Empty) {
            return Err(BoardError::BorderNotEmpty(Location::from(index)));
        }

        Ok(board)
    }

    /// Decode a board from rows of one-character cells, border included, the shape [`Board::to_rows`] produces.
    ///
    /// A cell holding anything but exactly one character is rejected rather than merged into its neighbours.
    pub fn from_cells<S: AsRef<str>>(rows: &[Vec<S>]) -> Result<Self, BoardError> {
        let joined = rows.iter()
            .enumerate()
            .map(|(r, row)| row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    let mut chars = cell.as_ref().chars();
                    match (chars.next(), chars.next()) {
                        (Some(symbol), None) => Ok(symbol),
                        _ => Err(BoardError::MalformedCell { location: Location(r, c), cell: cell.as_ref().to_owned() }),
                    }
                })
                .collect::<Result<String, _>>())
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_rows(&joined)
    }

    /// The board as rows of one-character strings, border included, the way a UI layer consumes it.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells.rows()
            .into_iter()
            .map(|row| row.iter().map(Symbol::to_string).collect())
            .collect()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_rows(&s.lines().map(str::trim).filter(|line| !line.is_empty()).collect_vec())
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut out = String::with_capacity(self.cells.nrows() * (self.cells.ncols() + 1));

        for row in self.cells.rows() {
            for cell in row {
                out.push(cell.as_char());
            }
            out.push('\n');
        }

        write!(f, "{}", out)
    }
}
