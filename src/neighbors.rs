//! Which tiles may go where, judged from the neighbours of a cell.

use ndarray::Array2;
use strum::VariantArray;

use crate::cell::Connects;
use crate::location::Location;
use crate::shape::{Connections, Direction};
use crate::symbol::Symbol;

/// What the neighbours of a cell demand of it, side by side.
///
/// `Some(true)` means the neighbour on that side has a stub pointing back here, `Some(false)` means
/// it has none, and [`None`] leaves that side free because there is no placed neighbour to ask.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Requirements {
    /// Demand from the cell above.
    pub top: Option<bool>,
    /// Demand from the cell to the right.
    pub right: Option<bool>,
    /// Demand from the cell below.
    pub bottom: Option<bool>,
    /// Demand from the cell to the left.
    pub left: Option<bool>,
}

impl Requirements {
    fn side(&self, direction: Direction) -> Option<bool> {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Whether a tile with `connections` satisfies every constrained side.
    pub fn admits(&self, connections: Connections) -> bool {
        Direction::VARIANTS.iter()
            .all(|dir| self.side(*dir).map_or(true, |needed| needed == connections.has(*dir)))
    }
}

/// Ask every neighbour of `location` whether it has a stub pointing back at it.
pub fn required_connections<C: Connects>(grid: &Array2<C>, location: Location) -> Requirements {
    let ask = |direction: Direction| {
        grid.get(direction.attempt_from(location).as_index())
            .and_then(Connects::connections)
            .map(|neighbor| neighbor.has(direction.invert()))
    };

    Requirements {
        top: ask(Direction::Up),
        right: ask(Direction::Right),
        bottom: ask(Direction::Down),
        left: ask(Direction::Left),
    }
}

/// Every tile fitting `requirements`, in catalog order.
pub fn compatible_symbols(requirements: Requirements) -> Vec<Symbol> {
    Symbol::VARIANTS.iter()
        .filter(|symbol| requirements.admits(symbol.connections()))
        .copied()
        .collect()
}
