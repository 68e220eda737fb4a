use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

/// A row or column index.
pub type Coord = usize;
/// Interior board extent along one axis; boards always hold at least one playable cell.
pub type Dimension = NonZero<Coord>;

/// A cell on a [`Board`](crate::Board), in `(row, col)` order.
///
/// Row and column 0 belong to the sentinel border, so the first playable cell is `Location(1, 1)`.
#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
pub struct Location(pub Coord, pub Coord);

impl Location {
    #[inline]
    pub(crate) fn as_index(&self) -> (Ix, Ix) {
        (self.0, self.1)
    }

    /// Shift by `(rows, cols)`. Stepping off the top or left edge wraps to a huge coordinate,
    /// which every grid lookup treats as out of bounds.
    pub fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.0, value.1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
