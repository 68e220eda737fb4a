use std::fmt::{Display, Formatter};

use strum::VariantArray;

use crate::location::Location;

/// One of the four sides of a square cell, and the step to the neighbour on that side.
///
/// Variants are listed clockwise starting from the top, so rotating a pipe stub clockwise by one
/// quarter turn moves it to the next variant.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards higher columns.
    Right,
    /// Towards higher rows.
    Down,
    /// Towards column 0.
    Left,
}

impl Direction {
    /// Step from `location` in the direction specified by `self`.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((0, 1)),
            Self::Down => location.offset_by((1, 0)),
            Self::Left => location.offset_by((0, -1)),
        }
    }

    /// The side facing `self` from across the shared edge.
    pub fn invert(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }
}

/// Which sides of a tile carry a pipe stub.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Connections {
    /// Stub pointing up.
    pub top: bool,
    /// Stub pointing right.
    pub right: bool,
    /// Stub pointing down.
    pub bottom: bool,
    /// Stub pointing left.
    pub left: bool,
}

impl Connections {
    /// Sides listed clockwise from the top.
    pub const fn new(top: bool, right: bool, bottom: bool, left: bool) -> Self {
        Self { top, right, bottom, left }
    }

    /// Whether a stub points towards `direction`.
    pub fn has(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.top,
            Direction::Right => self.right,
            Direction::Down => self.bottom,
            Direction::Left => self.left,
        }
    }

    /// Turn the pattern a quarter clockwise `times` times: top goes to right, right to bottom and so on.
    ///
    /// Only `times % 4` matters.
    pub const fn rotated_clockwise(self, times: usize) -> Self {
        let mut out = self;
        let mut i = 0;
        while i < times % 4 {
            out = Self {
                top: out.left,
                right: out.top,
                bottom: out.right,
                left: out.bottom,
            };
            i += 1;
        }
        out
    }
}

impl Display for Connections {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marks: String = Direction::VARIANTS.iter()
            .map(|dir| if self.has(*dir) {
                match dir {
                    Direction::Up => 'T',
                    Direction::Right => 'R',
                    Direction::Down => 'B',
                    Direction::Left => 'L',
                }
            } else { '.' })
            .collect();
        write!(f, "[{}]", marks)
    }
}
