use std::fmt;

use crate::units::{ColumnIndex, RowIndex};

/// State of one tile in the maze grid.
///
/// `PathMarked` exists only in the persistence format (digit `2`) and in
/// rendered output; for connectivity queries it counts as an open passage.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellState {
    Wall,
    Open,
    PathMarked,
}

impl CellState {
    /// The digit this state is written as in the text persistence format.
    pub fn to_digit(self) -> char {
        match self {
            CellState::Open => '0',
            CellState::Wall => '1',
            CellState::PathMarked => '2',
        }
    }

    pub fn from_digit(digit: char) -> Option<CellState> {
        match digit {
            '0' => Some(CellState::Open),
            '1' => Some(CellState::Wall),
            '2' => Some(CellState::PathMarked),
            _ => None,
        }
    }

    /// Does this state qualify for a neighbour query that requires `required`?
    /// Exact match, except that a marked path cell still counts as `Open` -
    /// a reloaded solved maze must stay traversable.
    pub fn satisfies(self, required: CellState) -> bool {
        self == required || (required == CellState::Open && self == CellState::PathMarked)
    }

    pub fn is_passable(self) -> bool {
        self.satisfies(CellState::Open)
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_digit())
    }
}

/// `x` is the column, `y` is the row. Row 0 is the top border of the maze.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    pub fn from_row_column_indices(col_index: ColumnIndex, row_index: RowIndex) -> Self {
        let (ColumnIndex(col), RowIndex(row)) = (col_index, row_index);
        Cartesian2DCoordinate::new(col as u32, row as u32)
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARIES: [CompassPrimary; 4] = [CompassPrimary::North,
                                                    CompassPrimary::South,
                                                    CompassPrimary::East,
                                                    CompassPrimary::West];

/// Creates a new `Cartesian2DCoordinate` offset `stride` cells away in the given direction.
/// Returns None if the coordinate is not representable (underflow past the grid origin).
/// Stride 2 is the wall-skipping generation move, stride 1 the single-step solving move.
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: CompassPrimary,
                         stride: u32)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        CompassPrimary::North => {
            if y >= stride {
                Some(Cartesian2DCoordinate { x, y: y - stride })
            } else {
                None
            }
        }
        CompassPrimary::South => Some(Cartesian2DCoordinate { x, y: y + stride }),
        CompassPrimary::East => Some(Cartesian2DCoordinate { x: x + stride, y }),
        CompassPrimary::West => {
            if x >= stride {
                Some(Cartesian2DCoordinate { x: x - stride, y })
            } else {
                None
            }
        }
    }
}
