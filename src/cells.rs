use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

/// A cell position in the maze grid. Row zero is the top row and column zero
/// the west-most column, matching the way the text display draws the grid.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub row: u32,
    pub column: u32,
}

pub type CoordinateSmallVec = SmallVec<[CellCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[Direction; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

/// The candidate moves out of a cell, in the order the carving algorithm
/// builds them before shuffling.
pub const DIRECTIONS: [Direction; 4] =
    [Direction::North, Direction::East, Direction::South, Direction::West];

impl CellCoordinate {
    pub fn new(row: u32, column: u32) -> CellCoordinate {
        CellCoordinate { row, column }
    }

    /// Creates a new `CellCoordinate` offset 1 cell away in the given direction.
    /// Returns None when the offset is not representable (north of row zero,
    /// west of column zero). The south and east bounds are the grid's to check.
    pub fn offset(&self, dir: Direction) -> Option<CellCoordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            Direction::North => {
                if row > 0 {
                    Some(CellCoordinate { row: row - 1, column })
                } else {
                    None
                }
            }
            Direction::South => Some(CellCoordinate { row: row + 1, column }),
            Direction::East => Some(CellCoordinate { row, column: column + 1 }),
            Direction::West => {
                if column > 0 {
                    Some(CellCoordinate { row, column: column - 1 })
                } else {
                    None
                }
            }
        }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> CellCoordinate {
        let ColumnsCount(width) = columns;
        let row = index / width;
        let column = index % width;

        CellCoordinate::new(row as u32, column as u32)
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> CellCoordinate {
        let (RowIndex(row), ColumnIndex(column)) = (row_index, col_index);
        CellCoordinate::new(row as u32, column as u32)
    }
}

impl From<(u32, u32)> for CellCoordinate {
    fn from(row_column_pair: (u32, u32)) -> CellCoordinate {
        CellCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}
