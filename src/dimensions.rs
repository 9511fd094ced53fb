use std::cmp;
use std::error::Error;
use std::fmt;

use rand::Rng;
use rand_xorshift::XorShiftRng;

use crate::cells::CellCoordinate;
use crate::units::{ColumnIndex, ColumnsCount, EdgesCount, NodesCount, RowIndex, RowsCount};

/// Validated dimensions of a maze grid. Empty grids are rejected at
/// construction, so every `GridSize` the rest of the crate sees holds at
/// least one cell.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GridSize {
    rows: RowsCount,
    columns: ColumnsCount,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridSizeError {
    ZeroRows,
    ZeroColumns,
}

impl fmt::Display for GridSizeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            GridSizeError::ZeroRows => write!(f, "a maze grid needs at least one row"),
            GridSizeError::ZeroColumns => write!(f, "a maze grid needs at least one column"),
        }
    }
}

impl Error for GridSizeError {}

impl GridSize {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Result<GridSize, GridSizeError> {
        if rows.0 == 0 {
            Err(GridSizeError::ZeroRows)
        } else if columns.0 == 0 {
            Err(GridSizeError::ZeroColumns)
        } else {
            Ok(GridSize { rows, columns })
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline(always)]
    pub fn cells_count(&self) -> NodesCount {
        NodesCount(self.rows.0 * self.columns.0)
    }

    /// Shape of the matrix of openings between side-by-side cells: one entry
    /// per east-west cell pair, so `rows x (columns - 1)`. Zero wide for a
    /// single column grid.
    #[inline]
    pub fn vertical_openings_shape(&self) -> (RowsCount, ColumnsCount) {
        (self.rows, ColumnsCount(self.columns.0 - 1))
    }

    /// Shape of the matrix of openings between stacked cells: one entry per
    /// north-south cell pair, so `(rows - 1) x columns`. Zero high for a
    /// single row grid.
    #[inline]
    pub fn horizontal_openings_shape(&self) -> (RowsCount, ColumnsCount) {
        (RowsCount(self.rows.0 - 1), self.columns)
    }

    /// Is the coordinate within this grid's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: CellCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// 0..cells_count. Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn coordinate_to_index(&self, coord: CellCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    pub fn random_cell(&self, rng: &mut XorShiftRng) -> CellCoordinate {
        let index = rng.gen::<usize>() % self.cells_count().0;
        CellCoordinate::from_row_major_index(index, self.columns)
    }

    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.cells_count();
        let edges_count_hint = 4 * cells_count.0 - 4 * cmp::max(self.rows.0, self.columns.0);
        (cells_count, EdgesCount(edges_count_hint))
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: self.cells_count().0,
            columns: self.columns,
        }
    }

    pub fn iter_row(&self) -> RowIter {
        RowIter {
            current_row: 0,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    columns: ColumnsCount,
}

impl Iterator for CellIter {
    type Item = CellCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = CellCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
pub struct RowIter {
    current_row: usize,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl Iterator for RowIter {
    type Item = Vec<CellCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let RowsCount(rows_count) = self.rows;
        if self.current_row < rows_count {
            let ColumnsCount(row_length) = self.columns;
            let coords = (0..row_length)
                .map(|i| {
                    CellCoordinate::from_row_column_indices(RowIndex(self.current_row),
                                                            ColumnIndex(i))
                })
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let RowsCount(rows_count) = self.rows;
        let lower_bound = rows_count - self.current_row;
        let upper_bound = lower_bound;
        (lower_bound, Some(upper_bound))
    }
}
impl ExactSizeIterator for RowIter {} // default impl using size_hint()

#[cfg(test)]
mod tests {

    use rand::SeedableRng;
    use rand_xorshift::XorShiftRng;

    use super::*;

    fn size(rows: usize, columns: usize) -> GridSize {
        GridSize::new(RowsCount(rows), ColumnsCount(columns)).expect("valid grid dimensions")
    }

    #[test]
    fn empty_grids_are_rejected() {
        assert_eq!(GridSize::new(RowsCount(0), ColumnsCount(4)),
                   Err(GridSizeError::ZeroRows));
        assert_eq!(GridSize::new(RowsCount(4), ColumnsCount(0)),
                   Err(GridSizeError::ZeroColumns));
        assert_eq!(GridSize::new(RowsCount(0), ColumnsCount(0)),
                   Err(GridSizeError::ZeroRows));
    }

    #[test]
    fn cell_count() {
        assert_eq!(size(3, 4).cells_count(), NodesCount(12));
        assert_eq!(size(1, 1).cells_count(), NodesCount(1));
    }

    #[test]
    fn opening_matrix_shapes() {
        let s = size(4, 7);
        assert_eq!(s.vertical_openings_shape(), (RowsCount(4), ColumnsCount(6)));
        assert_eq!(s.horizontal_openings_shape(), (RowsCount(3), ColumnsCount(7)));
    }

    #[test]
    fn single_cell_opening_matrices_are_empty() {
        let s = size(1, 1);
        assert_eq!(s.vertical_openings_shape(), (RowsCount(1), ColumnsCount(0)));
        assert_eq!(s.horizontal_openings_shape(), (RowsCount(0), ColumnsCount(1)));
    }

    #[test]
    fn coordinate_as_index() {
        let s = size(3, 3);
        let cc = |row, column| CellCoordinate::new(row, column);
        let coords = &[cc(0, 0), cc(0, 1), cc(0, 2), cc(1, 0), cc(1, 1), cc(1, 2), cc(2, 0),
                       cc(2, 1), cc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| s.coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(s.coordinate_to_index(cc(3, 2)), None);
        assert_eq!(s.coordinate_to_index(cc(2, 3)), None);
        assert_eq!(s.coordinate_to_index(cc(u32::MAX, u32::MAX)), None);
    }

    #[test]
    fn random_cell_is_always_in_the_grid() {
        let s = size(4, 4);
        let mut rng = XorShiftRng::seed_from_u64(177);
        for _ in 0..1000 {
            let coord = s.random_cell(&mut rng);
            assert!(s.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let s = size(2, 2);
        assert_eq!(s.iter().collect::<Vec<CellCoordinate>>(),
                   &[CellCoordinate::new(0, 0),
                     CellCoordinate::new(0, 1),
                     CellCoordinate::new(1, 0),
                     CellCoordinate::new(1, 1)]);
        assert_eq!(s.iter().len(), 4);
    }

    #[test]
    fn row_iter() {
        let s = size(2, 2);
        assert_eq!(s.iter_row().collect::<Vec<Vec<CellCoordinate>>>(),
                   &[&[CellCoordinate::new(0, 0), CellCoordinate::new(0, 1)],
                     &[CellCoordinate::new(1, 0), CellCoordinate::new(1, 1)]]);
    }
}
