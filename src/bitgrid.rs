use bit_set::BitSet;

use crate::units::{ColumnsCount, RowsCount};

/// A 2-D bit matrix addressed by (row, column), row zero at the top.
/// Zero-width and zero-height matrices are allowed and hold no bits.
#[derive(Debug, Clone)]
pub struct BitGrid {
    bits: BitSet,
    rows: usize,
    columns: usize,
}

impl BitGrid {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> BitGrid {
        let (RowsCount(rows), ColumnsCount(columns)) = (rows, columns);
        BitGrid {
            bits: BitSet::with_capacity(rows * columns),
            rows,
            columns,
        }
    }

    #[inline(always)]
    pub fn rows(&self) -> RowsCount {
        RowsCount(self.rows)
    }

    #[inline(always)]
    pub fn columns(&self) -> ColumnsCount {
        ColumnsCount(self.columns)
    }

    /// Is the bit at (row, column) set? Out of bounds reads as unset.
    #[inline]
    pub fn is_set(&self, row: usize, column: usize) -> bool {
        if row < self.rows && column < self.columns {
            self.bits.contains(row * self.columns + column)
        } else {
            false
        }
    }

    /// Set the bit at (row, column).
    ///
    /// Panics if the position is outside the matrix.
    pub fn set(&mut self, row: usize, column: usize) {
        assert!(row < self.rows && column < self.columns,
                "bit position ({}, {}) outside {}x{} matrix",
                row,
                column,
                self.rows,
                self.columns);
        self.bits.insert(row * self.columns + column);
    }

    /// The number of set bits in the matrix.
    #[inline]
    pub fn count_set(&self) -> usize {
        self.bits.len()
    }

    /// Is every bit in the matrix set? Vacuously true for a matrix with no
    /// bits.
    pub fn all_set(&self) -> bool {
        self.bits.len() == self.rows * self.columns
    }
}

impl PartialEq for BitGrid {
    fn eq(&self, other: &BitGrid) -> bool {
        // Compare the set bit indices themselves; the backing sets may have
        // grown to different capacities.
        self.rows == other.rows && self.columns == other.columns &&
        self.bits.iter().eq(other.bits.iter())
    }
}
impl Eq for BitGrid {}
