/// Represents a cell in the raster using row, col coordinates
/// Cell (0, 0) is the top left cell of the raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn from_row_col(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Index of the cell in a row-major buffer with `cols` columns
    pub const fn index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }

    pub const fn from_index(index: usize, cols: usize) -> Self {
        Cell {
            row: index / cols,
            col: index % cols,
        }
    }
}
