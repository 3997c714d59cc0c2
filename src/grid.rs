//! # grid
//!
//! The Game of Life field, laid out the way the HT1632C matrix wants it: one
//! byte per column, bit `y` of column `x` set when cell (x, y) is alive.
//!
//!   x:  0 1 2 ... 31
//!   y=0 . # . ...  .     columns[1] == 0b0000_0001
//!   y=1 . . . ...  .
//!   ..
//!   y=7 . . . ...  .
//!
//! The field is a torus: every lookup wraps both axes first, so there is no
//! edge and no out-of-bounds access.

/// number of columns on the matrix
pub const WIDTH: usize = 32;
/// number of rows; one bit per row, so a column fits in a byte
pub const HEIGHT: usize = 8;
/// how many cells there are in total
pub const CELL_COUNT: usize = WIDTH * HEIGHT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: [u8; WIDTH],
}

impl Default for Grid {
    fn default() -> Self {
        Grid::empty()
    }
}

impl Grid {
    /// all cells dead
    pub const fn empty() -> Self {
        Grid {
            columns: [0; WIDTH],
        }
    }

    /// build a grid from raw column masks
    pub const fn from_columns(columns: [u8; WIDTH]) -> Self {
        Grid { columns }
    }

    /// build a grid from a list of live cells; coordinates wrap
    pub fn from_cells(cells: &[(i8, i8)]) -> Self {
        let mut g = Grid::empty();
        for &(x, y) in cells {
            g.set(x, y, true);
        }
        g
    }

    /// raw column masks, in the order they're pushed to the matrix
    pub fn columns(&self) -> &[u8; WIDTH] {
        &self.columns
    }

    pub fn column(&self, x: usize) -> u8 {
        self.columns[x % WIDTH]
    }

    pub fn set_column(&mut self, x: usize, mask: u8) {
        self.columns[x % WIDTH] = mask;
    }

    /// is the cell at (x, y) alive? coordinates wrap, so (-1, -1) is the
    /// bottom-right corner
    pub fn alive(&self, x: i8, y: i8) -> bool {
        let (x, y) = wrap(x, y);
        self.columns[x] & (1 << y) != 0
    }

    pub fn set(&mut self, x: i8, y: i8, alive: bool) {
        let (x, y) = wrap(x, y);
        if alive {
            self.columns[x] |= 1 << y;
        } else {
            self.columns[x] &= !(1 << y);
        }
    }

    /// number of live cells
    pub fn population(&self) -> u16 {
        self.columns.iter().map(|c| c.count_ones() as u16).sum()
    }

    /// number of cells whose state differs between the two grids
    pub fn difference(&self, other: &Grid) -> u16 {
        self.columns
            .iter()
            .zip(other.columns.iter())
            .map(|(a, b)| (a ^ b).count_ones() as u16)
            .sum()
    }

    /// overwrite this grid with another in one go
    pub fn commit(&mut self, next: &Grid) {
        self.columns = next.columns;
    }

    /// same pattern moved by (dx, dy) around the torus
    pub fn shifted(&self, dx: i8, dy: i8) -> Grid {
        let mut out = Grid::empty();
        for x in 0..WIDTH as i8 {
            for y in 0..HEIGHT as i8 {
                if self.alive(x, y) {
                    out.set(x + dx, y + dy, true);
                }
            }
        }
        out
    }
}

/// fold a signed coordinate pair onto the torus
fn wrap(x: i8, y: i8) -> (usize, usize) {
    (
        x.rem_euclid(WIDTH as i8) as usize,
        y.rem_euclid(HEIGHT as i8) as usize,
    )
}
