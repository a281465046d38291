//! Cell and grid storage for the two concentration fields.
//!
//! Grids are square and toroidal: neighbor lookups wrap at every edge, so the
//! diffusion stencil never special-cases boundaries. Data is stored as a flat
//! row-major array with indexing `y * size + x`.

use serde::{Deserialize, Serialize};

/// One grid cell: concentrations of the two species.
///
/// Both values live in [0, 1] for sensible parameters, but nothing clamps
/// them; extreme rate combinations can push them outside that range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    pub a: f64,
    pub b: f64,
}

impl Cell {
    /// Background state: full substrate, no catalyst.
    pub const SUBSTRATE: Cell = Cell { a: 1.0, b: 0.0 };
    /// Seeded state: full catalyst, no substrate.
    pub const SEEDED: Cell = Cell { a: 0.0, b: 1.0 };
}

/// Square toroidal grid of cells.
///
/// Dimensions are fixed at construction; resuming a run onto a grid of a
/// different size is rejected by the driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell set to `fill`.
    pub fn filled(size: usize, fill: Cell) -> Self {
        Self {
            size,
            cells: vec![fill; size * size],
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Convert (x, y) coordinates to flat index.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = cell;
    }

    /// Flat view of all cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The 3x3 toroidal neighborhood of (x, y) in row-major order
    /// (top-left .. bottom-right), center cell at index 4. The order matches
    /// the layout of [`crate::compute::LAPLACIAN`].
    pub fn neighborhood(&self, x: usize, y: usize) -> [Cell; 9] {
        let n = self.size;
        let x_prev = (x + n - 1) % n;
        let x_next = (x + 1) % n;
        let y_prev = (y + n - 1) % n;
        let y_next = (y + 1) % n;

        let row_prev = y_prev * n;
        let row_curr = y * n;
        let row_next = y_next * n;

        [
            self.cells[row_prev + x_prev],
            self.cells[row_prev + x],
            self.cells[row_prev + x_next],
            self.cells[row_curr + x_prev],
            self.cells[row_curr + x],
            self.cells[row_curr + x_next],
            self.cells[row_next + x_prev],
            self.cells[row_next + x],
            self.cells[row_next + x_next],
        ]
    }

    /// Fraction of cells currently in the seeded state.
    pub fn seeded_fraction(&self) -> f64 {
        let seeded = self.cells.iter().filter(|c| **c == Cell::SEEDED).count();
        seeded as f64 / self.cells.len() as f64
    }
}
