//! Maze grid and generation.
//!
//! The grid is square. Row 0 is an always-open corridor; even rows below it
//! are carved into runs with a Sidewinder pass and odd rows stay walls except
//! where a run is linked to its neighbours.

use crossterm::style::Color;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::device::IoDevice;
use crate::error::{GameError, Result};
use crate::position::Position;

const EAST_CHANCE: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Open,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    dim: usize,
    cells: Vec<Cell>,
}

impl MazeGrid {
    /// All walls except the row 0 corridor.
    pub fn new(dim: usize) -> Self {
        let mut grid = Self {
            dim,
            cells: vec![Cell::Wall; dim * dim],
        };
        grid.open_top_row();
        grid
    }

    /// Parses rows of `#` (wall) and `.` (open). The layout must be square
    /// and row 0 must be fully open.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let dim = rows.len();
        if dim == 0 {
            return Err(GameError::InvalidLayout("layout has no rows".into()));
        }
        let mut cells = Vec::with_capacity(dim * dim);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != dim {
                return Err(GameError::InvalidLayout(format!(
                    "row {} has {} cells, expected {}",
                    r, width, dim
                )));
            }
            for ch in row.chars() {
                let cell = match ch {
                    '#' => Cell::Wall,
                    '.' => Cell::Open,
                    other => {
                        return Err(GameError::InvalidLayout(format!(
                            "unknown cell {:?} in row {}",
                            other, r
                        )))
                    }
                };
                if r == 0 && cell == Cell::Wall {
                    return Err(GameError::InvalidLayout("row 0 must be open".into()));
                }
                cells.push(cell);
            }
        }
        Ok(Self { dim, cells })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        let dim = self.dim as i64;
        let (row, col) = (pos.row as i64, pos.col as i64);
        row >= 0 && col >= 0 && row < dim && col < dim
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.index(pos).map(|idx| self.cells[idx])
    }

    pub fn is_position_available(&self, pos: Position) -> bool {
        self.cell(pos) == Some(Cell::Open)
    }

    /// Resets the grid and carves a fresh maze.
    pub fn generate(&mut self, rng: &mut impl Rng) {
        self.cells.fill(Cell::Wall);
        self.open_top_row();

        for row in (2..self.dim as i32).step_by(2) {
            self.carve_row(row, rng);
        }

        log::debug!(
            "generated {}x{} maze with {} open cells",
            self.dim,
            self.dim,
            self.cells.iter().filter(|c| **c == Cell::Open).count()
        );
    }

    /// Opens every wall among the 8 neighbours of `pos`. The centre cell is
    /// left as it is.
    pub fn create_hole(&mut self, pos: Position) {
        if !self.in_bounds(pos) {
            return;
        }
        for d_row in -1..=1 {
            for d_col in -1..=1 {
                if d_row == 0 && d_col == 0 {
                    continue;
                }
                let next = pos.offset(d_row, d_col);
                if self.cell(next) == Some(Cell::Wall) {
                    self.open(next);
                }
            }
        }
    }

    /// Open cells below the exit corridor, in row-major order.
    pub fn free_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for row in 1..self.dim as i32 {
            for col in 0..self.dim as i32 {
                let pos = Position::new(row, col);
                if self.is_position_available(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    pub fn open_columns(&self, row: i32) -> Vec<i32> {
        (0..self.dim as i32)
            .filter(|&col| self.is_position_available(Position::new(row, col)))
            .collect()
    }

    pub fn render<D: IoDevice>(&self, device: &mut D) -> Result<()> {
        for row in 0..self.dim {
            for col in 0..self.dim {
                match self.cells[row * self.dim + col] {
                    Cell::Wall => device.draw_glyph_at(row, col, "██", Color::Blue)?,
                    Cell::Open => device.draw_glyph_at(row, col, "  ", Color::Reset)?,
                }
            }
        }
        Ok(())
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.dim + pos.col as usize)
        } else {
            None
        }
    }

    fn open(&mut self, pos: Position) {
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = Cell::Open;
        }
    }

    fn open_top_row(&mut self) {
        let width = self.dim.min(self.cells.len());
        self.cells[..width].fill(Cell::Open);
    }

    fn carve_row(&mut self, row: i32, rng: &mut impl Rng) {
        let dim = self.dim as i32;
        let mut run: Vec<i32> = Vec::with_capacity(self.dim);
        let mut col = 0;
        while col < dim {
            self.open(Position::new(row, col));
            run.push(col);

            if rng.gen_bool(EAST_CHANCE) && col + 1 < dim {
                self.open(Position::new(row, col + 1));
                col += 1;
                continue;
            }

            if let Some(&k) = run.choose(rng) {
                self.carve_north(row, k);
            }
            run.clear();
            col += 2;
        }
    }

    // Links the run cell (row, col) to the even row above. The cell two rows
    // up may be a separator left by that row's scan; it is opened so the
    // link always lands on reachable ground.
    fn carve_north(&mut self, row: i32, col: i32) {
        self.open(Position::new(row - 1, col));
        let above = Position::new(row - 2, col);
        if self.cell(above) == Some(Cell::Wall) {
            self.open(above);
        }
        if row + 1 < self.dim as i32 {
            self.open(Position::new(row + 1, col));
        }
    }
}
