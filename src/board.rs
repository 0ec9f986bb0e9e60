use std::fmt::{Display, Formatter};

use ndarray::Array2;

use crate::cell::{Cell, CellGrid, Vertex, GRID_SIZE};
use crate::location::{Location, Point, Rect};
use crate::screenshot::Screenshot;
use crate::solver::Rules;

/// Where a path starts: the bottom left vertex.
pub const ORIGIN: Location = Location(0, GRID_SIZE);
/// Where a path must end: the top right vertex.
pub const TARGET: Location = Location(GRID_SIZE, 0);

/// A recognised puzzle under the rules `R`, ready to [`solve`](Puzzle::solve).
///
/// The grid is laid out over the bounding box found by the [`PuzzleLocator`](crate::PuzzleLocator):
/// [`GRID_SIZE`] cells per side, with gaps (the pathways) before, between and after them.
pub struct Puzzle<R: Rules> {
    pub(crate) bounding_box: Rect,
    pub(crate) cell_size: i32,
    pub(crate) grid: CellGrid,
    pub(crate) vertices: Array2<Vertex>,
    pub(crate) rules: R,
    // vertices on the current path, and the rules' record of each move onto them
    pub(crate) path: Vec<Location>,
    pub(crate) moves: Vec<R::Token>,
}

impl<R: Rules> Puzzle<R> {
    /// Lay a grid over `bounding_box` and classify each cell by sampling `screenshot` with `rules`.
    pub fn new(screenshot: &Screenshot, bounding_box: Rect, mut rules: R) -> Self {
        let cell_size = bounding_box.width / GRID_SIZE as i32;
        let gap_size = (bounding_box.width - GRID_SIZE as i32 * cell_size) / (GRID_SIZE as i32 + 1);

        let columns = cell_midpoints(bounding_box.left, cell_size, gap_size);
        let rows = cell_midpoints(bounding_box.top, cell_size, gap_size);
        let cells = Array2::from_shape_fn((GRID_SIZE, GRID_SIZE), |index| {
            let location = Location::from(index);
            let center = Point::new(columns[location.0], rows[location.1]);
            Cell { location, center, value: rules.classify(screenshot, center, cell_size) }
        });

        let vertices = Array2::from_shape_fn((GRID_SIZE + 1, GRID_SIZE + 1), |index| {
            let location = Location::from(index);
            let pitch = cell_size + gap_size;
            Vertex {
                location,
                position: Point::new(
                    bounding_box.left + gap_size / 2 + location.0 as i32 * pitch,
                    bounding_box.top + gap_size / 2 + location.1 as i32 * pitch,
                ),
            }
        });

        log::debug!("{} puzzle at {:?}, cell size {}, gap {}", R::KIND, bounding_box, cell_size, gap_size);

        Self::with_grid(bounding_box, cell_size, CellGrid::new(cells), vertices, rules)
    }

    pub(crate) fn with_grid(bounding_box: Rect, cell_size: i32, grid: CellGrid, vertices: Array2<Vertex>, rules: R) -> Self {
        Self {
            bounding_box,
            cell_size,
            grid,
            vertices,
            rules,
            path: Vec::with_capacity((GRID_SIZE + 1) * (GRID_SIZE + 1)),
            moves: Vec::with_capacity((GRID_SIZE + 1) * (GRID_SIZE + 1)),
        }
    }

    /// A puzzle with the given cell values and no pixel geometry, laid out `values[y][x]`.
    #[cfg(test)]
    pub(crate) fn from_values(values: [[u8; GRID_SIZE]; GRID_SIZE], rules: R) -> Self {
        let vertices = Array2::from_shape_fn((GRID_SIZE + 1, GRID_SIZE + 1), |index| Vertex {
            location: Location::from(index),
            position: Point::default(),
        });
        Self::with_grid(Rect::default(), 0, CellGrid::from_values(values), vertices, rules)
    }

    /// The region of the screenshot the grid was laid over.
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Side length of a cell, in pixels.
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// The classified cells.
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// All cells, row by row from the top.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter()
    }

    /// The vertex at `location`, if it is on the grid.
    pub fn vertex(&self, location: Location) -> Option<&Vertex> {
        self.vertices.get(location.as_index())
    }

    /// The rules and whatever state they currently hold.
    pub fn rules(&self) -> &R {
        &self.rules
    }
}

/// Pixel coordinates of each cell's center along one axis starting at `start`.
fn cell_midpoints(start: i32, cell_size: i32, gap_size: i32) -> [i32; GRID_SIZE] {
    let mut midpoint = start + gap_size + cell_size / 2;
    let mut coords = [0; GRID_SIZE];
    for coord in coords.iter_mut() {
        *coord = midpoint;
        midpoint += gap_size + cell_size;
    }
    coords
}

/// One line per row of cell values, each framed and separated by `:`.
impl<R: Rules> Display for Puzzle<R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.grid.iter().collect::<Vec<_>>().chunks(GRID_SIZE) {
            write!(f, ":")?;
            for cell in row {
                write!(f, "{}:", cell.value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
