use std::ops::Index;

use ndarray::Array2;
use petgraph::graphmap::UnGraphMap;

use crate::edge::Edge;
use crate::location::{Location, Point};
use crate::shape::SquareStep;

/// Cells along each side of a puzzle. Vertices number one more.
pub const GRID_SIZE: usize = 4;

/// One square of the puzzle and what was recognised in it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cell {
    /// Grid coordinate, `(0, 0)` top left.
    pub location: Location,
    /// Pixel coordinate of the cell's estimated center.
    pub center: Point,
    /// Classification from the puzzle's [`Rules`](crate::Rules); fixed once the puzzle is built.
    pub value: u8,
}

/// A grid line intersection a path may pass through.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Vertex {
    /// Grid coordinate, `(0, 0)` top left.
    pub location: Location,
    /// Pixel coordinate.
    pub position: Point,
}

/// The classified cells of a puzzle, plus which cells border which.
///
/// Adjacent cells are joined in `adjacency` by the [`Edge`] that separates them, so a set of walls can be turned into a connectivity filter.
pub struct CellGrid {
    cells: Array2<Cell>,
    adjacency: UnGraphMap<Location, Edge>,
}

impl CellGrid {
    pub(crate) fn new(cells: Array2<Cell>) -> Self {
        let mut adjacency = UnGraphMap::with_capacity(
            cells.len(),
            // "horizontal" plus "vertical" neighbors
            2 * GRID_SIZE * (GRID_SIZE - 1),
        );

        for cell in cells.iter() {
            adjacency.add_node(cell.location);
        }
        for cell in cells.iter() {
            // add edges down and to the right, if possible
            for step in [SquareStep::Right, SquareStep::Down] {
                let neighbor = step.attempt_from(cell.location);
                if neighbor.within((GRID_SIZE, GRID_SIZE)) {
                    adjacency.add_edge(cell.location, neighbor, Edge::between_cells(cell.location, neighbor));
                }
            }
        }

        Self { cells, adjacency }
    }

    /// A grid of the given values with no pixel geometry, laid out `values[y][x]`.
    #[cfg(test)]
    pub(crate) fn from_values(values: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self::new(Array2::from_shape_fn((GRID_SIZE, GRID_SIZE), |index| Cell {
            location: Location::from(index),
            center: Point::default(),
            value: values[index.0][index.1],
        }))
    }

    /// The cell at `location`, if it is on the grid.
    pub fn get(&self, location: Location) -> Option<&Cell> {
        self.cells.get(location.as_index())
    }

    /// All cells, row by row from the top.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub(crate) fn adjacency(&self) -> &UnGraphMap<Location, Edge> {
        &self.adjacency
    }
}

impl Index<Location> for CellGrid {
    type Output = Cell;

    fn index(&self, location: Location) -> &Self::Output {
        &self.cells[location.as_index()]
    }
}
