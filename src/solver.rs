use itertools::Itertools;

use crate::board::{Puzzle, ORIGIN, TARGET};
use crate::cell::{Cell, CellGrid, Vertex, GRID_SIZE};
use crate::location::{Location, Point};
use crate::locator::PuzzleKind;
use crate::screenshot::Screenshot;
use crate::shape::SquareStep;

/// The rules of one kind of puzzle, as consulted by [`Puzzle::solve`].
///
/// Rules may keep state about the path so far. Every move the search makes is offered to [`accept`](Rules::accept) first;
/// the token it returns is handed back to [`rollback`](Rules::rollback) if the search later retreats over that move.
/// Moves are accepted and rolled back in strict LIFO order, so the state always describes exactly the current path.
pub trait Rules {
    /// Whatever `rollback` needs to undo one accepted move.
    type Token;

    /// Which kind of puzzle these rules solve.
    const KIND: PuzzleKind;

    /// Classify the cell whose center is estimated to be at `center`. Called once per cell while the puzzle is built.
    fn classify(&mut self, screenshot: &Screenshot, center: Point, cell_size: i32) -> u8;

    /// Consider extending the path from vertex `from` to its neighbor `to`.
    ///
    /// Returns [`None`] to reject the move outright, leaving state untouched.
    fn accept(&mut self, grid: &CellGrid, from: Location, to: Location) -> Option<Self::Token>;

    /// Undo the move that produced `token`.
    fn rollback(&mut self, token: Self::Token);

    /// Whether `cell` is satisfied by the path as it stands. Only asked once the path has reached [`TARGET`].
    fn validate_cell(&self, grid: &CellGrid, cell: &Cell) -> bool;
}

/// A path from [`ORIGIN`] to [`TARGET`] satisfying every cell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Solution {
    vertices: Vec<Vertex>,
}

impl Solution {
    /// The vertices visited, in order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// The grid coordinates visited, in order.
    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.vertices.iter().map(|vertex| vertex.location)
    }

    /// The pixel coordinates visited, in order, for drawing the path over the screenshot.
    pub fn pixel_path(&self) -> impl Iterator<Item = Point> + '_ {
        self.vertices.iter().map(|vertex| vertex.position)
    }

    /// Number of vertices on the path.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the path is empty; never the case for a path returned by [`Puzzle::solve`].
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<R: Rules> Puzzle<R> {
    /// Search exhaustively for a path from [`ORIGIN`] to [`TARGET`] which visits no vertex twice and satisfies every cell.
    ///
    /// Neighbors are tried right, up, left, down, and the first satisfying path is returned.
    /// Returns [`None`] if no path does; this is an expected outcome for misread puzzles, not an error.
    ///
    /// The search is depth-first with no budget: its cost is bounded only by how well the rules reject moves early.
    /// Rule state is fully rolled back before returning, so solving again gives the same answer.
    pub fn solve(&mut self) -> Option<Solution> {
        self.path.clear();
        self.path.push(ORIGIN);

        let mut explored = 0;
        let found = self.find_path_to_target(ORIGIN, &mut explored);
        let solution = found.then(|| Solution {
            vertices: self.path.iter().map(|location| self.vertices[location.as_index()]).collect_vec(),
        });

        match &solution {
            Some(solution) => log::info!("{} puzzle solved: path of {} vertices after {} steps", R::KIND, solution.len(), explored),
            None => log::info!("{} puzzle has no solution after {} steps", R::KIND, explored),
        }

        while let Some(token) = self.moves.pop() {
            self.rules.rollback(token);
        }
        self.path.clear();

        solution
    }

    fn find_path_to_target(&mut self, from: Location, explored: &mut usize) -> bool {
        *explored += 1;

        if from == TARGET {
            // reaching the target is only a success if every cell agrees
            return self.grid.iter().all(|cell| self.rules.validate_cell(&self.grid, cell));
        }

        let unvisited = SquareStep::neighbors_within(from, (GRID_SIZE + 1, GRID_SIZE + 1))
            .filter(|to| !self.path.contains(to))
            .collect_vec();

        for to in unvisited {
            let Some(token) = self.rules.accept(&self.grid, from, to) else {
                // the rules rejected this move outright
                continue;
            };

            self.moves.push(token);
            self.path.push(to);
            if self.find_path_to_target(to, explored) {
                return true;
            }

            // no valid path through this move; undo it and try the next
            if let Some(token) = self.moves.pop() {
                self.rules.rollback(token);
            }
            self.path.pop();
        }

        false
    }
}
