use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::{Cell, CellGrid, GRID_SIZE};
use crate::location::{Location, Point};
use crate::locator::PuzzleKind;
use crate::screenshot::Screenshot;
use crate::solver::Rules;

const SAMPLES: u32 = 1000;

/// Upper bounds of mean sampled intensity for 0, 1 and 2 triangles; anything brighter shows 3.
const TRIANGLE_BREAKPOINTS: [u32; 3] = [23, 63, 91];

/// Each cell shows up to three triangles, and the path must run along exactly that many of its sides.
/// Cells without triangles are unconstrained.
///
/// A move is rejected as soon as it would touch a cell one time too many, which is what keeps the search fast.
pub struct TriangleRules {
    rng: StdRng,
    touches: Array2<u8>,
}

impl Default for TriangleRules {
    fn default() -> Self {
        Self::with_seed(None)
    }
}

impl TriangleRules {
    /// Rules sampling with a random source seeded by the operating system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rules sampling with a reproducible random source when `seed` is given.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self {
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
            touches: Array2::zeros((GRID_SIZE, GRID_SIZE)),
        }
    }

    /// How many sides of the cell at `location` the path currently runs along.
    pub fn touches(&self, location: Location) -> u8 {
        self.touches.get(location.as_index()).copied().unwrap_or_default()
    }

    /// The cells on either side of the segment between adjacent vertices `from` and `to`, where they exist.
    ///
    /// These are the cell whose bottom right corner is the segment's larger end and the cell whose top left corner is its smaller end.
    fn bordered_cells(from: Location, to: Location) -> Vec<Location> {
        let high = Location(from.0.max(to.0), from.1.max(to.1));
        let low = Location(from.0.min(to.0), from.1.min(to.1));

        let before = high.0.checked_sub(1).zip(high.1.checked_sub(1)).map(|(x, y)| Location(x, y));
        [before, Some(low)].into_iter()
            .flatten()
            .filter(|cell| cell.within((GRID_SIZE, GRID_SIZE)))
            .collect()
    }

    fn sample_offset(&mut self, center: i32, max_delta: i32) -> i32 {
        center - max_delta + self.rng.random_range(0..=2 * max_delta)
    }
}

impl Rules for TriangleRules {
    type Token = Vec<Location>;
    const KIND: PuzzleKind = PuzzleKind::Triangle;

    /// Average the intensity of random samples across the middle band of the cell, where triangles are drawn, and bucket it.
    fn classify(&mut self, screenshot: &Screenshot, center: Point, cell_size: i32) -> u8 {
        let max_dx = (cell_size / 2).max(0);
        let max_dy = max_dx / 3;

        let mut intensity = 0;
        for _ in 0..SAMPLES {
            let sample = Point::new(self.sample_offset(center.x, max_dx), self.sample_offset(center.y, max_dy));
            intensity += u32::from(screenshot.intensity_at(sample));
        }
        intensity /= SAMPLES;

        TRIANGLE_BREAKPOINTS.iter()
            .position(|breakpoint| intensity < *breakpoint)
            .unwrap_or(TRIANGLE_BREAKPOINTS.len()) as u8
    }

    fn accept(&mut self, grid: &CellGrid, from: Location, to: Location) -> Option<Self::Token> {
        let cells = Self::bordered_cells(from, to);

        // any cell already touched as often as it allows would be overdrawn by this move
        if cells.iter().any(|location| {
            let required = grid[*location].value;
            required > 0 && self.touches(*location) == required
        }) {
            return None;
        }

        for location in &cells {
            self.touches[location.as_index()] += 1;
        }
        Some(cells)
    }

    fn rollback(&mut self, cells: Self::Token) {
        for location in cells {
            self.touches[location.as_index()] -= 1;
        }
    }

    fn validate_cell(&self, _: &CellGrid, cell: &Cell) -> bool {
        cell.value == 0 || self.touches(cell.location) == cell.value
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use itertools::Itertools;

    use crate::board::Puzzle;
    use crate::cell::CellGrid;
    use crate::location::{Location, Point};
    use crate::screenshot::Screenshot;
    use crate::solver::Rules;
    use crate::triangle::TriangleRules;

    #[test]
    fn bordered_cells_of_inner_moves() {
        // vertical move: the cells to its left and right
        assert_eq!(TriangleRules::bordered_cells(Location(1, 0), Location(1, 1)), vec![Location(0, 0), Location(1, 0)]);
        // horizontal move: the cells above and below
        assert_eq!(TriangleRules::bordered_cells(Location(1, 1), Location(0, 1)), vec![Location(0, 0), Location(0, 1)]);
    }

    #[test]
    fn bordered_cells_of_edge_moves() {
        assert_eq!(TriangleRules::bordered_cells(Location(0, 4), Location(0, 3)), vec![Location(0, 3)]);
        assert_eq!(TriangleRules::bordered_cells(Location(0, 0), Location(1, 0)), vec![Location(0, 0)]);
        assert_eq!(TriangleRules::bordered_cells(Location(4, 1), Location(4, 0)), vec![Location(3, 0)]);
        assert_eq!(TriangleRules::bordered_cells(Location(3, 4), Location(4, 4)), vec![Location(3, 3)]);
    }

    #[test]
    fn move_past_a_satisfied_cell_is_rejected() {
        let grid = CellGrid::from_values([[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut rules = TriangleRules::with_seed(Some(0));

        let token = rules.accept(&grid, Location(0, 1), Location(1, 1)).unwrap();
        assert_eq!(rules.touches(Location(0, 0)), 1);
        assert_eq!(rules.touches(Location(0, 1)), 1);

        // (0, 0) already has its one side
        assert!(rules.accept(&grid, Location(1, 1), Location(1, 0)).is_none());
        assert_eq!(rules.touches(Location(1, 0)), 0);

        rules.rollback(token);
        assert_eq!(rules.touches(Location(0, 0)), 0);
        assert!(rules.accept(&grid, Location(1, 1), Location(1, 0)).is_some());
    }

    #[test]
    fn validation_needs_exact_counts() {
        let grid = CellGrid::from_values([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let mut rules = TriangleRules::with_seed(Some(0));
        let cell = grid[Location(0, 0)];

        let first = rules.accept(&grid, Location(0, 1), Location(0, 0)).unwrap();
        assert!(!rules.validate_cell(&grid, &cell));
        rules.accept(&grid, Location(0, 0), Location(1, 0)).unwrap();
        assert!(rules.validate_cell(&grid, &cell));
        // unconstrained cells never object
        assert!(rules.validate_cell(&grid, &grid[Location(0, 1)]));
        rules.rollback(first);
        assert!(!rules.validate_cell(&grid, &cell));
    }

    #[test]
    fn classifies_by_mean_intensity_in_the_middle_band() {
        // bright everywhere but a dark horizontal band through the center
        let band = |y: u32| if (44..=56).contains(&y) { 0 } else { 255 };
        let screenshot = Screenshot::from(RgbImage::from_fn(100, 100, |_, y| {
            let v = band(y);
            Rgb([v, v, v])
        }));
        let mut rules = TriangleRules::with_seed(Some(7));
        // dy = 40 / 2 / 3 = 6, so samples stay within rows 44..=56
        assert_eq!(rules.classify(&screenshot, Point::new(50, 50), 40), 0);

        for (level, expected) in [(0, 0), (22, 0), (23, 1), (62, 1), (63, 2), (90, 2), (91, 3), (255, 3)] {
            let screenshot = Screenshot::from(RgbImage::from_pixel(20, 20, Rgb([level, level, level])));
            assert_eq!(rules.classify(&screenshot, Point::new(10, 10), 12), expected, "intensity {}", level);
        }
    }

    #[test]
    fn solves_corner_triangles() {
        // three sides of the top right cell, and one side of the bottom left
        let mut puzzle = Puzzle::from_values([
            [0, 0, 0, 3],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
            [1, 0, 0, 0],
        ], TriangleRules::with_seed(Some(0)));
        let solution = puzzle.solve().unwrap();

        let mut rules = TriangleRules::with_seed(Some(0));
        for (from, to) in solution.locations().tuple_windows() {
            rules.accept(puzzle.grid(), from, to).unwrap();
        }
        assert_eq!(rules.touches(Location(3, 0)), 3);
        assert_eq!(rules.touches(Location(0, 3)), 1);
        assert_eq!(puzzle.rules().touches(Location(3, 0)), 0);
    }

    #[test]
    fn crowded_center_has_no_solution() {
        // each center cell needs a side through vertex (2, 2), which the path can enter and leave only once
        let mut puzzle = Puzzle::from_values([
            [0, 0, 0, 0],
            [0, 3, 3, 0],
            [0, 3, 3, 0],
            [0, 0, 0, 0],
        ], TriangleRules::with_seed(Some(0)));
        assert!(puzzle.solve().is_none());
        assert!(puzzle.cells().all(|cell| puzzle.rules().touches(cell.location) == 0));
    }
}
