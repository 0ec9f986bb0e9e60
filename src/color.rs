use std::collections::HashSet;

use image::Rgb;
use petgraph::visit::{Dfs, EdgeFiltered, EdgeRef};

use crate::cell::{Cell, CellGrid};
use crate::edge::Edge;
use crate::location::{Location, Point};
use crate::locator::PuzzleKind;
use crate::screenshot::Screenshot;
use crate::solver::Rules;

/// Classification of a cell showing only the puzzle background.
pub const BACKGROUND: u8 = 0;

/// Reference colors, indexed by classification value.
const PALETTE: [Rgb<u8>; 5] = [
    // puzzle background
    Rgb([16, 151, 122]),
    // black box
    Rgb([25, 56, 44]),
    // white box
    Rgb([200, 196, 189]),
    // green box
    Rgb([139, 143, 75]),
    // purple box
    Rgb([141, 24, 173]),
];

/// Colored boxes must be separated: once the path is complete, no area it encloses may hold boxes of two different colors.
///
/// Moves are never rejected early; each one lays a wall, and the areas are only checked at the end.
#[derive(Debug, Default)]
pub struct ColorRules {
    walls: HashSet<Edge>,
}

impl ColorRules {
    /// Rules with no walls laid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walls laid by the path so far.
    pub fn walls(&self) -> &HashSet<Edge> {
        &self.walls
    }
}

impl Rules for ColorRules {
    type Token = Edge;
    const KIND: PuzzleKind = PuzzleKind::Color;

    /// The index of the nearest palette color; ties go to the lower index.
    fn classify(&mut self, screenshot: &Screenshot, center: Point, _: i32) -> u8 {
        let sample = screenshot.rgb_at(center);
        let mut nearest = (u32::MAX, BACKGROUND);
        for (index, color) in PALETTE.iter().enumerate() {
            let distance = distance_squared(*color, sample);
            if distance < nearest.0 {
                nearest = (distance, index as u8);
            }
        }
        nearest.1
    }

    fn accept(&mut self, _: &CellGrid, from: Location, to: Location) -> Option<Self::Token> {
        let wall = Edge::new(from, to);
        self.walls.insert(wall);
        Some(wall)
    }

    fn rollback(&mut self, wall: Self::Token) {
        self.walls.remove(&wall);
    }

    /// Flood the area around `cell` without crossing any wall; it may contain at most one box color.
    fn validate_cell(&self, grid: &CellGrid, cell: &Cell) -> bool {
        let open = EdgeFiltered::from_fn(grid.adjacency(), |edge| !self.walls.contains(edge.weight()));
        let mut dfs = Dfs::new(&open, cell.location);

        let mut colors = HashSet::new();
        while let Some(location) = dfs.next(&open) {
            let value = grid[location].value;
            if value != BACKGROUND {
                colors.insert(value);
                if colors.len() > 1 {
                    return false;
                }
            }
        }
        true
    }
}

fn distance_squared(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(x, y)| u32::from(x.abs_diff(*y)).pow(2))
        .sum()
}
