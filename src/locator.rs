use std::fmt::{Display, Formatter};

use crate::board::Puzzle;
use crate::cell::{Cell, CellGrid};
use crate::color::ColorRules;
use crate::finder::RegionFinder;
use crate::location::Rect;
use crate::region::Region;
use crate::screenshot::Screenshot;
use crate::solver::{Rules, Solution};
use crate::triangle::TriangleRules;

const MIN_INTENSITY: u8 = 30;
const MIN_POINTS: usize = 100;
const MIN_SPAN: usize = 150;
const COVERAGE: (f64, f64) = (0.35, 0.5);
const ASPECT: (f64, f64) = (0.8, 1.25);
/// Puzzles drawn darker than this are color puzzles.
const TRIANGLE_MIN_INTENSITY: u8 = 60;

/// The kinds of puzzle the locator can tell apart.
#[derive(Clone, Copy, Debug, strum::Display, Eq, Hash, PartialEq)]
pub enum PuzzleKind {
    /// Colored boxes to be separated by the path.
    Color,
    /// Cells marked with the number of sides the path must run along.
    Triangle,
}

impl PuzzleKind {
    /// The kind of puzzle whose pathways have mean intensity `intensity`.
    pub fn for_intensity(intensity: u8) -> Self {
        if intensity < TRIANGLE_MIN_INTENSITY {
            Self::Color
        } else {
            Self::Triangle
        }
    }
}

fn strictly_within(value: f64, (low, high): (f64, f64)) -> bool {
    low < value && value < high
}

/// Whether `region` looks like the pathways of a puzzle: a large, roughly square lattice, neither too dark nor too solid.
pub fn is_puzzle(region: &Region) -> bool {
    region.intensity() > MIN_INTENSITY
        && region.count() > MIN_POINTS
        && region.width() > MIN_SPAN
        && region.height() > MIN_SPAN
        && strictly_within(region.coverage_ratio(), COVERAGE)
        && strictly_within(region.aspect_ratio(), ASPECT)
        && strictly_within(region.bounding_aspect_ratio(), ASPECT)
}

/// Where a puzzle was found, and what kind it is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Detection {
    /// The extent of the puzzle's pathways.
    pub bounding_box: Rect,
    /// Mean intensity of the pathways.
    pub intensity: u8,
    /// The kind chosen from `intensity`.
    pub kind: PuzzleKind,
}

impl From<&Region> for Detection {
    fn from(region: &Region) -> Self {
        Self {
            bounding_box: region.bounding_box(),
            intensity: region.intensity(),
            kind: PuzzleKind::for_intensity(region.intensity()),
        }
    }
}

/// Finds the first puzzle in a screenshot and builds it under the matching rules.
///
/// Regions are considered in the order [`RegionFinder`] yields them and the first that passes [`is_puzzle`] wins,
/// so a screenshot holding two puzzles reports whichever is seeded first in column-major order.
#[derive(Clone, Copy, Debug, Default)]
pub struct PuzzleLocator {
    seed: Option<u64>,
}

impl PuzzleLocator {
    /// A locator whose triangle puzzles sample reproducibly from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Find the first region of `screenshot` which looks like a puzzle, or [`None`] if none does.
    pub fn find(&self, screenshot: &Screenshot) -> Option<Detection> {
        let region = RegionFinder::new(screenshot).find(|region| {
            let accepted = is_puzzle(region);
            if !accepted && region.count() > MIN_POINTS {
                log::trace!(
                    "rejected region of {} points: {}x{}, intensity {}, coverage {:.3}, aspect {:.3}/{:.3}",
                    region.count(),
                    region.width(),
                    region.height(),
                    region.intensity(),
                    region.coverage_ratio(),
                    region.aspect_ratio(),
                    region.bounding_aspect_ratio(),
                );
            }
            accepted
        })?;

        let detection = Detection::from(&region);
        log::debug!("found {} puzzle at {:?} with intensity {}", detection.kind, detection.bounding_box, detection.intensity);
        Some(detection)
    }

    /// Build the puzzle `detection` describes by classifying the cells of `screenshot`.
    pub fn build(&self, screenshot: &Screenshot, detection: &Detection) -> DetectedPuzzle {
        match detection.kind {
            PuzzleKind::Color => DetectedPuzzle::Color(Puzzle::new(screenshot, detection.bounding_box, ColorRules::new())),
            PuzzleKind::Triangle => DetectedPuzzle::Triangle(Puzzle::new(
                screenshot,
                detection.bounding_box,
                TriangleRules::with_seed(self.seed),
            )),
        }
    }

    /// Find and build the first puzzle in `screenshot`, or [`None`] if there is none.
    pub fn locate(&self, screenshot: &Screenshot) -> Option<DetectedPuzzle> {
        self.find(screenshot).map(|detection| self.build(screenshot, &detection))
    }
}

/// A puzzle as found in a screenshot, under whichever rules its appearance called for.
pub enum DetectedPuzzle {
    /// A puzzle of colored boxes.
    Color(Puzzle<ColorRules>),
    /// A puzzle of triangle counts.
    Triangle(Puzzle<TriangleRules>),
}

impl DetectedPuzzle {
    /// Which kind of puzzle this is.
    pub fn kind(&self) -> PuzzleKind {
        match self {
            Self::Color(_) => ColorRules::KIND,
            Self::Triangle(_) => TriangleRules::KIND,
        }
    }

    /// See [`Puzzle::bounding_box`].
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Color(puzzle) => puzzle.bounding_box(),
            Self::Triangle(puzzle) => puzzle.bounding_box(),
        }
    }

    /// See [`Puzzle::grid`].
    pub fn grid(&self) -> &CellGrid {
        match self {
            Self::Color(puzzle) => puzzle.grid(),
            Self::Triangle(puzzle) => puzzle.grid(),
        }
    }

    /// See [`Puzzle::cells`].
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid().iter()
    }

    /// See [`Puzzle::solve`].
    pub fn solve(&mut self) -> Option<Solution> {
        match self {
            Self::Color(puzzle) => puzzle.solve(),
            Self::Triangle(puzzle) => puzzle.solve(),
        }
    }
}

impl Display for DetectedPuzzle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color(puzzle) => Display::fmt(puzzle, f),
            Self::Triangle(puzzle) => Display::fmt(puzzle, f),
        }
    }
}
