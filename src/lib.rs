#![warn(missing_docs)]

//! # `trellis`
//!
//! Finds a 4×4 grid-path puzzle in a screenshot and draws a line through it: a path along the grid from the bottom left
//! corner to the top right which never crosses itself and satisfies every cell.
//! Two kinds of puzzle are understood, told apart by how bright their pathways are:
//! colored boxes which the path must separate ([`ColorRules`]), and triangle counts giving how many sides of each cell the
//! path must run along ([`TriangleRules`]).
//!
//! Begin with a [`Screenshot`], usually via [`Screenshot::decode`] and [`Screenshot::into_center_square`].
//! Hand it to a [`PuzzleLocator`], which yields a [`DetectedPuzzle`] if one is found, then call
//! [`solve()`](DetectedPuzzle::solve) to get the [`Solution`] path in pixel coordinates.
//! Neither a missing puzzle nor an unsolvable one is an error; both are [`None`].
//!
//! # Internals
//! Localization flood fills the grayscale image into regions of smoothly varying brightness ([`RegionFinder`]).
//! The pathways of a puzzle form one such region with a distinctive shape: large, square, and covering a little under
//! half of its bounding box, since the cells inside are cut out of it.
//! The first region with that shape is taken, and its bounding box divided into cells, each classified by the rules for
//! its kind.
//!
//! Solving is a plain depth-first search over the 5×5 vertices, generic over [`Rules`].
//! Rules see every move as it is made and may reject it early, keeping whatever state they need to do so;
//! they are asked to validate each cell only once the path reaches its target.
//! On 4×4 grids this is fast enough that nothing cleverer is needed.

pub use board::{Puzzle, ORIGIN, TARGET};
pub use cell::{Cell, CellGrid, Vertex, GRID_SIZE};
pub use color::ColorRules;
pub use edge::Edge;
pub use error::{Error, Result};
pub use finder::RegionFinder;
pub use location::{Location, Point, Rect};
pub use locator::{is_puzzle, DetectedPuzzle, Detection, PuzzleKind, PuzzleLocator};
pub use region::Region;
pub use screenshot::Screenshot;
pub use solver::{Rules, Solution};
pub use triangle::TriangleRules;

pub(crate) mod board;
mod tests;
pub(crate) mod cell;
pub(crate) mod color;
pub(crate) mod edge;
pub mod error;
pub(crate) mod finder;
pub(crate) mod location;
pub(crate) mod locator;
pub(crate) mod region;
pub(crate) mod screenshot;
pub(crate) mod shape;
pub(crate) mod solver;
pub(crate) mod triangle;
#[cfg(feature = "wasm")]
pub mod wasm;
