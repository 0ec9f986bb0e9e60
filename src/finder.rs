use ndarray::Array2;

use crate::location::{Coord, Location};
use crate::region::{ConnectedPoint, Region};
use crate::screenshot::Screenshot;
use crate::shape::SquareStep;

/// The largest intensity step between a pixel and the neighbor that discovered it for both to share a region.
const INTENSITY_TOLERANCE: u8 = 1;

/// Lazily partitions a [`Screenshot`] into 4-connected [`Region`]s of similar intensity.
///
/// Seeds are taken column by column, top to bottom within a column, from the first pixel no earlier region claimed.
/// Similarity is judged between neighbors rather than against the seed, so a region follows smooth gradients but stops at sharp edges.
/// Every pixel ends up in exactly one region.
pub struct RegionFinder<'a> {
    screenshot: &'a Screenshot,
    dims: (Coord, Coord),
    visited: Array2<bool>,
    cursor: Location,
}

impl<'a> RegionFinder<'a> {
    /// Prepare to scan `screenshot`.
    pub fn new(screenshot: &'a Screenshot) -> Self {
        let dims = screenshot.dims();
        Self {
            screenshot,
            dims,
            visited: Array2::from_elem((dims.1, dims.0), false),
            cursor: Location::default(),
        }
    }

    /// Advance the cursor to the next unvisited pixel, if any remain.
    fn seek_seed(&mut self) -> Option<Location> {
        while self.cursor.0 < self.dims.0 {
            while self.cursor.1 < self.dims.1 {
                if !self.visited[self.cursor.as_index()] {
                    return Some(self.cursor);
                }
                self.cursor.1 += 1;
            }
            self.cursor = Location(self.cursor.0 + 1, 0);
        }
        None
    }

    fn grow(&mut self, seed: Location) -> Region {
        let mut region = Region::default();
        let mut stack = vec![ConnectedPoint::seed(seed, self.screenshot.intensity(seed))];

        while let Some(point) = stack.pop() {
            // a pixel may be queued by several neighbors; the first to validate claims it
            if self.visited[point.location.as_index()] || !point.is_continuous(INTENSITY_TOLERANCE) {
                continue;
            }
            self.visited[point.location.as_index()] = true;
            region.add(&point);

            for neighbor in SquareStep::neighbors_within(point.location, self.dims) {
                if self.visited[neighbor.as_index()] {
                    continue;
                }
                stack.push(ConnectedPoint {
                    location: neighbor,
                    intensity: self.screenshot.intensity(neighbor),
                    parent_intensity: point.intensity,
                });
            }
        }

        region
    }
}

impl Iterator for RegionFinder<'_> {
    type Item = Region;

    fn next(&mut self) -> Option<Self::Item> {
        let seed = self.seek_seed()?;
        Some(self.grow(seed))
    }
}
