use std::cell::OnceCell;

use crate::location::{Location, Point, Rect};

/// Regions with this many points or fewer are too sparse to judge; they report [`SPARSE_INTENSITY`].
const MIN_JUDGED_POINTS: usize = 10;
/// Treated as maximal brightness so sparse regions never pass a darkness threshold.
pub(crate) const SPARSE_INTENSITY: u8 = u8::MAX;

/// A pixel discovered during flood fill, remembering the intensity of the pixel that discovered it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ConnectedPoint {
    pub(crate) location: Location,
    pub(crate) intensity: u8,
    pub(crate) parent_intensity: u8,
}

impl ConnectedPoint {
    /// A seed pixel is its own parent.
    pub(crate) fn seed(location: Location, intensity: u8) -> Self {
        Self { location, intensity, parent_intensity: intensity }
    }

    pub(crate) fn is_continuous(&self, tolerance: u8) -> bool {
        self.intensity.abs_diff(self.parent_intensity) <= tolerance
    }
}

/// A connected set of similarly bright pixels, as produced by [`RegionFinder`](crate::RegionFinder).
#[derive(Debug, Default)]
pub struct Region {
    points: Vec<Location>,
    intensity_sum: u64,
    // top left, bottom right
    extremes: Option<(Location, Location)>,
    cross_box: OnceCell<Rect>,
}

impl Region {
    pub(crate) fn add(&mut self, point: &ConnectedPoint) {
        self.cross_box = OnceCell::new();
        self.points.push(point.location);
        self.intensity_sum += u64::from(point.intensity);

        let Location(x, y) = point.location;
        self.extremes = Some(match self.extremes {
            None => (point.location, point.location),
            Some((min, max)) => (Location(min.0.min(x), min.1.min(y)), Location(max.0.max(x), max.1.max(y))),
        });
    }

    /// Member pixels, in no meaningful order.
    pub fn points(&self) -> &[Location] {
        &self.points
    }

    /// Number of member pixels.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Mean grayscale intensity, or [`u8::MAX`] for regions of ten points or fewer.
    pub fn intensity(&self) -> u8 {
        if self.count() <= MIN_JUDGED_POINTS {
            return SPARSE_INTENSITY;
        }
        (self.intensity_sum / self.count() as u64) as u8
    }

    /// Horizontal span of the member pixels.
    pub fn width(&self) -> usize {
        self.extremes.map_or(0, |(min, max)| max.0 - min.0)
    }

    /// Vertical span of the member pixels.
    pub fn height(&self) -> usize {
        self.extremes.map_or(0, |(min, max)| max.1 - min.1)
    }

    /// Fraction of the raw bounding area covered by member pixels; `0.0` when that area is empty.
    pub fn coverage_ratio(&self) -> f64 {
        let area = self.width() * self.height();
        if area == 0 {
            return 0.0;
        }
        self.count() as f64 / area as f64
    }

    /// `width / height` of the raw bounds; `0.0` when the region is flat.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height() == 0 {
            return 0.0;
        }
        self.width() as f64 / self.height() as f64
    }

    /// `width / height` of [`Self::bounding_box`]; `0.0` when it has no height.
    pub fn bounding_aspect_ratio(&self) -> f64 {
        self.bounding_box().aspect_ratio()
    }

    /// The extent of the cross through the centroid of the raw bounds.
    ///
    /// Left and right come from member pixels on the centroid's row, top and bottom from those on its column.
    /// For a puzzle grid this cross runs along the central pathways, so the box hugs the playable area rather than any border around it.
    /// If either spoke is empty that axis collapses to zero length at the centroid.
    /// Computed once and cached until another point is added.
    pub fn bounding_box(&self) -> Rect {
        *self.cross_box.get_or_init(|| self.cross())
    }

    fn cross(&self) -> Rect {
        let Some((min, max)) = self.extremes else {
            return Rect::default();
        };
        let center = Location((min.0 + max.0) / 2, (min.1 + max.1) / 2);

        let horizontal = self.points.iter()
            .filter(|p| p.1 == center.1)
            .map(|p| p.0)
            .fold(None, |span, x| Some(extend(span, x)));
        let vertical = self.points.iter()
            .filter(|p| p.0 == center.0)
            .map(|p| p.1)
            .fold(None, |span, y| Some(extend(span, y)));

        let center = Point::from(center);
        let (left, right) = horizontal.map_or((center.x, center.x), |(l, r)| (l as i32, r as i32));
        let (top, bottom) = vertical.map_or((center.y, center.y), |(t, b)| (t as i32, b as i32));
        Rect::from_edges(left, top, right, bottom)
    }
}

fn extend(span: Option<(usize, usize)>, value: usize) -> (usize, usize) {
    span.map_or((value, value), |(lo, hi)| (lo.min(value), hi.max(value)))
}
