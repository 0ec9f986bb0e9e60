use strum::VariantArray;

use crate::location::{Coord, Location};

/// The four steps between orthogonally adjacent grid positions.
///
/// [`VARIANTS`](VariantArray::VARIANTS) lists them in the order neighbors are visited everywhere in this crate:
/// right, up, left, down. The search reports the first solution found, so this order is observable.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// `x + 1`
    Right,
    /// `y - 1`
    Up,
    /// `x - 1`
    Left,
    /// `y + 1`
    Down,
}

impl SquareStep {
    /// Attempt the step from `location`. The result may be out of bounds; see [`Location::offset_by`].
    pub(crate) fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Right => location.offset_by((1, 0)),
            Self::Up => location.offset_by((0, -1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::Down => location.offset_by((0, 1)),
        }
    }

    /// All in-bounds neighbors of `location` on a grid of `dims`, in [`VARIANTS`](VariantArray::VARIANTS) order.
    pub(crate) fn neighbors_within(location: Location, dims: (Coord, Coord)) -> impl Iterator<Item = Location> {
        Self::VARIANTS.iter()
            .map(move |step| step.attempt_from(location))
            .filter(move |neighbor| neighbor.within(dims))
    }
}
