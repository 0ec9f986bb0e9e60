use std::fmt::{Debug, Formatter};

use unordered_pair::UnorderedPair;

use crate::location::Location;

/// An undirected segment between two grid points, used as a wall between cells.
///
/// Endpoints are stored in ascending order, so `Edge::new(a, b) == Edge::new(b, a)` and both hash alike.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Edge(UnorderedPair<Location>);

impl Edge {
    /// The segment joining `a` and `b`, in either order.
    pub fn new(a: Location, b: Location) -> Self {
        Self(UnorderedPair::from((a.min(b), a.max(b))))
    }

    /// Endpoints, lowest first.
    pub fn endpoints(&self) -> (Location, Location) {
        (self.0.0, self.0.1)
    }

    /// The wall separating two orthogonally adjacent cells.
    ///
    /// Cell `(x, y)` spans vertices `(x, y)` to `(x + 1, y + 1)`, so the shared side starts at the larger coordinate of the pair
    /// and ends one past the smaller.
    pub(crate) fn between_cells(a: Location, b: Location) -> Self {
        Self::new(
            Location(a.0.max(b.0), a.1.max(b.1)),
            Location(a.0.min(b.0) + 1, a.1.min(b.1) + 1),
        )
    }
}

impl Debug for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (a, b) = self.endpoints();
        write!(f, "Edge({:?}, {:?})", a, b)
    }
}

impl From<(Location, Location)> for Edge {
    fn from(value: (Location, Location)) -> Self {
        Self::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::edge::Edge;
    use crate::location::Location;

    #[test]
    fn orientation_does_not_matter() {
        let a = Location(2, 3);
        let b = Location(2, 4);
        assert_eq!(Edge::new(a, b), Edge::new(b, a));
        assert_eq!(Edge::from((b, a)).endpoints(), (a, b));

        let walls = HashSet::from([Edge::new(b, a)]);
        assert!(walls.contains(&Edge::new(a, b)));
    }

    #[test]
    fn wall_between_side_by_side_cells_is_vertical() {
        assert_eq!(Edge::between_cells(Location(0, 0), Location(1, 0)), Edge::new(Location(1, 0), Location(1, 1)));
        assert_eq!(Edge::between_cells(Location(2, 3), Location(1, 3)), Edge::new(Location(2, 3), Location(2, 4)));
    }

    #[test]
    fn wall_between_stacked_cells_is_horizontal() {
        assert_eq!(Edge::between_cells(Location(0, 0), Location(0, 1)), Edge::new(Location(0, 1), Location(1, 1)));
        assert_eq!(Edge::between_cells(Location(3, 2), Location(3, 1)), Edge::new(Location(3, 2), Location(4, 2)));
    }
}
