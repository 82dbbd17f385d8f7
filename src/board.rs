//! Static board topology: colors, mill lookups and adjacency.
//!
//! The raw tables live in [`crate::constants`]. This module derives the
//! per-point views (which mills run through a point, which points are
//! adjacent) once per process and exposes them through read-only lookups.

use std::fmt;
use std::sync::LazyLock;

use crate::constants::{CONNECTIONS, MILLS, NUM_POINTS};

/// An intersection on the board, `0..NUM_POINTS`.
pub type Point = usize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side.
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Single-letter symbol used by the board renderer.
    pub fn symbol(self) -> char {
        match self {
            Color::White => 'W',
            Color::Black => 'B',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Per-point lookup tables built from `MILLS` and `CONNECTIONS`.
struct Topology {
    mills: Vec<Vec<[Point; 3]>>,
    neighbors: Vec<Vec<Point>>,
}

static TOPOLOGY: LazyLock<Topology> = LazyLock::new(|| {
    let mut mills = vec![Vec::new(); NUM_POINTS];
    for mill in MILLS {
        for pt in mill {
            mills[pt].push(mill);
        }
    }

    let mut neighbors = vec![Vec::new(); NUM_POINTS];
    for (a, b) in CONNECTIONS {
        neighbors[a].push(b);
        neighbors[b].push(a);
    }
    for list in &mut neighbors {
        list.sort_unstable();
    }

    Topology { mills, neighbors }
});

/// All mill lines passing through `pt`.
#[inline]
pub fn mills_containing(pt: Point) -> &'static [[Point; 3]] {
    &TOPOLOGY.mills[pt]
}

/// Points adjacent to `pt`, in ascending order.
#[inline]
pub fn neighbors(pt: Point) -> &'static [Point] {
    &TOPOLOGY.neighbors[pt]
}

/// Whether a non-jump move between `a` and `b` is possible.
#[inline]
pub fn is_adjacent(a: Point, b: Point) -> bool {
    neighbors(a).contains(&b)
}

/// Check whether the piece on `pt` is part of a closed mill.
///
/// An empty point is never in a mill. Otherwise some line through `pt`
/// must hold three pieces of the same color.
pub fn is_mill_closed(cells: &[Option<Color>], pt: Point) -> bool {
    let Some(color) = cells[pt] else {
        return false;
    };
    mills_containing(pt)
        .iter()
        .any(|mill| mill.iter().all(|&p| cells[p] == Some(color)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_point_in_two_mills() {
        for pt in 0..NUM_POINTS {
            assert_eq!(mills_containing(pt).len(), 2, "point {pt}");
        }
    }

    #[test]
    fn test_neighbors_symmetric() {
        for a in 0..NUM_POINTS {
            for &b in neighbors(a) {
                assert!(is_adjacent(b, a), "{a} -> {b} is one-way");
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        let total: usize = (0..NUM_POINTS).map(|p| neighbors(p).len()).sum();
        assert_eq!(total, 2 * CONNECTIONS.len());
        // Corners have two neighbors, the d4-cross midpoints four.
        assert_eq!(neighbors(0), &[1, 9]);
        assert_eq!(neighbors(4), &[1, 3, 5, 7]);
    }

    #[test]
    fn test_is_mill_closed() {
        let mut cells = [None; NUM_POINTS];
        assert!(!is_mill_closed(&cells, 0));

        cells[0] = Some(Color::White);
        cells[1] = Some(Color::White);
        assert!(!is_mill_closed(&cells, 0));

        cells[2] = Some(Color::Black);
        assert!(!is_mill_closed(&cells, 1));

        cells[2] = Some(Color::White);
        assert!(is_mill_closed(&cells, 0));
        assert!(is_mill_closed(&cells, 1));
        assert!(is_mill_closed(&cells, 2));
        assert!(!is_mill_closed(&cells, 9));
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.opponent(), Color::White);
    }
}
