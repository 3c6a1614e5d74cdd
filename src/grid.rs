// Grid geometry helpers for the rectangular board lattice
//
// Neighbor enumeration order is fixed so that tie-breaks downstream are
// reproducible: left, down, right, up.

use crate::types::Coord;

/// Offsets of the 4-connected neighborhood, in enumeration order
const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Offsets of the 8-connected neighborhood, clockwise starting from the left
const DIAGONAL_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

/// True iff the cell lies on a `width` x `height` board
pub fn in_bounds(cell: &Coord, width: i32, height: i32) -> bool {
    cell.x >= 0 && cell.x < width && cell.y >= 0 && cell.y < height
}

/// In-bounds cells at Manhattan distance 1 from `cell`
pub fn orthogonal_neighbors(
    cell: Coord,
    width: i32,
    height: i32,
) -> impl Iterator<Item = Coord> {
    offset_neighbors(cell, &ORTHOGONAL_OFFSETS, width, height)
}

/// In-bounds king-move neighbors of `cell`.
/// The search only ever walks the orthogonal neighborhood.
pub fn diagonal_neighbors(cell: Coord, width: i32, height: i32) -> impl Iterator<Item = Coord> {
    offset_neighbors(cell, &DIAGONAL_OFFSETS, width, height)
}

fn offset_neighbors(
    cell: Coord,
    offsets: &'static [(i32, i32)],
    width: i32,
    height: i32,
) -> impl Iterator<Item = Coord> {
    offsets
        .iter()
        .map(move |(dx, dy)| Coord::new(cell.x + dx, cell.y + dy))
        .filter(move |nb| in_bounds(nb, width, height))
}

/// Calculates Manhattan distance between two coordinates
pub fn manhattan_distance(a: &Coord, b: &Coord) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
