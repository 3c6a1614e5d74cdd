// Text rendering of a turn's board and distance field for debug output
//
// Each cell prints as a marker followed by a two-character distance:
//   H = our head, B = our body, x = a head neighbor, _ = anything else
//   distances shorter than two characters are padded with '_', "__" = unreached
// Rows run from the top of the board (y = height - 1) down to y = 0.

use std::fmt::Write;

use crate::grid::orthogonal_neighbors;
use crate::search::DistanceField;
use crate::types::Coord;

/// Renders `field` over a `width` x `height` board for the snake with `body`
pub fn render_field(body: &[Coord], field: &DistanceField, width: i32, height: i32) -> String {
    let head = body.first().copied();
    let head_neighbors: Vec<Coord> = head
        .map(|h| orthogonal_neighbors(h, width, height).collect())
        .unwrap_or_default();

    let mut out = String::new();
    for y in (0..height).rev() {
        out.push('|');
        for x in 0..width {
            let cell = Coord::new(x, y);
            let marker = if Some(cell) == head {
                'H'
            } else if body.contains(&cell) {
                'B'
            } else if head_neighbors.contains(&cell) {
                'x'
            } else {
                '_'
            };

            let distance = match field.get(&cell) {
                Some(d) => format!("{:_<2}", d),
                None => "__".to_string(),
            };

            // writing into a String cannot fail
            let _ = write!(out, "{}{}|", marker, distance);
        }
        out.push('\n');
    }
    out
}
