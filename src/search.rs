// Reachability search: layered breadth-first distance field
//
// The field is grown outward from the target (the food) toward the origin
// (our head), so a lower value on a head neighbor means "closer to food".
// Expansion stops as soon as the origin has been assigned a distance, when a
// round discovers nothing new, or when the round budget runs out.

use std::collections::HashMap;

use log::debug;

use crate::config::SearchConfig;
use crate::grid::orthogonal_neighbors;
use crate::obstacles::ObstacleSet;
use crate::types::Coord;

/// Steps from the target for every cell the search reached
pub type DistanceField = HashMap<Coord, u32>;

/// Number of expansion rounds allowed on a board of the given width.
///
/// Boards wider than `wide_board_threshold` are capped so the search stays
/// local to the head instead of flooding the whole board.
pub fn round_budget(width: i32, config: &SearchConfig) -> usize {
    let width = width.max(0) as usize;
    if width > config.wide_board_threshold {
        config.max_rounds_on_wide_board
    } else {
        width
    }
}

/// Builds the distance field from `target` toward `origin`.
///
/// Obstacles only block expansion; the seed cell is always present with
/// distance 0 even if it is itself an obstacle. The result may not contain
/// `origin` at all.
pub fn distance_field(
    target: Coord,
    origin: Coord,
    width: i32,
    height: i32,
    obstacles: &ObstacleSet,
    max_rounds: usize,
) -> DistanceField {
    let mut field = DistanceField::new();
    field.insert(target, 0);

    if target == origin {
        return field;
    }

    let mut frontier = vec![target];
    let mut layer: u32 = 1;

    for _ in 0..max_rounds {
        let mut next = Vec::new();

        for cell in &frontier {
            for nb in orthogonal_neighbors(*cell, width, height) {
                if obstacles.contains(&nb) || field.contains_key(&nb) {
                    continue;
                }
                field.insert(nb, layer);
                next.push(nb);
            }
        }

        if next.is_empty() {
            debug!("Search exhausted reachable cells after {} layers", layer - 1);
            break;
        }

        // origin already carries its final distance at this point
        if field.contains_key(&origin) {
            break;
        }

        frontier = next;
        layer += 1;
    }

    field
}
