// Obstacle classification: which cells are off-limits this turn
//
// Every hazard and every occupied body segment (ours included) is blocked.
// Outside aggressive mode the cells each opponent head could step into next
// turn are blocked as well, except the opponent's own neck.

use std::collections::HashSet;

use crate::grid::orthogonal_neighbors;
use crate::types::{Battlesnake, Board, Coord};

/// Cells a snake must not expand through or enter this turn
pub type ObstacleSet = HashSet<Coord>;

/// Builds the obstacle set for the snake identified by `you_id`.
///
/// The acting snake's own head is never part of the result so the search can
/// always reach it.
pub fn danger_positions(board: &Board, you_id: &str, aggressive: bool) -> ObstacleSet {
    let mut obstacles: ObstacleSet = board.hazards.iter().copied().collect();

    for snake in &board.snakes {
        obstacles.extend(snake.body.iter().copied());

        if !aggressive && snake.id != you_id {
            obstacles.extend(possible_next_heads(snake, board.width, board.height));
        }
    }

    if let Some(you) = board.snakes.iter().find(|s| s.id == you_id) {
        if let Some(head) = you.body.first() {
            obstacles.remove(head);
        }
    }

    obstacles
}

/// Cells an opponent head can reach next turn, assuming it never reverses
/// into its own neck
fn possible_next_heads(snake: &Battlesnake, width: i32, height: i32) -> Vec<Coord> {
    let Some(&head) = snake.body.first() else {
        return Vec::new();
    };
    let neck = snake.neck();

    orthogonal_neighbors(head, width, height)
        .filter(|cell| Some(*cell) != neck)
        .collect()
}
