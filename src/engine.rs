// Per-turn move pipeline
//
// target selection -> obstacle classification -> distance field -> decision
//
// Everything here is a pure function of the board snapshot and the static
// configuration; nothing survives between turns.

use log::{debug, warn};

use crate::config::Config;
use crate::decision::{closest_food, decide, DecisionTier};
use crate::error::{EngineError, EngineResult};
use crate::grid::in_bounds;
use crate::obstacles::{danger_positions, ObstacleSet};
use crate::search::{distance_field, round_budget, DistanceField};
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Everything the engine worked out for one turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub direction: Direction,
    pub tier: DecisionTier,
    /// Food the field was grown from, `None` when the board had no food
    pub target: Option<Coord>,
    pub field: DistanceField,
    pub obstacles: ObstacleSet,
}

/// Checks the input contract and returns our snake from `board.snakes`
pub fn validate<'a>(board: &'a Board, you_id: &str) -> EngineResult<&'a Battlesnake> {
    if board.width <= 0 || board.height <= 0 {
        return Err(EngineError::InvalidBoardState(format!(
            "board dimensions must be positive, got {}x{}",
            board.width, board.height
        )));
    }

    let out_of_bounds = |kind: &str, cell: &Coord| {
        EngineError::InvalidBoardState(format!(
            "{} at ({}, {}) is outside the {}x{} board",
            kind, cell.x, cell.y, board.width, board.height
        ))
    };

    if let Some(cell) = board.food.iter().find(|c| !in_bounds(c, board.width, board.height)) {
        return Err(out_of_bounds("food", cell));
    }
    if let Some(cell) = board.hazards.iter().find(|c| !in_bounds(c, board.width, board.height)) {
        return Err(out_of_bounds("hazard", cell));
    }

    for snake in &board.snakes {
        if snake.body.is_empty() {
            return Err(EngineError::InvalidBoardState(format!(
                "snake '{}' has an empty body",
                snake.id
            )));
        }
        if let Some(cell) = snake.body.iter().find(|c| !in_bounds(c, board.width, board.height)) {
            return Err(out_of_bounds("body segment", cell));
        }
    }

    board
        .snakes
        .iter()
        .find(|s| s.id == you_id)
        .ok_or_else(|| {
            EngineError::InvalidBoardState(format!("snake '{}' not found on the board", you_id))
        })
}

/// Computes the move for snake `you_id` on `board`
pub fn compute_move(board: &Board, you_id: &str, config: &Config) -> EngineResult<TurnOutcome> {
    let you = validate(board, you_id)?;

    let head = you.body[0];
    let tail = you.tail().unwrap_or(head);

    let target = match closest_food(&head, &board.food) {
        Ok(food) => Some(food),
        Err(EngineError::NoTargetAvailable) => {
            warn!("No food on the board, skipping distance field search");
            None
        }
        Err(e) => return Err(e),
    };

    let obstacles = danger_positions(board, you_id, config.strategy.aggressive);

    let field = match target {
        Some(target) => {
            let rounds = round_budget(board.width, &config.search);
            debug!("Searching from {:?} toward {:?} with {} rounds", target, head, rounds);
            distance_field(target, head, board.width, board.height, &obstacles, rounds)
        }
        None => DistanceField::new(),
    };

    let decision = decide(
        head,
        tail,
        &field,
        board.width,
        board.height,
        &obstacles,
        config.strategy.fallback,
    );

    Ok(TurnOutcome {
        direction: decision.direction,
        tier: decision.tier,
        target,
        field,
        obstacles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(id: &str, body: Vec<Coord>) -> Battlesnake {
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health: 100,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn board(width: i32, height: i32, food: Vec<Coord>, snakes: Vec<Battlesnake>) -> Board {
        Board {
            width,
            height,
            food,
            snakes,
            hazards: vec![],
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_dimensions() {
        let b = board(0, 5, vec![], vec![snake("me", vec![Coord::new(0, 0)])]);
        assert!(matches!(validate(&b, "me"), Err(EngineError::InvalidBoardState(_))));
    }

    #[test]
    fn test_validate_rejects_missing_snake() {
        let b = board(5, 5, vec![], vec![snake("other", vec![Coord::new(0, 0)])]);
        assert!(matches!(validate(&b, "me"), Err(EngineError::InvalidBoardState(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_food() {
        let b = board(5, 5, vec![Coord::new(5, 0)], vec![snake("me", vec![Coord::new(0, 0)])]);
        let err = validate(&b, "me").unwrap_err();
        assert!(err.to_string().contains("food"));
    }

    #[test]
    fn test_validate_rejects_out_of_bounds_hazard() {
        let mut b = board(5, 5, vec![], vec![snake("me", vec![Coord::new(0, 0)])]);
        b.hazards.push(Coord::new(-1, 2));
        let err = validate(&b, "me").unwrap_err();
        assert!(err.to_string().contains("hazard"));
    }

    #[test]
    fn test_validate_rejects_empty_body() {
        let mut empty = snake("me", vec![Coord::new(0, 0)]);
        empty.body.clear();
        let b = board(5, 5, vec![], vec![empty]);
        assert!(validate(&b, "me").is_err());
    }

    #[test]
    fn test_no_food_uses_fallback_tier() {
        let b = board(
            5,
            5,
            vec![],
            vec![snake("me", vec![Coord::new(2, 2), Coord::new(2, 1), Coord::new(1, 1)])],
        );

        let outcome = compute_move(&b, "me", &Config::default_hardcoded()).unwrap();

        assert!(outcome.target.is_none());
        assert!(outcome.field.is_empty());
        assert_eq!(outcome.tier, DecisionTier::Fallback);
        // left (1,2) is one step from the tail at (1,1)
        assert_eq!(outcome.direction, Direction::Left);
    }

    #[test]
    fn test_follows_field_toward_food() {
        let b = board(
            7,
            7,
            vec![Coord::new(6, 3)],
            vec![snake("me", vec![Coord::new(3, 3), Coord::new(2, 3)])],
        );

        let outcome = compute_move(&b, "me", &Config::default_hardcoded()).unwrap();

        assert_eq!(outcome.target, Some(Coord::new(6, 3)));
        assert_eq!(outcome.field[&Coord::new(3, 3)], 3);
        assert_eq!(outcome.direction, Direction::Right);
        assert_eq!(outcome.tier, DecisionTier::DistanceField);
        assert!(!outcome.obstacles.contains(&Coord::new(3, 3)));
    }
}
