// Target selection and move decision
//
// The move is read off the distance field: step onto the head neighbor with
// the lowest distance. When the field covers no head neighbor the decision
// degrades to the configured fallback, and finally to a fixed direction, so
// every turn has an answer.

use log::{debug, warn};
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::config::FallbackPolicy;
use crate::error::{EngineError, EngineResult};
use crate::grid::{manhattan_distance, orthogonal_neighbors};
use crate::obstacles::ObstacleSet;
use crate::search::DistanceField;
use crate::types::{Coord, Direction};

/// Last-resort move when nothing else is available
pub const DEFAULT_DIRECTION: Direction = Direction::Down;

/// Which degradation tier produced a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionTier {
    /// Lowest-distance head neighbor in the distance field
    DistanceField,
    /// Unblocked neighbor chosen by the fallback policy
    Fallback,
    /// Hard-coded default direction
    Default,
}

/// A chosen direction together with the tier that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub tier: DecisionTier,
}

/// Food cell closest to `head` by Manhattan distance; the first one wins ties
pub fn closest_food(head: &Coord, food: &[Coord]) -> EngineResult<Coord> {
    food.iter()
        .min_by_key(|cell| manhattan_distance(head, cell))
        .copied()
        .ok_or(EngineError::NoTargetAvailable)
}

/// Chooses a direction for the snake whose head and tail are given.
pub fn decide(
    head: Coord,
    tail: Coord,
    field: &DistanceField,
    width: i32,
    height: i32,
    obstacles: &ObstacleSet,
    fallback: FallbackPolicy,
) -> Decision {
    let best = orthogonal_neighbors(head, width, height)
        .filter_map(|cell| field.get(&cell).map(|dist| (cell, *dist)))
        .min_by_key(|(_, dist)| *dist);

    match best {
        Some((cell, dist)) => {
            debug!("Best neighbor {:?} at distance {}", cell, dist);
            if let Some(direction) = Direction::between(&head, &cell) {
                return Decision {
                    direction,
                    tier: DecisionTier::DistanceField,
                };
            }
            warn!("Best neighbor {:?} is not one step from head {:?}", cell, head);
        }
        None => warn!("Distance field reaches no neighbor of head {:?}", head),
    }

    fallback_decision(head, tail, width, height, obstacles, fallback)
}

/// Second and third tiers: any unblocked neighbor, then the default direction
fn fallback_decision(
    head: Coord,
    tail: Coord,
    width: i32,
    height: i32,
    obstacles: &ObstacleSet,
    policy: FallbackPolicy,
) -> Decision {
    let naive: Vec<Coord> = orthogonal_neighbors(head, width, height)
        .filter(|cell| !obstacles.contains(cell))
        .collect();

    let picked = match policy {
        FallbackPolicy::TailSeeking => naive
            .iter()
            .min_by_key(|cell| manhattan_distance(cell, &tail))
            .copied(),
        FallbackPolicy::Random => naive.choose(&mut rand::rng()).copied(),
    };

    let Some(cell) = picked else {
        warn!("No unblocked neighbor of head {:?}, defaulting to {}", head, DEFAULT_DIRECTION.as_str());
        return default_decision();
    };

    match Direction::between(&head, &cell) {
        Some(direction) => Decision {
            direction,
            tier: DecisionTier::Fallback,
        },
        None => {
            warn!("Fallback cell {:?} is not one step from head {:?}", cell, head);
            default_decision()
        }
    }
}

fn default_decision() -> Decision {
    Decision {
        direction: DEFAULT_DIRECTION,
        tier: DecisionTier::Default,
    }
}
