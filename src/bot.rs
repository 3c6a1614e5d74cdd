// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// Each turn the snake grows a breadth-first distance field back from the
// nearest food and steps onto whichever neighbor of its head sits lowest in
// that field. See engine.rs for the pipeline.

use log::{debug, info, warn};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::decision::DecisionTier;
use crate::diagnostics::render_field;
use crate::engine::compute_move;
use crate::error::EngineResult;
use crate::types::{Battlesnake, Board, Game};

/// How often each decision tier has produced a move since startup.
/// Frequent fallback use means the snake keeps boxing itself in.
#[derive(Debug, Default)]
pub struct TierCounters {
    distance_field: AtomicU64,
    fallback: AtomicU64,
    default: AtomicU64,
}

/// Point-in-time copy of [`TierCounters`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TierCounts {
    pub distance_field: u64,
    pub fallback: u64,
    pub default: u64,
}

impl TierCounters {
    pub fn record(&self, tier: DecisionTier) {
        let counter = match tier {
            DecisionTier::DistanceField => &self.distance_field,
            DecisionTier::Fallback => &self.fallback,
            DecisionTier::Default => &self.default,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TierCounts {
        TierCounts {
            distance_field: self.distance_field.load(Ordering::Relaxed),
            fallback: self.fallback.load(Ordering::Relaxed),
            default: self.default.load(Ordering::Relaxed),
        }
    }
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
    tiers: TierCounters,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no debug log
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
            tiers: TierCounters::default(),
        }
    }

    /// Attaches a JSONL turn logger
    pub fn with_debug_logger(mut self, debug_logger: DebugLogger) -> Self {
        self.debug_logger = debug_logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn tier_counts(&self) -> TierCounts {
        self.tiers.snapshot()
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes)",
            game.id,
            board.width,
            board.height,
            board.snakes.len()
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        let counts = self.tiers.snapshot();
        info!("GAME OVER {} after {} turns", game.id, turn);
        info!(
            "Decision tiers so far: distance field {}, fallback {}, default {}",
            counts.distance_field, counts.fallback, counts.default
        );
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// # Arguments
    /// * `_game` - Current game metadata
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `EngineResult<Value>` - JSON response containing the chosen move direction,
    ///   or an error if the snapshot breaks the input contract
    pub fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> EngineResult<Value> {
        let outcome = compute_move(board, &you.id, &self.config).map_err(|e| {
            warn!("Turn {}: rejected snapshot: {}", turn, e);
            e
        })?;

        self.tiers.record(outcome.tier);

        if self.config.debug.render_field {
            debug!(
                "Turn {} distance field:\n{}",
                turn,
                render_field(&you.body, &outcome.field, board.width, board.height)
            );
        }

        self.debug_logger
            .log_move(*turn, &you.id, board.clone(), outcome.direction, outcome.tier);

        info!(
            "MOVE {}: {} ({:?}, target {:?}, {} cells reached)",
            turn,
            outcome.direction.as_str(),
            outcome.tier,
            outcome.target,
            outcome.field.len()
        );

        Ok(json!({ "move": outcome.direction.as_str() }))
    }
}
