// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the engine on historical states
// 3. Compare logged vs replayed moves
// 4. Generate analysis reports, including how often each decision tier fired

use log::{info, warn};
use rayon::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::decision::DecisionTier;
use crate::engine::compute_move;
use crate::types::{Board, Direction};

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub original_tier: DecisionTier,
    pub replayed_tier: DecisionTier,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
    pub fallback_turns: usize,
    pub default_turns: usize,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<DebugLogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: DebugLogEntry = serde_json::from_str(&line).map_err(|e| {
                format!("Failed to parse JSON on line {}: {}", line_num + 1, e)
            })?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the engine on a single board state
    pub fn replay_turn(
        &self,
        board: &Board,
        our_snake_id: &str,
    ) -> Result<(Direction, DecisionTier), String> {
        let outcome = compute_move(board, our_snake_id, &self.config).map_err(|e| e.to_string())?;
        Ok((outcome.direction, outcome.tier))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &DebugLogEntry) -> Result<ReplayResult, String> {
        let original_move = Direction::parse(&entry.chosen_move)?;
        let (replayed_move, replayed_tier) = self.replay_turn(&entry.board, &entry.you_id)?;

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches: original_move == replayed_move,
            original_tier: entry.tier,
            replayed_tier,
        };

        if self.verbose {
            if result.matches {
                info!(
                    "Turn {}: ✓ MATCH - {} ({:?})",
                    entry.turn,
                    replayed_move.as_str(),
                    replayed_tier
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {} ({:?}), Replayed: {} ({:?})",
                    entry.turn,
                    original_move.as_str(),
                    entry.tier,
                    replayed_move.as_str(),
                    replayed_tier
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file, in parallel; results stay in log order
    pub fn replay_all(&self, entries: &[DebugLogEntry]) -> Vec<ReplayResult> {
        entries
            .par_iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[DebugLogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut selected = Vec::with_capacity(turn_numbers.len());

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;
            selected.push(entry.clone());
        }

        Ok(self.replay_all(&selected))
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches: total_turns - matches,
            match_rate,
            fallback_turns: results
                .iter()
                .filter(|r| r.replayed_tier == DecisionTier::Fallback)
                .count(),
            default_turns: results
                .iter()
                .filter(|r| r.replayed_tier == DecisionTier::Default)
                .count(),
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("Fallback Tier:  {}", stats.fallback_turns);
        println!("Default Tier:   {}", stats.default_turns);
        println!("═══════════════════════════════════════════════════════════\n");

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} ({:?}) → {} ({:?})",
                    result.turn,
                    result.original_move.as_str(),
                    result.original_tier,
                    result.replayed_move.as_str(),
                    result.replayed_tier
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[DebugLogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Coord};
    use std::io::Write;

    fn entry(turn: i32, chosen_move: &str) -> DebugLogEntry {
        let body = vec![Coord::new(3, 3), Coord::new(2, 3)];
        DebugLogEntry {
            turn,
            you_id: "me".to_string(),
            chosen_move: chosen_move.to_string(),
            tier: DecisionTier::DistanceField,
            board: Board {
                width: 7,
                height: 7,
                food: vec![Coord::new(6, 3)],
                snakes: vec![Battlesnake {
                    id: "me".to_string(),
                    name: "me".to_string(),
                    health: 90,
                    head: body[0],
                    length: 2,
                    body,
                    latency: "0".to_string(),
                    shout: None,
                }],
                hazards: vec![],
            },
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_replay_detects_match_and_mismatch() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(1, "right"), entry(2, "up")];

        let results = engine.replay_all(&entries);
        let stats = engine.generate_stats(&results);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].turn, 1);
        assert!(results[0].matches);
        assert!(!results[1].matches);
        assert_eq!(stats.matches, 1);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.fallback_turns, 0);
    }

    #[test]
    fn test_replay_skips_unknown_snake() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let mut bad = entry(1, "right");
        bad.you_id = "ghost".to_string();

        assert!(engine.replay_entry(&bad).is_err());
        assert!(engine.replay_all(&[bad]).is_empty());
    }

    #[test]
    fn test_replay_turns_requires_logged_turn() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(1, "right")];

        assert!(engine.replay_turns(&entries, &[7]).is_err());
        assert_eq!(engine.replay_turns(&entries, &[1]).unwrap().len(), 1);
    }

    #[test]
    fn test_validate_expected_moves() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let entries = vec![entry(1, "right")];

        assert!(engine
            .validate_expected_moves(&entries, &[(1, vec![Direction::Right, Direction::Up])])
            .is_ok());
        assert!(engine
            .validate_expected_moves(&entries, &[(1, vec![Direction::Left])])
            .is_err());
    }

    #[test]
    fn test_load_log_file_skips_blank_lines() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", serde_json::to_string(&entry(1, "right")).unwrap()).unwrap();
        writeln!(file).unwrap();
        writeln!(file, "{}", serde_json::to_string(&entry(2, "up")).unwrap()).unwrap();

        let entries = engine.load_log_file(file.path()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].chosen_move, "up");
    }

    #[test]
    fn test_load_log_file_reports_bad_line() {
        let engine = ReplayEngine::new(Config::default_hardcoded(), false);
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let err = engine.load_log_file(file.path()).unwrap_err();
        assert!(err.contains("line 1"));
    }
}
