// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's state is written to a JSONL file
// that the replay tool can read back.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::decision::DecisionTier;
use crate::types::{Board, Direction};

/// One logged turn
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DebugLogEntry {
    pub turn: i32,
    pub you_id: String,
    pub chosen_move: String,
    pub tier: DecisionTier,
    pub board: Board,
    pub timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(
        &self,
        turn: i32,
        you_id: &str,
        board: Board,
        chosen_move: Direction,
        tier: DecisionTier,
    ) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let entry = DebugLogEntry {
            turn,
            you_id: you_id.to_string(),
            chosen_move: chosen_move.as_str().to_string(),
            tier,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Writes one entry as a JSON line; waits for the file lock
    pub async fn write_entry_now(&self, entry: DebugLogEntry) {
        if self.enabled {
            Self::write_entry(self.file.clone(), entry).await;
        }
    }

    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        let Some(file) = file_guard.as_mut() else {
            return;
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                let line_with_newline = format!("{}\n", json_line);
                if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                    error!("Failed to write debug log entry: {}", e);
                } else if let Err(e) = file.flush().await {
                    error!("Failed to flush debug log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize debug log entry: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

    fn entry(turn: i32) -> DebugLogEntry {
        DebugLogEntry {
            turn,
            you_id: "me".to_string(),
            chosen_move: "up".to_string(),
            tier: DecisionTier::DistanceField,
            board: Board {
                width: 3,
                height: 3,
                food: vec![Coord::new(2, 2)],
                snakes: vec![],
                hazards: vec![],
            },
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[tokio::test]
    async fn test_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.jsonl");
        let logger = DebugLogger::new(true, path.to_str().unwrap()).await;
        assert!(logger.is_enabled());

        logger.write_entry_now(entry(1)).await;
        logger.write_entry_now(entry(2)).await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: DebugLogEntry = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed.turn, 2);
        assert_eq!(parsed.tier, DecisionTier::DistanceField);
        assert!(lines[0].contains("\"tier\":\"distance_field\""));
    }

    #[tokio::test]
    async fn test_disabled_logger_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turns.jsonl");
        let logger = DebugLogger::new(false, path.to_str().unwrap()).await;

        logger.write_entry_now(entry(1)).await;

        assert!(!logger.is_enabled());
        assert!(!path.exists());
    }
}
