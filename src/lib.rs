// Library exports for the Battlesnake bot
// This allows the server, the replay tool and the tests to share the core logic

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod decision;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod grid;
pub mod handler;
pub mod obstacles;
pub mod replay;
pub mod search;
pub mod types;
