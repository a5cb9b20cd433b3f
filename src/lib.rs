// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod app;
pub mod config;
pub mod engine;
pub mod export;
pub mod players;
pub mod protocol;
pub mod roster;
pub mod timer;
pub mod tui;
