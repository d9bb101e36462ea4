//! Core game logic for Snake
//!
//! Pure state transitions with no I/O or rendering dependencies: the engine
//! advances an explicit `GameState` one tick at a time and reports what
//! happened.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, TickResult};
pub use state::{CollisionType, GameState, Position, Snake};
