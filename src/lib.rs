//! Snake in the terminal, with persisted user preferences
//!
//! This library provides:
//! - Core game logic (game module)
//! - JSON-backed preferences shared across instances (prefs module)
//! - Snake and food skins (skins module)
//! - Keyboard input mapping (input module)
//! - TUI rendering (render module)
//! - Terminal bell cues (sound module)
//! - Execution modes: play and settings (modes module)

pub mod game;
pub mod input;
pub mod modes;
pub mod prefs;
pub mod render;
pub mod skins;
pub mod sound;
