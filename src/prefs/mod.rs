//! Persisted user preferences
//!
//! Speed, wall-collision mode, skins, and the high score live in a flat
//! JSON file shared by every mode and instance. The watcher delivers
//! cross-instance change notifications.

pub mod store;
pub mod watcher;

pub use store::{PrefKey, PrefStore, DEFAULT_SPEED_MS};
pub use watcher::spawn_watcher;
