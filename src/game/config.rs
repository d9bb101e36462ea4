use serde::{Deserialize, Serialize};

/// Configuration for a single game, fixed between restarts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Cells per axis of the square board
    pub tile_count: usize,
    /// Timer period in milliseconds
    pub tick_ms: u64,
    /// Walls kill when true, wrap when false
    pub wall_collision: bool,
    /// Score awarded per food eaten
    pub food_reward: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: 20,
            tick_ms: 100,
            wall_collision: false,
            food_reward: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.tile_count, 20);
        assert_eq!(config.tick_ms, 100);
        assert!(!config.wall_collision);
        assert_eq!(config.food_reward, 10);
    }
}
