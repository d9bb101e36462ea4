use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::seq::IteratorRandom;

/// Starting cell for every new game
const SPAWN_CELL: Position = Position { x: 5, y: 5 };

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Collision that ended the game, if any
    pub collision: Option<CollisionType>,
}

impl TickResult {
    fn idle() -> Self {
        Self {
            ate_food: false,
            collision: None,
        }
    }

    fn game_over(collision: CollisionType) -> Self {
        Self {
            ate_food: false,
            collision: Some(collision),
        }
    }
}

/// The game engine: pure state transitions, no I/O
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial state: a one-cell snake heading right, fresh food,
    /// zero score, unpaused
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::spawn(SPAWN_CELL, Direction::Right);
        // A one-cell snake always leaves free cells on a board this size
        let food = self.spawn_food(&snake).unwrap_or(SPAWN_CELL);

        GameState::new(snake, food, self.config.tile_count)
    }

    /// Advance the game by one tick
    pub fn tick(&mut self, state: &mut GameState, action: Action) -> TickResult {
        if state.paused || !state.started {
            return TickResult::idle();
        }

        // Steering that would reverse into the neck is ignored
        if let Action::Move(direction) = action {
            if !state.snake.direction.is_opposite(direction) {
                state.snake.direction = direction;
            }
        }

        let mut head = state.snake.head().step(state.snake.direction);

        if self.config.wall_collision {
            if !state.in_bounds(head) {
                state.started = false;
                return TickResult::game_over(CollisionType::Wall);
            }
        } else {
            head = head.wrapped(self.config.tile_count as i32);
        }

        // The scan runs before the tail is popped, so steering onto the
        // current tail cell counts as a collision even though that cell
        // vacates this tick. Intentional strictness, kept as-is.
        if state.snake.occupies(head) {
            state.started = false;
            return TickResult::game_over(CollisionType::SelfCollision);
        }

        state.snake.body.insert(0, head);

        if head == state.food {
            state.score += self.config.food_reward;
            // Board completely full: keep the stale food, the game is over
            // within a few ticks anyway
            if let Some(food) = self.spawn_food(&state.snake) {
                state.food = food;
            }
            TickResult {
                ate_food: true,
                collision: None,
            }
        } else {
            state.snake.body.pop();
            TickResult::idle()
        }
    }

    /// Pick food uniformly from the cells the snake does not occupy.
    /// Returns None only when the snake covers the whole board.
    fn spawn_food(&mut self, snake: &Snake) -> Option<Position> {
        let tiles = self.config.tile_count as i32;
        (0..tiles)
            .flat_map(|y| (0..tiles).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .choose(&mut self.rng)
    }
}
