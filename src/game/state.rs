use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in the given direction, without wrapping
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Fold coordinates back onto a square board of `tiles` cells per axis
    pub fn wrapped(self, tiles: i32) -> Self {
        Self::new(self.x.rem_euclid(tiles), self.y.rem_euclid(tiles))
    }
}

/// The snake: body segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A freshly hatched snake occupying a single cell
    pub fn spawn(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Whether any segment, head included, sits on the given cell
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Type of collision that ends a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Complete game state, owned by the play controller
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Cells per axis of the square board
    pub tile_count: usize,
    pub score: u32,
    /// Ticks are no-ops while paused; the timer keeps running
    pub paused: bool,
    /// Cleared on game over, set again by restart
    pub started: bool,
}

impl GameState {
    pub fn new(snake: Snake, food: Position, tile_count: usize) -> Self {
        Self {
            snake,
            food,
            tile_count,
            score: 0,
            paused: false,
            started: true,
        }
    }

    /// Check if a cell lies inside the board
    pub fn in_bounds(&self, pos: Position) -> bool {
        let tiles = self.tile_count as i32;
        pos.x >= 0 && pos.x < tiles && pos.y >= 0 && pos.y < tiles
    }
}
