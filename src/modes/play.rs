use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::{Action, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::prefs::{spawn_watcher, PrefKey, PrefStore};
use crate::render::{Renderer, ViewSettings};
use crate::sound::{Cue, SoundPlayer};

use super::ticker::Ticker;

/// How often the watcher polls the preference file
const PREF_POLL_PERIOD: Duration = Duration::from_millis(500);

/// The game loop controller: owns the state, the engine, and the single
/// game timer, and reconciles input, ticks, rendering, and preferences.
pub struct PlayMode {
    store: PrefStore,
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
    input_handler: InputHandler,
    sound: SoundPlayer,
    view: ViewSettings,
    tile_count: usize,
    /// Last steer received since the previous tick; a newer key replaces it
    pending_direction: Option<Direction>,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(store: PrefStore, tile_count: usize, muted: bool) -> Self {
        let view = view_settings(&store);
        let mut engine = GameEngine::new(game_config(&store, tile_count));
        let state = engine.reset();

        Self {
            store,
            engine,
            state,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sound: SoundPlayer::new(muted),
            view,
            tile_count,
            pending_direction: None,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut pref_changes = spawn_watcher(self.store.path().to_path_buf(), PREF_POLL_PERIOD);

        // The one game timer; restart() replaces it, game over stops it
        let mut ticker = Ticker::stopped();
        self.restart(&mut ticker)?;

        // Render at 30 FPS so the pause overlay and game-over screen stay
        // responsive while the game timer is idle or stopped
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut ticker)?;
                    }
                }

                // Game logic tick
                _ = ticker.tick() => {
                    self.advance_tick(&mut ticker)?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.view);
                    }).context("Failed to draw frame")?;
                }

                // Writes from another instance (the settings panel)
                maybe_key = pref_changes.recv() => {
                    if let Some(key) = maybe_key {
                        self.on_pref_changed(key)?;
                    }
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, ticker: &mut Ticker) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => {
                    // Steering is ignored before start and while paused.
                    // Reversals are rejected here, against the direction the
                    // snake is actually moving, so the last valid key before
                    // a tick wins; a rejected key leaves an earlier valid
                    // steer in place.
                    if self.state.started
                        && !self.state.paused
                        && !self.state.snake.direction.is_opposite(direction)
                    {
                        self.pending_direction = Some(direction);
                    }
                }
                KeyAction::TogglePause => {
                    if self.state.started {
                        self.state.paused = !self.state.paused;
                    }
                }
                KeyAction::Restart => {
                    self.restart(ticker)?;
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Begin a fresh game. Speed and the wall-collision flag are re-read
    /// here and nowhere else; replacing the ticker cancels the old timer
    /// before the new one can fire.
    fn restart(&mut self, ticker: &mut Ticker) -> Result<()> {
        self.store.reload().context("Failed to reload preferences")?;

        let config = game_config(&self.store, self.tile_count);
        ticker.start(Duration::from_millis(config.tick_ms));

        self.view = view_settings(&self.store);
        self.engine = GameEngine::new(config);
        self.state = self.engine.reset();
        self.pending_direction = None;

        Ok(())
    }

    fn advance_tick(&mut self, ticker: &mut Ticker) -> Result<()> {
        let action = self
            .pending_direction
            .take()
            .map(Action::Move)
            .unwrap_or(Action::Continue);

        let result = self.engine.tick(&mut self.state, action);

        if result.ate_food {
            self.sound.play(Cue::Eat);
        }
        if result.collision.is_some() {
            self.on_game_over(ticker)?;
        }

        Ok(())
    }

    fn on_game_over(&mut self, ticker: &mut Ticker) -> Result<()> {
        ticker.stop();
        self.sound.play(Cue::GameOver);

        self.view.new_record = self
            .store
            .record_high_score(self.state.score)
            .context("Failed to persist high score")?;
        self.view.high_score = self.store.high_score();

        Ok(())
    }

    /// Skins apply live; speed and the wall flag wait for the next restart
    fn on_pref_changed(&mut self, key: PrefKey) -> Result<()> {
        match key {
            PrefKey::SnakeSkin | PrefKey::FoodSkin | PrefKey::HighScore => {
                self.store.reload().context("Failed to reload preferences")?;
                self.view.snake_skin = self.store.snake_skin();
                self.view.food_skin = self.store.food_skin();
                self.view.high_score = self.store.high_score();
            }
            PrefKey::Speed | PrefKey::WallCollision => {}
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn game_config(store: &PrefStore, tile_count: usize) -> GameConfig {
    GameConfig {
        tile_count,
        tick_ms: store.speed_ms(),
        wall_collision: store.wall_collision(),
        ..GameConfig::default()
    }
}

fn view_settings(store: &PrefStore) -> ViewSettings {
    ViewSettings {
        snake_skin: store.snake_skin(),
        food_skin: store.food_skin(),
        high_score: store.high_score(),
        new_record: false,
    }
}
