use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{
    backend::CrosstermBackend,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use std::io::{stderr, Stderr};

use crate::prefs::{PrefKey, PrefStore};

/// Speed presets offered by the panel, slowest first
const SPEED_PRESETS: [(&str, u64); 4] = [
    ("Slow", 150),
    ("Normal", 100),
    ("Fast", 75),
    ("Insane", 50),
];

/// The adjustable rows, top to bottom
const ROWS: [PrefKey; 4] = [
    PrefKey::Speed,
    PrefKey::WallCollision,
    PrefKey::SnakeSkin,
    PrefKey::FoodSkin,
];

/// Reflect-and-write UI over the preference store. Never touches game
/// state: a running game sees skin changes live and the rest at restart.
pub struct SettingsMode {
    store: PrefStore,
    selected: usize,
    should_quit: bool,
}

impl SettingsMode {
    pub fn new(store: PrefStore) -> Self {
        Self {
            store,
            selected: 0,
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

        let result = self.run_ui_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_ui_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            terminal
                .draw(|frame| self.render(frame))
                .context("Failed to draw frame")?;

            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(Event::Key(key))) = maybe_event {
                        if key.kind == KeyEventKind::Press {
                            self.handle_key(key)?;
                        }
                    }
                }

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

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('w') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(ROWS.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('s') => {
                self.selected = (self.selected + 1) % ROWS.len();
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Enter | KeyCode::Char(' ') => {
                self.adjust(true)?;
            }
            KeyCode::Left | KeyCode::Char('a') => {
                self.adjust(false)?;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }

        Ok(())
    }

    /// Step the selected row to its next (or previous) value and write it
    /// through to the store immediately
    fn adjust(&mut self, forward: bool) -> Result<()> {
        match ROWS[self.selected] {
            PrefKey::Speed => {
                let index = preset_index(self.store.speed_ms());
                let next = if forward {
                    (index + 1) % SPEED_PRESETS.len()
                } else {
                    index.checked_sub(1).unwrap_or(SPEED_PRESETS.len() - 1)
                };
                self.store
                    .set(PrefKey::Speed, SPEED_PRESETS[next].1.to_string())?;
            }
            PrefKey::WallCollision => {
                let enabled = !self.store.wall_collision();
                self.store.set(PrefKey::WallCollision, enabled.to_string())?;
            }
            PrefKey::SnakeSkin => {
                let skin = self.store.snake_skin();
                let skin = if forward { skin.next() } else { skin.prev() };
                self.store.set(PrefKey::SnakeSkin, skin.name())?;
            }
            PrefKey::FoodSkin => {
                let skin = self.store.food_skin();
                let skin = if forward { skin.next() } else { skin.prev() };
                self.store.set(PrefKey::FoodSkin, skin.name())?;
            }
            PrefKey::HighScore => {}
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        let rows: Vec<Line> = ROWS
            .iter()
            .enumerate()
            .flat_map(|(index, key)| {
                [self.render_row(index, *key), Line::from("")]
            })
            .collect();

        let mut lines = vec![Line::from("")];
        lines.extend(rows);
        lines.push(Line::from(vec![
            Span::styled("High score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                self.store.high_score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("↑↓", Style::default().fg(Color::Cyan)),
            Span::raw(" select | "),
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" change | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ]));

        let panel = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Settings "),
        );

        frame.render_widget(panel, frame.area());
    }

    fn render_row(&self, index: usize, key: PrefKey) -> Line<'_> {
        let (label, value) = match key {
            PrefKey::Speed => ("Speed", speed_label(self.store.speed_ms())),
            PrefKey::WallCollision => (
                "Wall collision",
                if self.store.wall_collision() {
                    "Enabled".to_string()
                } else {
                    "Disabled".to_string()
                },
            ),
            PrefKey::SnakeSkin => ("Snake skin", self.store.snake_skin().name().to_string()),
            PrefKey::FoodSkin => {
                let skin = self.store.food_skin();
                ("Food", format!("{} {}", skin.glyph(), skin.name()))
            }
            PrefKey::HighScore => ("High score", self.store.high_score().to_string()),
        };

        let style = if index == self.selected {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let marker = if index == self.selected { "▸ " } else { "  " };

        Line::from(Span::styled(
            format!("{}{}: {}", marker, label, value),
            style,
        ))
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

/// Label for a stored speed, naming the preset when it matches one
fn speed_label(ms: u64) -> String {
    match SPEED_PRESETS.iter().find(|(_, preset)| *preset == ms) {
        Some((name, _)) => format!("{} ({} ms)", name, ms),
        None => format!("{} ms", ms),
    }
}

fn preset_index(ms: u64) -> usize {
    SPEED_PRESETS
        .iter()
        .position(|(_, preset)| *preset == ms)
        .unwrap_or(1) // treat unknown speeds as Normal
}
