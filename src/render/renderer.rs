use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{GameState, Position};
use crate::skins::{FoodSkin, SnakeSkin};

/// Presentation state resolved from the preference store
#[derive(Debug, Clone, Copy)]
pub struct ViewSettings {
    pub snake_skin: SnakeSkin,
    pub food_skin: FoodSkin,
    pub high_score: u32,
    /// Set when the last game strictly beat the stored high score;
    /// cleared on restart
    pub new_record: bool,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Full repaint of the frame: header, board (or game-over screen),
    /// footer, and the pause overlay when applicable
    pub fn render(&self, frame: &mut Frame, state: &GameState, view: &ViewSettings) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_header(state, view), chunks[0]);

        // Center the board horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.started {
            frame.render_widget(self.render_board(state, view), game_area);

            if state.paused {
                let overlay = centered_rect(game_area, 12, 3);
                frame.render_widget(Clear, overlay);
                frame.render_widget(self.render_pause_overlay(), overlay);
            }
        } else {
            frame.render_widget(self.render_game_over(state, view), game_area);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_header(&self, state: &GameState, view: &ViewSettings) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_board(&self, state: &GameState, view: &ViewSettings) -> Paragraph<'_> {
        let snake_style = Style::default().fg(view.snake_skin.color());
        let mut lines = Vec::with_capacity(state.tile_count);

        for y in 0..state.tile_count {
            let mut spans = Vec::with_capacity(state.tile_count);

            for x in 0..state.tile_count {
                let pos = Position::new(x as i32, y as i32);

                // Head and body render identically; the trailing space
                // leaves the grid gap between segments
                let cell = if state.snake.occupies(pos) {
                    Span::styled("■ ", snake_style)
                } else if pos == state.food {
                    Span::raw(view.food_skin.glyph())
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_pause_overlay(&self) -> Paragraph<'_> {
        Paragraph::new("PAUSED")
            .style(
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, state: &GameState, view: &ViewSettings) -> Paragraph<'_> {
        let mut best_line = vec![
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.high_score.to_string(),
                Style::default().fg(Color::White),
            ),
        ];
        if view.new_record {
            best_line.push(Span::styled(
                "  New record!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(best_line),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A rect of at most the given size, centered inside `area`
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
