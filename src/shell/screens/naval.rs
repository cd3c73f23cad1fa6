//! Naval screen: fleet placement, then the battle.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use crate::games::naval::{CellState, Coord, GRID_SIZE, NavalGame, NavalPhase, ShipKind};
use crate::games::opponent::SyntheticOpponent;
use crate::shell::screen::{Screen, ScreenTransition, ShellContext};
use crate::shell::screens::HOUSE_OPPONENT;
use crate::shell::widgets::{frame_rows, render_help, render_title, scoreline};
use crate::theme::ThemeContext;

/// State for the naval screen.
#[derive(Debug)]
pub struct NavalScreen {
    game: NavalGame,
    cursor: (usize, usize),
}

impl NavalScreen {
    /// Starts a match in placement.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &ShellContext) -> Self {
        let opponent = SyntheticOpponent::new(HOUSE_OPPONENT, ctx.derived_seed(50));
        Self {
            game: NavalGame::new(Box::new(opponent), ctx.derived_seed(51)),
            cursor: (0, 0),
        }
    }

    /// The match.
    pub fn game(&self) -> &NavalGame {
        &self.game
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let last = GRID_SIZE - 1;
        self.cursor.0 = self.cursor.0.saturating_add_signed(d_row).min(last);
        self.cursor.1 = self.cursor.1.saturating_add_signed(d_col).min(last);
    }

    fn cursor_coord(&self) -> Option<Coord> {
        Coord::new(self.cursor.0, self.cursor.1)
    }

    fn grid_lines(
        &self,
        theme: &ThemeContext,
        show_cursor: bool,
        cell: impl Fn(Coord) -> (char, Style),
    ) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(format!(
            "   {}",
            ('A'..='J').map(|c| format!("{c} ")).collect::<String>()
        ))];
        for row in 0..GRID_SIZE {
            let mut spans = vec![Span::raw(format!("{:>2} ", row + 1))];
            for col in 0..GRID_SIZE {
                let Some(coord) = Coord::new(row, col) else {
                    continue;
                };
                let (glyph, mut style) = cell(coord);
                if show_cursor && (row, col) == self.cursor {
                    style = theme.highlight();
                }
                spans.push(Span::styled(format!("{glyph} "), style));
            }
            lines.push(Line::from(spans));
        }
        lines
    }
}

fn state_glyph(state: CellState, ship: Option<ShipKind>) -> (char, Style) {
    match state {
        CellState::Empty => ('~', Style::default().fg(Color::Blue)),
        CellState::Ship => (ship.map_or('#', ShipKind::marker), Style::default().fg(Color::Gray)),
        CellState::Hit => ('X', Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        CellState::Miss => ('o', Style::default().fg(Color::DarkGray)),
    }
}

impl Screen for NavalScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let [title, body, help] = frame_rows(frame.area());
        render_title(frame, title, "Naval", theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(13)])
            .split(body);
        let boards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);

        let placing = self.game.phase() == NavalPhase::Placement;
        let status = if placing {
            let selected = self
                .game
                .selected()
                .map_or("-".to_string(), |s| format!("{s} ({})", s.length()));
            format!(
                "Placing: {selected}  {}  {}/{} placed",
                self.game.orientation(),
                self.game.placed().len(),
                ShipKind::ALL.len()
            )
        } else {
            let incoming = self
                .game
                .last_incoming()
                .map(|shot| format!("  {} fired at {}: {}", self.game.opponent_name(), shot.coord.label(), shot.outcome))
                .unwrap_or_default();
            format!(
                "{}{incoming}",
                scoreline(self.game.state(), ctx.player_name(), self.game.opponent_name())
            )
        };
        frame.render_widget(
            Paragraph::new(status).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let mine = self.grid_lines(theme, placing, |c| {
            let cell = self.game.my_board().cell(c);
            state_glyph(cell.state, cell.ship)
        });
        frame.render_widget(
            Paragraph::new(mine).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Your fleet")
                    .border_style(theme.accent()),
            ),
            boards[0],
        );

        let theirs = self.grid_lines(theme, !placing, |c| state_glyph(self.game.opponent_view(c), None));
        frame.render_widget(
            Paragraph::new(theirs).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{}'s waters", self.game.opponent_name()))
                    .border_style(theme.accent()),
            ),
            boards[1],
        );

        let keys = if placing {
            "Arrows: Move | 1-5: Ship | o: Rotate | Enter: Place | p: Auto | s: Start | Esc: Leave"
        } else {
            "Arrows: Move | Enter: Fire | Esc: Leave"
        };
        render_help(frame, help, keys);
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => return ScreenTransition::BackToHome,
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            _ if self.game.phase() == NavalPhase::Placement => match key.code {
                KeyCode::Char(c @ '1'..='5') => {
                    if let Some(ship) = c.to_digit(10).and_then(|d| ShipKind::from_index(d as usize)) {
                        self.game.select_ship(ship);
                    }
                }
                KeyCode::Char('o') => self.game.toggle_orientation(),
                KeyCode::Char('p') => self.game.auto_place_remaining(),
                KeyCode::Char('s') => {
                    self.game.start_battle();
                }
                KeyCode::Enter => {
                    if let Err(e) = self.game.place_selected(self.cursor.0, self.cursor.1) {
                        debug!(error = %e, "Placement rejected");
                    }
                }
                _ => {}
            },
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(coord) = self.cursor_coord()
                    && let Err(e) = self.game.attack(coord)
                {
                    debug!(error = %e, "Shot ignored");
                }
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn tick(&mut self, elapsed: Duration) -> ScreenTransition {
        self.game.tick(elapsed);
        ScreenTransition::Stay
    }

    fn unmount(&mut self) {
        self.game.abandon();
    }
}
