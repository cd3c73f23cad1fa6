//! Rosé Pong screen.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::instrument;

use crate::games::geometry::Point;
use crate::games::opponent::SyntheticOpponent;
use crate::games::pong::{LAUNCH_POINT, PongGame, PongPhase, Rack, Swipe};
use crate::shell::screen::{Screen, ScreenTransition, ShellContext};
use crate::shell::screens::HOUSE_OPPONENT;
use crate::shell::widgets::{Mark, frame_rows, plot, render_help, render_title, scoreline};

const SWIPE_STEP: f64 = 2.0;

/// State for the pong screen.
#[derive(Debug)]
pub struct PongScreen {
    game: PongGame,
    drag: (f64, f64),
}

impl PongScreen {
    /// Starts a match.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &ShellContext) -> Self {
        let opponent = SyntheticOpponent::new(HOUSE_OPPONENT, ctx.derived_seed(30));
        Self {
            game: PongGame::new(Box::new(opponent), ctx.derived_seed(31)),
            drag: (0.0, -30.0),
        }
    }

    /// The match.
    pub fn game(&self) -> &PongGame {
        &self.game
    }

    fn swipe(&self) -> Swipe {
        Swipe::from_launch(self.drag.0, self.drag.1)
    }
}

/// Marks for a rack drawn with its top-left cup at `(x, y)`.
fn rack_marks(rack: &Rack, x: f64, y: f64, down: f64, style: Style) -> Vec<Mark> {
    rack.cups()
        .iter()
        .filter(|cup| !cup.hit)
        .map(|cup| Mark::new(Point::new(x + cup.x * 6.0, y + down * cup.y * 4.0), 'U', style))
        .collect()
}

impl Screen for PongScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let [title, body, help] = frame_rows(frame.area());
        render_title(frame, title, "Rosé Pong", theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(body);

        let swipe = self.swipe();
        let status = match self.game.phase() {
            PongPhase::Aiming => format!(
                "Power {:.2}  Angle {:+.2}",
                swipe.power(),
                swipe.deviation()
            ),
            PongPhase::BallInFlight { .. } => "Ball in the air...".to_string(),
            PongPhase::Settling { .. } => String::new(),
            PongPhase::OpponentWindup { .. } | PongPhase::OpponentSettling { .. } => {
                format!("{}'s turn", self.game.opponent_name())
            }
            PongPhase::Finished => "Match over. Enter: back".to_string(),
            PongPhase::Abandoned => String::new(),
        };
        let header = format!(
            "{}   {status}",
            scoreline(self.game.state(), ctx.player_name(), self.game.opponent_name())
        );
        frame.render_widget(
            Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let block = Block::default().borders(Borders::ALL).border_style(theme.accent());
        let inner = block.inner(chunks[1]);
        let red = Style::default().fg(Color::Red);
        let mut marks = rack_marks(self.game.opponent_rack(), 41.0, 48.0, 1.0, red);
        marks.extend(rack_marks(self.game.my_rack(), 41.0, 100.0, -1.0, theme.accent()));
        if self.game.accepts_input() {
            marks.push(Mark::new(swipe.end(), '*', Style::default().fg(Color::Yellow)));
            marks.push(Mark::new(LAUNCH_POINT, 'o', theme.title()));
        }
        if let Some(ball) = self.game.ball_position() {
            marks.push(Mark::new(ball, 'o', theme.title()));
        }
        frame.render_widget(Paragraph::new(plot(inner.width, inner.height, &marks)).block(block), chunks[1]);

        render_help(frame, help, "Arrows: Drag | Space: Throw | Esc: Leave");
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => return ScreenTransition::BackToHome,
            KeyCode::Enter if *self.game.phase() == PongPhase::Finished => {
                return ScreenTransition::BackToHome;
            }
            KeyCode::Left => self.drag.0 -= SWIPE_STEP,
            KeyCode::Right => self.drag.0 += SWIPE_STEP,
            KeyCode::Up => self.drag.1 -= SWIPE_STEP,
            KeyCode::Down => self.drag.1 += SWIPE_STEP,
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.game.throw(self.swipe());
            }
            _ => {}
        }
        let end = self.swipe().end();
        self.drag = (end.x - LAUNCH_POINT.x, end.y - LAUNCH_POINT.y);
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
