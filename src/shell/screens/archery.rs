//! Archery screen.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::instrument;

use crate::games::archery::{ArcheryGame, ArcheryPhase};
use crate::games::geometry::Point;
use crate::games::opponent::SyntheticOpponent;
use crate::shell::screen::{Screen, ScreenTransition, ShellContext};
use crate::shell::screens::HOUSE_OPPONENT;
use crate::shell::widgets::{Mark, frame_rows, plot, render_help, render_title, scoreline};

const AIM_STEP: f64 = 2.0;
const RING_RADII: [f64; 4] = [4.0, 12.0, 20.0, 28.0];

/// State for the archery screen.
#[derive(Debug)]
pub struct ArcheryScreen {
    game: ArcheryGame,
}

impl ArcheryScreen {
    /// Starts a match.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &ShellContext) -> Self {
        let opponent = SyntheticOpponent::new(HOUSE_OPPONENT, ctx.derived_seed(20));
        Self {
            game: ArcheryGame::new(Box::new(opponent), ctx.derived_seed(21)),
        }
    }

    /// The match.
    pub fn game(&self) -> &ArcheryGame {
        &self.game
    }
}

fn target_marks(style: Style) -> Vec<Mark> {
    RING_RADII
        .iter()
        .flat_map(|r| {
            (0..48).map(move |i| {
                let a = f64::from(i) / 48.0 * std::f64::consts::TAU;
                Mark::new(Point::new(50.0 + r * a.cos(), 50.0 + r * a.sin()), '.', style)
            })
        })
        .collect()
}

impl Screen for ArcheryScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let [title, body, help] = frame_rows(frame.area());
        render_title(frame, title, "Archery", theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(body);

        let status = match self.game.phase() {
            ArcheryPhase::Aiming => format!("{} arrow(s) left", self.game.state().attempts_remaining()),
            ArcheryPhase::ArrowInFlight { .. } => "Arrow away...".to_string(),
            ArcheryPhase::ShowingHit { points, .. } => format!("+{points}"),
            ArcheryPhase::OpponentVolley { .. } => format!("{} is shooting...", self.game.opponent_name()),
            ArcheryPhase::Finished => "Match over. Enter: back".to_string(),
            ArcheryPhase::Abandoned => String::new(),
        };
        let header = format!(
            "{}   Wind {:+}   {status}",
            scoreline(self.game.state(), ctx.player_name(), self.game.opponent_name()),
            self.game.wind()
        );
        frame.render_widget(
            Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let block = Block::default().borders(Borders::ALL).border_style(theme.accent());
        let inner = block.inner(chunks[1]);
        let mut marks = target_marks(theme.muted());
        marks.push(Mark::new(Point::center(), 'o', theme.title()));
        if self.game.accepts_input() {
            marks.push(Mark::new(self.game.aim(), '+', Style::default().fg(Color::Yellow)));
        }
        if let Some(arrow) = self.game.arrow() {
            marks.push(Mark::new(arrow, 'x', Style::default().fg(Color::Red)));
        }
        frame.render_widget(Paragraph::new(plot(inner.width, inner.height, &marks)).block(block), chunks[1]);

        render_help(frame, help, "Arrows: Aim | Space: Release | Esc: Leave");
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => return ScreenTransition::BackToHome,
            KeyCode::Enter if *self.game.phase() == ArcheryPhase::Finished => {
                return ScreenTransition::BackToHome;
            }
            KeyCode::Left => self.game.nudge_aim(-AIM_STEP, 0.0),
            KeyCode::Right => self.game.nudge_aim(AIM_STEP, 0.0),
            KeyCode::Up => self.game.nudge_aim(0.0, -AIM_STEP),
            KeyCode::Down => self.game.nudge_aim(0.0, AIM_STEP),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.game.release();
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
