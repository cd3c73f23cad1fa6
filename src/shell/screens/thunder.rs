//! Thunder screen.

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
use crate::games::thunder::{CANNON, ENEMY_X, ThunderGame, ThunderPhase};
use crate::shell::screen::{Screen, ScreenTransition, ShellContext};
use crate::shell::screens::HOUSE_OPPONENT;
use crate::shell::widgets::{Mark, frame_rows, plot, render_help, render_title};

/// State for the Thunder screen.
#[derive(Debug)]
pub struct ThunderScreen {
    game: ThunderGame,
}

impl ThunderScreen {
    /// Starts a duel.
    #[instrument(skip(ctx))]
    pub fn new(ctx: &ShellContext) -> Self {
        let opponent = SyntheticOpponent::new(HOUSE_OPPONENT, ctx.derived_seed(40));
        Self {
            game: ThunderGame::new(Box::new(opponent), ctx.derived_seed(41)),
        }
    }

    /// The duel.
    pub fn game(&self) -> &ThunderGame {
        &self.game
    }
}

fn hearts(health: u32) -> String {
    "♥".repeat(health as usize)
}

impl Screen for ThunderScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let [title, body, help] = frame_rows(frame.area());
        render_title(frame, title, "Thunder", theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(5)])
            .split(body);

        let status = match self.game.phase() {
            ThunderPhase::Aiming => "Your shot".to_string(),
            ThunderPhase::ShellInFlight { .. } => "Shell away...".to_string(),
            ThunderPhase::EnemyReloading { .. } => format!("{} is reloading", self.game.opponent_name()),
            ThunderPhase::Finished => match self.game.winner() {
                Some(winner) => format!("{winner} won. Enter: back"),
                None => "Match over. Enter: back".to_string(),
            },
            ThunderPhase::Abandoned => String::new(),
        };
        let header = format!(
            "{} {}  vs  {} {}   Angle {}°  Power {}  Wind {:+}   {status}",
            ctx.player_name(),
            hearts(self.game.my_health()),
            hearts(self.game.enemy_health()),
            self.game.opponent_name(),
            self.game.angle(),
            self.game.power(),
            self.game.wind(),
        );
        frame.render_widget(
            Paragraph::new(header).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let block = Block::default().borders(Borders::ALL).border_style(theme.accent());
        let inner = block.inner(chunks[1]);
        let ground = Style::default().fg(Color::DarkGray);
        let mut marks: Vec<Mark> = (0..=50)
            .map(|i| Mark::new(Point::new(f64::from(i) * 2.0, CANNON.y + 2.0), '_', ground))
            .collect();
        marks.push(Mark::new(CANNON, 'T', theme.title()));
        marks.push(Mark::new(Point::new(ENEMY_X, CANNON.y), 'T', Style::default().fg(Color::Red)));
        if let Some(shell) = self.game.shell_position() {
            marks.push(Mark::new(shell, '*', Style::default().fg(Color::Yellow)));
        }
        frame.render_widget(Paragraph::new(plot(inner.width, inner.height, &marks)).block(block), chunks[1]);

        render_help(frame, help, "←→: Angle | ↑↓: Power | Space: Fire | Esc: Leave");
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => return ScreenTransition::BackToHome,
            KeyCode::Enter if *self.game.phase() == ThunderPhase::Finished => {
                return ScreenTransition::BackToHome;
            }
            KeyCode::Left => self.game.adjust_angle(1),
            KeyCode::Right => self.game.adjust_angle(-1),
            KeyCode::Up => self.game.adjust_power(2),
            KeyCode::Down => self.game.adjust_power(-2),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.game.fire();
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
