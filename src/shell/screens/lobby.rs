//! Lobby screen: seats, ready flags, invite link and the countdown.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tracing::{debug, instrument, warn};

use crate::games::GameId;
use crate::icons::game_icon;
use crate::lobby::{Lobby, LobbyEvent, LobbyPhase, Slot};
use crate::shell::screen::{Screen, ScreenTransition, ShellContext};
use crate::shell::widgets::{frame_rows, render_help, render_title};

/// Opponent seated when the lobby opens.
pub const HOUSE_OPPONENT: &str = "Sandy";

/// Friends that can be invited from the lobby, in order.
const INVITABLE: [&str; 3] = ["Kenny", "Léa", "Nour"];

/// State for the lobby screen.
#[derive(Debug)]
pub struct LobbyScreen {
    lobby: Lobby,
    my_slot: usize,
}

impl LobbyScreen {
    /// Opens a lobby for `game` with the player and a ready opponent seated.
    #[instrument(skip(ctx))]
    pub fn new(game: GameId, ctx: &ShellContext) -> Self {
        let mut lobby = Lobby::new(game, ctx.derived_seed(10));
        let my_slot = lobby.join(ctx.player_name()).unwrap_or(0);
        match lobby.join(HOUSE_OPPONENT) {
            Ok(slot) => {
                if let Err(e) = lobby.set_ready(slot, true) {
                    warn!(error = %e, "Could not ready the house opponent");
                }
            }
            Err(e) => warn!(error = %e, "Could not seat the house opponent"),
        }
        Self { lobby, my_slot }
    }

    /// The lobby state.
    pub fn lobby(&self) -> &Lobby {
        &self.lobby
    }

    /// Seat of the local player.
    pub fn my_slot(&self) -> usize {
        self.my_slot
    }

    fn invite_next(&mut self) {
        let seated: Vec<String> = self
            .lobby
            .roster()
            .slots()
            .iter()
            .filter_map(|s| match s {
                Slot::Occupied { name, .. } => Some(name.clone()),
                Slot::Empty => None,
            })
            .collect();
        let Some(name) = INVITABLE
            .into_iter()
            .find(|n| !seated.iter().any(|s| s.as_str() == *n))
        else {
            return;
        };
        match self.lobby.join(name) {
            Ok(slot) => {
                if let Err(e) = self.lobby.set_ready(slot, true) {
                    debug!(error = %e, "Invitee could not ready up");
                }
            }
            Err(e) => debug!(error = %e, "Invite ignored"),
        }
    }

    fn remove_last_guest(&mut self) {
        let last = self
            .lobby
            .roster()
            .slots()
            .iter()
            .rposition(Slot::is_occupied)
            .filter(|&slot| slot != self.my_slot);
        if let Some(slot) = last
            && let Err(e) = self.lobby.leave(slot)
        {
            debug!(error = %e, "Remove ignored");
        }
    }
}

impl Screen for LobbyScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let game = self.lobby.game();
        let [title, body, help] = frame_rows(frame.area());
        render_title(frame, title, &format!("{} - Lobby", game.title()), theme);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(body);

        let icon: Vec<Line> = game_icon(game)
            .iter()
            .map(|row| Line::styled(*row, theme.accent()))
            .collect();
        frame.render_widget(
            Paragraph::new(icon)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(theme.accent())),
            chunks[0],
        );

        let roster = self.lobby.roster();
        let seats: Vec<ListItem> = roster
            .slots()
            .iter()
            .enumerate()
            .map(|(i, slot)| match slot {
                Slot::Occupied { name, ready } => {
                    let (badge, style) = if *ready {
                        ("READY", theme.accent())
                    } else {
                        ("not ready", Style::default().fg(Color::Yellow))
                    };
                    let you = if i == self.my_slot { " (you)" } else { "" };
                    ListItem::new(Line::styled(format!("{name}{you}  {badge}"), style))
                }
                Slot::Empty => {
                    ListItem::new(Line::styled("waiting for player...", Style::default().fg(Color::DarkGray)))
                }
            })
            .collect();
        frame.render_widget(
            List::new(seats).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(
                        "Players {}/{} ready",
                        roster.ready_count(),
                        roster.occupied_count()
                    ))
                    .border_style(theme.accent()),
            ),
            chunks[1],
        );

        let invite = self.lobby.invite();
        let link = if invite.is_copied() {
            format!("{}  copied!", invite.url())
        } else {
            invite.url()
        };
        frame.render_widget(
            Paragraph::new(link).block(Block::default().borders(Borders::ALL).title("Invite")),
            chunks[2],
        );

        let status = match self.lobby.phase() {
            LobbyPhase::Waiting => "Waiting for everyone to be ready".to_string(),
            LobbyPhase::CountingDown { remaining, .. } => format!("Starting in {remaining}"),
            LobbyPhase::Launched => "Go!".to_string(),
        };
        frame.render_widget(
            Paragraph::new(status)
                .alignment(Alignment::Center)
                .style(theme.title().add_modifier(Modifier::BOLD)),
            chunks[3],
        );

        render_help(
            frame,
            help,
            "r: Ready | a: Invite friend | x: Remove guest | c: Copy link | Esc: Back",
        );
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        if *self.lobby.phase() == LobbyPhase::Launched {
            return ScreenTransition::Stay;
        }
        match key.code {
            KeyCode::Char('r') | KeyCode::Char(' ') => {
                if let Err(e) = self.lobby.toggle_ready(self.my_slot) {
                    debug!(error = %e, "Ready toggle ignored");
                }
            }
            KeyCode::Char('a') => self.invite_next(),
            KeyCode::Char('x') => self.remove_last_guest(),
            KeyCode::Char('c') => {
                self.lobby.copy_invite();
                return ScreenTransition::CopyToClipboard(self.lobby.invite().url());
            }
            KeyCode::Esc => return ScreenTransition::BackToHome,
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn tick(&mut self, elapsed: Duration) -> ScreenTransition {
        match self.lobby.tick(elapsed) {
            Some(LobbyEvent::Launch(game)) => ScreenTransition::LaunchGame(game),
            None => ScreenTransition::Stay,
        }
    }
}
