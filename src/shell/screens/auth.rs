//! Sign-in screen.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use crate::auth::{AuthMode, AuthStub, Credentials};
use crate::shell::screen::{Screen, ScreenTransition, ShellContext};
use crate::shell::widgets::{center_rect, frame_rows, render_help, render_title};

/// Form field with keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Email,
    Password,
    Name,
}

/// State for the sign-in screen.
#[derive(Debug, Default)]
pub struct AuthScreen {
    stub: AuthStub,
    email: String,
    password: String,
    name: String,
    focus: Option<Field>,
    error: Option<String>,
}

impl AuthScreen {
    /// Empty login form.
    #[instrument]
    pub fn new() -> Self {
        Self {
            focus: Some(Field::Email),
            ..Self::default()
        }
    }

    /// Whether a sign-in is in flight.
    pub fn is_pending(&self) -> bool {
        self.stub.is_pending()
    }

    fn fields(&self) -> &'static [Field] {
        match self.stub.mode() {
            AuthMode::Login => &[Field::Email, Field::Password],
            AuthMode::Signup => &[Field::Name, Field::Email, Field::Password],
        }
    }

    fn focus_next(&mut self) {
        let fields = self.fields();
        let index = self
            .focus
            .and_then(|f| fields.iter().position(|&x| x == f))
            .map_or(0, |i| (i + 1) % fields.len());
        self.focus = Some(fields[index]);
    }

    fn focused_mut(&mut self) -> Option<&mut String> {
        match self.focus? {
            Field::Email => Some(&mut self.email),
            Field::Password => Some(&mut self.password),
            Field::Name => Some(&mut self.name),
        }
    }

    fn submit(&mut self) {
        let credentials = Credentials::new(
            self.email.clone(),
            self.password.clone(),
            self.name.clone(),
        );
        match self.stub.submit(credentials) {
            Ok(()) => self.error = None,
            Err(e) => {
                debug!(error = %e, "Submit refused");
                self.error = Some(e.to_string());
            }
        }
    }
}

impl Screen for AuthScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let [title, body, help] = frame_rows(frame.area());
        render_title(frame, title, "Kenny Games", theme);

        let form = center_rect(body, 50, 14);
        let fields = self.fields();
        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(3)));
        constraints.push(Constraint::Length(2));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(form);

        let heading = Paragraph::new(self.stub.mode().to_string()).style(theme.title());
        frame.render_widget(heading, rows[0]);

        for (i, field) in fields.iter().enumerate() {
            let (label, value) = match field {
                Field::Email => ("Email", self.email.clone()),
                Field::Password => ("Password", "*".repeat(self.password.chars().count())),
                Field::Name => ("Name", self.name.clone()),
            };
            let style = if self.focus == Some(*field) {
                theme.accent()
            } else {
                Style::default()
            };
            let input = Paragraph::new(value)
                .block(Block::default().borders(Borders::ALL).title(label).border_style(style));
            frame.render_widget(input, rows[i + 1]);
        }

        let status = if self.stub.is_pending() {
            Paragraph::new("Signing in...").style(theme.muted())
        } else if let Some(error) = &self.error {
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red))
        } else {
            Paragraph::new("")
        };
        frame.render_widget(status, rows[fields.len() + 1]);

        render_help(
            frame,
            help,
            "Tab: Next field | Enter: Submit | F2: Log in / Sign up | Esc: Quit",
        );
    }

    #[instrument(skip(self, key, _ctx))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        match key.code {
            KeyCode::Esc => return ScreenTransition::Quit,
            _ if self.stub.is_pending() => {}
            KeyCode::Tab => self.focus_next(),
            KeyCode::F(2) => {
                self.stub.toggle_mode();
                self.focus = self.fields().first().copied();
                self.error = None;
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                if let Some(text) = self.focused_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn tick(&mut self, elapsed: Duration) -> ScreenTransition {
        match self.stub.tick(elapsed) {
            Some(user) => ScreenTransition::SignedIn(user),
            None => ScreenTransition::Stay,
        }
    }

    fn unmount(&mut self) {
        self.stub.cancel();
    }
}
