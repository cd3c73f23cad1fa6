//! Home screen with the Friends, Play and Profile tabs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
};
use tracing::{debug, info, instrument};

use crate::games::GameId;
use crate::icons::game_icon;
use crate::shell::screen::{HomeTab, Screen, ScreenTransition, ShellContext};
use crate::shell::widgets::{frame_rows, render_help};
use crate::social::{
    ActiveMatch, Friend, FriendsFilter, GameRecord, GlobalStats, Presence, RecentResult, Rivalry,
    filter_friends, sample_active_matches, sample_friends, sample_global_stats,
    sample_recent_results, sample_records, sample_rivalries,
};
use crate::theme::Theme;

/// State for the home screen.
#[derive(Debug)]
pub struct HomeScreen {
    tab: HomeTab,
    friends: Vec<Friend>,
    records: Vec<GameRecord>,
    active: Vec<ActiveMatch>,
    global: GlobalStats,
    rivalries: Vec<Rivalry>,
    recent: Vec<RecentResult>,
    filter: FriendsFilter,
    query: String,
    games: ListState,
    themes: ListState,
}

impl HomeScreen {
    /// Home screen showing `tab`.
    #[instrument]
    pub fn new(tab: HomeTab) -> Self {
        let mut games = ListState::default();
        games.select(Some(0));
        let mut themes = ListState::default();
        themes.select(Some(0));
        Self {
            tab,
            friends: sample_friends(),
            records: sample_records(),
            active: sample_active_matches(),
            global: sample_global_stats(),
            rivalries: sample_rivalries(),
            recent: sample_recent_results(),
            filter: FriendsFilter::default(),
            query: String::new(),
            games,
            themes,
        }
    }

    /// Active tab.
    pub fn tab(&self) -> HomeTab {
        self.tab
    }

    /// Shows `tab`.
    pub fn set_tab(&mut self, tab: HomeTab) {
        self.tab = tab;
    }

    /// Friends search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Friends visible under the current sub-tab and search.
    pub fn visible_friends(&self) -> Vec<&Friend> {
        filter_friends(&self.friends, self.filter, &self.query)
    }

    /// Game highlighted on the Play tab.
    pub fn selected_game(&self) -> GameId {
        GameId::ALL[self.games.selected().unwrap_or(0).min(GameId::ALL.len() - 1)]
    }

    fn selected_theme(&self) -> Theme {
        Theme::ALL[self.themes.selected().unwrap_or(0).min(Theme::ALL.len() - 1)]
    }

    fn render_friends(&self, frame: &mut Frame, area: Rect, ctx: &ShellContext) {
        let theme = ctx.theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(3)])
            .split(area);

        let search = Paragraph::new(format!("{} | search: {}", self.filter, self.query)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Friends")
                .border_style(theme.accent()),
        );
        frame.render_widget(search, chunks[0]);

        let items: Vec<ListItem> = self
            .visible_friends()
            .into_iter()
            .map(|friend| {
                let detail = match friend.presence() {
                    Presence::Online { playing: Some(game) } => format!("playing {}", game.title()),
                    Presence::Online { playing: None } => "online".to_string(),
                    Presence::Offline { last_seen } => format!("last seen {last_seen}"),
                    Presence::Pending => "wants to be friends".to_string(),
                };
                ListItem::new(format!("{:<10} {}", friend.name(), detail))
            })
            .collect();
        let list = List::new(items).block(Block::default().borders(Borders::ALL));
        frame.render_widget(list, chunks[1]);
    }

    fn render_play(&self, frame: &mut Frame, area: Rect, ctx: &ShellContext) {
        let theme = ctx.theme();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(self.active.len() as u16 + 2),
                Constraint::Min(4),
            ])
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),
                Constraint::Length(self.rivalries.len() as u16 + 2),
            ])
            .split(columns[1]);

        let matches: Vec<ListItem> = self
            .active
            .iter()
            .map(|m| {
                let (turn, style) = if *m.my_turn() {
                    ("your turn", theme.accent())
                } else {
                    ("their turn", theme.muted())
                };
                ListItem::new(Line::styled(
                    format!(
                        "{:<10} vs {:<6} {:>3}-{:<3} {turn}",
                        m.game().title(),
                        m.opponent(),
                        m.my_score(),
                        m.opponent_score()
                    ),
                    style,
                ))
            })
            .collect();
        frame.render_widget(
            List::new(matches).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Matches in progress")
                    .border_style(theme.accent()),
            ),
            left[0],
        );

        let items: Vec<ListItem> = GameId::ALL
            .iter()
            .map(|game| ListItem::new(format!("{} - {}", game.title(), game.subtitle())))
            .collect();
        let menu = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Games")
                    .border_style(theme.accent()),
            )
            .highlight_style(theme.highlight())
            .highlight_symbol("> ");
        let mut list_state = self.games;
        frame.render_stateful_widget(menu, left[1], &mut list_state);

        let game = self.selected_game();
        let icon: Vec<Line> = game_icon(game)
            .iter()
            .map(|row| Line::styled(*row, theme.accent()))
            .collect();
        let card = Paragraph::new(icon).block(
            Block::default()
                .borders(Borders::ALL)
                .title(game.title())
                .border_style(theme.accent()),
        );
        frame.render_widget(card, right[0]);

        let rivals: Vec<ListItem> = self
            .rivalries
            .iter()
            .map(|r| {
                let style = if r.is_ahead() {
                    theme.accent()
                } else {
                    Style::default().fg(Color::Red)
                };
                ListItem::new(Line::styled(
                    format!("vs {:<8} {:>3}-{}", r.opponent(), r.wins(), r.losses()),
                    style,
                ))
            })
            .collect();
        frame.render_widget(
            List::new(rivals).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Rivalries")
                    .border_style(theme.accent()),
            ),
            right[1],
        );
    }

    fn render_profile(&self, frame: &mut Frame, area: Rect, ctx: &ShellContext) {
        let theme = ctx.theme();
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let mut lines = vec![Line::styled(ctx.player_name().to_string(), theme.title())];
        if let Some(user) = ctx.user() {
            lines.push(Line::from(user.email().clone()));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Wins {}  Losses {}  {:.0}%",
            self.global.wins(),
            self.global.losses(),
            self.global.win_rate()
        )));
        lines.push(Line::styled(
            format!(
                "Current streak {}  Best streak {}",
                self.global.current_streak(),
                self.global.best_streak()
            ),
            theme.accent(),
        ));
        lines.push(Line::from(""));
        for record in &self.records {
            lines.push(Line::from(format!(
                "{:<10} W:{:>3}  L:{:>3}  {:>5.1}%",
                record.game().title(),
                record.wins(),
                record.losses(),
                record.win_rate()
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::styled("Recent results", theme.title()));
        for result in &self.recent {
            let (verdict, style) = if result.won() {
                ("Win ", theme.accent())
            } else {
                ("Loss", Style::default().fg(Color::Red))
            };
            lines.push(Line::styled(
                format!(
                    "{:<10} {verdict} {}-{}",
                    result.game().title(),
                    result.my_score(),
                    result.opponent_score()
                ),
                style,
            ));
        }
        let stats = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Profile")
                .border_style(theme.accent()),
        );
        frame.render_widget(stats, chunks[0]);

        let items: Vec<ListItem> = Theme::ALL
            .iter()
            .map(|t| {
                let swatch = Style::default().fg(Color::from(*t.colors().primary()));
                let marker = if *t == theme.theme() { " (active)" } else { "" };
                ListItem::new(Line::styled(format!("{t}{marker}"), swatch))
            })
            .collect();
        let picker = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Theme")
                    .border_style(theme.accent()),
            )
            .highlight_symbol("> ");
        let mut list_state = self.themes;
        frame.render_stateful_widget(picker, chunks[1], &mut list_state);
    }
}

fn step(state: &mut ListState, len: usize, forward: bool) {
    let i = match (state.selected(), forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) if i > 0 => i - 1,
        (_, false) => len - 1,
        (None, true) => 0,
    };
    state.select(Some(i));
}

impl Screen for HomeScreen {
    #[instrument(skip(self, frame, ctx))]
    fn render(&self, frame: &mut Frame, ctx: &ShellContext) {
        let theme = ctx.theme();
        let [top, body, help] = frame_rows(frame.area());

        let titles: Vec<String> = HomeTab::ALL.iter().map(|t| t.to_string()).collect();
        let selected = HomeTab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0);
        let tabs = Tabs::new(titles)
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(theme.title())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Kenny Games - {}", ctx.player_name()))
                    .border_style(theme.accent()),
            );
        frame.render_widget(tabs, top);

        match self.tab {
            HomeTab::Friends => self.render_friends(frame, body, ctx),
            HomeTab::Play => self.render_play(frame, body, ctx),
            HomeTab::Profile => self.render_profile(frame, body, ctx),
        }

        let keys = match self.tab {
            HomeTab::Friends => "Tab: Next tab | ←→: Online/All/Pending | Type: Search | Esc: Clear / Quit",
            HomeTab::Play => "Tab: Next tab | ↑↓: Choose | Enter: Open lobby | q: Quit",
            HomeTab::Profile => "Tab: Next tab | ↑↓: Theme | Enter: Apply | l: Log out | q: Quit",
        };
        render_help(frame, help, keys);
    }

    #[instrument(skip(self, key, _ctx), fields(tab = %self.tab))]
    fn handle_key(&mut self, key: KeyEvent, _ctx: &ShellContext) -> ScreenTransition {
        if key.code == KeyCode::Tab {
            return ScreenTransition::SwitchTab(self.tab.next());
        }
        if key.code == KeyCode::Esc {
            if self.tab == HomeTab::Friends && !self.query.is_empty() {
                debug!("Search cleared");
                self.query.clear();
                return ScreenTransition::Stay;
            }
            return ScreenTransition::Quit;
        }
        match self.tab {
            HomeTab::Friends => {
                match key.code {
                    KeyCode::Left | KeyCode::Right => {
                        self.filter = self.filter.next();
                        debug!(filter = %self.filter, "Friends filter changed");
                    }
                    KeyCode::Backspace => {
                        self.query.pop();
                    }
                    KeyCode::Char(c) => self.query.push(c),
                    _ => {}
                }
                ScreenTransition::Stay
            }
            HomeTab::Play => match key.code {
                KeyCode::Up => {
                    step(&mut self.games, GameId::ALL.len(), false);
                    ScreenTransition::Stay
                }
                KeyCode::Down => {
                    step(&mut self.games, GameId::ALL.len(), true);
                    ScreenTransition::Stay
                }
                KeyCode::Enter => {
                    let game = self.selected_game();
                    info!(%game, "Game chosen");
                    ScreenTransition::OpenLobby(game)
                }
                KeyCode::Char('q') => ScreenTransition::Quit,
                _ => ScreenTransition::Stay,
            },
            HomeTab::Profile => match key.code {
                KeyCode::Up => {
                    step(&mut self.themes, Theme::ALL.len(), false);
                    ScreenTransition::Stay
                }
                KeyCode::Down => {
                    step(&mut self.themes, Theme::ALL.len(), true);
                    ScreenTransition::Stay
                }
                KeyCode::Enter => ScreenTransition::SetTheme(self.selected_theme()),
                KeyCode::Char('l') => ScreenTransition::Logout,
                KeyCode::Char('q') => ScreenTransition::Quit,
                _ => ScreenTransition::Stay,
            },
        }
    }
}
