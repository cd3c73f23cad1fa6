//! Tests for the screen router, driven with synthetic key presses.

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use kenny_games::{ActiveScreen, Clipboard, GameId, HomeTab, SIGN_IN_DELAY, Shell, Theme};
use ratatui::{Terminal, backend::TestBackend};

fn press(shell: &mut Shell, code: KeyCode) -> bool {
    shell.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn type_text(shell: &mut Shell, text: &str) {
    for c in text.chars() {
        press(shell, KeyCode::Char(c));
    }
}

/// Clipboard that keeps everything copied to it.
#[derive(Debug, Clone, Default)]
struct RecordingClipboard {
    copied: Arc<Mutex<Vec<String>>>,
}

impl RecordingClipboard {
    fn copied(&self) -> Vec<String> {
        self.copied.lock().expect("not poisoned").clone()
    }
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> io::Result<()> {
        self.copied.lock().expect("not poisoned").push(text.to_string());
        Ok(())
    }
}

/// Clipboard whose writes always fail.
#[derive(Debug)]
struct BrokenClipboard;

impl Clipboard for BrokenClipboard {
    fn copy(&mut self, _text: &str) -> io::Result<()> {
        Err(io::Error::other("no terminal"))
    }
}

fn sign_in(mut shell: Shell) -> Shell {
    type_text(&mut shell, "kenny@example.com");
    press(&mut shell, KeyCode::Enter);
    assert!(shell.tick(SIGN_IN_DELAY));
    shell
}

fn signed_in_shell() -> Shell {
    sign_in(Shell::with_clipboard(
        Theme::Emerald,
        Some(99),
        Box::new(RecordingClipboard::default()),
    ))
}

fn home_tab(shell: &Shell) -> Option<HomeTab> {
    match shell.screen() {
        ActiveScreen::Home(home) => Some(home.tab()),
        _ => None,
    }
}

fn screen_text(shell: &Shell) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).expect("terminal");
    terminal.draw(|f| shell.render(f)).expect("draw");
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_starts_on_sign_in() {
    let shell = Shell::new(Theme::Emerald, None);
    assert_eq!(shell.screen().name(), "auth");
    assert!(shell.context().user().is_none());
    assert!(screen_text(&shell).contains("Kenny Games"));
}

#[test]
fn test_sign_in_lands_on_play_tab() {
    let shell = signed_in_shell();
    assert_eq!(home_tab(&shell), Some(HomeTab::Play));
    assert_eq!(shell.context().player_name(), "kenny");
}

#[test]
fn test_sign_in_waits_for_delay() {
    let mut shell = Shell::new(Theme::Emerald, None);
    type_text(&mut shell, "a@b.c");
    press(&mut shell, KeyCode::Enter);
    shell.tick(SIGN_IN_DELAY - Duration::from_millis(1));
    assert_eq!(shell.screen().name(), "auth");
    shell.tick(Duration::from_millis(1));
    assert_eq!(shell.screen().name(), "home");
}

#[test]
fn test_blank_email_stays_on_sign_in() {
    let mut shell = Shell::new(Theme::Emerald, None);
    press(&mut shell, KeyCode::Enter);
    shell.tick(SIGN_IN_DELAY * 2);
    assert_eq!(shell.screen().name(), "auth");
}

#[test]
fn test_tab_cycles_home_tabs() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Tab);
    assert_eq!(home_tab(&shell), Some(HomeTab::Profile));
    press(&mut shell, KeyCode::Tab);
    assert_eq!(home_tab(&shell), Some(HomeTab::Friends));
    press(&mut shell, KeyCode::Tab);
    assert_eq!(home_tab(&shell), Some(HomeTab::Play));
}

#[test]
fn test_friends_search_typing() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Tab);
    type_text(&mut shell, "san");
    let ActiveScreen::Home(home) = shell.screen() else {
        panic!("expected home");
    };
    assert_eq!(home.query(), "san");
    assert_eq!(home.visible_friends().len(), 1);
}

#[test]
fn test_profile_changes_theme() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Down);
    press(&mut shell, KeyCode::Enter);
    assert_eq!(shell.context().theme().theme(), Theme::Blue);
    assert_eq!(home_tab(&shell), Some(HomeTab::Profile));
}

#[test]
fn test_logout_returns_to_sign_in() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Char('l'));
    assert_eq!(shell.screen().name(), "auth");
    assert!(shell.context().user().is_none());
}

#[test]
fn test_lobby_countdown_launches_game() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Down);
    press(&mut shell, KeyCode::Down);
    press(&mut shell, KeyCode::Down);
    press(&mut shell, KeyCode::Enter);
    let ActiveScreen::Lobby(lobby) = shell.screen() else {
        panic!("expected lobby");
    };
    assert_eq!(lobby.lobby().game(), GameId::Archery);
    assert_eq!(lobby.lobby().countdown(), None);
    assert!(screen_text(&shell).contains("Lobby"));

    press(&mut shell, KeyCode::Char('r'));
    let ActiveScreen::Lobby(lobby) = shell.screen() else {
        panic!("expected lobby");
    };
    assert_eq!(lobby.lobby().countdown(), Some(3));

    shell.tick(Duration::from_secs(3));
    assert_eq!(shell.screen().name(), "archery");
    assert!(screen_text(&shell).contains("Archery"));

    press(&mut shell, KeyCode::Esc);
    assert_eq!(home_tab(&shell), Some(HomeTab::Play));
}

#[test]
fn test_leaving_lobby_goes_home() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Enter);
    assert_eq!(shell.screen().name(), "lobby");
    press(&mut shell, KeyCode::Esc);
    assert_eq!(shell.screen().name(), "home");
}

#[test]
fn test_every_game_screen_renders() {
    for (downs, name) in [(0, "pong"), (1, "naval"), (2, "thunder"), (3, "archery")] {
        let mut shell = signed_in_shell();
        for _ in 0..downs {
            press(&mut shell, KeyCode::Down);
        }
        press(&mut shell, KeyCode::Enter);
        press(&mut shell, KeyCode::Char('r'));
        shell.tick(Duration::from_secs(3));
        assert_eq!(shell.screen().name(), name);
        screen_text(&shell);
        // Keep the game running for a while; rendering mid-flight must not panic.
        press(&mut shell, KeyCode::Enter);
        shell.tick(Duration::from_millis(300));
        screen_text(&shell);
    }
}

#[test]
fn test_home_renders_every_tab() {
    let mut shell = signed_in_shell();
    for _ in 0..3 {
        screen_text(&shell);
        press(&mut shell, KeyCode::Tab);
    }
}

#[test]
fn test_quit_from_home() {
    let mut shell = signed_in_shell();
    assert!(!press(&mut shell, KeyCode::Esc));
}

#[test]
fn test_quit_from_sign_in() {
    let mut shell = Shell::new(Theme::Pink, None);
    assert!(!press(&mut shell, KeyCode::Esc));
}

#[test]
fn test_copy_puts_invite_url_on_clipboard() {
    let clipboard = RecordingClipboard::default();
    let mut shell = sign_in(Shell::with_clipboard(
        Theme::Emerald,
        Some(5),
        Box::new(clipboard.clone()),
    ));
    press(&mut shell, KeyCode::Enter);
    assert!(clipboard.copied().is_empty());

    assert!(press(&mut shell, KeyCode::Char('c')));
    let ActiveScreen::Lobby(lobby) = shell.screen() else {
        panic!("expected lobby");
    };
    assert!(lobby.lobby().invite().is_copied());
    assert_eq!(clipboard.copied(), vec![lobby.lobby().invite().url()]);
    assert!(screen_text(&shell).contains("copied!"));
}

#[test]
fn test_failed_clipboard_write_keeps_hub_running() {
    let mut shell = sign_in(Shell::with_clipboard(
        Theme::Emerald,
        None,
        Box::new(BrokenClipboard),
    ));
    press(&mut shell, KeyCode::Enter);
    assert!(press(&mut shell, KeyCode::Char('c')));
    assert_eq!(shell.screen().name(), "lobby");
}

#[test]
fn test_escape_clears_search_before_quitting() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Tab);
    press(&mut shell, KeyCode::Tab);
    type_text(&mut shell, "no");
    assert!(press(&mut shell, KeyCode::Esc));
    let ActiveScreen::Home(home) = shell.screen() else {
        panic!("expected home");
    };
    assert_eq!(home.query(), "");
    assert_eq!(home.tab(), HomeTab::Friends);
    assert!(!press(&mut shell, KeyCode::Esc));
}

#[test]
fn test_play_tab_shows_matches_and_rivalries() {
    let shell = signed_in_shell();
    let text = screen_text(&shell);
    assert!(text.contains("Matches in progress"));
    assert!(text.contains("your turn"));
    assert!(text.contains("their turn"));
    assert!(text.contains("Rivalries"));
    assert!(text.contains("vs Kenny"));
}

#[test]
fn test_profile_tab_shows_streaks_and_recent_results() {
    let mut shell = signed_in_shell();
    press(&mut shell, KeyCode::Tab);
    let text = screen_text(&shell);
    assert!(text.contains("Current streak 5"));
    assert!(text.contains("Best streak 12"));
    assert!(text.contains("Recent results"));
}
