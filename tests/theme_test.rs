//! Tests for themes, game icons and the sample social data.

use std::str::FromStr;

use kenny_games::{
    FriendsFilter, GameId, GameRecord, Rgb, Theme, ThemeContext, filter_friends, game_icon,
    sample_active_matches, sample_friends, sample_global_stats, sample_recent_results,
    sample_records, sample_rivalries,
};

#[test]
fn test_default_theme_is_emerald() {
    let ctx = ThemeContext::default();
    assert_eq!(ctx.theme(), Theme::Emerald);
    assert_eq!(ctx.colors().primary().to_string(), "#10b981");
}

#[test]
fn test_rgb_displays_as_hex() {
    assert_eq!(Rgb(0, 15, 255).to_string(), "#000fff");
}

#[test]
fn test_gradient_runs_primary_to_dark() {
    let colors = Theme::Blue.colors();
    assert_eq!(
        colors.gradient(),
        "linear-gradient(135deg, #3b82f6 0%, #1d4ed8 100%)"
    );
}

#[test]
fn test_set_theme_re_resolves_colors() {
    let mut ctx = ThemeContext::new(Theme::Emerald);
    ctx.set_theme(Theme::Pink);
    assert_eq!(ctx.theme(), Theme::Pink);
    assert_eq!(ctx.colors(), &Theme::Pink.colors());
}

#[test]
fn test_every_theme_has_distinct_primary() {
    let mut primaries: Vec<Rgb> = Theme::ALL.iter().map(|t| *t.colors().primary()).collect();
    primaries.dedup();
    assert_eq!(primaries.len(), Theme::ALL.len());
}

#[test]
fn test_theme_parses_case_insensitively() {
    assert_eq!(Theme::from_str("purple"), Ok(Theme::Purple));
    assert_eq!(Theme::from_str("BLUE"), Ok(Theme::Blue));
    assert!(Theme::from_str("teal").is_err());
}

#[test]
fn test_icons_are_rectangular() {
    for game in GameId::ALL {
        let icon = game_icon(game);
        assert!(!icon.is_empty());
        let width = icon[0].chars().count();
        assert!(icon.iter().all(|line| line.chars().count() == width), "{game}");
    }
}

#[test]
fn test_friends_filters() {
    let friends = sample_friends();
    let online = filter_friends(&friends, FriendsFilter::Online, "");
    assert!(online.iter().all(|f| f.is_online()));
    let all = filter_friends(&friends, FriendsFilter::All, "");
    assert!(all.len() > online.len());
    assert!(all.iter().all(|f| !f.is_pending()));
    let pending = filter_friends(&friends, FriendsFilter::Pending, "");
    assert_eq!(pending.len() + all.len(), friends.len());
}

#[test]
fn test_friend_search_ignores_case() {
    let friends = sample_friends();
    let found = filter_friends(&friends, FriendsFilter::All, "  SAN ");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), "Sandy");
    assert!(filter_friends(&friends, FriendsFilter::All, "zzz").is_empty());
}

#[test]
fn test_filter_cycles() {
    let start = FriendsFilter::default();
    assert_eq!(start.next().next().next(), start);
}

#[test]
fn test_win_rate() {
    let record = GameRecord::new(GameId::Pong, 3, 1);
    assert_eq!(record.total(), 4);
    assert!((record.win_rate() - 75.0).abs() < f64::EPSILON);
    assert_eq!(GameRecord::new(GameId::Naval, 0, 0).win_rate(), 0.0);
    assert_eq!(sample_records().len(), GameId::ALL.len());
}

#[test]
fn test_sample_records_per_game() {
    let wins_losses = |game| {
        sample_records()
            .into_iter()
            .find(|r| *r.game() == game)
            .map(|r| (*r.wins(), *r.losses()))
    };
    assert_eq!(wins_losses(GameId::Pong), Some((24, 8)));
    assert_eq!(wins_losses(GameId::Archery), Some((31, 12)));
    assert_eq!(wins_losses(GameId::Thunder), Some((18, 9)));
    assert_eq!(wins_losses(GameId::Naval), Some((16, 5)));
}

#[test]
fn test_active_matches_cover_every_game() {
    let matches = sample_active_matches();
    assert_eq!(matches.len(), GameId::ALL.len());
    for game in GameId::ALL {
        assert!(matches.iter().any(|m| *m.game() == game), "{game}");
    }
    let pong = &matches[0];
    assert_eq!(pong.opponent(), "Kenny");
    assert!(*pong.my_turn());
    assert_eq!((*pong.my_score(), *pong.opponent_score()), (3, 2));
    assert!(matches.iter().any(|m| !*m.my_turn()));
}

#[test]
fn test_global_stats() {
    let stats = sample_global_stats();
    assert_eq!((*stats.wins(), *stats.losses()), (89, 34));
    assert!(stats.current_streak() <= stats.best_streak());
    assert!((stats.win_rate() - 89.0 / 123.0 * 100.0).abs() < 1e-9);
}

#[test]
fn test_rivalries() {
    let rivalries = sample_rivalries();
    let names: Vec<&str> = rivalries.iter().map(|r| r.opponent().as_str()).collect();
    assert_eq!(names, ["Kenny", "Léa", "Sandy"]);
    assert!(rivalries.iter().all(|r| r.is_ahead()));
}

#[test]
fn test_recent_results() {
    let recent = sample_recent_results();
    let outcomes: Vec<(GameId, bool)> = recent.iter().map(|r| (*r.game(), r.won())).collect();
    assert_eq!(
        outcomes,
        [
            (GameId::Pong, true),
            (GameId::Thunder, false),
            (GameId::Naval, true)
        ]
    );
}
