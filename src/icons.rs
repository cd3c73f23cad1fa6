//! Decorative glyphs for game cards.

use crate::games::GameId;

const PONG: &[&str] = &[
    r"  ___   ___  ",
    r" (   ) (   ) ",
    r"  \_/   \_/  ",
    r"      o      ",
];

const NAVAL: &[&str] = &[
    r"     |\      ",
    r"     | \     ",
    r"  ___|__\___ ",
    r"  \________/ ",
];

const THUNDER: &[&str] = &[
    r"      __/    ",
    r"  ___/_/_    ",
    r" [_______]=  ",
    r"  (o)(o)(o)  ",
];

const ARCHERY: &[&str] = &[
    r"   .-===-.   ",
    r"  / .---. \  ",
    r" | | (o)-+-->",
    r"  \ '---' /  ",
];

/// Static multi-line glyph for `game`. Every line has the same width.
pub fn game_icon(game: GameId) -> &'static [&'static str] {
    match game {
        GameId::Pong => PONG,
        GameId::Naval => NAVAL,
        GameId::Thunder => THUNDER,
        GameId::Archery => ARCHERY,
    }
}
