//! Shared layout helpers and widgets for the hub screens.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::games::geometry::{Point, SURFACE_MAX};
use crate::games::match_state::MatchState;
use crate::theme::ThemeContext;

/// A glyph drawn at a point of the play surface.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    /// Position in percentage space.
    pub at: Point,
    /// Character drawn.
    pub glyph: char,
    /// Style of the character.
    pub style: Style,
}

impl Mark {
    /// Creates a mark.
    pub fn new(at: Point, glyph: char, style: Style) -> Self {
        Self { at, glyph, style }
    }
}

/// Centers a `width`×`height` rectangle inside `area`.
pub fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

/// Splits the frame into title, body and help rows.
pub fn frame_rows(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Renders a bordered, centered title.
pub fn render_title(frame: &mut Frame, area: Rect, title: &str, theme: &ThemeContext) {
    let widget = Paragraph::new(title)
        .style(theme.title())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(theme.accent()));
    frame.render_widget(widget, area);
}

/// Renders the key help bar.
pub fn render_help(frame: &mut Frame, area: Rect, help: &str) {
    let widget = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(widget, area);
}

/// One-line score summary.
pub fn scoreline(state: &MatchState, me: &str, opponent: &str) -> String {
    format!(
        "{me} {}  -  {} {opponent}   Round {}   Turn: {}",
        state.my_score(),
        state.opponent_score(),
        state.round(),
        state.turn_owner()
    )
}

/// Rasterizes `marks` onto a `width`×`height` character grid.
///
/// Later marks overwrite earlier ones in the same cell.
pub fn plot(width: u16, height: u16, marks: &[Mark]) -> Vec<Line<'static>> {
    let (w, h) = (usize::from(width.max(1)), usize::from(height.max(1)));
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', Style::default()); w]; h];
    for mark in marks {
        let col = scale(mark.at.x, w);
        let row = scale(mark.at.y, h);
        grid[row][col] = (mark.glyph, mark.style);
    }
    grid.into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|(glyph, style)| Span::styled(glyph.to_string(), style))
                    .collect::<Vec<_>>(),
            )
        })
        .collect()
}

fn scale(value: f64, cells: usize) -> usize {
    let clamped = value.clamp(0.0, SURFACE_MAX);
    ((clamped / SURFACE_MAX) * (cells - 1) as f64).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_maps_corners() {
        let marks = [
            Mark::new(Point::new(0.0, 0.0), 'a', Style::default()),
            Mark::new(Point::new(100.0, 100.0), 'z', Style::default()),
        ];
        let lines = plot(11, 5, &marks);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].spans[0].content, "a");
        assert_eq!(lines[4].spans[10].content, "z");
    }

    #[test]
    fn test_plot_clamps_off_surface_marks() {
        let marks = [Mark::new(Point::new(140.0, -20.0), 'x', Style::default())];
        let lines = plot(4, 3, &marks);
        assert_eq!(lines[0].spans[3].content, "x");
    }
}
