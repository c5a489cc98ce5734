use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use super::super::{centered_rect, theme::*};

pub fn render_help(f: &mut Frame, area: Rect, _state: &AppState) {
    let popup_area = centered_rect(64, 84, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(" ❓ Keybindings ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(border_style(true))
        .style(normal_style().bg(BG_ALT));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    let left = vec![
        section("Navigation"),
        key_line("↑ / k", "Move up"),
        key_line("↓ / j", "Move down"),
        key_line("Enter", "Play / open album"),
        key_line("Esc / b", "Back"),
        key_line("Tab", "Filter / focus"),
        Line::from(Span::raw("")),
        section("Playback"),
        key_line("Space", "Pause / Resume"),
        key_line("n", "Next track"),
        key_line("p", "Previous / restart"),
        key_line("f / →", "Seek +10s"),
        key_line("r / ←", "Seek -10s"),
        key_line("+ / =", "Volume up"),
        key_line("-", "Volume down"),
        key_line("m", "Mute"),
        key_line("o", "Open in browser"),
    ];

    let right = vec![
        section("Mood & search"),
        key_line("i", "Describe your mood"),
        key_line("R", "Random mood"),
        key_line("s / /", "Search"),
        Line::from(Span::raw("")),
        section("Queue"),
        key_line("a", "Add to queue"),
        key_line("x", "Remove from queue"),
        key_line("c", "Clear queue"),
        Line::from(Span::raw("")),
        section("Screens"),
        key_line("[1]", "Home"),
        key_line("[2]", "Explore"),
        key_line("[3]", "Mood"),
        key_line("[4]", "Queue"),
        Line::from(Span::raw("")),
        key_line("e", "Toggle big EQ"),
        key_line("?", "Toggle this help"),
        key_line("q", "Quit"),
    ];

    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(Paragraph::new(right), cols[1]);
}

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(format!("  {title}"), hot_pink_style().add_modifier(Modifier::BOLD)))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", muted_style()),
        Span::styled(format!("{key:<10}"), accent_style()),
        Span::styled(desc.to_string(), normal_style()),
    ])
}
