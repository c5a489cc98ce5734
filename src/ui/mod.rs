pub mod components;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::state::{display_width, ActiveScreen, AppState};
use self::theme::*;
use self::components::{
    album::render_album,
    explore::render_explore,
    help::render_help,
    home::render_home,
    mood_screen::render_mood,
    player_bar::render_player_bar,
    queue::render_queue,
    sidebar::render_sidebar,
};

/// Root render function, called every frame.
pub fn render(f: &mut Frame, state: &AppState) {
    let size = f.area();

    // ── Screen above, player bar below ──────────────────────────────────
    let player_height = if state.eq_expanded { 15 } else { 5 };
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                     // top: sidebar + main
            Constraint::Length(player_height),       // bottom: player bar
        ])
        .split(size);

    // ── Sidebar and the active screen ────────────────────────────────────
    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26), // sidebar
            Constraint::Min(0),     // main content
        ])
        .split(main_chunks[0]);

    render_sidebar(f, top_chunks[0], state);

    match &state.active_screen {
        ActiveScreen::Home    => render_home(f, top_chunks[1], state),
        ActiveScreen::Explore => render_explore(f, top_chunks[1], state),
        ActiveScreen::Mood    => render_mood(f, top_chunks[1], state),
        ActiveScreen::Queue   => render_queue(f, top_chunks[1], state),
        ActiveScreen::Album   => render_album(f, top_chunks[1], state),
    }

    render_player_bar(f, main_chunks[1], state);

    // ── Overlays ─────────────────────────────────────────────────────────
    if state.show_help {
        render_help(f, size, state);
    }

    if let Some(ref notif) = state.notification {
        render_notification(f, size, notif.is_error, &notif.message);
    }
}

/// Bottom-right toast for the latest notification.
fn render_notification(f: &mut Frame, area: Rect, is_error: bool, message: &str) {
    let toast_width = (display_width(message).min(60) as u16 + 6).min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(8),
        width: toast_width,
        height: 3.min(area.height),
    };

    f.render_widget(Clear, toast_area);

    let style = if is_error { error_style() } else { playing_style() };
    let icon = if is_error { "✖ " } else { "✔ " };

    let para = Paragraph::new(Line::from(vec![
        Span::styled(icon, style),
        Span::styled(message.to_string(), style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(normal_style().bg(BG_ALT)),
    )
    .alignment(Alignment::Left);

    f.render_widget(para, toast_area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

/// Standard rounded panel used by every screen.
pub(crate) fn make_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_string(), title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .style(normal_style().bg(BG))
}
