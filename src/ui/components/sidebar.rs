use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::state::{truncate_str, ActiveScreen, AppState};
use super::super::theme::*;

const NAV_ITEMS: &[(&str, &str, ActiveScreen)] = &[
    ("1", "🏠  Home", ActiveScreen::Home),
    ("2", "󰍉  Explore", ActiveScreen::Explore),
    ("3", "🎨  Mood", ActiveScreen::Mood),
    ("4", "🎵  Queue", ActiveScreen::Queue),
];

pub fn render_sidebar(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(Span::styled(" 🌊 moodwave ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(false))
        .style(normal_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // tagline
            Constraint::Length(NAV_ITEMS.len() as u16 + 1),
            Constraint::Length(1), // separator
            Constraint::Length(5), // mood
            Constraint::Min(0),    // now playing
            Constraint::Length(2), // volume
        ])
        .split(inner);

    let tagline = Paragraph::new(Line::from(vec![
        Span::styled(" music for your ", dim_style()),
        Span::styled("mood", hot_pink_style()),
    ]));
    f.render_widget(tagline, chunks[0]);

    // ── Nav items ──────────────────────────────────────
    // The album view hangs off whichever screen opened it.
    let highlighted = if state.active_screen == ActiveScreen::Album {
        state.previous_screen.unwrap_or(ActiveScreen::Explore)
    } else {
        state.active_screen
    };
    let items: Vec<ListItem> = NAV_ITEMS
        .iter()
        .map(|(key, label, screen)| {
            let is_active = highlighted == *screen;
            let style = if is_active {
                Style::default().fg(BG).bg(HOT_PINK).add_modifier(Modifier::BOLD)
            } else {
                normal_style()
            };
            let line = Line::from(vec![
                Span::styled(if is_active { " ▶ " } else { "   " }, style),
                Span::styled(format!("[{key}] {label}"), style),
                Span::styled(" ".repeat(inner.width.saturating_sub(16) as usize), style),
            ]);
            ListItem::new(line)
        })
        .collect();
    f.render_widget(List::new(items), chunks[1]);

    let sep_width = chunks[2].width.saturating_sub(4) as usize;
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!("  {}", "─".repeat(sep_width)), muted_style()))),
        chunks[2],
    );

    render_mood_summary(f, chunks[3], state);
    render_now_playing(f, chunks[4], state);
    render_volume(f, chunks[5], state);
}

fn render_mood_summary(f: &mut Frame, area: Rect, state: &AppState) {
    let Some(current) = state.mood.current.as_ref() else {
        let para = Paragraph::new(vec![
            Line::from(Span::styled("  Mood", accent_style())),
            Line::from(Span::styled("    not set", muted_style())),
        ]);
        f.render_widget(para, area);
        return;
    };

    let lines = vec![
        Line::from(Span::styled("  Mood", accent_style())),
        Line::from(Span::styled(
            format!("    {} {}", current.mood.icon(), current.mood),
            mood_title_style(current.color_theme),
        )),
        Line::from(Span::styled(format!("    {}", current.related_genres.join(", ")), dim_style())),
    ];
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_now_playing(f: &mut Frame, area: Rect, state: &AppState) {
    if area.height < 3 {
        return;
    }

    let mut lines = vec![Line::from(Span::styled("  ♪ Now Playing", accent_style()))];
    match state.player.current.as_ref() {
        Some(song) => {
            let icon = if state.player.is_playing() { "▶" } else { "⏸" };
            lines.push(Line::from(vec![
                Span::styled(format!("  {icon} "), playing_style()),
                Span::styled(
                    truncate_str(&song.name, area.width.saturating_sub(6) as usize),
                    normal_style().add_modifier(Modifier::BOLD),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                format!("    {}", truncate_str(&song.artist_names(), area.width.saturating_sub(5) as usize)),
                dim_style(),
            )));
        }
        None => lines.push(Line::from(Span::styled("    No track", muted_style()))),
    }

    let queued = state.player.queue.len();
    if queued > 0 {
        lines.push(Line::from(Span::raw("")));
        lines.push(Line::from(Span::styled(format!("  {queued} queued"), gold_style())));
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn render_volume(f: &mut Frame, area: Rect, state: &AppState) {
    let player = &state.player;
    let vol = player.effective_volume();
    let bar_width = area.width.saturating_sub(12) as usize;
    let filled = ((vol as f64 / 100.0) * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);

    let (icon, label) = if player.muted {
        (" 🔇 ", " mute".to_string())
    } else {
        (" 🔊 ", format!(" {:3}%", vol))
    };

    let line = Line::from(vec![
        Span::styled(icon, accent_style()),
        Span::styled("█".repeat(filled), playing_style()),
        Span::styled("░".repeat(empty), muted_style()),
        Span::styled(label, if player.muted { error_style() } else { dim_style() }),
    ]);
    f.render_widget(Paragraph::new(vec![Line::from(Span::raw("")), line]), area);
}
