use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::{
    app::state::AppState,
    player::{PlaybackState, PlayerStatus},
};
use super::super::theme::*;

/// Partial blocks for the one-row EQ, indexed by bar height.
const BAR_BLOCKS: &[&str] = &[" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Low rows take the mood color, peaks run hot.
fn level_color(level: u8, base: Color) -> Color {
    match level {
        9.. => ERROR,
        6..=8 => HOT_PINK,
        3..=5 => PRIMARY,
        _ => base,
    }
}

pub fn render_player_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(mood_color(state.mood.color_theme())))
        .style(normal_style());

    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.eq_expanded {
        render_expanded(f, inner, state);
    } else {
        render_compact(f, inner, state);
    }
}

/// Track info, a single-row EQ with the progress gauge, and key hints.
fn render_compact(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(45),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_track_info(f, chunks[0], state);

    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(chunks[1]);

    let base = mood_color(state.mood.color_theme());
    let eq_spans: Vec<Span> = state
        .eq_bars
        .iter()
        .map(|&h| {
            let ch = BAR_BLOCKS[(h as usize).min(BAR_BLOCKS.len() - 1)];
            Span::styled(ch, Style::default().fg(level_color(h, base)))
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(eq_spans)).alignment(Alignment::Center), center[0]);

    render_progress(f, center[1], state);

    let controls = Paragraph::new(vec![
        Line::from(Span::styled("⏮ p  ⏯ spc  ⏭ n", dim_style())),
        Line::from(Span::styled("+ vol -  m mute  e EQ  ? help", muted_style())),
    ])
    .alignment(Alignment::Right);
    f.render_widget(controls, chunks[2]);
}

/// Big vertical EQ between the track info and the key hints.
fn render_expanded(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(55),
            Constraint::Percentage(20),
        ])
        .split(area);

    render_track_info(f, chunks[0], state);

    let eq_rows = chunks[1].height.saturating_sub(2).min(12) as u8;
    let center = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(eq_rows as u16), Constraint::Min(0)])
        .split(chunks[1]);

    let base = mood_color(state.mood.color_theme());
    let bar_count = state.eq_bars.len().min(center[0].width as usize / 2);
    let lines: Vec<Line> = (0..eq_rows)
        .map(|row| {
            let level = eq_rows - 1 - row;
            let spans: Vec<Span> = state.eq_bars[..bar_count]
                .iter()
                .map(|&h| {
                    if h > level {
                        Span::styled("█ ", Style::default().fg(level_color(level, base)))
                    } else {
                        Span::raw("  ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), center[0]);

    render_progress(f, center[1], state);

    let hints: Vec<Line> = [
        ("p", "⏮ prev"),
        ("spc", "⏯ play"),
        ("n", "⏭ next"),
        ("f/r", "seek"),
        ("+/-", "volume"),
        ("m", "mute"),
        ("e", "min EQ"),
        ("q", "quit"),
    ]
    .iter()
    .map(|(key, label)| {
        Line::from(vec![
            Span::styled(format!("{label} "), dim_style()),
            Span::styled(format!("{key:>3}"), accent_style()),
        ])
    })
    .collect();
    let pad = chunks[2].height.saturating_sub(hints.len() as u16) / 2;
    let hint_area = Rect {
        y: chunks[2].y + pad,
        height: chunks[2].height.saturating_sub(pad),
        ..chunks[2]
    };
    f.render_widget(Paragraph::new(hints).alignment(Alignment::Right), hint_area);
}

fn render_progress(f: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let percent = (state.player.progress_percent() * 100.0) as u16;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(mood_color(state.mood.color_theme())).bg(SURFACE))
        .percent(percent.min(100))
        .label("");
    f.render_widget(gauge, rows[0]);

    let time_label = Paragraph::new(Line::from(Span::styled(
        state.player.progress_formatted(),
        dim_style(),
    )))
    .alignment(Alignment::Center);
    f.render_widget(time_label, rows[1]);
}

fn render_track_info(f: &mut Frame, area: Rect, state: &AppState) {
    let player = &state.player;
    let Some(song) = player.current.as_ref() else {
        let idle = Paragraph::new(vec![
            Line::from(Span::styled("⏹ Nothing playing", muted_style())),
            Line::from(Span::styled("Pick a song and press Enter", muted_style())),
        ]);
        f.render_widget(idle, area);
        return;
    };

    let play_icon = match player.state {
        PlaybackState::Playing => "▶",
        PlaybackState::Paused => "⏸",
        PlaybackState::Idle => "⏹",
    };
    let buffering = matches!(player.last_status, Some(PlayerStatus::Buffering)) && player.is_playing();
    let (vol_icon, vol_style) = if player.muted || player.volume == 0 {
        ("🔇", error_style())
    } else {
        ("🔊", muted_style())
    };

    let title_display = state.get_display_title(area.width.saturating_sub(6) as usize);
    let artist = song.artist_names();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{play_icon} "), playing_style()),
            Span::styled(title_display, normal_style().add_modifier(ratatui::style::Modifier::BOLD)),
            Span::styled(format!(" {vol_icon}"), vol_style),
        ]),
        Line::from(Span::styled(
            if artist.is_empty() { "—".to_string() } else { artist },
            dim_style(),
        )),
    ];

    if buffering {
        lines.push(Line::from(Span::styled("⠋ buffering...", gold_style())));
    } else if area.height >= 3 && !song.album.name.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("💿 {}", song.album.name),
            muted_style(),
        )));
    }

    let info_para = Paragraph::new(lines).alignment(Alignment::Left);
    f.render_widget(info_para, area);
}
