use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::{
    app::state::{AppState, MoodFocus},
    mood::all_moods,
};
use super::super::{make_block, theme::*};
use super::song_item;

pub fn render_mood(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // mood input
            Constraint::Length(3), // status / confidence
            Constraint::Min(0),    // cards + recommendations
        ])
        .split(area);

    render_input(f, chunks[0], state);
    render_status(f, chunks[1], state);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    render_cards(f, cols[0], state);
    render_recommendations(f, cols[1], state);
}

fn render_input(f: &mut Frame, area: Rect, state: &AppState) {
    let editing = state.mood.is_editing;
    let cursor = if editing && (state.eq_tick / 5) % 2 == 0 { "│" } else { "" };
    let block = Block::default()
        .title(Span::styled(" 💭 How are you feeling? ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(editing))
        .style(normal_style().bg(BG_ALT));

    let line = if state.mood.input.is_empty() && !editing {
        Line::from(Span::styled(
            " Press [i] and describe your day, Enter to analyze...",
            muted_style(),
        ))
    } else {
        Line::from(vec![
            Span::styled(" ", muted_style()),
            Span::styled(state.mood.input.clone(), accent_style()),
            Span::styled(cursor, hot_pink_style()),
        ])
    };
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    if state.mood.loading {
        let para = Paragraph::new(Line::from(Span::styled("  ⠋ Analyzing your mood...", dim_style())));
        f.render_widget(para, area);
        return;
    }

    if let Some(ref err) = state.mood.error {
        let para = Paragraph::new(Line::from(Span::styled(format!("  ✖ {err}"), error_style())));
        f.render_widget(para, area);
        return;
    }

    let Some(current) = state.mood.current.as_ref() else {
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let color = mood_color(current.color_theme);
    let header = Line::from(vec![
        Span::styled(format!("  {} {} ", current.mood.icon(), current.mood), mood_title_style(current.color_theme)),
        Span::styled(current.related_genres.join(" · "), dim_style()),
    ]);
    f.render_widget(Paragraph::new(header), rows[0]);

    let confidence = (current.confidence.clamp(0.0, 1.0) * 100.0).round() as u16;
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(color).bg(SURFACE))
        .percent(confidence)
        .label(Span::styled(format!("confidence {confidence}%"), normal_style()));
    let gauge_area = Rect { x: rows[1].x + 2, width: rows[1].width.saturating_sub(4), ..rows[1] };
    f.render_widget(gauge, gauge_area);
}

fn render_cards(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.mood.focus == MoodFocus::Cards && !state.mood.is_editing;
    let current = state.mood.current_mood();

    let items: Vec<ListItem> = all_moods()
        .into_iter()
        .enumerate()
        .map(|(i, card)| {
            let is_sel = focused && i == state.mood.selected_card;
            let is_active = current == Some(card.mood);
            let marker = if is_active { " ●" } else { "" };
            let name_style = if is_sel { selected_style() } else { mood_title_style(card.color_theme) };
            let line = Line::from(vec![
                Span::styled(if is_sel { "▶ " } else { "  " }, playing_style()),
                Span::styled(format!("{} {}", card.mood.icon(), card.mood), name_style),
                Span::styled(marker, Style::default().fg(mood_color(card.color_theme))),
            ]);
            let genres = Line::from(Span::styled(
                format!("    {}", card.related_genres.join(", ")),
                if is_sel { dim_style().bg(SURFACE_SEL) } else { muted_style() },
            ));
            let item = ListItem::new(vec![line, genres]);
            if is_sel {
                item.style(selected_style())
            } else {
                item
            }
        })
        .collect();

    f.render_widget(List::new(items).block(make_block(" 🎨 Moods ", focused)), area);
}

fn render_recommendations(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.mood.focus == MoodFocus::Tracks && !state.mood.is_editing;
    let recs = &state.player.recommendations;

    if state.mood.loading_recommendations && recs.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  ✨ Generating your mood recommendations...",
            dim_style(),
        )))
        .block(make_block(" ✨ Recommendations ", focused));
        f.render_widget(para, area);
        return;
    }

    if recs.is_empty() {
        let para = Paragraph::new(vec![
            Line::from(Span::styled("  Pick a mood card and press", muted_style())),
            Line::from(Span::styled("  Enter to get recommendations!", accent_style())),
        ])
        .block(make_block(" ✨ Recommendations ", focused));
        f.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = recs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            song_item(i, song, focused && i == state.mood.selected_track, state.player.is_current(&song.id))
        })
        .collect();

    let title = format!(" ✨ Recommendations ({}) · Tab to switch ", recs.len());
    f.render_widget(List::new(items).block(make_block(&title, focused)), area);
}
