use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::app::{
    local_hour,
    state::{greeting, AppState, HOME_SONGS, MAX_ALBUM_CARDS},
};
use super::super::{make_block, theme::*};
use super::{album_item, song_item};

pub fn render_home(f: &mut Frame, area: Rect, state: &AppState) {
    let album_rows = state.home.albums.len().clamp(1, MAX_ALBUM_CARDS) as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),          // greeting
            Constraint::Length(album_rows), // mood albums
            Constraint::Min(0),             // recommended songs
        ])
        .split(area);

    render_greeting(f, chunks[0], state);
    render_albums(f, chunks[1], state);
    render_songs(f, chunks[2], state);
}

fn render_greeting(f: &mut Frame, area: Rect, state: &AppState) {
    let theme = state.mood.color_theme();
    let mood_line = match state.mood.current.as_ref() {
        Some(m) => Line::from(vec![
            Span::styled("  Current mood: ", dim_style()),
            Span::styled(format!("{} {}", m.mood.icon(), m.mood), mood_title_style(theme)),
            Span::styled("   [i] describe your mood  [R] surprise me", muted_style()),
        ]),
        None => Line::from(Span::styled("  Press [i] to tell us how you feel", muted_style())),
    };
    let lines = vec![
        Line::from(Span::styled(format!("  {}", greeting(local_hour())), mood_title_style(theme))),
        mood_line,
    ];
    f.render_widget(Paragraph::new(lines).block(make_block(" 🏠 Home ", false)), area);
}

fn render_albums(f: &mut Frame, area: Rect, state: &AppState) {
    let title = match state.mood.current_mood() {
        Some(mood) => format!(" 💿 {mood} albums "),
        None => " 💿 Albums ".to_string(),
    };

    if state.home.loading_albums && state.home.albums.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled("  ⠋ Loading albums...", dim_style())))
            .block(make_block(&title, false));
        f.render_widget(para, area);
        return;
    }

    if state.home.albums.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled("  No albums for this mood.", muted_style())))
            .block(make_block(&title, false));
        f.render_widget(para, area);
        return;
    }

    let selected = state.home.selected;
    let items: Vec<ListItem> = state
        .home
        .albums
        .iter()
        .take(MAX_ALBUM_CARDS)
        .enumerate()
        .map(|(i, album)| album_item(album, i == selected))
        .collect();

    let focused = selected < state.home.albums.len().min(MAX_ALBUM_CARDS);
    f.render_widget(List::new(items).block(make_block(&title, focused)), area);
}

fn render_songs(f: &mut Frame, area: Rect, state: &AppState) {
    let title = " ✨ Recommended for you ";
    let recs = &state.player.recommendations;

    if state.mood.loading_recommendations && recs.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  ✨ Finding songs for your mood...",
            dim_style(),
        )))
        .block(make_block(title, false));
        f.render_widget(para, area);
        return;
    }

    if recs.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  No recommendations yet. Pick a mood with [3].",
            muted_style(),
        )))
        .block(make_block(title, false));
        f.render_widget(para, area);
        return;
    }

    let offset = state.home.albums.len().min(MAX_ALBUM_CARDS);
    let selected = state.home.selected.checked_sub(offset);
    let items: Vec<ListItem> = recs
        .iter()
        .take(HOME_SONGS)
        .enumerate()
        .map(|(i, song)| song_item(i, song, selected == Some(i), state.player.is_current(&song.id)))
        .collect();

    f.render_widget(List::new(items).block(make_block(title, selected.is_some())), area);
}
