use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::{AppState, SearchFilter, MAX_ALBUM_CARDS, MAX_SEARCH_SONGS};
use super::super::{make_block, theme::*};
use super::{album_item, song_item};

const FILTERS: [SearchFilter; 3] = [SearchFilter::All, SearchFilter::Songs, SearchFilter::Albums];

pub fn render_explore(f: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Length(1), // filter tabs
            Constraint::Min(0),    // results
        ])
        .split(area);

    // ── Search input box ──────────────────────────────────────────────────
    let input_focused = state.search.is_editing;
    let cursor = if input_focused && (state.eq_tick / 5) % 2 == 0 { "│" } else { "" };
    let input_block = Block::default()
        .title(Span::styled(" 󰍉 Explore ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(input_focused))
        .style(normal_style().bg(BG_ALT));

    let input_text = if state.search.query.is_empty() && !input_focused {
        Paragraph::new(Line::from(Span::styled(
            " Press [s] and type a song, artist or album...",
            muted_style(),
        )))
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(" ", muted_style()),
            Span::styled(state.search.query.clone(), accent_style()),
            Span::styled(cursor, hot_pink_style()),
        ]))
    };
    f.render_widget(input_text.block(input_block), chunks[0]);

    // ── Filter tabs ───────────────────────────────────────────────────────
    let mut tabs = vec![Span::styled("  ", muted_style())];
    for filter in FILTERS {
        let style = if filter == state.search.filter { header_style() } else { dim_style() };
        tabs.push(Span::styled(format!(" {filter} "), style));
        tabs.push(Span::raw(" "));
    }
    tabs.push(Span::styled(" Tab to switch", muted_style()));
    f.render_widget(Paragraph::new(Line::from(tabs)), chunks[1]);

    // ── Results ───────────────────────────────────────────────────────────
    let search = &state.search;
    let entries = search.entries();
    if entries.is_empty() {
        let placeholder = if search.query.trim().is_empty() {
            "  Search for songs, artists or albums.".to_string()
        } else if !search.query_is_searchable() && search.searched_query.is_none() {
            "  Keep typing...".to_string()
        } else if search.is_searching {
            "  Searching...".to_string()
        } else {
            format!("  No results for \"{}\".", search.query.trim())
        };
        let para = Paragraph::new(Line::from(Span::styled(placeholder, muted_style())))
            .block(make_block(" Results ", false));
        f.render_widget(para, chunks[2]);
        return;
    }

    let album_count = if search.filter.wants_albums() {
        search.albums.len().min(MAX_ALBUM_CARDS)
    } else {
        0
    };
    let song_count = if search.filter.wants_songs() {
        search.songs.len().min(MAX_SEARCH_SONGS)
    } else {
        0
    };

    let constraints: Vec<Constraint> = match (album_count, song_count) {
        (0, _) => vec![Constraint::Length(0), Constraint::Min(0)],
        (_, 0) => vec![Constraint::Min(0), Constraint::Length(0)],
        (a, _) => vec![Constraint::Length(a as u16 + 2), Constraint::Min(0)],
    };
    let result_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[2]);

    let selected = search.selected;
    let busy = if search.is_searching { " ⠋" } else { "" };

    if album_count > 0 {
        let items: Vec<ListItem> = search
            .albums
            .iter()
            .take(MAX_ALBUM_CARDS)
            .enumerate()
            .map(|(i, album)| album_item(album, !input_focused && i == selected))
            .collect();
        let title = format!(" 💿 Albums ({album_count}){busy} ");
        let focused = !input_focused && selected < album_count;
        f.render_widget(List::new(items).block(make_block(&title, focused)), result_chunks[0]);
    }

    if song_count > 0 {
        let song_selected = selected.checked_sub(album_count).filter(|_| !input_focused);
        let items: Vec<ListItem> = search
            .songs
            .iter()
            .take(MAX_SEARCH_SONGS)
            .enumerate()
            .map(|(i, song)| {
                song_item(i, song, song_selected == Some(i), state.player.is_current(&song.id))
            })
            .collect();
        let title = format!(" 🎵 Songs ({song_count}){busy} ");
        f.render_widget(
            List::new(items).block(make_block(&title, song_selected.is_some())),
            result_chunks[1],
        );
    }
}
