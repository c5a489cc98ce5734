use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::state::{format_total_duration, AppState};
use super::super::{make_block, theme::*};
use super::song_item;

pub fn render_album(f: &mut Frame, area: Rect, state: &AppState) {
    let album = &state.album;

    if album.is_loading {
        let para = Paragraph::new(Line::from(Span::styled("  ⠋ Loading album...", dim_style())))
            .block(make_block(" 💿 Album ", true));
        f.render_widget(para, area);
        return;
    }

    let Some(details) = album.details.as_ref() else {
        let para = Paragraph::new(vec![
            Line::from(Span::styled("  Could not load this album.", error_style())),
            Line::from(Span::styled("  Press Esc to go back.", muted_style())),
        ])
        .block(make_block(" 💿 Album ", false));
        f.render_widget(para, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // header
            Constraint::Min(0),    // tracks
        ])
        .split(area);

    // ── Header ────────────────────────────────────────────────────────────
    let info = &details.album;
    let mut facts = vec![format!("{} songs", details.songs.len())];
    facts.push(format_total_duration(details.total_duration_secs()));
    if let Some(year) = info.year.as_deref() {
        facts.push(year.to_string());
    }
    if let Some(language) = info.language.as_deref().filter(|l| !l.is_empty()) {
        facts.push(language.to_string());
    }

    let mut lines = vec![
        Line::from(Span::styled(format!("  {}", info.name), hot_pink_style())),
        Line::from(Span::styled(format!("  {}", info.artist_names()), dim_style())),
        Line::from(Span::styled(format!("  {}", facts.join(" · ")), muted_style())),
    ];
    if let Some(cover) = info.image_url("500x500") {
        lines.push(Line::from(Span::styled(format!("  cover: {cover}"), muted_style())));
    }
    let header = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(make_block(" 💿 Album · Esc back ", false));
    f.render_widget(header, chunks[0]);

    // ── Tracks ────────────────────────────────────────────────────────────
    if details.songs.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled("  This album has no songs.", muted_style())))
            .block(make_block(" Tracks ", true));
        f.render_widget(para, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = details
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| song_item(i, song, i == album.selected, state.player.is_current(&song.id)))
        .collect();

    let list = List::new(items).block(make_block(&format!(" Tracks ({}) ", details.songs.len()), true));
    let mut list_state = ListState::default().with_selected(Some(album.selected));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}
