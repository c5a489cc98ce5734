pub mod album;
pub mod explore;
pub mod help;
pub mod home;
pub mod mood_screen;
pub mod player_bar;
pub mod queue;
pub mod sidebar;

use ratatui::{
    text::{Line, Span},
    widgets::ListItem,
};

use crate::{
    api::types::{Album, Song},
    app::state::truncate_str,
    player::format_time,
};
use super::theme::*;

/// One track row: number or cursor, title, artists and length.
/// The song that is currently loaded gets a ♪ marker.
pub(crate) fn song_item(index: usize, song: &Song, is_sel: bool, is_current: bool) -> ListItem<'static> {
    let prefix = if is_sel {
        "▶ ".to_string()
    } else if is_current {
        " ♪ ".to_string()
    } else {
        format!("{:>2}. ", index + 1)
    };
    let artist = song.artist_names();
    let title_style = if is_sel {
        selected_style()
    } else if is_current {
        playing_style()
    } else {
        normal_style()
    };
    let line = Line::from(vec![
        Span::styled(prefix, if is_sel { playing_style() } else { muted_style() }),
        Span::styled(truncate_str(&song.name, 48), title_style),
        Span::styled(" — ", muted_style()),
        Span::styled(truncate_str(&artist, 36), dim_style()),
        Span::styled(format!("  {}", format_time(song.duration_secs())), muted_style()),
    ]);
    if is_sel {
        ListItem::new(line).style(selected_style())
    } else {
        ListItem::new(line)
    }
}

/// One album row: name, artists and year.
pub(crate) fn album_item(album: &Album, is_sel: bool) -> ListItem<'static> {
    let year = album.year.as_deref().map(|y| format!("  {y}")).unwrap_or_default();
    let line = Line::from(vec![
        Span::styled(if is_sel { "▶ 💿 " } else { "  💿 " }, if is_sel { playing_style() } else { muted_style() }),
        Span::styled(truncate_str(&album.name, 48), if is_sel { selected_style() } else { normal_style() }),
        Span::styled(" — ", muted_style()),
        Span::styled(truncate_str(&album.artist_names(), 36), dim_style()),
        Span::styled(year, muted_style()),
    ]);
    if is_sel {
        ListItem::new(line).style(selected_style())
    } else {
        ListItem::new(line)
    }
}
