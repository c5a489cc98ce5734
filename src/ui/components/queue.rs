use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::{app::state::AppState, player::format_time};
use super::super::{make_block, theme::*};

pub fn render_queue(f: &mut Frame, area: Rect, state: &AppState) {
    let queue = &state.player.queue;

    if queue.is_empty() {
        let para = Paragraph::new(vec![
            Line::from(Span::styled(
                "  Queue is empty. Press [a] on any song to add it.",
                muted_style(),
            )),
            Line::from(Span::styled(
                "  With nothing queued, playback continues through your mood recommendations.",
                muted_style(),
            )),
        ])
        .block(make_block(" 🎵 Queue ", false));
        f.render_widget(para, area);
        return;
    }

    let selected = state.queue.selected;
    let rows: Vec<Row> = queue
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let is_sel = i == selected;
            let prefix = if i == 0 {
                "Next ▶".to_string()
            } else {
                format!("{}", i + 1)
            };
            let style = if is_sel {
                selected_style()
            } else if i == 0 {
                accent_style()
            } else {
                normal_style()
            };
            let num_style = if is_sel {
                playing_style()
            } else if i == 0 {
                accent_style()
            } else {
                muted_style()
            };
            Row::new(vec![
                Cell::from(prefix).style(num_style),
                Cell::from(song.name.clone()).style(style),
                Cell::from(song.artist_names()).style(dim_style()),
                Cell::from(format_time(song.duration_secs())).style(muted_style()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("#").style(header_style()),
        Cell::from("Title").style(header_style()),
        Cell::from("Artist").style(header_style()),
        Cell::from("Dur").style(header_style()),
    ]);

    let table = Table::new(
        rows,
        [
            Constraint::Length(7),
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(make_block(
        &format!(" 🎵 Queue ({} songs) · Enter play · x remove · c clear ", queue.len()),
        true,
    ))
    .row_highlight_style(selected_style());

    let mut table_state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut table_state);
}
