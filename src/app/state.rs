use unicode_width::UnicodeWidthChar;

use crate::{
    api::types::{Album, AlbumDetails, Song},
    mood::{Mood, MoodResult},
    player::PlayerState,
};

/// Albums shown on the home screen and in search results.
pub const MAX_ALBUM_CARDS: usize = 8;
/// Recommended songs shown on the home screen.
pub const HOME_SONGS: usize = 5;
/// Songs shown in search results.
pub const MAX_SEARCH_SONGS: usize = 10;
/// Shortest query the debounced search fires for.
pub const MIN_QUERY_CHARS: usize = 2;

pub const MOOD_ANALYSIS_FAILED: &str = "Failed to analyze mood. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveScreen {
    #[default]
    Home,
    Explore,
    Mood,
    Queue,
    Album,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum SearchFilter {
    #[default]
    All,
    Songs,
    Albums,
}

impl SearchFilter {
    pub fn cycle(self) -> Self {
        match self {
            SearchFilter::All => SearchFilter::Songs,
            SearchFilter::Songs => SearchFilter::Albums,
            SearchFilter::Albums => SearchFilter::All,
        }
    }

    pub fn wants_songs(self) -> bool {
        matches!(self, SearchFilter::All | SearchFilter::Songs)
    }

    pub fn wants_albums(self) -> bool {
        matches!(self, SearchFilter::All | SearchFilter::Albums)
    }
}

/// One selectable row in a mixed album/song list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    Album(&'a Album),
    Song(&'a Song),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub filter: SearchFilter,
    pub songs: Vec<Song>,
    pub albums: Vec<Album>,
    pub selected: usize,
    pub is_editing: bool,
    pub is_searching: bool,
    /// Query the current results belong to.
    pub searched_query: Option<String>,
}

impl SearchState {
    pub fn query_is_searchable(&self) -> bool {
        self.query.trim().chars().count() >= MIN_QUERY_CHARS
    }

    /// Albums first, then songs, filtered and capped the way they are shown.
    pub fn entries(&self) -> Vec<Entry<'_>> {
        let mut entries = Vec::new();
        if self.filter.wants_albums() {
            entries.extend(self.albums.iter().take(MAX_ALBUM_CARDS).map(Entry::Album));
        }
        if self.filter.wants_songs() {
            entries.extend(self.songs.iter().take(MAX_SEARCH_SONGS).map(Entry::Song));
        }
        entries
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoodFocus {
    #[default]
    Cards,
    Tracks,
}

#[derive(Debug, Clone, Default)]
pub struct MoodState {
    pub current: Option<MoodResult>,
    pub loading: bool,
    pub error: Option<String>,
    pub input: String,
    pub is_editing: bool,
    pub focus: MoodFocus,
    pub selected_card: usize,
    pub selected_track: usize,
    pub loading_recommendations: bool,
}

impl MoodState {
    pub fn current_mood(&self) -> Option<Mood> {
        self.current.as_ref().map(|m| m.mood)
    }

    pub fn color_theme(&self) -> &'static str {
        self.current.as_ref().map(|m| m.color_theme).unwrap_or("primary")
    }
}

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub albums: Vec<Album>,
    pub loading_albums: bool,
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct QueueState {
    pub selected: usize,
}

#[derive(Debug, Clone, Default)]
pub struct AlbumState {
    pub album_id: Option<String>,
    pub details: Option<AlbumDetails>,
    pub selected: usize,
    pub is_loading: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Notification {
    pub message: String,
    pub remaining_ticks: u8,
    pub is_error: bool,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), remaining_ticks: 30, is_error: false }
    }
    pub fn error(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), remaining_ticks: 40, is_error: true }
    }
}

pub struct AppState {
    pub active_screen: ActiveScreen,
    pub previous_screen: Option<ActiveScreen>,
    pub mood: MoodState,
    pub player: PlayerState,
    pub search: SearchState,
    pub home: HomeState,
    pub queue: QueueState,
    pub album: AlbumState,
    pub notification: Option<Notification>,
    pub show_help: bool,
    pub should_quit: bool,
    pub eq_bars: [u8; 24],
    pub eq_tick: u64,
    pub eq_expanded: bool,
    pub ticker_offset: usize,
    pub ticker_tick: u64,
}

impl Default for AppState {
    fn default() -> Self {
        AppState {
            active_screen: ActiveScreen::Home,
            previous_screen: None,
            mood: MoodState::default(),
            player: PlayerState::default(),
            search: SearchState::default(),
            home: HomeState::default(),
            queue: QueueState::default(),
            album: AlbumState::default(),
            notification: None,
            show_help: false,
            should_quit: false,
            eq_bars: [4, 6, 8, 5, 7, 9, 4, 6, 8, 5, 7, 6, 4, 8, 5, 7, 9, 3, 6, 8, 5, 7, 4, 6],
            eq_tick: 0,
            eq_expanded: false,
            ticker_offset: 0,
            ticker_tick: 0,
        }
    }
}

impl AppState {
    pub fn navigate_to(&mut self, screen: ActiveScreen) {
        if self.active_screen != screen {
            self.previous_screen = Some(self.active_screen);
            self.active_screen = screen;
        }
    }

    /// Any text field currently capturing keystrokes.
    pub fn input_active(&self) -> bool {
        self.search.is_editing || self.mood.is_editing
    }

    /// Albums first, then the top recommendations.
    pub fn home_entries(&self) -> Vec<Entry<'_>> {
        self.home
            .albums
            .iter()
            .take(MAX_ALBUM_CARDS)
            .map(Entry::Album)
            .chain(
                self.player
                    .recommendations
                    .iter()
                    .take(HOME_SONGS)
                    .map(Entry::Song),
            )
            .collect()
    }

    /// The entry under the cursor on the active screen.
    pub fn selected_entry(&self) -> Option<Entry<'_>> {
        match self.active_screen {
            ActiveScreen::Home => self.home_entries().get(self.home.selected).copied(),
            ActiveScreen::Explore => self.search.entries().get(self.search.selected).copied(),
            ActiveScreen::Mood => match self.mood.focus {
                MoodFocus::Tracks => self
                    .player
                    .recommendations
                    .get(self.mood.selected_track)
                    .map(Entry::Song),
                MoodFocus::Cards => None,
            },
            ActiveScreen::Queue => self.player.queue.get(self.queue.selected).map(Entry::Song),
            ActiveScreen::Album => self
                .album
                .details
                .as_ref()
                .and_then(|d| d.songs.get(self.album.selected))
                .map(Entry::Song),
        }
    }

    pub fn selected_song(&self) -> Option<&Song> {
        match self.selected_entry()? {
            Entry::Song(song) => Some(song),
            Entry::Album(_) => None,
        }
    }

    pub fn set_notification(&mut self, n: Notification) {
        self.notification = Some(n);
    }

    pub fn tick_notification(&mut self) {
        if let Some(ref mut n) = self.notification {
            if n.remaining_ticks > 0 {
                n.remaining_ticks -= 1;
            } else {
                self.notification = None;
            }
        }
    }

    pub fn update_eq_bars(&mut self) {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        self.eq_tick += 1;
        if self.player.is_playing() {
            for bar in self.eq_bars.iter_mut() {
                let delta: i8 = rng.gen_range(-3..=3);
                *bar = (*bar as i8 + delta).clamp(1, 12) as u8;
            }
        } else {
            for bar in self.eq_bars.iter_mut() {
                if *bar > 1 {
                    *bar -= 1;
                }
            }
        }
    }

    pub fn tick_ticker(&mut self) {
        self.ticker_tick += 1;
        if self.ticker_tick % 5 == 0 {
            let len = self.current_title().chars().count().max(1);
            self.ticker_offset = (self.ticker_offset + 1) % len;
        }
    }

    pub fn current_title(&self) -> &str {
        self.player.current.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Title that fits `max_width` columns, scrolling like a marquee when it does not.
    pub fn get_display_title(&self, max_width: usize) -> String {
        let title = self.current_title();
        if display_width(title) <= max_width {
            return title.to_string();
        }
        let padded = format!("{title}   ");
        let chars: Vec<char> = padded.chars().collect();
        let offset = self.ticker_offset % chars.len();
        let rotated = chars[offset..].iter().chain(chars[..offset].iter()).copied();
        take_width(rotated, max_width)
    }
}

pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| c.width().unwrap_or(0)).sum()
}

fn take_width(chars: impl Iterator<Item = char>, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in chars {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

/// Shortens `s` to at most `max_width` columns, ending in "…" when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let mut out = take_width(s.chars(), max_width.saturating_sub(1));
    out.push('…');
    out
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good morning",
        12..=17 => "Good afternoon",
        _ => "Good evening",
    }
}

/// "1 hr 5 min" or "42 min".
pub fn format_total_duration(total_secs: u32) -> String {
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    if hours > 0 {
        format!("{hours} hr {mins} min")
    } else {
        format!("{mins} min")
    }
}
