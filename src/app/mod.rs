pub mod debounce;
pub mod state;

use anyhow::{Context, Result};
use chrono::Timelike;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::{sync::Arc, time::Duration};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    api::{
        build_http_client,
        catalog::{Catalog, DEFAULT_LIMIT},
        gemini::Gemini,
        types::{Album, AlbumDetails, Song},
        youtube::VideoSearch,
    },
    app::{
        debounce::{sleep_until, Debouncer},
        state::{
            ActiveScreen, AlbumState, AppState, Entry, MoodFocus, Notification, SearchFilter,
            MAX_ALBUM_CARDS, MOOD_ANALYSIS_FAILED,
        },
    },
    config::Config,
    events::{map_key_to_action, UserAction},
    mood::{all_moods, classifier::MoodClassifier, random_mood, Mood, MoodResult},
    player::{
        backend::{spawn_worker, BackendCommand, BackendEvent, PlaybackBackend},
        PlayerCommand, PlayerEffect,
    },
};

const TICK_MS: u64 = 80; // UI tick (animations, EQ bars)
const POSITION_POLL_MS: u64 = 1000; // Position polling while playing
const SEEK_STEP_SECS: u32 = 10;
const VOLUME_STEP: u8 = 5;
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Results of background work, delivered back to the event loop.
#[derive(Debug)]
pub enum AppMessage {
    MoodAnalyzed(MoodResult),
    MoodFailed,
    Recommendations { mood: Mood, songs: Vec<Song> },
    MoodAlbums { mood: Mood, albums: Vec<Album> },
    SearchResults { query: String, filter: SearchFilter, songs: Vec<Song>, albums: Vec<Album> },
    StreamResolved { song_id: String, song_name: String, video_id: Option<String> },
    AlbumLoaded { album_id: String, details: Option<AlbumDetails> },
}

pub struct App {
    pub state: AppState,
    catalog: Catalog,
    videos: VideoSearch,
    classifier: Arc<MoodClassifier>,
    debounce: Debouncer,
    messages_tx: mpsc::Sender<AppMessage>,
    messages_rx: Option<mpsc::Receiver<AppMessage>>,
    backend_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    backend_events: Option<mpsc::Receiver<BackendEvent>>,
    backend_worker: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let http = build_http_client(&config)?;
        let catalog = Catalog::new(http.clone(), config.catalog_api_url.clone());
        let videos = VideoSearch::new(
            http.clone(),
            config.youtube_api_url.clone(),
            config.youtube_api_key.clone(),
        );
        let gemini = Gemini::new(
            http,
            config.gemini_api_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        );
        if !gemini.is_configured() {
            info!("GEMINI_API_KEY not set, mood analysis uses keyword matching only");
        }

        let (messages_tx, messages_rx) = mpsc::channel(32);
        let (events_tx, events_rx) = mpsc::channel(32);
        let (backend_tx, backend_rx) = mpsc::unbounded_channel();
        let backend = build_backend(&config, events_tx.clone());
        let backend_worker = spawn_worker(backend, backend_rx, events_tx);

        Ok(App {
            state: AppState::default(),
            catalog,
            videos,
            classifier: Arc::new(MoodClassifier::new(gemini)),
            debounce: Debouncer::new(Duration::from_millis(config.search_debounce_ms)),
            messages_tx,
            messages_rx: Some(messages_rx),
            backend_tx: Some(backend_tx),
            backend_events: Some(events_rx),
            backend_worker: Some(backend_worker),
        })
    }

    pub async fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
    ) -> Result<()> {
        let mut messages = self.messages_rx.take().context("App::run called twice")?;
        let mut backend_events = self.backend_events.take().context("App::run called twice")?;

        // Start from a random mood, like a fresh visit would.
        self.set_mood(random_mood());

        let mut tick_interval = time::interval(Duration::from_millis(TICK_MS));
        let mut poll_interval = time::interval(Duration::from_millis(POSITION_POLL_MS));
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut event_stream = EventStream::new();

        loop {
            terminal.draw(|f| crate::ui::render(f, &self.state))?;

            let deadline = self.debounce.deadline();
            let playing = self.state.player.is_playing();

            tokio::select! {
                _ = tick_interval.tick() => {
                    self.state.update_eq_bars();
                    self.state.tick_ticker();
                    self.state.tick_notification();
                }
                _ = poll_interval.tick(), if playing => {
                    self.send_backend(BackendCommand::RequestPosition);
                }
                _ = sleep_until(deadline) => {
                    if self.debounce.take_due(Instant::now()) {
                        if self.state.search.query_is_searchable() {
                            self.start_search();
                        } else {
                            self.state.search.is_searching = false;
                        }
                    }
                }
                Some(message) = messages.recv() => self.handle_message(message),
                Some(event) = backend_events.recv() => self.handle_backend_event(event),
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if let Some(action) = map_key_to_action(key, self.state.input_active()) {
                                self.handle_action(action);
                            }
                        }
                        Some(Err(e)) => warn!("Terminal event error: {e}"),
                        None => self.state.should_quit = true,
                        _ => {}
                    }
                }
            }

            if self.state.should_quit {
                break;
            }
        }

        self.shutdown().await;
        Ok(())
    }

    async fn shutdown(&mut self) {
        // Closing the command channel lets the worker stop the player.
        self.backend_tx.take();
        if let Some(worker) = self.backend_worker.take() {
            if time::timeout(SHUTDOWN_GRACE, worker).await.is_err() {
                warn!("Playback backend did not stop in time");
            }
        }
        info!("Shut down");
    }

    // ── Action handler ────────────────────────────────────────────────────────
    fn handle_action(&mut self, action: UserAction) {
        match action {
            UserAction::Quit => {
                self.state.should_quit = true;
            }
            UserAction::ToggleHelp => {
                self.state.show_help = !self.state.show_help;
            }
            UserAction::SwitchScreen(n) => {
                self.state.show_help = false;
                match n {
                    1 => self.state.navigate_to(ActiveScreen::Home),
                    2 => self.state.navigate_to(ActiveScreen::Explore),
                    3 => self.state.navigate_to(ActiveScreen::Mood),
                    4 => self.state.navigate_to(ActiveScreen::Queue),
                    _ => {}
                }
            }
            UserAction::OpenSearch => {
                self.state.navigate_to(ActiveScreen::Explore);
                self.state.search.is_editing = true;
            }
            UserAction::OpenMoodInput => {
                self.state.navigate_to(ActiveScreen::Mood);
                self.state.mood.is_editing = true;
            }
            UserAction::RandomMood => {
                let mood = random_mood();
                self.state.set_notification(Notification::info(format!("Mood: {}", mood.mood)));
                self.set_mood(mood);
            }
            UserAction::Back => {
                if self.state.search.is_editing {
                    self.state.search.is_editing = false;
                } else if self.state.mood.is_editing {
                    self.state.mood.is_editing = false;
                } else if self.state.show_help {
                    self.state.show_help = false;
                } else if self.state.active_screen == ActiveScreen::Album {
                    let back_to = self.state.previous_screen.unwrap_or(ActiveScreen::Explore);
                    self.state.navigate_to(back_to);
                }
            }
            UserAction::Input(c) => {
                if self.state.search.is_editing {
                    self.state.search.query.push(c);
                    self.debounce.arm(Instant::now());
                } else if self.state.mood.is_editing {
                    self.state.mood.input.push(c);
                }
            }
            UserAction::InputBackspace => {
                if self.state.search.is_editing {
                    self.state.search.query.pop();
                    self.debounce.arm(Instant::now());
                } else if self.state.mood.is_editing {
                    self.state.mood.input.pop();
                }
            }
            UserAction::InputSubmit => {
                if self.state.search.is_editing {
                    self.state.search.is_editing = false;
                    self.debounce.cancel();
                    if !self.state.search.query.trim().is_empty() {
                        self.start_search();
                    }
                } else if self.state.mood.is_editing {
                    self.state.mood.is_editing = false;
                    let text = self.state.mood.input.trim().to_string();
                    if !text.is_empty() {
                        self.analyze_mood(text);
                    }
                }
            }
            UserAction::CycleFocus => match self.state.active_screen {
                ActiveScreen::Explore => {
                    self.state.search.filter = self.state.search.filter.cycle();
                    self.state.search.selected = 0;
                    self.debounce.arm(Instant::now());
                }
                ActiveScreen::Mood => {
                    self.state.mood.focus = match self.state.mood.focus {
                        MoodFocus::Cards => MoodFocus::Tracks,
                        MoodFocus::Tracks => MoodFocus::Cards,
                    };
                }
                _ => {}
            },
            UserAction::NavigateUp => self.navigate_up(),
            UserAction::NavigateDown => self.navigate_down(),
            UserAction::Select => self.handle_select(),
            UserAction::TogglePlay => {
                if self.state.player.current.is_none() {
                    self.state.set_notification(Notification::info("Nothing is playing"));
                    return;
                }
                let msg = if self.state.player.is_playing() { "Paused" } else { "Resumed" };
                self.state.set_notification(Notification::info(msg));
                self.dispatch(PlayerCommand::TogglePlay);
            }
            UserAction::NextTrack => {
                self.state.set_notification(Notification::info("Next track ▶▶"));
                self.dispatch(PlayerCommand::Next);
            }
            UserAction::PrevTrack => {
                self.state.set_notification(Notification::info("Previous track ◀◀"));
                self.dispatch(PlayerCommand::Previous);
            }
            UserAction::VolumeUp => {
                let new_vol = self.state.player.volume.saturating_add(VOLUME_STEP).min(100);
                self.dispatch(PlayerCommand::SetVolume(new_vol));
                self.state.set_notification(Notification::info(format!("Volume: {new_vol}%")));
            }
            UserAction::VolumeDown => {
                let new_vol = self.state.player.volume.saturating_sub(VOLUME_STEP);
                self.dispatch(PlayerCommand::SetVolume(new_vol));
                self.state.set_notification(Notification::info(format!("Volume: {new_vol}%")));
            }
            UserAction::ToggleMute => {
                self.dispatch(PlayerCommand::ToggleMute);
                let msg = if self.state.player.muted { "Muted" } else { "Unmuted" };
                self.state.set_notification(Notification::info(msg));
            }
            UserAction::AddToQueue => {
                if let Some(song) = self.state.selected_song().cloned() {
                    let msg = format!("Queued: {}", song.name);
                    self.dispatch(PlayerCommand::Enqueue(song));
                    self.state.set_notification(Notification::info(msg));
                }
            }
            UserAction::RemoveFromQueue => {
                if self.state.active_screen == ActiveScreen::Queue && !self.state.player.queue.is_empty() {
                    self.dispatch(PlayerCommand::RemoveFromQueue(self.state.queue.selected));
                    let max = self.state.player.queue.len().saturating_sub(1);
                    self.state.queue.selected = self.state.queue.selected.min(max);
                }
            }
            UserAction::ClearQueue => {
                if self.state.active_screen == ActiveScreen::Queue {
                    self.dispatch(PlayerCommand::ClearQueue);
                    self.state.queue.selected = 0;
                    self.state.set_notification(Notification::info("Queue cleared"));
                }
            }
            UserAction::SeekForward => {
                let target = (self.state.player.progress + SEEK_STEP_SECS).min(self.state.player.duration());
                self.dispatch(PlayerCommand::Seek(target));
            }
            UserAction::SeekBackward => {
                let target = self.state.player.progress.saturating_sub(SEEK_STEP_SECS);
                self.dispatch(PlayerCommand::Seek(target));
            }
            UserAction::ToggleEQ => {
                self.state.eq_expanded = !self.state.eq_expanded;
                let mode = if self.state.eq_expanded { "Expanded" } else { "Compact" };
                self.state.set_notification(Notification::info(format!("EQ: {mode}")));
            }
            UserAction::OpenInBrowser => {
                let url = self
                    .state
                    .player
                    .current
                    .as_ref()
                    .map(|s| s.url.clone())
                    .filter(|u| !u.is_empty());
                if let Some(url) = url {
                    if let Err(e) = open::that(&url) {
                        warn!("Could not open browser: {e}");
                        self.state.set_notification(Notification::error("Could not open browser"));
                    }
                }
            }
        }
    }

    // ── Navigation helpers ────────────────────────────────────────────────────
    fn navigate_up(&mut self) {
        let cursor = match self.state.active_screen {
            ActiveScreen::Home => &mut self.state.home.selected,
            ActiveScreen::Explore => &mut self.state.search.selected,
            ActiveScreen::Mood => match self.state.mood.focus {
                MoodFocus::Cards => &mut self.state.mood.selected_card,
                MoodFocus::Tracks => &mut self.state.mood.selected_track,
            },
            ActiveScreen::Queue => &mut self.state.queue.selected,
            ActiveScreen::Album => &mut self.state.album.selected,
        };
        *cursor = cursor.saturating_sub(1);
    }

    fn navigate_down(&mut self) {
        let len = match self.state.active_screen {
            ActiveScreen::Home => self.state.home_entries().len(),
            ActiveScreen::Explore => self.state.search.entries().len(),
            ActiveScreen::Mood => match self.state.mood.focus {
                MoodFocus::Cards => all_moods().len(),
                MoodFocus::Tracks => self.state.player.recommendations.len(),
            },
            ActiveScreen::Queue => self.state.player.queue.len(),
            ActiveScreen::Album => self
                .state
                .album
                .details
                .as_ref()
                .map(|d| d.songs.len())
                .unwrap_or(0),
        };
        let max = len.saturating_sub(1);
        let cursor = match self.state.active_screen {
            ActiveScreen::Home => &mut self.state.home.selected,
            ActiveScreen::Explore => &mut self.state.search.selected,
            ActiveScreen::Mood => match self.state.mood.focus {
                MoodFocus::Cards => &mut self.state.mood.selected_card,
                MoodFocus::Tracks => &mut self.state.mood.selected_track,
            },
            ActiveScreen::Queue => &mut self.state.queue.selected,
            ActiveScreen::Album => &mut self.state.album.selected,
        };
        if *cursor < max {
            *cursor += 1;
        }
    }

    // ── Select handler ────────────────────────────────────────────────────────
    fn handle_select(&mut self) {
        if self.state.active_screen == ActiveScreen::Mood && self.state.mood.focus == MoodFocus::Cards {
            if let Some(card) = all_moods().get(self.state.mood.selected_card).cloned() {
                self.state.mood.error = None;
                self.set_mood(card);
            }
            return;
        }

        if self.state.active_screen == ActiveScreen::Queue {
            let index = self.state.queue.selected;
            if let Some(song) = self.state.player.queue.get(index).cloned() {
                self.dispatch(PlayerCommand::RemoveFromQueue(index));
                self.play_with_notice(PlayerCommand::Play(song));
                let max = self.state.player.queue.len().saturating_sub(1);
                self.state.queue.selected = index.min(max);
            }
            return;
        }

        match self.state.selected_entry() {
            Some(Entry::Album(album)) => {
                let album = album.clone();
                self.open_album(album);
            }
            Some(Entry::Song(song)) => {
                let song = song.clone();
                self.play_with_notice(PlayerCommand::Select(song));
            }
            None => {}
        }
    }

    fn play_with_notice(&mut self, command: PlayerCommand) {
        let previous = self.state.player.current.as_ref().map(|s| s.id.clone());
        self.dispatch(command);
        if let Some(current) = &self.state.player.current {
            if previous.as_deref() != Some(current.id.as_str()) {
                let msg = format!("Playing: {}", current.name);
                self.state.set_notification(Notification::info(msg));
            }
        }
    }

    // ── Player plumbing ───────────────────────────────────────────────────────
    fn dispatch(&mut self, command: PlayerCommand) {
        let effects = self.state.player.apply(command);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: PlayerEffect) {
        match effect {
            PlayerEffect::ResolveStream(song) => {
                let videos = self.videos.clone();
                let tx = self.messages_tx.clone();
                tokio::spawn(async move {
                    let video_id = match videos.find_video_id(&song).await {
                        Ok(id) => id,
                        Err(e) => {
                            warn!(song = %song.name, "Video lookup failed: {e}");
                            None
                        }
                    };
                    let _ = tx
                        .send(AppMessage::StreamResolved {
                            song_id: song.id,
                            song_name: song.name,
                            video_id,
                        })
                        .await;
                });
            }
            PlayerEffect::Load(video_id) => self.send_backend(BackendCommand::Load(video_id)),
            PlayerEffect::Stop => self.send_backend(BackendCommand::Stop),
            PlayerEffect::Pause => self.send_backend(BackendCommand::Pause),
            PlayerEffect::Resume => self.send_backend(BackendCommand::Resume),
            PlayerEffect::Seek(secs) => self.send_backend(BackendCommand::Seek(secs)),
            PlayerEffect::Volume(percent) => self.send_backend(BackendCommand::Volume(percent)),
        }
    }

    fn send_backend(&self, command: BackendCommand) {
        if let Some(tx) = &self.backend_tx {
            if tx.send(command).is_err() {
                warn!("Playback worker is gone");
            }
        }
    }

    fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Status(status) => {
                debug!(?status, code = status.code(), "player status");
                let before = self.state.player.current.as_ref().map(|s| s.id.clone());
                self.dispatch(PlayerCommand::Status(status));
                let after = self.state.player.current.as_ref().map(|s| s.id.clone());
                if before != after {
                    if let Some(song) = &self.state.player.current {
                        let msg = format!("Up next: {}", song.name);
                        self.state.set_notification(Notification::info(msg));
                    }
                }
            }
            BackendEvent::Position(secs) => {
                self.dispatch(PlayerCommand::Progress(secs));
            }
            BackendEvent::Error(message) => {
                self.state.set_notification(Notification::error(message));
            }
        }
    }

    // ── Mood ──────────────────────────────────────────────────────────────────
    fn analyze_mood(&mut self, text: String) {
        self.state.mood.loading = true;
        self.state.mood.error = None;
        let classifier = self.classifier.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let task = tokio::spawn(async move { classifier.classify(&text).await });
            let message = match task.await {
                Ok(result) => AppMessage::MoodAnalyzed(result),
                Err(e) => {
                    warn!("Mood analysis task failed: {e}");
                    AppMessage::MoodFailed
                }
            };
            let _ = tx.send(message).await;
        });
    }

    /// Makes `result` the current mood and refreshes everything keyed on it.
    fn set_mood(&mut self, result: MoodResult) {
        let mood = result.mood;
        info!(%mood, confidence = result.confidence, "Mood set");
        self.state.mood.current = Some(result);
        self.state.mood.selected_track = 0;
        self.state.mood.loading_recommendations = true;
        self.state.home.loading_albums = true;
        self.state.home.selected = 0;

        let catalog = self.catalog.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let songs = catalog.mood_songs(mood, DEFAULT_LIMIT).await.unwrap_or_else(|e| {
                warn!(%mood, "Loading recommendations failed: {e}");
                vec![]
            });
            let _ = tx.send(AppMessage::Recommendations { mood, songs }).await;
        });

        let catalog = self.catalog.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let albums = catalog.mood_albums(mood, DEFAULT_LIMIT).await.unwrap_or_else(|e| {
                warn!(%mood, "Loading mood albums failed: {e}");
                vec![]
            });
            let _ = tx.send(AppMessage::MoodAlbums { mood, albums }).await;
        });
    }

    // ── Search ────────────────────────────────────────────────────────────────
    fn start_search(&mut self) {
        let query = self.state.search.query.trim().to_string();
        let filter = self.state.search.filter;
        self.state.search.is_searching = true;

        let catalog = self.catalog.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let songs_fut = async {
                if !filter.wants_songs() {
                    return vec![];
                }
                catalog.search_songs(&query, DEFAULT_LIMIT).await.unwrap_or_else(|e| {
                    warn!(%query, "Song search failed: {e}");
                    vec![]
                })
            };
            let albums_fut = async {
                if !filter.wants_albums() {
                    return vec![];
                }
                catalog.search_albums(&query, DEFAULT_LIMIT).await.unwrap_or_else(|e| {
                    warn!(%query, "Album search failed: {e}");
                    vec![]
                })
            };
            let (songs, albums) = tokio::join!(songs_fut, albums_fut);
            let _ = tx
                .send(AppMessage::SearchResults { query: query.clone(), filter, songs, albums })
                .await;
        });
    }

    // ── Albums ────────────────────────────────────────────────────────────────
    fn open_album(&mut self, album: Album) {
        self.state.album = AlbumState {
            album_id: Some(album.id.clone()),
            details: None,
            selected: 0,
            is_loading: true,
        };
        self.state.navigate_to(ActiveScreen::Album);

        let catalog = self.catalog.clone();
        let tx = self.messages_tx.clone();
        tokio::spawn(async move {
            let details = match catalog.album_details(&album.id).await {
                Ok(details) => Some(details),
                Err(e) => {
                    warn!(album = %album.name, "Loading album failed: {e}");
                    None
                }
            };
            let _ = tx.send(AppMessage::AlbumLoaded { album_id: album.id, details }).await;
        });
    }

    // ── Background results ────────────────────────────────────────────────────
    pub(crate) fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::MoodAnalyzed(result) => {
                self.state.mood.loading = false;
                let msg = format!("{} {} mood detected", result.mood.icon(), result.mood);
                self.state.set_notification(Notification::info(msg));
                self.set_mood(result);
            }
            AppMessage::MoodFailed => {
                self.state.mood.loading = false;
                self.state.mood.error = Some(MOOD_ANALYSIS_FAILED.to_string());
            }
            AppMessage::Recommendations { mood, songs } => {
                if self.state.mood.current_mood() != Some(mood) {
                    return;
                }
                self.state.mood.loading_recommendations = false;
                self.dispatch(PlayerCommand::SetRecommendations(songs));
            }
            AppMessage::MoodAlbums { mood, mut albums } => {
                if self.state.mood.current_mood() != Some(mood) {
                    return;
                }
                albums.truncate(MAX_ALBUM_CARDS);
                self.state.home.albums = albums;
                self.state.home.loading_albums = false;
            }
            AppMessage::SearchResults { query, filter, songs, albums } => {
                let search = &mut self.state.search;
                if search.query.trim() != query || search.filter != filter {
                    // A searchable query means a newer search is pending or running.
                    if !search.query_is_searchable() {
                        search.is_searching = false;
                    }
                    return;
                }
                search.is_searching = false;
                search.songs = songs;
                search.albums = albums;
                search.selected = 0;
                search.searched_query = Some(query);
            }
            AppMessage::StreamResolved { song_id, song_name, video_id } => {
                if video_id.is_none() && self.state.player.is_current(&song_id) {
                    self.state.set_notification(Notification::error(format!(
                        "No stream found for {song_name}"
                    )));
                }
                self.dispatch(PlayerCommand::StreamResolved { song_id, video_id });
            }
            AppMessage::AlbumLoaded { album_id, details } => {
                if self.state.album.album_id.as_deref() != Some(album_id.as_str()) {
                    return;
                }
                self.state.album.is_loading = false;
                self.state.album.details = details;
            }
        }
    }
}

#[cfg(unix)]
fn build_backend(config: &Config, events: mpsc::Sender<BackendEvent>) -> Arc<dyn PlaybackBackend> {
    if !executable_exists(&config.mpv_path) {
        warn!(mpv = %config.mpv_path, "mpv not found, playback is disabled");
        return Arc::new(crate::player::backend::NullBackend);
    }
    Arc::new(crate::player::mpv::MpvBackend::new(config.mpv_path.clone(), events))
}

/// True for an existing path, or a bare name found on `PATH`.
#[cfg(unix)]
fn executable_exists(program: &str) -> bool {
    use std::path::Path;
    if program.is_empty() {
        return false;
    }
    if program.contains('/') {
        return Path::new(program).is_file();
    }
    std::env::var_os("PATH")
        .map(|paths| std::env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn build_backend(_config: &Config, _events: mpsc::Sender<BackendEvent>) -> Arc<dyn PlaybackBackend> {
    warn!("mpv IPC needs a Unix socket, playback is disabled on this platform");
    Arc::new(crate::player::backend::NullBackend)
}

/// Local hour for the greeting line.
pub fn local_hour() -> u32 {
    chrono::Local::now().hour()
}
