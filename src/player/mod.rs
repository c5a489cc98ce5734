//! Playback and queue state.
//!
//! `PlayerState` is a plain reducer: user intents and player status reports
//! both arrive as [`PlayerCommand`]s, and whatever has to happen outside
//! (resolving a stream, talking to the player process) comes back as
//! [`PlayerEffect`]s for the caller to run.

pub mod backend;
#[cfg(unix)]
pub mod mpv;

use std::collections::VecDeque;

use crate::api::types::Song;

pub const DEFAULT_VOLUME: u8 = 70;

/// Past this many seconds "previous" restarts the song instead of skipping back.
const RESTART_THRESHOLD_SECS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
}

/// Coarse status reported by the embedded player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStatus {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerStatus {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(PlayerStatus::Unstarted),
            0 => Some(PlayerStatus::Ended),
            1 => Some(PlayerStatus::Playing),
            2 => Some(PlayerStatus::Paused),
            3 => Some(PlayerStatus::Buffering),
            5 => Some(PlayerStatus::Cued),
            _ => None,
        }
    }

    pub fn code(self) -> i32 {
        match self {
            PlayerStatus::Unstarted => -1,
            PlayerStatus::Ended => 0,
            PlayerStatus::Playing => 1,
            PlayerStatus::Paused => 2,
            PlayerStatus::Buffering => 3,
            PlayerStatus::Cued => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Play(Song),
    /// Click on a song row: toggles if it is already current, plays it otherwise.
    Select(Song),
    Pause,
    Resume,
    TogglePlay,
    Next,
    Previous,
    Seek(u32),
    SetVolume(u8),
    ToggleMute,
    Enqueue(Song),
    RemoveFromQueue(usize),
    ClearQueue,
    SetRecommendations(Vec<Song>),
    StreamResolved { song_id: String, video_id: Option<String> },
    Status(PlayerStatus),
    Progress(u32),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEffect {
    ResolveStream(Song),
    Load(String),
    /// Drop whatever the player process has loaded.
    Stop,
    Pause,
    Resume,
    Seek(u32),
    Volume(u8),
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    pub current: Option<Song>,
    pub queue: VecDeque<Song>,
    pub recommendations: Vec<Song>,
    pub state: PlaybackState,
    /// Seconds into the current song.
    pub progress: u32,
    pub volume: u8,
    pub muted: bool,
    pub video_id: Option<String>,
    pub last_status: Option<PlayerStatus>,
}

impl Default for PlayerState {
    fn default() -> Self {
        PlayerState {
            current: None,
            queue: VecDeque::new(),
            recommendations: Vec::new(),
            state: PlaybackState::Idle,
            progress: 0,
            volume: DEFAULT_VOLUME,
            muted: false,
            video_id: None,
            last_status: None,
        }
    }
}

impl PlayerState {
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_current(&self, song_id: &str) -> bool {
        self.current.as_ref().is_some_and(|s| s.id == song_id)
    }

    pub fn duration(&self) -> u32 {
        self.current.as_ref().map(Song::duration_secs).unwrap_or(0)
    }

    pub fn effective_volume(&self) -> u8 {
        if self.muted {
            0
        } else {
            self.volume
        }
    }

    pub fn progress_percent(&self) -> f64 {
        let duration = self.duration();
        if duration == 0 {
            return 0.0;
        }
        (self.progress as f64 / duration as f64).clamp(0.0, 1.0)
    }

    pub fn progress_formatted(&self) -> String {
        format!("{} / {}", format_time(self.progress), format_time(self.duration()))
    }

    pub fn apply(&mut self, command: PlayerCommand) -> Vec<PlayerEffect> {
        match command {
            PlayerCommand::Play(song) => self.play(song),
            PlayerCommand::Select(song) => {
                if self.is_current(&song.id) {
                    self.toggle_play()
                } else {
                    self.play(song)
                }
            }
            PlayerCommand::Pause => self.pause(),
            PlayerCommand::Resume => self.resume(),
            PlayerCommand::TogglePlay => self.toggle_play(),
            PlayerCommand::Next => self.next(),
            PlayerCommand::Previous => self.previous(),
            PlayerCommand::Seek(position) => match self.set_progress(position) {
                true => vec![PlayerEffect::Seek(position)],
                false => vec![],
            },
            PlayerCommand::SetVolume(volume) => {
                self.volume = volume.min(100);
                self.muted = self.volume == 0;
                vec![PlayerEffect::Volume(self.effective_volume())]
            }
            PlayerCommand::ToggleMute => {
                if self.muted {
                    if self.volume == 0 {
                        self.volume = DEFAULT_VOLUME;
                    }
                    self.muted = false;
                } else {
                    self.muted = true;
                }
                vec![PlayerEffect::Volume(self.effective_volume())]
            }
            PlayerCommand::Enqueue(song) => {
                self.queue.push_back(song);
                vec![]
            }
            PlayerCommand::RemoveFromQueue(index) => {
                self.queue.remove(index);
                vec![]
            }
            PlayerCommand::ClearQueue => {
                self.queue.clear();
                vec![]
            }
            PlayerCommand::SetRecommendations(songs) => {
                self.recommendations = songs;
                vec![]
            }
            PlayerCommand::StreamResolved { song_id, video_id } => {
                if !self.is_current(&song_id) {
                    return vec![];
                }
                match video_id {
                    Some(id) => {
                        self.video_id = Some(id.clone());
                        self.last_status = None;
                        vec![PlayerEffect::Load(id)]
                    }
                    None => {
                        self.state = PlaybackState::Paused;
                        vec![]
                    }
                }
            }
            PlayerCommand::Status(status) => self.on_status(status),
            PlayerCommand::Progress(position) => {
                // Until the stream is loaded, positions belong to the previous song.
                if self.video_id.is_some() {
                    self.progress = position.min(self.duration());
                }
                vec![]
            }
        }
    }

    fn play(&mut self, song: Song) -> Vec<PlayerEffect> {
        let mut effects = Vec::with_capacity(2);
        if self.video_id.take().is_some() {
            effects.push(PlayerEffect::Stop);
        }
        self.current = Some(song.clone());
        self.state = PlaybackState::Playing;
        self.progress = 0;
        effects.push(PlayerEffect::ResolveStream(song));
        effects
    }

    fn pause(&mut self) -> Vec<PlayerEffect> {
        if self.current.is_none() {
            return vec![];
        }
        self.state = PlaybackState::Paused;
        vec![PlayerEffect::Pause]
    }

    fn resume(&mut self) -> Vec<PlayerEffect> {
        if self.current.is_none() {
            return vec![];
        }
        self.state = PlaybackState::Playing;
        if self.last_status == Some(PlayerStatus::Ended) {
            if let Some(id) = self.video_id.clone() {
                // The player went idle at the end; start the song over.
                self.last_status = None;
                self.progress = 0;
                return vec![PlayerEffect::Load(id)];
            }
        }
        vec![PlayerEffect::Resume]
    }

    fn toggle_play(&mut self) -> Vec<PlayerEffect> {
        match self.state {
            PlaybackState::Playing => self.pause(),
            _ => self.resume(),
        }
    }

    fn next(&mut self) -> Vec<PlayerEffect> {
        if let Some(song) = self.queue.pop_front() {
            return self.play(song);
        }
        let len = self.recommendations.len();
        if len == 0 || self.current.is_none() {
            return vec![];
        }
        // A current song outside the list (picked from search) restarts it at the top.
        let target = self.current_index().map(|i| (i + 1) % len).unwrap_or(0);
        let song = self.recommendations[target].clone();
        self.play(song)
    }

    fn previous(&mut self) -> Vec<PlayerEffect> {
        if self.current.is_some() && self.progress > RESTART_THRESHOLD_SECS {
            self.progress = 0;
            return vec![PlayerEffect::Seek(0)];
        }
        let len = self.recommendations.len();
        if len == 0 || self.current.is_none() {
            return vec![];
        }
        let target = match self.current_index() {
            Some(index) => (index + len - 1) % len,
            None => len - 1,
        };
        let song = self.recommendations[target].clone();
        self.play(song)
    }

    /// Accepts only positions inside the current song.
    fn set_progress(&mut self, position: u32) -> bool {
        if position > self.duration() {
            return false;
        }
        self.progress = position;
        true
    }

    fn on_status(&mut self, status: PlayerStatus) -> Vec<PlayerEffect> {
        // An end reported while resolving is the previous song's.
        if status == PlayerStatus::Ended && self.video_id.is_none() {
            return vec![];
        }
        self.last_status = Some(status);
        match status {
            PlayerStatus::Ended => {
                let effects = self.next();
                if effects.is_empty() {
                    self.state = PlaybackState::Paused;
                    self.progress = self.duration();
                }
                effects
            }
            PlayerStatus::Playing if self.current.is_some() => {
                self.state = PlaybackState::Playing;
                vec![]
            }
            PlayerStatus::Paused if self.current.is_some() => {
                self.state = PlaybackState::Paused;
                vec![]
            }
            _ => vec![],
        }
    }

    fn current_index(&self) -> Option<usize> {
        let current = self.current.as_ref()?;
        self.recommendations.iter().position(|s| s.id == current.id)
    }
}

/// "m:ss"
pub fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
