pub mod classifier;

use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

/// The six moods everything else keys off: search terms, theme colors, cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumIter)]
pub enum Mood {
    Happy,
    Sad,
    Energetic,
    Chill,
    Romantic,
    Focus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodResult {
    pub mood: Mood,
    pub confidence: f32,
    pub related_genres: &'static [&'static str],
    pub color_theme: &'static str,
}

const BASE_CONFIDENCE: f32 = 0.9;

impl Mood {
    pub fn profile(self) -> MoodResult {
        let (related_genres, color_theme): (&'static [&'static str], &'static str) = match self {
            Mood::Happy => (&["Pop", "Dance", "Electronic"], "happy"),
            Mood::Sad => (&["Ballad", "Indie", "Classical"], "sad"),
            Mood::Energetic => (&["Rock", "EDM", "Hip Hop"], "energetic"),
            Mood::Chill => (&["Lo-fi", "Ambient", "Jazz"], "chill"),
            Mood::Romantic => (&["R&B", "Soul", "Acoustic"], "romantic"),
            Mood::Focus => (&["Instrumental", "Classical", "Ambient"], "focus"),
        };
        MoodResult {
            mood: self,
            confidence: BASE_CONFIDENCE,
            related_genres,
            color_theme,
        }
    }

    /// Search term used for mood-based song recommendations.
    pub fn song_query(self) -> &'static str {
        match self {
            Mood::Happy => "happy upbeat",
            Mood::Sad => "sad emotional",
            Mood::Energetic => "energetic dance",
            Mood::Chill => "chill relax",
            Mood::Romantic => "romantic love",
            Mood::Focus => "focus concentration",
        }
    }

    /// Search term used for mood-based albums.
    pub fn album_query(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Energetic => "party",
            Mood::Chill => "chill",
            Mood::Romantic => "love",
            Mood::Focus => "meditation",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Mood::Happy => "✨",
            Mood::Sad => "🌧",
            Mood::Energetic => "⚡",
            Mood::Chill => "🌊",
            Mood::Romantic => "💜",
            Mood::Focus => "🎯",
        }
    }

    /// Parses a free-form label such as "Happy", " chill.\n" or "Mood: Focus".
    /// Replies naming zero or several moods are rejected.
    pub fn from_label(reply: &str) -> Option<Mood> {
        let lower = reply.to_lowercase();
        let mut found: Option<Mood> = None;
        for word in lower.split(|c: char| !c.is_alphabetic()).filter(|w| !w.is_empty()) {
            if let Some(mood) = Mood::iter().find(|m| m.to_string().to_lowercase() == word) {
                match found {
                    Some(prev) if prev != mood => return None,
                    _ => found = Some(mood),
                }
            }
        }
        found
    }
}

pub fn all_moods() -> Vec<MoodResult> {
    Mood::iter().map(Mood::profile).collect()
}

/// Keyword groups, checked in order; the first group with a hit wins.
const KEYWORDS: &[(Mood, &[&str])] = &[
    (Mood::Happy, &["happy", "joy", "excited"]),
    (Mood::Sad, &["sad", "depressed", "blue"]),
    (Mood::Energetic, &["energetic", "pumped", "workout"]),
    (Mood::Chill, &["chill", "relax", "peaceful"]),
    (Mood::Romantic, &["love", "romantic", "date"]),
    (Mood::Focus, &["focus", "concentrate", "study"]),
];

pub const DEFAULT_MOOD: Mood = Mood::Happy;

pub fn detect_by_keywords(text: &str) -> MoodResult {
    let lower = text.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(mood, _)| *mood)
        .unwrap_or(DEFAULT_MOOD)
        .profile()
}

pub fn random_mood() -> MoodResult {
    let moods: Vec<Mood> = Mood::iter().collect();
    moods
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(DEFAULT_MOOD)
        .profile()
}
