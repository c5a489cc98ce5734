use ratatui::style::{Color, Modifier, Style};

// ─── Base palette ────────────────────────────────────────────────────────────
pub const BG:          Color = Color::Rgb(13,  13,  17);
pub const BG_ALT:      Color = Color::Rgb(20,  20,  28);  // popups, toasts
pub const SURFACE:     Color = Color::Rgb(28,  28,  40);  // gauge tracks
pub const SURFACE_SEL: Color = Color::Rgb(40,  35,  65);

pub const PRIMARY:     Color = Color::Rgb(155, 93,  229); // titles, fallback mood tint
pub const ACCENT:      Color = Color::Rgb(0,   245, 255); // selection, key names
pub const HOT_PINK:    Color = Color::Rgb(241, 91,  181); // input cursors
pub const NEON_GREEN:  Color = Color::Rgb(0,   187, 249); // now playing
pub const GOLD:        Color = Color::Rgb(255, 210, 63);  // queue count, buffering

pub const TEXT:        Color = Color::Rgb(220, 220, 235);
pub const TEXT_DIM:    Color = Color::Rgb(140, 140, 160);
pub const TEXT_MUTED:  Color = Color::Rgb(80,  80,  100);

pub const BORDER:      Color = Color::Rgb(50,  45,  80);
pub const BORDER_FOCUSED: Color = PRIMARY;

pub const ERROR:       Color = Color::Rgb(255, 90,  90);

// ─── Mood tints ──────────────────────────────────────────────────────────────
pub const MOOD_HAPPY:     Color = Color::Rgb(255, 200, 60);
pub const MOOD_SAD:       Color = Color::Rgb(90,  130, 230);
pub const MOOD_ENERGETIC: Color = Color::Rgb(255, 110, 50);
pub const MOOD_CHILL:     Color = Color::Rgb(60,  210, 180);
pub const MOOD_ROMANTIC:  Color = Color::Rgb(241, 91,  181);
pub const MOOD_FOCUS:     Color = Color::Rgb(120, 220, 120);

/// Maps a mood's color theme name onto the palette. Unknown names fall back to `PRIMARY`.
pub fn mood_color(color_theme: &str) -> Color {
    match color_theme {
        "happy" => MOOD_HAPPY,
        "sad" => MOOD_SAD,
        "energetic" => MOOD_ENERGETIC,
        "chill" => MOOD_CHILL,
        "romantic" => MOOD_ROMANTIC,
        "focus" => MOOD_FOCUS,
        _ => PRIMARY,
    }
}

// ─── Styles ──────────────────────────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn mood_title_style(color_theme: &str) -> Style {
    Style::default().fg(mood_color(color_theme)).add_modifier(Modifier::BOLD)
}

pub fn accent_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(SURFACE_SEL)
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn muted_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUSED)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn playing_style() -> Style {
    Style::default().fg(NEON_GREEN).add_modifier(Modifier::BOLD)
}

pub fn hot_pink_style() -> Style {
    Style::default().fg(HOT_PINK).add_modifier(Modifier::BOLD)
}

pub fn gold_style() -> Style {
    Style::default().fg(GOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(BG)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}
