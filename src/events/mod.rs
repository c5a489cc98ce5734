use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Quit,
    ToggleHelp,
    NavigateUp,
    NavigateDown,
    Select,
    Back,
    TogglePlay,
    NextTrack,
    PrevTrack,
    VolumeUp,
    VolumeDown,
    ToggleMute,
    AddToQueue,
    RemoveFromQueue,
    ClearQueue,
    OpenSearch,
    OpenMoodInput,
    RandomMood,
    Input(char),
    InputBackspace,
    InputSubmit,
    CycleFocus,
    SwitchScreen(u8),
    SeekForward,
    SeekBackward,
    ToggleEQ,
    OpenInBrowser,
}

pub fn map_key_to_action(key: KeyEvent, input_active: bool) -> Option<UserAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UserAction::Quit);
    }

    if input_active {
        return match key.code {
            KeyCode::Esc => Some(UserAction::Back),
            KeyCode::Enter => Some(UserAction::InputSubmit),
            KeyCode::Backspace => Some(UserAction::InputBackspace),
            KeyCode::Tab => Some(UserAction::CycleFocus),
            KeyCode::Char(c) => Some(UserAction::Input(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') => Some(UserAction::Quit),
        KeyCode::Char('?') => Some(UserAction::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UserAction::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UserAction::NavigateDown),
        KeyCode::Enter => Some(UserAction::Select),
        KeyCode::Esc | KeyCode::Char('b') => Some(UserAction::Back),
        KeyCode::Tab => Some(UserAction::CycleFocus),
        KeyCode::Char(' ') => Some(UserAction::TogglePlay),
        KeyCode::Char('n') => Some(UserAction::NextTrack),
        KeyCode::Char('p') => Some(UserAction::PrevTrack),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UserAction::VolumeUp),
        KeyCode::Char('-') => Some(UserAction::VolumeDown),
        KeyCode::Char('m') => Some(UserAction::ToggleMute),
        KeyCode::Char('a') => Some(UserAction::AddToQueue),
        KeyCode::Char('x') => Some(UserAction::RemoveFromQueue),
        KeyCode::Char('c') => Some(UserAction::ClearQueue),
        KeyCode::Char('s') | KeyCode::Char('/') => Some(UserAction::OpenSearch),
        KeyCode::Char('i') => Some(UserAction::OpenMoodInput),
        KeyCode::Char('R') => Some(UserAction::RandomMood),
        KeyCode::Char('1') => Some(UserAction::SwitchScreen(1)),
        KeyCode::Char('2') => Some(UserAction::SwitchScreen(2)),
        KeyCode::Char('3') => Some(UserAction::SwitchScreen(3)),
        KeyCode::Char('4') => Some(UserAction::SwitchScreen(4)),
        KeyCode::Char('f') | KeyCode::Right => Some(UserAction::SeekForward),
        KeyCode::Char('r') | KeyCode::Left => Some(UserAction::SeekBackward),
        KeyCode::Char('e') => Some(UserAction::ToggleEQ),
        KeyCode::Char('o') => Some(UserAction::OpenInBrowser),
        _ => None,
    }
}
