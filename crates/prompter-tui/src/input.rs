use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::{KeyBinding, Keymap};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePlay,
    OpenSettings,
    EditText,
    Restart,
    SaveSettings,
    TogglePauseOnHover,
    SpeedUp,
    SpeedDown,
    Help,
    /// Esc: close the current overlay
    CloseOverlay,
    // Settings panel
    SettingsNext,
    SettingsPrev,
    SettingsAdjust(i32),
    SettingsActivate,
    // Text editor
    InputChar(char),
    Newline,
    Backspace,
    CursorLeft,
    CursorRight,
    Confirm,
    Cancel,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    // Handle input mode (text editor)
    if app.is_input_mode() {
        return handle_input_mode(key);
    }

    match &app.mode {
        // Any key exits help
        Mode::Help => return Action::CloseOverlay,
        Mode::Settings => {
            if let Some(action) = handle_settings_mode(key) {
                return action;
            }
        }
        _ => {}
    }

    let binding = KeyBinding::from_event(&key);
    match keymap.get(&binding) {
        // The settings key closes the panel it opened
        Some(Action::OpenSettings) if app.mode == Mode::Settings => Action::CloseOverlay,
        Some(action) => action.clone(),
        None => Action::None,
    }
}

/// Panel navigation; falls through to the keymap for everything else
fn handle_settings_mode(key: KeyEvent) -> Option<Action> {
    let action = match (key.code, key.modifiers) {
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) | (KeyCode::Tab, _) => {
            Action::SettingsNext
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) | (KeyCode::BackTab, _) => {
            Action::SettingsPrev
        }
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, KeyModifiers::NONE) => {
            Action::SettingsAdjust(1)
        }
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, KeyModifiers::NONE) => {
            Action::SettingsAdjust(-1)
        }
        (KeyCode::Char('L'), _) | (KeyCode::Right, KeyModifiers::SHIFT) => {
            Action::SettingsAdjust(10)
        }
        (KeyCode::Char('H'), _) | (KeyCode::Left, KeyModifiers::SHIFT) => {
            Action::SettingsAdjust(-10)
        }
        (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => Action::SettingsActivate,
        (KeyCode::Esc, _) => Action::CloseOverlay,
        _ => return None,
    };
    Some(action)
}

/// Handle key events in the text editor
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Confirm,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Cancel,
        (KeyCode::Esc, _) => Action::Confirm,
        (KeyCode::Enter, _) => Action::Newline,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => Action::InputChar(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use prompter_core::AppConfig;
    use std::sync::Arc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        App::new(Arc::new(AppConfig::default()), Theme::default())
    }

    #[test]
    fn test_normal_mode_uses_keymap() {
        let app = app();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), &app, &keymap),
            Action::TogglePlay
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('s')), &app, &keymap),
            Action::OpenSettings
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('z')), &app, &keymap),
            Action::None
        );
    }

    #[test]
    fn test_settings_mode_navigation() {
        let mut app = app();
        app.open_settings();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j')), &app, &keymap),
            Action::SettingsNext
        );
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT),
                &app,
                &keymap
            ),
            Action::SettingsAdjust(10)
        );
        // space activates the row instead of toggling playback
        assert_eq!(
            handle_key_event(key(KeyCode::Char(' ')), &app, &keymap),
            Action::SettingsActivate
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('s')), &app, &keymap),
            Action::CloseOverlay
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::Quit
        );
    }

    #[test]
    fn test_editor_mode_captures_text() {
        let mut app = app();
        app.begin_edit();
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('q')), &app, &keymap),
            Action::InputChar('q')
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Enter), &app, &keymap),
            Action::Newline
        );
        assert_eq!(
            handle_key_event(
                KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL),
                &app,
                &keymap
            ),
            Action::Confirm
        );
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = app();
        app.mode = Mode::Help;
        let keymap = Keymap::default();
        assert_eq!(
            handle_key_event(key(KeyCode::Char('x')), &app, &keymap),
            Action::CloseOverlay
        );
    }
}
