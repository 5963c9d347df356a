use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use prompter_core::config::KeymapConfig;
use tracing::warn;

use crate::input::Action;

/// Parsed key binding (key code + modifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn simple(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Binding for a terminal key event.
    ///
    /// Terminals disagree on whether symbols like `?` or `+` carry SHIFT, so
    /// SHIFT is dropped for non-letters and always set for uppercase letters.
    pub fn from_event(key: &KeyEvent) -> Self {
        let mut modifiers =
            key.modifiers & (KeyModifiers::CONTROL | KeyModifiers::SHIFT | KeyModifiers::ALT);
        if let KeyCode::Char(c) = key.code {
            if c.is_ascii_uppercase() {
                modifiers |= KeyModifiers::SHIFT;
            } else if !c.is_alphabetic() {
                modifiers.remove(KeyModifiers::SHIFT);
            }
        }
        Self::new(key.code, modifiers)
    }
}

/// Runtime keymap for key-to-action lookup
pub struct Keymap {
    bindings: HashMap<KeyBinding, Action>,
}

impl Default for Keymap {
    fn default() -> Self {
        Self::from_config(&KeymapConfig::default())
    }
}

impl Keymap {
    /// Create a keymap from configuration
    pub fn from_config(config: &KeymapConfig) -> Self {
        let mut bindings = HashMap::new();

        // Helper to add binding with conflict detection
        let mut add_binding = |key_str: &str, action: Action| {
            if let Some(binding) = parse_key_binding(key_str) {
                if let Some(existing) = bindings.get(&binding) {
                    warn!(
                        "Key conflict: '{}' already bound to {:?}, ignoring binding to {:?}",
                        key_str, existing, action
                    );
                } else {
                    bindings.insert(binding, action);
                }
            } else {
                warn!("Invalid key binding: '{}', action {:?} is unbound", key_str, action);
            }
        };

        add_binding(&config.quit, Action::Quit);
        add_binding(&config.toggle_play, Action::TogglePlay);
        add_binding(&config.settings, Action::OpenSettings);
        add_binding(&config.edit_text, Action::EditText);
        add_binding(&config.restart, Action::Restart);
        add_binding(&config.save_settings, Action::SaveSettings);
        add_binding(&config.toggle_pause_on_hover, Action::TogglePauseOnHover);
        add_binding(&config.speed_up, Action::SpeedUp);
        add_binding(&config.speed_down, Action::SpeedDown);
        add_binding(&config.help, Action::Help);

        // Ctrl+C always quits
        bindings.insert(KeyBinding::ctrl(KeyCode::Char('c')), Action::Quit);
        // Escape always closes overlays
        bindings.insert(KeyBinding::simple(KeyCode::Esc), Action::CloseOverlay);
        // Arrow keys as speed alternatives
        bindings.entry(KeyBinding::simple(KeyCode::Up)).or_insert(Action::SpeedUp);
        bindings.entry(KeyBinding::simple(KeyCode::Down)).or_insert(Action::SpeedDown);
        bindings.entry(KeyBinding::simple(KeyCode::Char('='))).or_insert(Action::SpeedUp);

        Self { bindings }
    }

    /// Get action for a key binding
    pub fn get(&self, binding: &KeyBinding) -> Option<&Action> {
        self.bindings.get(binding)
    }
}

/// Parse Vim-style key notation into KeyBinding
/// Supported formats:
/// - Single char: "q", "e", "+", "?"
/// - Uppercase (Shift): "R", "W"
/// - Ctrl: "<C-s>"
/// - Shift: "<S-Tab>"
/// - Special keys: "<CR>", "<Esc>", "<Tab>", "<Space>", "<Up>", "<Down>", "<F1>".."<F12>"
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
    let s = s.trim();

    if s.len() > 2 && s.starts_with('<') && s.ends_with('>') {
        return parse_special_key(&s[1..s.len() - 1]);
    }

    let mut chars = s.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c.is_ascii_uppercase() {
        Some(KeyBinding::shift(KeyCode::Char(c)))
    } else {
        Some(KeyBinding::simple(KeyCode::Char(c)))
    }
}

/// Parse special key notation (content inside <...>)
fn parse_special_key(inner: &str) -> Option<KeyBinding> {
    if let Some(rest) = inner.strip_prefix("C-") {
        return parse_key_name(rest).map(KeyBinding::ctrl);
    }
    if let Some(rest) = inner.strip_prefix("S-") {
        return parse_key_name(rest).map(KeyBinding::shift);
    }
    if let Some(rest) = inner.strip_prefix("A-").or_else(|| inner.strip_prefix("M-")) {
        return parse_key_name(rest).map(|code| KeyBinding::new(code, KeyModifiers::ALT));
    }
    parse_key_name(inner).map(KeyBinding::simple)
}

/// Parse a key name (without modifiers)
fn parse_key_name(name: &str) -> Option<KeyCode> {
    let lower = name.to_lowercase();
    let code = match lower.as_str() {
        "cr" | "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" | "spc" => KeyCode::Char(' '),
        "bs" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" | "pgup" => KeyCode::PageUp,
        "pagedown" | "pgdn" => KeyCode::PageDown,
        _ => {
            if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                if (1..=12).contains(&n) {
                    return Some(KeyCode::F(n));
                }
                return None;
            }
            // Single character after modifier (e.g., "s" in "<C-s>")
            let mut chars = name.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c.to_ascii_lowercase())
        }
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_keys() {
        assert_eq!(
            parse_key_binding("q"),
            Some(KeyBinding::simple(KeyCode::Char('q')))
        );
        assert_eq!(
            parse_key_binding("+"),
            Some(KeyBinding::simple(KeyCode::Char('+')))
        );
        assert_eq!(
            parse_key_binding("R"),
            Some(KeyBinding::shift(KeyCode::Char('R')))
        );
        assert_eq!(parse_key_binding("qq"), None);
    }

    #[test]
    fn test_parse_special_keys() {
        assert_eq!(
            parse_key_binding("<Space>"),
            Some(KeyBinding::simple(KeyCode::Char(' ')))
        );
        assert_eq!(
            parse_key_binding("<C-s>"),
            Some(KeyBinding::ctrl(KeyCode::Char('s')))
        );
        assert_eq!(
            parse_key_binding("<S-Tab>"),
            Some(KeyBinding::shift(KeyCode::Tab))
        );
        assert_eq!(
            parse_key_binding("<F5>"),
            Some(KeyBinding::simple(KeyCode::F(5)))
        );
        assert_eq!(parse_key_binding("<F13>"), None);
        assert_eq!(parse_key_binding("<Nope>"), None);
    }

    #[test]
    fn test_event_normalization() {
        let question = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(
            KeyBinding::from_event(&question),
            KeyBinding::simple(KeyCode::Char('?'))
        );
        let upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::NONE);
        assert_eq!(
            KeyBinding::from_event(&upper),
            KeyBinding::shift(KeyCode::Char('R'))
        );
    }

    #[test]
    fn test_keymap_from_config() {
        let keymap = Keymap::default();
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char(' '))),
            Some(&Action::TogglePlay)
        );
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('?'))),
            Some(&Action::Help)
        );
        assert_eq!(
            keymap.get(&KeyBinding::ctrl(KeyCode::Char('c'))),
            Some(&Action::Quit)
        );
    }

    #[test]
    fn test_conflicting_binding_keeps_first() {
        let config = KeymapConfig {
            edit_text: "q".to_string(),
            ..Default::default()
        };
        let keymap = Keymap::from_config(&config);
        assert_eq!(
            keymap.get(&KeyBinding::simple(KeyCode::Char('q'))),
            Some(&Action::Quit)
        );
    }
}
