//! Built-in color themes with user overrides

use prompter_core::config::{ThemeColorOverrides, ThemeConfig};
use ratatui::style::Color;
use tracing::warn;

/// Runtime theme with configurable colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Prompter background
    pub background: Color,
    /// Prompter text
    pub text: Color,
    /// Settings / help panel background
    pub panel: Color,
    /// Panel text
    pub fg: Color,
    /// Borders, hints, inactive slider track
    pub muted: Color,
    /// Selection and active slider
    pub accent: Color,
    pub playing: Color,
    pub paused: Color,
}

impl Default for Theme {
    fn default() -> Self {
        notch()
    }
}

/// White on black, the look of the notch overlay
pub fn notch() -> Theme {
    Theme {
        background: Color::Rgb(0x00, 0x00, 0x00),
        text: Color::Rgb(0xff, 0xff, 0xff),
        panel: Color::Rgb(0x1c, 0x1c, 0x1e),
        fg: Color::Rgb(0xe5, 0xe5, 0xea),
        muted: Color::Rgb(0x63, 0x63, 0x66),
        accent: Color::Rgb(0x0a, 0x84, 0xff),
        playing: Color::Rgb(0x30, 0xd1, 0x58),
        paused: Color::Rgb(0xff, 0x9f, 0x0a),
    }
}

pub fn light() -> Theme {
    Theme {
        background: Color::Rgb(0xff, 0xff, 0xff),
        text: Color::Rgb(0x1c, 0x1c, 0x1e),
        panel: Color::Rgb(0xf2, 0xf2, 0xf7),
        fg: Color::Rgb(0x1c, 0x1c, 0x1e),
        muted: Color::Rgb(0x8e, 0x8e, 0x93),
        accent: Color::Rgb(0x00, 0x7a, 0xff),
        playing: Color::Rgb(0x34, 0xc7, 0x59),
        paused: Color::Rgb(0xff, 0x95, 0x00),
    }
}

pub fn gruvbox_dark() -> Theme {
    Theme {
        background: Color::Rgb(0x28, 0x28, 0x28),
        text: Color::Rgb(0xd4, 0xbe, 0x98),
        panel: Color::Rgb(0x32, 0x30, 0x2f),
        fg: Color::Rgb(0xdd, 0xc7, 0xa1),
        muted: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        playing: Color::Rgb(0xa9, 0xb6, 0x65),
        paused: Color::Rgb(0xe7, 0x8a, 0x4e),
    }
}

/// Parse a hex color string into a ratatui Color
/// Accepts formats: "#RRGGBB", "RRGGBB", "#RGB", "RGB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        // Short form: RGB -> RRGGBB
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

/// Load a theme by name from config and apply color overrides
pub fn load_theme(config: &ThemeConfig) -> Theme {
    let mut theme = match config.name.to_lowercase().as_str() {
        "notch" | "dark" => notch(),
        "light" => light(),
        "gruvbox-dark" | "gruvbox" => gruvbox_dark(),
        other => {
            warn!("Unknown theme '{}', falling back to 'notch'", other);
            notch()
        }
    };
    apply_overrides(&mut theme, &config.colors);
    theme
}

fn apply_overrides(theme: &mut Theme, colors: &ThemeColorOverrides) {
    let slots: [(&str, &Option<String>, &mut Color); 8] = [
        ("background", &colors.background, &mut theme.background),
        ("text", &colors.text, &mut theme.text),
        ("fg", &colors.fg, &mut theme.fg),
        ("panel", &colors.panel, &mut theme.panel),
        ("muted", &colors.muted, &mut theme.muted),
        ("accent", &colors.accent, &mut theme.accent),
        ("playing", &colors.playing, &mut theme.playing),
        ("paused", &colors.paused, &mut theme.paused),
    ];

    for (name, value, slot) in slots {
        if let Some(hex) = value {
            match parse_hex_color(hex) {
                Some(color) => *slot = color,
                None => warn!("Invalid color for '{}': '{}', keeping theme color", name, hex),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("#12"), None);
        assert_eq!(parse_hex_color("zzzzzz"), None);
    }

    #[test]
    fn test_load_named_theme() {
        let config = ThemeConfig {
            name: "Light".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert_eq!(load_theme(&config), light());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let config = ThemeConfig {
            name: "does-not-exist".to_string(),
            colors: ThemeColorOverrides::default(),
        };
        assert_eq!(load_theme(&config), notch());
    }

    #[test]
    fn test_overrides_apply() {
        let config = ThemeConfig {
            name: "notch".to_string(),
            colors: ThemeColorOverrides {
                text: Some("#ffcc00".to_string()),
                accent: Some("bogus".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.text, Color::Rgb(0xff, 0xcc, 0x00));
        assert_eq!(theme.accent, notch().accent);
    }

    #[test]
    fn test_panel_text_override() {
        let config = ThemeConfig {
            name: "light".to_string(),
            colors: ThemeColorOverrides {
                fg: Some("#112233".to_string()),
                ..Default::default()
            },
        };
        let theme = load_theme(&config);
        assert_eq!(theme.fg, Color::Rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.text, light().text);
    }
}
