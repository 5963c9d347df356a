use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::settings::{self, Bounds};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub prompter: PrompterConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// What a manual play/pause toggle does while the pointer hovers the prompter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverTogglePolicy {
    /// Leaving the prompter restores the state captured when the hover began
    #[default]
    KeepEntrySnapshot,
    /// The manual toggle wins: leaving the prompter no longer restores playback
    FollowManual,
}

/// Initial prompter settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrompterConfig {
    /// Text shown at startup
    #[serde(default)]
    pub text: String,
    /// Scroll speed in points per second (1-40)
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Font size in points (8-30)
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    /// Prompter width in px (100-600)
    #[serde(default = "default_width")]
    pub width: f64,
    /// Prompter height in px (100-500)
    #[serde(default = "default_height")]
    pub height: f64,
    /// Start scrolling immediately
    #[serde(default = "default_true")]
    pub autoplay: bool,
    /// Pause while the pointer is over the prompter
    #[serde(default = "default_true")]
    pub pause_on_hover: bool,
    #[serde(default)]
    pub hover_toggle_policy: HoverTogglePolicy,
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            speed: default_speed(),
            font_size: default_font_size(),
            width: default_width(),
            height: default_height(),
            autoplay: default_true(),
            pause_on_hover: default_true(),
            hover_toggle_policy: HoverTogglePolicy::default(),
        }
    }
}

impl PrompterConfig {
    /// Clamp every numeric field into its allowed range, warning about each fix
    pub fn normalized(mut self) -> Self {
        self.speed = clamp_field("speed", self.speed, settings::SPEED);
        self.font_size = clamp_field("font_size", self.font_size, settings::FONT_SIZE);
        self.width = clamp_field("width", self.width, settings::WIDTH);
        self.height = clamp_field("height", self.height, settings::HEIGHT);
        self
    }
}

fn clamp_field(name: &str, value: f64, bounds: Bounds) -> f64 {
    if bounds.contains(value) {
        return value;
    }
    let clamped = bounds.clamp(value);
    warn!(
        "prompter.{} = {} is outside {}..={}, using {}",
        name, value, bounds.min, bounds.max, clamped
    );
    clamped
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Ticks per second driving the scroll animation
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Longest single tick; longer stalls are shortened to this
    #[serde(default = "default_max_tick_delta")]
    pub max_tick_delta_ms: u64,
    /// Rows between the top edge and the prompter
    #[serde(default = "default_top_margin")]
    pub top_margin: u16,
    #[serde(default = "default_true")]
    pub show_status_bar: bool,
    /// Theme configuration
    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            animation_fps: default_animation_fps(),
            max_tick_delta_ms: default_max_tick_delta(),
            top_margin: default_top_margin(),
            show_status_bar: default_true(),
            theme: ThemeConfig::default(),
        }
    }
}

impl UiConfig {
    /// Interval between animation ticks
    pub fn tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    pub fn max_tick_delta(&self) -> Duration {
        Duration::from_millis(self.max_tick_delta_ms)
    }
}

/// Theme configuration
/// Can be specified as a simple string (theme name) or as a full struct with overrides
#[derive(Debug, Clone, Serialize)]
pub struct ThemeConfig {
    /// Theme name ("notch", "light", "gruvbox-dark")
    pub name: String,
    /// Optional color overrides
    pub colors: ThemeColorOverrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_theme_name(),
            colors: ThemeColorOverrides::default(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawThemeConfig {
    Name(String),
    Full {
        #[serde(default = "default_theme_name")]
        name: String,
        #[serde(default)]
        colors: ThemeColorOverrides,
    },
}

impl<'de> Deserialize<'de> for ThemeConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawThemeConfig::deserialize(deserializer)? {
            RawThemeConfig::Name(name) => ThemeConfig {
                name,
                colors: ThemeColorOverrides::default(),
            },
            RawThemeConfig::Full { name, colors } => ThemeConfig { name, colors },
        })
    }
}

fn default_theme_name() -> String {
    "notch".to_string()
}

/// Optional color overrides, each a hex string ("#ff0000" or "ff0000")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeColorOverrides {
    /// Prompter background
    pub background: Option<String>,
    /// Prompter text
    pub text: Option<String>,
    /// Panel and status bar text
    pub fg: Option<String>,
    /// Panel background
    pub panel: Option<String>,
    /// Borders and secondary text
    pub muted: Option<String>,
    /// Selected row, active values
    pub accent: Option<String>,
    /// Playing indicator
    pub playing: Option<String>,
    /// Paused indicator
    pub paused: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Poll interval of the file watcher in milliseconds
    #[serde(default = "default_watch_interval")]
    pub watch_interval_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            watch_interval_ms: default_watch_interval(),
        }
    }
}

impl SourceConfig {
    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms.max(50))
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "q", "<C-s>" (Ctrl+s), "<S-Tab>", "<CR>", "<Esc>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    #[serde(default = "default_key_quit")]
    pub quit: String,
    #[serde(default = "default_key_toggle_play")]
    pub toggle_play: String,
    #[serde(default = "default_key_settings")]
    pub settings: String,
    #[serde(default = "default_key_edit_text")]
    pub edit_text: String,
    /// Jump back to the first line
    #[serde(default = "default_key_restart")]
    pub restart: String,
    /// Write current settings to the config file
    #[serde(default = "default_key_save")]
    pub save_settings: String,
    #[serde(default = "default_key_toggle_pause_on_hover")]
    pub toggle_pause_on_hover: String,
    #[serde(default = "default_key_speed_up")]
    pub speed_up: String,
    #[serde(default = "default_key_speed_down")]
    pub speed_down: String,
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            toggle_play: default_key_toggle_play(),
            settings: default_key_settings(),
            edit_text: default_key_edit_text(),
            restart: default_key_restart(),
            save_settings: default_key_save(),
            toggle_pause_on_hover: default_key_toggle_pause_on_hover(),
            speed_up: default_key_speed_up(),
            speed_down: default_key_speed_down(),
            help: default_key_help(),
        }
    }
}

fn default_key_quit() -> String {
    "q".to_string()
}

fn default_key_toggle_play() -> String {
    "<Space>".to_string()
}

fn default_key_settings() -> String {
    "s".to_string()
}

fn default_key_edit_text() -> String {
    "e".to_string()
}

fn default_key_restart() -> String {
    "r".to_string()
}

fn default_key_save() -> String {
    "w".to_string()
}

fn default_key_toggle_pause_on_hover() -> String {
    "p".to_string()
}

fn default_key_speed_up() -> String {
    "+".to_string()
}

fn default_key_speed_down() -> String {
    "-".to_string()
}

fn default_key_help() -> String {
    "?".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notch-prompter")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_speed() -> f64 {
    10.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_width() -> f64 {
    400.0
}

fn default_height() -> f64 {
    150.0
}

fn default_animation_fps() -> u32 {
    60
}

fn default_max_tick_delta() -> u64 {
    250
}

fn default_top_margin() -> u16 {
    1
}

fn default_watch_interval() -> u64 {
    500
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults if it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration text, clamping prompter values into range
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.prompter = config.prompter.normalized();
        Ok(config)
    }

    /// Save configuration to the default file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/notch-prompter/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("notch-prompter")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("notch-prompter.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
