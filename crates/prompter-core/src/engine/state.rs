use std::time::Duration;

use tracing::{debug, info};

use super::hover::HoverState;
use super::scroll::ScrollEngine;
use crate::config::{HoverTogglePolicy, PrompterConfig};
use crate::settings::{self, Setting};

/// Shown in place of empty text
pub const PLACEHOLDER_TEXT: &str = "Put some text in Settings...";

/// Everything the prompter displays and how it moves
///
/// Owned by the UI loop; every mutation happens on that loop, so there is
/// no interior locking.
#[derive(Debug, Clone)]
pub struct PrompterState {
    text: String,
    speed: f64,
    font_size: f64,
    width: f64,
    height: f64,
    is_playing: bool,
    pause_on_hover: bool,
    hover_policy: HoverTogglePolicy,
    hover: HoverState,
    scroll: ScrollEngine,
}

impl Default for PrompterState {
    fn default() -> Self {
        Self::from_config(&PrompterConfig::default())
    }
}

impl PrompterState {
    pub fn from_config(config: &PrompterConfig) -> Self {
        Self {
            text: config.text.clone(),
            speed: settings::SPEED.clamp(config.speed),
            font_size: settings::FONT_SIZE.clamp(config.font_size),
            width: settings::WIDTH.clamp(config.width),
            height: settings::HEIGHT.clamp(config.height),
            is_playing: config.autoplay,
            pause_on_hover: config.pause_on_hover,
            hover_policy: config.hover_toggle_policy,
            hover: HoverState::Idle,
            scroll: ScrollEngine::new(),
        }
    }

    /// Write the current settings back into a config section
    pub fn to_config(&self) -> PrompterConfig {
        PrompterConfig {
            text: self.text.clone(),
            speed: self.speed,
            font_size: self.font_size,
            width: self.width,
            height: self.height,
            autoplay: self.is_playing || self.hover.owns_pause(),
            pause_on_hover: self.pause_on_hover,
            hover_toggle_policy: self.hover_policy,
        }
    }

    // --- accessors ---

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text to render; the placeholder when the text is empty
    pub fn display_text(&self) -> &str {
        if self.text.is_empty() {
            PLACEHOLDER_TEXT
        } else {
            &self.text
        }
    }

    pub fn offset(&self) -> f64 {
        self.scroll.offset()
    }

    pub fn content_height(&self) -> f64 {
        self.scroll.content_height()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether ticks currently advance the offset.
    ///
    /// Hover pause writes through to `is_playing`, so the two always agree;
    /// this is the name the rendering side asks for.
    pub fn effective_play(&self) -> bool {
        self.is_playing
    }

    pub fn pause_on_hover(&self) -> bool {
        self.pause_on_hover
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover
    }

    pub fn hover_policy(&self) -> HoverTogglePolicy {
        self.hover_policy
    }

    pub fn get(&self, setting: Setting) -> f64 {
        match setting {
            Setting::Speed => self.speed,
            Setting::FontSize => self.font_size,
            Setting::Width => self.width,
            Setting::Height => self.height,
        }
    }

    // --- engine operations ---

    /// Advance the offset by the time elapsed since the previous tick
    pub fn tick(&mut self, delta: Duration) {
        self.scroll
            .tick(delta.as_secs_f64(), self.speed, self.effective_play());
    }

    /// Record the measured height of one text copy
    pub fn on_content_height_measured(&mut self, height: f64) {
        if height != self.scroll.content_height() {
            debug!(height, "content height measured");
        }
        self.scroll.on_content_height_measured(height);
    }

    /// Reset the offset after the text was replaced
    pub fn on_text_changed(&mut self) {
        self.scroll.on_text_changed();
    }

    /// Replace the text. The offset goes back to zero before the next tick.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.text {
            info!(chars = text.chars().count(), "prompter text replaced");
            self.text = text;
            self.on_text_changed();
        }
    }

    /// Scroll back to the first line without touching the text
    pub fn restart(&mut self) {
        self.scroll.on_text_changed();
    }

    // --- playback ---

    pub fn set_playing(&mut self, playing: bool) {
        if playing != self.is_playing {
            self.is_playing = playing;
            if self.hover.is_hovering() {
                self.hover.manual_toggle(self.hover_policy);
            }
        }
    }

    pub fn toggle_play(&mut self) {
        self.set_playing(!self.is_playing);
    }

    pub fn set_pause_on_hover(&mut self, enabled: bool) {
        self.pause_on_hover = enabled;
        if !enabled {
            self.hover.clear();
        }
    }

    pub fn toggle_pause_on_hover(&mut self) {
        self.set_pause_on_hover(!self.pause_on_hover);
    }

    pub fn hover_enter(&mut self) {
        if !self.pause_on_hover {
            self.hover.clear();
            return;
        }
        if let Some(playing) = self.hover.enter(self.is_playing) {
            self.is_playing = playing;
        }
    }

    pub fn hover_exit(&mut self) {
        if !self.pause_on_hover {
            self.hover.clear();
            return;
        }
        if let Some(playing) = self.hover.exit() {
            self.is_playing = playing;
        }
    }

    // --- settings ---

    /// Set a numeric setting, clamped to its range. Returns the stored value.
    pub fn set(&mut self, setting: Setting, value: f64) -> f64 {
        let value = setting.bounds().clamp(value);
        match setting {
            Setting::Speed => self.speed = value,
            Setting::FontSize => self.font_size = value,
            Setting::Width => self.width = value,
            Setting::Height => self.height = value,
        }
        value
    }

    /// Move a setting by whole steps. Returns the stored value.
    pub fn step(&mut self, setting: Setting, steps: i32) -> f64 {
        let next = setting.bounds().step_by(self.get(setting), steps);
        self.set(setting, next)
    }
}
