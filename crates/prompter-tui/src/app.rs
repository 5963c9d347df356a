use std::sync::Arc;
use std::time::Duration;

use prompter_core::{AppConfig, PrompterState, Setting};
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::editor::TextEditor;
use crate::layout::{prompter_rect, TextLayout, Typography};
use crate::theme::Theme;

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Only the prompter (and status bar)
    Normal,
    /// Settings panel overlay
    Settings,
    /// Text editor overlay
    EditText(TextEditor),
    /// Help overlay
    Help,
}

/// One row of the settings panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsRow {
    Value(Setting),
    PauseOnHover,
    PlayPause,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 6] = [
        SettingsRow::Value(Setting::Speed),
        SettingsRow::Value(Setting::FontSize),
        SettingsRow::Value(Setting::Width),
        SettingsRow::Value(Setting::Height),
        SettingsRow::PauseOnHover,
        SettingsRow::PlayPause,
    ];
}

/// Application state
pub struct App {
    /// Prompter text, settings and scroll engine
    pub state: PrompterState,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Active color theme
    pub theme: Theme,
    /// Current application mode
    pub mode: Mode,
    /// Selected settings row
    pub settings_cursor: usize,
    /// Where the prompter was drawn on the last layout pass
    pub prompter_area: Rect,
    /// Layout of the text inside the prompter
    pub text_layout: Option<TextLayout>,
    /// Whether the pointer is currently over the prompter
    pub pointer_inside: bool,
    /// Last known pointer cell, re-checked when the prompter moves
    pointer: Option<Position>,
    /// Status message
    pub status_message: Option<String>,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let state = PrompterState::from_config(&config.prompter);
        Self {
            state,
            config,
            theme,
            mode: Mode::Normal,
            settings_cursor: 0,
            prompter_area: Rect::default(),
            text_layout: None,
            pointer_inside: false,
            pointer: None,
            status_message: None,
            should_quit: false,
        }
    }

    /// Advance the scroll animation
    pub fn tick(&mut self, delta: Duration) {
        self.state.tick(delta);
    }

    /// Recompute the prompter rectangle and text layout for the terminal area,
    /// and report the resulting content height to the engine
    pub fn relayout(&mut self, area: Rect) {
        self.prompter_area = prompter_rect(&self.state, area, self.config.ui.top_margin);

        let typography = Typography::new(self.state.font_size());
        let layout = TextLayout::measure(
            self.state.display_text(),
            typography,
            self.prompter_area.width,
        );
        self.state.on_content_height_measured(layout.content_height());
        self.text_layout = Some(layout);

        // The prompter may have moved under a still pointer
        if let Some(pointer) = self.pointer {
            self.update_hover(pointer);
        }
    }

    /// Rows of the text layout scrolled past at the current offset
    pub fn scroll_rows(&self) -> u16 {
        self.text_layout
            .as_ref()
            .map(|layout| layout.scroll_rows(self.state.offset()))
            .unwrap_or(0)
    }

    // --- hover ---

    /// Pointer moved to a cell; emits hover enter/exit on crossing the prompter edge
    pub fn pointer_moved(&mut self, column: u16, row: u16) {
        let pointer = Position::new(column, row);
        self.pointer = Some(pointer);
        self.update_hover(pointer);
    }

    fn update_hover(&mut self, pointer: Position) {
        let inside = self.prompter_area.contains(pointer);
        if inside == self.pointer_inside {
            return;
        }
        self.pointer_inside = inside;
        if inside {
            debug!(column = pointer.x, row = pointer.y, "pointer entered prompter");
            self.state.hover_enter();
        } else {
            debug!(column = pointer.x, row = pointer.y, "pointer left prompter");
            self.state.hover_exit();
        }
    }

    /// Pointer left the terminal (focus lost)
    pub fn pointer_left(&mut self) {
        self.pointer = None;
        if self.pointer_inside {
            self.pointer_inside = false;
            self.state.hover_exit();
        }
    }

    // --- playback ---

    pub fn toggle_play(&mut self) {
        self.state.toggle_play();
        self.set_status(if self.state.is_playing() { "Playing" } else { "Paused" });
    }

    pub fn toggle_pause_on_hover(&mut self) {
        self.state.toggle_pause_on_hover();
        self.set_status(if self.state.pause_on_hover() {
            "Pause on hover: on"
        } else {
            "Pause on hover: off"
        });
    }

    pub fn restart(&mut self) {
        self.state.restart();
        self.set_status("Back to the top");
    }

    pub fn change_speed(&mut self, steps: i32) {
        let speed = self.state.step(Setting::Speed, steps);
        self.set_status(format!("Speed: {} pt/s", speed));
    }

    /// Replace the text from an external source (file watcher)
    pub fn replace_text(&mut self, text: String) {
        self.state.set_text(text);
        self.set_status("Text reloaded");
    }

    // --- settings panel ---

    pub fn open_settings(&mut self) {
        self.mode = Mode::Settings;
    }

    pub fn selected_row(&self) -> SettingsRow {
        SettingsRow::ALL[self.settings_cursor.min(SettingsRow::ALL.len() - 1)]
    }

    pub fn settings_next(&mut self) {
        self.settings_cursor = (self.settings_cursor + 1) % SettingsRow::ALL.len();
    }

    pub fn settings_prev(&mut self) {
        self.settings_cursor = if self.settings_cursor == 0 {
            SettingsRow::ALL.len() - 1
        } else {
            self.settings_cursor - 1
        };
    }

    pub fn select_row(&mut self, index: usize) {
        if index < SettingsRow::ALL.len() {
            self.settings_cursor = index;
        }
    }

    /// Move the selected slider by `steps`; toggles flip on any non-zero step
    pub fn adjust_selected(&mut self, steps: i32) {
        match self.selected_row() {
            SettingsRow::Value(setting) => {
                self.state.step(setting, steps);
            }
            SettingsRow::PauseOnHover => self.state.toggle_pause_on_hover(),
            SettingsRow::PlayPause => self.state.toggle_play(),
        }
    }

    /// Enter / Space on the selected row
    pub fn activate_selected(&mut self) {
        match self.selected_row() {
            SettingsRow::Value(_) => {}
            SettingsRow::PauseOnHover => self.state.toggle_pause_on_hover(),
            SettingsRow::PlayPause => self.state.toggle_play(),
        }
    }

    // --- text editing ---

    pub fn begin_edit(&mut self) {
        self.mode = Mode::EditText(TextEditor::new(self.state.text()));
    }

    /// Apply the editor contents and leave edit mode
    pub fn commit_edit(&mut self) {
        if let Mode::EditText(editor) = std::mem::replace(&mut self.mode, Mode::Normal) {
            let before = self.state.text().to_string();
            self.state.set_text(editor.into_text());
            if self.state.text() != before {
                self.set_status("Text updated");
            }
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::EditText(_)) {
            self.mode = Mode::Normal;
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut TextEditor> {
        match &mut self.mode {
            Mode::EditText(editor) => Some(editor),
            _ => None,
        }
    }

    /// Config with the prompter section replaced by the current settings
    pub fn settings_snapshot(&self) -> AppConfig {
        let mut config = (*self.config).clone();
        config.prompter = self.state.to_config();
        config
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    /// Check if we're in a mode that accepts text input
    pub fn is_input_mode(&self) -> bool {
        matches!(self.mode, Mode::EditText(_))
    }
}
