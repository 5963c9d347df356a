use prompter_core::HoverState;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = &app.theme;
        let bar = Style::default().fg(theme.fg).bg(theme.panel);

        let (play_str, play_color) = if app.state.is_playing() {
            ("▶ PLAYING", theme.playing)
        } else if app.state.hover_state() == HoverState::HoveringWhilePlaying {
            ("⏸ HOVER", theme.paused)
        } else {
            ("⏸ PAUSED", theme.paused)
        };

        let mode_str = match &app.mode {
            Mode::Normal => "",
            Mode::Settings => " SETTINGS",
            Mode::EditText(_) => " EDIT",
            Mode::Help => " HELP",
        };

        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " {} pt/s | {} pt | {}×{} | hover:{}",
                app.state.speed(),
                app.state.font_size(),
                app.state.width(),
                app.state.height(),
                if app.state.pause_on_hover() { "pause" } else { "off" }
            )
        };

        let keys = &app.config.keymap;
        let help_hint = format!(
            " {}:quit {}:play {}:settings {}:help ",
            keys.quit,
            display_key(&keys.toggle_play),
            keys.settings,
            keys.help
        );

        let left = format!(" {}{} ", play_str, mode_str);
        let used = left.width() + status_text.width() + help_hint.width();
        let padding_len = (area.width as usize).saturating_sub(used);

        let line = Line::from(vec![
            Span::styled(
                left,
                Style::default()
                    .fg(play_color)
                    .bg(theme.panel)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(status_text, bar),
            Span::styled(" ".repeat(padding_len), bar),
            Span::styled(help_hint, Style::default().fg(theme.muted).bg(theme.panel)),
        ]);

        frame.render_widget(Paragraph::new(line).style(bar), area);
    }
}

/// Short form of a key notation for hints
pub(crate) fn display_key(notation: &str) -> String {
    match notation {
        "<Space>" => "space".to_string(),
        "<CR>" => "enter".to_string(),
        other => other.to_string(),
    }
}
