use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};
use crate::widgets::status_bar::display_key;

pub struct PopupWidget;

impl PopupWidget {
    /// Render the key reference
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let entries: Vec<(String, &str)> = vec![
            (display_key(&keys.toggle_play), "Play / pause"),
            (keys.settings.clone(), "Open or close settings"),
            (keys.edit_text.clone(), "Edit the prompter text"),
            (keys.restart.clone(), "Scroll back to the top"),
            (format!("{} {}", keys.speed_up, keys.speed_down), "Faster / slower"),
            (keys.toggle_pause_on_hover.clone(), "Toggle pause on hover"),
            (keys.save_settings.clone(), "Save settings to the config file"),
            (keys.help.clone(), "This help"),
            ("esc".to_string(), "Close the current panel"),
            (keys.quit.clone(), "Quit"),
        ];

        let key_width = entries.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
        let mut lines: Vec<Line> = entries
            .into_iter()
            .map(|(key, desc)| {
                Line::from(vec![
                    Span::styled(
                        format!("  {:>width$}  ", key, width = key_width),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(desc, Style::default().fg(theme.fg)),
                ])
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(
            Line::from(Span::styled(
                "Hovering the prompter pauses it while pause on hover is on",
                Style::default().fg(theme.muted),
            ))
            .alignment(Alignment::Center),
        );

        let area = frame.area();
        let width = 64u16.min(area.width.saturating_sub(2));
        let height = (lines.len() as u16 + 2).min(area.height);
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);
        let block = Block::default()
            .title(" Keys ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(Style::default().bg(theme.panel));
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    /// Render the multi-line text editor with a terminal cursor
    pub fn render_editor(frame: &mut Frame, app: &App) {
        let Mode::EditText(editor) = &app.mode else {
            return;
        };
        let theme = &app.theme;

        let area = frame.area();
        let width = 72u16.min(area.width.saturating_sub(2));
        let height = 16u16.min(area.height.saturating_sub(2)).max(3);
        let popup_area = centered_rect(width, height, area);

        let block = Block::default()
            .title(" Edit text ")
            .title_alignment(Alignment::Center)
            .title_bottom(
                Line::from(" C-s/esc save  C-c cancel ").alignment(Alignment::Center),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.panel).fg(theme.fg));
        let inner = block.inner(popup_area);

        let (cursor_line, cursor_col) = editor.cursor_line_col();
        let scroll = editor_scroll(cursor_line, inner.height);

        let lines: Vec<Line> = editor.text().split('\n').map(Line::from).collect();
        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(block).scroll((scroll, 0)),
            popup_area,
        );

        let line_text = editor.text().split('\n').nth(cursor_line).unwrap_or("");
        let col: String = line_text.chars().take(cursor_col).collect();
        let x = inner.x + (col.width() as u16).min(inner.width.saturating_sub(1));
        let y = inner.y + (cursor_line as u16).saturating_sub(scroll);
        frame.set_cursor_position(Position::new(x, y));
    }
}

/// First visible line so that the cursor line stays inside `height` rows
fn editor_scroll(cursor_line: usize, height: u16) -> u16 {
    if height == 0 {
        return 0;
    }
    (cursor_line as u16).saturating_sub(height - 1)
}

/// Helper function to create a centered rect
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
