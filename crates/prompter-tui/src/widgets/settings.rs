use prompter_core::Setting;
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, SettingsRow};
use crate::theme::Theme;

const PANEL_WIDTH: u16 = 64;
const SETTINGS_HINT: &str = "j/k move  h/l ±1  H/L ±10  space toggle  e edit  esc close";
/// Borders, text preview, blank, rows, blank, hint
const PANEL_HEIGHT: u16 = 2 + 2 + SettingsRow::ALL.len() as u16 + 2;
const LABEL_WIDTH: usize = 32;
const SLIDER_LABEL_WIDTH: usize = 18;
const VALUE_WIDTH: usize = 10;

/// Geometry of the settings panel, shared by rendering and mouse hit-testing
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsLayout {
    pub panel: Rect,
    pub preview: Rect,
    pub rows: Vec<Rect>,
    pub hint: Rect,
}

impl SettingsLayout {
    /// Place the panel below the prompter, or centred when it does not fit there
    pub fn compute(area: Rect, prompter: Rect) -> Self {
        let width = PANEL_WIDTH.min(area.width);
        let height = PANEL_HEIGHT.min(area.height);
        let x = area.x + (area.width - width) / 2;
        let below = prompter.bottom() + 1;
        let y = if below + height <= area.bottom() {
            below
        } else {
            area.y + (area.height - height) / 2
        };
        let panel = Rect::new(x, y, width, height);

        let inner = Rect::new(
            panel.x + 1,
            panel.y + 1,
            panel.width.saturating_sub(2),
            panel.height.saturating_sub(2),
        );
        let line = |offset: u16| {
            let y = (inner.y + offset).min(inner.bottom());
            let h = u16::from(inner.y + offset < inner.bottom());
            Rect::new(inner.x, y, inner.width, h)
        };

        let rows = (0..SettingsRow::ALL.len() as u16).map(|i| line(2 + i)).collect();
        Self {
            panel,
            preview: line(0),
            rows,
            hint: line(3 + SettingsRow::ALL.len() as u16),
        }
    }

    /// Index of the settings row under a cell
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.rows.iter().position(|r| r.contains(pos))
    }
}

pub struct SettingsWidget;

impl SettingsWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let layout = SettingsLayout::compute(frame.area(), app.prompter_area);
        let theme = &app.theme;

        frame.render_widget(Clear, layout.panel);
        let block = Block::default()
            .title(" Settings ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted))
            .style(Style::default().bg(theme.panel).fg(theme.fg));
        frame.render_widget(block, layout.panel);

        let preview = first_line_preview(app.state.text(), layout.preview.width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Your text: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(preview, Style::default().fg(theme.muted)),
            ])),
            layout.preview,
        );

        for (idx, (row, area)) in SettingsRow::ALL.iter().zip(&layout.rows).enumerate() {
            let selected = idx == app.settings_cursor;
            let line = Self::row_line(app, *row, area.width as usize, selected);
            frame.render_widget(Paragraph::new(line), *area);
        }

        let hint = Line::from(Span::styled(
            SETTINGS_HINT,
            Style::default().fg(theme.muted),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(Paragraph::new(hint), layout.hint);
    }

    fn row_line(app: &App, row: SettingsRow, width: usize, selected: bool) -> Line<'static> {
        let theme = &app.theme;
        let marker = if selected { "› " } else { "  " };
        let label_style = if selected {
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };

        match row {
            SettingsRow::Value(setting) => {
                let value = app.state.get(setting);
                let bar_width = width.saturating_sub(2 + SLIDER_LABEL_WIDTH + VALUE_WIDTH + 1);
                let (filled, rest) = slider(setting, value, bar_width);
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(
                        format!("{:<width$}", setting.label(), width = SLIDER_LABEL_WIDTH),
                        label_style,
                    ),
                    Span::styled(filled, Style::default().fg(theme.accent)),
                    Span::styled(rest, Style::default().fg(theme.muted)),
                    Span::styled(
                        format!(" {:>width$}", format_value(setting, value), width = VALUE_WIDTH),
                        Style::default().fg(theme.fg),
                    ),
                ])
            }
            SettingsRow::PauseOnHover => Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(
                    format!("{:<width$}", "Pause prompter on mouse hover", width = LABEL_WIDTH),
                    label_style,
                ),
                toggle_span(theme, app.state.pause_on_hover()),
            ]),
            SettingsRow::PlayPause => {
                let (icon, label, color) = if app.state.is_playing() {
                    ("⏸", "Pause", theme.paused)
                } else {
                    ("▶", "Play", theme.playing)
                };
                Line::from(vec![
                    Span::styled(marker, label_style),
                    Span::styled(
                        format!("[ {} {} ]", icon, label),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ])
            }
        }
    }
}

/// Filled and empty parts of a slider track for `value`
fn slider(setting: Setting, value: f64, width: usize) -> (String, String) {
    if width == 0 {
        return (String::new(), String::new());
    }
    let bounds = setting.bounds();
    let fraction = ((value - bounds.min) / (bounds.max - bounds.min)).clamp(0.0, 1.0);
    let knob = ((fraction * (width - 1) as f64).round() as usize).min(width - 1);
    let filled = format!("{}●", "━".repeat(knob));
    let rest = "─".repeat(width - knob - 1);
    (filled, rest)
}

fn format_value(setting: Setting, value: f64) -> String {
    format!("{} {}", value.round() as i64, setting.unit())
}

fn toggle_span(theme: &Theme, on: bool) -> Span<'static> {
    if on {
        let style = Style::default()
            .fg(theme.playing)
            .add_modifier(Modifier::BOLD);
        Span::styled("[ on  ]", style)
    } else {
        Span::styled("[ off ]", Style::default().fg(theme.muted))
    }
}

/// First line of the text, shortened to fit
fn first_line_preview(text: &str, width: usize) -> String {
    let budget = width.saturating_sub("Your text: ".len());
    let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("(empty)");
    if first.width() <= budget {
        return first.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in first.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > budget {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
