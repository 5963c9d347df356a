use ratatui::{
    layout::Alignment,
    style::Style,
    text::Line,
    widgets::{Block, Clear, Padding, Paragraph},
    Frame,
};

use crate::app::App;

/// The borderless prompter viewport.
///
/// Draws padding, the text, the gap and the text again, scrolled by the
/// engine's offset and clipped to the prompter rectangle.
pub struct PrompterWidget;

impl PrompterWidget {
    pub fn render(frame: &mut Frame, app: &App) {
        let area = app.prompter_area;
        if area.is_empty() {
            return;
        }
        let Some(layout) = app.text_layout.as_ref() else {
            return;
        };

        let style = Style::default()
            .fg(app.theme.text)
            .bg(app.theme.background);

        let lines: Vec<Line> = layout
            .rendered_lines()
            .into_iter()
            .map(Line::from)
            .collect();

        let block = Block::default()
            .style(style)
            .padding(Padding::horizontal(layout.padding_cols));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .scroll((app.scroll_rows(), 0));

        frame.render_widget(Clear, area);
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use prompter_core::AppConfig;
    use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    fn row_text(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect::<String>()
    }

    fn render(app: &mut App) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal
            .draw(|frame| {
                app.relayout(frame.area());
                PrompterWidget::render(frame, app);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn app_with_text(text: &str) -> App {
        let mut config = AppConfig::default();
        config.prompter.text = text.to_string();
        config.prompter.autoplay = false;
        App::new(Arc::new(config), Theme::default())
    }

    #[test]
    fn test_renders_two_copies_below_padding() {
        let mut app = app_with_text("alpha\nbeta");
        let buffer = render(&mut app);

        // prompter starts at row 1, one padding row, then the text
        assert_eq!(app.prompter_area, Rect::new(9, 1, 41, 6));
        assert!(row_text(&buffer, 2).contains("alpha"));
        assert!(row_text(&buffer, 3).contains("beta"));
        assert!(row_text(&buffer, 4).contains("alpha"));
        assert!(row_text(&buffer, 5).contains("beta"));
    }

    #[test]
    fn test_offset_scrolls_rows() {
        let mut app = app_with_text("alpha\nbeta");
        render(&mut app);
        app.state.set_playing(true);
        // 10 pt/s for 2.5 s = 25 pt, one 22 pt row
        app.tick(Duration::from_millis(2500));
        let buffer = render(&mut app);
        assert!(row_text(&buffer, 1).contains("alpha"));
        assert!(row_text(&buffer, 2).contains("beta"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let mut app = app_with_text("");
        let buffer = render(&mut app);
        assert!(row_text(&buffer, 2).contains("Put some text"));
    }

    #[test]
    fn test_rows_outside_prompter_untouched() {
        let mut app = app_with_text("alpha");
        let buffer = render(&mut app);
        assert_eq!(row_text(&buffer, 0).trim(), "");
        assert_eq!(row_text(&buffer, 8).trim(), "");
    }
}
