use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use prompter_core::{
    source::{spawn_file_watcher, TextSource},
    AppConfig,
};
use prompter_tui::{
    app::{App, Mode, SettingsRow},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    keymap::Keymap,
    load_theme,
    widgets::{PopupWidget, PrompterWidget, SettingsLayout, SettingsWidget, StatusBarWidget},
};

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Run the prompter until the user quits.
///
/// `saved_text` is written as the prompter text when settings are saved; it is
/// set when the displayed text came from a file or stdin.
pub async fn run(
    config: Arc<AppConfig>,
    source: TextSource,
    watch: bool,
    saved_text: Option<String>,
) -> Result<()> {
    let keymap = Keymap::from_config(&config.keymap);
    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme);

    // Reloaded text arrives on this channel
    let (text_tx, mut text_rx) = mpsc::unbounded_channel::<String>();
    let watcher = match (watch, source.watch_path()) {
        (true, Some(path)) => Some(spawn_file_watcher(
            path.to_path_buf(),
            config.source.watch_interval(),
            app.state.text().to_string(),
            text_tx,
        )),
        (true, None) => {
            warn!("--watch only applies to a text file, ignoring");
            None
        }
        (false, _) => None,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Notch Prompter")
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(
        speed = app.state.speed(),
        font_size = app.state.font_size(),
        playing = app.state.is_playing(),
        "prompter started"
    );

    let result = main_loop(
        &mut terminal,
        &mut app,
        &keymap,
        &mut text_rx,
        saved_text.as_deref(),
    );

    if let Some(handle) = watcher {
        handle.abort();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    info!("prompter stopped");
    result
}

fn main_loop(
    terminal: &mut Tui,
    app: &mut App,
    keymap: &Keymap,
    text_rx: &mut mpsc::UnboundedReceiver<String>,
    saved_text: Option<&str>,
) -> Result<()> {
    let mut events = EventHandler::new(
        app.config.ui.tick_duration(),
        app.config.ui.max_tick_delta(),
    );
    let mut frame_area = Rect::default();

    loop {
        // Apply reloaded text (non-blocking)
        while let Ok(text) = text_rx.try_recv() {
            app.replace_text(text);
        }

        terminal.draw(|frame| {
            frame_area = frame.area();
            let (main_area, status_area) =
                split_status_bar(frame_area, app.config.ui.show_status_bar);

            app.relayout(main_area);
            PrompterWidget::render(frame, app);

            match &app.mode {
                Mode::Normal => {}
                Mode::Settings => SettingsWidget::render(frame, app),
                Mode::EditText(_) => PopupWidget::render_editor(frame, app),
                Mode::Help => PopupWidget::render_help(frame, app),
            }

            if let Some(area) = status_area {
                StatusBarWidget::render(frame, area, app);
            }
        })?;

        if let Some(event) = events.next()? {
            match event {
                AppEvent::Tick(delta) => app.tick(delta),
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app, keymap);
                    handle_action(app, action, saved_text);
                }
                AppEvent::Mouse(mouse) => handle_mouse(app, mouse, frame_area),
                // Layout is recomputed on the next draw
                AppEvent::Resize(_, _) => {}
                AppEvent::FocusLost => app.pointer_left(),
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Main area plus a one-row status bar at the bottom, when enabled and there is room
fn split_status_bar(area: Rect, show: bool) -> (Rect, Option<Rect>) {
    if !show || area.height < 2 {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, frame_area: Rect) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            app.pointer_moved(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => {
            app.pointer_moved(mouse.column, mouse.row);
            if app.mode != Mode::Settings {
                return;
            }
            let layout = SettingsLayout::compute(frame_area, app.prompter_area);
            if let Some(index) = layout.row_at(mouse.column, mouse.row) {
                app.select_row(index);
                if !matches!(app.selected_row(), SettingsRow::Value(_)) {
                    app.activate_selected();
                }
            }
        }
        MouseEventKind::ScrollUp if app.mode == Mode::Settings => app.adjust_selected(1),
        MouseEventKind::ScrollDown if app.mode == Mode::Settings => app.adjust_selected(-1),
        _ => {}
    }
}

fn handle_action(app: &mut App, action: Action, saved_text: Option<&str>) {
    if action != Action::None && !app.is_input_mode() {
        app.clear_status();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::TogglePlay => app.toggle_play(),
        Action::OpenSettings => app.open_settings(),
        Action::EditText => app.begin_edit(),
        Action::Restart => app.restart(),
        Action::SaveSettings => save_settings(app, saved_text),
        Action::TogglePauseOnHover => app.toggle_pause_on_hover(),
        Action::SpeedUp => app.change_speed(1),
        Action::SpeedDown => app.change_speed(-1),
        Action::Help => app.mode = Mode::Help,
        Action::CloseOverlay => app.mode = Mode::Normal,
        Action::SettingsNext => app.settings_next(),
        Action::SettingsPrev => app.settings_prev(),
        Action::SettingsAdjust(steps) => app.adjust_selected(steps),
        Action::SettingsActivate => app.activate_selected(),
        Action::InputChar(c) => {
            if let Some(editor) = app.editor_mut() {
                editor.insert_char(c);
            }
        }
        Action::Newline => {
            if let Some(editor) = app.editor_mut() {
                editor.insert_newline();
            }
        }
        Action::Backspace => {
            if let Some(editor) = app.editor_mut() {
                editor.backspace();
            }
        }
        Action::CursorLeft => {
            if let Some(editor) = app.editor_mut() {
                editor.move_left();
            }
        }
        Action::CursorRight => {
            if let Some(editor) = app.editor_mut() {
                editor.move_right();
            }
        }
        Action::Confirm => app.commit_edit(),
        Action::Cancel => app.cancel_edit(),
        Action::None => {}
    }
}

/// Write the current prompter settings back to the config file
fn save_settings(app: &mut App, saved_text: Option<&str>) {
    let mut config = app.settings_snapshot();
    if let Some(text) = saved_text {
        config.prompter.text = text.to_string();
    }

    let path = AppConfig::config_path();
    match config.save_to(&path) {
        Ok(()) => {
            info!(path = %path.display(), "settings saved");
            app.set_status(format!("Settings saved to {}", path.display()));
        }
        Err(e) => {
            error!("Failed to save settings: {}", e);
            app.set_status(format!("Save failed: {}", e));
        }
    }
}
