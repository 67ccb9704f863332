pub mod state;
pub mod view;

use crate::config::Config;
use crate::model::Grid;
use crate::storage::{self, LocalStorage};
use crate::tui::state::{AppState, InputMode};
use crate::tui::view::draw;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{io, time::Duration};

pub fn run() -> Result<()> {
    // Panic Hook: raw mode eats the panic message otherwise
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("gridate_panic.log")
        {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));

    let cfg = Config::load_or_default();
    let records = match &cfg.data_file {
        Some(path) => LocalStorage::load_from(path)?,
        None => {
            let stored = LocalStorage::load()?;
            if stored.is_empty() {
                storage::sample_records()
            } else {
                stored
            }
        }
    };
    let grid = Grid::from_records(records);
    let mut app_state = AppState::new(grid, cfg.light_switch);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        terminal.draw(|f| draw(f, &mut app_state))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Mouse(mouse_event) => match mouse_event.kind {
                MouseEventKind::ScrollDown => app_state.next(),
                MouseEventKind::ScrollUp => app_state.previous(),
                _ => {}
            },
            Event::Key(key) => match app_state.mode {
                InputMode::Editing => match key.code {
                    KeyCode::Enter => app_state.commit_edit(),
                    KeyCode::Esc => {
                        app_state.mode = InputMode::Normal;
                        app_state.reset_input();
                    }
                    KeyCode::Char(c) => app_state.enter_char(c),
                    KeyCode::Backspace => app_state.delete_char(),
                    KeyCode::Left => app_state.move_cursor_left(),
                    KeyCode::Right => app_state.move_cursor_right(),
                    _ => {}
                },
                InputMode::Searching => match key.code {
                    KeyCode::Enter => {
                        app_state.search_query = app_state.input_buffer.clone();
                        app_state.mode = InputMode::Normal;
                        app_state.reset_input();
                        app_state.recalculate_view();
                    }
                    KeyCode::Esc => {
                        app_state.search_query.clear();
                        app_state.mode = InputMode::Normal;
                        app_state.reset_input();
                        app_state.recalculate_view();
                    }
                    KeyCode::Char(c) => {
                        app_state.enter_char(c);
                        app_state.recalculate_view();
                    }
                    KeyCode::Backspace => {
                        app_state.delete_char();
                        app_state.recalculate_view();
                    }
                    KeyCode::Left => app_state.move_cursor_left(),
                    KeyCode::Right => app_state.move_cursor_right(),
                    _ => {}
                },
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => break,
                    KeyCode::Down | KeyCode::Char('j') => app_state.next(),
                    KeyCode::Up | KeyCode::Char('k') => app_state.previous(),
                    KeyCode::Left | KeyCode::Char('h') => app_state.previous_column(),
                    KeyCode::Right | KeyCode::Char('l') => app_state.next_column(),
                    KeyCode::PageDown => app_state.jump_forward(10),
                    KeyCode::PageUp => app_state.jump_backward(10),
                    KeyCode::Char('e') => app_state.begin_edit(),
                    KeyCode::Char('/') => {
                        app_state.mode = InputMode::Searching;
                        app_state.input_buffer = app_state.search_query.clone();
                        app_state.cursor_position = app_state.input_buffer.chars().count();
                    }
                    KeyCode::Char('f') => app_state.cycle_date_filter(),
                    KeyCode::Char('t') => app_state.toggle_theme(),
                    KeyCode::Char('s') => {
                        let result = match &cfg.data_file {
                            Some(path) => LocalStorage::save_to(path, &app_state.grid.rows),
                            None => LocalStorage::save(&app_state.grid.rows),
                        };
                        match result {
                            Ok(()) => {
                                app_state.dirty = false;
                                app_state.message = "Saved.".to_string();
                            }
                            Err(e) => app_state.message = format!("Error: {}", e),
                        }
                    }
                    _ => {}
                },
            },
            _ => {} // Handle Resize events etc if needed
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
