//! Interactive script picker.
//!
//! A small ratatui menu over the compiled scripts/docs tables: scripts are
//! listed by group, free text filters them fuzzily over their
//! `"name - description"` strings, Enter returns the chosen name.

mod app;
mod ui;

pub use app::{build_entries, PickerApp, PickerEntry, Row, DEFAULT_GROUP};

use std::io;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// Run the picker until a script is chosen or the user cancels.
///
/// Returns the chosen script name, or `None` on Esc / Ctrl+C.
pub fn pick_script(entries: Vec<PickerEntry>) -> Result<Option<String>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut picker = PickerApp::new(entries);
    let result = event_loop(&mut terminal, &mut picker);

    // Restore the terminal even when the loop failed.
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    picker: &mut PickerApp,
) -> Result<Option<String>> {
    loop {
        terminal.draw(|frame| ui::render(frame, picker))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Esc => return Ok(None),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(None)
                }
                KeyCode::Enter => {
                    if let Some(entry) = picker.selected() {
                        return Ok(Some(entry.name.clone()));
                    }
                }
                KeyCode::Up => picker.move_up(),
                KeyCode::Down => picker.move_down(),
                KeyCode::Backspace => picker.pop_char(),
                KeyCode::Char(c) => picker.push_char(c),
                _ => {}
            }
        }
    }
}
