use {
    super::ViewOptions,
    crate::state::DashboardState,
    crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::io::Stdout,
};

/// Run the TUI event loop
///
/// Handles keyboard input and terminal resize. Every range change rebuilds
/// the report synchronously before the next draw.
pub fn run_ui(state: &mut DashboardState, options: &ViewOptions) -> Result<(), Box<dyn std::error::Error>> {
    // Setup terminal
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Enable raw mode for keyboard input
    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs from overlaying the dashboard
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;

    terminal.clear()?;

    let result = event_loop(&mut terminal, state, options);

    // Cleanup - restore terminal state even if the loop failed
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &mut DashboardState,
    options: &ViewOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| {
            let area = f.size();
            if let Err(e) = super::layout::render_layout(f, area, state, options) {
                log::error!("Layout render error: {}", e);
            }
        })?;

        // Non-blocking check for keyboard input; resize just triggers a redraw
        if crossterm::event::poll(options.tick)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break;
                }
                if !apply_key(state, key.code) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press to the dashboard state; `false` means quit
pub fn apply_key(state: &mut DashboardState, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return false,
        KeyCode::Tab | KeyCode::BackTab => state.toggle_bound(),
        KeyCode::Left => state.shift_days(-1),
        KeyCode::Right => state.shift_days(1),
        KeyCode::PageUp => state.shift_months(-1),
        KeyCode::PageDown => state.shift_months(1),
        KeyCode::Home => state.jump(false),
        KeyCode::End => state.jump(true),
        KeyCode::Char('r') => state.reset(),
        _ => {
            // Other keys are ignored
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dataset::Dataset,
        record::{Month, RideRecord, Season},
        state::ActiveBound,
    };
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn state() -> DashboardState {
        let records = (1..=28)
            .map(|d| RideRecord {
                date: NaiveDate::from_ymd_opt(2012, 2, d).unwrap(),
                hour: 9,
                month: Month::February,
                season: Season::Winter,
                year: 1,
                casual: 2,
                registered: 8,
                total: 10,
            })
            .collect();
        DashboardState::new(Arc::new(Dataset::from_records(records).unwrap()))
    }

    #[test]
    fn test_key_bindings() {
        let mut s = state();
        assert!(apply_key(&mut s, KeyCode::Right));
        assert!(apply_key(&mut s, KeyCode::Right));
        assert_eq!(s.range().start, NaiveDate::from_ymd_opt(2012, 2, 3).unwrap());
        assert_eq!(s.report().row_count, 26);

        assert!(apply_key(&mut s, KeyCode::Tab));
        assert_eq!(s.active_bound(), ActiveBound::End);
        assert!(apply_key(&mut s, KeyCode::Left));
        assert_eq!(s.range().end, NaiveDate::from_ymd_opt(2012, 2, 27).unwrap());

        assert!(apply_key(&mut s, KeyCode::Char('r')));
        assert_eq!(s.report().row_count, 28);

        assert!(apply_key(&mut s, KeyCode::Char('x')));
        assert!(!apply_key(&mut s, KeyCode::Char('q')));
        assert!(!apply_key(&mut s, KeyCode::Esc));
    }
}
