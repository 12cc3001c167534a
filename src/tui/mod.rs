pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::ThemeColors;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let result = loop {
        // Every pass redraws the whole screen from the current state
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            None => {
                tracing::warn!("terminal event stream closed");
                break Ok(());
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => {
            match key.code {
                // Quit
                KeyCode::Char('q') => app.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.should_quit = true
                }

                // Tab switching
                KeyCode::Tab => app.toggle_tab(),

                // Help
                KeyCode::Char('?') => app.show_help(),

                _ => match app.current_tab {
                    app::Tab::Guided => handle_guided_key(app, key),
                    app::Tab::Review => handle_review_key(app, key),
                },
            }
        }
        app::InputMode::EditText => {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => app.finish_answer_input(),
                KeyCode::Backspace => {
                    app.text_input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.text_input.push(c);
                }
                // Ignore all other keys (don't propagate to Normal mode)
                _ => {}
            }
        }
        app::InputMode::ChooseOption => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.finish_answer_input(),
            KeyCode::Char('j') | KeyCode::Down => app.move_option(1),
            KeyCode::Char('k') | KeyCode::Up => app.move_option(-1),
            _ => {}
        },
        app::InputMode::UploadPath => {
            match key.code {
                KeyCode::Enter => app.confirm_upload_input(),
                KeyCode::Esc => app.cancel_upload_input(),
                KeyCode::Backspace => {
                    app.upload_input.pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.upload_input.push(c);
                }
                _ => {}
            }
        }
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}

fn handle_guided_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Navigation
        KeyCode::Char('h') | KeyCode::Left => app.advance(-1),
        KeyCode::Char('l') | KeyCode::Right => app.advance(1),

        // Role filter
        KeyCode::Char('r') => app.cycle_role(1),
        KeyCode::Char('R') => app.cycle_role(-1),

        // Answer input
        KeyCode::Enter | KeyCode::Char('e') => app.start_answer_input(),

        // Save
        KeyCode::Char('s') => {
            if app.save_answer().is_none() {
                app.show_flash("Error: no question to answer for this role".to_string());
            }
        }

        KeyCode::Char('n') => app.new_record(),

        _ => {}
    }
}

fn handle_review_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.next_row(),
        KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
        KeyCode::Char('u') => app.start_upload_input(),
        KeyCode::Char('c') => app.clear_upload(),
        KeyCode::Char('d') => app.export_high(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Table;
    use crate::questions::builtin_questions;
    use crate::scoring::ScoringConfig;
    use std::path::PathBuf;
    use std::time::Duration;

    fn app() -> App {
        App::new(
            builtin_questions().unwrap(),
            Table::default(),
            ScoringConfig::default(),
            PathBuf::from("high_risks.csv"),
            Duration::from_secs(3),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_typing_an_answer_and_saving() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, app::InputMode::EditText);
        for c in "Welding".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        // 'q' while editing is text, not quit
        press(&mut app, KeyCode::Char('q'));
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('s'));

        assert!(!app.should_quit);
        let field = app.current_question().unwrap().field.clone();
        assert_eq!(
            app.session.table().get(0, &field).map(|v| v.to_string()),
            Some("Welding".to_string())
        );
    }

    #[test]
    fn test_navigation_keys_wrap() {
        let mut app = app();
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session.cursor(), app.session.visible_len() - 1);
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.session.cursor(), 0);
    }

    #[test]
    fn test_help_dismissed_by_any_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.input_mode, app::InputMode::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.input_mode, app::InputMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
