//! # TUI Event Handling
//!
//! Keyboard input and tick event handling.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// TUI events
#[derive(Debug)]
pub enum Event {
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for periodic updates
    Tick,
}

/// Event handler that combines keyboard and tick events
pub struct EventHandler {
    /// Event receiver
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        // Spawn keyboard event handler
        std::thread::spawn(move || loop {
            if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) => {
                        if tx.send(Event::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => {
                        if tx.send(Event::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            } else {
                // Send tick on poll timeout
                if tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        EventHandler { rx }
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Key action result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// No action
    None,
    /// Quit the application
    Quit,
    /// Switch to screen
    SwitchScreen(crate::tui::Screen),
    /// Move selection up
    Up,
    /// Move selection down
    Down,
    /// Toggle deletion mark on the selected row
    ToggleMark,
    /// Delete marked rows
    Delete,
    /// Reload from the store
    Refresh,
    /// Jump to first row
    Home,
    /// Jump to last row
    End,
    /// Go back / Cancel
    Back,
    /// Move form focus to the next field
    NextField,
    /// Move form focus to the previous field
    PrevField,
    /// Adjust the focused selector left
    AdjustLeft,
    /// Adjust the focused selector right
    AdjustRight,
    /// Submit the form / confirm
    Submit,
    /// Character input
    Char(char),
    /// Backspace
    Backspace,
}

/// Map a key event to an action
///
/// The new-entry form owns most printable keys for text input, so its
/// mapping differs from the navigation mapping of the other screens.
pub fn map_key_event(key: KeyEvent, in_form: bool) -> KeyAction {
    if in_form {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
            (KeyCode::Esc, _) => KeyAction::Back,
            (KeyCode::Enter, _) => KeyAction::Submit,
            (KeyCode::Tab, _) | (KeyCode::Down, _) => KeyAction::NextField,
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => KeyAction::PrevField,
            (KeyCode::Left, _) => KeyAction::AdjustLeft,
            (KeyCode::Right, _) => KeyAction::AdjustRight,
            (KeyCode::Backspace, _) => KeyAction::Backspace,
            (KeyCode::Char(c), _) => KeyAction::Char(c),
            _ => KeyAction::None,
        }
    } else {
        match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

            // Screen switching
            (KeyCode::Char('1'), KeyModifiers::NONE) => {
                KeyAction::SwitchScreen(crate::tui::Screen::Overview)
            }
            (KeyCode::Char('2'), KeyModifiers::NONE) => {
                KeyAction::SwitchScreen(crate::tui::Screen::NewEntry)
            }
            (KeyCode::Char('?'), KeyModifiers::NONE) => {
                KeyAction::SwitchScreen(crate::tui::Screen::Help)
            }

            // Navigation
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::ToggleMark,
            (KeyCode::Esc, _) => KeyAction::Back,

            // Actions
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Refresh,
            (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,

            // Jumps
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::Home,
            (KeyCode::End, _) | (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::End,

            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_navigation_mapping() {
        assert_eq!(map_key_event(key(KeyCode::Char('q')), false), KeyAction::Quit);
        assert_eq!(
            map_key_event(key(KeyCode::Char('j')), false),
            KeyAction::Down
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char(' ')), false),
            KeyAction::ToggleMark
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('d')), false),
            KeyAction::Delete
        );
    }

    #[test]
    fn test_form_mapping_keeps_printable_keys_for_input() {
        assert_eq!(
            map_key_event(key(KeyCode::Char('q')), true),
            KeyAction::Char('q')
        );
        assert_eq!(
            map_key_event(key(KeyCode::Char('1')), true),
            KeyAction::Char('1')
        );
        assert_eq!(map_key_event(key(KeyCode::Enter), true), KeyAction::Submit);
        assert_eq!(map_key_event(key(KeyCode::Tab), true), KeyAction::NextField);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key_event(ctrl_c, false), KeyAction::Quit);
        assert_eq!(map_key_event(ctrl_c, true), KeyAction::Quit);
    }
}
