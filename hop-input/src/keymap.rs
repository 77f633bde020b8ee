//! Fixed key mapping for jump input

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::commands::{Command, Direction};

/// Handles keyboard input and converts to commands
#[derive(Debug)]
pub struct InputHandler {
    /// Count terminal auto-repeat as presses (some terminals report held keys as Repeat)
    accept_repeats: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            accept_repeats: true,
        }
    }

    /// Ignore key-repeat events, counting only distinct presses
    pub fn presses_only() -> Self {
        Self {
            accept_repeats: false,
        }
    }

    /// Handle a key event and return a command if applicable
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        match key.kind {
            KeyEventKind::Press => {}
            KeyEventKind::Repeat if self.accept_repeats => {}
            _ => return None,
        }

        match key.code {
            // Jumps (arrows, vim-style h/l)
            KeyCode::Right | KeyCode::Char('l') if key.modifiers.is_empty() => {
                Some(Command::Jump(Direction::Forward))
            }
            KeyCode::Left | KeyCode::Char('h') if key.modifiers.is_empty() => {
                Some(Command::Jump(Direction::Backward))
            }

            // Quit
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::Quit)
            }
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn repeat(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Repeat,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_arrows_map_to_jumps() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(key(KeyCode::Right)),
            Some(Command::Jump(Direction::Forward))
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Left)),
            Some(Command::Jump(Direction::Backward))
        );
    }

    #[test]
    fn test_vim_keys_map_to_jumps() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(key(KeyCode::Char('l'))),
            Some(Command::Jump(Direction::Forward))
        );
        assert_eq!(
            input.handle_key(key(KeyCode::Char('h'))),
            Some(Command::Jump(Direction::Backward))
        );
    }

    #[test]
    fn test_modified_arrow_is_not_a_jump() {
        let mut input = InputHandler::new();
        let event = KeyEvent::new(KeyCode::Right, KeyModifiers::SUPER);
        assert_eq!(input.handle_key(event), None);
    }

    #[test]
    fn test_quit_keys() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key(key(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(input.handle_key(key(KeyCode::Esc)), Some(Command::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(input.handle_key(ctrl_c), Some(Command::Quit));
    }

    #[test]
    fn test_release_ignored() {
        let mut input = InputHandler::new();
        let release = KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(input.handle_key(release), None);
    }

    #[test]
    fn test_repeat_policy() {
        let mut input = InputHandler::new();
        assert_eq!(
            input.handle_key(repeat(KeyCode::Right)),
            Some(Command::Jump(Direction::Forward))
        );

        let mut strict = InputHandler::presses_only();
        assert_eq!(strict.handle_key(repeat(KeyCode::Right)), None);
        assert_eq!(
            strict.handle_key(key(KeyCode::Right)),
            Some(Command::Jump(Direction::Forward))
        );
    }

    #[test]
    fn test_unmapped_key() {
        let mut input = InputHandler::new();
        assert_eq!(input.handle_key(key(KeyCode::Char('x'))), None);
    }
}
