//! Input processing for the CLI client.
//!
//! This module owns the keyboard-to-command mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent};
use strum::IntoEnumIterator;
use tactics_core::Command;

pub mod debounce;
pub use debounce::InputDebouncer;

/// Errors raised when editing key bindings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyMapError {
    #[error("key {0:?} is reserved and cannot be bound")]
    Reserved(KeyCode),
}

/// Many-to-one binding table from terminal key codes to [`Command`]s.
///
/// Several keys may trigger the same command, but a key triggers at most one
/// command: binding a key replaces whatever it was bound to before. Letter
/// keys are matched without regard to case.
#[derive(Clone, Debug)]
pub struct KeyMapper {
    bindings: HashMap<KeyCode, Command>,
}

impl Default for KeyMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMapper {
    /// Keys the client keeps for itself (quitting).
    pub const RESERVED: [KeyCode; 1] = [KeyCode::Esc];

    /// Creates a mapper with the default bindings.
    pub fn new() -> Self {
        let mut mapper = Self::empty();
        mapper.reset_default_bindings();
        mapper
    }

    /// Creates a mapper with no bindings at all.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Restores arrows and WASD for directions, Enter/Z for A, Space/X for B.
    pub fn reset_default_bindings(&mut self) {
        self.bindings.clear();

        let defaults = [
            (KeyCode::Up, Command::Up),
            (KeyCode::Down, Command::Down),
            (KeyCode::Left, Command::Left),
            (KeyCode::Right, Command::Right),
            (KeyCode::Char('w'), Command::Up),
            (KeyCode::Char('s'), Command::Down),
            (KeyCode::Char('a'), Command::Left),
            (KeyCode::Char('d'), Command::Right),
            (KeyCode::Enter, Command::A),
            (KeyCode::Char('z'), Command::A),
            (KeyCode::Char(' '), Command::B),
            (KeyCode::Char('x'), Command::B),
        ];
        self.bindings.extend(defaults);
    }

    /// Binds `key` to `command`, returning the command it was bound to before.
    pub fn bind_key(&mut self, key: KeyCode, command: Command) -> Result<Option<Command>, KeyMapError> {
        if Self::RESERVED.contains(&key) {
            return Err(KeyMapError::Reserved(key));
        }
        Ok(self.bindings.insert(normalize(key), command))
    }

    /// Removes the binding of `key`, returning the command it triggered.
    pub fn clear_key(&mut self, key: KeyCode) -> Option<Command> {
        self.bindings.remove(&normalize(key))
    }

    /// Removes every key bound to `command`, returning how many were removed.
    pub fn clear_command(&mut self, command: Command) -> usize {
        let before = self.bindings.len();
        self.bindings.retain(|_, bound| *bound != command);
        before - self.bindings.len()
    }

    /// Keys currently bound to `command`, in no particular order.
    pub fn keys_for(&self, command: Command) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == command)
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn command_for_code(&self, key: KeyCode) -> Option<Command> {
        self.bindings.get(&normalize(key)).copied()
    }

    /// Converts a raw key event into a command, if the key is bound.
    pub fn command_for(&self, event: KeyEvent) -> Option<Command> {
        self.command_for_code(event.code)
    }

    /// Commands that currently have no key at all.
    pub fn unbound_commands(&self) -> Vec<Command> {
        Command::iter()
            .filter(|command| !self.bindings.values().any(|bound| bound == command))
            .collect()
    }
}

fn normalize(key: KeyCode) -> KeyCode {
    match key {
        KeyCode::Char(ch) => KeyCode::Char(ch.to_ascii_lowercase()),
        other => other,
    }
}
