use crate::Result;
use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::warn;
use std::time::Duration;

/// what the foreground loop can be asked to do from outside
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// the generation-reset button: throw the field away and start over
    Reset,
    /// host only: power off
    Quit,
}

/// map of keyboard characters to board inputs
const KEYMAP: [(char, Key); 4] = [
    ('r', Key::Reset),
    (' ', Key::Reset),
    ('q', Key::Quit),
    ('Q', Key::Quit),
];

/// reads button presses
pub trait Input {
    /// the next pending press, if any; never waits
    fn poll(&mut self) -> Result<Option<Key>>;
}

/// keyboard input via crossterm, in raw mode for as long as it's alive
pub struct KeyboardInput {
    reset_button: bool,
}

impl KeyboardInput {
    /// `reset_button` is the firmware option for fitting the reset button at
    /// all; without it only quitting is possible
    pub fn new(reset_button: bool) -> Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(KeyboardInput { reset_button })
    }
}

/// turn a key event into a board input
fn map_key(code: KeyCode, modifiers: KeyModifiers, reset_button: bool) -> Option<Key> {
    match code {
        KeyCode::Esc => Some(Key::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Key::Quit),
        KeyCode::Char(c) => match KEYMAP.iter().find(|(k, _)| *k == c) {
            Some((_, Key::Reset)) if !reset_button => None,
            Some((_, key)) => Some(*key),
            None => {
                warn!("no button mapped to {:?}", c);
                None
            }
        },
        _ => None,
    }
}

impl Drop for KeyboardInput {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            warn!("couldn't leave raw mode: {}", e);
        }
    }
}

impl Input for KeyboardInput {
    fn poll(&mut self) -> Result<Option<Key>> {
        while poll(Duration::from_millis(0))? {
            if let Event::Key(evt) = read()? {
                if let Some(key) = map_key(evt.code, evt.modifiers, self.reset_button) {
                    return Ok(Some(key));
                }
            }
        }
        Ok(None)
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    keys: Vec<Key>,
}

impl DummyInput {
    pub fn new(keys: &[Key]) -> Self {
        DummyInput {
            keys: keys.iter().rev().copied().collect(),
        }
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<Option<Key>> {
        Ok(self.keys.pop())
    }
}
