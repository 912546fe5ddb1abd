use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::KeyBindings;

/// Host-independent key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Left,
    Right,
}

/// Ordered, duplicate-free sequence of the keys currently held down.
/// Later entries were pressed more recently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyHistory {
    keys: Vec<Key>,
}

impl KeyHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the key unless it is already held. Returns whether it was added.
    pub fn press(&mut self, key: Key) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Removes the key if held. Returns whether it was removed.
    pub fn release(&mut self, key: Key) -> bool {
        match self.position(key) {
            Some(index) => {
                self.keys.remove(index);
                true
            }
            None => false,
        }
    }

    /// Index of the key in press order, `None` if not held
    pub fn position(&self, key: Key) -> Option<usize> {
        self.keys.iter().position(|k| *k == key)
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// True when `key` is held and was pressed after `other` (or `other` is not held)
    pub fn is_more_recent(&self, key: Key, other: Key) -> bool {
        // None orders below every Some, so an absent key never wins
        self.position(key) > self.position(other)
    }

    /// Latest press position among `keys`, `None` if none of them is held
    pub fn latest(&self, keys: &[Key]) -> Option<usize> {
        keys.iter().filter_map(|key| self.position(*key)).max()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// What the host should forward to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
    Quit,
}

/// Polls crossterm and translates raw key events into [`InputEvent`]s
pub struct InputManager {
    bindings: KeyBindings,
    /// When the terminal never reports releases, a key counts as released
    /// once this long has passed without a press or repeat
    release_timeout: Option<Duration>,
    held: Vec<(Key, Instant)>,
    events: Vec<InputEvent>,
}

impl InputManager {
    /// Terminal-repeat interval is usually ~30ms after an initial ~500ms delay
    pub const DEFAULT_RELEASE_TIMEOUT: Duration = Duration::from_millis(550);

    /// `reports_release` should be true when keyboard enhancement flags were pushed
    pub fn new(bindings: KeyBindings, reports_release: bool) -> Self {
        Self {
            bindings,
            release_timeout: (!reports_release).then_some(Self::DEFAULT_RELEASE_TIMEOUT),
            held: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Polls all pending terminal events without blocking.
    /// Should be called once per frame before taking events.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        let now = Instant::now();
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, now);
            }
        }
        self.expire_held(now);
        Ok(())
    }

    /// Returns and clears the events gathered since the last call
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Processes a single key event
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        if matches!(key_event.code, KeyCode::Esc)
            || (matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
                && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            if key_event.kind == KeyEventKind::Press {
                self.events.push(InputEvent::Quit);
            }
            return;
        }

        let Some(key) = self.translate(key_event.code) else {
            return;
        };

        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if self.release_timeout.is_some() {
                    match self.held.iter_mut().find(|(k, _)| *k == key) {
                        Some(entry) => entry.1 = now,
                        None => self.held.push((key, now)),
                    }
                }
                self.events.push(InputEvent::Pressed(key));
            }
            KeyEventKind::Release => {
                self.held.retain(|(k, _)| *k != key);
                self.events.push(InputEvent::Released(key));
            }
        }
    }

    /// Synthesizes releases for keys whose presses have gone stale
    pub fn expire_held(&mut self, now: Instant) {
        let Some(timeout) = self.release_timeout else {
            return;
        };
        let events = &mut self.events;
        self.held.retain(|(key, last_seen)| {
            let stale = now.saturating_duration_since(*last_seen) >= timeout;
            if stale {
                events.push(InputEvent::Released(*key));
            }
            !stale
        });
    }

    /// Maps a terminal key code onto the logical key it stands for.
    /// Arrows keep their own keys so they can be held alongside the letter
    /// bindings. Space aliases the fire binding, which only acts on key-down.
    fn translate(&self, code: KeyCode) -> Option<Key> {
        match code {
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Char(' ') => Some(self.bindings.fire),
            KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
            _ => None,
        }
    }
}
