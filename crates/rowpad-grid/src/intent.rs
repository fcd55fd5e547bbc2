// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

/// Keys the grid interprets. Everything else stays inside the cell
/// editor and never reaches the navigation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Left,
    Right,
    Up,
    Down,
    Enter,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub shift: bool,
}

impl KeyInput {
    pub const fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub const fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

/// Caret position inside the focused cell's text, as reported by the
/// rendering adapter. Both flags are true for empty text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub at_start: bool,
    pub at_end: bool,
}

impl Caret {
    pub const fn at(cursor: usize, len: usize) -> Self {
        Self {
            at_start: cursor == 0,
            at_end: cursor == len,
        }
    }
}

/// What a keystroke means for the grid, separated from how the
/// browserless adapter delivered it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    MoveNext,
    MovePrev,
    MoveUp,
    MoveDown,
    TriggerSearch,
    None,
}

/// Pure keyboard-intent resolver. Horizontal arrows only become
/// navigation when the caret already sits at the matching text
/// boundary; otherwise the key keeps moving the caret in-field.
pub fn resolve_key(input: KeyInput, caret: Caret) -> NavIntent {
    match input.key {
        Key::Tab if input.shift => NavIntent::MovePrev,
        Key::Tab => NavIntent::MoveNext,
        Key::Right if caret.at_end => NavIntent::MoveNext,
        Key::Left if caret.at_start => NavIntent::MovePrev,
        Key::Right | Key::Left => NavIntent::None,
        Key::Up => NavIntent::MoveUp,
        Key::Down => NavIntent::MoveDown,
        Key::Enter => NavIntent::TriggerSearch,
        Key::Escape => NavIntent::None,
    }
}
