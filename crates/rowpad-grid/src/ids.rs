// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

/// Client-side identity for an unsaved row. Stable for the row's
/// lifetime regardless of content edits, and never tied to any
/// server-assigned id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(u64);

impl RowId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic issuer of [`RowId`]s. Injected into the store so tests
/// can assert deterministic ids; ids are never reused within one
/// source, even across cancel-and-restart of add mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowIdSource {
    next: u64,
}

impl RowIdSource {
    pub const fn new() -> Self {
        Self { next: 0 }
    }

    pub const fn starting_at(next: u64) -> Self {
        Self { next }
    }

    pub fn issue(&mut self) -> RowId {
        let id = RowId(self.next);
        self.next += 1;
        id
    }
}

impl Default for RowIdSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{RowId, RowIdSource};

    #[test]
    fn issues_sequential_ids() {
        let mut source = RowIdSource::new();
        assert_eq!(source.issue(), RowId::new(0));
        assert_eq!(source.issue(), RowId::new(1));
        assert_eq!(source.issue(), RowId::new(2));
    }

    #[test]
    fn starting_offset_is_respected() {
        let mut source = RowIdSource::starting_at(40);
        assert_eq!(source.issue().get(), 40);
        assert_eq!(source.issue().get(), 41);
    }
}
