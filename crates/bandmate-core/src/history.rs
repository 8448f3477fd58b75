//! Navigation history
//!
//! The router commits every successful navigation to a [`History`]. The
//! in-memory version backs tests and non-browser hosts; `bandmate-wasm`
//! provides one on top of `window.history`.

use crate::Result;

/// Ordered list of committed locations with a cursor
pub trait History {
    /// Location at the cursor
    fn location(&self) -> Option<String>;

    /// Add an entry after the cursor, dropping any forward entries
    fn push(&mut self, path: &str) -> Result<()>;

    /// Overwrite the entry at the cursor
    fn replace(&mut self, path: &str) -> Result<()>;

    /// Location `delta` entries away from the cursor, without moving
    fn peek(&self, delta: isize) -> Option<String>;

    /// Move the cursor by `delta`. Returns the new location, or `None`
    /// (cursor unchanged) when the move would leave the history.
    fn go(&mut self, delta: isize) -> Option<String>;

    /// Record a move the host already performed (browser back button).
    /// Same contract as [`History::go`] but never drives the host.
    fn moved(&mut self, delta: isize) -> Option<String> {
        self.go(delta)
    }

    /// Number of entries
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory history
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn position(&self) -> usize {
        self.cursor
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Option<String> {
        self.entries.get(self.cursor).cloned()
    }

    fn push(&mut self, path: &str) -> Result<()> {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(path.to_string());
        self.cursor = self.entries.len() - 1;
        Ok(())
    }

    fn replace(&mut self, path: &str) -> Result<()> {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = path.to_string(),
            None => self.entries.push(path.to_string()),
        }
        Ok(())
    }

    fn peek(&self, delta: isize) -> Option<String> {
        let target = self.cursor.checked_add_signed(delta)?;
        self.entries.get(target).cloned()
    }

    fn go(&mut self, delta: isize) -> Option<String> {
        let target = self.cursor.checked_add_signed(delta)?;
        let entry = self.entries.get(target)?.clone();
        self.cursor = target;
        Some(entry)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
