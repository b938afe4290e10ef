//! Thread list with selection and pin state
//!
//! Selection and pinning are independent: pinning never moves the
//! selection, and pane collapse never touches either.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: String,
    pub title: String,
    /// Preview of the last message
    pub last: String,
    pub updated: NaiveDate,
    #[serde(default)]
    pub pinned: bool,
}

/// Ordered threads plus at most one selected id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadList {
    threads: Vec<Thread>,
    selected: Option<String>,
}

impl ThreadList {
    /// Selection starts on the first thread, if any.
    pub fn new(threads: Vec<Thread>) -> Self {
        let selected = threads.first().map(|t| t.id.clone());
        Self { threads, selected }
    }

    /// Threads from a JSON array.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(content)?))
    }

    /// The 24 demo threads shown by the chat screen.
    pub fn sample() -> Self {
        let mut threads = Vec::with_capacity(24);
        for i in 0..24u32 {
            let Some(updated) = NaiveDate::from_ymd_opt(2025, 9, i % 28 + 1) else {
                continue;
            };
            let title = if i % 5 == 0 {
                format!("Urgent: Model cost check #{}", i + 1)
            } else {
                format!("Design sync / v{}", i % 7 + 1)
            };
            let last = if i % 3 == 0 {
                "Let's ship it today."
            } else {
                "Refine system prompts & retry."
            };
            threads.push(Thread {
                id: format!("t-{}", i + 1),
                title,
                last: last.to_string(),
                updated,
                pinned: i % 7 == 0,
            });
        }
        Self::new(threads)
    }

    pub fn threads(&self) -> &[Thread] {
        &self.threads
    }

    pub fn len(&self) -> usize {
        self.threads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected(&self) -> Option<&Thread> {
        let id = self.selected.as_deref()?;
        self.threads.iter().find(|t| t.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        let id = self.selected.as_deref()?;
        self.threads.iter().position(|t| t.id == id)
    }

    /// Select by id. Unknown ids leave the selection unchanged.
    pub fn select(&mut self, id: &str) -> bool {
        if self.threads.iter().any(|t| t.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        self.step(1);
    }

    pub fn select_prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: isize) {
        if self.threads.is_empty() {
            return;
        }
        let last = self.threads.len() - 1;
        let next = match self.selected_index() {
            Some(idx) => idx.saturating_add_signed(delta).min(last),
            None => 0,
        };
        self.selected = Some(self.threads[next].id.clone());
    }

    /// Flip one thread's pin. Returns the new pin state, `None` for an
    /// unknown id.
    pub fn toggle_pin(&mut self, id: &str) -> Option<bool> {
        let thread = self.threads.iter_mut().find(|t| t.id == id)?;
        thread.pinned = !thread.pinned;
        Some(thread.pinned)
    }

    /// Pinned threads in list order.
    pub fn pinned(&self) -> impl Iterator<Item = &Thread> {
        self.threads.iter().filter(|t| t.pinned)
    }
}
