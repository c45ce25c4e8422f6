//! In-memory filter/sort over the source catalogue
//!
//! The engine is a pure function over `(sources, query)`; keystroke
//! debouncing lives in [`Debouncer`], a deterministic policy the caller
//! drives with its own clock, so neither piece needs timers to test.

use std::time::{Duration, Instant};

use crate::sources::SourceSummary;

/// Debounce window the site uses between keystrokes and recomputation.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Name,
    Language,
}

/// One settled query over the catalogue. Empty `text` or `language` means
/// no constraint on that axis.
#[derive(Debug, Clone, Default)]
pub struct SourceQuery {
    pub text: String,
    pub language: String,
    pub sort: SortMode,
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Filter and sort the catalogue. Text matches case-insensitively as a
/// substring of name, id and language together; the language filter is
/// exact case-insensitive equality; both combine with AND.
pub fn filter_sources(sources: &[SourceSummary], query: &SourceQuery) -> Vec<SourceSummary> {
    let text = normalize(&query.text);
    let language = normalize(&query.language);

    let mut matched: Vec<SourceSummary> = sources
        .iter()
        .filter(|source| {
            if !language.is_empty() && normalize(&source.lang) != language {
                return false;
            }
            if text.is_empty() {
                return true;
            }
            let haystack =
                format!("{} {} {}", source.name, source.id, source.lang).to_lowercase();
            haystack.contains(&text)
        })
        .cloned()
        .collect();

    match query.sort {
        SortMode::Name => {
            matched.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        }
        SortMode::Language => {
            matched.sort_by(|a, b| {
                a.lang
                    .to_lowercase()
                    .cmp(&b.lang.to_lowercase())
                    .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            });
        }
    }

    matched
}

// ============================================================================
// Debouncer
// ============================================================================

/// Latest-wins debounce over typed query text.
///
/// Each [`submit`](Self::submit) replaces any pending text and restarts the
/// window; [`settle`](Self::settle) commits the pending text once the window
/// has elapsed. The caller owns the clock, so any scheduling policy works as
/// long as the settled text ends up matching the latest submission.
pub struct Debouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Record a keystroke's text, superseding any earlier pending text.
    pub fn submit(&mut self, text: &str, now: Instant) {
        self.pending = Some((text.to_string(), now));
    }

    /// Commit and return the pending text if its window has elapsed.
    pub fn settle(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, submitted)) if now.duration_since(*submitted) >= self.window => {
                self.pending.take().map(|(text, _)| text)
            }
            _ => None,
        }
    }

    /// The most recent submission, committed or not.
    pub fn latest(&self) -> Option<&str> {
        self.pending.as_ref().map(|(text, _)| text.as_str())
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
