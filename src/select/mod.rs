//! Single-item selection among worktree display lines: substring filtering,
//! an fzf delegate, and a numbered-menu fallback.

mod filter;
mod fzf;
mod prompt;

use std::io;

use thiserror::Error;

pub use filter::{filter_by_query, Match, SCORE_EXACT, SCORE_PREFIX, SCORE_SUBSTRING};
pub use fzf::FzfPicker;
pub use prompt::NumberedPrompt;

#[derive(Debug, Error)]
pub enum SelectError {
    #[error("no items to select from")]
    NoItems,
    #[error("selection cancelled")]
    Cancelled,
    #[error("no matching item found: {query}")]
    NoMatches { query: String },
    #[error("invalid input: {input}")]
    InvalidInput { input: String },
    #[error("number out of range: {value} (expected 1-{max})")]
    OutOfRange { value: usize, max: usize },
    #[error("interactive picker failed: {detail}")]
    PickerFailed { detail: String },
    #[error("failed to read selection")]
    Io(#[from] io::Error),
}

/// A backend that presents `items` and resolves the user's choice to an
/// index. Cancellation is a distinct result, never conflated with failure.
pub trait InteractivePicker {
    fn pick(&self, items: &[String], prompt: &str) -> Result<usize, SelectError>;
}

/// Select one of `items`.
///
/// A single item resolves to index 0 without any I/O. With more than one
/// item, delegate to fzf when it is installed and the caller did not opt
/// out; otherwise fall back to the numbered menu on stderr/stdin.
pub fn select(items: &[String], prompt: &str, no_picker: bool) -> Result<usize, SelectError> {
    if items.is_empty() {
        return Err(SelectError::NoItems);
    }
    if items.len() == 1 {
        return Ok(0);
    }
    if !no_picker && FzfPicker::available() {
        return FzfPicker.pick(items, prompt);
    }
    NumberedPrompt.pick(items, prompt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_empty_is_no_items() {
        assert!(matches!(
            select(&[], "pick", true),
            Err(SelectError::NoItems)
        ));
    }

    #[test]
    fn test_select_single_item_auto_resolves() {
        // Must not touch stdin/stdout: a hang here would fail the test run.
        let items = vec!["only-one".to_string()];
        assert_eq!(select(&items, "pick", true).expect("auto-resolve"), 0);
        assert_eq!(select(&items, "pick", false).expect("auto-resolve"), 0);
    }
}
