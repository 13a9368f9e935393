//! Best-effort page numbering for extracted text.
//!
//! Extracted text carries no reliable page boundaries, so the tracker counts
//! two kinds of hints while lines are scanned left to right:
//!
//! - a form feed (`\f`) anywhere in the raw line
//! - a bare number on its own line right after a blank line (a page footer)
//!
//! Documents without either hint stay on page 1 from start to end. That is
//! expected behavior, not an error.

/// Page-break marker emitted by text extractors.
pub const FORM_FEED: char = '\u{000C}';

/// Footer lines at or above this length are never treated as page numbers.
const MAX_FOOTER_LEN: usize = 50;

/// Per-document page counter. Create one per scan and thread it through by
/// value; it is never shared between documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTracker {
    page_count: usize,
    current_page: usize,
}

impl Default for PageTracker {
    fn default() -> Self {
        PageTracker {
            page_count: 0,
            current_page: 1,
        }
    }
}

impl PageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Page assigned to headings found on the most recently observed line.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of page breaks seen so far.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Observe `line` (raw, untrimmed) with `previous` being the raw line
    /// before it, and return the updated tracker.
    #[must_use]
    pub fn advance(self, previous: Option<&str>, line: &str) -> Self {
        if !is_page_break(previous, line) {
            return self;
        }

        let page_count = self.page_count + 1;
        PageTracker {
            page_count,
            current_page: page_count.max(1),
        }
    }
}

/// Whether `line` marks the start of a new page.
pub fn is_page_break(previous: Option<&str>, line: &str) -> bool {
    if line.contains(FORM_FEED) {
        return true;
    }

    let Some(previous) = previous else {
        return false;
    };

    let trimmed = line.trim();
    previous.trim().is_empty()
        && trimmed.chars().count() < MAX_FOOTER_LEN
        && is_bare_number(trimmed)
}

fn is_bare_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Split `text` into raw lines, each paired with the page it falls on.
///
/// A fresh [`PageTracker`] is used for every call.
pub fn paginate(text: &str) -> Vec<(usize, &str)> {
    let mut tracker = PageTracker::new();
    let mut previous = None;

    text.split('\n')
        .map(|line| {
            tracker = tracker.advance(previous, line);
            previous = Some(line);
            (tracker.current_page(), line)
        })
        .collect()
}
