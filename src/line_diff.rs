use similar::{Algorithm, ChangeTag, TextDiff};

use crate::types::diff_range::{DiffKind, DiffRange};

/// Changed line ranges of `current` compared to `previous`, for gutter
/// markers.
///
/// A run of changed lines that replaced old ones is a `Modify` range, a run
/// of new lines an `Add` range. Lines that were only removed leave a
/// zero-width `Delete` marker on the line that now follows them, or on the
/// last line if they were removed from the end.
///
/// ```
/// use unravel_text::{DiffKind, diff_lines};
///
/// let ranges = diff_lines("a\nb\nc", "a\nX\nc");
///
/// assert_eq!(ranges.len(), 1);
/// assert_eq!(ranges[0].kind(), DiffKind::Modify);
/// assert_eq!((ranges[0].start_line(), ranges[0].end_line()), (2, 2));
/// ```
#[must_use]
pub fn diff_lines(previous: &str, current: &str) -> Vec<DiffRange> {
    let previous_lines: Vec<&str> = previous.split('\n').collect();
    let current_lines: Vec<&str> = current.split('\n').collect();
    let last_line = current_lines.len().max(1);

    let mut ranges = Vec::new();
    let mut hunk = Hunk::default();
    let mut current_line = 0;

    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(&previous_lines, &current_lines);

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                ranges.extend(hunk.classify(last_line));
                current_line += 1;
                hunk = Hunk::starting_at(current_line);
            }
            ChangeTag::Delete => hunk.removed += 1,
            ChangeTag::Insert => {
                hunk.added += 1;
                current_line += 1;
            }
        }
    }
    ranges.extend(hunk.classify(last_line));

    ranges
}

/// Changes between two runs of unchanged lines.
#[derive(Debug, Default)]
struct Hunk {
    /// 0-based index of the first line of the current text after the
    /// preceding unchanged run.
    start: usize,
    removed: usize,
    added: usize,
}

impl Hunk {
    fn starting_at(start: usize) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    fn classify(&self, last_line: usize) -> Option<DiffRange> {
        let first = self.start + 1;
        match (self.removed, self.added) {
            (0, 0) => None,
            (0, added) => Some(DiffRange::new(DiffKind::Add, first, first + added - 1)),
            (_, 0) => {
                let marker = first.min(last_line);
                Some(DiffRange::new(DiffKind::Delete, marker, marker))
            }
            (_, added) => Some(DiffRange::new(DiffKind::Modify, first, first + added - 1)),
        }
    }
}
