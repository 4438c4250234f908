//! Insertion/deletion counts derived from a record's raw body.

use serde::{Deserialize, Serialize};

use crate::record::FileDiff;

/// Line counts for one file's diff body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    /// Lines added on the new side.
    pub insertions: usize,
    /// Lines removed from the old side.
    pub deletions: usize,
}

impl FileDiff {
    /// Count insertions and deletions in this record's body.
    ///
    /// A well-formed single-file body contains exactly one `---` and one
    /// `+++` header line; the counts discount that pair. The
    /// `\ No newline at end of file` marker contributes to neither side.
    /// A record without a body (mode-only change) counts as `(0, 0)`.
    pub fn stats(&self) -> DiffStats {
        let body = match &self.body {
            Some(body) => body,
            None => return DiffStats::default(),
        };

        let mut plus = 0usize;
        let mut minus = 0usize;
        for line in body.split('\n') {
            if line.starts_with('+') {
                plus += 1;
            } else if line.starts_with('-') {
                minus += 1;
            }
        }

        DiffStats {
            insertions: plus.saturating_sub(1),
            deletions: minus.saturating_sub(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_body(body: Option<&str>) -> FileDiff {
        FileDiff {
            a_path: "x".to_string(),
            b_path: "x".to_string(),
            a_id: None,
            b_id: None,
            a_mode: None,
            b_mode: None,
            new_file: false,
            deleted_file: false,
            body: body.map(str::to_string),
        }
    }

    #[test]
    fn missing_body_counts_nothing() {
        assert_eq!(with_body(None).stats(), DiffStats::default());
    }

    #[test]
    fn pure_addition() {
        let r = with_body(Some(
            "--- /dev/null\n+++ b/newly_added.txt\n@@ -0,0 +1,3 @@\n+foo\n+bar\n+baz\n",
        ));
        assert_eq!(
            r.stats(),
            DiffStats {
                insertions: 3,
                deletions: 0,
            }
        );
    }

    #[test]
    fn pure_removal() {
        let r = with_body(Some(
            "--- a/removed.txt\n+++ /dev/null\n@@ -1,3 +0,0 @@\n-foo\n-bar\n-baz\n",
        ));
        assert_eq!(
            r.stats(),
            DiffStats {
                insertions: 0,
                deletions: 3,
            }
        );
    }

    #[test]
    fn no_newline_marker_counts_for_neither_side() {
        let r = with_body(Some(
            "--- a/modified.txt\n+++ b/modified.txt\n@@ -1,2 +1,3 @@\n foo\n-bar\n\\ No newline at end of file\n+bar\n+baz\n",
        ));
        assert_eq!(
            r.stats(),
            DiffStats {
                insertions: 2,
                deletions: 1,
            }
        );
    }

    #[test]
    fn context_lines_count_for_neither_side() {
        let r = with_body(Some(
            "--- a/x\n+++ b/x\n@@ -1,3 +1,3 @@\n foo\n-bar\n+qux\n baz\n",
        ));
        assert_eq!(
            r.stats(),
            DiffStats {
                insertions: 1,
                deletions: 1,
            }
        );
    }

    #[test]
    fn headerless_body_saturates_at_zero() {
        let r = with_body(Some("@@ -0,0 +0,0 @@\n"));
        assert_eq!(r.stats(), DiffStats::default());
    }
}
