//! Line-oriented parser for multi-file unified-diff text.
//!
//! The input is split on `'\n'` with the field after a final newline kept,
//! so a body that ends in a newline keeps it through the join. Trailing
//! all-empty lines terminate parsing instead of starting a section.

use tracing::debug;
use wcl_types::BlobId;

use crate::error::{DiffParseError, DiffResult};
use crate::record::FileDiff;

/// Parse a multi-file unified-diff stream into ordered per-file records.
///
/// The stream may describe zero or more files; records come back in
/// section order. Fails with [`DiffParseError::MalformedDiff`] when a
/// section header or its `index` line does not match where one is
/// required.
pub fn parse_diff_text(text: &str) -> DiffResult<Vec<FileDiff>> {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut records = Vec::new();
    let mut pos = 0;

    while !rest_is_blank(&lines, pos) {
        let header = lines[pos];
        let (a_path, b_path) = section_header(header).ok_or_else(|| malformed(pos, header))?;
        pos += 1;

        // Optional mode-change prefix: an `old mode` line is always
        // followed by its `new mode` partner.
        let mut a_mode = None;
        let mut b_mode = None;
        if let Some(mode) = line_at(&lines, pos).and_then(|l| l.strip_prefix("old mode ")) {
            a_mode = Some(mode.to_string());
            pos += 1;
            let partner = line_at(&lines, pos).unwrap_or("");
            let mode = partner
                .strip_prefix("new mode ")
                .ok_or_else(|| malformed(pos, partner))?;
            b_mode = Some(mode.to_string());
            pos += 1;
        }

        // A section that ends here carried only a mode change.
        if rest_is_blank(&lines, pos) || lines[pos].starts_with("diff --git") {
            records.push(FileDiff {
                a_path,
                b_path,
                a_id: None,
                b_id: None,
                a_mode,
                b_mode,
                new_file: false,
                deleted_file: false,
                body: None,
            });
            continue;
        }

        let mut new_file = false;
        let mut deleted_file = false;
        if let Some(mode) = lines[pos].strip_prefix("new file mode ") {
            b_mode = Some(mode.to_string());
            a_mode = None;
            new_file = true;
            pos += 1;
        } else if let Some(mode) = lines[pos].strip_prefix("deleted file mode ") {
            a_mode = Some(mode.to_string());
            b_mode = None;
            deleted_file = true;
            pos += 1;
        }

        let line = line_at(&lines, pos).unwrap_or("");
        let (raw_a, raw_b, trailing_mode) =
            index_line(line).ok_or_else(|| malformed(pos, line))?;
        pos += 1;
        if trailing_mode.is_some() {
            b_mode = trailing_mode;
        }

        // Body: everything up to the next section or end of input.
        let start = pos;
        while pos < lines.len() && !lines[pos].starts_with("diff") {
            pos += 1;
        }
        let joined = lines[start..pos].join("\n");
        let body = if joined.is_empty() { None } else { Some(joined) };

        let a_id = BlobId::from_listing(raw_a);
        let b_id = BlobId::from_listing(raw_b);
        records.push(FileDiff {
            a_path,
            b_path,
            new_file: new_file || a_id.is_none(),
            deleted_file: deleted_file || b_id.is_none(),
            a_id,
            b_id,
            a_mode,
            b_mode,
            body,
        });
    }

    debug!(records = records.len(), "parsed diff text");
    Ok(records)
}

fn malformed(pos: usize, found: &str) -> DiffParseError {
    DiffParseError::MalformedDiff {
        line: pos + 1,
        found: found.to_string(),
    }
}

fn line_at<'a>(lines: &[&'a str], pos: usize) -> Option<&'a str> {
    lines.get(pos).copied()
}

/// True when nothing but empty lines remains at `pos`.
fn rest_is_blank(lines: &[&str], pos: usize) -> bool {
    lines.len() <= pos || lines[pos..].iter().all(|l| l.is_empty())
}

/// `diff --git a/<A> b/<B>` -> `(A, B)`. The split point is the first
/// ` b/` occurrence, matching the lazy old-path capture of the format.
fn section_header(line: &str) -> Option<(String, String)> {
    let rest = line.strip_prefix("diff --git a/")?;
    let sep = rest.find(" b/")?;
    let a = &rest[..sep];
    let b = &rest[sep + 3..];
    if a.is_empty() || b.is_empty() {
        return None;
    }
    Some((a.to_string(), b.to_string()))
}

/// `index <a_id>..<b_id>[ <mode>]` -> ids plus the optional trailing mode.
fn index_line(line: &str) -> Option<(&str, &str, Option<String>)> {
    let rest = line.strip_prefix("index ")?;
    let (a, rest) = rest.split_once("..")?;
    let (b, mode) = match rest.split_once(' ') {
        Some((b, m)) => (b, Some(m.trim().to_string())),
        None => (rest, None),
    };
    if a.is_empty() || b.is_empty() || !is_hex(a) || !is_hex(b) {
        return None;
    }
    Some((a, b, mode.filter(|m| !m.is_empty())))
}

fn is_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_input_yields_no_records() {
        assert!(parse_diff_text("").unwrap().is_empty());
        assert!(parse_diff_text("\n\n").unwrap().is_empty());
    }

    #[test]
    fn mode_only_change() {
        let text = "diff --git a/x b/x\nold mode 100644\nnew mode 100755\n";
        let records = parse_diff_text(text).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.a_path, "x");
        assert_eq!(r.b_path, "x");
        assert_eq!(r.a_mode.as_deref(), Some("100644"));
        assert_eq!(r.b_mode.as_deref(), Some("100755"));
        assert!(r.a_id.is_none());
        assert!(r.b_id.is_none());
        assert!(!r.new_file);
        assert!(!r.deleted_file);
        assert!(r.body.is_none());
        assert!(r.is_mode_only());
    }

    #[test]
    fn new_file_section() {
        let text = "diff --git a/newly_added.txt b/newly_added.txt\n\
                    new file mode 100644\n\
                    index 0000000..86e041d\n\
                    --- /dev/null\n\
                    +++ b/newly_added.txt\n\
                    @@ -0,0 +1,3 @@\n\
                    +foo\n\
                    +bar\n\
                    +baz\n";
        let records = parse_diff_text(text).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.a_path, "newly_added.txt");
        assert_eq!(r.b_path, "newly_added.txt");
        assert!(r.a_id.is_none());
        assert_eq!(r.b_id.as_ref().unwrap().as_str(), "86e041d");
        assert!(r.a_mode.is_none());
        assert_eq!(r.b_mode.as_deref(), Some("100644"));
        assert!(r.new_file);
        assert!(!r.deleted_file);
        assert_eq!(
            r.body.as_deref(),
            Some("--- /dev/null\n+++ b/newly_added.txt\n@@ -0,0 +1,3 @@\n+foo\n+bar\n+baz\n")
        );
    }

    #[test]
    fn deleted_file_section() {
        let text = "diff --git a/removed.txt b/removed.txt\n\
                    deleted file mode 100644\n\
                    index 86e041d..0000000\n\
                    --- a/removed.txt\n\
                    +++ /dev/null\n\
                    @@ -1,3 +0,0 @@\n\
                    -foo\n\
                    -bar\n\
                    -baz\n";
        let records = parse_diff_text(text).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.a_id.as_ref().unwrap().as_str(), "86e041d");
        assert!(r.b_id.is_none());
        assert_eq!(r.a_mode.as_deref(), Some("100644"));
        assert!(r.b_mode.is_none());
        assert!(!r.new_file);
        assert!(r.deleted_file);
    }

    #[test]
    fn ordinary_edit_with_trailing_index_mode() {
        let text = "diff --git a/modified.txt b/modified.txt\n\
                    index a907ec3..86e041d 100644\n\
                    --- a/modified.txt\n\
                    +++ b/modified.txt\n\
                    @@ -1,2 +1,3 @@\n \
                    foo\n\
                    -bar\n\
                    +bar\n\
                    +baz\n";
        let records = parse_diff_text(text).unwrap();
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.a_id.as_ref().unwrap().as_str(), "a907ec3");
        assert_eq!(r.b_id.as_ref().unwrap().as_str(), "86e041d");
        assert_eq!(r.b_mode.as_deref(), Some("100644"));
        assert!(!r.new_file);
        assert!(!r.deleted_file);
    }

    #[test]
    fn zero_a_id_forces_new_file_without_marker() {
        let text = "diff --git a/x b/x\n\
                    index 0000000..86e041d\n\
                    --- /dev/null\n\
                    +++ b/x\n\
                    @@ -0,0 +1 @@\n\
                    +foo\n";
        let r = &parse_diff_text(text).unwrap()[0];
        assert!(r.new_file);
        assert!(r.a_id.is_none());
    }

    #[test]
    fn zero_b_id_forces_deleted_file_without_marker() {
        let text = "diff --git a/x b/x\n\
                    index 86e041d..0000000\n\
                    --- a/x\n\
                    +++ /dev/null\n\
                    @@ -1 +0,0 @@\n\
                    -foo\n";
        let r = &parse_diff_text(text).unwrap()[0];
        assert!(r.deleted_file);
        assert!(r.b_id.is_none());
    }

    #[test]
    fn body_keeps_trailing_newline() {
        let text = "diff --git a/x b/x\n\
                    index a907ec3..86e041d 100644\n\
                    --- a/x\n\
                    +++ b/x\n\
                    @@ -1 +1 @@\n\
                    -foo\n\
                    +bar\n";
        let r = &parse_diff_text(text).unwrap()[0];
        assert!(r.body.as_deref().unwrap().ends_with("+bar\n"));
    }

    #[test]
    fn bare_index_line_yields_no_body() {
        let text = "diff --git a/x b/x\nindex a907ec3..86e041d 100644\n";
        let r = &parse_diff_text(text).unwrap()[0];
        assert!(r.body.is_none());
    }

    #[test]
    fn multi_file_stream_keeps_section_order() {
        let text = "diff --git a/first.txt b/first.txt\n\
                    index 1910281..3bd1f0e 100644\n\
                    --- a/first.txt\n\
                    +++ b/first.txt\n\
                    @@ -1 +1,2 @@\n \
                    foo\n\
                    +bar\n\
                    diff --git a/second.txt b/second.txt\n\
                    old mode 100644\n\
                    new mode 100755\n\
                    diff --git a/third.txt b/third.txt\n\
                    new file mode 100644\n\
                    index 0000000..86e041d\n\
                    --- /dev/null\n\
                    +++ b/third.txt\n\
                    @@ -0,0 +1 @@\n\
                    +baz\n";
        let records = parse_diff_text(text).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].a_path, "first.txt");
        assert!(records[1].is_mode_only());
        assert_eq!(records[2].a_path, "third.txt");
        assert!(records[2].new_file);
    }

    #[test]
    fn header_with_differing_paths_is_a_rename_record() {
        let text = "diff --git a/old_name.txt b/new_name.txt\n\
                    index 86e041d..86e041d 100644\n";
        let r = &parse_diff_text(text).unwrap()[0];
        assert_eq!(r.a_path, "old_name.txt");
        assert_eq!(r.b_path, "new_name.txt");
    }

    #[test]
    fn missing_section_header_is_malformed() {
        let err = parse_diff_text("not a diff at all\n").unwrap_err();
        assert_eq!(
            err,
            DiffParseError::MalformedDiff {
                line: 1,
                found: "not a diff at all".to_string(),
            }
        );
    }

    #[test]
    fn missing_index_line_is_malformed() {
        let text = "diff --git a/x b/x\n--- a/x\n+++ b/x\n";
        let err = parse_diff_text(text).unwrap_err();
        assert_eq!(
            err,
            DiffParseError::MalformedDiff {
                line: 2,
                found: "--- a/x".to_string(),
            }
        );
    }

    #[test]
    fn non_hex_index_ids_are_malformed() {
        let text = "diff --git a/x b/x\nindex zzzz..86e041d\n";
        assert!(matches!(
            parse_diff_text(text),
            Err(DiffParseError::MalformedDiff { line: 2, .. })
        ));
    }

    #[test]
    fn old_mode_without_new_mode_is_malformed() {
        let text = "diff --git a/x b/x\nold mode 100644\nindex a..b\n";
        assert!(matches!(
            parse_diff_text(text),
            Err(DiffParseError::MalformedDiff { line: 3, .. })
        ));
    }

    #[test]
    fn second_malformed_section_reports_its_position() {
        let text = "diff --git a/x b/x\n\
                    index a907ec3..86e041d\n\
                    --- a/x\n\
                    +++ b/x\n\
                    @@ -1 +1 @@\n\
                    -foo\n\
                    +bar\n\
                    diff --git nonsense\n";
        let err = parse_diff_text(text).unwrap_err();
        assert_eq!(
            err,
            DiffParseError::MalformedDiff {
                line: 8,
                found: "diff --git nonsense".to_string(),
            }
        );
    }

    proptest! {
        #[test]
        fn parser_never_panics(input in "\\PC*") {
            let _ = parse_diff_text(&input);
        }

        #[test]
        fn absent_ids_always_set_their_flag(input in "\\PC*") {
            if let Ok(records) = parse_diff_text(&input) {
                for r in records {
                    prop_assert!(r.a_id.is_some() || r.new_file || r.is_mode_only());
                    prop_assert!(r.b_id.is_some() || r.deleted_file || r.is_mode_only());
                }
            }
        }
    }
}
