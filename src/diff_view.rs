use crate::alignment::matcher::{SequenceMatcher, Tag};

// @module: Unified diff rendering for text comparison

/// Render a line-based unified diff between two texts.
///
/// Output follows the usual `---`/`+++`/`@@` layout with `context` equal
/// lines around each hunk. Identical inputs produce an empty string.
pub fn unified_diff(a: &str, b: &str, from_label: &str, to_label: &str, context: usize) -> String {
    let a_lines: Vec<&str> = a.lines().collect();
    let b_lines: Vec<&str> = b.lines().collect();

    let matcher = SequenceMatcher::new(&a_lines, &b_lines);
    let groups = matcher.grouped_opcodes(context);
    if groups.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- {}\n", from_label));
    out.push_str(&format!("+++ {}\n", to_label));

    for group in groups {
        let (Some(&first), Some(&last)) = (group.first(), group.last()) else {
            continue;
        };
        out.push_str(&format!(
            "@@ -{} +{} @@\n",
            format_range(first.a1, last.a2),
            format_range(first.b1, last.b2)
        ));

        for op in group {
            match op.tag {
                Tag::Equal => {
                    for line in &a_lines[op.a1..op.a2] {
                        out.push_str(&format!(" {}\n", line));
                    }
                }
                Tag::Replace | Tag::Delete => {
                    for line in &a_lines[op.a1..op.a2] {
                        out.push_str(&format!("-{}\n", line));
                    }
                    if op.tag == Tag::Replace {
                        for line in &b_lines[op.b1..op.b2] {
                            out.push_str(&format!("+{}\n", line));
                        }
                    }
                }
                Tag::Insert => {
                    for line in &b_lines[op.b1..op.b2] {
                        out.push_str(&format!("+{}\n", line));
                    }
                }
            }
        }
    }

    out
}

/// Hunk header range: 1-based start with a length, collapsing the
/// single-line and empty cases the way diff tools expect.
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    if length == 1 {
        format!("{}", start + 1)
    } else if length == 0 {
        format!("{},0", start)
    } else {
        format!("{},{}", start + 1, length)
    }
}
