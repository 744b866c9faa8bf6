//! Line diff used by `--dry-run --diff`.
//!
//! Stripping never inserts text, so lines are compared position by position. Changed regions
//! are printed with three lines of context in a unified-diff like layout.

use colored::*;

const CONTEXT: usize = 3;

/// Generate a diff between the original and stripped content
pub fn generate_diff(original: &str, modified: &str, file_path: &str) -> String {
    let mut diff = String::new();

    diff.push_str(&format!("--- {file_path}\n"));
    diff.push_str(&format!("+++ {file_path} (stripped)\n"));

    let original_lines: Vec<&str> = original.lines().collect();
    let modified_lines: Vec<&str> = modified.lines().collect();
    let max_lines = original_lines.len().max(modified_lines.len());

    let hunks = changed_hunks(&original_lines, &modified_lines);
    if hunks.is_empty() {
        diff.push_str("No changes\n");
        return diff;
    }

    for (start, end) in hunks {
        let end = end.min(max_lines);
        let header = format!("@@ -{},{} +{},{} @@", start + 1, end - start, start + 1, end - start);
        diff.push_str(&format!("{}\n", header.cyan()));

        for i in start..end {
            let orig_line = original_lines.get(i).copied();
            let mod_line = modified_lines.get(i).copied();

            match (orig_line, mod_line) {
                (Some(o), Some(m)) if o == m => diff.push_str(&format!(" {o}\n")),
                (Some(o), Some(m)) => {
                    diff.push_str(&format!("{}\n", format!("-{o}").red()));
                    diff.push_str(&format!("{}\n", format!("+{m}").green()));
                }
                (Some(o), None) => diff.push_str(&format!("{}\n", format!("-{o}").red())),
                (None, Some(m)) => diff.push_str(&format!("{}\n", format!("+{m}").green())),
                (None, None) => {}
            }
        }
    }

    diff
}

/// Line ranges `[start, end)` covering every changed line plus context, with overlapping hunks merged.
fn changed_hunks(original: &[&str], modified: &[&str]) -> Vec<(usize, usize)> {
    let max_lines = original.len().max(modified.len());
    let mut hunks: Vec<(usize, usize)> = Vec::new();

    for i in 0..max_lines {
        if original.get(i) == modified.get(i) {
            continue;
        }
        let start = i.saturating_sub(CONTEXT);
        let end = (i + 1 + CONTEXT).min(max_lines);
        match hunks.last_mut() {
            Some(last) if start <= last.1 => last.1 = end,
            _ => hunks.push((start, end)),
        }
    }

    hunks
}
