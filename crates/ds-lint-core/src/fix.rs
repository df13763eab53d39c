//! Autofix engine.
//!
//! Fixes are span edits resolved against the text as it is *now*, not the
//! text the violation was found in. A replacement is only applied when its
//! original token still sits, word-bounded, on the recorded line; running
//! the engine twice is therefore a no-op the second time. Edits of one file
//! are applied right to left, so earlier spans are never shifted by later
//! ones, and the file is written once.

use crate::registry::RuleRegistry;
use crate::result::{FileResult, ValidationRun};
use crate::types::{Replacement, Violation};
use crate::utils::is_word_bounded;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// A resolved text edit: replace `start..end` with `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset.
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Replacement text. Empty means removal.
    pub text: String,
}

impl Edit {
    /// Returns true if this edit deletes text.
    #[must_use]
    pub fn is_removal(&self) -> bool {
        self.text.is_empty()
    }

    fn overlaps(&self, other: &Edit) -> bool {
        self.start < other.end && other.start < self.end
    }

    fn covers(&self, other: &Edit) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// One applied fix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixLog {
    /// Rule name.
    pub rule: String,
    /// Rule code.
    pub code: String,
    /// Line of the original finding.
    pub line: usize,
    /// Column of the original finding.
    pub column: usize,
    /// Text before the fix.
    pub before: String,
    /// Text after the fix.
    pub after: String,
}

/// Resolves a replacement against the current `content`.
///
/// `original` must still sit word-bounded at the recorded line and column.
/// A copy elsewhere on the line is never touched, so a stale replacement
/// resolves to nothing once its own token has been fixed.
#[must_use]
pub fn resolve(content: &str, replacement: &Replacement) -> Option<Edit> {
    let original = replacement.original.as_str();
    if original.is_empty() || original == replacement.new_text {
        return None;
    }
    let line_start = line_start(content, replacement.location.line)?;
    let line_end = content[line_start..]
        .find('\n')
        .map_or(content.len(), |p| line_start + p);
    let line = &content[line_start..line_end];
    let pos = replacement.location.column;
    let end = pos.checked_add(original.len())?;
    if line.get(pos..end) != Some(original) || !is_word_bounded(line, pos, end) {
        return None;
    }

    Some(Edit {
        start: line_start + pos,
        end: line_start + pos + original.len(),
        text: replacement.new_text.clone(),
    })
}

fn line_start(content: &str, line: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    if line == 1 {
        return Some(0);
    }
    content
        .match_indices('\n')
        .nth(line - 2)
        .map(|(i, _)| i + 1)
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Applies `edits` to `content`.
///
/// Removals separated only by blanks are merged, then absorb the blanks
/// after them (or before them when nothing follows). A non-removal edit
/// that overlaps an accepted edit is dropped. Returns the new text and the
/// applied edits in ascending order.
#[must_use]
pub fn apply_edits(content: &str, edits: Vec<Edit>) -> (String, Vec<Edit>) {
    let bytes = content.as_bytes();
    let (mut removals, mut others): (Vec<Edit>, Vec<Edit>) = edits
        .into_iter()
        .filter(|e| e.start <= e.end && e.end <= content.len())
        .partition(Edit::is_removal);

    removals.sort_by_key(|e| (e.start, e.end));
    let mut merged: Vec<Edit> = Vec::new();
    for r in removals {
        if let Some(last) = merged.last_mut() {
            let gap_blank = r.start >= last.end && bytes[last.end..r.start].iter().all(|&b| is_blank(b));
            if r.start <= last.end || gap_blank {
                last.end = last.end.max(r.end);
                continue;
            }
        }
        merged.push(r);
    }

    for r in &mut merged {
        let mut end = r.end;
        while end < bytes.len() && is_blank(bytes[end]) {
            end += 1;
        }
        if end > r.end {
            r.end = end;
        } else {
            while r.start > 0 && is_blank(bytes[r.start - 1]) {
                r.start -= 1;
            }
        }
    }

    others.sort_by_key(|e| (e.start, e.end));
    let mut accepted = merged;
    for edit in others {
        if accepted.iter().any(|a| a.overlaps(&edit) || (a.start == edit.start && a.end == edit.end)) {
            debug!("Dropping overlapping edit at {}..{}", edit.start, edit.end);
            continue;
        }
        accepted.push(edit);
    }

    accepted.sort_by_key(|e| std::cmp::Reverse(e.start));
    let mut out = content.to_string();
    for edit in &accepted {
        if content.is_char_boundary(edit.start) && content.is_char_boundary(edit.end) {
            out.replace_range(edit.start..edit.end, &edit.text);
        }
    }
    accepted.reverse();
    (out, accepted)
}

/// Fixes `violations` in `content` using the rules in `registry`.
///
/// Violations of rules that are not registered or not fixable are ignored.
#[must_use]
pub fn fix_source(
    content: &str,
    violations: &[&Violation],
    registry: &RuleRegistry,
) -> (String, Vec<FixLog>) {
    let mut planned: Vec<(Edit, FixLog)> = Vec::new();
    for v in violations {
        let Some(registration) = registry.get(&v.rule) else {
            continue;
        };
        let rule = &registration.rule;
        if !rule.fixable() {
            continue;
        }
        let Some(edit) = rule.edit(content, v) else {
            debug!("No applicable fix for {} at line {}", v.code, v.location.line);
            continue;
        };
        let before = content[edit.start..edit.end].to_string();
        let log = FixLog {
            rule: rule.name().to_string(),
            code: rule.code().to_string(),
            line: v.location.line,
            column: v.location.column,
            before,
            after: edit.text.clone(),
        };
        planned.push((edit, log));
    }

    let (fixed, applied) = apply_edits(content, planned.iter().map(|(e, _)| e.clone()).collect());
    let mut logs: Vec<FixLog> = Vec::new();
    for (edit, log) in planned {
        if applied.iter().any(|a| a.covers(&edit) && (edit.is_removal() || a.text == edit.text))
            && !logs.contains(&log)
        {
            logs.push(log);
        }
    }
    (fixed, logs)
}

/// Applies every available fix of `run` to the files on disk.
///
/// Each file is re-read, fixed in memory and written back once. Files that
/// cannot be read or written are skipped with a warning.
#[must_use]
pub fn apply(run: &ValidationRun, registry: &RuleRegistry) -> BTreeMap<PathBuf, Vec<FixLog>> {
    let mut fixes = BTreeMap::new();

    for (relative, result) in &run.results {
        let FileResult::Rules(_) = result else {
            continue;
        };
        let violations: Vec<&Violation> = result
            .violations()
            .filter(|v| v.replacement().is_some())
            .filter(|v| registry.get(&v.rule).is_some_and(|r| r.rule.fixable()))
            .collect();
        if violations.is_empty() {
            continue;
        }

        let path = run.root.join(relative);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                warn!("Cannot re-read {} for fixing: {}", path.display(), e);
                continue;
            }
        };

        let (fixed, logs) = fix_source(&content, &violations, registry);
        if logs.is_empty() || fixed == content {
            continue;
        }
        if let Err(e) = std::fs::write(&path, &fixed) {
            warn!("Cannot write fixes to {}: {}", path.display(), e);
            continue;
        }
        debug!("Applied {} fix(es) to {}", logs.len(), relative.display());
        fixes.insert(relative.clone(), logs);
    }

    info!(
        "Autofix complete: {} fix(es) in {} file(s)",
        fixes.values().map(Vec::len).sum::<usize>(),
        fixes.len()
    );
    fixes
}
