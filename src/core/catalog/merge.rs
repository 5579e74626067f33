//! Template building: occurrence path rewriting and deduplication.

use std::{collections::HashMap, path::Path};

use super::{Catalog, MessageEntry};
use crate::config::NEWLINE_PLACEHOLDER;

/// Normalize separators to `/` and strip `root` from the front of `path`.
///
/// Paths outside `root` keep their (normalized) form.
pub fn relativize(path: &str, root: &str) -> String {
    let path = path.replace('\\', "/");
    let root = root.replace('\\', "/");
    let root = root.trim_end_matches('/');

    if root.is_empty() {
        return path;
    }

    match path.strip_prefix(root) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => {
            rest.trim_start_matches('/').to_string()
        }
        _ => path,
    }
}

/// Rewrite every occurrence of `catalog` relative to `root`, then append `extra`
/// entries (rewritten the same way).
pub fn fix_locations(catalog: &mut Catalog, root: &Path, extra: Vec<MessageEntry>) {
    let root = root.to_string_lossy();
    catalog.entries.extend(extra);

    for entry in &mut catalog.entries {
        for occurrence in &mut entry.occurrences {
            occurrence.path = relativize(&occurrence.path, &root);
        }
    }
}

/// Merge entries sharing `(msgctxt, msgid)`.
///
/// Occurrence lists are unioned and sorted; the first entry of a group keeps its
/// other fields, filling gaps from later duplicates. Entries are ordered by their
/// occurrence lists (stable for ties). Newline placeholders are restored first, so
/// running this twice gives the same catalog.
pub fn remove_duplicates(catalog: Catalog) -> Catalog {
    let Catalog { header, entries } = catalog;

    let mut merged: Vec<MessageEntry> = Vec::with_capacity(entries.len());
    let mut index: HashMap<(Option<String>, String), usize> = HashMap::new();

    for mut entry in entries.into_iter().map(restore_newlines) {
        let key = (entry.msgctxt.clone(), entry.msgid.clone());
        match index.get(&key) {
            Some(&idx) => merge_into(&mut merged[idx], entry),
            None => {
                entry.occurrences.sort();
                entry.occurrences.dedup();
                index.insert(key, merged.len());
                merged.push(entry);
            }
        }
    }

    merged.sort_by(|a, b| a.occurrences.cmp(&b.occurrences));

    Catalog {
        header,
        entries: merged,
    }
}

fn merge_into(target: &mut MessageEntry, duplicate: MessageEntry) {
    target.occurrences.extend(duplicate.occurrences);
    target.occurrences.sort();
    target.occurrences.dedup();

    if target.msgid_plural.is_none() {
        target.msgid_plural = duplicate.msgid_plural;
    }
    if target.comment.is_none() {
        target.comment = duplicate.comment;
    }
    for flag in duplicate.flags {
        if !target.flags.contains(&flag) {
            target.flags.push(flag);
        }
    }
}

fn restore_newlines(mut entry: MessageEntry) -> MessageEntry {
    let restore = |s: &mut String| {
        if s.contains(NEWLINE_PLACEHOLDER) {
            *s = s.replace(NEWLINE_PLACEHOLDER, "\n");
        }
    };
    restore(&mut entry.msgid);
    restore(&mut entry.msgstr);
    if let Some(msgctxt) = entry.msgctxt.as_mut() {
        restore(msgctxt);
    }
    if let Some(plural) = entry.msgid_plural.as_mut() {
        restore(plural);
    }
    if let Some(comment) = entry.comment.as_mut() {
        restore(comment);
    }
    entry
}
