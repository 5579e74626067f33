//! Gettext PO/POT files, read and written with `polib`.
//!
//! polib keeps the references of a message as one `source` string; they are
//! split into [`Occurrence`]s here so templates can be merged and sorted by
//! line. Obsolete (`#~`) entries are not carried by polib and are dropped on
//! both read and write.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use polib::{
    catalog::Catalog as PoCatalog,
    message::{Message, MessageFlags},
    metadata::CatalogMetadata,
    po_file,
};
use tempfile::NamedTempFile;

use super::{Catalog, MessageEntry, Occurrence};
use crate::error::TranslateError;

pub fn read(path: &Path) -> Result<Catalog> {
    let parsed = po_file::parse(path).map_err(|err| TranslateError::CatalogParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let entries = parsed
        .messages()
        .map(|message| MessageEntry {
            msgctxt: non_empty(message.msgctxt()),
            msgid: message.msgid().to_string(),
            msgid_plural: message.msgid_plural().ok().and_then(non_empty),
            msgstr: message.msgstr().unwrap_or_default().to_string(),
            msgstr_plural: message
                .msgstr_plural()
                .map(|forms| forms.to_vec())
                .unwrap_or_default(),
            occurrences: parse_references(message.source()),
            comment: non_empty(message.comments()),
            flags: message.flags().iter().cloned().collect(),
            obsolete: false,
        })
        .collect();

    Ok(Catalog {
        header: header_from(&parsed.metadata),
        entries,
    })
}

/// Write through a sibling temporary file renamed over `path`, so a failure
/// leaves the previous file untouched.
pub fn write(catalog: &Catalog, path: &Path) -> Result<()> {
    let mut po = PoCatalog::new(metadata_from(&catalog.header)?);
    for entry in catalog.entries.iter().filter(|e| !e.obsolete) {
        po.append_or_update(to_message(entry));
    }

    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    po_file::write(&po, tmp.path())
        .with_context(|| format!("Failed to write catalog: {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Split a reference list (`a.py:3 b.ts:10`) into occurrences. A reference
/// without a numeric line suffix keeps its full text as the path.
pub fn parse_references(source: &str) -> Vec<Occurrence> {
    source
        .split_whitespace()
        .map(|reference| {
            reference
                .rsplit_once(':')
                .and_then(|(path, line)| Some(Occurrence::new(path, line.parse().ok()?)))
                .unwrap_or_else(|| Occurrence {
                    path: reference.to_string(),
                    line: None,
                })
        })
        .collect()
}

fn header_from(metadata: &CatalogMetadata) -> Vec<(String, String)> {
    let rules = &metadata.plural_rules;
    let plural_forms = if rules.expr.is_empty() {
        String::new()
    } else {
        format!("nplurals={}; plural={};", rules.nplurals, rules.expr)
    };

    [
        ("Project-Id-Version", metadata.project_id_version.as_str()),
        ("POT-Creation-Date", metadata.pot_creation_date.as_str()),
        ("PO-Revision-Date", metadata.po_revision_date.as_str()),
        ("Last-Translator", metadata.last_translator.as_str()),
        ("Language-Team", metadata.language_team.as_str()),
        ("Language", metadata.language.as_str()),
        ("MIME-Version", metadata.mime_version.as_str()),
        ("Content-Type", metadata.content_type.as_str()),
        (
            "Content-Transfer-Encoding",
            metadata.content_transfer_encoding.as_str(),
        ),
        ("Plural-Forms", plural_forms.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect()
}

fn metadata_from(header: &[(String, String)]) -> Result<CatalogMetadata> {
    let text: String = header
        .iter()
        .map(|(key, value)| format!("{}: {}\n", key, value))
        .collect();
    CatalogMetadata::parse(&text).map_err(|err| anyhow!("Invalid catalog header: {err}"))
}

fn to_message(entry: &MessageEntry) -> Message {
    let mut flags = MessageFlags::new();
    for flag in &entry.flags {
        flags.add_flag(flag);
    }
    let source = entry
        .occurrences
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    let msgctxt = entry.msgctxt.clone().unwrap_or_default();
    let comments = entry.comment.clone().unwrap_or_default();

    match &entry.msgid_plural {
        Some(msgid_plural) => Message::build_plural()
            .with_msgctxt(msgctxt)
            .with_msgid(entry.msgid.clone())
            .with_msgid_plural(msgid_plural.clone())
            .with_msgstr_plural(entry.msgstr_plural.clone())
            .with_source(source)
            .with_comments(comments)
            .with_flags(flags)
            .done(),
        None => Message::build_singular()
            .with_msgctxt(msgctxt)
            .with_msgid(entry.msgid.clone())
            .with_msgstr(entry.msgstr.clone())
            .with_source(source)
            .with_comments(comments)
            .with_flags(flags)
            .done(),
    }
}
