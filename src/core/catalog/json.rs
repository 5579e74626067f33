//! Conversion of a locale catalog into the JSON bundle loaded by the web client.
//!
//! ```json
//! {
//!   "": { "domain": "jupyterlab", "language": "es", "plural_forms": "...", "version": "..." },
//!   "File": ["Archivo"],
//!   "schema\u0004Open": ["Abrir"],
//!   "%1 file": ["%1 archivo", "%1 archivos"]
//! }
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use super::Catalog;

/// Separator between context and message id in bundle keys.
pub const CONTEXT_SEPARATOR: char = '\u{0004}';

const DEFAULT_PLURAL_FORMS: &str = "nplurals=2; plural=(n != 1);";

/// Build the JSON bundle for `catalog`.
///
/// Obsolete, fuzzy and untranslated entries are left out, so the client falls
/// back to the source string for them.
pub fn catalog_to_json(catalog: &Catalog, domain: &str) -> Value {
    let mut bundle = Map::new();
    bundle.insert(
        String::new(),
        json!({
            "domain": domain,
            "language": catalog.metadata("Language").unwrap_or_default(),
            "plural_forms": catalog.metadata("Plural-Forms").unwrap_or(DEFAULT_PLURAL_FORMS),
            "version": catalog.metadata("Project-Id-Version").unwrap_or_default(),
        }),
    );

    for entry in &catalog.entries {
        if entry.obsolete || entry.is_fuzzy() || !entry.is_translated() {
            continue;
        }

        let key = match &entry.msgctxt {
            Some(ctx) => format!("{}{}{}", ctx, CONTEXT_SEPARATOR, entry.msgid),
            None => entry.msgid.clone(),
        };

        let translations: Vec<Value> = if entry.msgid_plural.is_some() {
            entry
                .msgstr_plural
                .iter()
                .map(|s| Value::String(s.clone()))
                .collect()
        } else {
            vec![Value::String(entry.msgstr.clone())]
        };

        bundle.insert(key, Value::Array(translations));
    }

    Value::Object(bundle)
}

/// Convert the catalog at `po_path` and write `<output_dir>/<domain>.json`.
pub fn convert_catalog_to_json(po_path: &Path, output_dir: &Path, domain: &str) -> Result<PathBuf> {
    let catalog = Catalog::from_file(po_path)?;
    let bundle = catalog_to_json(&catalog, domain);

    let json_path = output_dir.join(format!("{}.json", domain));
    let content = serde_json::to_string_pretty(&bundle)
        .with_context(|| format!("Failed to serialize {}", json_path.display()))?;
    fs::write(&json_path, content + "\n")
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    Ok(json_path)
}
