//! Locale tag validation.
//!
//! Tags use `_` as separator: `language[_Script][_REGION]`, e.g. `fr`, `pt_BR`,
//! `zh_Hans_CN`. A tag is valid when it is well formed, written in canonical case,
//! and every subtag is known to the registry.

mod registry;

use std::{collections::BTreeSet, fs, path::Path};

use unic_langid::LanguageIdentifier;

use crate::error::TranslateError;

/// Name of the folder holding catalogs inside a project output directory.
pub const LOCALE_FOLDER: &str = "locale";

/// Name of the per-locale folder holding `.po`/`.mo` files.
pub const LC_MESSAGES: &str = "LC_MESSAGES";

/// A validated locale tag with its English display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    english_name: String,
}

impl Locale {
    /// Parse and validate a tag.
    pub fn parse(tag: &str) -> Result<Self, TranslateError> {
        resolve(tag).ok_or_else(|| TranslateError::InvalidLocale {
            locale: tag.to_string(),
        })
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// English display name, e.g. `Portuguese (Brazil)`.
    pub fn english_name(&self) -> &str {
        &self.english_name
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag)
    }
}

/// Check if a locale is a valid value. Never fails.
pub fn check_locale(locale: &str) -> bool {
    resolve(locale).is_some()
}

/// Check that every locale of a list is valid.
///
/// Stops at the first invalid value, before the caller touches the filesystem.
pub fn check_locales<S: AsRef<str>>(locales: &[S]) -> Result<(), TranslateError> {
    for locale in locales {
        let locale = locale.as_ref();
        if !check_locale(locale) {
            return Err(TranslateError::InvalidLocale {
                locale: locale.to_string(),
            });
        }
    }
    Ok(())
}

/// Find the locales present in `<output_dir>/locale/`, sorted.
///
/// Only folder names that are valid locales are returned; a missing folder yields none.
pub fn find_locales(output_dir: &Path) -> Vec<String> {
    let locale_path = output_dir.join(LOCALE_FOLDER);
    let Ok(entries) = fs::read_dir(&locale_path) else {
        return Vec::new();
    };

    let locales: BTreeSet<String> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(String::from))
        .filter(|name| check_locale(name))
        .collect();

    locales.into_iter().collect()
}

fn resolve(tag: &str) -> Option<Locale> {
    if tag.is_empty() || tag.contains('-') {
        return None;
    }

    let parts: Vec<&str> = tag.split('_').collect();
    if parts.len() > 3 || parts.iter().any(|p| p.is_empty()) {
        return None;
    }

    let langid: LanguageIdentifier = parts.join("-").parse().ok()?;

    let language = langid.language.as_str();
    let script = langid.script.as_ref().map(|s| s.as_str());
    let region = langid.region.as_ref().map(|r| r.as_str());

    // Canonical round trip rejects variants, wrong casing and misplaced subtags.
    let canonical: Vec<&str> = std::iter::once(language)
        .chain(script)
        .chain(region)
        .collect();
    if canonical != parts {
        return None;
    }

    let language_name = registry::language_name(language)?;
    let script_name = match script {
        Some(code) => Some(registry::script_name(code)?),
        None => None,
    };
    let region_name = match region {
        Some(code) => Some(registry::region_name(code)?),
        None => None,
    };

    let qualifiers: Vec<&str> = script_name.into_iter().chain(region_name).collect();
    let english_name = if qualifiers.is_empty() {
        language_name.to_string()
    } else {
        format!("{} ({})", language_name, qualifiers.join(", "))
    };

    Some(Locale {
        tag: tag.to_string(),
        english_name,
    })
}
