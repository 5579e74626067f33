//! Synchronization of locale catalogs against the template.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};

use super::{
    context::TranslateContext,
    extract::{TemplateSummary, extract_translations},
    locale::{LC_MESSAGES, LOCALE_FOLDER, check_locales, find_locales},
    tools::babel_sync,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// A new catalog was created from the template.
    Init,
    /// An existing catalog was merged with the template.
    Update,
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncAction::Init => write!(f, "created"),
            SyncAction::Update => write!(f, "updated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedCatalog {
    pub locale: String,
    pub po_path: PathBuf,
    pub action: SyncAction,
}

/// Path of the catalog for `domain` and `locale` inside `locale_dir`.
pub fn po_path(locale_dir: &Path, domain: &str, locale: &str) -> PathBuf {
    locale_dir
        .join(locale)
        .join(LC_MESSAGES)
        .join(format!("{}.po", domain))
}

/// Create or update the catalog of `locale` from the template at `pot_path`.
///
/// The domain is the template's file stem.
pub fn update_catalogs(
    ctx: &TranslateContext,
    pot_path: &Path,
    locale_dir: &Path,
    locale: &str,
) -> Result<SyncedCatalog> {
    check_locales(&[locale])?;

    let domain = pot_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("Invalid template path: {}", pot_path.display()))?;
    let po_path = po_path(locale_dir, &domain, locale);
    let action = if po_path.is_file() {
        SyncAction::Update
    } else {
        SyncAction::Init
    };

    let invocation = babel_sync(
        &ctx.config.tools.babel,
        action == SyncAction::Update,
        &domain,
        pot_path,
        locale_dir,
        locale,
    )?;
    ctx.runner.run(&invocation)?;

    Ok(SyncedCatalog {
        locale: locale.to_string(),
        po_path,
        action,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateSummary {
    pub template: TemplateSummary,
    pub catalogs: Vec<SyncedCatalog>,
}

/// Regenerate the template, then synchronize `locales` (or every locale
/// already present under `<output_dir>/locale/` when empty).
pub fn update_translations(
    ctx: &TranslateContext,
    root: &Path,
    output_dir: &Path,
    project: &str,
    locales: &[String],
) -> Result<UpdateSummary> {
    check_locales(locales)?;

    let template = extract_translations(ctx, root, output_dir, project)?;
    let locale_dir = output_dir.join(LOCALE_FOLDER);
    let locales = if locales.is_empty() {
        find_locales(output_dir)
    } else {
        locales.to_vec()
    };

    let catalogs = locales
        .iter()
        .map(|locale| update_catalogs(ctx, &template.pot_path, &locale_dir, locale))
        .collect::<Result<Vec<_>>>()?;

    Ok(UpdateSummary { template, catalogs })
}
