//! Top-level operations for single packages and for the language-pack
//! repository.
//!
//! Every operation that takes locales validates all of them before touching
//! the filesystem or running a tool.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::{
    core::{
        TranslateContext,
        catalog::json::convert_catalog_to_json,
        compile::{compile_translations, mo_path},
        extract::{TemplateSummary, extract_translations},
        locale::check_locales,
        pack::{PlacedArtifacts, place_artifacts},
        sync::{UpdateSummary, update_translations},
    },
    error::TranslateError,
};

/// Project names are used as gettext domains: lowercase, `-` → `_`.
pub fn normalize_project(project: &str) -> String {
    project.to_lowercase().replace('-', "_")
}

/// Compiled outputs of one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledCatalog {
    pub locale: String,
    pub po_path: PathBuf,
    pub mo_path: PathBuf,
    pub json_path: PathBuf,
    /// Set when the artifacts were moved into a language pack.
    pub placed: Option<PlacedArtifacts>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileSummary {
    pub project: String,
    pub catalogs: Vec<CompiledCatalog>,
}

fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(TranslateError::MissingOutputDir {
            path: path.to_path_buf(),
        }
        .into())
    }
}

/// Output directory of `project` inside the language-pack repository:
/// `<lp_repo>/<project>` for the platform, `<lp_repo>/<extensionsFolder>/<project>`
/// otherwise.
pub fn language_pack_output_dir(ctx: &TranslateContext, lp_repo: &Path, project: &str) -> PathBuf {
    if project == ctx.config.platform_project {
        lp_repo.join(project)
    } else {
        lp_repo.join(&ctx.config.extensions_folder).join(project)
    }
}

fn prepare_language_pack_output_dir(
    ctx: &TranslateContext,
    lp_repo: &Path,
    project: &str,
) -> Result<PathBuf> {
    let output_dir = language_pack_output_dir(ctx, lp_repo, project);
    if project != ctx.config.platform_project {
        fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create directory {}", output_dir.display()))?;
    }
    Ok(output_dir)
}

/// Compile catalogs and write the JSON bundle next to each `.po` file.
fn compile_with_json(
    ctx: &TranslateContext,
    output_dir: &Path,
    project: &str,
    locales: &[String],
) -> Result<Vec<CompiledCatalog>> {
    let po_paths = compile_translations(ctx, output_dir, project, locales)?;

    let mut catalogs = Vec::with_capacity(po_paths.len());
    for (locale, po_path) in po_paths {
        let catalog_dir = po_path.parent().unwrap_or(output_dir);
        let json_path = convert_catalog_to_json(&po_path, catalog_dir, project)?;
        catalogs.push(CompiledCatalog {
            mo_path: mo_path(&po_path),
            locale,
            po_path,
            json_path,
            placed: None,
        });
    }
    Ok(catalogs)
}

// ============================================================
// Package scope
// ============================================================

/// Regenerate `<repo>/<project>/locale/<project>.pot`.
pub fn extract_package(ctx: &TranslateContext, repo: &Path, project: &str) -> Result<TemplateSummary> {
    let project = normalize_project(project);
    let output_dir = repo.join(&project);
    extract_translations(ctx, repo, &output_dir, &project)
}

pub fn update_package(
    ctx: &TranslateContext,
    repo: &Path,
    project: &str,
    locales: &[String],
) -> Result<UpdateSummary> {
    check_locales(locales)?;
    let project = normalize_project(project);
    let output_dir = repo.join(&project);
    require_dir(&output_dir)?;

    update_translations(ctx, repo, &output_dir, &project, locales)
}

pub fn compile_package(
    ctx: &TranslateContext,
    repo: &Path,
    project: &str,
    locales: &[String],
) -> Result<CompileSummary> {
    check_locales(locales)?;
    let project = normalize_project(project);
    let output_dir = repo.join(&project);
    require_dir(&output_dir)?;

    let catalogs = compile_with_json(ctx, &output_dir, &project, locales)?;
    Ok(CompileSummary { project, catalogs })
}

// ============================================================
// Language-pack scope
// ============================================================

pub fn extract_language_pack(
    ctx: &TranslateContext,
    repo: &Path,
    lp_repo: &Path,
    project: &str,
) -> Result<TemplateSummary> {
    let project = normalize_project(project);
    let output_dir = prepare_language_pack_output_dir(ctx, lp_repo, &project)?;
    extract_translations(ctx, repo, &output_dir, &project)
}

pub fn update_language_pack(
    ctx: &TranslateContext,
    repo: &Path,
    lp_repo: &Path,
    project: &str,
    locales: &[String],
) -> Result<UpdateSummary> {
    check_locales(locales)?;
    let project = normalize_project(project);
    let output_dir = prepare_language_pack_output_dir(ctx, lp_repo, &project)?;
    update_translations(ctx, repo, &output_dir, &project, locales)
}

/// Compile the catalogs of `project` and move the `.mo`/`.json` artifacts into
/// the per-locale language packs.
pub fn compile_language_pack(
    ctx: &TranslateContext,
    lp_repo: &Path,
    project: &str,
    locales: &[String],
) -> Result<CompileSummary> {
    check_locales(locales)?;
    let project = normalize_project(project);
    let output_dir = language_pack_output_dir(ctx, lp_repo, &project);
    require_dir(&output_dir)?;

    let mut catalogs = compile_with_json(ctx, &output_dir, &project, locales)?;
    for catalog in &mut catalogs {
        let artifacts = [catalog.mo_path.clone(), catalog.json_path.clone()];
        let placed = place_artifacts(ctx, lp_repo, &project, &catalog.locale, &artifacts)?;
        catalog.placed = Some(placed);
    }

    Ok(CompileSummary { project, catalogs })
}
