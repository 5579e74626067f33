//! Language-pack assembly.
//!
//! A language pack is one distributable package per locale:
//!
//! ```text
//! <lp_repo>/language-packs/
//!   jupyterlab-language-pack-es_ES/
//!     jupyterlab_language_pack_es_ES/
//!       jupyterlab.mo, jupyterlab.json      (platform project)
//!       extensions/<ext>.mo, <ext>.json     (extension projects)
//! ```
//!
//! Missing packages are scaffolded with `cookiecutter`. File moves go through
//! [`ArtifactStore`].

use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use anyhow::{Context, Result};

use crate::{
    config::Config,
    core::{context::TranslateContext, locale::Locale, tools::ToolInvocation},
    error::Tool,
};

/// Folder for extension artifacts inside a locale package.
pub const EXTENSIONS_FOLDER: &str = "extensions";

/// Filesystem effects of artifact placement.
pub trait ArtifactStore {
    fn is_dir(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Move `from` to `to`, replacing an existing file.
    fn move_file(&self, from: &Path, to: &Path) -> Result<()>;
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for Rc<S> {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        (**self).create_dir_all(path)
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).move_file(from, to)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsArtifactStore;

impl ArtifactStore for FsArtifactStore {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {}", path.display()))
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        if fs::rename(from, to).is_ok() {
            return Ok(());
        }

        // Cross-device moves.
        fs::copy(from, to).with_context(|| {
            format!("Failed to move {} to {}", from.display(), to.display())
        })?;
        fs::remove_file(from)
            .with_context(|| format!("Failed to remove {}", from.display()))
    }
}

/// Paths of the language pack for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePackLayout {
    /// `<lp_repo>/<languagePacksFolder>`, where packages are scaffolded.
    pub packs_dir: PathBuf,
    /// Distribution name, e.g. `jupyterlab-language-pack-es_ES`.
    pub package_name: String,
    /// Importable module directory inside the package.
    pub module_dir: PathBuf,
}

impl LanguagePackLayout {
    pub fn new(lp_repo: &Path, config: &Config, locale: &str) -> Self {
        let packs_dir = lp_repo.join(&config.language_packs_folder);
        let package_name = config.package_name(locale);
        let module_dir = packs_dir
            .join(&package_name)
            .join(package_name.replace('-', "_"));
        Self {
            packs_dir,
            package_name,
            module_dir,
        }
    }

    /// Where artifacts of a project land.
    pub fn target_dir(&self, platform: bool) -> PathBuf {
        if platform {
            self.module_dir.clone()
        } else {
            self.module_dir.join(EXTENSIONS_FOLDER)
        }
    }
}

/// Scaffold the package for `locale` under `packs_dir`.
pub fn create_new_language_pack(
    ctx: &TranslateContext,
    packs_dir: &Path,
    locale: &str,
) -> Result<()> {
    let locale = Locale::parse(locale)?;
    ctx.store.create_dir_all(packs_dir)?;

    let invocation = ToolInvocation::new(Tool::Cookiecutter, "scaffold", &ctx.config.tools.cookiecutter)?
        .args([
            "--no-input".to_string(),
            "-o".to_string(),
            packs_dir.display().to_string(),
            ctx.config.cookiecutter_template.clone(),
            format!("locale={}", locale.tag()),
            format!("language={}", locale.english_name()),
        ]);
    ctx.runner.run(&invocation)?;

    Ok(())
}

/// Outcome of [`place_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedArtifacts {
    pub package_name: String,
    /// True when the package had to be scaffolded first.
    pub scaffolded: bool,
    pub files: Vec<PathBuf>,
}

/// Move compiled artifacts of `project` into the language pack of `locale`,
/// scaffolding the package when it does not exist yet.
pub fn place_artifacts(
    ctx: &TranslateContext,
    lp_repo: &Path,
    project: &str,
    locale: &str,
    artifacts: &[PathBuf],
) -> Result<PlacedArtifacts> {
    let layout = LanguagePackLayout::new(lp_repo, &ctx.config, locale);

    let scaffolded = !ctx.store.is_dir(&layout.module_dir);
    if scaffolded {
        create_new_language_pack(ctx, &layout.packs_dir, locale)?;
    }

    let target_dir = layout.target_dir(project == ctx.config.platform_project);
    ctx.store.create_dir_all(&target_dir)?;

    let mut files = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let Some(name) = artifact.file_name() else {
            continue;
        };
        let destination = target_dir.join(name);
        ctx.store.move_file(artifact, &destination)?;
        files.push(destination);
    }

    Ok(PlacedArtifacts {
        package_name: layout.package_name,
        scaffolded,
        files,
    })
}
