//! Compilation of locale catalogs into `.mo` files.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use anyhow::Result;

use super::{
    context::TranslateContext,
    locale::{LOCALE_FOLDER, check_locales, find_locales},
    sync::po_path,
    tools::babel_compile,
};
use crate::error::TranslateError;

/// Compile the catalog of `domain` for `locale`; the `.mo` file is written
/// next to the `.po` file, whose path is returned.
pub fn compile_catalog(
    ctx: &TranslateContext,
    locale_dir: &Path,
    domain: &str,
    locale: &str,
) -> Result<PathBuf> {
    let po_path = po_path(locale_dir, domain, locale);
    if !po_path.is_file() {
        return Err(TranslateError::CatalogNotFound { path: po_path }.into());
    }

    let invocation = babel_compile(&ctx.config.tools.babel, domain, locale_dir, locale)?;
    ctx.runner.run(&invocation)?;

    Ok(po_path)
}

/// Compile `locales`, or when empty every locale under `<output_dir>/locale/`
/// that has a catalog for `project`. Returns the `.po` path per locale.
///
/// A requested locale without a catalog is `TranslateError::CatalogNotFound`.
pub fn compile_translations(
    ctx: &TranslateContext,
    output_dir: &Path,
    project: &str,
    locales: &[String],
) -> Result<BTreeMap<String, PathBuf>> {
    check_locales(locales)?;

    let locale_dir = output_dir.join(LOCALE_FOLDER);
    let locales = if locales.is_empty() {
        find_locales(output_dir)
            .into_iter()
            .filter(|locale| po_path(&locale_dir, project, locale).is_file())
            .collect()
    } else {
        locales.to_vec()
    };

    let mut po_paths = BTreeMap::new();
    for locale in locales {
        let po_path = compile_catalog(ctx, &locale_dir, project, &locale)?;
        po_paths.insert(locale, po_path);
    }

    Ok(po_paths)
}

/// The `.mo` file produced for a `.po` file.
pub fn mo_path(po_path: &Path) -> PathBuf {
    po_path.with_extension("mo")
}
