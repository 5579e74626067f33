pub mod check_locale;
mod command_result;
pub mod compile;
pub mod extract;
pub mod init;
pub mod update;

pub use command_result::*;

use std::path::Path;

use anyhow::Result;

use super::args::GlobalArgs;
use crate::core::TranslateContext;

/// Build the run context, searching the configuration upwards from `start_dir`.
pub fn load_context(global: &GlobalArgs, start_dir: &Path) -> Result<TranslateContext> {
    let start_dir = start_dir
        .canonicalize()
        .unwrap_or_else(|_| start_dir.to_path_buf());
    TranslateContext::from_config_source(global.config.as_deref(), &start_dir, global.verbose)
}
