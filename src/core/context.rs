use std::path::Path;

use anyhow::Result;

use crate::{
    config::{Config, load_config, read_config_file},
    core::{
        pack::{ArtifactStore, FsArtifactStore},
        tools::{ProcessRunner, ToolRunner},
    },
};

/// Shared state of one run: configuration plus the two effect seams
/// (subprocesses and artifact moves).
pub struct TranslateContext {
    pub config: Config,
    pub runner: Box<dyn ToolRunner>,
    pub store: Box<dyn ArtifactStore>,
    /// Whether to print tool invocations and per-file warnings.
    pub verbose: bool,
}

impl TranslateContext {
    /// Context with real subprocesses and filesystem moves.
    pub fn new(config: Config, verbose: bool) -> Self {
        Self {
            config,
            runner: Box::new(ProcessRunner::new(verbose)),
            store: Box::new(FsArtifactStore),
            verbose,
        }
    }

    /// Load the configuration from `config_path` when given, otherwise search
    /// upwards from `start_dir`.
    pub fn from_config_source(
        config_path: Option<&Path>,
        start_dir: &Path,
        verbose: bool,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => read_config_file(path)?,
            None => load_config(start_dir)?.config,
        };
        Ok(Self::new(config, verbose))
    }

    pub fn with_runner(mut self, runner: impl ToolRunner + 'static) -> Self {
        self.runner = Box::new(runner);
        self
    }

    pub fn with_store(mut self, store: impl ArtifactStore + 'static) -> Self {
        self.store = Box::new(store);
        self
    }

    #[cfg(test)]
    pub fn for_tests(runner: std::rc::Rc<crate::core::tools::testing::RecordingRunner>) -> Self {
        Self::new(Config::default(), false).with_runner(runner)
    }
}
