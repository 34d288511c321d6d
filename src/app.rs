use std::path::PathBuf;

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::engine::SkillScheduler;
use crate::error::Result;

/// Shared state for one CLI invocation: resolved root, loaded config, and
/// the chosen output format.
pub struct AppContext {
    pub root: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = match &cli.root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let config = Config::load(cli.config.as_deref(), &root)?;

        Ok(Self {
            root,
            config,
            output_format: cli.format,
        })
    }

    /// Build a scheduler with the configured directories resolved against
    /// the project root. `max_reads_override` wins over the config value.
    #[must_use]
    pub fn scheduler(&self, max_reads_override: Option<usize>) -> SkillScheduler {
        let mut scheduler_config = self.config.scheduler.resolved_against(&self.root);
        if let Some(max_reads) = max_reads_override {
            scheduler_config.max_detailed_reads = max_reads;
        }
        SkillScheduler::from_config(&scheduler_config)
    }

    #[must_use]
    pub fn json_output(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}
