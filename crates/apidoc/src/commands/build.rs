//! `apidoc build` command implementation.

use std::path::PathBuf;

use apidoc_config::{CliSettings, Config};
use apidoc_model::Project;
use apidoc_output::FsOutput;
use apidoc_site::Site;
use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover apidoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metadata input file (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Default doc format tag (overrides config).
    #[arg(long)]
    doc_format: Option<String>,

    /// Enable verbose output (per-page logging).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input loading, or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            input: self.input,
            output_dir: self.output_dir,
            doc_format: self.doc_format,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let project = load_project(&config)?;

        output.info(&format!(
            "Input: {}",
            config.docs_resolved.input.display()
        ));
        output.info(&format!(
            "Output directory: {}",
            config.docs_resolved.output_dir.display()
        ));
        tracing::info!(
            namespaces = project.namespaces.len(),
            "Loaded project metadata"
        );

        let sink = FsOutput::new(config.docs_resolved.output_dir.clone());
        let summary = Site::new().build(&project, &sink)?;

        output.success(&format!(
            "Generated {} pages and {} assets for {} {}",
            summary.pages, summary.assets, project.name, project.version
        ));

        Ok(())
    }
}

/// Load the project snapshot and merge in config-owned settings.
///
/// The JSON input wins where it speaks; the config supplies the default doc
/// format and source-link rules when the snapshot is silent.
pub(crate) fn load_project(config: &Config) -> Result<Project, CliError> {
    let mut project = Project::load(&config.docs_resolved.input)?;

    if project.doc_format.is_none() {
        project.doc_format = config.docs_resolved.doc_format.clone();
    }
    if project.source.is_none() {
        project.source = config.source.clone();
    }

    Ok(project)
}
