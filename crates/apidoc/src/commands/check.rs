//! `apidoc check` command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use apidoc_config::{CliSettings, Config};
use apidoc_model::{Project, Var};
use apidoc_render::{FormatRegistry, SourceLocator};
use clap::Args;

use crate::commands::build::load_project;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover apidoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Metadata input file (overrides config).
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Validates the configuration and metadata exactly as a build would,
    /// without writing any output.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first problem found.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            input: self.input,
            output_dir: None,
            doc_format: None,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let project = load_project(&config)?;

        apidoc_model::validate(&project)?;
        check_formats(&project)?;
        if let Some(source) = &project.source {
            SourceLocator::new(source)?;
        }

        if project.namespaces.is_empty() {
            output.warning("No namespaces found in input");
        }

        let vars: usize = project
            .namespaces
            .iter()
            .map(|ns| ns.publics.len())
            .sum();
        output.success(&format!(
            "OK: {} {} with {} namespaces and {} public vars",
            project.name,
            project.version,
            project.namespaces.len(),
            vars
        ));

        Ok(())
    }
}

/// Check that every doc-format tag in the snapshot is registered.
fn check_formats(project: &Project) -> Result<(), CliError> {
    fn collect<'a>(tags: &mut BTreeSet<&'a str>, var: &'a Var) {
        tags.extend(var.doc_format.as_deref());
        for member in &var.members {
            tags.extend(member.doc_format.as_deref());
        }
    }

    let registry = FormatRegistry::new();
    let mut tags = BTreeSet::new();
    tags.extend(project.doc_format.as_deref());
    for ns in &project.namespaces {
        tags.extend(ns.doc_format.as_deref());
        for var in &ns.publics {
            collect(&mut tags, var);
        }
    }

    for tag in tags {
        if !registry.contains(tag) {
            return Err(CliError::Validation(format!(
                "unknown doc format: {tag:?}"
            )));
        }
    }
    Ok(())
}
