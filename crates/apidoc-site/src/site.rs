//! Build orchestration.
//!
//! One rendering pass: validate the snapshot, compute the namespace
//! hierarchy once, assemble every page against that shared read-only
//! structure, and hand the results to the output sink. Namespace pages are
//! independent of one another, so they render in parallel.

use apidoc_model::{ModelError, Project, validate};
use apidoc_output::{Output, OutputError};
use apidoc_render::{FormatRegistry, RenderError, SourceLocator};
use rayon::prelude::*;

use crate::hierarchy::namespace_hierarchy;
use crate::page::{PageContext, index_page, namespace_page};

/// Error raised during a documentation build.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Input snapshot was rejected at ingestion.
    #[error("{0}")]
    Model(#[from] ModelError),
    /// A doc or source rule failed to render.
    #[error("{0}")]
    Render(#[from] RenderError),
    /// The output sink failed to persist a page or asset.
    #[error("{0}")]
    Output(#[from] OutputError),
}

/// Summary of a completed build.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Pages written (index plus one per namespace).
    pub pages: usize,
    /// Static assets copied.
    pub assets: usize,
}

/// Documentation site builder.
///
/// Holds the doc-format registry; everything else arrives per build as a
/// read-only [`Project`] snapshot.
pub struct Site {
    registry: FormatRegistry,
}

impl Default for Site {
    fn default() -> Self {
        Self::new()
    }
}

impl Site {
    /// Create a builder with the built-in doc formats.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: FormatRegistry::new(),
        }
    }

    /// Create a builder with a custom format registry.
    #[must_use]
    pub fn with_registry(registry: FormatRegistry) -> Self {
        Self { registry }
    }

    /// Render a project snapshot and write every page and asset to `output`.
    ///
    /// The snapshot is validated and every reachable doc-format tag is
    /// checked against the registry before anything is written, so
    /// configuration errors fail the build fast instead of mid-write.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] on invalid input, an unregistered doc format,
    /// an invalid source-uri rule, or an output failure.
    pub fn build(&self, project: &Project, output: &dyn Output) -> Result<BuildSummary, SiteError> {
        validate(project)?;
        self.check_formats(project)?;

        let locator = project
            .source
            .as_ref()
            .map(SourceLocator::new)
            .transpose()?;

        let hierarchy =
            namespace_hierarchy(project.namespaces.iter().map(|ns| ns.name.as_str()));
        let ctx = PageContext {
            project,
            registry: &self.registry,
            locator: locator.as_ref(),
            hierarchy: &hierarchy,
        };

        output.write("index.html", index_page(&ctx)?.as_bytes())?;
        tracing::debug!(page = "index.html", "Wrote index page");

        project.namespaces.par_iter().try_for_each(|ns| {
            let html = namespace_page(&ctx, ns)?;
            output.write(&ns.filename(), html.as_bytes())?;
            tracing::debug!(page = %ns.filename(), "Wrote namespace page");
            Ok::<(), SiteError>(())
        })?;

        let mut assets = 0;
        for path in apidoc_assets::iter() {
            if let Some(contents) = apidoc_assets::get(&path) {
                output.write(&path, &contents)?;
                assets += 1;
            }
        }

        let summary = BuildSummary {
            pages: project.namespaces.len() + 1,
            assets,
        };
        tracing::info!(
            project = %project.name,
            pages = summary.pages,
            assets = summary.assets,
            "Documentation build complete"
        );
        Ok(summary)
    }

    /// Ensure every doc-format tag reachable from the project is registered.
    fn check_formats(&self, project: &Project) -> Result<(), RenderError> {
        let check = |tag: Option<&str>| -> Result<(), RenderError> {
            match tag {
                Some(tag) if !self.registry.contains(tag) => {
                    Err(RenderError::UnknownFormat(tag.to_owned()))
                }
                _ => Ok(()),
            }
        };

        check(project.doc_format.as_deref())?;
        for ns in &project.namespaces {
            check(ns.doc_format.as_deref())?;
            for var in &ns.publics {
                check(var.doc_format.as_deref())?;
                for member in &var.members {
                    check(member.doc_format.as_deref())?;
                }
            }
        }
        Ok(())
    }
}
