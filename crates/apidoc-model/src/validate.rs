//! Ingestion validation.
//!
//! A project snapshot is validated once, before rendering starts. Malformed
//! input is rejected here so the hierarchy builder and page assembler can
//! assume well-formed names and nesting throughout a pass.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::project::Project;
use crate::var::{Namespace, Var};

/// Error raised while loading or validating a project snapshot.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// I/O error reading the input file.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Input file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Input did not match the model.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Namespace name is empty or contains empty dotted segments.
    #[error("invalid namespace name: {0:?}")]
    InvalidName(String),
    /// Two namespaces share a name.
    #[error("duplicate namespace: {0}")]
    DuplicateNamespace(String),
    /// A member var has members of its own.
    #[error("var {namespace}/{var}: members must not nest further")]
    NestedMembers {
        /// Enclosing namespace name.
        namespace: String,
        /// Offending member name.
        var: String,
    },
    /// A var carries a zero line number.
    #[error("var {namespace}/{var}: line numbers are 1-based, got 0")]
    InvalidLine {
        /// Enclosing namespace name.
        namespace: String,
        /// Offending var name.
        var: String,
    },
}

/// Validate a project snapshot before rendering.
///
/// Checks namespace-name shape, namespace uniqueness, member nesting depth,
/// and line numbers. The snapshot is not modified.
///
/// # Errors
///
/// Returns the first [`ModelError`] found.
pub fn validate(project: &Project) -> Result<(), ModelError> {
    let mut seen = HashSet::new();

    for ns in &project.namespaces {
        if !valid_namespace_name(&ns.name) {
            return Err(ModelError::InvalidName(ns.name.clone()));
        }
        if !seen.insert(ns.name.as_str()) {
            return Err(ModelError::DuplicateNamespace(ns.name.clone()));
        }
        for var in &ns.publics {
            check_var(ns, var)?;
        }
    }

    Ok(())
}

/// A namespace name is non-empty with non-empty dot-separated segments.
fn valid_namespace_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|segment| !segment.is_empty())
}

fn check_var(ns: &Namespace, var: &Var) -> Result<(), ModelError> {
    check_line(ns, var)?;
    for member in &var.members {
        check_line(ns, member)?;
        if !member.members.is_empty() {
            return Err(ModelError::NestedMembers {
                namespace: ns.name.clone(),
                var: member.name.clone(),
            });
        }
    }
    Ok(())
}

fn check_line(ns: &Namespace, var: &Var) -> Result<(), ModelError> {
    if var.line == Some(0) {
        return Err(ModelError::InvalidLine {
            namespace: ns.name.clone(),
            var: var.name.clone(),
        });
    }
    Ok(())
}
