//! Site structure and page assembly for apidoc.
//!
//! This is the core of the rendering pipeline:
//!
//! - [`namespace_hierarchy`] derives the annotated tree the sidebar renders
//!   from (every dotted ancestor synthesized, depth/height/branch flags
//!   computed in one pass over the sorted names)
//! - the page assembler maps project metadata to the index page and one
//!   page per namespace
//! - [`Site`] orchestrates a build: validate, compute the hierarchy once,
//!   render all pages against it, hand everything to the output sink
//!
//! Data flows one direction and nothing is mutated: a build is a pure
//! function of the project snapshot, so re-running is always safe.

mod hierarchy;
mod page;
mod site;

pub use hierarchy::{HierarchyNode, namespace_hierarchy};
pub use site::{BuildSummary, Site, SiteError};
