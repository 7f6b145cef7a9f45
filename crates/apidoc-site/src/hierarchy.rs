//! Namespace hierarchy computation.
//!
//! Turns a flat set of dotted namespace names into the ordered, annotated
//! node sequence the tree sidebar renders from. This is pure data
//! computation; mapping nodes to HTML lives in the page assembler.

use std::collections::BTreeSet;

/// One node of the namespace tree, in sidebar display order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HierarchyNode {
    /// Full dotted name (e.g. `"a.b.core"`).
    pub name: String,
    /// 1-based count of dotted segments.
    pub depth: usize,
    /// Number of contiguous following nodes strictly deeper than this one,
    /// i.e. the rows of descendants before the next sibling or ancestor
    /// boundary. Drives the vertical connector length in the sidebar.
    pub height: usize,
    /// True when the next node in display order shares this node's depth,
    /// i.e. this node is not the last child at its level and the tree line
    /// continues downward.
    pub branches: bool,
    /// True when the name corresponds to a real namespace; synthesized
    /// ancestors render as non-clickable labels.
    pub linked: bool,
}

impl HierarchyNode {
    /// Last dotted segment, the label shown in the tree.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

/// Compute the annotated namespace hierarchy for a set of names.
///
/// Every dotted prefix of every name becomes a node ("a.b.c" contributes
/// "a", "a.b", and "a.b.c"), deduplicated and sorted lexicographically.
/// Nodes whose name is in the input set are marked `linked`; the rest are
/// synthesized ancestor placeholders.
#[must_use]
pub fn namespace_hierarchy<'a, I>(names: I) -> Vec<HierarchyNode>
where
    I: IntoIterator<Item = &'a str>,
{
    let linked: BTreeSet<&str> = names.into_iter().collect();

    let mut all: BTreeSet<String> = BTreeSet::new();
    for name in &linked {
        for (i, _) in name.match_indices('.') {
            all.insert(name[..i].to_owned());
        }
        all.insert((*name).to_owned());
    }

    let ordered: Vec<String> = all.into_iter().collect();
    let depths: Vec<usize> = ordered.iter().map(|name| name.split('.').count()).collect();

    ordered
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let depth = depths[i];
            let height = depths[i + 1..].iter().take_while(|&&d| d > depth).count();
            let branches = depths.get(i + 1) == Some(&depth);
            let linked = linked.contains(name.as_str());
            HierarchyNode {
                name,
                depth,
                height,
                branches,
                linked,
            }
        })
        .collect()
}
