//! Page assembly.
//!
//! Builds the two page kinds: the index page (project summary plus one
//! block per namespace) and the namespace pages (full member docs with a
//! vars sidebar). Every page carries the primary sidebar rendered from the
//! precomputed [`HierarchyNode`](crate::HierarchyNode) sequence, with the
//! current namespace passed explicitly; page renders share no state.

use std::fmt::Write;

use apidoc_model::{Namespace, Project, Var};
use apidoc_render::{
    FormatRegistry, RenderError, SourceLocator, doc_summary, escape_html, var_anchor,
};

use crate::hierarchy::HierarchyNode;

/// Pixel height of one sidebar row; connector lengths are multiples of it.
const ROW_HEIGHT: usize = 31;

/// Shared read-only inputs for assembling one page.
pub(crate) struct PageContext<'a> {
    pub project: &'a Project,
    pub registry: &'a FormatRegistry,
    pub locator: Option<&'a SourceLocator>,
    pub hierarchy: &'a [HierarchyNode],
}

/// Effective doc format tag: var override, then namespace override, then
/// project default, then the registry default.
fn doc_tag<'t>(
    project: &'t Project,
    registry: &'t FormatRegistry,
    ns: &'t Namespace,
    var: Option<&'t Var>,
) -> &'t str {
    var.and_then(|v| v.doc_format.as_deref())
        .or(ns.doc_format.as_deref())
        .or(project.doc_format.as_deref())
        .unwrap_or_else(|| registry.default_tag())
}

fn page_head(out: &mut String, title: &str) {
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    writeln!(out, "<title>{}</title>", escape_html(title)).unwrap();
    out.push_str("<link rel=\"stylesheet\" type=\"text/css\" href=\"css/default.css\">\n");
    out.push_str("<script src=\"js/page_effects.js\"></script>\n");
    out.push_str("</head>\n<body>\n");
}

fn page_foot(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

/// Tree connector spans for one sidebar row.
///
/// A node with descendants stretches its connector over `height` rows so
/// the vertical line reaches everything nested under it.
fn tree_part(out: &mut String, height: usize) {
    if height == 0 {
        out.push_str(
            r#"<span class="tree"><span class="top"></span><span class="bottom"></span></span>"#,
        );
    } else {
        let top = -((ROW_HEIGHT * height) as i64) - 10;
        let line = ROW_HEIGHT * height + 21;
        write!(
            out,
            concat!(
                r#"<span class="tree" style="top: {top}px;">"#,
                r#"<span class="top" style="height: {line}px;"></span>"#,
                r#"<span class="bottom"></span></span>"#
            ),
            top = top,
            line = line,
        )
        .unwrap();
    }
}

fn sidebar_node(out: &mut String, node: &HierarchyNode, current: Option<&str>) {
    let mut classes = format!("depth-{}", node.depth);
    if node.branches {
        classes.push_str(" branch");
    }
    if current == Some(node.name.as_str()) {
        classes.push_str(" current");
    }

    let mut inner = String::new();
    if node.depth > 1 {
        tree_part(&mut inner, node.height);
    }
    write!(inner, "<span>{}</span>", escape_html(node.short_name())).unwrap();

    if node.linked {
        writeln!(
            out,
            r#"<li class="{classes}"><a href="{}.html"><div class="inner">{inner}</div></a></li>"#,
            escape_html(&node.name),
        )
        .unwrap();
    } else {
        writeln!(
            out,
            r#"<li class="{classes}"><div class="no-link"><div class="inner">{inner}</div></div></li>"#,
        )
        .unwrap();
    }
}

/// Primary sidebar: index link plus the namespace tree.
///
/// `current` marks the namespace whose page is being rendered; `None` marks
/// the index page itself.
fn primary_sidebar(out: &mut String, hierarchy: &[HierarchyNode], current: Option<&str>) {
    out.push_str("<nav class=\"sidebar primary\">\n");
    out.push_str("<h3 class=\"no-link\"><span class=\"inner\">Project</span></h3>\n");
    out.push_str("<ul class=\"index-link\">\n");
    let index_class = if current.is_none() { " current" } else { "" };
    writeln!(
        out,
        r#"<li class="depth-1{index_class}"><a href="index.html"><div class="inner">Index</div></a></li>"#,
    )
    .unwrap();
    out.push_str("</ul>\n");
    out.push_str("<h3 class=\"no-link\"><span class=\"inner\">Namespaces</span></h3>\n");
    out.push_str("<ul>\n");
    for node in hierarchy {
        sidebar_node(out, node, current);
    }
    out.push_str("</ul>\n</nav>\n");
}

/// Secondary sidebar listing a namespace's public vars with anchor links.
fn vars_sidebar(out: &mut String, ns: &Namespace) {
    out.push_str("<nav class=\"sidebar secondary\">\n");
    out.push_str("<h3><a href=\"#top\"><span class=\"inner\">Public Vars</span></a></h3>\n");
    out.push_str("<ul>\n");
    for var in ns.sorted_publics() {
        writeln!(
            out,
            r##"<li class="depth-1"><a href="#var-{}"><div class="inner"><span>{}</span></div></a></li>"##,
            var_anchor(&var.name),
            escape_html(&var.name),
        )
        .unwrap();
    }
    out.push_str("</ul>\n</nav>\n");
}

/// One usage form, rendered `(name arg1 arg2)`.
fn usage_line(name: &str, arglist: &[String]) -> String {
    if arglist.is_empty() {
        format!("({name})")
    } else {
        format!("({name} {})", arglist.join(" "))
    }
}

/// Detail block for one var.
///
/// Member blocks render through the same function with `with_source` off:
/// members never show a source link, even when the enclosing page has
/// source linking configured.
fn var_block(
    out: &mut String,
    ctx: &PageContext<'_>,
    ns: &Namespace,
    var: &Var,
    with_source: bool,
) -> Result<(), RenderError> {
    if with_source {
        writeln!(
            out,
            r#"<div class="public anchor" id="var-{}">"#,
            var_anchor(&var.name)
        )
        .unwrap();
    } else {
        out.push_str("<div class=\"public\">\n");
    }

    writeln!(out, "<h3>{}</h3>", escape_html(&var.name)).unwrap();

    if !var.kind.is_default() {
        writeln!(out, r#"<h4 class="type">{}</h4>"#, var.kind.label()).unwrap();
    }
    if let Some(added) = &var.added {
        writeln!(out, r#"<h4 class="added">Added in {}</h4>"#, escape_html(added)).unwrap();
    }
    if let Some(deprecated) = &var.deprecated
        && deprecated.is_active()
    {
        match deprecated.since() {
            Some(version) => writeln!(
                out,
                r#"<h4 class="deprecated">Deprecated since {}</h4>"#,
                escape_html(version)
            )
            .unwrap(),
            None => out.push_str("<h4 class=\"deprecated\">Deprecated</h4>\n"),
        }
    }

    if !var.arglists.is_empty() {
        out.push_str("<div class=\"usage\">\n");
        for arglist in &var.arglists {
            writeln!(
                out,
                "<code>{}</code>",
                escape_html(&usage_line(&var.name, arglist))
            )
            .unwrap();
        }
        out.push_str("</div>\n");
    }

    if let Some(doc) = &var.doc {
        let tag = doc_tag(ctx.project, ctx.registry, ns, Some(var));
        writeln!(out, r#"<div class="doc">{}</div>"#, ctx.registry.render(tag, doc)?).unwrap();
    }

    if !var.members.is_empty() {
        out.push_str("<div class=\"members\">\n<h4>Members</h4>\n<div class=\"inner\">\n");
        for member in &var.members {
            var_block(out, ctx, ns, member, false)?;
        }
        out.push_str("</div>\n</div>\n");
    }

    if with_source
        && let Some(locator) = ctx.locator
        && let Some((path, file, line)) = var.source_location()
    {
        writeln!(
            out,
            r#"<div class="src-link"><a href="{}">view source</a></div>"#,
            escape_html(&locator.uri(path, file, line))
        )
        .unwrap();
    }

    out.push_str("</div>\n");
    Ok(())
}

/// Assemble the index page.
pub(crate) fn index_page(ctx: &PageContext<'_>) -> Result<String, RenderError> {
    let project = ctx.project;
    let mut out = String::new();

    page_head(&mut out, &format!("{} {}", project.name, project.version));
    primary_sidebar(&mut out, ctx.hierarchy, None);

    out.push_str("<div class=\"namespace-index\" id=\"content\">\n");
    writeln!(
        out,
        concat!(
            r#"<h1><span class="project-title">"#,
            r#"<span class="project-name">{}</span> "#,
            r#"<span class="project-version">{}</span>"#,
            "</span></h1>"
        ),
        escape_html(&project.name),
        escape_html(&project.version),
    )
    .unwrap();
    if let Some(description) = &project.description {
        writeln!(out, r#"<div class="doc"><p>{}</p></div>"#, escape_html(description)).unwrap();
    }

    for ns in project.sorted_namespaces() {
        out.push_str("<div class=\"namespace\">\n");
        writeln!(
            out,
            r#"<h2><a href="{}">{}</a></h2>"#,
            escape_html(&ns.filename()),
            escape_html(&ns.name),
        )
        .unwrap();

        if let Some(doc) = &ns.doc {
            let tag = doc_tag(project, ctx.registry, ns, None);
            writeln!(
                out,
                r#"<div class="doc">{}</div>"#,
                ctx.registry.render(tag, doc_summary(doc))?
            )
            .unwrap();
        }

        out.push_str("<div class=\"index\">\n<p>Public variables and functions:</p>\n<ul>\n");
        for var in ns.sorted_publics() {
            writeln!(
                out,
                r#"<li><a href="{}#var-{}">{}</a></li>"#,
                escape_html(&ns.filename()),
                var_anchor(&var.name),
                escape_html(&var.name),
            )
            .unwrap();
        }
        out.push_str("</ul>\n</div>\n</div>\n");
    }

    out.push_str("</div>\n");
    page_foot(&mut out);
    Ok(out)
}

/// Assemble one namespace page.
pub(crate) fn namespace_page(
    ctx: &PageContext<'_>,
    ns: &Namespace,
) -> Result<String, RenderError> {
    let project = ctx.project;
    let mut out = String::new();

    page_head(
        &mut out,
        &format!("{} - {} {}", ns.name, project.name, project.version),
    );
    primary_sidebar(&mut out, ctx.hierarchy, Some(&ns.name));
    vars_sidebar(&mut out, ns);

    out.push_str("<div class=\"namespace-docs\" id=\"content\">\n");
    writeln!(out, r#"<h1 class="anchor" id="top">{}</h1>"#, escape_html(&ns.name)).unwrap();

    if let Some(doc) = &ns.doc {
        let tag = doc_tag(project, ctx.registry, ns, None);
        writeln!(out, r#"<div class="doc">{}</div>"#, ctx.registry.render(tag, doc)?).unwrap();
    }

    for var in ns.sorted_publics() {
        var_block(&mut out, ctx, ns, var, true)?;
    }

    out.push_str("</div>\n");
    page_foot(&mut out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use apidoc_model::Project;

    use super::*;
    use crate::hierarchy::namespace_hierarchy;

    fn project(json: &str) -> Project {
        Project::from_json(json).unwrap()
    }

    fn context<'a>(
        project: &'a Project,
        registry: &'a FormatRegistry,
        locator: Option<&'a SourceLocator>,
        hierarchy: &'a [HierarchyNode],
    ) -> PageContext<'a> {
        PageContext {
            project,
            registry,
            locator,
            hierarchy,
        }
    }

    fn render_namespace(json: &str, ns_name: &str) -> String {
        let project = project(json);
        let registry = FormatRegistry::new();
        let locator = project
            .source
            .as_ref()
            .map(|config| SourceLocator::new(config).unwrap());
        let hierarchy = namespace_hierarchy(
            project.namespaces.iter().map(|ns| ns.name.as_str()),
        );
        let ctx = context(&project, &registry, locator.as_ref(), &hierarchy);
        let ns = project
            .namespaces
            .iter()
            .find(|ns| ns.name == ns_name)
            .unwrap();
        namespace_page(&ctx, ns).unwrap()
    }

    #[test]
    fn test_usage_line_no_args() {
        assert_eq!(usage_line("f", &[]), "(f)");
    }

    #[test]
    fn test_usage_line_with_args() {
        assert_eq!(
            usage_line("f", &["x".to_owned(), "y".to_owned()]),
            "(f x y)"
        );
    }

    #[test]
    fn test_index_page_lists_namespaces_sorted() {
        let project = project(
            r#"{"name": "demo", "version": "1.0.0", "description": "A demo.",
                "namespaces": [{"name": "b.util"}, {"name": "a.core"}]}"#,
        );
        let registry = FormatRegistry::new();
        let hierarchy =
            namespace_hierarchy(project.namespaces.iter().map(|ns| ns.name.as_str()));
        let ctx = context(&project, &registry, None, &hierarchy);

        let html = index_page(&ctx).unwrap();

        assert!(html.contains(r#"<span class="project-name">demo</span>"#));
        assert!(html.contains("A demo."));
        let a = html.find(r#"<h2><a href="a.core.html">a.core</a></h2>"#).unwrap();
        let b = html.find(r#"<h2><a href="b.util.html">b.util</a></h2>"#).unwrap();
        assert!(a < b, "namespaces must be sorted by name");
    }

    #[test]
    fn test_index_page_uses_doc_summary() {
        let project = project(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "doc": "First paragraph.\n\nSecond paragraph."}]}"#,
        );
        let registry = FormatRegistry::new();
        let hierarchy =
            namespace_hierarchy(project.namespaces.iter().map(|ns| ns.name.as_str()));
        let ctx = context(&project, &registry, None, &hierarchy);

        let html = index_page(&ctx).unwrap();

        assert!(html.contains("First paragraph."));
        assert!(!html.contains("Second paragraph."));
    }

    #[test]
    fn test_index_page_links_vars_with_anchors() {
        let project = project(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [{"name": "empty?"}]}]}"#,
        );
        let registry = FormatRegistry::new();
        let hierarchy =
            namespace_hierarchy(project.namespaces.iter().map(|ns| ns.name.as_str()));
        let ctx = context(&project, &registry, None, &hierarchy);

        let html = index_page(&ctx).unwrap();

        assert!(html.contains(r##"<a href="a.html#var-empty.3F">empty?</a>"##));
    }

    #[test]
    fn test_namespace_page_sorts_vars_case_insensitively() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "Zeta"}, {"name": "alpha"}, {"name": "Beta"}
                ]}]}"#,
            "a",
        );

        let alpha = html.find("<h3>alpha</h3>").unwrap();
        let beta = html.find("<h3>Beta</h3>").unwrap();
        let zeta = html.find("<h3>Zeta</h3>").unwrap();
        assert!(alpha < beta && beta < zeta);
    }

    #[test]
    fn test_namespace_page_renders_one_usage_per_arglist() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "f", "arglists": [["x"], ["x", "y"]]}
                ]}]}"#,
            "a",
        );

        assert!(html.contains("<code>(f x)</code>"));
        assert!(html.contains("<code>(f x y)</code>"));
        assert_eq!(html.matches("<code>(f").count(), 2);
    }

    #[test]
    fn test_namespace_page_suppresses_default_kind_label() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "plain"}, {"name": "m", "kind": "macro"}
                ]}]}"#,
            "a",
        );

        assert!(html.contains(r#"<h4 class="type">macro</h4>"#));
        assert!(!html.contains(r#"<h4 class="type">var</h4>"#));
    }

    #[test]
    fn test_namespace_page_annotations() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "old", "added": "0.2.0", "deprecated": "0.9.0"},
                    {"name": "gone", "deprecated": true},
                    {"name": "kept", "deprecated": false}
                ]}]}"#,
            "a",
        );

        assert!(html.contains(r#"<h4 class="added">Added in 0.2.0</h4>"#));
        assert!(html.contains(r#"<h4 class="deprecated">Deprecated since 0.9.0</h4>"#));
        assert!(html.contains(r#"<h4 class="deprecated">Deprecated</h4>"#));
        // explicit false flag renders no deprecation for "kept"
        assert_eq!(html.matches(r#"class="deprecated""#).count(), 2);
    }

    #[test]
    fn test_namespace_page_source_link() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "source": {"dir_uri": "https://example.com/", "linenum_anchor_prefix": "L"},
                "namespaces": [{"name": "a", "publics": [
                    {"name": "f", "file": "core.ext", "line": 12, "path": "src/demo"}
                ]}]}"#,
            "a",
        );

        assert!(html.contains(r##"<a href="https://example.com/src/demo#L12">view source</a>"##));
    }

    #[test]
    fn test_member_never_shows_source_link() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "source": {"dir_uri": "https://example.com/", "linenum_anchor_prefix": "L"},
                "namespaces": [{"name": "a", "publics": [
                    {"name": "proto", "kind": "protocol",
                     "file": "core.ext", "line": 1, "path": "src/demo",
                     "members": [
                        {"name": "method", "file": "core.ext", "line": 3, "path": "src/demo"}
                     ]}
                ]}]}"#,
            "a",
        );

        // exactly one source link: the protocol's own, never the member's
        assert_eq!(html.matches("view source").count(), 1);
        assert!(html.contains("<h3>method</h3>"));
    }

    #[test]
    fn test_members_render_in_given_order() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "proto", "members": [{"name": "zzz"}, {"name": "aaa"}]}
                ]}]}"#,
            "a",
        );

        let zzz = html.find("<h3>zzz</h3>").unwrap();
        let aaa = html.find("<h3>aaa</h3>").unwrap();
        assert!(zzz < aaa, "member order is preserved, not sorted");
    }

    #[test]
    fn test_namespace_page_marks_current_in_sidebar() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a.b"}, {"name": "a.c"}]}"#,
            "a.b",
        );

        assert!(html.contains(r#"<li class="depth-2 branch current"><a href="a.b.html">"#));
        assert!(!html.contains(r#"depth-2 current"><a href="a.c.html">"#));
    }

    #[test]
    fn test_sidebar_placeholder_not_linked() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a.b"}, {"name": "a.c"}]}"#,
            "a.b",
        );

        // synthesized "a" renders as a no-link label
        assert!(html.contains(r#"<li class="depth-1"><div class="no-link">"#));
        assert!(!html.contains(r#"<a href="a.html">"#));
    }

    #[test]
    fn test_unknown_doc_format_errors() {
        let project = project(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "doc": "x", "doc_format": "asciidoc"}]}"#,
        );
        let registry = FormatRegistry::new();
        let hierarchy =
            namespace_hierarchy(project.namespaces.iter().map(|ns| ns.name.as_str()));
        let ctx = context(&project, &registry, None, &hierarchy);

        let result = namespace_page(&ctx, &project.namespaces[0]);
        assert!(matches!(result, Err(RenderError::UnknownFormat(tag)) if tag == "asciidoc"));
    }

    #[test]
    fn test_var_doc_format_override_wins() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0", "doc_format": "plaintext",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "f", "doc": "Some *emphasis* here", "doc_format": "markdown"}
                ]}]}"#,
            "a",
        );

        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn test_plaintext_doc_autolinked_and_escaped() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0",
                "namespaces": [{"name": "a", "publics": [
                    {"name": "f", "doc": "see http://example.com & <others>"}
                ]}]}"#,
            "a",
        );

        assert!(html.contains(r#"<a href="http://example.com">http://example.com</a>"#));
        assert!(html.contains("&amp; &lt;others&gt;"));
    }

    #[test]
    fn test_tree_part_heights() {
        let mut plain = String::new();
        tree_part(&mut plain, 0);
        assert_eq!(
            plain,
            r#"<span class="tree"><span class="top"></span><span class="bottom"></span></span>"#
        );

        let mut tall = String::new();
        tree_part(&mut tall, 2);
        assert!(tall.contains("top: -72px;"));
        assert!(tall.contains("height: 83px;"));
    }

    #[test]
    fn test_pages_reference_assets() {
        let html = render_namespace(
            r#"{"name": "demo", "version": "1.0.0", "namespaces": [{"name": "a"}]}"#,
            "a",
        );

        assert!(html.contains(r#"href="css/default.css""#));
        assert!(html.contains(r#"src="js/page_effects.js""#));
    }
}
