//! Namespace and var records.

use serde::Deserialize;

/// Kind of public var.
///
/// `Var` is the default kind; pages suppress its label and show the label
/// for every other kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    /// Plain var (the default).
    #[default]
    Var,
    /// Function.
    Function,
    /// Macro.
    Macro,
    /// Protocol.
    Protocol,
    /// Multimethod.
    Multimethod,
}

impl VarKind {
    /// Lowercase label shown on var detail blocks.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Function => "function",
            Self::Macro => "macro",
            Self::Protocol => "protocol",
            Self::Multimethod => "multimethod",
        }
    }

    /// True for the default kind, whose label pages suppress.
    #[must_use]
    pub fn is_default(self) -> bool {
        matches!(self, Self::Var)
    }
}

/// Deprecation marker: either a bare flag or the version it happened in.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Deprecated {
    /// Deprecated with no version information.
    Flag(bool),
    /// Deprecated since the given version.
    Since(String),
}

impl Deprecated {
    /// True unless this is an explicit `false` flag.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Flag(false))
    }

    /// The version this var was deprecated in, if recorded.
    #[must_use]
    pub fn since(&self) -> Option<&str> {
        match self {
            Self::Since(version) => Some(version),
            Self::Flag(_) => None,
        }
    }
}

/// A documented public var.
///
/// Identified by `(namespace, name)`; the name need not be unique across
/// namespaces. `members` holds grouped child vars (e.g. protocol methods)
/// and is rendered in the order given; members never nest further.
#[derive(Clone, Debug, Deserialize)]
pub struct Var {
    /// Var name as written in source.
    pub name: String,
    /// Kind of var (defaults to [`VarKind::Var`]).
    #[serde(default)]
    pub kind: VarKind,
    /// Parameter lists, one usage line each. May be empty.
    #[serde(default)]
    pub arglists: Vec<Vec<String>>,
    /// Raw doc string.
    #[serde(default)]
    pub doc: Option<String>,
    /// Doc format tag overriding the namespace/project default.
    #[serde(default)]
    pub doc_format: Option<String>,
    /// Version this var first appeared in.
    #[serde(default)]
    pub added: Option<String>,
    /// Deprecation marker.
    #[serde(default)]
    pub deprecated: Option<Deprecated>,
    /// Source file name, relative to `path`.
    #[serde(default)]
    pub file: Option<String>,
    /// 1-based line number of the definition.
    #[serde(default)]
    pub line: Option<u32>,
    /// Classpath-relative source root containing `file`.
    #[serde(default)]
    pub path: Option<String>,
    /// Grouped child vars, rendered in the order given (max one level).
    #[serde(default)]
    pub members: Vec<Var>,
}

impl Var {
    /// True if the var carries an active deprecation marker.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.as_ref().is_some_and(Deprecated::is_active)
    }

    /// Source location as `(path, file, line)`, when fully recorded.
    #[must_use]
    pub fn source_location(&self) -> Option<(&str, &str, u32)> {
        match (&self.path, &self.file, self.line) {
            (Some(path), Some(file), Some(line)) => Some((path, file, line)),
            _ => None,
        }
    }
}

/// A namespace and its documented public vars.
///
/// Uniquely identified by `name` (a dotted symbolic path such as `a.b.c`)
/// within a project.
#[derive(Clone, Debug, Deserialize)]
pub struct Namespace {
    /// Dotted namespace name.
    pub name: String,
    /// Raw namespace doc string.
    #[serde(default)]
    pub doc: Option<String>,
    /// Doc format tag overriding the project default.
    #[serde(default)]
    pub doc_format: Option<String>,
    /// Public vars, in extraction order.
    #[serde(default)]
    pub publics: Vec<Var>,
}

impl Namespace {
    /// Public vars sorted case-insensitively by name.
    ///
    /// This is the display order for menus and pages, regardless of the
    /// order vars arrived in.
    #[must_use]
    pub fn sorted_publics(&self) -> Vec<&Var> {
        let mut vars: Vec<&Var> = self.publics.iter().collect();
        vars.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        vars
    }

    /// Output file name for this namespace's page.
    ///
    /// Derived directly from the namespace name with no escaping; names
    /// containing filesystem-invalid characters are the caller's
    /// responsibility.
    #[must_use]
    pub fn filename(&self) -> String {
        format!("{}.html", self.name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn var(name: &str) -> Var {
        Var {
            name: name.to_owned(),
            kind: VarKind::default(),
            arglists: Vec::new(),
            doc: None,
            doc_format: None,
            added: None,
            deprecated: None,
            file: None,
            line: None,
            path: None,
            members: Vec::new(),
        }
    }

    #[test]
    fn test_var_kind_default_is_var() {
        assert_eq!(VarKind::default(), VarKind::Var);
        assert!(VarKind::Var.is_default());
        assert!(!VarKind::Macro.is_default());
    }

    #[test]
    fn test_var_kind_labels() {
        assert_eq!(VarKind::Macro.label(), "macro");
        assert_eq!(VarKind::Protocol.label(), "protocol");
        assert_eq!(VarKind::Multimethod.label(), "multimethod");
    }

    #[test]
    fn test_deprecated_flag_true_is_active() {
        let dep = Deprecated::Flag(true);
        assert!(dep.is_active());
        assert_eq!(dep.since(), None);
    }

    #[test]
    fn test_deprecated_flag_false_is_inactive() {
        assert!(!Deprecated::Flag(false).is_active());
    }

    #[test]
    fn test_deprecated_since_version() {
        let dep = Deprecated::Since("1.2".to_owned());
        assert!(dep.is_active());
        assert_eq!(dep.since(), Some("1.2"));
    }

    #[test]
    fn test_deprecated_deserializes_from_bool_and_string() {
        let flag: Deprecated = serde_json::from_str("true").unwrap();
        assert_eq!(flag, Deprecated::Flag(true));

        let since: Deprecated = serde_json::from_str("\"0.9\"").unwrap();
        assert_eq!(since, Deprecated::Since("0.9".to_owned()));
    }

    #[test]
    fn test_source_location_requires_all_fields() {
        let mut v = var("f");
        assert_eq!(v.source_location(), None);

        v.path = Some("src/main/code".to_owned());
        v.file = Some("core.ext".to_owned());
        assert_eq!(v.source_location(), None);

        v.line = Some(42);
        assert_eq!(v.source_location(), Some(("src/main/code", "core.ext", 42)));
    }

    #[test]
    fn test_sorted_publics_case_insensitive() {
        let ns = Namespace {
            name: "example".to_owned(),
            doc: None,
            doc_format: None,
            publics: vec![var("Zeta"), var("alpha"), var("Beta")],
        };

        let names: Vec<&str> = ns.sorted_publics().iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "Beta", "Zeta"]);
    }

    #[test]
    fn test_sorted_publics_preserves_member_order() {
        let mut parent = var("parent");
        parent.members = vec![var("zzz"), var("aaa")];
        let ns = Namespace {
            name: "example".to_owned(),
            doc: None,
            doc_format: None,
            publics: vec![parent],
        };

        let sorted = ns.sorted_publics();
        let member_names: Vec<&str> =
            sorted[0].members.iter().map(|m| m.name.as_str()).collect();
        // Members are rendering order as given, never re-sorted
        assert_eq!(member_names, vec!["zzz", "aaa"]);
    }

    #[test]
    fn test_namespace_filename() {
        let ns = Namespace {
            name: "a.b.core".to_owned(),
            doc: None,
            doc_format: None,
            publics: Vec::new(),
        };
        assert_eq!(ns.filename(), "a.b.core.html");
    }
}
