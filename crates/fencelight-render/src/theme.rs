//! Built-in color themes.

/// Colors used by the generated stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub foreground: &'static str,
    pub keyword: &'static str,
    pub string: &'static str,
    pub comment: &'static str,
    pub number: &'static str,
    pub function: &'static str,
    pub type_name: &'static str,
    pub line_number: &'static str,
    pub highlighted: &'static str,
    pub diff_add: &'static str,
    pub diff_remove: &'static str,
}

const GITHUB_LIGHT: Theme = Theme {
    name: "github-light",
    background: "#ffffff",
    foreground: "#24292e",
    keyword: "#d73a49",
    string: "#032f62",
    comment: "#6a737d",
    number: "#005cc5",
    function: "#6f42c1",
    type_name: "#e36209",
    line_number: "#959da5",
    highlighted: "#fffbdd",
    diff_add: "#e6ffed",
    diff_remove: "#ffeef0",
};

const GITHUB_DARK: Theme = Theme {
    name: "github-dark",
    background: "#24292e",
    foreground: "#e1e4e8",
    keyword: "#f97583",
    string: "#9ecbff",
    comment: "#6a737d",
    number: "#79b8ff",
    function: "#b392f0",
    type_name: "#ffab70",
    line_number: "#6a737d",
    highlighted: "#2b3036",
    diff_add: "#28a74526",
    diff_remove: "#d73a4926",
};

const BUILTIN: [Theme; 2] = [GITHUB_LIGHT, GITHUB_DARK];

impl Theme {
    /// Look up a built-in theme by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        BUILTIN.into_iter().find(|theme| theme.name == name)
    }

    /// Names of every built-in theme.
    pub fn names() -> impl Iterator<Item = &'static str> {
        BUILTIN.into_iter().map(|theme| theme.name)
    }
}
