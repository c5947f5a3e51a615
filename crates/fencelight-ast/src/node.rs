//! Tree node types.

/// Language tag used when a fence has no (or an empty) language.
pub const PLAIN_TEXT: &str = "plaintext";

/// One fenced (or indented) code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    /// Language identifier from the fence info string.
    pub language: Option<String>,
    /// Meta annotation: the info string after the language, trimmed.
    pub meta: Option<String>,
    /// Literal body without the trailing newline.
    pub value: String,
}

impl CodeBlock {
    #[must_use]
    pub fn new(language: Option<&str>, meta: Option<&str>, value: impl Into<String>) -> Self {
        Self {
            language: language.map(str::to_owned),
            meta: meta.map(str::to_owned),
            value: value.into(),
        }
    }

    /// Language tag, defaulting to [`PLAIN_TEXT`] when absent or empty.
    #[must_use]
    pub fn language_or_default(&self) -> &str {
        match self.language.as_deref() {
            Some(lang) if !lang.is_empty() => lang,
            _ => PLAIN_TEXT,
        }
    }
}

/// Container element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Root,
    Paragraph,
    Heading(u8),
    BlockQuote,
    List { ordered: bool },
    ListItem,
    Table,
    /// Any other container (table rows/cells, footnotes, definition lists).
    Other,
}

/// Document tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element {
        kind: ElementKind,
        children: Vec<Node>,
    },
    Text(String),
    Code(CodeBlock),
    /// Opaque content included verbatim in serialized output.
    Html(String),
    Rule,
}

impl Node {
    #[must_use]
    pub fn root(children: Vec<Node>) -> Self {
        Self::element(ElementKind::Root, children)
    }

    #[must_use]
    pub fn element(kind: ElementKind, children: Vec<Node>) -> Self {
        Self::Element { kind, children }
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn html(html: impl Into<String>) -> Self {
        Self::Html(html.into())
    }

    #[must_use]
    pub fn code(language: Option<&str>, meta: Option<&str>, value: impl Into<String>) -> Self {
        Self::Code(CodeBlock::new(language, meta, value))
    }

    /// Child collection, if this node is a container.
    #[must_use]
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Self::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Self::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_code(&self) -> Option<&CodeBlock> {
        match self {
            Self::Code(block) => Some(block),
            _ => None,
        }
    }
}

/// The three opaque nodes that replace one code fence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplacementBundle {
    pub markup: String,
    pub style: String,
    pub script: String,
}

impl ReplacementBundle {
    /// Markup, then style, then script.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        vec![
            Node::Html(self.markup),
            Node::Html(self.style),
            Node::Html(self.script),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_language_or_default() {
        assert_eq!(CodeBlock::new(Some("rust"), None, "").language_or_default(), "rust");
        assert_eq!(CodeBlock::new(None, None, "").language_or_default(), PLAIN_TEXT);
        assert_eq!(CodeBlock::new(Some(""), None, "").language_or_default(), PLAIN_TEXT);
    }

    #[test]
    fn test_children_only_on_elements() {
        let mut root = Node::root(vec![Node::text("a")]);
        assert_eq!(root.children().map(<[Node]>::len), Some(1));
        assert!(root.children_mut().is_some());
        assert!(Node::text("a").children().is_none());
        assert!(Node::code(None, None, "x").children().is_none());
    }

    #[test]
    fn test_bundle_order() {
        let bundle = ReplacementBundle {
            markup: "m".to_owned(),
            style: "s".to_owned(),
            script: "j".to_owned(),
        };
        assert_eq!(
            bundle.into_nodes(),
            vec![Node::html("m"), Node::html("s"), Node::html("j")]
        );
    }
}
