//! Markdown import via `pulldown-cmark`.
//!
//! Builds a block-level [`Node`] tree. Inline formatting is flattened to text;
//! code fences, raw HTML blocks and container structure are preserved.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::node::{CodeBlock, ElementKind, Node};
use crate::util::{heading_level_to_num, split_fence_info};

impl Node {
    /// Parse markdown into a tree rooted at an [`ElementKind::Root`] element.
    #[must_use]
    pub fn from_markdown(markdown: &str) -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES;
        let mut builder = TreeBuilder::new();
        for event in Parser::new_ext(markdown, options) {
            builder.event(event);
        }
        builder.finish()
    }
}

/// Code fence being accumulated between its start and end events.
struct PendingCode {
    language: Option<String>,
    meta: Option<String>,
    value: String,
}

struct TreeBuilder {
    /// Open containers; the root is always at the bottom.
    stack: Vec<(ElementKind, Vec<Node>)>,
    code: Option<PendingCode>,
    in_html_block: bool,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![(ElementKind::Root, Vec::new())],
            code: None,
            in_html_block: false,
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some(code) = &mut self.code {
                    code.value.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(text) | Event::InlineMath(text) | Event::DisplayMath(text) => {
                self.push_text(&text);
            }
            Event::Html(html) => {
                if self.in_html_block
                    && let Some(Node::Html(existing)) = self.children().last_mut()
                {
                    existing.push_str(&html);
                } else {
                    self.push(Node::html(html.as_ref()));
                }
            }
            Event::InlineHtml(html) => self.push(Node::html(html.as_ref())),
            Event::FootnoteReference(name) => self.push_text(&format!("[^{name}]")),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => self.push(Node::Rule),
            Event::TaskListMarker(_) => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::CodeBlock(kind) => {
                let (language, meta) = match &kind {
                    CodeBlockKind::Fenced(info) => split_fence_info(info),
                    CodeBlockKind::Indented => (None, None),
                };
                self.code = Some(PendingCode {
                    language: language.map(str::to_owned),
                    meta: meta.map(str::to_owned),
                    value: String::new(),
                });
                return;
            }
            Tag::HtmlBlock => {
                self.in_html_block = true;
                self.push(Node::html(""));
                return;
            }
            Tag::Paragraph => ElementKind::Paragraph,
            Tag::Heading { level, .. } => ElementKind::Heading(heading_level_to_num(level)),
            Tag::BlockQuote(_) => ElementKind::BlockQuote,
            Tag::List(start) => ElementKind::List {
                ordered: start.is_some(),
            },
            Tag::Item => ElementKind::ListItem,
            Tag::Table(_) => ElementKind::Table,
            Tag::TableHead
            | Tag::TableRow
            | Tag::TableCell
            | Tag::FootnoteDefinition(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::MetadataBlock(_) => ElementKind::Other,
            // Inline formatting is flattened into the enclosing container.
            _ => return,
        };
        self.stack.push((kind, Vec::new()));
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::CodeBlock => {
                if let Some(code) = self.code.take() {
                    let mut value = code.value;
                    if value.ends_with('\n') {
                        value.pop();
                    }
                    self.push(Node::Code(CodeBlock {
                        language: code.language,
                        meta: code.meta,
                        value,
                    }));
                }
            }
            TagEnd::HtmlBlock => self.in_html_block = false,
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
            | TagEnd::TableCell
            | TagEnd::FootnoteDefinition
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::MetadataBlock(_) => self.close(),
            _ => {}
        }
    }

    /// Pop the innermost container into its parent. The root is never popped.
    fn close(&mut self) {
        if self.stack.len() > 1
            && let Some((kind, children)) = self.stack.pop()
        {
            self.push(Node::element(kind, children));
        }
    }

    fn children(&mut self) -> &mut Vec<Node> {
        if self.stack.is_empty() {
            self.stack.push((ElementKind::Root, Vec::new()));
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last].1
    }

    fn push(&mut self, node: Node) {
        self.children().push(node);
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(existing)) = self.children().last_mut() {
            existing.push_str(text);
        } else {
            self.push(Node::text(text));
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        let children = self.stack.pop().map(|(_, children)| children).unwrap_or_default();
        Node::root(children)
    }
}
