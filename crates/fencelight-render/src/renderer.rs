//! Reference low-DOM renderer.

use std::collections::BTreeMap;

use fencelight_ast::ReplacementBundle;
use fencelight_directives::HighlightDirectiveSet;
use fencelight_transform::{RenderError, RenderRequest, Renderer};

use crate::grammar::Grammar;
use crate::lexer::{TokenKind, Tokenizer};
use crate::registry::GrammarRegistry;
use crate::theme::Theme;

/// Token ranges per kind: `[line, start, end]`, line 1-indexed.
type TokenMap = BTreeMap<&'static str, Vec<[usize; 3]>>;

const SCRIPT_TEMPLATE: &str = r#"<script>(() => {
  const root = document.querySelector('pre[data-block="__LABEL__"]');
  if (!root || !globalThis.CSS || !CSS.highlights) return;
  const tokens = __TOKENS__;
  for (const [kind, spans] of Object.entries(tokens)) {
    const ranges = [];
    for (const [line, start, end] of spans) {
      const text = root.querySelector(`[data-line="${line}"]`)?.firstChild;
      if (!text) continue;
      const range = new Range();
      range.setStart(text, start);
      range.setEnd(text, end);
      ranges.push(range);
    }
    CSS.highlights.set(`__LABEL__-${kind}`, new Highlight(...ranges));
  }
})();</script>"#;

/// Renders code blocks as plain line spans plus CSS Custom Highlight ranges.
///
/// Grammars are looked up in the shared [`GrammarRegistry`]; a language
/// without a registered grammar renders as plain text.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    grammars: GrammarRegistry,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(grammars: GrammarRegistry) -> Self {
        Self { grammars }
    }

    fn render_sync(&self, request: RenderRequest<'_>) -> Result<ReplacementBundle, RenderError> {
        let theme = Theme::builtin(request.theme)
            .ok_or_else(|| RenderError::UnknownTheme(request.theme.to_owned()))?;
        if !is_valid_label(request.label) {
            return Err(RenderError::Failed(format!(
                "invalid block label '{}'",
                request.label
            )));
        }
        let grammar = self.grammars.get(request.language);
        if grammar.is_none() {
            tracing::debug!(language = request.language, "No grammar registered, rendering plain");
        }

        let (markup, tokens) = markup(request, grammar.as_deref())?;
        let json = serde_json::to_string(&tokens).map_err(|e| RenderError::Failed(e.to_string()))?;

        Ok(ReplacementBundle {
            markup,
            style: style(request.label, &theme),
            script: SCRIPT_TEMPLATE
                .replace("__LABEL__", request.label)
                .replace("__TOKENS__", &json),
        })
    }
}

impl Renderer for HtmlRenderer {
    async fn render(&self, request: RenderRequest<'_>) -> Result<ReplacementBundle, RenderError> {
        self.render_sync(request)
    }
}

/// Labels end up inside CSS and JS string literals unescaped.
fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn markup(
    request: RenderRequest<'_>,
    grammar: Option<&Grammar>,
) -> Result<(String, TokenMap), RenderError> {
    let mut tokens = TokenMap::new();
    let mut lines = Vec::new();
    let mut tokenizer = grammar.map(Tokenizer::new);

    for (number, text) in (1usize..).zip(request.source.split('\n')) {
        let text = text.strip_suffix('\r').unwrap_or(text);
        if let Some(tokenizer) = &mut tokenizer {
            for token in tokenizer.line(text)? {
                tokens
                    .entry(token.kind.as_str())
                    .or_default()
                    .push([number, token.start, token.end]);
            }
        }
        let number = u32::try_from(number).unwrap_or(u32::MAX);
        lines.push(line_span(request.directives, number, text));
    }

    let markup = format!(
        "<pre class=\"fencelight\" data-block=\"{}\" data-language=\"{}\"><code>{}</code></pre>",
        request.label,
        html_escape::encode_double_quoted_attribute(request.language),
        lines.join("\n")
    );
    Ok((markup, tokens))
}

fn line_span(directives: &HighlightDirectiveSet, number: u32, text: &str) -> String {
    let mut class = String::from("line");
    for line_class in directives.line_classes(number) {
        class.push(' ');
        class.push_str(line_class.as_str());
    }
    let line_number = directives
        .line_number(number)
        .map(|n| format!(" data-line-number=\"{n}\""))
        .unwrap_or_default();
    format!(
        "<span class=\"{class}\" data-line=\"{number}\"{line_number}>{}</span>",
        html_escape::encode_text(text)
    )
}

fn style(label: &str, theme: &Theme) -> String {
    let scope = format!("pre[data-block=\"{label}\"]");
    let mut rules = vec![
        format!(
            "{scope}{{background:{};color:{};padding:1em;overflow-x:auto}}",
            theme.background, theme.foreground
        ),
        format!("{scope} .line{{display:inline-block;min-width:100%}}"),
        format!("{scope} .line.highlighted{{background:{}}}", theme.highlighted),
        format!("{scope} .line.diff-add{{background:{}}}", theme.diff_add),
        format!("{scope} .line.diff-remove{{background:{}}}", theme.diff_remove),
        format!("{scope} .line.blurred{{opacity:0.5;filter:blur(0.5px)}}"),
        format!(
            "{scope} .line[data-line-number]::before{{content:attr(data-line-number);\
             display:inline-block;width:3ch;margin-right:1.5ch;text-align:right;color:{}}}",
            theme.line_number
        ),
    ];
    for kind in TokenKind::ALL {
        let color = match kind {
            TokenKind::Keyword => theme.keyword,
            TokenKind::String => theme.string,
            TokenKind::Comment => theme.comment,
            TokenKind::Number => theme.number,
            TokenKind::Function => theme.function,
            TokenKind::Type => theme.type_name,
        };
        rules.push(format!("::highlight({label}-{}){{color:{color}}}", kind.as_str()));
    }
    format!("<style>{}</style>", rules.join("\n"))
}
