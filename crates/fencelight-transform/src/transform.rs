//! The batch rewrite coordinator.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use fencelight_ast::{LocatedCodeBlock, Node};
use fencelight_directives::HighlightDirectiveSet;

use crate::collaborators::{GrammarSource, RenderRequest, Renderer};
use crate::context::HighlightContext;
use crate::error::HookError;
use crate::loader::LanguageLoader;
use crate::options::TransformOptions;

/// Future returned by a [`LanguageHook`].
pub type HookFuture = Pin<Box<dyn Future<Output = Result<(), HookError>> + Send>>;

/// Caller-supplied hook that registers extra grammars before loading starts.
pub type LanguageHook = Box<dyn Fn() -> HookFuture + Send + Sync>;

/// Outcome of one [`HighlightTransform::transform`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// Code fences discovered.
    pub blocks: usize,
    /// Fences replaced by a rendered bundle.
    pub converted: usize,
    /// Fences left unconverted after a failure.
    pub failed: usize,
    /// Grammars newly registered during this call.
    pub languages_loaded: usize,
}

/// Rewrites every code fence in a tree into a markup/style/script bundle.
///
/// # Example
///
/// ```ignore
/// use fencelight_transform::{HighlightTransform, TransformOptions};
///
/// let transform = HighlightTransform::new(renderer, grammars)
///     .with_options(TransformOptions::default().theme("github-dark"))
///     .with_language_hook(move || {
///         let grammars = custom.clone();
///         async move { grammars.register_custom().await }
///     });
///
/// let report = transform.transform(&mut tree).await;
/// ```
pub struct HighlightTransform<R, G> {
    renderer: R,
    grammars: G,
    options: TransformOptions,
    hook: Option<LanguageHook>,
    context: Arc<HighlightContext>,
}

impl<R, G> HighlightTransform<R, G>
where
    R: Renderer,
    G: GrammarSource,
{
    /// Create a transform with its own [`HighlightContext`].
    ///
    /// The language cache then lives exactly as long as `grammars`, and a
    /// language is loaded once across every document this transform handles.
    pub fn new(renderer: R, grammars: G) -> Self {
        Self {
            renderer,
            grammars,
            options: TransformOptions::default(),
            hook: None,
            context: Arc::new(HighlightContext::new()),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: TransformOptions) -> Self {
        self.options = options;
        self
    }

    /// Share `context` with other transforms.
    ///
    /// All of them must use the same grammar source, or a language cached by
    /// one would be missing from another's renderer.
    #[must_use]
    pub fn with_context(mut self, context: Arc<HighlightContext>) -> Self {
        self.context = context;
        self
    }

    /// Run `hook` once at the start of every transform call.
    #[must_use]
    pub fn with_language_hook<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HookError>> + Send + 'static,
    {
        self.hook = Some(Box::new(move || -> HookFuture { Box::pin(hook()) }));
        self
    }

    pub fn options(&self) -> &TransformOptions {
        &self.options
    }

    pub fn context(&self) -> &Arc<HighlightContext> {
        &self.context
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn grammars(&self) -> &G {
        &self.grammars
    }

    /// Replace every code fence in `tree`, in place.
    ///
    /// Each phase completes before the next starts. Failures are logged and
    /// leave the affected fence untouched; they never abort the pass.
    pub async fn transform(&self, tree: &mut Node) -> TransformReport {
        self.run_hook().await;

        let mut blocks = tree.code_blocks();
        tracing::debug!(count = blocks.len(), "Discovered code blocks");

        let languages: BTreeSet<String> = blocks
            .iter()
            .map(|located| located.block.language_or_default().to_owned())
            .collect();
        let languages_loaded = LanguageLoader::new(self.context.languages(), &self.grammars)
            .load_all(&languages)
            .await;

        // Reverse document order: a splice only shifts later siblings (and
        // paths through them), which are already done by then.
        blocks.sort_by_cached_key(|located| Reverse(located.path()));

        let defaults = self.options.defaults();
        let mut report = TransformReport {
            blocks: blocks.len(),
            languages_loaded,
            ..TransformReport::default()
        };

        for located in &blocks {
            if self.convert(tree, located, &defaults).await {
                report.converted += 1;
            } else {
                report.failed += 1;
            }
        }

        tracing::info!(
            converted = report.converted,
            failed = report.failed,
            languages_loaded = report.languages_loaded,
            "Highlight transform completed"
        );
        report
    }

    async fn run_hook(&self) {
        let Some(hook) = &self.hook else {
            return;
        };
        if let Err(e) = hook().await {
            tracing::warn!(error = %e, "Custom language hook failed");
        }
    }

    /// Render one fence and splice the bundle in its place.
    async fn convert(
        &self,
        tree: &mut Node,
        located: &LocatedCodeBlock,
        defaults: &HighlightDirectiveSet,
    ) -> bool {
        let block = &located.block;
        let language = block.language_or_default();
        let directives = fencelight_directives::parse(block.meta.as_deref()).with_defaults(defaults);
        let label = self.context.next_block_label();

        let request = RenderRequest {
            source: &block.value,
            language,
            theme: &self.options.theme,
            label: &label,
            directives: &directives,
        };

        let bundle = match self.renderer.render(request).await {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::error!(language = %language, label = %label, error = %e, "Failed to render code block");
                return false;
            }
        };

        if tree.splice(located, bundle.into_nodes()) {
            tracing::debug!(language = %language, label = %label, "Replaced code block");
            true
        } else {
            tracing::warn!(language = %language, label = %label, "Code block moved before splice, left unconverted");
            false
        }
    }
}
