//! Shared state that outlives a single transform: loaded languages and the
//! block label counter.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use tokio::sync::{Mutex, MutexGuard};

static SHARED: LazyLock<Arc<HighlightContext>> =
    LazyLock::new(|| Arc::new(HighlightContext::new()));

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(0);

/// Set of language identifiers whose grammar is confirmed loaded.
///
/// Grows monotonically; entries are never removed. The lock is held for a
/// whole loading pass so concurrent transforms never load the same grammar
/// twice.
#[derive(Debug, Default)]
pub struct LanguageCache {
    loaded: Mutex<HashSet<String>>,
}

impl LanguageCache {
    pub async fn contains(&self, language: &str) -> bool {
        self.loaded.lock().await.contains(language)
    }

    pub async fn len(&self) -> usize {
        self.loaded.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.loaded.lock().await.is_empty()
    }

    pub(crate) async fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.loaded.lock().await
    }
}

/// State shared by every transform that uses the same context.
///
/// The language cache records what was registered with a grammar source, so
/// every transform sharing a context must also share one grammar source whose
/// registrations its renderer can see. [`HighlightTransform::new`] therefore
/// gives each transform its own context; pass [`HighlightContext::shared`]
/// through [`HighlightTransform::with_context`] only when the grammar source
/// is itself process-wide.
///
/// Block labels carry the context id, so they never repeat across contexts.
///
/// [`HighlightTransform::new`]: crate::HighlightTransform::new
/// [`HighlightTransform::with_context`]: crate::HighlightTransform::with_context
#[derive(Debug)]
pub struct HighlightContext {
    id: u64,
    languages: LanguageCache,
    next_block: AtomicU64,
}

impl Default for HighlightContext {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed),
            languages: LanguageCache::default(),
            next_block: AtomicU64::new(0),
        }
    }

    /// The process-wide context.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Process-unique id of this context.
    pub fn id(&self) -> u64 {
        self.id
    }

    #[must_use]
    pub fn languages(&self) -> &LanguageCache {
        &self.languages
    }

    /// Mint a block id. Strictly increasing, never reused.
    pub fn next_block_id(&self) -> u64 {
        self.next_block.fetch_add(1, Ordering::Relaxed)
    }

    /// Mint a block label usable as an HTML attribute value and CSS identifier.
    pub fn next_block_label(&self) -> String {
        format!("fl-{}-{}", self.id, self.next_block_id())
    }
}
