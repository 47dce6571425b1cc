//! Root request/trace context.
//!
//! Created once per chapter navigation-factory invocation and passed by
//! value. Carries a thread/trace name and classification labels for
//! observability; chapters get read access only.

use std::collections::BTreeMap;

/// Parameters for [`RootContext::new`].
#[derive(Clone, Debug, Default)]
pub struct ContextParams {
    /// Trace/thread identifier.
    pub thread_name: String,
    /// Classification labels.
    pub labels: BTreeMap<String, String>,
}

/// Opaque observability context threaded through navigation factories.
#[derive(Clone, Debug)]
pub struct RootContext {
    thread_name: String,
    labels: BTreeMap<String, String>,
}

impl RootContext {
    /// Pure constructor; no business logic.
    #[must_use]
    pub fn new(params: ContextParams) -> Self {
        Self {
            thread_name: params.thread_name,
            labels: params.labels,
        }
    }

    /// Context for a chapter keyed by its navigation id.
    #[must_use]
    pub fn for_chapter(key: &str) -> Self {
        let mut labels = BTreeMap::new();
        labels.insert("chapter".to_owned(), key.to_owned());
        Self::new(ContextParams {
            thread_name: format!("nav.{key}"),
            labels,
        })
    }

    /// The trace/thread identifier.
    #[must_use]
    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// The classification labels.
    #[must_use]
    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    /// Tracing span for work performed under this context.
    #[must_use]
    pub fn span(&self) -> tracing::Span {
        tracing::info_span!("chapter_nav", thread = %self.thread_name)
    }
}
