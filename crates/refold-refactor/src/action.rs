use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::document::Document;

/// The request was cancelled before the transformation finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Error)]
#[error("refactoring cancelled")]
pub struct Cancelled;

/// `Err(Cancelled)` once `token` has been cancelled.
pub fn check_cancelled(token: &CancellationToken) -> Result<(), Cancelled> {
    if token.is_cancelled() {
        tracing::debug!("refactoring cancelled");
        Err(Cancelled)
    } else {
        Ok(())
    }
}

type ApplyFn = dyn Fn(&CancellationToken) -> Result<Document, Cancelled> + Send + Sync;

/// A named, deferred transformation offered to the user.
///
/// Nothing runs until [`TransformAction::apply`] is called. Applying is repeatable and never
/// touches the document the action was created from.
#[derive(Clone)]
pub struct TransformAction {
    label: String,
    apply: Arc<ApplyFn>,
}

impl TransformAction {
    pub fn new(
        label: impl Into<String>,
        apply: impl Fn(&CancellationToken) -> Result<Document, Cancelled> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            apply: Arc::new(apply),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn apply(&self, cancel: &CancellationToken) -> Result<Document, Cancelled> {
        (self.apply)(cancel)
    }
}

impl fmt::Debug for TransformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformAction")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
