use async_trait::async_trait;

use crate::domain::author::models::AuthorId;
use crate::reconcile::errors::ReconcileError;

/// Outcome of a full reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Authors whose count was recomputed and stored
    pub reconciled: usize,
    /// Authors skipped because their reconciliation failed
    pub failed: usize,
}

/// Port for keeping `published_count` consistent with the book collection.
///
/// Both operations recompute the count from the authoritative book store
/// rather than incrementing, so they are idempotent and safe to interleave
/// with each other and with concurrent book creation.
#[async_trait]
pub trait CounterReconciler: Send + Sync + 'static {
    /// Recompute one author's published count and persist it.
    ///
    /// Returns the stored count.
    ///
    /// # Errors
    /// * `AuthorNotFound` - Author vanished before the count was stored
    /// * `CountFailed` - Counting books failed
    /// * `PersistFailed` - Storing the count failed
    async fn reconcile_one(&self, author_id: &AuthorId) -> Result<i64, ReconcileError>;

    /// Recompute every author's published count, best effort.
    ///
    /// A failure on one author is logged and counted; the batch continues.
    ///
    /// # Errors
    /// * `ListFailed` - The author collection could not be enumerated
    async fn reconcile_all(&self) -> Result<ReconcileSummary, ReconcileError>;
}
