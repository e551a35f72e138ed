use std::sync::Arc;

use async_trait::async_trait;

use crate::author::errors::AuthorError;
use crate::author::ports::AuthorRepository;
use crate::book::ports::BookRepository;
use crate::domain::author::models::AuthorId;
use crate::reconcile::errors::ReconcileError;
use crate::reconcile::ports::CounterReconciler;
use crate::reconcile::ports::ReconcileSummary;

/// Recomputes each author's `published_count` from the book collection.
///
/// The count is always derived fresh with a `COUNT(*)` and stored with a
/// single-row write; it is never incremented or decremented. Interleaved
/// runs (synchronous after book creation, scheduled batch) therefore
/// converge on the same value in any order.
pub struct ReconcileService<AR, BR>
where
    AR: AuthorRepository,
    BR: BookRepository,
{
    authors: Arc<AR>,
    books: Arc<BR>,
}

impl<AR, BR> ReconcileService<AR, BR>
where
    AR: AuthorRepository,
    BR: BookRepository,
{
    pub fn new(authors: Arc<AR>, books: Arc<BR>) -> Self {
        Self { authors, books }
    }
}

#[async_trait]
impl<AR, BR> CounterReconciler for ReconcileService<AR, BR>
where
    AR: AuthorRepository,
    BR: BookRepository,
{
    async fn reconcile_one(&self, author_id: &AuthorId) -> Result<i64, ReconcileError> {
        let count = self
            .books
            .count_by_author(author_id)
            .await
            .map_err(|e| ReconcileError::CountFailed(e.to_string()))?;

        self.authors
            .update_published_count(author_id, count)
            .await
            .map_err(|e| match e {
                AuthorError::NotFound(id) => ReconcileError::AuthorNotFound(id),
                other => ReconcileError::PersistFailed(other.to_string()),
            })?;

        Ok(count)
    }

    async fn reconcile_all(&self) -> Result<ReconcileSummary, ReconcileError> {
        let authors = self
            .authors
            .list_all()
            .await
            .map_err(|e| ReconcileError::ListFailed(e.to_string()))?;

        let mut summary = ReconcileSummary::default();

        for author in authors {
            match self.reconcile_one(&author.id).await {
                Ok(count) => {
                    tracing::debug!(
                        author_id = %author.id,
                        published_count = count,
                        "Reconciled published count"
                    );
                    summary.reconciled += 1;
                }
                Err(e) => {
                    tracing::error!(
                        author_id = %author.id,
                        error = %e,
                        "Failed to reconcile published count"
                    );
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }
}
