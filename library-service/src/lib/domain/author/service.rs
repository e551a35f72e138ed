use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::author::errors::AuthorError;
use crate::author::ports::AuthorRepository;
use crate::author::ports::AuthorServicePort;
use crate::domain::author::models::Author;
use crate::domain::author::models::AuthorId;
use crate::domain::author::models::CreateAuthorCommand;
use crate::domain::author::models::UpdateAuthorCommand;

/// Domain service implementation for author operations.
pub struct AuthorService<AR>
where
    AR: AuthorRepository,
{
    repository: Arc<AR>,
}

impl<AR> AuthorService<AR>
where
    AR: AuthorRepository,
{
    pub fn new(repository: Arc<AR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<AR> AuthorServicePort for AuthorService<AR>
where
    AR: AuthorRepository,
{
    async fn create_author(&self, command: CreateAuthorCommand) -> Result<Author, AuthorError> {
        let now = Utc::now();
        let author = Author {
            id: AuthorId::new(),
            name: command.name,
            email: command.email,
            bio: command.bio,
            published_count: 0,
            created_at: now,
            updated_at: now,
        };

        self.repository.create(author).await
    }

    async fn get_author(&self, id: &AuthorId) -> Result<Author, AuthorError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AuthorError::NotFound(id.to_string()))
    }

    async fn list_authors(&self) -> Result<Vec<Author>, AuthorError> {
        self.repository.list_all().await
    }

    async fn update_author(
        &self,
        id: &AuthorId,
        command: UpdateAuthorCommand,
    ) -> Result<Author, AuthorError> {
        let mut author = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(AuthorError::NotFound(id.to_string()))?;

        if let Some(new_name) = command.name {
            author.name = new_name;
        }

        if let Some(new_email) = command.email {
            author.email = new_email;
        }

        if let Some(new_bio) = command.bio {
            author.bio = Some(new_bio);
        }

        author.updated_at = Utc::now();

        // published_count rides along unchanged; the repository update
        // does not write that column.
        self.repository.update(author).await
    }

    async fn delete_author(&self, id: &AuthorId) -> Result<(), AuthorError> {
        self.repository.delete(id).await
    }
}
