use crate::domain::repository::TagRepository;
use crate::domain::types::Tag;
use crate::error::CookbookServiceError;

// ── ListTags ─────────────────────────────────────────────────────────────────

pub struct ListTagsUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> ListTagsUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Tag>, CookbookServiceError> {
        self.repo.list().await
    }
}

// ── GetTag ───────────────────────────────────────────────────────────────────

pub struct GetTagUseCase<T: TagRepository> {
    pub repo: T,
}

impl<T: TagRepository> GetTagUseCase<T> {
    pub async fn execute(&self, tag_id: i32) -> Result<Tag, CookbookServiceError> {
        self.repo
            .find_by_id(tag_id)
            .await?
            .ok_or(CookbookServiceError::TagNotFound)
    }
}
