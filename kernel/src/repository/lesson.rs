use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::LessonId,
    lesson::{event::UpdateLessonFields, Lesson},
};

#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Returns every stored lesson; no filtering, order not guaranteed.
    async fn find_all(&self) -> AppResult<Vec<Lesson>>;
    async fn find_by_id(&self, lesson_id: LessonId) -> AppResult<Option<Lesson>>;
    /// Merges the provided fields into the stored lesson.
    /// Fails with `EntityNotFound` when no lesson matches.
    async fn update_fields(&self, event: UpdateLessonFields) -> AppResult<()>;
}
