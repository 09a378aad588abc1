use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::LessonId,
    lesson::{event::UpdateLessonFields, Lesson},
};
use kernel::repository::lesson::LessonRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::lesson::LessonRow, ConnectionPool};

#[derive(new)]
pub struct LessonRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl LessonRepository for LessonRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Lesson>> {
        let rows: Vec<LessonRow> = sqlx::query_as(
            r#"
                SELECT
                    lesson_id,
                    subject,
                    location,
                    price,
                    spaces
                FROM lessons
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Lesson::from).collect())
    }

    async fn find_by_id(&self, lesson_id: LessonId) -> AppResult<Option<Lesson>> {
        let row: Option<LessonRow> = sqlx::query_as(
            r#"
                SELECT
                    lesson_id,
                    subject,
                    location,
                    price,
                    spaces
                FROM lessons
                WHERE lesson_id = $1
            "#,
        )
        .bind(lesson_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Lesson::from))
    }

    // Administrative merge. COALESCE keeps every field the caller left
    // out, so a partial body only touches what it names. Writes to
    // `spaces` on this path deliberately skip the ledger (manual
    // capacity correction).
    async fn update_fields(&self, event: UpdateLessonFields) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE lessons
                SET
                    subject = COALESCE($2, subject),
                    location = COALESCE($3, location),
                    price = COALESCE($4, price),
                    spaces = COALESCE($5, spaces)
                WHERE lesson_id = $1
            "#,
        )
        .bind(event.lesson_id)
        .bind(event.subject)
        .bind(event.location)
        .bind(event.price)
        .bind(event.spaces)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound(format!(
                "lesson {} not found",
                event.lesson_id
            )));
        }

        Ok(())
    }
}
