use async_trait::async_trait;
use derive_new::new;
use kernel::model::{id::LessonId, lesson::SpacesReserved};
use kernel::repository::inventory::InventoryLedger;
use shared::error::{AppError, AppResult};

use crate::database::ConnectionPool;

#[derive(new)]
pub struct InventoryLedgerImpl {
    db: ConnectionPool,
}

#[async_trait]
impl InventoryLedger for InventoryLedgerImpl {
    // A naive read-check-write here would let two concurrent requests
    // both observe the same count and both succeed. The decrement is
    // instead a single conditional UPDATE: the row only matches while
    // `spaces >= quantity`, so the store serializes competing
    // reservations and the loser sees no matched row.
    async fn reserve(&self, lesson_id: LessonId, quantity: i32) -> AppResult<SpacesReserved> {
        let updated: Option<(i32,)> = sqlx::query_as(
            r#"
                UPDATE lessons
                SET spaces = spaces - $2
                WHERE lesson_id = $1
                  AND spaces >= $2
                RETURNING spaces
            "#,
        )
        .bind(lesson_id)
        .bind(quantity)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if let Some((spaces_after,)) = updated {
            return Ok(SpacesReserved {
                lesson_id,
                quantity,
                spaces_before: spaces_after + quantity,
                spaces_after,
            });
        }

        // The failed match alone cannot tell a missing lesson from an
        // exhausted one. One extra read picks the error kind; the only
        // state-mutating step stays the conditional update above.
        let existing: Option<(i32,)> =
            sqlx::query_as("SELECT spaces FROM lessons WHERE lesson_id = $1")
                .bind(lesson_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        match existing {
            Some((available,)) => Err(AppError::InsufficientSpaces {
                lesson_id: lesson_id.to_string(),
                requested: quantity,
                available,
            }),
            None => Err(AppError::EntityNotFound(format!(
                "lesson {lesson_id} not found"
            ))),
        }
    }

    async fn release(&self, lesson_id: LessonId, quantity: i32) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE lessons
                SET spaces = spaces + $2
                WHERE lesson_id = $1
            "#,
        )
        .bind(lesson_id)
        .bind(quantity)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // The lesson may have been removed since the reservation; the
        // capacity concept is moot then and the release is a no-op.
        if res.rows_affected() < 1 {
            tracing::warn!(
                lesson_id = %lesson_id,
                quantity,
                "release skipped, lesson no longer exists"
            );
        }

        Ok(())
    }
}
