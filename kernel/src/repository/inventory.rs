use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{id::LessonId, lesson::SpacesReserved};

/// Owns the read-validate-decrement protocol for lesson capacity.
///
/// Implementations must perform `reserve` as a single store-level
/// conditional update (match `spaces >= quantity`, set
/// `spaces = spaces - quantity`), never as a read followed by a
/// separate write. Two concurrent reservations against the same lesson
/// are serialized by the store; the loser observes a failed match.
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    /// Atomically decrements the lesson's spaces by `quantity`.
    ///
    /// Fails with `EntityNotFound` when the lesson does not exist and
    /// `InsufficientSpaces` when it exists but has fewer than
    /// `quantity` spaces left. A failed call leaves the stored count
    /// untouched, so retrying is always safe.
    async fn reserve(&self, lesson_id: LessonId, quantity: i32) -> AppResult<SpacesReserved>;

    /// Compensating operation: atomically gives `quantity` spaces back.
    /// A no-op when the lesson no longer exists.
    async fn release(&self, lesson_id: LessonId, quantity: i32) -> AppResult<()>;
}
