use crate::model::id::LessonId;

/// Administrative field merge for a lesson. `None` fields are left
/// untouched. This path intentionally bypasses the inventory ledger:
/// it exists for manual capacity correction, not order fulfillment.
#[derive(Debug, Clone)]
pub struct UpdateLessonFields {
    pub lesson_id: LessonId,
    pub subject: Option<String>,
    pub location: Option<String>,
    pub price: Option<i32>,
    pub spaces: Option<i32>,
}
