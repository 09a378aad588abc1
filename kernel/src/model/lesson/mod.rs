pub mod event;

use crate::model::id::LessonId;

#[derive(Debug, Clone)]
pub struct Lesson {
    pub id: LessonId,
    pub subject: String,
    pub location: String,
    pub price: i32,
    pub spaces: i32,
}

/// Outcome of a successful conditional decrement, carrying the
/// pre/post space counts for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacesReserved {
    pub lesson_id: LessonId,
    pub quantity: i32,
    pub spaces_before: i32,
    pub spaces_after: i32,
}
