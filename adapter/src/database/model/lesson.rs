use kernel::model::{id::LessonId, lesson::Lesson};

#[derive(sqlx::FromRow)]
pub struct LessonRow {
    pub lesson_id: LessonId,
    pub subject: String,
    pub location: String,
    pub price: i32,
    pub spaces: i32,
}

impl From<LessonRow> for Lesson {
    fn from(value: LessonRow) -> Self {
        let LessonRow {
            lesson_id,
            subject,
            location,
            price,
            spaces,
        } = value;
        Lesson {
            id: lesson_id,
            subject,
            location,
            price,
            spaces,
        }
    }
}
