use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::LessonId,
    lesson::{event::UpdateLessonFields, Lesson},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: LessonId,
    pub subject: String,
    pub location: String,
    pub price: i32,
    pub spaces: i32,
}

impl From<Lesson> for LessonResponse {
    fn from(value: Lesson) -> Self {
        let Lesson {
            id,
            subject,
            location,
            price,
            spaces,
        } = value;
        Self {
            id,
            subject,
            location,
            price,
            spaces,
        }
    }
}

/// Administrative field merge; absent fields are left as stored.
/// `spaces` here overwrites the counter without consulting the ledger,
/// which is the documented manual-correction escape hatch.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateLessonRequest {
    #[garde(inner(length(min = 1)))]
    pub subject: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub location: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub price: Option<i32>,
    #[garde(inner(range(min = 0)))]
    pub spaces: Option<i32>,
}

#[derive(new)]
pub struct UpdateLessonRequestWithId(LessonId, UpdateLessonRequest);

impl From<UpdateLessonRequestWithId> for UpdateLessonFields {
    fn from(value: UpdateLessonRequestWithId) -> Self {
        let UpdateLessonRequestWithId(
            lesson_id,
            UpdateLessonRequest {
                subject,
                location,
                price,
                spaces,
            },
        ) = value;
        UpdateLessonFields {
            lesson_id,
            subject,
            location,
            price,
            spaces,
        }
    }
}
