use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::LessonId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::lesson::{LessonResponse, UpdateLessonRequest, UpdateLessonRequestWithId};

pub async fn show_lesson_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<LessonResponse>>> {
    registry
        .lesson_repository()
        .find_all()
        .await
        .map(|lessons| lessons.into_iter().map(LessonResponse::from).collect())
        .map(Json)
}

pub async fn update_lesson(
    Path(lesson_id): Path<LessonId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateLessonRequest>,
) -> AppResult<StatusCode> {
    req.validate(&())?;

    let update_lesson = UpdateLessonRequestWithId::new(lesson_id, req);
    registry
        .lesson_repository()
        .update_fields(update_lesson.into())
        .await
        .map(|_| StatusCode::OK)
}
