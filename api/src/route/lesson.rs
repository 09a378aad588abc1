use axum::{
    routing::{get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::lesson::{show_lesson_list, update_lesson};

pub fn build_lesson_routers() -> Router<AppRegistry> {
    let lessons_routers = Router::new()
        .route("/", get(show_lesson_list))
        .route("/:lesson_id", put(update_lesson));

    Router::new().nest("/lessons", lessons_routers)
}
