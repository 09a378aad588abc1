use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::order::{create_order, show_order_list};

pub fn build_order_routers() -> Router<AppRegistry> {
    let orders_routers = Router::new()
        .route("/", post(create_order))
        .route("/", get(show_order_list));

    Router::new().nest("/orders", orders_routers)
}
