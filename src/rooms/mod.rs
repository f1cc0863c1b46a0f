pub mod model;
mod store;

mod create;
mod join;
mod leave;
mod list;
mod live;
mod wait;

use axum::{routing::post, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create::create))
        .route("/list", post(list::list))
        .route("/join", post(join::join))
        .route("/wait", post(wait::wait))
        .route("/start", post(live::start))
        .route("/end", post(live::end))
        .route("/result", post(live::result))
        .route("/leave", post(leave::leave))
}
