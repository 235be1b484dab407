use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::docs::openapi_json;

pub fn build_docs_routers() -> Router<AppRegistry> {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
