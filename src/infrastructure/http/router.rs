use crate::infrastructure::http::controllers;
use crate::infrastructure::http::middleware::{
    require_auth, require_permission, with_error_handling, AppState,
};
use axum::{
    body::Body,
    http::Request,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

pub fn build_router(state: AppState) -> Router {
    let development_mode = state.development_mode;

    let app = Router::new()
        .route("/health", get(controllers::health_check))
        .route(
            "/api/hotels",
            protected(
                get(controllers::list_hotels).post(controllers::create_hotel),
                &state,
            ),
        )
        .route(
            "/api/hotels/:id",
            protected(
                get(controllers::get_hotel)
                    .put(controllers::update_hotel)
                    .delete(controllers::delete_hotel),
                &state,
            ),
        )
        .fallback(controllers::not_found)
        .with_state(state);

    with_error_handling(app, development_mode)
        .layer(TraceLayer::new_for_http().make_span_with(make_span))
        .layer(CorsLayer::permissive())
}

/// Authentication runs first, then authorization. A method the path does not
/// serve skips both and gets the not-found response.
fn protected(routes: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    routes
        .route_layer(axum::middleware::from_fn(require_permission))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        .fallback(controllers::not_found)
}

fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "http-request",
        request_id = %uuid::Uuid::new_v4(),
        method = %request.method(),
        path = request.uri().path(),
    )
}
