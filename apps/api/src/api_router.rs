use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use hereiam_application::RateLimitRule;
use hereiam_core::AppError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::{handlers, middleware};

pub fn build_router(app_state: AppState) -> Result<Router, AppError> {
    // Contact submissions: 5 attempts per client address per hour.
    let contact_rate_rule = RateLimitRule::new("contact", 5, 60 * 60);

    let contact_routes = Router::new()
        .route("/api/contact", post(handlers::contact::submit_contact_handler))
        .route_layer(from_fn_with_state(app_state.clone(), middleware::rate_limit))
        .layer(axum::Extension(contact_rate_rule));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&app_state.site_url)
                .map_err(|error| AppError::Internal(format!("invalid SITE_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(contact_routes)
        .route("/spotify/login", get(handlers::spotify::login_handler))
        .route("/spotify/callback", get(handlers::spotify::callback_handler))
        .route(
            "/api/spotify-refresh",
            post(handlers::spotify::refresh_handler),
        )
        .route(
            "/api/spotify/now-playing",
            get(handlers::spotify::now_playing_handler),
        )
        .route(
            "/api/spotify/recommendations",
            get(handlers::spotify::recommendations_handler),
        )
        .route("/api/github-stats", get(handlers::github::github_stats_handler))
        .route(
            "/api/i18n/{locale}",
            get(handlers::i18n::locale_dictionary_handler),
        )
        .route(
            "/api/experience/{locale}",
            get(handlers::experience::experience_handler),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
