use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::trace_id;
use crate::routes::{auth, chronicle, connections, contacts, health, profiles, synergy, work_entries};
use crate::services::cookies::CookieHelper;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub cookies: CookieHelper,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let cookies = CookieHelper::new(
        config.cookies.clone(),
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
    );
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        cookies,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        // Browser-facing: the confirmation link lands here and redirects
        .route("/auth/callback", get(auth::callback));

    // User routes; each handler authenticates via the UserAuth extractor
    let user_routes = Router::new()
        // Profiles
        .route(
            "/api/v1/profiles/me",
            get(profiles::get_my_profile).put(profiles::update_my_profile),
        )
        .route("/api/v1/profiles/:user_id", get(profiles::get_profile))
        // Contacts
        .route(
            "/api/v1/contacts",
            get(contacts::list_contacts).post(contacts::create_contact),
        )
        .route(
            "/api/v1/contacts/:contact_id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        // Connections
        .route("/api/v1/connections", get(connections::list_connections))
        .route(
            "/api/v1/connections/invites",
            post(connections::create_invite),
        )
        .route(
            "/api/v1/connections/redeem",
            post(connections::redeem_invite),
        )
        // Chronicle
        .route(
            "/api/v1/chronicle/entries",
            get(chronicle::list_entries).post(chronicle::create_entry),
        )
        .route(
            "/api/v1/chronicle/entries/:entry_id",
            put(chronicle::update_entry).delete(chronicle::delete_entry),
        )
        .route(
            "/api/v1/chronicle/places",
            get(chronicle::list_places).post(chronicle::create_place),
        )
        .route(
            "/api/v1/chronicle/places/:place_id",
            delete(chronicle::delete_place),
        )
        // Work entries
        .route(
            "/api/v1/work-entries",
            get(work_entries::list_work_entries).post(work_entries::create_work_entry),
        )
        .route(
            "/api/v1/work-entries/:entry_id",
            put(work_entries::update_work_entry).delete(work_entries::delete_work_entry),
        )
        // Synergy note generator
        .route("/api/ai/synergy", post(synergy::generate_synergy));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
