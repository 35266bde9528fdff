use axum::{
    http::HeaderValue,
    middleware::from_fn,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config;
use crate::handlers::{admin, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};

/// Build the full application router.
///
/// Layering order matters: the JWT gate wraps the whole `/api` tree, and the
/// admin role gate wraps `/api/admin` inside it, so an anonymous request to an
/// admin route is rejected 401 before the role check ever runs.
pub fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(public::auth::root))
        .route("/health", get(public::auth::health))
        .merge(auth_public_routes())
        // Protected API
        .nest("/api", api_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes() -> Router {
    Router::new()
        .route("/auth/register", post(public::auth::register))
        .route("/auth/login", post(public::auth::login))
}

fn api_routes() -> Router {
    Router::new()
        // Session
        .route("/auth/whoami", get(protected::auth::whoami))
        .route("/auth/refresh", post(protected::auth::refresh))
        // Profile and dashboard
        .route(
            "/profile",
            get(protected::profile::get_profile).put(protected::profile::update_profile),
        )
        .route("/dashboard", get(protected::dashboard::get_dashboard))
        // Training
        .route("/training/videos", get(protected::training::list_videos))
        .route("/training/videos/:id", get(protected::training::get_video))
        .route(
            "/training/goals",
            get(protected::training::list_goals).post(protected::training::create_goal),
        )
        .route("/training/goals/:id", patch(protected::training::update_goal))
        .route("/training/programs", get(protected::training::list_programs))
        .route(
            "/training/programs/:id/enroll",
            post(protected::training::enroll_program),
        )
        // Analysis videos
        .route(
            "/videos",
            get(protected::videos::list_videos).post(protected::videos::create_video),
        )
        // Tournaments
        .route("/tournaments", get(protected::tournaments::list_tournaments))
        .route(
            "/tournaments/registrations",
            get(protected::tournaments::list_registrations),
        )
        .route("/tournaments/:id", get(protected::tournaments::get_tournament))
        .route(
            "/tournaments/:id/register",
            post(protected::tournaments::register),
        )
        // Rewards
        .route("/rewards", get(protected::rewards::list_rewards))
        .route("/rewards/unlocks", get(protected::rewards::list_unlocks))
        .route(
            "/rewards/celebration-shown",
            post(protected::rewards::celebration_shown),
        )
        .route("/rewards/redeem", post(protected::rewards::redeem))
        .route("/rewards/redemptions", get(protected::rewards::list_redemptions))
        // Community
        .route(
            "/community/posts",
            get(protected::community::list_posts).post(protected::community::create_post),
        )
        .route("/community/posts/:id", delete(protected::community::delete_post))
        // Support
        .route(
            "/support/tickets",
            get(protected::support::list_tickets).post(protected::support::create_ticket),
        )
        .route("/support/tickets/:id", get(protected::support::get_ticket))
        .route(
            "/support/tickets/:id/responses",
            post(protected::support::add_response),
        )
        // Marketplace
        .route("/marketplace/items", get(protected::marketplace::list_items))
        // Sponsor
        .route(
            "/sponsor/application",
            get(protected::sponsor::get_application).post(protected::sponsor::submit_application),
        )
        // Wearables
        .route(
            "/wearables/devices",
            get(protected::wearables::list_devices).post(protected::wearables::register_device),
        )
        .route(
            "/wearables/devices/:id",
            delete(protected::wearables::remove_device),
        )
        // Admin subtree with its own role gate
        .nest("/admin", admin_routes())
        // Session gate for everything under /api
        .layer(from_fn(jwt_auth_middleware))
}

fn admin_routes() -> Router {
    Router::new()
        .route(
            "/videos",
            get(admin::videos::list_videos).post(admin::videos::create_video),
        )
        .route("/users", get(admin::users::list_users))
        .route("/users/:id", patch(admin::users::update_user))
        .route("/users/:id/lock", post(admin::users::lock_user))
        .route("/users/:id/unlock", post(admin::users::unlock_user))
        .route("/tickets", get(admin::tickets::list_tickets))
        .route("/tickets/:id", patch(admin::tickets::update_ticket))
        .route(
            "/sponsor-applications",
            get(admin::sponsors::list_applications),
        )
        .route(
            "/sponsor-applications/:id/review",
            post(admin::sponsors::review_application),
        )
        .layer(from_fn(require_admin_middleware))
}

fn cors_layer() -> CorsLayer {
    let origins = &config::config().security.cors_origins;

    if origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}
