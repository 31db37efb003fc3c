use axum::{
    routing::{get, patch, post},
    Router,
};
use scheduling_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    {
        let state = app_state.clone();
        tokio::spawn(async move {
            loop {
                match state.invitation_service.expire_stale().await {
                    Ok(0) => {}
                    Ok(expired) => info!(expired, "expired stale invitations"),
                    Err(e) => tracing::error!(error = ?e, "invitation expiry sweep failed"),
                }
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
        });
    }

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let api = Router::new()
        .route(
            "/api/availability",
            get(routes::availability::list_availability)
                .post(routes::availability::create_availability),
        )
        .route(
            "/api/availability/:id",
            axum::routing::delete(routes::availability::deactivate_availability),
        )
        .route(
            "/api/interviews/available-slots",
            get(routes::interviews::available_slots),
        )
        .route(
            "/api/interviews/bookings",
            get(routes::interviews::list_bookings),
        )
        .route(
            "/api/interviews/conflicts",
            post(routes::interviews::check_conflicts),
        )
        .route(
            "/api/interviews/create-invitation",
            post(routes::interviews::create_invitation),
        )
        .route(
            "/api/interviews/invitations/:id",
            get(routes::interviews::get_invitation),
        )
        .route(
            "/api/interviews/invitations/:id/respond",
            post(routes::interviews::respond_invitation),
        )
        .route(
            "/api/interviews/:id",
            patch(routes::interviews::update_booking)
                .delete(routes::interviews::cancel_booking),
        )
        .route(
            "/api/interviews/:id/history",
            get(routes::interviews::booking_history),
        )
        .route(
            "/api/reference/countries",
            get(routes::reference::list_countries),
        )
        .layer(axum::middleware::from_fn(
            scheduling_backend::middleware::auth::require_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            scheduling_backend::middleware::rate_limit::new_rps_state(config.api_rps),
            scheduling_backend::middleware::rate_limit::rps_middleware,
        ));

    let app = base_routes
        .merge(api)
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
