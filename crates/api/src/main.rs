use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use servio_api::config::ServerConfig;
use servio_api::router::build_app_router;
use servio_api::state::AppState;
use servio_media::mirror::MediaMirror;
use servio_media::store::MediaStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "servio_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = servio_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    servio_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    servio_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let seeded = servio_db::seed::ensure_action_library_seed(&pool)
        .await
        .expect("Failed to seed the action library");
    if seeded > 0 {
        tracing::info!(seeded, "Action library seed entries inserted");
    }

    // --- Media storage ---
    let media = MediaStore::new(&config.upload_dir, &config.export_dir);
    media
        .ensure_dirs()
        .await
        .expect("Failed to create media directories");
    tracing::info!(upload_dir = %config.upload_dir.display(), "Media storage ready");

    // --- Object-store mirror (optional) ---
    let (photo_mirror, asset_mirror) = match &config.minio {
        Some(minio) => {
            let photos = Arc::new(MediaMirror::new(
                &minio.endpoint,
                &minio.access_key,
                &minio.secret_key,
                &minio.photo_bucket,
            ));
            let assets = Arc::new(MediaMirror::new(
                &minio.endpoint,
                &minio.access_key,
                &minio.secret_key,
                &minio.asset_bucket,
            ));
            tracing::info!(endpoint = %minio.endpoint, "Object-store mirror enabled");
            (Some(photos), Some(assets))
        }
        None => (None, None),
    };

    // --- App state and router ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        media,
        photo_mirror,
        asset_mirror,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
