use std::sync::Arc;

use servio_media::mirror::MediaMirror;
use servio_media::store::MediaStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: servio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Local filesystem layout for uploads and exports.
    pub media: MediaStore,
    /// Best-effort mirror for photo objects, when configured.
    pub photo_mirror: Option<Arc<MediaMirror>>,
    /// Best-effort mirror for company assets, when configured.
    pub asset_mirror: Option<Arc<MediaMirror>>,
}
