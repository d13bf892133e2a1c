use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Local directory holding uploaded photos and their variants.
    pub upload_dir: PathBuf,
    /// Local directory holding generated export artifacts.
    pub export_dir: PathBuf,
    /// Object-store mirror settings; `None` disables mirroring.
    pub minio: Option<MinioConfig>,
}

/// S3-compatible object store settings (MinIO-style endpoint).
#[derive(Debug, Clone)]
pub struct MinioConfig {
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    /// Bucket for uploaded photos and their variants.
    pub photo_bucket: String,
    /// Bucket for company assets (logos).
    pub asset_bucket: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default            |
    /// |------------------------|--------------------|
    /// | `HOST`                 | `0.0.0.0`          |
    /// | `PORT`                 | `3000`             |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`               |
    /// | `UPLOAD_DIR`           | `runtime/uploads`  |
    /// | `EXPORT_DIR`           | `exports`          |
    /// | `MINIO_ENDPOINT`       | unset (mirror off) |
    /// | `MINIO_ACCESS_KEY`     | `minioadmin`       |
    /// | `MINIO_SECRET_KEY`     | `minioadmin`       |
    /// | `MINIO_PHOTO_BUCKET`   | `demart-photos`    |
    /// | `MINIO_ASSET_BUCKET`   | `demart-assets`    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "runtime/uploads".into()));
        let export_dir =
            PathBuf::from(std::env::var("EXPORT_DIR").unwrap_or_else(|_| "exports".into()));

        let minio = std::env::var("MINIO_ENDPOINT").ok().map(|endpoint| MinioConfig {
            endpoint,
            access_key: std::env::var("MINIO_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".into()),
            secret_key: std::env::var("MINIO_SECRET_KEY").unwrap_or_else(|_| "minioadmin".into()),
            photo_bucket: std::env::var("MINIO_PHOTO_BUCKET")
                .unwrap_or_else(|_| "demart-photos".into()),
            asset_bucket: std::env::var("MINIO_ASSET_BUCKET")
                .unwrap_or_else(|_| "demart-assets".into()),
        });

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            export_dir,
            minio,
        }
    }
}
