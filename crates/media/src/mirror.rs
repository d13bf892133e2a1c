//! Best-effort mirroring to an S3-compatible object store.
//!
//! The local filesystem is the source of truth; the mirror exists so a
//! MinIO deployment can serve the same objects. Mirror failures are logged
//! and never surface to request handlers.

use std::sync::Arc;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct MediaMirror {
    client: Client,
    bucket: String,
}

impl MediaMirror {
    pub fn new(endpoint: &str, access_key: &str, secret_key: &str, bucket: &str) -> Self {
        let credentials = Credentials::new(access_key, secret_key, None, None, "static");
        let config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(format!("http://{endpoint}"))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();
        Self {
            client: Client::from_conf(config),
            bucket: bucket.to_string(),
        }
    }

    async fn ensure_bucket(&self) -> bool {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return true;
        }
        match self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(_) => true,
            Err(err) => {
                warn!(bucket = %self.bucket, error = %err, "mirror bucket unavailable");
                false
            }
        }
    }

    /// Upload one object, swallowing any failure.
    pub async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) {
        if !self.ensure_bucket().await {
            return;
        }
        let result = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await;
        if let Err(err) = result {
            warn!(key, error = %err, "mirror upload failed");
        }
    }
}

/// Fire-and-forget upload; does nothing when no mirror is configured.
pub fn spawn_put(
    mirror: Option<Arc<MediaMirror>>,
    key: String,
    data: Vec<u8>,
    content_type: &'static str,
) {
    if let Some(mirror) = mirror {
        tokio::spawn(async move {
            mirror.put(&key, data, content_type).await;
        });
    }
}
