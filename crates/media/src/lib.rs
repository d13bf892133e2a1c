//! File storage for report media and exports.
//!
//! Originals, derived photo variants, and generated documents live on the
//! local filesystem and are served over `/files/...`. Every write is also
//! mirrored to an S3-compatible object store on a best-effort basis.

pub mod mirror;
pub mod store;
pub mod variants;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
