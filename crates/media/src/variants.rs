//! Derived photo variants.
//!
//! Each uploaded original gets two JPEG derivatives: an `optimized` copy
//! capped at 2000px wide for report rendering, and a `thumb` copy fitted
//! into a 480x480 box for gallery listings.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use uuid::Uuid;

use crate::store::MediaStore;
use crate::MediaError;

pub const OPTIMIZED_MAX_WIDTH: u32 = 2000;
pub const OPTIMIZED_QUALITY: u8 = 85;
pub const THUMBNAIL_BOX: u32 = 480;
pub const THUMBNAIL_QUALITY: u8 = 75;

#[derive(Debug, Clone)]
pub struct Variant {
    pub rel_path: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct VariantSet {
    pub optimized: Variant,
    pub thumbnail: Variant,
}

/// Target size for the optimized copy: width capped, aspect preserved.
pub fn optimized_size(width: u32, height: u32) -> (u32, u32) {
    if width > OPTIMIZED_MAX_WIDTH {
        let ratio = OPTIMIZED_MAX_WIDTH as f64 / width as f64;
        (OPTIMIZED_MAX_WIDTH, (height as f64 * ratio) as u32)
    } else {
        (width, height)
    }
}

/// Target size for the thumbnail: fit inside the box, aspect preserved,
/// never upscaled.
pub fn thumbnail_size(width: u32, height: u32) -> (u32, u32) {
    if width <= THUMBNAIL_BOX && height <= THUMBNAIL_BOX {
        return (width, height);
    }
    let ratio = f64::min(
        THUMBNAIL_BOX as f64 / width as f64,
        THUMBNAIL_BOX as f64 / height as f64,
    );
    let w = ((width as f64 * ratio).round() as u32).max(1);
    let h = ((height as f64 * ratio).round() as u32).max(1);
    (w, h)
}

/// Decode the original, write both derivatives under the upload tree, and
/// return their relative paths and dimensions.
///
/// Decoding and resizing are CPU-bound; callers on the async runtime wrap
/// this in `spawn_blocking`.
pub fn build_variants(
    store: &MediaStore,
    report_id: &str,
    original: &Path,
) -> Result<VariantSet, MediaError> {
    let img = image::open(original)?;
    let img = normalize_mode(img);

    let (opt_w, opt_h) = optimized_size(img.width(), img.height());
    let optimized_img = if (opt_w, opt_h) == (img.width(), img.height()) {
        img.clone()
    } else {
        img.resize_exact(opt_w, opt_h, FilterType::CatmullRom)
    };
    let optimized = write_variant(
        store,
        report_id,
        "optimized",
        &optimized_img,
        OPTIMIZED_QUALITY,
    )?;

    let (thumb_w, thumb_h) = thumbnail_size(img.width(), img.height());
    let thumbnail_img = if (thumb_w, thumb_h) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(thumb_w, thumb_h, FilterType::CatmullRom)
    };
    let thumbnail = write_variant(store, report_id, "thumb", &thumbnail_img, THUMBNAIL_QUALITY)?;

    Ok(VariantSet {
        optimized,
        thumbnail,
    })
}

/// JPEG cannot carry alpha; anything that is not already RGB or grayscale
/// is converted to RGB.
fn normalize_mode(img: DynamicImage) -> DynamicImage {
    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => img,
        other => DynamicImage::ImageRgb8(other.to_rgb8()),
    }
}

fn write_variant(
    store: &MediaStore,
    report_id: &str,
    kind: &str,
    img: &DynamicImage,
    quality: u8,
) -> Result<Variant, MediaError> {
    let bytes = encode_jpeg(img, quality)?;
    let rel_path = format!("{report_id}/{kind}/{}.jpg", Uuid::new_v4().simple());
    let abs_path = store.upload_path(&rel_path);
    if let Some(parent) = abs_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&abs_path, &bytes)?;
    Ok(Variant {
        rel_path,
        width: img.width(),
        height: img.height(),
    })
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>, MediaError> {
    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, quality);
    match img {
        DynamicImage::ImageLuma8(gray) => encoder.encode_image(gray)?,
        DynamicImage::ImageRgb8(rgb) => encoder.encode_image(rgb)?,
        other => encoder.encode_image(&other.to_rgb8())?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_images_keep_their_size() {
        assert_eq!(optimized_size(1200, 900), (1200, 900));
        assert_eq!(optimized_size(2000, 1500), (2000, 1500));
    }

    #[test]
    fn wide_images_are_capped_at_max_width() {
        assert_eq!(optimized_size(4000, 3000), (2000, 1500));
        assert_eq!(optimized_size(3000, 1000), (2000, 666));
    }

    #[test]
    fn thumbnails_fit_the_box_without_upscaling() {
        assert_eq!(thumbnail_size(300, 200), (300, 200));
        assert_eq!(thumbnail_size(960, 480), (480, 240));
        assert_eq!(thumbnail_size(480, 960), (240, 480));
        assert_eq!(thumbnail_size(4000, 3000), (480, 360));
    }

    #[test]
    fn thumbnail_of_extreme_aspect_never_collapses_to_zero() {
        let (w, h) = thumbnail_size(10000, 4);
        assert_eq!(w, 480);
        assert!(h >= 1);
    }

    #[test]
    fn variants_are_written_from_a_real_image() {
        let tmp = std::env::temp_dir().join(format!("servio-variants-{}", Uuid::new_v4()));
        let store = MediaStore::new(tmp.join("uploads"), tmp.join("exports"));
        std::fs::create_dir_all(store.upload_dir()).unwrap();

        let original_path = store.upload_dir().join("original.png");
        let img = image::RgbaImage::from_pixel(2400, 1200, image::Rgba([10, 20, 30, 255]));
        img.save(&original_path).unwrap();

        let set = build_variants(&store, "report-1", &original_path).unwrap();
        assert_eq!((set.optimized.width, set.optimized.height), (2000, 1000));
        assert_eq!((set.thumbnail.width, set.thumbnail.height), (480, 240));
        assert!(set.optimized.rel_path.starts_with("report-1/optimized/"));
        assert!(set.thumbnail.rel_path.starts_with("report-1/thumb/"));
        assert!(store.upload_path(&set.optimized.rel_path).exists());
        assert!(store.upload_path(&set.thumbnail.rel_path).exists());

        std::fs::remove_dir_all(&tmp).unwrap();
    }
}
