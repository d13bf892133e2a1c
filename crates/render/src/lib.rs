//! Report document rendering.
//!
//! A report is first flattened into a [`view::ReportView`], a pure value
//! holding everything the writers need (masthead, joined text sections,
//! gallery cells with on-disk image paths). The PDF and spreadsheet writers
//! then lay that view out without touching the database.

pub mod excel;
pub mod options;
pub mod pdf;
pub mod view;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pdf error: {0}")]
    Pdf(#[from] printpdf::Error),

    #[error("image error: {0}")]
    Image(#[from] printpdf::image_crate::ImageError),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
