//! Spreadsheet writer.
//!
//! Fixed sheet set: Summary, Findings, Actions, Parts, Photos. The
//! `internal` export type appends empty Measurements, Work_Order and
//! History sheets for the workshop to fill in by hand.

use std::path::Path;

use rust_xlsxwriter::{Image, Workbook};

use servio_db::models::photo::Photo;
use servio_db::models::report::{Report, TextEntry};

use crate::options::ExcelExportOptions;
use crate::RenderError;

/// Embedded photo size in pixels.
const PHOTO_W: f64 = 180.0;
const PHOTO_H: f64 = 120.0;

/// Vertical stride between photo pairs, in rows.
const PHOTO_ROW_STRIDE: u32 = 6;
const PHOTO_ROW_HEIGHT: f64 = 95.0;

/// Write the report as a spreadsheet, overwriting any previous artifact.
pub fn write_excel(
    report: &Report,
    before: &[Photo],
    after: &[Photo],
    upload_dir: &Path,
    options: &ExcelExportOptions,
    output: &Path,
) -> Result<(), RenderError> {
    let mut workbook = Workbook::new();

    let summary = workbook.add_worksheet();
    summary.set_name("Summary")?;
    summary.write_string(0, 0, "Report No")?;
    summary.write_string(0, 1, &report.report_no)?;
    summary.write_string(1, 0, "Status")?;
    summary.write_string(1, 1, &report.status)?;
    summary.write_string(2, 0, "Result")?;
    summary.write_string(2, 1, report.result_notes.as_deref().unwrap_or(""))?;

    let findings = workbook.add_worksheet();
    findings.set_name("Findings")?;
    findings.write_string(0, 0, "Problems")?;
    findings.write_string(1, 0, &pipe_join(&report.blocks.0.problems))?;

    let actions = workbook.add_worksheet();
    actions.set_name("Actions")?;
    actions.write_string(0, 0, "Actions")?;
    actions.write_string(1, 0, &pipe_join(&report.blocks.0.actions))?;

    let parts = workbook.add_worksheet();
    parts.set_name("Parts")?;
    parts.write_string(0, 0, "Part")?;
    parts.write_string(0, 1, "Qty")?;
    parts.write_string(0, 2, "Note")?;
    for (i, spare) in report.spares.0.iter().enumerate() {
        let row = (i + 1) as u32;
        parts.write_string(row, 0, &spare.part_name)?;
        parts.write_number(row, 1, spare.qty as f64)?;
        parts.write_string(row, 2, &spare.note)?;
    }

    let photos = workbook.add_worksheet();
    photos.set_name("Photos")?;
    photos.write_string(0, 0, "Before")?;
    photos.write_string(0, 1, "Before Caption")?;
    photos.write_string(0, 2, "After")?;
    photos.write_string(0, 3, "After Caption")?;

    let pairs = before.len().max(after.len());
    let mut row = 1u32;
    for i in 0..pairs {
        if let Some(photo) = before.get(i) {
            photos.write_string(row, 1, &photo.caption)?;
            if let Some(image) = load_photo(upload_dir, photo)? {
                photos.insert_image(row, 0, &image)?;
            }
        }
        if let Some(photo) = after.get(i) {
            photos.write_string(row, 3, &photo.caption)?;
            if let Some(image) = load_photo(upload_dir, photo)? {
                photos.insert_image(row, 2, &image)?;
            }
        }
        photos.set_row_height(row, PHOTO_ROW_HEIGHT)?;
        row += PHOTO_ROW_STRIDE;
    }

    if options.is_internal() {
        workbook.add_worksheet().set_name("Measurements")?;
        workbook.add_worksheet().set_name("Work_Order")?;
        workbook.add_worksheet().set_name("History")?;
    }

    workbook.save(output)?;
    Ok(())
}

fn pipe_join(entries: &[TextEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Load the optimized variant scaled to the embedded photo size; a missing
/// file yields no image for that cell.
fn load_photo(upload_dir: &Path, photo: &Photo) -> Result<Option<Image>, RenderError> {
    let path = upload_dir.join(&photo.optimized_object_key);
    if !path.exists() {
        return Ok(None);
    }
    let image = Image::new(&path)?;
    let scale_w = PHOTO_W / image.width();
    let scale_h = PHOTO_H / image.height();
    Ok(Some(image.set_scale_width(scale_w).set_scale_height(scale_h)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use servio_core::types::Id;
    use servio_core::workflow::ReportStatus;
    use servio_db::models::report::{ReportBlocks, ReportIn, SpareLine};

    fn sample_report() -> Report {
        let input = ReportIn {
            language: "tr".into(),
            status: ReportStatus::Draft,
            revision_no: 1,
            customer_id: Id::now_v7(),
            issuer_id: None,
            contact_id: None,
            company_profile_id: None,
            responsible_user: "tech1".into(),
            last_check_by: None,
            arrival_date: None,
            shipping_date: None,
            warranty_status: None,
            service_authority: None,
            products: vec![],
            blocks: ReportBlocks {
                complaint: vec![],
                problems: vec![
                    TextEntry {
                        text: "Seat erosion.".into(),
                    },
                    TextEntry {
                        text: "Stem scoring.".into(),
                    },
                ],
                actions: vec![],
            },
            actions: vec![],
            accessory_notes: vec![],
            spares: vec![SpareLine {
                part_name: "Gasket".into(),
                qty: 3,
                note: "graphite".into(),
            }],
            result_notes: Some("OK".into()),
            internal_notes: None,
        };
        Report::from_input(input, chrono::Utc::now())
    }

    #[test]
    fn pipe_join_preserves_order() {
        let report = sample_report();
        assert_eq!(
            pipe_join(&report.blocks.0.problems),
            "Seat erosion. | Stem scoring."
        );
    }

    #[test]
    fn writes_an_xlsx_file() {
        let tmp = std::env::temp_dir().join(format!("servio-xlsx-{}.xlsx", uuid::Uuid::new_v4()));
        write_excel(
            &sample_report(),
            &[],
            &[],
            Path::new("/nonexistent"),
            &ExcelExportOptions::default(),
            &tmp,
        )
        .unwrap();
        let bytes = std::fs::read(&tmp).unwrap();
        assert!(bytes.starts_with(b"PK"));
        std::fs::remove_file(&tmp).unwrap();
    }

    #[test]
    fn internal_type_is_flagged() {
        let opts = ExcelExportOptions {
            export_type: "internal".into(),
            language: "en".into(),
        };
        assert!(opts.is_internal());
        assert!(!ExcelExportOptions::default().is_internal());
    }
}
