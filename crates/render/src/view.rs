//! Flattened report view consumed by the document writers.

use std::path::{Path, PathBuf};

use servio_core::gallery::cell_width_pct;
use servio_db::models::company_profile::CompanyProfile;
use servio_db::models::photo::Photo;
use servio_db::models::report::{Report, SpareLine, TextEntry};

use crate::options::PdfExportOptions;

/// Letterhead block taken from the report's company profile.
#[derive(Debug, Clone)]
pub struct Masthead {
    pub company_name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

/// One gallery photo: the optimized variant plus its caption.
#[derive(Debug, Clone)]
pub struct GalleryCell {
    pub image_path: PathBuf,
    pub caption: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct Gallery {
    pub title: String,
    pub cells: Vec<GalleryCell>,
}

#[derive(Debug, Clone)]
pub struct ReportView {
    pub title: String,
    pub masthead: Option<Masthead>,
    pub metadata_line: String,
    pub general: String,
    pub complaint: String,
    pub problems: String,
    pub actions: String,
    pub spares_line: String,
    pub result_notes: String,
    pub before: Gallery,
    pub after: Gallery,
    /// Gallery cell width, percent of the content width.
    pub cell_width_pct: f32,
}

/// Space-join the ordered entries of a text block.
pub fn join_block(entries: &[TextEntry]) -> String {
    entries
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render the spares as a single `"name x qty"` line.
pub fn spares_line(spares: &[SpareLine]) -> String {
    spares
        .iter()
        .map(|s| format!("{} x{}", s.part_name, s.qty))
        .collect::<Vec<_>>()
        .join(", ")
}

fn gallery(title: &str, photos: &[Photo], upload_dir: &Path) -> Gallery {
    let cells = photos
        .iter()
        .filter_map(|p| {
            let image_path = upload_dir.join(&p.optimized_object_key);
            // A photo whose file vanished from disk is skipped silently.
            if !image_path.exists() {
                return None;
            }
            Some(GalleryCell {
                image_path,
                caption: p.caption.clone(),
                width: p.optimized_width.max(1) as u32,
                height: p.optimized_height.max(1) as u32,
            })
        })
        .collect();
    Gallery {
        title: title.to_string(),
        cells,
    }
}

/// Flatten one report into the layout-ready view.
pub fn assemble_view(
    report: &Report,
    before: &[Photo],
    after: &[Photo],
    company: Option<&CompanyProfile>,
    upload_dir: &Path,
    options: &PdfExportOptions,
) -> ReportView {
    let masthead = company.map(|c| Masthead {
        company_name: c.name.clone(),
        address: c.address.clone().unwrap_or_default(),
        phone: c.phone.clone().unwrap_or_default(),
        email: c.email.clone().unwrap_or_default(),
    });

    let metadata_line = format!(
        "Report No: {} | Revision: {} | Language: {}",
        report.report_no, report.revision_no, options.language
    );
    let general = format!(
        "Customer: {} | Contact: {} | Status: {}",
        report.customer_id,
        report
            .contact_id
            .map(|id| id.to_string())
            .unwrap_or_default(),
        report.status
    );

    ReportView {
        title: "SERVICE REPORT".to_string(),
        masthead,
        metadata_line,
        general,
        complaint: join_block(&report.blocks.0.complaint),
        problems: join_block(&report.blocks.0.problems),
        actions: join_block(&report.blocks.0.actions),
        spares_line: spares_line(&report.spares.0),
        result_notes: report.result_notes.clone().unwrap_or_default(),
        before: gallery("Before Photos", before, upload_dir),
        after: gallery("After Photos", after, upload_dir),
        cell_width_pct: cell_width_pct(options.photos_per_page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use servio_core::types::Id;
    use servio_core::workflow::ReportStatus;
    use servio_db::models::report::{ReportBlocks, ReportIn};
    use sqlx::types::Json;

    fn sample_report() -> Report {
        let input = ReportIn {
            language: "tr".into(),
            status: ReportStatus::Draft,
            revision_no: 2,
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
                complaint: vec![
                    TextEntry {
                        text: "Leak at stem.".into(),
                    },
                    TextEntry {
                        text: "Noise under load.".into(),
                    },
                ],
                problems: vec![],
                actions: vec![],
            },
            actions: vec![],
            accessory_notes: vec![],
            spares: vec![
                SpareLine {
                    part_name: "Packing set".into(),
                    qty: 1,
                    note: String::new(),
                },
                SpareLine {
                    part_name: "O-ring kit".into(),
                    qty: 2,
                    note: String::new(),
                },
            ],
            result_notes: Some("Valve restored to service.".into()),
            internal_notes: None,
        };
        Report::from_input(input, chrono::Utc::now())
    }

    #[test]
    fn blocks_are_space_joined_in_order() {
        let report = sample_report();
        let view = assemble_view(
            &report,
            &[],
            &[],
            None,
            Path::new("/nonexistent"),
            &PdfExportOptions::default(),
        );
        assert_eq!(view.complaint, "Leak at stem. Noise under load.");
        assert_eq!(view.problems, "");
    }

    #[test]
    fn spares_render_as_name_x_qty() {
        let report = sample_report();
        let view = assemble_view(
            &report,
            &[],
            &[],
            None,
            Path::new("/nonexistent"),
            &PdfExportOptions::default(),
        );
        assert_eq!(view.spares_line, "Packing set x1, O-ring kit x2");
    }

    #[test]
    fn metadata_line_uses_requested_language() {
        let report = sample_report();
        let options = PdfExportOptions {
            language: "en".into(),
            ..Default::default()
        };
        let view = assemble_view(&report, &[], &[], None, Path::new("/nonexistent"), &options);
        assert!(view.metadata_line.contains(&report.report_no));
        assert!(view.metadata_line.contains("Revision: 2"));
        assert!(view.metadata_line.ends_with("Language: en"));
    }

    #[test]
    fn missing_photo_files_are_dropped_from_the_gallery() {
        let report = sample_report();
        let photo = Photo {
            id: Id::now_v7(),
            report_id: report.id,
            kind: "before".into(),
            caption: "stem".into(),
            tags: vec![],
            original_object_key: "r/original/a.jpg".into(),
            original_size_bytes: 10,
            optimized_object_key: "r/optimized/a.jpg".into(),
            thumb_object_key: "r/thumb/a.jpg".into(),
            optimized_width: 2000,
            optimized_height: 1500,
            thumb_width: 480,
            thumb_height: 360,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let view = assemble_view(
            &report,
            &[photo],
            &[],
            None,
            Path::new("/nonexistent"),
            &PdfExportOptions::default(),
        );
        assert!(view.before.cells.is_empty());
    }

    #[test]
    fn cell_width_follows_photos_per_page() {
        let report = sample_report();
        let options = PdfExportOptions {
            photos_per_page: 8,
            ..Default::default()
        };
        let view = assemble_view(&report, &[], &[], None, Path::new("/nonexistent"), &options);
        assert_eq!(view.cell_width_pct, 23.0);
    }

    #[test]
    fn masthead_taken_from_profile_when_present() {
        let report = sample_report();
        let profile = CompanyProfile {
            id: Id::now_v7(),
            name: "Demart Valve Service".into(),
            legal_company_name: None,
            legal_text: None,
            legal_notes: Json(vec![]),
            address: Some("Istanbul".into()),
            phone: Some("+90 212 000 00 00".into()),
            email: Some("service@example.com".into()),
            signature_labels: Json(Default::default()),
            logo_object_key: None,
            is_default: true,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let view = assemble_view(
            &report,
            &[],
            &[],
            Some(&profile),
            Path::new("/nonexistent"),
            &PdfExportOptions::default(),
        );
        let masthead = view.masthead.unwrap();
        assert_eq!(masthead.company_name, "Demart Valve Service");
        assert_eq!(masthead.address, "Istanbul");
    }
}
