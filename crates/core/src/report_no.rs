//! Report number and export artifact naming.

use crate::types::Timestamp;

/// Generate a report number from the creation time.
///
/// Convention: `SR-{yymmdd}-{nnn}` where `nnn` is the unix timestamp
/// modulo 1000, zero-padded. Assigned once at creation and never changed;
/// duplicating a report assigns a fresh one.
pub fn generate_report_no(ts: Timestamp) -> String {
    format!("SR-{}-{:03}", ts.format("%y%m%d"), ts.timestamp() % 1000)
}

/// Deterministic PDF export filename. Re-exporting with the same
/// parameters overwrites the same artifact.
pub fn pdf_filename(report_no: &str, language: &str) -> String {
    format!("{report_no}-{language}.pdf")
}

/// Deterministic spreadsheet export filename.
pub fn excel_filename(report_no: &str, export_type: &str, language: &str) -> String {
    format!("{report_no}-{export_type}-{language}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn report_no_format() {
        let ts = chrono::Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).unwrap();
        let no = generate_report_no(ts);
        assert!(no.starts_with("SR-240307-"), "got {no}");
        assert_eq!(no.len(), "SR-240307-000".len());
    }

    #[test]
    fn report_no_suffix_is_zero_padded() {
        // Unix timestamp ending in 007.
        let ts = chrono::Utc.timestamp_opt(1_700_000_007, 0).unwrap();
        assert!(generate_report_no(ts).ends_with("-007"));
    }

    #[test]
    fn export_filenames_are_deterministic() {
        assert_eq!(pdf_filename("SR-240307-123", "en"), "SR-240307-123-en.pdf");
        assert_eq!(
            excel_filename("SR-240307-123", "internal", "tr"),
            "SR-240307-123-internal-tr.xlsx"
        );
    }
}
