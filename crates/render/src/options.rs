//! Export request options.
//!
//! Both option sets are persisted verbatim into the export log, so they
//! derive `Serialize` as well.

use serde::{Deserialize, Serialize};

fn default_photos_per_page() -> u8 {
    6
}

fn default_quality() -> String {
    "standard".into()
}

fn default_language() -> String {
    "tr".into()
}

fn default_excel_type() -> String {
    "external".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PdfExportOptions {
    #[serde(default = "default_photos_per_page")]
    pub photos_per_page: u8,
    #[serde(default = "default_quality")]
    pub quality: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for PdfExportOptions {
    fn default() -> Self {
        Self {
            photos_per_page: default_photos_per_page(),
            quality: default_quality(),
            language: default_language(),
        }
    }
}

impl PdfExportOptions {
    pub fn validate(&self) -> Result<(), String> {
        if ![4, 6, 8].contains(&self.photos_per_page) {
            return Err("photos_per_page must be 4, 6 or 8".into());
        }
        if !["standard", "high"].contains(&self.quality.as_str()) {
            return Err("quality must be standard or high".into());
        }
        validate_language(&self.language)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcelExportOptions {
    #[serde(rename = "type", default = "default_excel_type")]
    pub export_type: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for ExcelExportOptions {
    fn default() -> Self {
        Self {
            export_type: default_excel_type(),
            language: default_language(),
        }
    }
}

impl ExcelExportOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !["external", "internal"].contains(&self.export_type.as_str()) {
            return Err("type must be external or internal".into());
        }
        validate_language(&self.language)
    }

    pub fn is_internal(&self) -> bool {
        self.export_type == "internal"
    }
}

fn validate_language(language: &str) -> Result<(), String> {
    if ["tr", "en"].contains(&language) {
        Ok(())
    } else {
        Err("language must be tr or en".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PdfExportOptions::default().validate().is_ok());
        assert!(ExcelExportOptions::default().validate().is_ok());
    }

    #[test]
    fn photos_per_page_is_restricted_to_the_ladder() {
        let opts = PdfExportOptions {
            photos_per_page: 5,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let opts = PdfExportOptions {
            language: "de".into(),
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn excel_type_deserializes_from_type_key() {
        let opts: ExcelExportOptions =
            serde_json::from_str(r#"{"type": "internal", "language": "en"}"#).unwrap();
        assert!(opts.is_internal());
        assert_eq!(opts.language, "en");
    }

    #[test]
    fn empty_bodies_take_defaults() {
        let opts: PdfExportOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.photos_per_page, 6);
        assert_eq!(opts.quality, "standard");
        assert_eq!(opts.language, "tr");
    }
}
