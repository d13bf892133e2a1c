//! PDF writer.
//!
//! A4 portrait, single text column, photo galleries laid out in fixed-height
//! rows. Gallery images are the optimized JPEG variants; a cell whose image
//! cannot be decoded is skipped.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference,
};
use tracing::warn;

use servio_core::gallery::{cells_per_row, CELL_MARGIN_PCT};

use crate::view::{Gallery, ReportView};
use crate::RenderError;

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 15.0;
const CONTENT_W: f32 = PAGE_W - 2.0 * MARGIN;

/// Gallery cell height on the page.
const CELL_H_MM: f32 = 45.0;
const CAPTION_H_MM: f32 = 6.0;

const IMAGE_DPI: f32 = 300.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 10.0;
const CAPTION_SIZE: f32 = 7.0;

/// Characters per body line at 10pt Helvetica on a 180mm column.
const WRAP_COLS: usize = 95;

/// Write the report view as a PDF file, overwriting any previous artifact.
pub fn write_pdf(view: &ReportView, output: &Path) -> Result<(), RenderError> {
    let (doc, page, layer) = PdfDocument::new(&view.title, Mm(PAGE_W), Mm(PAGE_H), "content");
    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_H - MARGIN,
        };

        writer.text_line(&view.title, TITLE_SIZE, &bold);
        if let Some(masthead) = &view.masthead {
            writer.text_line(&masthead.company_name, BODY_SIZE, &bold);
            writer.text_line(&masthead.address, BODY_SIZE, &font);
            let contact = format!("{} · {}", masthead.phone, masthead.email);
            writer.text_line(&contact, BODY_SIZE, &font);
        }
        writer.text_line(&view.metadata_line, BODY_SIZE, &font);
        writer.gap(4.0);

        writer.section("General", &view.general, &bold, &font);
        writer.section("Complaint", &view.complaint, &bold, &font);
        writer.section("Problems", &view.problems, &bold, &font);
        writer.section("Actions", &view.actions, &bold, &font);
        writer.section("Spares", &view.spares_line, &bold, &font);
        writer.section("Result", &view.result_notes, &bold, &font);

        writer.gallery(&view.before, view.cell_width_pct, &bold, &font);
        writer.gallery(&view.after, view.cell_width_pct, &bold, &font);
    }

    let file = File::create(output)?;
    doc.save(&mut BufWriter::new(file))?;
    Ok(())
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageWriter<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "content");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_H - MARGIN;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y - needed < MARGIN {
            self.new_page();
        }
    }

    fn line_height(size: f32) -> f32 {
        size * 0.3528 * 1.4
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn text_line(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        let height = Self::line_height(size);
        self.ensure_space(height);
        self.y -= height;
        self.layer.use_text(text, size, Mm(MARGIN), Mm(self.y), font);
    }

    fn section(
        &mut self,
        title: &str,
        body: &str,
        heading_font: &IndirectFontRef,
        body_font: &IndirectFontRef,
    ) {
        self.gap(2.0);
        self.text_line(title, HEADING_SIZE, heading_font);
        for line in wrap_text(body, WRAP_COLS) {
            self.text_line(&line, BODY_SIZE, body_font);
        }
    }

    fn gallery(
        &mut self,
        gallery: &Gallery,
        cell_width_pct: f32,
        heading_font: &IndirectFontRef,
        body_font: &IndirectFontRef,
    ) {
        self.gap(2.0);
        self.text_line(&gallery.title, HEADING_SIZE, heading_font);

        if gallery.cells.is_empty() {
            self.text_line("No photos", BODY_SIZE, body_font);
            return;
        }

        let cell_w = CONTENT_W * cell_width_pct as f32 / 100.0;
        let slot_w = CONTENT_W * (cell_width_pct + 2.0 * CELL_MARGIN_PCT) as f32 / 100.0;
        let per_row = cells_per_row(cell_width_pct);
        let row_h = CELL_H_MM + CAPTION_H_MM;

        for row in gallery.cells.chunks(per_row) {
            self.ensure_space(row_h);
            let row_top = self.y;
            let mut x = MARGIN;
            for cell in row {
                match load_jpeg(&cell.image_path) {
                    Ok(image) => {
                        let natural_w = cell.width as f32 * 25.4 / IMAGE_DPI;
                        let natural_h = cell.height as f32 * 25.4 / IMAGE_DPI;
                        let scale = f32::min(cell_w / natural_w, CELL_H_MM / natural_h);
                        image.add_to_layer(
                            self.layer.clone(),
                            ImageTransform {
                                translate_x: Some(Mm(x)),
                                translate_y: Some(Mm(row_top - CELL_H_MM)),
                                scale_x: Some(scale),
                                scale_y: Some(scale),
                                dpi: Some(IMAGE_DPI),
                                ..Default::default()
                            },
                        );
                    }
                    Err(err) => {
                        warn!(path = %cell.image_path.display(), error = %err, "gallery image skipped");
                    }
                }
                self.layer.use_text(
                    &cell.caption,
                    CAPTION_SIZE,
                    Mm(x),
                    Mm(row_top - CELL_H_MM - 3.0),
                    body_font,
                );
                x += slot_w;
            }
            self.y = row_top - row_h;
        }
    }
}

fn load_jpeg(path: &Path) -> Result<Image, RenderError> {
    let file = File::open(path)?;
    let decoder = JpegDecoder::new(std::io::BufReader::new(file))?;
    Ok(Image::try_from(decoder)?)
}

/// Greedy word wrap on character count.
fn wrap_text(text: &str, max_cols: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > max_cols {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Masthead;

    fn empty_view() -> ReportView {
        ReportView {
            title: "SERVICE REPORT".into(),
            masthead: Some(Masthead {
                company_name: "Demart".into(),
                address: "Istanbul".into(),
                phone: "+90".into(),
                email: "a@b.c".into(),
            }),
            metadata_line: "Report No: SR-240101-001 | Revision: 1 | Language: tr".into(),
            general: "Customer: c1 | Contact:  | Status: draft".into(),
            complaint: "Leak at stem.".into(),
            problems: String::new(),
            actions: String::new(),
            spares_line: String::new(),
            result_notes: String::new(),
            before: Gallery {
                title: "Before Photos".into(),
                cells: vec![],
            },
            after: Gallery {
                title: "After Photos".into(),
                cells: vec![],
            },
            cell_width_pct: 31.0,
        }
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("short line", 95), vec!["short line"]);
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let lines = wrap_text("aaaa bbbb cccc", 9);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn wrap_of_empty_text_yields_one_blank_line() {
        assert_eq!(wrap_text("", 95), vec![""]);
    }

    #[test]
    fn writes_a_pdf_file() {
        let tmp = std::env::temp_dir().join(format!("servio-pdf-{}.pdf", uuid::Uuid::new_v4()));
        write_pdf(&empty_view(), &tmp).unwrap();
        let bytes = std::fs::read(&tmp).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        std::fs::remove_file(&tmp).unwrap();
    }
}
