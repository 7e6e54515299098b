//! A4 label sheet assembly with `printpdf`.
//!
//! # Design
//! - Sheets are drawn directly: cell borders as stroked rectangles, text
//!   via the built-in Helvetica faces, barcodes as embedded PNGs. There is
//!   no intermediate raster of the whole page.
//! - Geometry comes from [`crate::core::labels`], which measures from the
//!   top-left corner; this module flips to the PDF's bottom-left origin at
//!   draw time.
//! - Pages are appended strictly in batch order. A missing or undecodable
//!   barcode leaves its cell without an image; it never fails the export.

use std::collections::HashMap;
use std::io::Cursor;

use anyhow::{Context, ensure};
use printpdf::image_crate::codecs::png::PngDecoder;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};

use crate::core::labels::{
    CellRect, LabelItem, PAGE_HEIGHT_MM, PAGE_WIDTH_MM, cdu_cell, info_cell, page_slots, slot_of,
};

/// File name the exported document is offered under.
pub const DOCUMENT_NAME: &str = "etiquetas.pdf";

/// Title written into the PDF metadata.
const DOCUMENT_TITLE: &str = "Etiquetes d'exemplars";

/// Resolution the barcode service renders at.
const BARCODE_DPI: f64 = 300.0;

/// Stroke width of the cell borders.
const BORDER_MM: f64 = 0.3;

/// Horizontal text and image inset inside a cell.
const INSET_MM: f64 = 3.0;

/// Assemble the label sheets into a single PDF.
///
/// `pages` come from [`crate::core::labels::pages`]; `barcodes` maps
/// registry codes to PNG bytes already fetched from the barcode service.
///
/// # Errors
///
/// Fails when there is nothing to print or when the PDF writer itself
/// rejects the document. Barcode problems are not errors.
pub fn build_document(
    pages: &[&[LabelItem]],
    barcodes: &HashMap<String, Vec<u8>>,
) -> anyhow::Result<Vec<u8>> {
    ensure!(!pages.is_empty(), "no labels to print");

    let (doc, first_page, first_layer) = PdfDocument::new(
        DOCUMENT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Etiquetes",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|err| anyhow::anyhow!("register font: {err}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|err| anyhow::anyhow!("register font: {err}"))?;

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Etiquetes");
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_sheet(&layer, page, barcodes, &font, &bold);
    }

    doc.save_to_bytes()
        .map_err(|err| anyhow::anyhow!("serialize document: {err}"))
        .context(DOCUMENT_NAME)
}

fn draw_sheet(
    layer: &PdfLayerReference,
    page: &[LabelItem],
    barcodes: &HashMap<String, Vec<u8>>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(BORDER_MM);

    for (index, slot) in page_slots(page).into_iter().enumerate() {
        let (row, column) = slot_of(index);
        let info = info_cell(row, column);
        let cdu = cdu_cell(row, column);
        // Borders are drawn for empty slots too, keeping the grid shape.
        layer.add_shape(cell_border(&info));
        layer.add_shape(cell_border(&cdu));

        if let Some(item) = slot {
            draw_label(layer, item, &info, &cdu, barcodes, font, bold);
        }
    }
}

fn draw_label(
    layer: &PdfLayerReference,
    item: &LabelItem,
    info: &CellRect,
    cdu: &CellRect,
    barcodes: &HashMap<String, Vec<u8>>,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.use_text(
        item.centre.clone(),
        6.0,
        Mm(info.x + INSET_MM),
        baseline(info.y + 3.4),
        font,
    );
    layer.use_text(
        item.registre.clone(),
        7.0,
        Mm(info.x + INSET_MM),
        baseline(info.y + info.height - 2.0),
        bold,
    );
    layer.use_text(
        format!("CDU: {}", item.cdu),
        8.0,
        Mm(cdu.x + INSET_MM),
        baseline(cdu.y + cdu.height / 2.0 + 1.0),
        font,
    );

    if let Some(bytes) = barcodes.get(&item.registre) {
        // An undecodable PNG leaves the cell without an image.
        let _ = embed_barcode(layer, bytes, info);
    }
}

fn embed_barcode(
    layer: &PdfLayerReference,
    bytes: &[u8],
    info: &CellRect,
) -> anyhow::Result<()> {
    let decoder = PngDecoder::new(Cursor::new(bytes))
        .map_err(|err| anyhow::anyhow!("decode barcode: {err}"))?;
    let image =
        Image::try_from(decoder).map_err(|err| anyhow::anyhow!("import barcode: {err}"))?;

    let natural_width = px_to_mm(image.image.width.0);
    let natural_height = px_to_mm(image.image.height.0);
    let target_width = info.width - 2.0 * INSET_MM;
    let target_height = info.height - 9.0;
    let scale = (target_width / natural_width)
        .min(target_height / natural_height)
        .min(1.0);

    let x = info.x + INSET_MM + (target_width - natural_width * scale) / 2.0;
    let bottom = info.y + 4.2 + target_height;
    image.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(baseline(bottom)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(BARCODE_DPI),
            ..ImageTransform::default()
        },
    );
    Ok(())
}

fn cell_border(rect: &CellRect) -> Line {
    let top = rect.y;
    let bottom = rect.y + rect.height;
    Line {
        points: vec![
            (Point::new(Mm(rect.x), baseline(top)), false),
            (Point::new(Mm(rect.x + rect.width), baseline(top)), false),
            (Point::new(Mm(rect.x + rect.width), baseline(bottom)), false),
            (Point::new(Mm(rect.x), baseline(bottom)), false),
        ],
        is_closed: true,
        has_fill: false,
        has_stroke: true,
        is_clipping_path: false,
    }
}

/// Convert a top-origin offset to the PDF's bottom-origin coordinate.
fn baseline(from_top: f64) -> Mm {
    Mm(PAGE_HEIGHT_MM - from_top)
}

fn px_to_mm(px: usize) -> f64 {
    px as f64 * 25.4 / BARCODE_DPI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::{CDU_PLACEHOLDER, pages};
    use printpdf::image_crate::codecs::png::PngEncoder;
    use printpdf::image_crate::{ColorType, ImageEncoder};

    fn item(n: usize) -> LabelItem {
        LabelItem {
            registre: format!("REG-0001-{n:04}"),
            centre: "Institut Escola".to_string(),
            cdu: if n % 5 == 0 {
                CDU_PLACEHOLDER.to_string()
            } else {
                "821.134.1".to_string()
            },
        }
    }

    fn tiny_png() -> Vec<u8> {
        let mut png = Vec::new();
        PngEncoder::new(&mut png)
            .write_image(&[255], 1, 1, ColorType::L8)
            .expect("encode png");
        png
    }

    #[test]
    fn thirty_five_labels_produce_a_two_sheet_document() {
        let items: Vec<LabelItem> = (0..35).map(item).collect();
        let sheets = pages(&items);
        assert_eq!(sheets.len(), 2);

        let bytes = build_document(&sheets, &HashMap::new()).expect("document");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn barcodes_are_embedded_when_present() {
        let items: Vec<LabelItem> = (0..3).map(item).collect();
        let sheets = pages(&items);
        let mut barcodes = HashMap::new();
        barcodes.insert("REG-0001-0001".to_string(), tiny_png());

        let with_barcode = build_document(&sheets, &barcodes).expect("document");
        let without = build_document(&sheets, &HashMap::new()).expect("document");
        assert!(with_barcode.starts_with(b"%PDF"));
        assert!(with_barcode.len() > without.len());
    }

    #[test]
    fn a_broken_barcode_does_not_fail_the_export() {
        let items: Vec<LabelItem> = (0..2).map(item).collect();
        let sheets = pages(&items);
        let mut barcodes = HashMap::new();
        barcodes.insert("REG-0001-0000".to_string(), b"not a png".to_vec());

        let bytes = build_document(&sheets, &barcodes).expect("document");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn an_empty_batch_is_refused() {
        assert!(build_document(&[], &HashMap::new()).is_err());
    }
}
