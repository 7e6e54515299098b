//! Sheet geometry and batching for spine label printing.
//!
//! # Design
//! - A sheet is a fixed 17 by 2 grid on A4 with narrow print margins. Each
//!   label occupies two side-by-side cells, one for the branch, barcode,
//!   and registry code, one for the classification number.
//! - All coordinates here are millimetres from the top-left corner of the
//!   page, in reading order. The PDF writer converts to its bottom-left
//!   origin at draw time.

use biblio_api_models::Exemplar;

/// A4 page width.
pub const PAGE_WIDTH_MM: f64 = 210.0;

/// A4 page height.
pub const PAGE_HEIGHT_MM: f64 = 297.0;

/// Horizontal print margin on both sides.
pub const MARGIN_X_MM: f64 = 0.8;

/// Vertical print margin on both sides.
pub const MARGIN_Y_MM: f64 = 0.6;

/// Printable width between the horizontal margins.
pub const CONTENT_WIDTH_MM: f64 = PAGE_WIDTH_MM - 2.0 * MARGIN_X_MM;

/// Printable height between the vertical margins.
pub const CONTENT_HEIGHT_MM: f64 = PAGE_HEIGHT_MM - 2.0 * MARGIN_Y_MM;

/// Label rows on one sheet.
pub const ROWS_PER_PAGE: usize = 17;

/// Labels side by side in one row.
pub const LABELS_PER_ROW: usize = 2;

/// Labels one sheet can hold.
pub const PAGE_CAPACITY: usize = ROWS_PER_PAGE * LABELS_PER_ROW;

/// Shown in the classification cell when the lookup failed or was empty.
pub const CDU_PLACEHOLDER: &str = "—";

/// Everything printed on one label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelItem {
    /// Registry code, printed under the barcode and encoded in it.
    pub registre: String,
    /// Name of the branch holding the copy.
    pub centre: String,
    /// Classification number, or [`CDU_PLACEHOLDER`].
    pub cdu: String,
}

impl LabelItem {
    /// Combine an exemplar with its classification lookup result.
    #[must_use]
    pub fn new(exemplar: &Exemplar, cdu: Option<String>) -> Self {
        Self {
            registre: exemplar.registre.clone(),
            centre: exemplar.centre.nom.clone(),
            cdu: cdu
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| CDU_PLACEHOLDER.to_string()),
        }
    }
}

/// Split labels into sheets of [`PAGE_CAPACITY`], preserving order.
///
/// An empty batch yields no sheets at all, so export stays disabled.
#[must_use]
pub fn pages(items: &[LabelItem]) -> Vec<&[LabelItem]> {
    items.chunks(PAGE_CAPACITY).collect()
}

/// Sheet slots in reading order: always [`PAGE_CAPACITY`] entries, with
/// trailing empty slots as `None` so the grid never collapses.
#[must_use]
pub fn page_slots(page: &[LabelItem]) -> Vec<Option<&LabelItem>> {
    (0..PAGE_CAPACITY).map(|index| page.get(index)).collect()
}

/// Grid position of a label by its index on the sheet.
#[must_use]
pub const fn slot_of(index_on_page: usize) -> (usize, usize) {
    (index_on_page / LABELS_PER_ROW, index_on_page % LABELS_PER_ROW)
}

/// Axis-aligned cell in page millimetres, top-left origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Cell width.
    pub width: f64,
    /// Cell height.
    pub height: f64,
}

/// Height of one label row.
#[must_use]
pub const fn row_height_mm() -> f64 {
    CONTENT_HEIGHT_MM / ROWS_PER_PAGE as f64
}

/// Width of one sub-cell; every row holds four of them.
#[must_use]
pub const fn cell_width_mm() -> f64 {
    CONTENT_WIDTH_MM / (2 * LABELS_PER_ROW) as f64
}

fn cell_at(row: usize, sub_column: usize) -> CellRect {
    CellRect {
        x: MARGIN_X_MM + sub_column as f64 * cell_width_mm(),
        y: MARGIN_Y_MM + row as f64 * row_height_mm(),
        width: cell_width_mm(),
        height: row_height_mm(),
    }
}

/// Cell carrying the branch name, barcode, and registry code.
#[must_use]
pub fn info_cell(row: usize, column: usize) -> CellRect {
    cell_at(row, column * 2)
}

/// Cell carrying the classification number.
#[must_use]
pub fn cdu_cell(row: usize, column: usize) -> CellRect {
    cell_at(row, column * 2 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(n: usize) -> LabelItem {
        LabelItem {
            registre: format!("REG-0001-{n:04}"),
            centre: "Institut Escola".to_string(),
            cdu: "821.134.1".to_string(),
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn thirty_five_labels_fill_one_sheet_and_start_a_second() {
        let items: Vec<LabelItem> = (0..35).map(item).collect();
        let sheets = pages(&items);
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].len(), 34);
        assert_eq!(sheets[1].len(), 1);
        // The second sheet keeps 33 of its slots empty.
        assert_eq!(PAGE_CAPACITY - sheets[1].len(), 33);
        assert_eq!(sheets[0][0].registre, "REG-0001-0000");
        assert_eq!(sheets[1][0].registre, "REG-0001-0034");
    }

    #[test]
    fn slots_pad_a_partial_sheet_with_empties() {
        let items: Vec<LabelItem> = (0..35).map(item).collect();
        let sheets = pages(&items);
        let slots = page_slots(sheets[1]);
        assert_eq!(slots.len(), PAGE_CAPACITY);
        assert_eq!(slots.iter().filter(|slot| slot.is_some()).count(), 1);
        assert_eq!(slots.iter().filter(|slot| slot.is_none()).count(), 33);
    }

    #[test]
    fn an_empty_batch_has_no_sheets() {
        assert!(pages(&[]).is_empty());
    }

    #[test]
    fn slots_fill_rows_left_to_right() {
        assert_eq!(slot_of(0), (0, 0));
        assert_eq!(slot_of(1), (0, 1));
        assert_eq!(slot_of(2), (1, 0));
        assert_eq!(slot_of(33), (16, 1));
    }

    #[test]
    fn grid_spans_exactly_the_printable_area() {
        let first = info_cell(0, 0);
        assert!(close(first.x, MARGIN_X_MM));
        assert!(close(first.y, MARGIN_Y_MM));

        let right_cdu = cdu_cell(0, 1);
        assert!(close(
            right_cdu.x + right_cdu.width,
            PAGE_WIDTH_MM - MARGIN_X_MM
        ));

        let last = info_cell(ROWS_PER_PAGE - 1, 0);
        assert!(close(last.y + last.height, PAGE_HEIGHT_MM - MARGIN_Y_MM));
    }

    #[test]
    fn label_cells_sit_side_by_side() {
        let info = info_cell(3, 0);
        let cdu = cdu_cell(3, 0);
        assert!(close(info.x + info.width, cdu.x));
        assert!(close(info.y, cdu.y));
        assert!(close(cell_width_mm() * 4.0, CONTENT_WIDTH_MM));
    }

    #[test]
    fn missing_or_blank_classification_prints_the_placeholder() {
        let exemplar: Exemplar = serde_json::from_str(
            r#"{
                "id": 1,
                "registre": "REG-0001-0001",
                "exclos_prestec": false,
                "baixa": false,
                "cataleg": {"id": 9, "titol": "Mar i cel"},
                "tipus": "Llibre",
                "centre": {"id": 2, "nom": "Institut Escola"}
            }"#,
        )
        .expect("exemplar fixture");
        assert_eq!(LabelItem::new(&exemplar, None).cdu, CDU_PLACEHOLDER);
        assert_eq!(
            LabelItem::new(&exemplar, Some("  ".to_string())).cdu,
            CDU_PLACEHOLDER
        );
        assert_eq!(LabelItem::new(&exemplar, Some("82".to_string())).cdu, "82");
    }
}
