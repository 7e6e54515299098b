//! Query interpretation, filtering, and pagination for the list screens.
//!
//! # Design
//! - A raw input box value is interpreted exactly once, by [`parse_query`],
//!   into a [`SearchMode`]. Views keep the raw text for display and filter
//!   with the parsed mode, so both stay in step.
//! - Pagination is pure arithmetic over `(current, total)`. The window
//!   holds at most [`WINDOW_WIDTH`] numbered pages centred on the current
//!   one, with shortcuts to the first and last page when they fall outside.

/// Shortest input that activates filtering.
pub const MIN_QUERY_LEN: usize = 3;

/// Catalogue cards per page.
pub const BOOKS_PAGE_SIZE: usize = 9;

/// Exemplar rows per page on the search screen.
pub const EXEMPLARS_PAGE_SIZE: usize = 10;

/// Selection rows per page on the cart screen.
pub const CART_PAGE_SIZE: usize = 20;

/// Loan rows per page on the history screen.
pub const LOANS_PAGE_SIZE: usize = 5;

/// Numbered page buttons kept visible at once.
pub const WINDOW_WIDTH: usize = 5;

/// Interpretation of the search box content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchMode {
    /// Too little input; the full list is shown.
    Inactive,
    /// Case-insensitive substring match, needle already lowercased.
    Text(String),
    /// Inclusive registry code range, bounds already uppercased.
    Range {
        /// Lower bound of the registry range.
        start: String,
        /// Upper bound of the registry range.
        end: String,
    },
}

/// Interpret the raw search input.
///
/// Inputs shorter than [`MIN_QUERY_LEN`] after trimming leave the search
/// inactive. Exactly two whitespace-separated tokens that both start with
/// `REG-` (compared case-insensitively) form a registry range; everything
/// else is a substring query.
#[must_use]
pub fn parse_query(raw: &str) -> SearchMode {
    let trimmed = raw.trim();
    if trimmed.chars().count() < MIN_QUERY_LEN {
        return SearchMode::Inactive;
    }
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() == 2
        && tokens
            .iter()
            .all(|token| token.to_uppercase().starts_with("REG-"))
    {
        return SearchMode::Range {
            start: tokens[0].to_uppercase(),
            end: tokens[1].to_uppercase(),
        };
    }
    SearchMode::Text(trimmed.to_lowercase())
}

/// Whether a catalogue entry matches a lowercased needle by title or author.
#[must_use]
pub fn matches_book(title: &str, author: Option<&str>, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
        || author
            .map(|author| author.to_lowercase().contains(needle))
            .unwrap_or(false)
}

/// Whether an exemplar matches a lowercased needle by registry code or title.
#[must_use]
pub fn matches_exemplar(registre: &str, title: &str, needle: &str) -> bool {
    registre.to_lowercase().contains(needle) || title.to_lowercase().contains(needle)
}

/// Whether a registry code falls inside an uppercased inclusive range.
#[must_use]
pub fn registre_in_range(registre: &str, start: &str, end: &str) -> bool {
    let code = registre.to_uppercase();
    code.as_str() >= start && code.as_str() <= end
}

/// Number of pages needed for `len` items.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

/// Items of one 1-based page.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1) * page_size;
    let end = (start + page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Clamp a requested page into `1..=total`.
#[must_use]
pub const fn clamp_page(page: usize, total: usize) -> usize {
    if total == 0 {
        1
    } else if page < 1 {
        1
    } else if page > total {
        total
    } else {
        page
    }
}

/// Numbered buttons and shortcuts the paginator shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageWindow {
    /// Consecutive page numbers rendered as buttons.
    pub pages: Vec<usize>,
    /// Whether a shortcut to page 1 precedes the window.
    pub show_first: bool,
    /// Whether an ellipsis separates page 1 from the window.
    pub leading_gap: bool,
    /// Whether a shortcut to the last page follows the window.
    pub show_last: bool,
    /// Whether an ellipsis separates the window from the last page.
    pub trailing_gap: bool,
}

/// Compute the visible page window around the current page.
#[must_use]
pub fn page_window(current: usize, total: usize) -> PageWindow {
    let start = current.saturating_sub(WINDOW_WIDTH / 2).max(1);
    let end = total.min(start + WINDOW_WIDTH - 1);
    let start = if end.saturating_sub(start) + 1 < WINDOW_WIDTH {
        end.saturating_sub(WINDOW_WIDTH - 1).max(1)
    } else {
        start
    };
    PageWindow {
        pages: (start..=end).collect(),
        show_first: start > 1,
        leading_gap: start > 2,
        show_last: end < total,
        trailing_gap: total > 1 && end < total - 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_input_is_inactive() {
        assert_eq!(parse_query(""), SearchMode::Inactive);
        assert_eq!(parse_query("ab"), SearchMode::Inactive);
        assert_eq!(parse_query("  ab  "), SearchMode::Inactive);
    }

    #[test]
    fn two_registry_tokens_form_an_uppercased_range() {
        assert_eq!(
            parse_query("reg-0001-0001 REG-0001-0005"),
            SearchMode::Range {
                start: "REG-0001-0001".to_string(),
                end: "REG-0001-0005".to_string(),
            }
        );
    }

    #[test]
    fn anything_else_is_a_lowercased_substring_query() {
        assert_eq!(
            parse_query("  Mar i Cel "),
            SearchMode::Text("mar i cel".to_string())
        );
        // A third token breaks the range form.
        assert_eq!(
            parse_query("REG-1 REG-2 REG-3"),
            SearchMode::Text("reg-1 reg-2 reg-3".to_string())
        );
        // A single registry token is still a substring query.
        assert_eq!(
            parse_query("REG-0001"),
            SearchMode::Text("reg-0001".to_string())
        );
    }

    #[test]
    fn range_match_is_inclusive_at_both_bounds() {
        let start = "REG-0001-0001";
        let end = "REG-0001-0005";
        assert!(registre_in_range("REG-0001-0001", start, end));
        assert!(registre_in_range("reg-0001-0003", start, end));
        assert!(registre_in_range("REG-0001-0005", start, end));
        assert!(!registre_in_range("REG-0001-0006", start, end));
        assert!(!registre_in_range("REG-0000-0009", start, end));
    }

    #[test]
    fn book_match_covers_title_and_author() {
        assert!(matches_book("Mar i cel", None, "mar"));
        assert!(matches_book("Tirant", Some("Joanot Martorell"), "joanot"));
        assert!(!matches_book("Tirant", None, "joanot"));
    }

    #[test]
    fn exemplar_match_covers_code_and_title() {
        assert!(matches_exemplar("REG-0001-0002", "Mecanoscrit", "reg-0001"));
        assert!(matches_exemplar("REG-0001-0002", "Mecanoscrit", "mecano"));
        assert!(!matches_exemplar("REG-0001-0002", "Mecanoscrit", "solaris"));
    }

    #[test]
    fn page_arithmetic_counts_partial_pages() {
        assert_eq!(total_pages(0, 9), 0);
        assert_eq!(total_pages(9, 9), 1);
        assert_eq!(total_pages(10, 9), 2);

        let items: Vec<usize> = (0..10).collect();
        assert_eq!(page_slice(&items, 1, 9), &items[0..9]);
        assert_eq!(page_slice(&items, 2, 9), &items[9..10]);
        assert!(page_slice(&items, 3, 9).is_empty());
    }

    #[test]
    fn clamping_keeps_the_page_in_range() {
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(9, 4), 4);
        assert_eq!(clamp_page(3, 4), 3);
        assert_eq!(clamp_page(5, 0), 1);
    }

    #[test]
    fn window_sticks_to_the_left_edge() {
        let window = page_window(1, 10);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.show_first);
        assert!(!window.leading_gap);
        assert!(window.show_last);
        assert!(window.trailing_gap);
    }

    #[test]
    fn window_centres_in_the_middle() {
        let window = page_window(7, 10);
        assert_eq!(window.pages, vec![5, 6, 7, 8, 9]);
        assert!(window.show_first);
        assert!(window.leading_gap);
        assert!(window.show_last);
        assert!(!window.trailing_gap);
    }

    #[test]
    fn window_sticks_to_the_right_edge() {
        let window = page_window(10, 10);
        assert_eq!(window.pages, vec![6, 7, 8, 9, 10]);
        assert!(window.show_first);
        assert!(window.leading_gap);
        assert!(!window.show_last);
        assert!(!window.trailing_gap);
    }

    #[test]
    fn small_totals_need_no_shortcuts() {
        let window = page_window(2, 3);
        assert_eq!(window.pages, vec![1, 2, 3]);
        assert!(!window.show_first);
        assert!(!window.show_last);
        assert!(!window.trailing_gap);
    }
}
