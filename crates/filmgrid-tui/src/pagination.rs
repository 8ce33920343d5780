//! Pagination control.
//!
//! Computes which page indicators to show for a result set. Large
//! page counts collapse into the first/last `margin` pages plus a
//! `range`-wide window around the current page, with gaps between.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Number of pages shown around the current one.
pub const DEFAULT_PAGE_RANGE: u32 = 5;

/// Number of pages always shown at each end.
pub const DEFAULT_MARGIN: u32 = 1;

/// One indicator in the pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// A clickable page number.
    Page(u32),
    /// Elided pages.
    Gap,
}

/// Returns the indicators for `current` out of `total` pages.
///
/// Empty when `total <= 1`. `current` is clamped into `[1, total]`.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn page_window(current: u32, total: u32, range: u32, margin: u32) -> Vec<PageItem> {
    if total <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let range = range.max(1);

    let start = current
        .saturating_sub(range / 2)
        .clamp(1, total.saturating_sub(range).saturating_add(1).max(1));
    let end = start.saturating_add(range - 1);
    let shown =
        |page: u32| page <= margin || page > total.saturating_sub(margin) || (start..=end).contains(&page);

    let mut items = Vec::new();
    let mut previous: u32 = 0;
    for page in (1..=total).filter(|&p| shown(p)) {
        match page - previous {
            1 => {}
            // A single hidden page is cheaper to show than a gap marker.
            2 => items.push(PageItem::Page(page - 1)),
            _ => items.push(PageItem::Gap),
        }
        items.push(PageItem::Page(page));
        previous = page;
    }
    items
}

/// Returns the page after `current`, if any.
#[must_use]
pub fn next_page(current: u32, total: u32) -> Option<u32> {
    let next = current.checked_add(1)?;
    (next <= total).then_some(next)
}

/// Returns the page before `current`, if any.
#[must_use]
pub fn previous_page(current: u32, total: u32) -> Option<u32> {
    let previous = current.checked_sub(1)?;
    (previous >= 1 && previous <= total).then_some(previous)
}

/// Renders the indicators as a single line with `current` highlighted.
#[must_use]
pub fn pagination_line(items: &[PageItem], current: u32) -> Line<'static> {
    let mut spans = vec![Span::raw("\u{2039} ")];
    for item in items {
        match *item {
            PageItem::Page(page) if page == current => spans.push(Span::styled(
                format!("[{page}]"),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            PageItem::Page(page) => spans.push(Span::raw(format!(" {page} "))),
            PageItem::Gap => spans.push(Span::styled(
                String::from(" \u{2026} "),
                Style::default().fg(Color::DarkGray),
            )),
        }
    }
    spans.push(Span::raw(" \u{203a}"));
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    use PageItem::{Gap, Page};

    fn window(current: u32, total: u32) -> Vec<PageItem> {
        page_window(current, total, DEFAULT_PAGE_RANGE, DEFAULT_MARGIN)
    }

    #[test]
    fn test_hidden_for_single_page() {
        // Arrange & Act & Assert
        assert!(window(1, 0).is_empty());
        assert!(window(1, 1).is_empty());
    }

    #[test]
    fn test_small_totals_show_every_page() {
        // Arrange & Act
        let items = window(1, 3);

        // Assert
        assert_eq!(items, vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_window_at_start() {
        // Arrange & Act
        let items = window(1, 20);

        // Assert
        assert_eq!(
            items,
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(20)]
        );
    }

    #[test]
    fn test_window_in_middle() {
        // Arrange & Act
        let items = window(10, 20);

        // Assert
        assert_eq!(
            items,
            vec![
                Page(1),
                Gap,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Gap,
                Page(20)
            ]
        );
    }

    #[test]
    fn test_window_at_end() {
        // Arrange & Act
        let items = window(20, 20);

        // Assert
        assert_eq!(
            items,
            vec![Page(1), Gap, Page(16), Page(17), Page(18), Page(19), Page(20)]
        );
    }

    #[test]
    fn test_single_hidden_page_is_shown_instead_of_gap() {
        // Arrange & Act
        let items = window(4, 10);

        // Assert
        assert_eq!(
            items,
            vec![
                Page(1),
                Page(2),
                Page(3),
                Page(4),
                Page(5),
                Page(6),
                Gap,
                Page(10)
            ]
        );
    }

    #[test]
    fn test_current_is_clamped() {
        // Arrange & Act
        let items = window(99, 3);

        // Assert
        assert_eq!(items, vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_every_page_in_range() {
        // Arrange & Act & Assert
        for total in 2..40 {
            for current in 1..=total {
                let items = window(current, total);
                assert!(items.contains(&Page(current)));
                assert!(items.contains(&Page(1)));
                assert!(items.contains(&Page(total)));
                assert!(items.iter().all(|item| match item {
                    Page(p) => (1..=total).contains(p),
                    Gap => true,
                }));
            }
        }
    }

    #[test]
    fn test_next_and_previous() {
        // Arrange & Act & Assert
        assert_eq!(next_page(1, 3), Some(2));
        assert_eq!(next_page(3, 3), None);
        assert_eq!(previous_page(2, 3), Some(1));
        assert_eq!(previous_page(1, 3), None);
    }

    #[test]
    fn test_line_highlights_current() {
        // Arrange
        let items = window(2, 3);

        // Act
        let line = pagination_line(&items, 2);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();

        // Assert
        assert!(text.contains("[2]"));
        assert!(text.contains(" 1 "));
        assert!(text.contains(" 3 "));
    }
}
