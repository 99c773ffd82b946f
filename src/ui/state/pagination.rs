/// Pages shown on each side of the current page.
pub const DEFAULT_PAGE_WINDOW: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    /// Target page, `None` when already on the first page.
    Previous(Option<i64>),
    Page { number: i64, current: bool },
    Ellipsis,
    /// Target page, `None` when already on the last page.
    Next(Option<i64>),
}

impl PageItem {
    /// Page to fetch when clicked. Current page and disabled arrows do nothing.
    pub fn target(&self) -> Option<i64> {
        match *self {
            PageItem::Previous(target) | PageItem::Next(target) => target,
            PageItem::Page { number, current } => (!current).then_some(number),
            PageItem::Ellipsis => None,
        }
    }
}

/// Page numbers to render, `None` standing for an ellipsis.
///
/// Small totals list every page. Larger ones keep the first page, the last
/// page and `window` pages either side of `current`.
pub fn page_numbers(total_pages: i64, current: i64, window: i64) -> Vec<Option<i64>> {
    if total_pages <= 0 {
        return Vec::new();
    }
    let window = window.max(0);
    let current = current.clamp(1, total_pages);
    if total_pages <= 2 * window + 3 {
        return (1..=total_pages).map(Some).collect();
    }

    let low = (current - window).max(1);
    let high = (current + window).min(total_pages);
    let mut shown = vec![1];
    shown.extend(low.max(2)..=high.min(total_pages - 1));
    shown.push(total_pages);

    let mut numbers = Vec::with_capacity(shown.len() + 2);
    let mut previous = 0;
    for number in shown {
        if number - previous > 1 {
            numbers.push(None);
        }
        numbers.push(Some(number));
        previous = number;
    }
    numbers
}

pub fn build_page_items(total_pages: i64, current: i64, window: i64) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let mut items = vec![PageItem::Previous((current > 1).then(|| current - 1))];
    items.extend(
        page_numbers(total_pages, current, window)
            .into_iter()
            .map(|number| match number {
                Some(number) => PageItem::Page {
                    number,
                    current: number == current,
                },
                None => PageItem::Ellipsis,
            }),
    );
    items.push(PageItem::Next((current < total_pages).then(|| current + 1)));
    items
}
