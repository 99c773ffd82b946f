use dioxus::prelude::*;

use crate::ui::state::pagination::{build_page_items, PageItem};

const BUTTON: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer; min-width: 34px;";
const CURRENT: &str = "border: 1px solid #1565c0; background: #1565c0; color: #fff; padding: 4px 10px; border-radius: 6px; min-width: 34px;";
const DISABLED: &str = "border: 1px solid #ddd; background: #f5f5f5; color: #aaa; padding: 4px 10px; border-radius: 6px; min-width: 34px;";

#[component]
pub fn PaginationBar(
    total_pages: i64,
    current: i64,
    window: i64,
    on_page: EventHandler<i64>,
) -> Element {
    let items = build_page_items(total_pages, current, window);
    if items.is_empty() {
        return rsx! {};
    }

    rsx! {
        nav {
            style: "display: flex; gap: 6px; align-items: center; justify-content: center; margin: 12px 0;",
            {items.into_iter().map(|item| {
                let target = item.target();
                let (label, style) = match item {
                    PageItem::Previous(_) => ("‹ Prev".to_string(), if target.is_some() { BUTTON } else { DISABLED }),
                    PageItem::Next(_) => ("Next ›".to_string(), if target.is_some() { BUTTON } else { DISABLED }),
                    PageItem::Page { number, current: true } => (number.to_string(), CURRENT),
                    PageItem::Page { number, .. } => (number.to_string(), BUTTON),
                    PageItem::Ellipsis => ("…".to_string(), ""),
                };
                if item == PageItem::Ellipsis {
                    return rsx!( span { style: "padding: 0 4px; color: #777;", "{label}" } );
                }
                rsx!(
                    button {
                        style: "{style}",
                        disabled: target.is_none(),
                        onclick: move |_| {
                            if let Some(page) = target {
                                on_page.call(page);
                            }
                        },
                        "{label}"
                    }
                )
            })}
        }
    }
}
