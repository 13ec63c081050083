use common::pagination::{item_bounds, page_range, total_pages, PageItem};
use yew::{classes, html, Callback, Component, Context, Html, MouseEvent, Properties};

use crate::helpers::format_count;

#[derive(Properties, PartialEq)]
pub struct PaginationProps {
    pub current_page: u64,
    pub total_items: u64,
    pub page_size: u64,
    pub on_page_change: Callback<u64>,
    #[prop_or(true)]
    pub show_item_count: bool,
}

/// Page strip under a listing. Renders nothing for an empty listing.
pub struct Pagination;

impl Component for Pagination {
    type Message = ();
    type Properties = PaginationProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Pagination
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        if props.total_items == 0 {
            return html! {};
        }

        let pages = total_pages(props.total_items, props.page_size);
        let current = props.current_page.clamp(1, pages);
        let (first, last) = item_bounds(current, props.total_items, props.page_size);
        let go = |page: u64| {
            let cb = props.on_page_change.clone();
            Callback::from(move |_: MouseEvent| cb.emit(page))
        };

        html! {
            <div class="pagination">
                if props.show_item_count {
                    <span class="pagination-count">
                        { format!(
                            "Mostrando {} a {} de {} itens",
                            format_count(first),
                            format_count(last),
                            format_count(props.total_items)
                        ) }
                    </span>
                }
                <div class="pagination-buttons">
                    <button class="page-btn" disabled={current <= 1} onclick={go(current.saturating_sub(1).max(1))}>
                        <span class="material-icons-outlined">{"chevron_left"}</span>
                    </button>
                    { for page_range(current, props.total_items, props.page_size).into_iter().map(|item| match item {
                        PageItem::Page(n) => html! {
                            <button
                                class={classes!("page-btn", (n == current).then_some("active"))}
                                onclick={go(n)}
                            >
                                { n }
                            </button>
                        },
                        PageItem::More => html! { <span class="page-more">{"…"}</span> },
                    }) }
                    <button class="page-btn" disabled={current >= pages} onclick={go((current + 1).min(pages))}>
                        <span class="material-icons-outlined">{"chevron_right"}</span>
                    </button>
                </div>
            </div>
        }
    }
}
