use web_sys::{HtmlInputElement, HtmlSelectElement, KeyboardEvent};
use yew::prelude::*;

use super::messages::Msg;
use super::state::{Dashboard, Tab};
use crate::components::advanced_filter::AdvancedFilter;
use crate::components::import::ImportModal;
use crate::components::items_table::ItemsTable;
use crate::components::pagination::Pagination;
use crate::components::stats_card::StatsCard;
use crate::config::PAGE_SIZE;

const ESTADOS: [&str; 2] = ["INWORK", "RELEASED"];

pub fn view(dashboard: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    html! {
        <div class="dashboard">
            { header(dashboard, ctx) }
            { stats(dashboard) }
            { toolbar(dashboard, ctx) }
            if dashboard.show_filters {
                <AdvancedFilter
                    applied={dashboard.filters.clone()}
                    on_apply={ctx.link().callback(Msg::ApplyFilters)}
                    on_close={ctx.link().callback(|_| Msg::ToggleFilters)}
                />
            }
            { listing(dashboard, ctx) }
            <ImportModal
                api={dashboard.api.clone()}
                is_open={dashboard.show_import}
                on_close={ctx.link().callback(|_| Msg::CloseImport)}
                on_success={ctx.link().callback(|_| Msg::ImportSucceeded)}
            />
        </div>
    }
}

fn header(dashboard: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    let link = ctx.link();
    let selected = dashboard.cursor.selected().len();

    html! {
        <div class="page-header">
            <div>
                <h2>{"Registro de Documentos"}</h2>
                <p class="subtitle">{"Revise arquivos importados, verifique status e execute restaurações."}</p>
            </div>
            <div class="header-actions">
                if selected > 0 {
                    <button class="btn btn-success" onclick={link.callback(|_: MouseEvent| Msg::Restore)}>
                        <span class="material-icons-outlined">{"restore_page"}</span>
                        { format!("Restaurar Seleção ({})", selected) }
                    </button>
                }
                <button class="btn btn-outline" onclick={link.callback(|_: MouseEvent| Msg::OpenImport)}>
                    <span class="material-icons-outlined">{"file_upload"}</span>
                    {"Importar"}
                </button>
                <button
                    class="btn btn-primary"
                    title="Verificar integridade física dos arquivos no vault"
                    disabled={selected == 0}
                    onclick={link.callback(|_: MouseEvent| Msg::Verify)}
                >
                    <span class="material-icons-outlined">{"sync_problem"}</span>
                    {"Sincronização"}
                </button>
            </div>
        </div>
    }
}

fn stats(dashboard: &Dashboard) -> Html {
    let stats = dashboard.stats.clone().unwrap_or_default();
    html! {
        <div class="stats-grid">
            <StatsCard icon="inventory_2" label="Total Documentos" value={stats.total_documentos} tone="blue" />
            <StatsCard icon="folder_open" label="Total Arquivos" value={stats.total_arquivos} tone="yellow" />
            <StatsCard icon="check_circle" label="Operações ETL" value={stats.total_operacoes} tone="green" />
        </div>
    }
}

fn toolbar(dashboard: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    let link = ctx.link();
    let on_input = link.callback(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::SearchInput(input.value())
    });
    let on_key = link.batch_callback(|e: KeyboardEvent| (e.key() == "Enter").then_some(Msg::SearchSubmit));
    let on_estado = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        let value = select.value();
        Msg::SetEstado((!value.is_empty()).then_some(value))
    });
    let active_filters = dashboard.filters.len();

    html! {
        <div class="toolbar">
            <div class="search-box">
                <input
                    type="text"
                    placeholder="Buscar por Número do Documento..."
                    value={dashboard.search.clone()}
                    oninput={on_input}
                    onkeydown={on_key}
                />
                <button class="search-btn" onclick={link.callback(|_: MouseEvent| Msg::SearchSubmit)}>
                    <span class="material-icons-outlined">{"search"}</span>
                </button>
            </div>
            <select class="status-select" onchange={on_estado}>
                <option value="" selected={dashboard.estado.is_none()}>{"Todos os Status"}</option>
                { for ESTADOS.into_iter().map(|e| html! {
                    <option value={e} selected={dashboard.estado.as_deref() == Some(e)}>{ e }</option>
                }) }
            </select>
            <button
                class={classes!("btn-link", dashboard.show_filters.then_some("active"))}
                onclick={link.callback(|_: MouseEvent| Msg::ToggleFilters)}
            >
                <span class="material-icons-outlined">{"filter_list"}</span>
                { if dashboard.show_filters { "Ocultar Filtros".to_string() } else if active_filters > 0 {
                    format!("Filtros Avançados ({})", active_filters)
                } else {
                    "Filtros Avançados".to_string()
                } }
            </button>
        </div>
    }
}

fn listing(dashboard: &Dashboard, ctx: &Context<Dashboard>) -> Html {
    let link = ctx.link();
    let tab_button = |tab: Tab, label: String| {
        html! {
            <button
                class={classes!("tab", (dashboard.tab == tab).then_some("active"))}
                onclick={link.callback(move |_: MouseEvent| Msg::SetTab(tab))}
            >
                { label }
            </button>
        }
    };

    html! {
        <div class="card listing">
            <div class="tabs">
                { tab_button(Tab::Todos, "Todos".to_string()) }
                { tab_button(Tab::Documentos, format!("Documentos ({})", dashboard.listing.docs.total)) }
                { tab_button(Tab::Arquivos, format!("Arquivos ({})", dashboard.listing.files.total)) }
            </div>
            <ItemsTable
                docs={dashboard.visible_docs()}
                files={dashboard.visible_files()}
                selected={dashboard.cursor.selected().clone()}
                loading={dashboard.loading}
                sort={dashboard.sort.clone()}
                on_select_item={link.callback(|(id, checked): (i64, bool)| Msg::SelectItem(id, checked))}
                on_select_all={link.callback(Msg::SelectAll)}
                on_view_item={link.callback(Msg::ViewItem)}
                on_sort={link.callback(Msg::Sort)}
            />
            <Pagination
                current_page={dashboard.cursor.page()}
                total_items={dashboard.total_items()}
                page_size={PAGE_SIZE}
                on_page_change={link.callback(Msg::SetPage)}
            />
        </div>
    }
}
