//! Combined listing of documents and vault files.
//!
//! Only file rows are selectable: restore and integrity verification act on
//! vault files. Clicking a sortable header asks the parent to re-query with
//! that column.

use std::collections::BTreeSet;

use common::model::arquivo::{icon_for_extension, Arquivo};
use common::model::documento::Documento;
use common::requests::SortDir;
use web_sys::HtmlInputElement;
use yew::html::TargetCast;
use yew::{html, AttrValue, Callback, Component, Context, Event, Html, MouseEvent, Properties};

use crate::components::status_badge::StatusBadge;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortConfig {
    pub column: String,
    pub direction: SortDir,
}

#[derive(Properties, PartialEq)]
pub struct ItemsTableProps {
    pub docs: Vec<Documento>,
    pub files: Vec<Arquivo>,
    pub selected: BTreeSet<i64>,
    pub loading: bool,
    #[prop_or_default]
    pub sort: Option<SortConfig>,
    pub on_select_item: Callback<(i64, bool)>,
    pub on_select_all: Callback<bool>,
    pub on_view_item: Callback<i64>,
    pub on_sort: Callback<String>,
}

const COLUMNS: [(&str, &str); 6] = [
    ("nome_hex", "Identificação"),
    ("nome_original", "Nome Original"),
    ("nome_interno_app", "Nome Interno"),
    ("versao", "Versão"),
    ("tipo_doc", "Tipo"),
    ("estado", "Status"),
];

pub struct ItemsTable;

impl ItemsTable {
    fn header(props: &ItemsTableProps, column: &'static str, label: &'static str) -> Html {
        let icon = match &props.sort {
            Some(sort) if sort.column == column => match sort.direction {
                SortDir::Asc => "arrow_upward",
                SortDir::Desc => "arrow_downward",
            },
            _ => "unfold_more",
        };
        let on_sort = props.on_sort.clone();
        html! {
            <th class="sortable" onclick={Callback::from(move |_: MouseEvent| on_sort.emit(column.to_string()))}>
                <div class="th-content">
                    <span>{ label }</span>
                    <span class="material-icons-outlined sort-icon">{ icon }</span>
                </div>
            </th>
        }
    }

    fn doc_row(doc: &Documento) -> Html {
        html! {
            <tr key={format!("doc-{}", doc.id)} class="row-doc">
                <td />
                <td class="mono">{ &doc.numero_doc }</td>
                <td>
                    <div class="name-cell">
                        <span class="material-icons-outlined">{"article"}</span>
                        { &doc.nome_doc }
                    </div>
                </td>
                <td>{"-"}</td>
                <td>{ doc.revision_label() }</td>
                <td>{"Documento"}</td>
                <td><StatusBadge estado={doc.estado.clone().map(AttrValue::from)} /></td>
                <td />
            </tr>
        }
    }

    fn file_row(props: &ItemsTableProps, file: &Arquivo) -> Html {
        let id = file.id;
        let checked = props.selected.contains(&id);
        let on_check = {
            let cb = props.on_select_item.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                cb.emit((id, input.checked()));
            })
        };
        let on_view = {
            let cb = props.on_view_item.clone();
            Callback::from(move |_: MouseEvent| cb.emit(id))
        };
        let ext = file.extension();

        html! {
            <tr key={format!("file-{}", id)} class={if checked { "row-file selected" } else { "row-file" }}>
                <td><input type="checkbox" checked={checked} onchange={on_check} /></td>
                <td class="mono">{ file.nome_hex.clone().unwrap_or_else(|| "-".into()) }</td>
                <td>
                    <div class="name-cell">
                        <span class="material-icons-outlined">{ icon_for_extension(ext.as_deref()) }</span>
                        { file.display_name() }
                    </div>
                </td>
                <td>{ file.nome_interno_app.clone().unwrap_or_else(|| "-".into()) }</td>
                <td>{"-"}</td>
                <td>{ file.tipo_doc.clone().unwrap_or_else(|| "-".into()) }</td>
                <td><StatusBadge /></td>
                <td>
                    <button class="icon-btn" title="Ver detalhes" onclick={on_view}>
                        <span class="material-icons-outlined">{"visibility"}</span>
                    </button>
                </td>
            </tr>
        }
    }
}

impl Component for ItemsTable {
    type Message = ();
    type Properties = ItemsTableProps;

    fn create(_ctx: &Context<Self>) -> Self {
        ItemsTable
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        if props.loading {
            return html! {
                <div class="table-loading">
                    <span class="material-icons-outlined spin">{"refresh"}</span>
                    {"Carregando..."}
                </div>
            };
        }
        if props.docs.is_empty() && props.files.is_empty() {
            return html! { <div class="table-empty">{"Nenhum item encontrado."}</div> };
        }

        let all_selected = !props.files.is_empty()
            && props.files.iter().all(|f| props.selected.contains(&f.id));
        let on_select_all = {
            let cb = props.on_select_all.clone();
            Callback::from(move |e: Event| {
                let input: HtmlInputElement = e.target_unchecked_into();
                cb.emit(input.checked());
            })
        };

        html! {
            <div class="table-wrapper">
                <table class="items-table">
                    <thead>
                        <tr>
                            <th class="col-check">
                                <input
                                    type="checkbox"
                                    checked={all_selected}
                                    disabled={props.files.is_empty()}
                                    onchange={on_select_all}
                                />
                            </th>
                            { for COLUMNS.into_iter().map(|(column, label)| Self::header(props, column, label)) }
                            <th />
                        </tr>
                    </thead>
                    <tbody>
                        { for props.docs.iter().map(Self::doc_row) }
                        { for props.files.iter().map(|f| Self::file_row(props, f)) }
                    </tbody>
                </table>
            </div>
        }
    }
}
