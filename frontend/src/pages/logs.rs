use common::error::ApiError;
use common::model::log::{EtlLog, LOG_TYPES};
use common::requests::{LogQuery, PageWindow};
use web_sys::HtmlSelectElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::config::PAGE_SIZE;

#[derive(Properties, PartialEq)]
pub struct LogsDashboardProps {
    pub api: ApiClient,
}

pub enum Msg {
    Load,
    Loaded { seq: u64, result: Result<Vec<EtlLog>, ApiError> },
    SetTipo(Option<String>),
    SetPage(u64),
}

/// Operation history of the ETL service. The endpoint does not report a
/// total, so paging only knows whether the current page came back full.
pub struct LogsDashboard {
    logs: Vec<EtlLog>,
    loading: bool,
    tipo: Option<String>,
    page: u64,
    seq: u64,
}

impl LogsDashboard {
    fn load(&mut self, ctx: &Context<Self>) {
        self.seq += 1;
        self.loading = true;

        let seq = self.seq;
        let query = LogQuery {
            tipo: self.tipo.clone(),
            window: Some(PageWindow::new(self.page, PAGE_SIZE)),
        };
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            let result = api.logs(&query).await;
            link.send_message(Msg::Loaded { seq, result });
        });
    }

    fn row(log: &EtlLog) -> Html {
        let severity = log.severity();
        html! {
            <tr key={log.id}>
                <td class="mono">{ log.timestamp.replace('T', " ") }</td>
                <td class="log-type">{ &log.tipo }</td>
                <td><span class={classes!("severity", severity.css_class())}>{ &log.severity }</span></td>
                <td class="log-details" title={log.detalhes.clone()}>{ &log.detalhes }</td>
                <td class="numeric">
                    { log.registros_afetados.map(|n| n.to_string()).unwrap_or_else(|| "-".into()) }
                </td>
            </tr>
        }
    }
}

impl Component for LogsDashboard {
    type Message = Msg;
    type Properties = LogsDashboardProps;

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_message(Msg::Load);
        Self {
            logs: Vec::new(),
            loading: true,
            tipo: None,
            page: 1,
            seq: 0,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => self.load(ctx),
            Msg::Loaded { seq, result } => {
                if seq != self.seq {
                    return false;
                }
                self.loading = false;
                match result {
                    Ok(logs) => self.logs = logs,
                    Err(err) => {
                        gloo_console::error!(format!("falha ao carregar logs: {}", err));
                        self.logs.clear();
                    }
                }
            }
            Msg::SetTipo(tipo) => {
                self.tipo = tipo;
                self.page = 1;
                self.load(ctx);
            }
            Msg::SetPage(page) => {
                self.page = page.max(1);
                self.load(ctx);
            }
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_tipo = link.callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let value = select.value();
            Msg::SetTipo((!value.is_empty()).then_some(value))
        });
        let page = self.page;
        let has_next = self.logs.len() as u64 >= PAGE_SIZE;

        let body = if self.loading {
            html! { <tr><td colspan="5" class="table-empty">{"Carregando logs..."}</td></tr> }
        } else if self.logs.is_empty() {
            html! { <tr><td colspan="5" class="table-empty">{"Nenhum log encontrado."}</td></tr> }
        } else {
            self.logs.iter().map(Self::row).collect::<Html>()
        };

        html! {
            <div class="logs">
                <div class="page-header">
                    <div>
                        <h2>{"Logs do Sistema"}</h2>
                        <p class="subtitle">{"Histórico de operações, erros e auditoria."}</p>
                    </div>
                    <div class="header-actions">
                        <select onchange={on_tipo}>
                            <option value="" selected={self.tipo.is_none()}>{"Todos os Tipos"}</option>
                            { for LOG_TYPES.into_iter().map(|(value, label)| html! {
                                <option value={value} selected={self.tipo.as_deref() == Some(value)}>{ label }</option>
                            }) }
                        </select>
                        <button class="icon-btn btn-primary" title="Atualizar" onclick={link.callback(|_: MouseEvent| Msg::Load)}>
                            <span class="material-icons-outlined">{"refresh"}</span>
                        </button>
                    </div>
                </div>

                <div class="card table-wrapper">
                    <table class="items-table">
                        <thead>
                            <tr>
                                <th>{"Data/Hora"}</th>
                                <th>{"Tipo"}</th>
                                <th>{"Severidade"}</th>
                                <th>{"Detalhes"}</th>
                                <th class="numeric">{"Registros"}</th>
                            </tr>
                        </thead>
                        <tbody>{ body }</tbody>
                    </table>
                    <div class="pagination">
                        <span class="pagination-count">{ format!("Página {}", page) }</span>
                        <div class="pagination-buttons">
                            <button
                                class="page-btn"
                                disabled={page <= 1 || self.loading}
                                onclick={link.callback(move |_: MouseEvent| Msg::SetPage(page.saturating_sub(1)))}
                            >
                                {"Anterior"}
                            </button>
                            <button
                                class="page-btn"
                                disabled={!has_next || self.loading}
                                onclick={link.callback(move |_: MouseEvent| Msg::SetPage(page + 1))}
                            >
                                {"Próxima"}
                            </button>
                        </div>
                    </div>
                </div>
            </div>
        }
    }
}
