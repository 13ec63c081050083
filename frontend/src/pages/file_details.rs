//! One vault file: its metadata and a manual restore to a chosen folder.

use common::error::ApiError;
use common::model::arquivo::Arquivo;
use common::model::config::Configuracoes;
use common::model::documento::Documento;
use common::model::restore::{RestoreRequest, RestoreResponse};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Page;
use crate::components::status_badge::StatusBadge;

#[derive(Properties, PartialEq)]
pub struct FileDetailsProps {
    pub api: ApiClient,
    pub id: i64,
    pub on_navigate: Callback<Page>,
}

pub enum Msg {
    Loaded(Result<Arquivo, ApiError>),
    DocumentoLoaded(Result<Documento, ApiError>),
    ConfigLoaded(Result<Configuracoes, ApiError>),
    SetDestino(String),
    Restore,
    Restored(Result<RestoreResponse, ApiError>),
    Back,
}

/// Outcome banner of the last restore.
pub struct RestoreOutcome {
    pub success: bool,
    pub message: String,
}

pub struct FileDetails {
    arquivo: Option<Arquivo>,
    /// Document the file belongs to, when it has one.
    documento: Option<Documento>,
    loading: bool,
    destino: String,
    restoring: bool,
    outcome: Option<RestoreOutcome>,
}

impl FileDetails {
    fn metadata_row(icon: &str, label: &str, value: String, mono: bool) -> Html {
        html! {
            <div class="meta-row">
                <dt>
                    <span class="material-icons-outlined">{ icon.to_string() }</span>
                    { label.to_string() }
                </dt>
                <dd class={classes!(mono.then_some("mono"))}>{ value }</dd>
            </div>
        }
    }

    fn extra(icon: &str, label: &str, value: Option<String>) -> Html {
        match value {
            Some(value) => html! {
                <div class="extra-info">
                    <span class="material-icons-outlined">{ icon.to_string() }</span>
                    <div>
                        <span class="extra-label">{ label.to_string() }</span>
                        <span class="extra-value">{ value }</span>
                    </div>
                </div>
            },
            None => html! {},
        }
    }

    fn restore_section(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let on_input = link.callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::SetDestino(input.value())
        });
        let blank = self.destino.trim().is_empty();

        html! {
            <section class="card restore-section">
                <h2>{"Restauração de Arquivo"}</h2>
                <div class="restore-form">
                    <label>
                        {"Caminho de Destino para Restauração"}
                        <input
                            type="text"
                            value={self.destino.clone()}
                            placeholder="C:\\Export\\SmartPLM\\Restored\\"
                            oninput={on_input}
                        />
                    </label>
                    <p class="hint">{"O arquivo será renomeado para o nome original durante a restauração."}</p>
                    <button
                        class="btn btn-primary"
                        disabled={self.restoring || blank}
                        onclick={link.callback(|_: MouseEvent| Msg::Restore)}
                    >
                        if self.restoring {
                            <span class="material-icons-outlined spin">{"refresh"}</span>
                            {"Restaurando..."}
                        } else {
                            <span class="material-icons-outlined">{"restore_page"}</span>
                            {"Iniciar Restauração"}
                        }
                    </button>
                </div>
                if let Some(outcome) = &self.outcome {
                    <div class={classes!("alert", if outcome.success { "alert-success" } else { "alert-error" })}>
                        <span class="material-icons-outlined">
                            { if outcome.success { "check_circle" } else { "error" } }
                        </span>
                        { &outcome.message }
                    </div>
                }
            </section>
        }
    }
}

impl Component for FileDetails {
    type Message = Msg;
    type Properties = FileDetailsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let id = props.id;

        let api = props.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api.arquivo(id).await));
        });
        let api = props.api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(api.configuracoes().await));
        });

        Self {
            arquivo: None,
            documento: None,
            loading: true,
            destino: String::new(),
            restoring: false,
            outcome: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(arquivo) => {
                        if let Some(documento_id) = arquivo.documento_id {
                            let api = ctx.props().api.clone();
                            let link = ctx.link().clone();
                            spawn_local(async move {
                                link.send_message(Msg::DocumentoLoaded(api.documento(documento_id).await));
                            });
                        }
                        self.arquivo = Some(arquivo);
                    }
                    Err(err) => gloo_console::error!(format!("arquivo {}: {}", ctx.props().id, err)),
                }
                true
            }
            Msg::DocumentoLoaded(result) => match result {
                Ok(documento) => {
                    self.documento = Some(documento);
                    true
                }
                Err(err) => {
                    gloo_console::warn!(format!("documento indisponível: {}", err));
                    false
                }
            },
            Msg::ConfigLoaded(result) => match result {
                // The user may already have typed a destination.
                Ok(config) if self.destino.is_empty() => {
                    self.destino = config.restore_destination();
                    true
                }
                Ok(_) => false,
                Err(err) => {
                    gloo_console::warn!(format!("configurações indisponíveis: {}", err));
                    false
                }
            },
            Msg::SetDestino(value) => {
                self.destino = value;
                true
            }
            Msg::Restore => {
                let Some(arquivo) = &self.arquivo else {
                    return false;
                };
                let destino = self.destino.trim().to_string();
                if destino.is_empty() || self.restoring {
                    return false;
                }
                self.restoring = true;
                self.outcome = None;

                let request = RestoreRequest {
                    arquivo_ids: vec![arquivo.id],
                    destino,
                };
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    link.send_message(Msg::Restored(api.restore(&request).await));
                });
                true
            }
            Msg::Restored(result) => {
                self.restoring = false;
                self.outcome = Some(match result {
                    Ok(response) => RestoreOutcome {
                        success: response.success,
                        message: response.single_file_report(),
                    },
                    Err(err) => RestoreOutcome {
                        success: false,
                        message: err.user_message("Erro ao restaurar arquivo"),
                    },
                });
                true
            }
            Msg::Back => {
                ctx.props().on_navigate.emit(Page::Dashboard);
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let back = ctx.link().callback(|_: MouseEvent| Msg::Back);

        if self.loading {
            return html! {
                <div class="page-loading">
                    <span class="material-icons-outlined spin">{"refresh"}</span>
                </div>
            };
        }
        let Some(arquivo) = &self.arquivo else {
            return html! {
                <div class="not-found">
                    <span class="material-icons-outlined">{"error_outline"}</span>
                    <h2>{"Arquivo não encontrado"}</h2>
                    <button class="btn-link" onclick={back}>{"Voltar ao painel"}</button>
                </div>
            };
        };

        let content_type = arquivo
            .tipo_conteudo
            .clone()
            .or_else(|| arquivo.tipo_doc.clone())
            .unwrap_or_else(|| "-".into());

        html! {
            <div class="file-details">
                <nav class="breadcrumbs">
                    <button class="btn-link" onclick={back}>{"Início"}</button>
                    <span class="material-icons-outlined">{"chevron_right"}</span>
                    <span>{"Detalhes do Arquivo"}</span>
                </nav>

                <div class="page-header">
                    <div>
                        <h1>{"Detalhes do Arquivo"}</h1>
                        <p class="subtitle">
                            {"Visualize metadados técnicos extraídos do Windchill e execute a restauração manual de arquivos para o sistema de arquivos local."}
                        </p>
                    </div>
                </div>

                <section class="card">
                    <h3>{"Metadados do Arquivo"}</h3>
                    <dl class="meta-list">
                        { Self::metadata_row("description", "Nome Original", arquivo.display_name().to_string(), false) }
                        { Self::metadata_row("fingerprint", "Nome Hex (Vault)", arquivo.nome_hex.clone().unwrap_or_else(|| "-".into()), true) }
                        { Self::metadata_row("folder_open", "Caminho Estimado", arquivo.caminho_completo_estimado.clone().unwrap_or_else(|| "-".into()), true) }
                        { Self::metadata_row("data_usage", "Tamanho do Arquivo", arquivo.size_label(), false) }
                        { Self::metadata_row("category", "Tipo de Conteúdo", content_type, false) }
                    </dl>
                </section>

                if let Some(doc) = &self.documento {
                    <section class="card">
                        <h3>{"Documento"}</h3>
                        <dl class="meta-list">
                            { Self::metadata_row("article", "Número", doc.numero_doc.clone(), true) }
                            { Self::metadata_row("title", "Nome", doc.nome_doc.clone(), false) }
                            { Self::metadata_row("history", "Revisão", doc.revision_label(), false) }
                            { Self::metadata_row("person", "Criado por", doc.criado_por.clone().unwrap_or_else(|| "-".into()), false) }
                        </dl>
                        <StatusBadge estado={doc.estado.clone().map(AttrValue::from)} />
                    </section>
                }

                { self.restore_section(ctx) }

                <section class="card">
                    <h4>{"Informações Adicionais"}</h4>
                    { Self::extra("tag", "Sequência Decimal", arquivo.seq_decimal.map(|s| s.to_string())) }
                    { Self::extra("inventory", "Nome Interno App", arquivo.nome_interno_app.clone()) }
                    { Self::extra("folder", "Caminho Raiz Vault", arquivo.caminho_raiz_vault.clone()) }
                </section>
            </div>
        }
    }
}
