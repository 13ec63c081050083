//! Vault paths and restore options stored by the ETL service.

use common::error::ApiError;
use common::model::config::{ConfiguracaoDetalhe, Configuracoes};
use web_sys::HtmlInputElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::ApiClient;
use crate::app::Page;

#[derive(Properties, PartialEq)]
pub struct SettingsProps {
    pub api: ApiClient,
    pub on_navigate: Callback<Page>,
}

pub enum Field {
    VaultRaiz(String),
    DestinoPadrao(String),
    UsarPaddingHex(bool),
    AdicionarExtensaoFv(bool),
}

pub enum Msg {
    Load,
    Loaded(Result<Configuracoes, ApiError>),
    DetailsLoaded(Result<Vec<ConfiguracaoDetalhe>, ApiError>),
    Edit(Field),
    Save,
    Saved(Result<(), ApiError>),
    Back,
}

enum Banner {
    Success(String),
    Error(String),
}

pub struct Settings {
    form: Configuracoes,
    details: Vec<ConfiguracaoDetalhe>,
    loading: bool,
    saving: bool,
    banner: Option<Banner>,
}

impl Settings {
    fn load(ctx: &Context<Self>) {
        let api = ctx.props().api.clone();
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::Loaded(api.configuracoes().await));
            link.send_message(Msg::DetailsLoaded(api.todas_configuracoes().await));
        });
    }

    fn updated_at(&self, chave: &str) -> Option<Html> {
        let detail = self.details.iter().find(|d| d.chave == chave)?;
        Some(html! {
            <p class="hint">
                if let Some(descricao) = &detail.descricao {
                    { descricao }{" · "}
                }
                { format!("atualizado em {}", detail.atualizado_em.replace('T', " ")) }
            </p>
        })
    }

    fn text_input(
        &self,
        ctx: &Context<Self>,
        label: &str,
        chave: &str,
        value: &Option<String>,
        placeholder: &str,
        field: fn(String) -> Field,
    ) -> Html {
        let on_input = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Edit(field(input.value()))
        });
        html! {
            <div class="form-field">
                <label>{ label.to_string() }</label>
                <input
                    type="text"
                    value={value.clone().unwrap_or_default()}
                    placeholder={placeholder.to_string()}
                    oninput={on_input}
                />
                { self.updated_at(chave).unwrap_or_else(|| html! {}) }
            </div>
        }
    }

    fn toggle(
        &self,
        ctx: &Context<Self>,
        label: &str,
        description: &str,
        chave: &str,
        checked: bool,
        field: fn(bool) -> Field,
    ) -> Html {
        let on_change = ctx.link().callback(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Edit(field(input.checked()))
        });
        html! {
            <label class="toggle-field">
                <input type="checkbox" checked={checked} onchange={on_change} />
                <div>
                    <span class="toggle-label">{ label.to_string() }</span>
                    <p class="hint">{ description.to_string() }</p>
                    { self.updated_at(chave).unwrap_or_else(|| html! {}) }
                </div>
            </label>
        }
    }
}

impl Component for Settings {
    type Message = Msg;
    type Properties = SettingsProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self::load(ctx);
        Self {
            form: Configuracoes::default(),
            details: Vec::new(),
            loading: true,
            saving: false,
            banner: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Load => {
                Self::load(ctx);
                false
            }
            Msg::Loaded(result) => {
                self.loading = false;
                match result {
                    Ok(config) => self.form = config,
                    Err(err) => {
                        gloo_console::error!(format!("falha ao carregar configurações: {}", err));
                        self.banner = Some(Banner::Error(
                            err.user_message("Erro ao carregar configurações"),
                        ));
                    }
                }
                true
            }
            Msg::DetailsLoaded(result) => match result {
                Ok(details) => {
                    self.details = details;
                    true
                }
                Err(err) => {
                    gloo_console::warn!(format!("detalhes de configuração indisponíveis: {}", err));
                    false
                }
            },
            Msg::Edit(field) => {
                match field {
                    Field::VaultRaiz(v) => self.form.vault_raiz = Some(v),
                    Field::DestinoPadrao(v) => self.form.destino_padrao = Some(v),
                    Field::UsarPaddingHex(v) => self.form.usar_padding_hex = v,
                    Field::AdicionarExtensaoFv(v) => self.form.adicionar_extensao_fv = v,
                }
                true
            }
            Msg::Save => {
                if self.saving {
                    return false;
                }
                self.saving = true;
                self.banner = None;

                let updates = self.form.updates();
                let api = ctx.props().api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let mut result = Ok(());
                    for (key, valor) in updates {
                        if let Err(err) = api.atualizar_configuracao(key, valor).await {
                            result = Err(err);
                            break;
                        }
                    }
                    link.send_message(Msg::Saved(result));
                });
                true
            }
            Msg::Saved(result) => {
                self.saving = false;
                self.banner = Some(match result {
                    Ok(()) => {
                        ctx.link().send_message(Msg::Load);
                        Banner::Success("Configurações salvas com sucesso!".to_string())
                    }
                    Err(err) => {
                        gloo_console::error!(format!("falha ao salvar configurações: {}", err));
                        Banner::Error(err.user_message("Erro ao salvar configurações"))
                    }
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
        if self.loading {
            return html! {
                <div class="page-loading">
                    <span class="material-icons-outlined spin">{"refresh"}</span>
                </div>
            };
        }
        let link = ctx.link();
        let banner = match &self.banner {
            Some(Banner::Success(text)) => html! {
                <div class="alert alert-success">
                    <span class="material-icons-outlined">{"check_circle"}</span>{ text }
                </div>
            },
            Some(Banner::Error(text)) => html! {
                <div class="alert alert-error">
                    <span class="material-icons-outlined">{"error"}</span>{ text }
                </div>
            },
            None => html! {},
        };

        html! {
            <div class="settings">
                <nav class="breadcrumbs">
                    <button class="btn-link" onclick={link.callback(|_: MouseEvent| Msg::Back)}>{"Início"}</button>
                    <span class="material-icons-outlined">{"chevron_right"}</span>
                    <span>{"Configurações"}</span>
                </nav>
                <div class="page-header">
                    <div>
                        <h1>{"Configurações"}</h1>
                        <p class="subtitle">
                            {"Configure os caminhos do vault Windchill e opções de restauração de arquivos."}
                        </p>
                    </div>
                </div>

                { banner }

                <section class="card">
                    <h3>{"Configuração do Vault"}</h3>
                    <p class="hint">{"Defina o caminho raiz da pasta de vaults do Windchill."}</p>
                    { self.text_input(ctx, "Caminho Raiz do Vault", "vault_raiz", &self.form.vault_raiz,
                        "E:\\PTC\\Windchill\\vaults\\defaultcachevault", Field::VaultRaiz) }
                    { self.toggle(ctx, "Usar padding hexadecimal",
                        "Completa o nome hexadecimal com zeros à esquerda (14 dígitos).",
                        "usar_padding_hex", self.form.usar_padding_hex, Field::UsarPaddingHex) }
                    { self.toggle(ctx, "Adicionar extensão .fv",
                        "Acrescenta a extensão .fv ao procurar arquivos no vault.",
                        "adicionar_extensao_fv", self.form.adicionar_extensao_fv, Field::AdicionarExtensaoFv) }
                </section>

                <section class="card">
                    <h3>{"Restauração"}</h3>
                    { self.text_input(ctx, "Destino Padrão", "destino_padrao", &self.form.destino_padrao,
                        "C:\\Export", Field::DestinoPadrao) }
                </section>

                <div class="form-actions">
                    <button
                        class="btn btn-primary"
                        disabled={self.saving}
                        onclick={link.callback(|_: MouseEvent| Msg::Save)}
                    >
                        if self.saving {
                            <span class="material-icons-outlined spin">{"refresh"}</span>
                            {"Salvando..."}
                        } else {
                            <span class="material-icons-outlined">{"save"}</span>
                            {"Salvar Configurações"}
                        }
                    </button>
                </div>
            </div>
        }
    }
}
