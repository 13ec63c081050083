use yew::{classes, html, Callback, Component, Context, Html, MouseEvent, Properties};

use crate::app::Page;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub current: Page,
    pub dark_mode: bool,
    pub on_navigate: Callback<Page>,
    pub on_toggle_theme: Callback<()>,
}

pub struct Navbar;

impl Navbar {
    fn link(props: &NavbarProps, page: Page, label: &'static str) -> Html {
        // File details are reached from the dashboard, keep it highlighted there.
        let active = match (props.current, page) {
            (Page::FileDetails(_), Page::Dashboard) => true,
            (current, page) => current == page,
        };
        let on_navigate = props.on_navigate.clone();
        html! {
            <a
                class={classes!("nav-link", active.then_some("active"))}
                href="#"
                onclick={Callback::from(move |e: MouseEvent| {
                    e.prevent_default();
                    on_navigate.emit(page);
                })}
            >
                { label }
            </a>
        }
    }
}

impl Component for Navbar {
    type Message = ();
    type Properties = NavbarProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Navbar
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_toggle = {
            let cb = props.on_toggle_theme.clone();
            Callback::from(move |_: MouseEvent| cb.emit(()))
        };

        html! {
            <header class="navbar">
                <div class="brand">
                    <span class="material-icons-outlined brand-icon">{"precision_manufacturing"}</span>
                    <div>
                        <h1>{"SmartPLM Soluções em Engenharia"}</h1>
                        <p>{"ETL de Windchill para Teamcenter"}</p>
                    </div>
                </div>
                <nav class="nav-links">
                    { Self::link(props, Page::Dashboard, "Painel") }
                    { Self::link(props, Page::Logs, "Logs") }
                    { Self::link(props, Page::Settings, "Configurações") }
                    <button class="icon-btn" title="Alternar tema" onclick={on_toggle}>
                        <span class="material-icons-outlined">
                            { if props.dark_mode { "light_mode" } else { "dark_mode" } }
                        </span>
                    </button>
                </nav>
            </header>
        }
    }
}
