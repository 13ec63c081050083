use yew::{html, Callback, Component, Context, Html};

use crate::api::ApiClient;
use crate::components::navbar::Navbar;
use crate::helpers::{apply_theme, initial_dark_mode};
use crate::pages::dashboard::Dashboard;
use crate::pages::file_details::FileDetails;
use crate::pages::logs::LogsDashboard;
use crate::pages::settings::Settings;

/// Pages of the console. Navigation is kept in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    FileDetails(i64),
    Logs,
    Settings,
}

pub enum Msg {
    Navigate(Page),
    ToggleTheme,
}

pub struct App {
    page: Page,
    dark_mode: bool,
    api: ApiClient,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let dark_mode = initial_dark_mode();
        apply_theme(dark_mode);
        Self {
            page: Page::Dashboard,
            dark_mode,
            api: ApiClient::default(),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Navigate(page) => {
                if self.page == page {
                    return false;
                }
                self.page = page;
                true
            }
            Msg::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                apply_theme(self.dark_mode);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let navigate: Callback<Page> = ctx.link().callback(Msg::Navigate);
        let page = match self.page {
            Page::Dashboard => html! {
                <Dashboard api={self.api.clone()} on_navigate={navigate.clone()} />
            },
            Page::FileDetails(id) => html! {
                <FileDetails key={id} api={self.api.clone()} id={id} on_navigate={navigate.clone()} />
            },
            Page::Logs => html! { <LogsDashboard api={self.api.clone()} /> },
            Page::Settings => html! {
                <Settings api={self.api.clone()} on_navigate={navigate.clone()} />
            },
        };

        html! {
            <div class="app-root">
                <Navbar
                    current={self.page}
                    dark_mode={self.dark_mode}
                    on_navigate={navigate}
                    on_toggle_theme={ctx.link().callback(|_| Msg::ToggleTheme)}
                />
                <main class="page">{ page }</main>
            </div>
        }
    }
}
