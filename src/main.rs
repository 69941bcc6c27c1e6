// src/main.rs
mod api;
mod components;
mod error;
mod geometry;
mod kiosk_config;
mod overlay;
mod route;
mod session;
mod utils;

use components::auth_panel::AuthPanel;
use components::kiosk::Kiosk;
use gloo_net::http::Request;
use kiosk_config::KioskConfig;
use std::rc::Rc;
use utils::resource_url;
use yew::prelude::*;

pub enum AppMsg {
    ConfigLoaded(KioskConfig),
    ConfigLoadFailed(String),
    ToggleAuth,
}

pub struct App {
    config: Option<Rc<KioskConfig>>,
    error: Option<String>,
    show_auth: bool,
}

impl Component for App {
    type Message = AppMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        ctx.link().send_future(async {
            match load_kiosk_config().await {
                Ok(config) => AppMsg::ConfigLoaded(config),
                Err(e) => AppMsg::ConfigLoadFailed(e),
            }
        });

        Self {
            config: None,
            error: None,
            show_auth: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            AppMsg::ConfigLoaded(config) => {
                log::info!(
                    "Loaded kiosk configuration: {} floors, {} nodes",
                    config.floors.len(),
                    config.nodes.len()
                );
                self.config = Some(Rc::new(config));
                true
            }
            AppMsg::ConfigLoadFailed(error) => {
                log::error!("Failed to load kiosk configuration: {}", error);
                self.error = Some(error);
                true
            }
            AppMsg::ToggleAuth => {
                self.show_auth = !self.show_auth;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let toggle_auth = ctx.link().callback(|_| AppMsg::ToggleAuth);
        let close_auth = ctx.link().callback(|_| AppMsg::ToggleAuth);

        let body = match (&self.config, &self.error) {
            (Some(config), _) if config.floors.is_empty() => html! {
                <div class="error">{"Konfigurasi kiosk tidak memiliki lantai."}</div>
            },
            (Some(config), _) => html! { <Kiosk config={config.clone()} /> },
            (None, Some(error)) => html! {
                <div class="error">{format!("Gagal memuat peta: {}", error)}</div>
            },
            (None, None) => html! { <div class="loading">{"Memuat peta..."}</div> },
        };

        html! {
            <div class="app-container">
                <header class="app-header">
                    <h1>{"Peta Mall"}</h1>
                    <button class="login-toggle" onclick={toggle_auth}>{"Masuk"}</button>
                </header>
                <main class="app-main">{ body }</main>
                { if self.show_auth {
                    html! { <AuthPanel on_close={close_auth} /> }
                } else {
                    html! {}
                } }
            </div>
        }
    }
}

async fn load_kiosk_config() -> Result<KioskConfig, String> {
    let url = resource_url("public/kiosk/config.json");

    let resp = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch {}: {:?}", url, e))?;
    if !resp.ok() {
        return Err(format!("{} returned HTTP {}", url, resp.status()));
    }
    let text = resp
        .text()
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", url, e))?;
    serde_json::from_str(&text).map_err(|e| format!("Invalid kiosk configuration: {}", e))
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
