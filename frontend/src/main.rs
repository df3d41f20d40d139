mod api;
mod components;

use components::{handlers, header, preview_area, results, upload_section, utils};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ClassifyResponse, HealthResponse, ModelStatus};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

pub struct SelectedFile {
    pub file: GlooFile,
    pub preview_url: ObjectUrl,
}

pub enum Msg {
    // File operations
    FileSelected(GlooFile),
    ClearFile,

    // Classification
    Classify,
    Classified(u64, ClassifyResponse),
    ClassifyFailed(u64, String),
    HealthChecked(HealthResponse),

    // UI states
    SetError(Option<String>),
    SetDragging(bool),

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

pub struct Model {
    pub selected: Option<SelectedFile>,
    pub result: Option<ClassifyResponse>,
    pub health: Option<HealthResponse>,
    pub loading: bool,
    pub error: Option<String>,
    pub is_dragging: bool,
    pub selection: utils::SelectionTracker,
    paste_listener: Option<EventListener>,
}

impl Model {
    pub fn model_failed(&self) -> bool {
        self.health
            .as_ref()
            .is_some_and(|h| h.status == ModelStatus::Failed)
    }
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let mut model = Self {
            selected: None,
            result: None,
            health: None,
            loading: false,
            error: None,
            is_dragging: false,
            selection: utils::SelectionTracker::default(),
            paste_listener: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        let link = ctx.link().clone();
        spawn_local(async move {
            match api::fetch_health().await {
                Ok(health) => link.send_message(Msg::HealthChecked(health)),
                Err(e) => log::warn!("Health check failed: {}", e),
            }
        });

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::FileSelected(file) => handlers::handle_file_selected(self, file),
            Msg::ClearFile => handlers::handle_clear_file(self),

            Msg::Classify => handlers::handle_classify(self, ctx),
            Msg::Classified(id, response) => handlers::handle_classified(self, id, response),
            Msg::ClassifyFailed(id, error) => handlers::handle_classify_failed(self, id, error),
            Msg::HealthChecked(health) => handlers::handle_health(self, health),

            Msg::SetError(error) => {
                self.error = error;
                self.loading = false;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }

            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { header::render_header() }

                <main class="main-content">
                    { self.render_model_status() }
                    { upload_section::render_upload_section(self, ctx) }
                    { utils::render_error_message(self) }
                    { preview_area::render_preview_area(self, ctx) }
                    { results::render_results(self) }
                </main>

                <footer class="app-footer">
                    <p>{"Cat vs Dog Classifier | Fullstack Rust WASM"}</p>
                </footer>
            </div>
        }
    }
}

impl Model {
    fn render_model_status(&self) -> Html {
        if !self.model_failed() {
            return html! {};
        }
        let detail = self
            .health
            .as_ref()
            .and_then(|h| h.error.clone())
            .unwrap_or_default();
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>
                    <strong>{"Model could not be loaded."}</strong>
                    <br />
                    { detail }
                </p>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
