use super::super::{Model, Msg, SelectedFile};
use super::utils::extract_image_files;
use crate::api;
use gloo_file::{File as GlooFile, ObjectUrl};
use shared::{ClassifyResponse, HealthResponse};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

pub fn handle_file_selected(model: &mut Model, file: GlooFile) -> bool {
    let preview_url = ObjectUrl::from(file.clone());
    model.selected = Some(SelectedFile { file, preview_url });
    model.selection.select();
    model.result = None;
    model.error = None;
    model.loading = false;
    true
}

pub fn handle_clear_file(model: &mut Model) -> bool {
    model.selected = None;
    model.selection.clear();
    model.result = None;
    model.error = None;
    model.loading = false;
    true
}

pub fn handle_classify(model: &mut Model, ctx: &Context<Model>) -> bool {
    if model.loading {
        return false;
    }
    if model.model_failed() {
        model.error = Some("Model could not be loaded.".into());
        return true;
    }

    let (Some(file), Some(id)) = (
        model.selected.as_ref().map(|s| s.file.clone()),
        model.selection.current(),
    ) else {
        ctx.link()
            .send_message(Msg::SetError(Some("No image selected for classification.".into())));
        return false;
    };

    model.loading = true;
    model.error = None;
    model.result = None;

    let link = ctx.link().clone();
    spawn_local(async move {
        match api::classify_image(&file).await {
            Ok(response) => link.send_message(Msg::Classified(id, response)),
            Err(e) => link.send_message(Msg::ClassifyFailed(id, e)),
        }
    });

    true
}

pub fn handle_classified(model: &mut Model, id: u64, response: ClassifyResponse) -> bool {
    // The image may have been replaced or cleared while the request was in flight.
    if !model.selection.is_current(id) {
        log::debug!("Dropping result for {}", response.image.file_name);
        return false;
    }
    model.loading = false;
    log::info!(
        "{} classified as {} ({})",
        response.image.file_name,
        response.prediction.label,
        response.prediction.display_confidence()
    );
    model.result = Some(response);
    true
}

pub fn handle_classify_failed(model: &mut Model, id: u64, error: String) -> bool {
    if !model.selection.is_current(id) {
        log::debug!("Dropping error for a previous image: {}", error);
        return false;
    }
    model.loading = false;
    model.error = Some(error);
    true
}

pub fn handle_health(model: &mut Model, health: HealthResponse) -> bool {
    if let Some(error) = &health.error {
        log::error!("Model unavailable: {}", error);
    }
    model.health = Some(health);
    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(_model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            if file_list.length() > 0 {
                event.prevent_default();
                process_file_list(ctx, file_list);
                return true;
            }
        }
    }
    false
}

fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    match extract_image_files(&file_list).into_iter().next() {
        Some(file) => ctx.link().send_message(Msg::FileSelected(file)),
        None => {
            log::warn!("Skipping unsupported upload");
            ctx.link().send_message(Msg::SetError(Some(
                "Please choose a jpg, jpeg or png image.".into(),
            )));
        }
    }
}
