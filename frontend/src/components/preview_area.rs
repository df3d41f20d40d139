use super::super::{Model, Msg, SelectedFile};
use super::utils::{debounce, format_with_commas};
use yew::prelude::*;

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let Some(selected) = &model.selected else {
        return html! {};
    };
    let link = ctx.link().clone();

    html! {
        <div id="preview-container">
            <div class="columns">
                <div>
                    <img id="actual-image-preview"
                        src={selected.preview_url.to_string()}
                        alt="Uploaded Image" />
                    <p class="caption">{"Uploaded Image"}</p>
                </div>
                { render_image_details(selected) }
            </div>
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Classify)
                    })}
                    disabled={model.loading || model.model_failed()}
                >
                    { render_classify_button_content(model) }
                </button>
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--clear-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ClearFile)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
            </div>
        </div>
    }
}

fn render_image_details(selected: &SelectedFile) -> Html {
    let file = &selected.file;
    html! {
        <div class="image-details">
            <p><strong>{"Image Details:"}</strong></p>
            <p>{ format!("Name: {}", file.name()) }</p>
            <p>{ format!("Size: {} bytes", format_with_commas(file.size())) }</p>
            <p>{ format!("Type: {}", file.raw_mime_type()) }</p>
        </div>
    }
}

fn render_classify_button_content(model: &Model) -> Html {
    if model.loading {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else {
        html! { <><i class="fa-solid fa-magnifying-glass"></i>{" Classify Image"}</> }
    }
}
