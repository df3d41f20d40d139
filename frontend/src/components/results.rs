use super::super::Model;
use shared::Label;
use yew::prelude::*;

pub fn render_results(model: &Model) -> Html {
    let Some(response) = &model.result else {
        return html! {};
    };
    let prediction = &response.prediction;
    let percent = prediction.confidence_percent();

    html! {
        <div class={classes!("results-container", match prediction.label {
            Label::Dog => "dog",
            Label::Cat => "cat",
        })}>
            <div class="success-message">
                <strong>{ format!("Prediction: {}", prediction.display_label()) }</strong>
            </div>
            <div class="info-message">
                <strong>{ format!("Confidence: {}", prediction.display_confidence()) }</strong>
            </div>
            <div class="meter" title={format!("Raw model score: {:.3}", prediction.raw_score)}>
                <div class="meter-fill" style={format!("width: {:.1}%", percent)}></div>
            </div>
        </div>
    }
}
