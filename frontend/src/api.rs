use gloo_file::File as GlooFile;
use gloo_net::http::{Request, Response};
use shared::{ClassifyResponse, ErrorResponse, HealthResponse};

pub async fn classify_image(file: &GlooFile) -> Result<ClassifyResponse, String> {
    let form_data =
        web_sys::FormData::new().map_err(|_| "Failed to build upload form.".to_string())?;
    form_data
        .append_with_blob_and_filename("image", file.as_ref(), &file.name())
        .map_err(|_| "Failed to attach the image.".to_string())?;

    let request = Request::post("/api/classify")
        .body(form_data)
        .map_err(|e| format!("Failed to build request: {}", e))?;

    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        response
            .json::<ClassifyResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(server_error(response).await)
    }
}

pub async fn fetch_health() -> Result<HealthResponse, String> {
    let response = Request::get("/api/health")
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if response.ok() {
        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| format!("Failed to parse response: {}", e))
    } else {
        Err(server_error(response).await)
    }
}

async fn server_error(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(err) => err.error,
        Err(_) => format!("Server error: {} - {}", status, body),
    }
}
