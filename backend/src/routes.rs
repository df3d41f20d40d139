use actix_files::Files;
use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures::{StreamExt, TryStreamExt};
use log::{error, warn};

use crate::classifier::Classifier;
use crate::classifier::error::ClassifierError;
use crate::config::UploadConfig;
use crate::error::ApiError;
use crate::upload::UploadedImage;

const IMAGE_FIELD: &str = "image";

pub fn configure_routes(cfg: &mut web::ServiceConfig, frontend_dir: String) {
    configure_api(cfg);
    cfg.service(Files::new("/", frontend_dir).index_file("index.html"));
}

pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/classify").route(web::post().to(handle_classify)))
        .service(web::resource("/api/health").route(web::get().to(health)));
}

async fn handle_classify(
    classifier: web::Data<Classifier>,
    limits: web::Data<UploadConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_upload(&mut payload, limits.max_bytes).await?;

    if !upload.is_accepted_type() {
        warn!(
            "Rejected upload {} with type {}",
            upload.file_name, upload.mime_type
        );
        let declared = if upload.mime_type.is_empty() {
            upload.file_name.clone()
        } else {
            upload.mime_type.clone()
        };
        return Err(ApiError::UnsupportedMediaType(declared));
    }

    let classifier = classifier.into_inner();
    let outcome = web::block(move || classifier.classify_upload(&upload))
        .await
        .map_err(|e| ClassifierError::Inference(format!("inference worker failed: {}", e)))?;

    match outcome {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            error!("Classification failed: {}", e);
            Err(e.into())
        }
    }
}

async fn health(classifier: web::Data<Classifier>) -> HttpResponse {
    HttpResponse::Ok().json(classifier.loader().health())
}

/// Pulls the `image` field out of the form, skipping any other fields.
async fn read_upload(payload: &mut Multipart, max_bytes: usize) -> Result<UploadedImage, ApiError> {
    while let Some(mut field) = payload.try_next().await? {
        if field.name() != Some(IMAGE_FIELD) {
            drain(&mut field).await?;
            continue;
        }

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();
        let mime_type = field
            .content_type()
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_default();

        let mut image_data = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk?;
            if image_data.len() + data.len() > max_bytes {
                return Err(ApiError::PayloadTooLarge(max_bytes));
            }
            image_data.extend_from_slice(&data);
        }

        if image_data.is_empty() {
            return Err(ClassifierError::Decode("uploaded image is empty".to_string()).into());
        }
        return Ok(UploadedImage::new(image_data, file_name, mime_type));
    }

    Err(ApiError::MissingImage)
}

async fn drain(field: &mut Field) -> Result<(), ApiError> {
    while let Some(chunk) = field.next().await {
        chunk?;
    }
    Ok(())
}
