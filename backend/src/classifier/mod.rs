pub mod error;
pub mod loader;
pub mod model;
pub mod preprocess;

use log::info;
use shared::{ClassifyResponse, ImageDetails, PredictionResult};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::upload::UploadedImage;
use error::ClassifierError;
use loader::ModelLoader;
use preprocess::PreparedImage;

/// Turns uploaded image bytes into a cat/dog prediction.
#[derive(Clone)]
pub struct Classifier {
    loader: Arc<ModelLoader>,
    input_size: u32,
}

impl Classifier {
    pub fn new(loader: Arc<ModelLoader>, input_size: u32) -> Self {
        Self { loader, input_size }
    }

    pub fn loader(&self) -> &ModelLoader {
        &self.loader
    }

    pub fn classify(&self, image: &[u8]) -> Result<PredictionResult, ClassifierError> {
        let prepared = preprocess::prepare(image, self.input_size)?;
        self.predict(&prepared)
    }

    pub fn classify_upload(
        &self,
        upload: &UploadedImage,
    ) -> Result<ClassifyResponse, ClassifierError> {
        let request_id = Uuid::new_v4();
        let start = Instant::now();

        let prepared = preprocess::prepare(&upload.bytes, self.input_size)?;
        let prediction = self.predict(&prepared)?;

        info!(
            "[{}] {} ({:?}, {} bytes) -> {} {:.1}% in {} ms",
            request_id,
            upload.file_name,
            prepared.format,
            upload.size(),
            prediction.label,
            prediction.confidence_percent(),
            start.elapsed().as_millis()
        );

        Ok(ClassifyResponse {
            request_id: request_id.to_string(),
            prediction,
            image: ImageDetails {
                file_name: upload.file_name.clone(),
                mime_type: upload.mime_type.clone(),
                size_bytes: upload.size() as u64,
                width: prepared.width,
                height: prepared.height,
                sha256: upload.sha256(),
            },
        })
    }

    fn predict(&self, prepared: &PreparedImage) -> Result<PredictionResult, ClassifierError> {
        let model = self.loader.load()?;
        let score = model.score(&prepared.tensor)?;
        if !score.is_finite() || !(0.0..=1.0).contains(&score) {
            return Err(ClassifierError::Inference(format!(
                "model output {} is not a probability",
                score
            )));
        }
        Ok(PredictionResult::from_score(score))
    }
}
