use shared::ErrorKind;

/// Failures of a single classification. Cloneable because a failed model
/// load is memoized and handed to every later caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassifierError {
    #[error("Model file not found at {0}")]
    ModelNotFound(String),
    #[error("Error loading model: {0}")]
    ModelLoad(String),
    #[error("Could not decode image: {0}")]
    Decode(String),
    #[error("Error during prediction: {0}")]
    Inference(String),
}

impl ClassifierError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassifierError::ModelNotFound(_) => ErrorKind::ModelNotFound,
            ClassifierError::ModelLoad(_) => ErrorKind::ModelLoad,
            ClassifierError::Decode(_) => ErrorKind::Decode,
            ClassifierError::Inference(_) => ErrorKind::Inference,
        }
    }
}

impl From<tch::TchError> for ClassifierError {
    fn from(err: tch::TchError) -> Self {
        ClassifierError::Inference(err.to_string())
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(err: image::ImageError) -> Self {
        ClassifierError::Decode(err.to_string())
    }
}
