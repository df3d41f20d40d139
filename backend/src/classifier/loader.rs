use log::{error, info};
use shared::{HealthResponse, ModelStatus};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use super::error::ClassifierError;
use super::model::{ScoreModel, TorchModel, resolve_device};
use crate::config::ModelConfig;

type Opener = dyn Fn(&Path) -> Result<Arc<dyn ScoreModel>, ClassifierError> + Send + Sync;
type LoadOutcome = Result<Arc<dyn ScoreModel>, ClassifierError>;

/// Opens the model file on first use and hands out the same instance for the
/// rest of the process. The outcome is memoized, failures included: a model
/// that could not be loaded stays unavailable until restart.
pub struct ModelLoader {
    path: PathBuf,
    opener: Box<Opener>,
    model: OnceLock<LoadOutcome>,
}

impl ModelLoader {
    pub fn torchscript(config: &ModelConfig) -> Self {
        let device = resolve_device(config.device);
        let layout = config.layout;
        Self::with_opener(&config.path, move |path| {
            let model = TorchModel::load(path, device, layout)?;
            Ok(Arc::new(model) as Arc<dyn ScoreModel>)
        })
    }

    pub fn with_opener<P, F>(path: P, opener: F) -> Self
    where
        P: AsRef<Path>,
        F: Fn(&Path) -> LoadOutcome + Send + Sync + 'static,
    {
        Self {
            path: path.as_ref().to_path_buf(),
            opener: Box::new(opener),
            model: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> LoadOutcome {
        self.model.get_or_init(|| self.open()).clone()
    }

    fn open(&self) -> LoadOutcome {
        if !self.path.exists() {
            let err = ClassifierError::ModelNotFound(self.path.display().to_string());
            error!("{}", err);
            return Err(err);
        }

        info!("Loading model from {}", self.path.display());
        let start = Instant::now();
        match (self.opener)(&self.path) {
            Ok(model) => {
                info!("Model ready after {} ms", start.elapsed().as_millis());
                Ok(model)
            }
            Err(e) => {
                error!("Failed to load model from {}: {}", self.path.display(), e);
                Err(e)
            }
        }
    }

    /// Reports the memoized state without triggering a load.
    pub fn health(&self) -> HealthResponse {
        let (status, error) = match self.model.get() {
            None => (ModelStatus::NotLoaded, None),
            Some(Ok(_)) => (ModelStatus::Ready, None),
            Some(Err(e)) => (ModelStatus::Failed, Some(e.to_string())),
        };
        HealthResponse {
            status,
            model_path: self.path.display().to_string(),
            error,
        }
    }
}
