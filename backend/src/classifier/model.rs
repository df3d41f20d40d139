use ndarray::Array4;
use std::path::Path;
use std::sync::Mutex;
use tch::{CModule, Device, Kind, Tensor};

use super::error::ClassifierError;
use crate::config::{DevicePreference, TensorLayout};

/// A pretrained binary classifier: one normalized image batch in, one
/// probability out.
pub trait ScoreModel: Send + Sync {
    fn score(&self, input: &Array4<f32>) -> Result<f32, ClassifierError>;
}

pub fn resolve_device(preference: DevicePreference) -> Device {
    match preference {
        DevicePreference::Auto => Device::cuda_if_available(),
        DevicePreference::Cpu => Device::Cpu,
        DevicePreference::Cuda => Device::Cuda(0),
    }
}

/// TorchScript export of the cat/dog network.
pub struct TorchModel {
    module: Mutex<CModule>,
    device: Device,
    layout: TensorLayout,
}

impl TorchModel {
    pub fn load(path: &Path, device: Device, layout: TensorLayout) -> Result<Self, ClassifierError> {
        let mut module = CModule::load_on_device(path, device)
            .map_err(|e| ClassifierError::ModelLoad(e.to_string()))?;
        // No optimizer or gradient state is ever needed.
        module.set_eval();
        Ok(Self {
            module: Mutex::new(module),
            device,
            layout,
        })
    }

    fn to_tensor(&self, input: &Array4<f32>) -> Result<Tensor, ClassifierError> {
        let shape: Vec<i64> = input.shape().iter().map(|&d| d as i64).collect();
        let data = input.as_slice().ok_or_else(|| {
            ClassifierError::Inference("input batch is not contiguous".to_string())
        })?;
        let tensor = Tensor::from_slice(data)
            .view(shape.as_slice())
            .to_device(self.device);

        Ok(match self.layout {
            TensorLayout::Nhwc => tensor,
            TensorLayout::Nchw => tensor.permute([0, 3, 1, 2]).contiguous(),
        })
    }
}

impl ScoreModel for TorchModel {
    fn score(&self, input: &Array4<f32>) -> Result<f32, ClassifierError> {
        let tensor = self.to_tensor(input)?;
        let module = self
            .module
            .lock()
            .map_err(|_| ClassifierError::Inference("model lock poisoned".to_string()))?;

        let output = tch::no_grad(|| module.forward_ts(&[tensor]))?;
        let output_flat = output
            .to_kind(Kind::Float)
            .reshape([-1])
            .to_device(Device::Cpu);
        let values = Vec::<f32>::try_from(&output_flat)?;
        single_output(&values)
    }
}

/// The network ends in a single sigmoid unit; anything else means the
/// wrong model file was configured.
pub fn single_output(values: &[f32]) -> Result<f32, ClassifierError> {
    match values {
        [score] => Ok(*score),
        _ => Err(ClassifierError::Inference(format!(
            "expected a single output value, got {}",
            values.len()
        ))),
    }
}
