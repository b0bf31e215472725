use anyhow::{anyhow, Result};
use image::{imageops::FilterType, RgbImage};
use ndarray::{Array4, ArrayViewD, Axis, IxDyn};
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::Session;
use ort::value::Value;
use std::fs;
use tracing::debug;

use crate::application::ports::DefectModelPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::postprocess::RawCandidate;

/// Modelo de defectos exportado a ONNX. Salida esperada `[1, N, 5 + clases]`.
pub struct OnnxDefectEngine {
    session: Session,
    name: String,
    input_size: u32,
}

impl OnnxDefectEngine {
    pub fn load(name: &str, path: &str, input_size: u32) -> Result<Self> {
        let mut builder = Session::builder()?.with_intra_threads(4)?;

        // CUDA es opcional: si está disponible se registra, si no continuamos en CPU.
        let cuda = CUDAExecutionProvider::default().build();
        if let Ok(builder_with_cuda) = builder.clone().with_execution_providers([cuda]) {
            builder = builder_with_cuda;
        }

        // Con `ort` sin default-features, usamos commit_from_memory.
        let model_bytes = fs::read(path)?;
        let session = builder.commit_from_memory(&model_bytes)?;

        Ok(Self { session, name: name.to_string(), input_size })
    }

    fn run(&mut self, rgb: &RgbImage) -> Result<Vec<RawCandidate>> {
        let imgsz = self.input_size as usize;
        let resized = image::imageops::resize(rgb, imgsz as u32, imgsz as u32, FilterType::Triangle);

        let mut input = Array4::<f32>::zeros((1, 3, imgsz, imgsz));
        for (x, y, pixel) in resized.enumerate_pixels() {
            input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
            input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
            input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
        }

        let input_shape = vec![1, 3, imgsz as i64, imgsz as i64];
        let input_tensor = Value::from_array((input_shape, input.into_raw_vec()))?;

        let outputs = self.session.run(ort::inputs![input_tensor])?;
        let (shape_out, data_out) = outputs[0].try_extract_tensor::<f32>()?;

        let dims: Vec<usize> = shape_out.iter().map(|&x| x as usize).collect();
        if dims.len() != 3 || dims[2] < 6 {
            return Err(anyhow!("forma de salida inesperada: {:?}", dims));
        }
        let array_view = ArrayViewD::from_shape(IxDyn(&dims), data_out)?;
        let view = array_view.index_axis(Axis(0), 0);

        let candidates: Vec<RawCandidate> = view
            .axis_iter(Axis(0))
            .filter_map(|row| RawCandidate::from_row(&row.iter().copied().collect::<Vec<f32>>()))
            .collect();

        debug!("{}: {} candidatos crudos", self.name, candidates.len());
        Ok(candidates)
    }
}

impl DefectModelPort for OnnxDefectEngine {
    fn infer(&mut self, image: &RgbImage) -> DomainResult<Vec<RawCandidate>> {
        self.run(image).map_err(|e| DomainError::OperationFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
