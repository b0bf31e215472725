use crate::application::ports::TreadMeasurementPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::tread::TreadMeasurement;

/// Lecturas de un profundímetro introducidas a mano. Ignora la imagen.
#[derive(Debug, Clone, Copy)]
pub struct ManualTreadGauge {
    inner: f32,
    center: f32,
    outer: f32,
}

impl ManualTreadGauge {
    pub fn new(inner: f32, center: f32, outer: f32) -> Self {
        Self { inner, center, outer }
    }
}

impl TreadMeasurementPort for ManualTreadGauge {
    fn measure(&self, _tread_image: &[u8]) -> DomainResult<TreadMeasurement> {
        let readings = [self.inner, self.center, self.outer];
        if readings.iter().any(|d| !d.is_finite() || *d < 0.0 || *d > 30.0) {
            return Err(DomainError::InvalidInput(format!("lecturas fuera de rango: {:?}", readings)));
        }
        Ok(TreadMeasurement::from_depths(self.inner, self.center, self.outer, 1.0))
    }
}
