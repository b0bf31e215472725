use image::RgbImage;

use crate::domain::{
    age::AgeMeasurement, errors::DomainResult, postprocess::RawCandidate, tread::TreadMeasurement,
};

/// Modelo de detección de defectos. Devuelve las filas crudas del tensor de
/// salida `[1, N, 5 + clases]`; el post-procesado es cosa del dominio.
pub trait DefectModelPort: Send {
    fn infer(&mut self, image: &RgbImage) -> DomainResult<Vec<RawCandidate>>;
    fn name(&self) -> &str;
}

/// Medición de la profundidad del dibujo (SDK local, nube o entrada manual).
pub trait TreadMeasurementPort: Send + Sync {
    fn measure(&self, tread_image: &[u8]) -> DomainResult<TreadMeasurement>;
}

/// Reconocimiento del código DOT en el flanco. Los proveedores que leen la
/// imagen devuelven error si no la hay; el código tecleado no la necesita.
pub trait SidewallRecognitionPort: Send + Sync {
    fn recognize(&self, sidewall_image: Option<&[u8]>) -> DomainResult<AgeMeasurement>;
}
