use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Fichero de modelo o recurso ausente.
    #[error("No encontrado: {0}")]
    NotFound(String),
    /// Medidas, código DOT o parámetros fuera de rango.
    #[error("Entrada inválida: {0}")]
    InvalidInput(String),
    #[error("Error de operación: {0}")]
    OperationFailed(String),
    /// Bytes que no son una imagen reconocible (o base64 corrupto).
    #[error("Imagen ilegible: {0}")]
    Decode(String),
}

pub type DomainResult<T> = Result<T, DomainError>;
