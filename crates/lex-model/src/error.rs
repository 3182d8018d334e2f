use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// The backend answered `success: false`.
    #[error("{}", message.as_deref().unwrap_or("la solicitud fue rechazada"))]
    Rejected { message: Option<String> },
    /// The backend answered `success: true` without a `data` member.
    #[error("respuesta sin datos")]
    MissingData,
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
