//! Error types of the backend client.

use lex_model::ModelError;
use lex_ui::{Alert, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Non-2xx answer to a JSON request.
    #[error("HTTP {status} - {body}")]
    Http { status: u16, body: String },

    /// Non-2xx answer to a file download.
    #[error("Error descargando archivo ({status})")]
    Download { status: u16 },

    /// The request never got an answer.
    #[error("network error: {0}")]
    Network(String),

    /// The answer was not the JSON we expected.
    #[error("invalid response: {0}")]
    Decode(String),

    /// The backend answered `success: false`.
    #[error("{}", .message.as_deref().unwrap_or("la solicitud fue rechazada"))]
    Rejected { message: Option<String> },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("credenciales incorrectas")]
    InvalidCredentials,

    #[error("no hay una sesión activa")]
    NotAuthenticated,

    #[error("I/O error: {0}")]
    Io(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Message shown to the user in the error alert.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { .. } | Self::Network(_) | Self::Decode(_) => {
                "Error de comunicación con el servidor".to_string()
            }
            Self::Download { .. } => self.to_string(),
            Self::Rejected { message } => message
                .clone()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "No fue posible completar la operación".to_string()),
            Self::Config(_) => "API_URL no está definida".to_string(),
            Self::InvalidCredentials => "Credenciales incorrectas, intentelo nuevamente".to_string(),
            Self::NotAuthenticated => "Debe iniciar sesión para continuar".to_string(),
            Self::Io(err) => format!("No fue posible guardar el archivo: {err}"),
            Self::Validation(err) => err.alert().text,
        }
    }

    /// Blocking alert describing this error.
    pub fn alert(&self) -> Alert {
        match self {
            Self::Validation(err) => err.alert(),
            Self::InvalidCredentials => Alert::credenciales_incorrectas(),
            Self::Http { .. } | Self::Network(_) | Self::Decode(_) => Alert::error_comunicacion(),
            _ => Alert::error("Error", self.user_message()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<ModelError> for ClientError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Rejected { message } => Self::Rejected { message },
            other => Self::Decode(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_errors_read_like_the_backend() {
        let err = ClientError::Http {
            status: 500,
            body: "boom".into(),
        };
        assert_eq!(err.to_string(), "HTTP 500 - boom");
        assert_eq!(err.alert(), Alert::error_comunicacion());
        assert_eq!(
            ClientError::Download { status: 404 }.user_message(),
            "Error descargando archivo (404)"
        );
    }

    #[test]
    fn rejection_shows_backend_message() {
        let err = ClientError::from(ModelError::Rejected {
            message: Some("Proceso no encontrado".into()),
        });
        assert_eq!(err.user_message(), "Proceso no encontrado");
        let err = ClientError::Rejected { message: None };
        assert_eq!(err.user_message(), "No fue posible completar la operación");
    }

    #[test]
    fn validation_becomes_warning() {
        let err = ClientError::from(ValidationError::Missing {
            missing: vec!["observacion".into()],
        });
        assert_eq!(err.alert(), Alert::formulario_incompleto());
    }
}
