use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Standard backend response wrapper: `{ success, data, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, turning `success: false` into [`ModelError::Rejected`].
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(ModelError::Rejected {
                message: self.message,
            });
        }
        self.data.ok_or(ModelError::MissingData)
    }
}

/// Envelope of endpoints that only report an outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn into_result(self) -> Result<Option<String>> {
        if self.success {
            Ok(self.message)
        } else {
            Err(ModelError::Rejected {
                message: self.message,
            })
        }
    }
}

/// Authenticated user returned by `/auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    pub usuario: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub usuario: Option<Usuario>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}
