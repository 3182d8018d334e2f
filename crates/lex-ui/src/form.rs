//! Required-field and date checks run before a form is submitted.

use chrono::NaiveDate;
use thiserror::Error;

use crate::alert::Alert;

/// Date format used by every date input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("campos obligatorios vacíos: {}", .missing.join(", "))]
    Missing { missing: Vec<String> },

    #[error("fecha inválida en {field}: {value}")]
    InvalidDate { field: String, value: String },
}

impl ValidationError {
    pub fn alert(&self) -> Alert {
        match self {
            Self::Missing { .. } => Alert::formulario_incompleto(),
            Self::InvalidDate { .. } => Alert::warning("Fecha inválida", self.to_string()),
        }
    }
}

/// Collects named values and reports which required ones are blank.
#[derive(Debug, Default)]
pub struct RequiredFields {
    missing: Vec<String>,
    invalid_date: Option<(String, String)>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// `value` must be non-blank.
    #[must_use]
    pub fn require(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.missing.push(field.to_string());
        }
        self
    }

    /// `value` must be a `YYYY-MM-DD` date.
    #[must_use]
    pub fn require_date(self, field: &str, value: &str) -> Self {
        let mut this = self.require(field, value);
        if !value.trim().is_empty()
            && this.invalid_date.is_none()
            && parse_date(value).is_none()
        {
            this.invalid_date = Some((field.to_string(), value.to_string()));
        }
        this
    }

    pub fn check(self) -> Result<(), ValidationError> {
        if !self.missing.is_empty() {
            return Err(ValidationError::Missing {
                missing: self.missing,
            });
        }
        match self.invalid_date {
            Some((field, value)) => Err(ValidationError::InvalidDate { field, value }),
            None => Ok(()),
        }
    }
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
