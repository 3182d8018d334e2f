//! Blocking alert messages shown to the user.
//!
//! Every alert has a single confirm button and cannot be dismissed by
//! clicking outside of it.

use std::fmt;

use serde::Serialize;

/// Dialog background.
pub const BACKGROUND: &str = "#17324B";
/// Dialog text.
pub const TEXT_COLOR: &str = "#E5E7EB";
/// Confirm button.
pub const CONFIRM_COLOR: &str = "#E3C15A";
pub const CONFIRM_TEXT: &str = "Aceptar";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Success,
    Error,
    Warning,
    Info,
}

impl AlertKind {
    /// Icon colour.
    pub fn color(self) -> &'static str {
        match self {
            Self::Success => "#22C55E",
            Self::Error => "#EF4444",
            Self::Warning => "#F59E0B",
            Self::Info => "#38BDF8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub text: String,
}

impl Alert {
    pub fn new(kind: AlertKind, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(AlertKind::Success, "Éxito", text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(AlertKind::Error, title, text)
    }

    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(AlertKind::Warning, title, text)
    }

    pub fn info(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(AlertKind::Info, title, text)
    }

    pub fn credenciales_incorrectas() -> Self {
        Self::error("Lo sentimos", "Credenciales incorrectas, intentelo nuevamente")
    }

    pub fn formulario_incompleto() -> Self {
        Self::warning(
            "Formulario incompleto",
            "Por favor diligencie todos los campos obligatorios.",
        )
    }

    pub fn error_comunicacion() -> Self {
        Self::error("Error", "Error de comunicación con el servidor")
    }

    /// Failed field update, with the backend message when there is one.
    pub fn actualizacion_fallida(message: Option<&str>) -> Self {
        Self::error(
            "Error",
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or("No fue posible actualizar el dato"),
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind == AlertKind::Error
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_messages() {
        let alert = Alert::credenciales_incorrectas();
        assert!(alert.is_error());
        assert_eq!(
            alert.to_string(),
            "Lo sentimos: Credenciales incorrectas, intentelo nuevamente"
        );
        assert_eq!(Alert::formulario_incompleto().kind, AlertKind::Warning);
        assert_eq!(Alert::success("Guardado").title, "Éxito");
    }

    #[test]
    fn update_failure_falls_back() {
        assert_eq!(
            Alert::actualizacion_fallida(None).text,
            "No fue posible actualizar el dato"
        );
        assert_eq!(Alert::actualizacion_fallida(Some("  ")).text, "No fue posible actualizar el dato");
        assert_eq!(Alert::actualizacion_fallida(Some("Campo bloqueado")).text, "Campo bloqueado");
    }
}
