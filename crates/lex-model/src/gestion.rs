//! Follow-up records attached to a case: observations, obligations,
//! management history and documents.

use serde::{Deserialize, Serialize};

use crate::de::{lenient_i64, lenient_opt_string, lenient_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observacion {
    #[serde(default, deserialize_with = "lenient_string")]
    pub observacion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub usuario: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha_actualizacion: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observaciones {
    #[serde(default)]
    pub observaciones: Vec<Observacion>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NuevaObservacion<'a> {
    pub id_proceso: &'a str,
    pub observacion: &'a str,
    pub usuario: &'a str,
}

/// A debt instrument ("obligación") linked to a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obligacion {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub obligacion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub capital: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub diasmora: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Obligaciones {
    #[serde(default)]
    pub obligaciones: Vec<Obligacion>,
}

/// Editable fields of an obligation, shared by create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatosObligacion {
    pub obligacion: String,
    pub capital: String,
    pub diasmora: String,
}

impl DatosObligacion {
    /// Trim the obligation number and default missing days in arrears to `"0"`.
    pub fn normalized(&self) -> Self {
        let diasmora = self.diasmora.trim();
        Self {
            obligacion: self.obligacion.trim().to_string(),
            capital: self.capital.trim().to_string(),
            diasmora: if diasmora.is_empty() {
                "0".to_string()
            } else {
                diasmora.to_string()
            },
        }
    }
}

impl From<&Obligacion> for DatosObligacion {
    fn from(value: &Obligacion) -> Self {
        Self {
            obligacion: value.obligacion.clone(),
            capital: value.capital.clone(),
            diasmora: value.diasmora.clone(),
        }
    }
}

/// Body of `/crearObligacion`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearObligacion<'a> {
    pub id_proceso: &'a str,
    #[serde(flatten)]
    pub datos: DatosObligacion,
}

/// Body of `/actualizarObligacion`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarObligacion<'a> {
    pub id: i64,
    pub id_proceso: &'a str,
    #[serde(flatten)]
    pub datos: DatosObligacion,
}

/// Raw row of `/historySub`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricoItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subetapa: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha_seleccion: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub observacion: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub usuario: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fecha_modificacion: Option<String>,
}

/// Management-history entry as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemGestion {
    pub fecha: String,
    pub subetapa: String,
    pub detalle_fecha: Option<String>,
    pub observacion: Option<String>,
    /// User responsible for the next step.
    pub siguiente_gestion: Option<String>,
}

impl From<HistoricoItem> for ItemGestion {
    fn from(item: HistoricoItem) -> Self {
        Self {
            fecha: item.fecha_seleccion,
            subetapa: item.subetapa,
            detalle_fecha: item.fecha_modificacion,
            observacion: item.observacion,
            siguiente_gestion: item.usuario,
        }
    }
}

/// Update trail of one sub-stage (`/historyActSub`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActualizacionSubetapa {
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub observacion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub usuario: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha_gestion: String,
}

/// A document attached to a sub-stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Documento {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub usuario: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha: String,
    /// `false` once the document was deleted.
    #[serde(default)]
    pub estado: bool,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub usuario_elimina: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fecha_elimina: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubetapaRef<'a> {
    pub id_proceso: &'a str,
    pub id_relacion_sub: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_registro_alterna: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentoRef<'a> {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usuario: Option<&'a str>,
}
