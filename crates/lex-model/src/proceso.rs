//! Case ("proceso") records.

use serde::{Deserialize, Serialize};

use crate::de::lenient_string;
use crate::record::FieldRecord;

/// Sub-stage names that mark a case as returned or terminated.
pub const CLOSED_STATES: [&str; 2] = ["DEVOLUCION", "TERMINACIÓN"];

/// One row of the case list (`/process`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcesoResumen {
    pub id: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub carpeta: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fecha_recibo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cedula: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tipo_proceso: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub clasificacion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_clasificacion: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub subetapa_ultimo: String,
}

impl ProcesoResumen {
    /// Column headers, in display order.
    pub const COLUMNS: [&'static str; 9] = [
        "Id",
        "Carpeta",
        "Fecha Recibo",
        "Nombre",
        "Cedula",
        "Tipo Proceso",
        "Clasificacion",
        "Sub Clasificacion",
        "Subetapa Ultimo",
    ];

    /// Cell values matching [`Self::COLUMNS`].
    pub fn cells(&self) -> [String; 9] {
        [
            self.id.to_string(),
            self.carpeta.clone(),
            self.fecha_recibo.clone(),
            self.nombre.clone(),
            self.cedula.clone(),
            self.tipo_proceso.clone(),
            self.clasificacion.clone(),
            self.sub_clasificacion.clone(),
            self.subetapa_ultimo.clone(),
        ]
    }

    /// Whether the last sub-stage is a closing one (rendered in red).
    pub fn is_closed(&self) -> bool {
        is_closed_state(&self.subetapa_ultimo)
    }

    fn matches(&self, needle: &str) -> bool {
        self.cells()
            .iter()
            .any(|cell| cell.to_lowercase().contains(needle))
    }
}

pub fn is_closed_state(subetapa: &str) -> bool {
    let upper = subetapa.trim().to_uppercase();
    CLOSED_STATES.contains(&upper.as_str())
}

/// Case-insensitive substring search over every column.
///
/// A blank query returns the whole list.
pub fn filter_procesos<'a>(procesos: &'a [ProcesoResumen], query: &str) -> Vec<&'a ProcesoResumen> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return procesos.iter().collect();
    }
    procesos.iter().filter(|p| p.matches(&needle)).collect()
}

/// Payload of `/processOnly`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatosGenerales {
    #[serde(default)]
    pub datos_generales: Vec<FieldRecord>,
}

impl DatosGenerales {
    /// The first (and in practice only) general-data row.
    pub fn principal(&self) -> Option<&FieldRecord> {
        self.datos_generales.first()
    }
}

/// Payload of `/detailProcess`: four independently shaped sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetalleProceso {
    #[serde(default)]
    pub datos_basicos: FieldRecord,
    #[serde(default)]
    pub datos_adicionales: FieldRecord,
    #[serde(default)]
    pub datos_tipo_proceso: FieldRecord,
    #[serde(default)]
    pub datos_titular: FieldRecord,
}

/// Body of every endpoint keyed by a single case.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcesoRef<'a> {
    pub id_proceso: &'a str,
}

/// Body of `/updateDateProceso`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFieldPayload {
    pub id_proceso: String,
    pub tabla: String,
    pub campo: String,
    pub valor: serde_json::Value,
    pub usuario: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proceso(id: i64, nombre: &str, subetapa: &str) -> ProcesoResumen {
        ProcesoResumen {
            id,
            carpeta: "10".into(),
            fecha_recibo: "2024-02-01".into(),
            nombre: nombre.into(),
            cedula: "1020".into(),
            tipo_proceso: "EJECUTIVO".into(),
            clasificacion: "A".into(),
            sub_clasificacion: "B".into(),
            subetapa_ultimo: subetapa.into(),
        }
    }

    #[test]
    fn filter_is_case_insensitive_over_all_columns() {
        let list = vec![
            proceso(1, "María Gómez", "RADICACION"),
            proceso(2, "Pedro Páez", "TERMINACIÓN"),
        ];
        let hits = filter_procesos(&list, "maría");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 1);

        let hits = filter_procesos(&list, "terminación");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);

        assert_eq!(filter_procesos(&list, "   ").len(), 2);
    }

    #[test]
    fn closed_states() {
        assert!(proceso(1, "x", "DEVOLUCION").is_closed());
        assert!(proceso(1, "x", "terminación").is_closed());
        assert!(!proceso(1, "x", "RADICACION").is_closed());
    }

    #[test]
    fn resumen_accepts_numeric_carpeta() {
        let p: ProcesoResumen =
            serde_json::from_str(r#"{"id": 4, "carpeta": 118, "nombre": "Ana", "fecha_recibo": null}"#)
                .unwrap();
        assert_eq!(p.carpeta, "118");
        assert_eq!(p.fecha_recibo, "");
        assert_eq!(p.cedula, "");
    }

    #[test]
    fn update_payload_uses_backend_names() {
        let payload = UpdateFieldPayload {
            id_proceso: "7".into(),
            tabla: "tbl_proceso".into(),
            campo: "juzgado_inicial_id".into(),
            valor: serde_json::json!(3),
            usuario: "ana".into(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["idProceso"], "7");
        assert_eq!(json["valor"], 3);
    }
}
