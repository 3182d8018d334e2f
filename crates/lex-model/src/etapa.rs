//! Procedural workflow of a case: stages ("etapas"), their sub-stages
//! ("subetapas") and the alternate tracks ("etapas alternas").

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::de::{lenient_opt_string, lenient_string};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subetapa {
    #[serde(default, deserialize_with = "lenient_string")]
    pub subetapa: String,
    #[serde(default)]
    pub ordinal_subetapa: i64,
    /// Date the sub-stage was reached; `None` while pending.
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fecha_marcada: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub observacion: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub usuario: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fecha_modificacion: Option<String>,
    /// Whether documents are attached.
    #[serde(default)]
    pub pdf: bool,
    #[serde(default)]
    pub id_relacion_sub: i64,
}

impl Subetapa {
    pub fn is_marked(&self) -> bool {
        self.fecha_marcada.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtapaDetalle {
    #[serde(default)]
    pub ordinal_etapa: i64,
    #[serde(default)]
    pub subetapas: Vec<Subetapa>,
}

/// A stage with its name, sub-stages sorted by ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct Etapa<'a> {
    pub nombre: &'a str,
    pub ordinal: i64,
    pub subetapas: Vec<&'a Subetapa>,
}

/// Payload of `/subetapas`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EtapasProceso {
    #[serde(default)]
    pub datos_subetapas: BTreeMap<String, EtapaDetalle>,
}

impl EtapasProceso {
    /// Stages sorted by ordinal (name breaks ties), sub-stages likewise.
    pub fn ordered(&self) -> Vec<Etapa<'_>> {
        let mut etapas: Vec<Etapa<'_>> = self
            .datos_subetapas
            .iter()
            .map(|(nombre, detalle)| {
                let mut subetapas: Vec<&Subetapa> = detalle.subetapas.iter().collect();
                subetapas.sort_by_key(|s| s.ordinal_subetapa);
                Etapa {
                    nombre,
                    ordinal: detalle.ordinal_etapa,
                    subetapas,
                }
            })
            .collect();
        etapas.sort_by(|a, b| a.ordinal.cmp(&b.ordinal).then_with(|| a.nombre.cmp(b.nombre)));
        etapas
    }

    /// `(marked, total)` sub-stage counts.
    pub fn progress(&self) -> (usize, usize) {
        self.datos_subetapas
            .values()
            .flat_map(|detalle| &detalle.subetapas)
            .fold((0, 0), |(marked, total), s| {
                (marked + usize::from(s.is_marked()), total + 1)
            })
    }

    /// Last marked sub-stage in workflow order.
    pub fn current(&self) -> Option<&Subetapa> {
        self.ordered()
            .into_iter()
            .flat_map(|etapa| etapa.subetapas)
            .filter(|s| s.is_marked())
            .last()
    }

    pub fn find(&self, id_relacion_sub: i64) -> Option<&Subetapa> {
        self.datos_subetapas
            .values()
            .flat_map(|detalle| &detalle.subetapas)
            .find(|s| s.id_relacion_sub == id_relacion_sub)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubetapaAlternaDef {
    pub id_tipo_subetapa: i64,
    pub id_relacion_sub: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre: String,
    #[serde(default)]
    pub ordinal: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtapaAlternaDef {
    pub id_etapa: i64,
    #[serde(default)]
    pub ordinal_etapa: i64,
    #[serde(default)]
    pub subetapas: Vec<SubetapaAlternaDef>,
}

/// Payload of `/subetapasAlternas`: the alternate tracks that can be opened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EtapasAlternasCatalogo {
    #[serde(default)]
    pub datos_alternas: BTreeMap<String, EtapaAlternaDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubetapaAlterna {
    pub id_relacion_sub: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub fecha_act: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub observacion: Option<String>,
    #[serde(default)]
    pub tiene_documento: bool,
}

/// One opened alternate track ("medida alterna") of a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistroAlterno {
    pub id_registro: i64,
    #[serde(default)]
    pub subetapas: Vec<SubetapaAlterna>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtapaConAlternas {
    #[serde(default, deserialize_with = "lenient_string")]
    pub nombre_etapa: String,
    #[serde(default)]
    pub alternas: BTreeMap<String, RegistroAlterno>,
}

/// Payload of `/dataSubAlterna`, keyed by stage id.
pub type DatosAlternos = BTreeMap<String, EtapaConAlternas>;

/// Body of `/updateSubetapa`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarSubetapa<'a> {
    pub id_proceso: &'a str,
    pub id_relacion_sub: i64,
    pub fecha: &'a str,
    pub observacion: &'a str,
    pub usuario: &'a str,
}

/// Body of `/createRegistroAlterna`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrearRegistroAlterno<'a> {
    pub id_proceso: &'a str,
    pub id_alterna: i64,
    pub descripcion: &'a str,
    pub usuario: &'a str,
}

/// Body of `/updateSubetapaAlterna`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualizarSubetapaAlterna<'a> {
    pub id_proceso: &'a str,
    pub id_relacion_sub: i64,
    pub fecha: &'a str,
    pub observacion: &'a str,
    pub usuario: &'a str,
    pub id_registro_alterna: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn etapas() -> EtapasProceso {
        serde_json::from_str(
            r#"{"datos_subetapas": {
                "NOTIFICACION": {"ordinal_etapa": 2, "subetapas": [
                    {"subetapa": "AVISO", "ordinal_subetapa": 2, "fecha_marcada": null, "id_relacion_sub": 21},
                    {"subetapa": "CITACION", "ordinal_subetapa": 1, "fecha_marcada": "2024-05-02", "id_relacion_sub": 20}
                ]},
                "DEMANDA": {"ordinal_etapa": 1, "subetapas": [
                    {"subetapa": "RADICACION", "ordinal_subetapa": 1, "fecha_marcada": "2024-04-01", "id_relacion_sub": 10, "pdf": true}
                ]}
            }}"#,
        )
        .unwrap()
    }

    #[test]
    fn ordered_by_ordinals() {
        let etapas = etapas();
        let ordered = etapas.ordered();
        let names: Vec<_> = ordered.iter().map(|e| e.nombre).collect();
        assert_eq!(names, vec!["DEMANDA", "NOTIFICACION"]);
        let subs: Vec<_> = ordered[1].subetapas.iter().map(|s| s.subetapa.as_str()).collect();
        assert_eq!(subs, vec!["CITACION", "AVISO"]);
    }

    #[test]
    fn progress_and_current() {
        let etapas = etapas();
        assert_eq!(etapas.progress(), (2, 3));
        assert_eq!(etapas.current().map(|s| s.subetapa.as_str()), Some("CITACION"));
        assert!(etapas.find(10).unwrap().pdf);
    }

    #[test]
    fn alternate_tracks_parse() {
        let datos: DatosAlternos = serde_json::from_str(
            r#"{"4": {"nombre_etapa": "MEDIDAS", "alternas": {
                "EMBARGO": {"id_registro": 55, "subetapas": [
                    {"id_relacion_sub": 91, "nombre": "OFICIO", "fecha_act": "", "observacion": null, "tiene_documento": false}
                ]}
            }}}"#,
        )
        .unwrap();
        let registro = &datos["4"].alternas["EMBARGO"];
        assert_eq!(registro.id_registro, 55);
        assert_eq!(registro.subetapas[0].fecha_act, None);
    }
}
