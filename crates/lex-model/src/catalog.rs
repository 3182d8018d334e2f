//! Option catalogs used by foreign-key fields (`/dataNewProcess`).
//!
//! Editable case fields such as the court or the amount bracket are stored
//! as numeric ids while the backend displays their labels. The catalogs let
//! the client go from one to the other.

use serde::{Deserialize, Serialize};

use crate::record::FieldRecord;

/// The enumerated option lists the backend publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogKind {
    Cuantia,
    TipoProceso,
    Juzgado,
    Dependiente,
    Clasificacion,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 5] = [
        Self::Cuantia,
        Self::TipoProceso,
        Self::Juzgado,
        Self::Dependiente,
        Self::Clasificacion,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cuantia => "cuantia",
            Self::TipoProceso => "tipo_proceso",
            Self::Juzgado => "juzgado",
            Self::Dependiente => "dependiente",
            Self::Clasificacion => "clasificacion",
        }
    }

    /// Column of each catalog entry holding its human label.
    pub fn label_key(self) -> &'static str {
        match self {
            Self::Clasificacion => "nombre",
            other => other.as_str(),
        }
    }
}

/// Which catalog backs an editable field, keyed by the backend column name.
pub fn catalog_for_field(campo: &str) -> Option<CatalogKind> {
    match campo {
        "cuantia_id" => Some(CatalogKind::Cuantia),
        "tipo_proceso_id" => Some(CatalogKind::TipoProceso),
        "juzgado_conocimiento_id" | "juzgado_inicial_id" => Some(CatalogKind::Juzgado),
        "clasificacion_id" | "sub_clasificacion_id" | "sub_clasificacion_alterna_id" => {
            Some(CatalogKind::Clasificacion)
        }
        _ => None,
    }
}

pub fn is_catalog_field(campo: &str) -> bool {
    catalog_for_field(campo).is_some()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogos {
    #[serde(default)]
    pub cuantia: Vec<FieldRecord>,
    #[serde(default)]
    pub tipo_proceso: Vec<FieldRecord>,
    #[serde(default)]
    pub juzgado: Vec<FieldRecord>,
    #[serde(default)]
    pub dependiente: Vec<FieldRecord>,
    #[serde(default)]
    pub clasificacion: Vec<FieldRecord>,
}

impl Catalogos {
    fn entries(&self, kind: CatalogKind) -> &[FieldRecord] {
        match kind {
            CatalogKind::Cuantia => &self.cuantia,
            CatalogKind::TipoProceso => &self.tipo_proceso,
            CatalogKind::Juzgado => &self.juzgado,
            CatalogKind::Dependiente => &self.dependiente,
            CatalogKind::Clasificacion => &self.clasificacion,
        }
    }

    /// Options of a catalog. Entries without a numeric id are skipped.
    pub fn options(&self, kind: CatalogKind) -> Vec<CatalogOption> {
        self.entries(kind)
            .iter()
            .filter_map(|entry| {
                let id = entry.get("id")?.as_i64()?;
                let label = entry
                    .get(kind.label_key())
                    .and_then(|value| value.display())
                    .unwrap_or_default();
                Some(CatalogOption { id, label })
            })
            .collect()
    }

    /// Options for an editable field, or `None` when it is free text.
    pub fn options_for_field(&self, campo: &str) -> Option<Vec<CatalogOption>> {
        catalog_for_field(campo).map(|kind| self.options(kind))
    }

    /// Reverse lookup: the id whose label matches `label`, ignoring case.
    ///
    /// `None` when the field is not catalog-bound, the label is blank, or
    /// no option matches.
    pub fn resolve_id(&self, campo: &str, label: &str) -> Option<i64> {
        let kind = catalog_for_field(campo)?;
        let wanted = label.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.options(kind)
            .into_iter()
            .find(|option| option.label.trim().to_lowercase() == wanted)
            .map(|option| option.id)
    }

    /// Label of an id, the inverse of [`Self::resolve_id`].
    pub fn label_of(&self, campo: &str, id: i64) -> Option<String> {
        let kind = catalog_for_field(campo)?;
        self.options(kind)
            .into_iter()
            .find(|option| option.id == id)
            .map(|option| option.label)
    }
}
