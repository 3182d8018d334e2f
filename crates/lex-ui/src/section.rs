//! Known record sections and their fixed edit policies.

use lex_model::{Catalogos, DetalleProceso, FieldRecord};

use crate::projector::{
    CatalogResolver, DisplayField, EditPolicy, Exclusions, ReadOnly, TableEdit, project,
};

/// Table holding the basic data of a case.
pub const TABLA_PROCESO: &str = "tbl_proceso";

/// Sections of the case screens, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordSection {
    DatosGenerales,
    DatosBasicos,
    DatosAdicionales,
    DatosTipoProceso,
    DatosTitular,
}

impl RecordSection {
    /// The four sections of the detail view.
    pub const DETALLE: [RecordSection; 4] = [
        Self::DatosBasicos,
        Self::DatosAdicionales,
        Self::DatosTipoProceso,
        Self::DatosTitular,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::DatosGenerales => "Datos generales",
            Self::DatosBasicos => "Datos básicos",
            Self::DatosAdicionales => "Datos adicionales",
            Self::DatosTipoProceso => "Datos tipo de proceso",
            Self::DatosTitular => "Datos del titular",
        }
    }

    pub fn exclusions(self) -> Exclusions {
        match self {
            Self::DatosAdicionales | Self::DatosTipoProceso => {
                Exclusions::default().with("proceso_id")
            }
            _ => Exclusions::default(),
        }
    }

    /// Edit policy for `record`; sections keyed on the record's own `tabla`
    /// are read-only when it is missing.
    pub fn policy(self, record: &FieldRecord) -> Box<dyn EditPolicy> {
        match self {
            Self::DatosBasicos => Box::new(TableEdit::new(TABLA_PROCESO).with_suffix("_id")),
            Self::DatosAdicionales | Self::DatosTipoProceso => {
                match record.text("tabla").map(str::trim).filter(|t| !t.is_empty()) {
                    Some(tabla) => Box::new(TableEdit::new(tabla)),
                    None => Box::new(ReadOnly),
                }
            }
            Self::DatosTitular | Self::DatosGenerales => Box::new(ReadOnly),
        }
    }

    /// The section's record inside a detail payload.
    pub fn record(self, detalle: &DetalleProceso) -> Option<&FieldRecord> {
        match self {
            Self::DatosBasicos => Some(&detalle.datos_basicos),
            Self::DatosAdicionales => Some(&detalle.datos_adicionales),
            Self::DatosTipoProceso => Some(&detalle.datos_tipo_proceso),
            Self::DatosTitular => Some(&detalle.datos_titular),
            Self::DatosGenerales => None,
        }
    }

    /// Project `record` with this section's rules. Catalogs only apply to
    /// the basic data.
    pub fn project(self, record: &FieldRecord, catalogos: Option<&Catalogos>) -> Vec<DisplayField> {
        let policy = self.policy(record);
        let resolver = match self {
            Self::DatosBasicos => catalogos.map(|c| c as &dyn CatalogResolver),
            _ => None,
        };
        project(record, &self.exclusions(), policy.as_ref(), resolver)
    }
}

/// Project every section of a detail payload, skipping empty ones.
pub fn project_detalle(
    detalle: &DetalleProceso,
    catalogos: Option<&Catalogos>,
) -> Vec<(RecordSection, Vec<DisplayField>)> {
    RecordSection::DETALLE
        .into_iter()
        .filter_map(|section| {
            let record = section.record(detalle)?;
            let rows = section.project(record, catalogos);
            (!rows.is_empty()).then_some((section, rows))
        })
        .collect()
}
