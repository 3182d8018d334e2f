//! Data model of the Lex & Safety case-records backend.
//!
//! Typed records for the parts of the API with a stable contract, and
//! [`FieldRecord`] for the sections whose shape depends on the case type.

pub mod catalog;
pub mod de;
pub mod envelope;
pub mod error;
pub mod etapa;
pub mod gestion;
pub mod juzgado;
pub mod nuevo;
pub mod proceso;
pub mod record;

pub use catalog::{CatalogKind, CatalogOption, Catalogos, catalog_for_field, is_catalog_field};
pub use envelope::{Ack, Envelope, LoginRequest, LoginResponse, Usuario};
pub use error::{ModelError, Result};
pub use etapa::{
    ActualizarSubetapa, ActualizarSubetapaAlterna, CrearRegistroAlterno, DatosAlternos, Etapa,
    EtapaConAlternas, EtapaDetalle, EtapasAlternasCatalogo, EtapasProceso, RegistroAlterno,
    Subetapa, SubetapaAlterna,
};
pub use gestion::{
    ActualizacionSubetapa, ActualizarObligacion, CrearObligacion, DatosObligacion, Documento,
    DocumentoRef, HistoricoItem, ItemGestion, NuevaObservacion, Obligacion, Obligaciones,
    Observacion, Observaciones, SubetapaRef,
};
pub use juzgado::{Datos, Departamentos, NuevoJuzgado};
pub use nuevo::{NuevoProceso, Regimen};
pub use proceso::{
    CLOSED_STATES, DatosGenerales, DetalleProceso, ProcesoRef, ProcesoResumen,
    UpdateFieldPayload, filter_procesos, is_closed_state,
};
pub use record::{FieldRecord, FieldValue};
