//! UI state of the Lex & Safety client, independent of any toolkit.
//!
//! - [`modal`]: named visibility flags for every dialog.
//! - [`projector`]: schema-less records to display rows.
//! - [`section`]: the case sections and their edit rules.

pub mod accordion;
pub mod alert;
pub mod card;
pub mod form;
pub mod modal;
pub mod projector;
pub mod section;

pub use accordion::{AccordionState, InitialItem};
pub use alert::{Alert, AlertKind};
pub use card::{CardChild, CardLayout, Tab};
pub use form::{RequiredFields, ValidationError, parse_date};
pub use modal::{
    ModalChange, ModalId, ModalRegistry, ModalSize, SharedModals, SubscriptionId, UnknownModal,
};
pub use projector::{
    CatalogResolver, DisplayField, EMPTY_DISPLAY, EditPolicy, EditTarget, EditValue, Exclusions,
    FieldTableMap, ReadOnly, TableEdit, format_label, project,
};
pub use section::{RecordSection, TABLA_PROCESO, project_detalle};
