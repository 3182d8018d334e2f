//! Projection of schema-less records into display rows.
//!
//! [`project`] turns a [`FieldRecord`] into an ordered list of
//! [`DisplayField`]s: internal columns are dropped, keys become readable
//! labels, empty values get a placeholder, and fields the caller declares
//! editable carry the backend column/table to update plus the value to
//! pre-fill the editor with.
//!
//! The projection is a pure function. A field that cannot be rendered is
//! degraded to a read-only placeholder instead of failing the record.

use std::collections::{BTreeMap, BTreeSet};

use lex_model::{Catalogos, FieldRecord, FieldValue, is_catalog_field};
use serde::{Serialize, Serializer};

/// Placeholder shown for null or empty values.
pub const EMPTY_DISPLAY: &str = "—";

/// Columns hidden from every projection unless overridden.
pub const DEFAULT_EXCLUSIONS: [&str; 3] = ["tabla", "id", "id_proceso"];

/// Turn a raw column name into a label: underscores become spaces and the
/// first letter of each word is upper-cased (ASCII only).
///
/// `fecha_recibo` → `Fecha Recibo`.
pub fn format_label(key: &str) -> String {
    let mut label = String::with_capacity(key.len());
    let mut word_start = true;
    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch == ' ' {
            word_start = true;
            label.push(ch);
        } else if word_start {
            word_start = false;
            label.push(ch.to_ascii_uppercase());
        } else {
            label.push(ch);
        }
    }
    label
}

/// Set of raw keys never shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclusions(BTreeSet<String>);

impl Exclusions {
    /// No exclusions at all.
    pub fn none() -> Self {
        Self(BTreeSet::new())
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>) -> Self {
        self.0.insert(key.into());
        self
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }
}

impl Default for Exclusions {
    fn default() -> Self {
        DEFAULT_EXCLUSIONS.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for Exclusions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Where an edit of a field is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    /// Backend column to update.
    pub campo: String,
    /// Backend table holding the column.
    pub tabla: String,
}

impl EditTarget {
    pub fn new(campo: impl Into<String>, tabla: impl Into<String>) -> Self {
        Self {
            campo: campo.into(),
            tabla: tabla.into(),
        }
    }
}

/// Decides which raw keys are editable and where edits go.
pub trait EditPolicy {
    fn target(&self, key: &str) -> Option<EditTarget>;
}

/// Nothing is editable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadOnly;

impl EditPolicy for ReadOnly {
    fn target(&self, _key: &str) -> Option<EditTarget> {
        None
    }
}

/// Every field is editable in one table; the column is the key plus a
/// suffix (`juzgado_inicial` → `juzgado_inicial_id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableEdit {
    pub tabla: String,
    pub key_suffix: &'static str,
}

impl TableEdit {
    pub fn new(tabla: impl Into<String>) -> Self {
        Self {
            tabla: tabla.into(),
            key_suffix: "",
        }
    }

    #[must_use]
    pub fn with_suffix(mut self, key_suffix: &'static str) -> Self {
        self.key_suffix = key_suffix;
        self
    }
}

impl EditPolicy for TableEdit {
    fn target(&self, key: &str) -> Option<EditTarget> {
        Some(EditTarget::new(format!("{key}{}", self.key_suffix), &self.tabla))
    }
}

/// Hand-maintained lookup of editable keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTableMap(BTreeMap<String, EditTarget>);

impl FieldTableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `key` editable as the column of the same name in `tabla`.
    #[must_use]
    pub fn field(self, key: &str, tabla: &str) -> Self {
        self.target(key, EditTarget::new(key, tabla))
    }

    #[must_use]
    pub fn target(mut self, key: &str, target: EditTarget) -> Self {
        self.0.insert(key.to_string(), target);
        self
    }
}

impl EditPolicy for FieldTableMap {
    fn target(&self, key: &str) -> Option<EditTarget> {
        self.0.get(key).cloned()
    }
}

impl<F> EditPolicy for F
where
    F: Fn(&str) -> Option<EditTarget>,
{
    fn target(&self, key: &str) -> Option<EditTarget> {
        self(key)
    }
}

/// Value sent to the backend when a field is edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditValue {
    Text(String),
    /// Catalog identifier of a foreign-key field.
    Id(i64),
    /// Nothing selected.
    Unset,
}

impl EditValue {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// JSON form posted to the backend; unset is the empty string.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(text) => serde_json::Value::String(text.clone()),
            Self::Id(id) => serde_json::Value::from(*id),
            Self::Unset => serde_json::Value::String(String::new()),
        }
    }
}

impl Serialize for EditValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Id(id) => serializer.serialize_i64(*id),
            Self::Unset => serializer.serialize_str(""),
        }
    }
}

/// Maps a displayed label back to the value the backend expects.
pub trait CatalogResolver {
    /// `campo` is the edit target column, `display` the label on screen.
    fn resolve(&self, campo: &str, display: &str) -> EditValue;
}

/// Catalog-bound columns resolve to their option id (unset when nothing
/// matches); free-text columns keep the displayed text.
impl CatalogResolver for Catalogos {
    fn resolve(&self, campo: &str, display: &str) -> EditValue {
        if !is_catalog_field(campo) {
            return EditValue::Text(display.to_string());
        }
        self.resolve_id(campo, display)
            .map_or(EditValue::Unset, EditValue::Id)
    }
}

impl<F> CatalogResolver for F
where
    F: Fn(&str, &str) -> EditValue,
{
    fn resolve(&self, campo: &str, display: &str) -> EditValue {
        self(campo, display)
    }
}

/// One rendered row of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayField {
    /// Raw backend key.
    pub key: String,
    pub label: String,
    pub value: String,
    pub editable: bool,
    /// Backend column for edits; empty when read-only.
    pub edit_target_key: String,
    /// Backend table for edits; empty when read-only.
    pub source_table: String,
    /// Pre-filled editor value.
    pub edit_value: EditValue,
}

impl DisplayField {
    /// Whether the value is the empty placeholder.
    pub fn is_empty(&self) -> bool {
        self.value == EMPTY_DISPLAY
    }
}

/// Project `record` into display rows, preserving its order.
pub fn project(
    record: &FieldRecord,
    exclusions: &Exclusions,
    policy: &dyn EditPolicy,
    resolver: Option<&dyn CatalogResolver>,
) -> Vec<DisplayField> {
    record
        .iter()
        .filter(|(key, _)| !exclusions.contains(key))
        .map(|(key, value)| project_field(key, value, policy, resolver))
        .collect()
}

fn project_field(
    key: &str,
    value: &FieldValue,
    policy: &dyn EditPolicy,
    resolver: Option<&dyn CatalogResolver>,
) -> DisplayField {
    let shown = value.display();
    let target = if value.is_unsupported() {
        None
    } else {
        policy.target(key)
    };

    let (editable, edit_target_key, source_table, edit_value) = match target {
        Some(EditTarget { campo, tabla }) => {
            let edit_value = match (&shown, resolver) {
                (None, _) => EditValue::Unset,
                (Some(text), Some(resolver)) => resolver.resolve(&campo, text),
                (Some(text), None) => EditValue::Text(text.clone()),
            };
            (true, campo, tabla, edit_value)
        }
        None => (false, String::new(), String::new(), EditValue::Unset),
    };

    DisplayField {
        key: key.to_string(),
        label: format_label(key),
        value: shown.unwrap_or_else(|| EMPTY_DISPLAY.to_string()),
        editable,
        edit_target_key,
        source_table,
        edit_value,
    }
}
