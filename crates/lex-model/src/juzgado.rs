use serde::{Deserialize, Serialize};

use crate::record::FieldRecord;

/// Form of `/nuevoJuzgado`; every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NuevoJuzgado {
    pub nombre_juzgado: String,
    pub correo: String,
    pub telefono: String,
    pub direccion: String,
}

impl NuevoJuzgado {
    /// `(field, value)` pairs in form order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("nombre_juzgado", self.nombre_juzgado.as_str()),
            ("correo", self.correo.as_str()),
            ("telefono", self.telefono.as_str()),
            ("direccion", self.direccion.as_str()),
        ]
    }
}

/// Forms are posted wrapped as `{ "datos": { ... } }`.
#[derive(Debug, Clone, Serialize)]
pub struct Datos<'a, T> {
    pub datos: &'a T,
}

/// Payload of `/searchDepartaments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Departamentos {
    #[serde(default)]
    pub departamentos: Vec<FieldRecord>,
}
