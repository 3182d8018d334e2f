//! Form of `/newProcess`, which opens a case.

use serde::{Deserialize, Serialize};

/// Property regime of the horizontal property and of the unit. Empty when
/// nothing was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regimen {
    #[default]
    #[serde(rename = "")]
    SinDefinir,
    Residencial,
    Comercial,
    Mixta,
    NoAplica,
}

impl Regimen {
    /// A chosen regime other than "no aplica".
    pub fn aplica(self) -> bool {
        !matches!(self, Self::SinDefinir | Self::NoAplica)
    }
}

/// New case. Catalog-backed fields (`cuantia`, `tipoProceso`, `ciudad`,
/// `juzgado_inicial`, `dependiente`, `clasificacion` and the
/// sub-classifications) carry the option id as text.
///
/// Field names follow the backend, which mixes camelCase and snake_case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NuevoProceso {
    pub nombre1: String,
    pub nombre2: String,
    pub nombre3: String,
    pub nombre4: String,
    pub cedula1: String,
    pub cedula2: String,
    pub cedula3: String,
    pub cedula4: String,

    pub fecha_recibo: String,
    pub capital: String,
    pub cuantia: String,
    pub tipo_proceso: String,

    #[serde(rename = "numero_titulo")]
    pub numero_titulo: String,
    #[serde(rename = "tipo_titulo")]
    pub tipo_titulo: String,
    #[serde(rename = "fecha_titulo")]
    pub fecha_titulo: String,
    #[serde(rename = "entidad_titulo")]
    pub entidad_titulo: String,
    #[serde(rename = "monto_deuda")]
    pub monto_deuda: String,
    #[serde(rename = "intereses_moratorios")]
    pub intereses_moratorios: String,
    #[serde(rename = "vencimiento_deuda")]
    pub vencimiento_deuda: String,
    pub radicado: String,

    pub ciudad: String,
    pub departamento: String,
    #[serde(rename = "juzgado_inicial")]
    pub juzgado_inicial: String,
    #[serde(rename = "juzgado_conocimiento")]
    pub juzgado_conocimiento: String,
    pub dependiente: String,
    pub clasificacion: String,
    pub sub_clasificacion: String,
    pub sub_clasificacion_alterna: String,

    #[serde(rename = "tipoPH")]
    pub tipo_ph: Regimen,
    #[serde(rename = "tipoPHDetalle")]
    pub tipo_ph_detalle: Vec<String>,
    pub tipo_unidad: Regimen,
    pub tipo_unidad_detalle: Vec<String>,

    pub tipo_persona_repre: String,
    pub nombre_repre: String,
    pub tipo_id_repre: String,
    pub numero_id_repre: String,
    pub telefono_repre: String,
    pub celular_repre: String,
    pub correo_repre: String,
    pub direccion_domicilio_repre: String,
    pub direccion_notificacion_repre: String,

    #[serde(rename = "nombrePH")]
    pub nombre_ph: String,
    #[serde(rename = "nitPH")]
    pub nit_ph: String,
    #[serde(rename = "ciudadPH")]
    pub ciudad_ph: String,
    #[serde(rename = "departamentoPH")]
    pub departamento_ph: String,
    #[serde(rename = "barrioPH")]
    pub barrio_ph: String,
    #[serde(rename = "localidadPH")]
    pub localidad_ph: String,
    #[serde(rename = "telefonoPH")]
    pub telefono_ph: String,
    #[serde(rename = "celularPH")]
    pub celular_ph: String,
    #[serde(rename = "correoPH")]
    pub correo_ph: String,
    #[serde(rename = "direccionNotificacionPH")]
    pub direccion_notificacion_ph: String,

    pub identificacion_unidad: String,
    pub matricula_inmobiliaria: String,
    pub telefono_unidad: String,
    pub celular_unidad: String,
    pub correo_unidad: String,
    pub direccion_domicilio_unidad: String,
    pub direccion_notificacion_unidad: String,

    /// Filled from the session when the form is sent.
    pub usuario: String,
}

impl NuevoProceso {
    /// Fields every case needs, as `(backend name, value)`.
    pub fn required(&self) -> [(&'static str, &str); 13] {
        [
            ("nombre1", self.nombre1.as_str()),
            ("cedula1", self.cedula1.as_str()),
            ("fechaRecibo", self.fecha_recibo.as_str()),
            ("capital", self.capital.as_str()),
            ("cuantia", self.cuantia.as_str()),
            ("tipoProceso", self.tipo_proceso.as_str()),
            ("ciudad", self.ciudad.as_str()),
            ("juzgado_inicial", self.juzgado_inicial.as_str()),
            ("dependiente", self.dependiente.as_str()),
            ("clasificacion", self.clasificacion.as_str()),
            ("subClasificacion", self.sub_clasificacion.as_str()),
            ("subClasificacionAlterna", self.sub_clasificacion_alterna.as_str()),
            ("radicado", self.radicado.as_str()),
        ]
    }

    /// Legal representative fields, required once a property regime applies.
    pub fn representante(&self) -> [(&'static str, &str); 4] {
        [
            ("tipoPersonaRepre", self.tipo_persona_repre.as_str()),
            ("nombreRepre", self.nombre_repre.as_str()),
            ("tipoIdRepre", self.tipo_id_repre.as_str()),
            ("numeroIdRepre", self.numero_id_repre.as_str()),
        ]
    }
}
