//! Typed calls to every backend endpoint.

use std::path::Path;

use lex_model::{
    Ack, ActualizacionSubetapa, ActualizarObligacion, ActualizarSubetapa,
    ActualizarSubetapaAlterna, Catalogos, CrearObligacion, CrearRegistroAlterno, Datos,
    DatosAlternos, DatosGenerales, DatosObligacion, Departamentos, DetalleProceso, Documento,
    DocumentoRef, Envelope, EtapasAlternasCatalogo, EtapasProceso, FieldRecord, HistoricoItem,
    ItemGestion, LoginRequest, LoginResponse, NuevaObservacion, NuevoJuzgado, NuevoProceso, Obligacion,
    Obligaciones, Observacion, Observaciones, ProcesoRef, ProcesoResumen, SubetapaRef,
    UpdateFieldPayload,
};
use lex_ui::{EditValue, RequiredFields};
use reqwest::blocking::multipart::Form;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::client::{ApiClient, Auth};
use crate::error::{ClientError, Result};
use crate::session::Session;

/// Report downloaded when no name is given.
pub const BASE_PROCESAL_DEFAULT: &str = "base_procesal_general";

const UPDATE_FAILED: &str = "No fue posible actualizar el dato";
const CREATE_FAILED: &str = "No fue posible crear el proceso";

/// Backend endpoints.
mod endpoint {
    pub const LOGIN: &str = "/auth/login";
    pub const PROCESOS: &str = "/process";
    pub const PROCESO_GENERAL: &str = "/processOnly";
    pub const DETALLE_PROCESO: &str = "/detailProcess";
    pub const CATALOGOS: &str = "/dataNewProcess";
    pub const NUEVO_PROCESO: &str = "/newProcess";
    pub const ACTUALIZAR_CAMPO: &str = "/updateDateProceso";
    pub const OBSERVACIONES: &str = "/observationProcess";
    pub const NUEVA_OBSERVACION: &str = "/newObservationProcess";
    pub const OBLIGACIONES: &str = "/searchObligaciones";
    pub const CREAR_OBLIGACION: &str = "/crearObligacion";
    pub const ACTUALIZAR_OBLIGACION: &str = "/actualizarObligacion";
    pub const SUBETAPAS: &str = "/subetapas";
    pub const SUBETAPAS_ALTERNAS: &str = "/subetapasAlternas";
    pub const DATOS_ALTERNOS: &str = "/dataSubAlterna";
    pub const ACTUALIZAR_SUBETAPA: &str = "/updateSubetapa";
    pub const CREAR_REGISTRO_ALTERNO: &str = "/createRegistroAlterna";
    pub const ACTUALIZAR_SUBETAPA_ALTERNA: &str = "/updateSubetapaAlterna";
    pub const HISTORICO: &str = "/historySub";
    pub const HISTORICO_SUBETAPA: &str = "/historyActSub";
    pub const DOCUMENTOS: &str = "/listDocuments";
    pub const SUBIR_DOCUMENTOS: &str = "/uploadDocumento";
    pub const DESCARGAR_DOCUMENTO: &str = "/downloadDocumento";
    pub const ELIMINAR_DOCUMENTO: &str = "/deleteDocument";
    pub const NUEVO_JUZGADO: &str = "/nuevoJuzgado";
    pub const DEPARTAMENTOS: &str = "/searchDepartaments";
    pub const BASE_PROCESAL: &str = "/baseProcesal";
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuscarDepartamentos<'a> {
    name_city: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BaseProcesal<'a> {
    nombre_informe: &'a str,
}

/// The Lex & Safety backend.
#[derive(Debug)]
pub struct LexApi {
    client: ApiClient,
}

impl LexApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The logged-in session, or [`ClientError::NotAuthenticated`].
    pub fn session(&self) -> Result<Session> {
        self.client
            .session()
            .load()
            .filter(|session| !session.token.is_empty())
            .ok_or(ClientError::NotAuthenticated)
    }

    fn usuario(&self) -> Result<String> {
        self.session().map(|session| session.usuario)
    }

    fn data<B, T>(&self, endpoint: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope: Envelope<T> = self.client.post_json(endpoint, body, Auth::Required)?;
        Ok(envelope.into_data()?)
    }

    fn ack<B>(&self, endpoint: &str, body: &B) -> Result<Option<String>>
    where
        B: Serialize + ?Sized,
    {
        let ack: Ack = self.client.post_json(endpoint, Some(body), Auth::Required)?;
        Ok(ack.into_result()?)
    }

    /// Authenticate and store the session.
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        RequiredFields::new()
            .require("usuario", username)
            .require("password", password)
            .check()?;

        let request = LoginRequest { username, password };
        let response: LoginResponse = self
            .client
            .post_json(endpoint::LOGIN, Some(&request), Auth::None)
            .map_err(|err| match err {
                ClientError::Http { status, .. } if (400..500).contains(&status) => {
                    ClientError::InvalidCredentials
                }
                other => other,
            })?;

        let (Some(usuario), Some(token)) = (response.usuario, response.token) else {
            return Err(ClientError::InvalidCredentials);
        };
        if !response.success || token.is_empty() {
            return Err(ClientError::InvalidCredentials);
        }

        let session = Session {
            token,
            usuario: usuario.usuario,
            id_usuario: usuario.id,
        };
        self.client.session().save(&session)?;
        info!(usuario = %session.usuario, "logged in");
        Ok(session)
    }

    pub fn logout(&self) -> Result<()> {
        self.client.session().clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn procesos(&self) -> Result<Vec<ProcesoResumen>> {
        self.data::<(), _>(endpoint::PROCESOS, None)
    }

    pub fn proceso_general(&self, id_proceso: &str) -> Result<DatosGenerales> {
        self.data(endpoint::PROCESO_GENERAL, Some(&ProcesoRef { id_proceso }))
    }

    pub fn detalle_proceso(&self, id_proceso: &str) -> Result<DetalleProceso> {
        self.data(endpoint::DETALLE_PROCESO, Some(&ProcesoRef { id_proceso }))
    }

    pub fn catalogos(&self) -> Result<Catalogos> {
        self.data::<(), _>(endpoint::CATALOGOS, None)
    }

    /// Update one column of a case. Returns the backend's confirmation.
    #[instrument(skip(self, valor))]
    pub fn actualizar_campo(
        &self,
        id_proceso: &str,
        tabla: &str,
        campo: &str,
        valor: &EditValue,
    ) -> Result<Option<String>> {
        RequiredFields::new()
            .require("tabla", tabla)
            .require("campo", campo)
            .check()?;
        let payload = UpdateFieldPayload {
            id_proceso: id_proceso.to_string(),
            tabla: tabla.to_string(),
            campo: campo.to_string(),
            valor: valor.to_json(),
            usuario: self.usuario()?,
        };
        self.ack(endpoint::ACTUALIZAR_CAMPO, &payload)
            .map_err(|err| with_fallback(err, UPDATE_FAILED))
    }

    /// Open a case. Required fields are checked before any request; a
    /// property regime other than "no aplica" also needs its detail and the
    /// legal representative.
    #[instrument(skip_all, fields(radicado = %proceso.radicado))]
    pub fn nuevo_proceso(&self, proceso: &NuevoProceso) -> Result<Option<String>> {
        let form = proceso
            .required()
            .into_iter()
            .fold(RequiredFields::new(), |form, (campo, valor)| match campo {
                "fechaRecibo" => form.require_date(campo, valor),
                _ => form.require(campo, valor),
            });
        let form = if proceso.tipo_ph.aplica() {
            proceso.representante().into_iter().fold(
                form.require("tipoPHDetalle", &proceso.tipo_ph_detalle.join(",")),
                |form, (campo, valor)| form.require(campo, valor),
            )
        } else {
            form
        };
        form.check()?;

        let datos = NuevoProceso {
            usuario: self.usuario()?,
            ..proceso.clone()
        };
        let message = self
            .ack(endpoint::NUEVO_PROCESO, &Datos { datos: &datos })
            .map_err(|err| with_fallback(err, CREATE_FAILED))?;
        info!("case created");
        Ok(message)
    }

    pub fn observaciones(&self, id_proceso: &str) -> Result<Vec<Observacion>> {
        let data: Observaciones =
            self.data(endpoint::OBSERVACIONES, Some(&ProcesoRef { id_proceso }))?;
        Ok(data.observaciones)
    }

    /// Add an observation; blank text is rejected without a request.
    pub fn nueva_observacion(&self, id_proceso: &str, observacion: &str) -> Result<()> {
        RequiredFields::new()
            .require("observacion", observacion)
            .check()?;
        let usuario = self.usuario()?;
        let body = NuevaObservacion {
            id_proceso,
            observacion,
            usuario: &usuario,
        };
        self.ack(endpoint::NUEVA_OBSERVACION, &body)?;
        Ok(())
    }

    pub fn obligaciones(&self, id_proceso: &str) -> Result<Vec<Obligacion>> {
        let data: Obligaciones =
            self.data(endpoint::OBLIGACIONES, Some(&ProcesoRef { id_proceso }))?;
        Ok(data.obligaciones)
    }

    pub fn crear_obligacion(&self, id_proceso: &str, datos: &DatosObligacion) -> Result<()> {
        let datos = datos.normalized();
        RequiredFields::new()
            .require("obligacion", &datos.obligacion)
            .require("capital", &datos.capital)
            .check()?;
        self.ack(endpoint::CREAR_OBLIGACION, &CrearObligacion { id_proceso, datos })?;
        Ok(())
    }

    pub fn actualizar_obligacion(
        &self,
        id: i64,
        id_proceso: &str,
        datos: &DatosObligacion,
    ) -> Result<()> {
        let datos = datos.normalized();
        RequiredFields::new()
            .require("obligacion", &datos.obligacion)
            .require("capital", &datos.capital)
            .check()?;
        let body = ActualizarObligacion {
            id,
            id_proceso,
            datos,
        };
        self.ack(endpoint::ACTUALIZAR_OBLIGACION, &body)?;
        Ok(())
    }

    pub fn subetapas(&self, id_proceso: &str) -> Result<EtapasProceso> {
        self.data(endpoint::SUBETAPAS, Some(&ProcesoRef { id_proceso }))
    }

    pub fn subetapas_alternas(&self, id_proceso: &str) -> Result<EtapasAlternasCatalogo> {
        self.data(endpoint::SUBETAPAS_ALTERNAS, Some(&ProcesoRef { id_proceso }))
    }

    pub fn datos_alternos(&self, id_proceso: &str) -> Result<DatosAlternos> {
        self.data(endpoint::DATOS_ALTERNOS, Some(&ProcesoRef { id_proceso }))
    }

    /// Mark a sub-stage of the main workflow on `fecha` (`YYYY-MM-DD`).
    pub fn actualizar_subetapa(
        &self,
        id_proceso: &str,
        id_relacion_sub: i64,
        fecha: &str,
        observacion: &str,
    ) -> Result<()> {
        RequiredFields::new().require_date("fecha", fecha).check()?;
        let usuario = self.usuario()?;
        let body = ActualizarSubetapa {
            id_proceso,
            id_relacion_sub,
            fecha,
            observacion,
            usuario: &usuario,
        };
        self.ack(endpoint::ACTUALIZAR_SUBETAPA, &body)?;
        Ok(())
    }

    /// Open an alternate track of the given kind.
    pub fn crear_registro_alterno(
        &self,
        id_proceso: &str,
        id_alterna: i64,
        descripcion: &str,
    ) -> Result<()> {
        let usuario = self.usuario()?;
        let body = CrearRegistroAlterno {
            id_proceso,
            id_alterna,
            descripcion,
            usuario: &usuario,
        };
        self.ack(endpoint::CREAR_REGISTRO_ALTERNO, &body)?;
        Ok(())
    }

    pub fn actualizar_subetapa_alterna(
        &self,
        id_proceso: &str,
        id_registro_alterna: i64,
        id_relacion_sub: i64,
        fecha: &str,
        observacion: &str,
    ) -> Result<()> {
        RequiredFields::new().require_date("fecha", fecha).check()?;
        let usuario = self.usuario()?;
        let body = ActualizarSubetapaAlterna {
            id_proceso,
            id_relacion_sub,
            fecha,
            observacion,
            usuario: &usuario,
            id_registro_alterna,
        };
        self.ack(endpoint::ACTUALIZAR_SUBETAPA_ALTERNA, &body)?;
        Ok(())
    }

    /// Management history of a case.
    pub fn historico(&self, id_proceso: &str) -> Result<Vec<ItemGestion>> {
        let items: Vec<HistoricoItem> =
            self.data(endpoint::HISTORICO, Some(&ProcesoRef { id_proceso }))?;
        Ok(items.into_iter().map(ItemGestion::from).collect())
    }

    /// Update trail of one sub-stage, optionally of an alternate track.
    pub fn historico_subetapa(
        &self,
        id_proceso: &str,
        id_relacion_sub: i64,
        id_registro_alterna: Option<i64>,
    ) -> Result<Vec<ActualizacionSubetapa>> {
        let body = SubetapaRef {
            id_proceso,
            id_relacion_sub,
            id_registro_alterna,
        };
        self.data(endpoint::HISTORICO_SUBETAPA, Some(&body))
    }

    pub fn documentos(&self, id_proceso: &str, id_relacion_sub: i64) -> Result<Vec<Documento>> {
        let body = SubetapaRef {
            id_proceso,
            id_relacion_sub,
            id_registro_alterna: None,
        };
        self.data(endpoint::DOCUMENTOS, Some(&body))
    }

    /// Attach files to a sub-stage.
    pub fn subir_documentos<P: AsRef<Path>>(
        &self,
        id_proceso: &str,
        id_relacion_sub: i64,
        files: &[P],
    ) -> Result<()> {
        if files.is_empty() {
            return Err(lex_ui::ValidationError::Missing {
                missing: vec!["files".to_string()],
            }
            .into());
        }
        let usuario = self.usuario()?;
        let mut form = Form::new();
        for file in files {
            form = form.file("files", file.as_ref())?;
        }
        let form = form
            .text("idProceso", id_proceso.to_string())
            .text("idRelacionSub", id_relacion_sub.to_string())
            .text("usuario", usuario);
        let ack: Ack =
            self.client
                .post_multipart(endpoint::SUBIR_DOCUMENTOS, form, Auth::Required)?;
        ack.into_result()?;
        info!(id_proceso, id_relacion_sub, count = files.len(), "documents uploaded");
        Ok(())
    }

    pub fn descargar_documento(&self, id: i64) -> Result<Vec<u8>> {
        let body = DocumentoRef { id, usuario: None };
        self.client
            .post_blob(endpoint::DESCARGAR_DOCUMENTO, &body, Auth::Required)
    }

    pub fn eliminar_documento(&self, id: i64) -> Result<Option<String>> {
        let usuario = self.usuario()?;
        let body = DocumentoRef {
            id,
            usuario: Some(&usuario),
        };
        self.ack(endpoint::ELIMINAR_DOCUMENTO, &body)
    }

    pub fn nuevo_juzgado(&self, juzgado: &NuevoJuzgado) -> Result<Option<String>> {
        juzgado
            .fields()
            .into_iter()
            .fold(RequiredFields::new(), |form, (campo, valor)| form.require(campo, valor))
            .check()?;
        self.ack(endpoint::NUEVO_JUZGADO, &Datos { datos: juzgado })
    }

    pub fn buscar_departamentos(&self, name_city: &str) -> Result<Vec<FieldRecord>> {
        let data: Departamentos =
            self.data(endpoint::DEPARTAMENTOS, Some(&BuscarDepartamentos { name_city }))?;
        Ok(data.departamentos)
    }

    /// Procedural-base CSV report. A blank name requests the general one.
    pub fn base_procesal(&self, nombre_informe: &str) -> Result<Vec<u8>> {
        let nombre_informe = match nombre_informe.trim() {
            "" => BASE_PROCESAL_DEFAULT,
            nombre => nombre,
        };
        self.client.post_blob(
            endpoint::BASE_PROCESAL,
            &BaseProcesal { nombre_informe },
            Auth::Required,
        )
    }
}

/// A rejection without a usable message gets `fallback`.
fn with_fallback(err: ClientError, fallback: &str) -> ClientError {
    match err {
        ClientError::Rejected { message } => ClientError::Rejected {
            message: message
                .filter(|m| !m.trim().is_empty())
                .or_else(|| Some(fallback.to_string())),
        },
        other => other,
    }
}
