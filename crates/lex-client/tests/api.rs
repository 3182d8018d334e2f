//! Endpoint calls against a local canned server.

mod common;

use common::{Canned, TestServer, api, logged_in};
use lex_client::{ClientError, MemorySessionStore, TOKEN_HEADER};
use lex_model::{DatosObligacion, NuevoProceso, Regimen};
use lex_ui::{Alert, EditValue, ValidationError};

#[test]
fn login_stores_session_without_token_header() {
    let server = TestServer::start(vec![Canned::json(
        r#"{"success": true, "token": "jwt-1",
            "usuario": {"id": 3, "email": "ana@lex.co", "usuario": "ana"}}"#,
    )]);
    let lex = api(&server, MemorySessionStore::new());

    let session = lex.login("ana", "secreto").unwrap();
    assert_eq!(session.token, "jwt-1");
    assert_eq!(session.id_usuario, 3);
    assert_eq!(lex.session().unwrap().usuario, "ana");

    let requests = server.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].path, "/auth/login");
    assert_eq!(requests[0].header(TOKEN_HEADER), None);
    assert_eq!(requests[0].json()["username"], "ana");
}

#[test]
fn failed_login_is_invalid_credentials() {
    let server = TestServer::start(vec![
        Canned::status_json(401, r#"{"message": "no"}"#),
        Canned::json(r#"{"success": false, "message": "Usuario inactivo"}"#),
    ]);
    let lex = api(&server, MemorySessionStore::new());

    let err = lex.login("ana", "mala").unwrap_err();
    assert!(matches!(err, ClientError::InvalidCredentials));
    assert_eq!(err.alert(), Alert::credenciales_incorrectas());
    assert!(lex.login("ana", "mala").is_err());
    assert!(matches!(lex.session(), Err(ClientError::NotAuthenticated)));
    server.finish();
}

#[test]
fn blank_credentials_send_nothing() {
    let server = TestServer::start(Vec::new());
    let lex = api(&server, MemorySessionStore::new());
    let err = lex.login("", "x").unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.finish().is_empty());
}

#[test]
fn authenticated_calls_carry_token() {
    let server = TestServer::start(vec![Canned::json(
        r#"{"success": true, "data": [
            {"id": 1, "carpeta": "10", "nombre": "Ana", "subetapa_ultimo": "TERMINACIÓN"},
            {"id": 2, "carpeta": 11, "nombre": null}
        ]}"#,
    )]);
    let lex = logged_in(&server);

    let procesos = lex.procesos().unwrap();
    assert_eq!(procesos.len(), 2);
    assert!(procesos[0].is_closed());
    assert_eq!(procesos[1].carpeta, "11");

    let requests = server.finish();
    assert_eq!(requests[0].path, "/process");
    assert_eq!(requests[0].header(TOKEN_HEADER), Some("tok-123"));
}

#[test]
fn http_errors_keep_status_and_body() {
    let server = TestServer::start(vec![Canned::status_json(500, "fallo interno")]);
    let lex = logged_in(&server);

    let err = lex.detalle_proceso("9").unwrap_err();
    assert_eq!(err.to_string(), "HTTP 500 - fallo interno");
    assert_eq!(err.user_message(), "Error de comunicación con el servidor");
    server.finish();
}

#[test]
fn detail_keeps_field_order() {
    let server = TestServer::start(vec![Canned::json(
        r#"{"success": true, "data": {
            "datos_basicos": {"zona": "Norte", "carpeta": "1", "abogado": null},
            "datos_adicionales": {}, "datos_tipo_proceso": {}, "datos_titular": {}
        }}"#,
    )]);
    let lex = logged_in(&server);

    let detalle = lex.detalle_proceso("9").unwrap();
    let keys: Vec<_> = detalle.datos_basicos.keys().collect();
    assert_eq!(keys, vec!["zona", "carpeta", "abogado"]);

    let requests = server.finish();
    assert_eq!(requests[0].json()["idProceso"], "9");
}

#[test]
fn field_update_posts_resolved_value() {
    let server = TestServer::start(vec![
        Canned::json(r#"{"success": true, "message": "Dato actualizado"}"#),
        Canned::json(r#"{"success": false}"#),
    ]);
    let lex = logged_in(&server);

    let message = lex
        .actualizar_campo("9", "tbl_proceso", "juzgado_inicial_id", &EditValue::Id(7))
        .unwrap();
    assert_eq!(message.as_deref(), Some("Dato actualizado"));

    let err = lex
        .actualizar_campo("9", "tbl_proceso", "carpeta_id", &EditValue::Unset)
        .unwrap_err();
    assert_eq!(err.user_message(), "No fue posible actualizar el dato");

    let requests = server.finish();
    let body = requests[0].json();
    assert_eq!(body["idProceso"], "9");
    assert_eq!(body["campo"], "juzgado_inicial_id");
    assert_eq!(body["valor"], 7);
    assert_eq!(body["usuario"], "ana");
    assert_eq!(requests[1].json()["valor"], "");
}

#[test]
fn validation_failures_never_reach_the_server() {
    let server = TestServer::start(Vec::new());
    let lex = logged_in(&server);

    assert!(matches!(
        lex.nueva_observacion("9", "   "),
        Err(ClientError::Validation(_))
    ));
    let incomplete = DatosObligacion {
        obligacion: "123".into(),
        ..DatosObligacion::default()
    };
    assert!(matches!(
        lex.crear_obligacion("9", &incomplete),
        Err(ClientError::Validation(_))
    ));
    assert!(matches!(
        lex.actualizar_subetapa("9", 20, "02/05/2024", ""),
        Err(ClientError::Validation(_))
    ));
    let no_files: [&str; 0] = [];
    assert!(lex.subir_documentos("9", 20, &no_files).is_err());

    assert!(server.finish().is_empty());
}

#[test]
fn new_obligation_is_normalized() {
    let server = TestServer::start(vec![Canned::json(r#"{"success": true}"#)]);
    let lex = logged_in(&server);

    let datos = DatosObligacion {
        obligacion: " 4455 ".into(),
        capital: "1000000".into(),
        diasmora: String::new(),
    };
    lex.crear_obligacion("9", &datos).unwrap();

    let body = server.finish()[0].json();
    assert_eq!(body["obligacion"], "4455");
    assert_eq!(body["diasmora"], "0");
    assert_eq!(body["idProceso"], "9");
}

fn nuevo_proceso() -> NuevoProceso {
    NuevoProceso {
        nombre1: "Marta Ruiz".into(),
        cedula1: "55".into(),
        fecha_recibo: "2024-05-02".into(),
        capital: "1000000".into(),
        cuantia: "2".into(),
        tipo_proceso: "1".into(),
        ciudad: "11".into(),
        juzgado_inicial: "7".into(),
        dependiente: "4".into(),
        clasificacion: "5".into(),
        sub_clasificacion: "6".into(),
        sub_clasificacion_alterna: "8".into(),
        radicado: "2024-00012".into(),
        ..NuevoProceso::default()
    }
}

#[test]
fn new_case_is_posted_as_datos_with_session_user() {
    let server = TestServer::start(vec![
        Canned::json(r#"{"success": true, "message": "Proceso creado"}"#),
        Canned::json(r#"{"success": false}"#),
    ]);
    let lex = logged_in(&server);

    let message = lex.nuevo_proceso(&nuevo_proceso()).unwrap();
    assert_eq!(message.as_deref(), Some("Proceso creado"));
    let err = lex.nuevo_proceso(&nuevo_proceso()).unwrap_err();
    assert_eq!(err.user_message(), "No fue posible crear el proceso");

    let requests = server.finish();
    assert_eq!(requests[0].path, "/newProcess");
    let datos = &requests[0].json()["datos"];
    assert_eq!(datos["nombre1"], "Marta Ruiz");
    assert_eq!(datos["fechaRecibo"], "2024-05-02");
    assert_eq!(datos["juzgado_inicial"], "7");
    assert_eq!(datos["tipoPH"], "");
    assert_eq!(datos["usuario"], "ana");
}

#[test]
fn new_case_with_blank_required_field_sends_nothing() {
    let server = TestServer::start(Vec::new());
    let lex = logged_in(&server);

    let sin_cedula = NuevoProceso {
        cedula1: "  ".into(),
        ..nuevo_proceso()
    };
    match lex.nuevo_proceso(&sin_cedula) {
        Err(ClientError::Validation(ValidationError::Missing { missing })) => {
            assert_eq!(missing, ["cedula1"]);
        }
        other => panic!("expected missing cedula1, got {other:?}"),
    }

    let mala_fecha = NuevoProceso {
        fecha_recibo: "02/05/2024".into(),
        ..nuevo_proceso()
    };
    assert!(matches!(
        lex.nuevo_proceso(&mala_fecha),
        Err(ClientError::Validation(ValidationError::InvalidDate { .. }))
    ));

    assert!(server.finish().is_empty());
}

#[test]
fn horizontal_property_requires_detail_and_representative() {
    let server = TestServer::start(vec![Canned::json(r#"{"success": true}"#)]);
    let lex = logged_in(&server);

    let ph = NuevoProceso {
        tipo_ph: Regimen::Residencial,
        nombre_repre: "Luis Gómez".into(),
        ..nuevo_proceso()
    };
    match lex.nuevo_proceso(&ph) {
        Err(ClientError::Validation(ValidationError::Missing { missing })) => {
            assert_eq!(
                missing,
                ["tipoPHDetalle", "tipoPersonaRepre", "tipoIdRepre", "numeroIdRepre"]
            );
        }
        other => panic!("expected missing representative, got {other:?}"),
    }

    let no_aplica = NuevoProceso {
        tipo_ph: Regimen::NoAplica,
        ..nuevo_proceso()
    };
    lex.nuevo_proceso(&no_aplica).unwrap();

    let requests = server.finish();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].json()["datos"]["tipoPH"], "no_aplica");
}

#[test]
fn rejected_envelope_surfaces_message() {
    let server = TestServer::start(vec![Canned::json(
        r#"{"success": false, "message": "Proceso inexistente"}"#,
    )]);
    let lex = logged_in(&server);
    let err = lex.observaciones("404").unwrap_err();
    assert_eq!(err.user_message(), "Proceso inexistente");
    server.finish();
}

#[test]
fn history_is_adapted() {
    let server = TestServer::start(vec![Canned::json(
        r#"{"success": true, "data": [
            {"subetapa": "RADICACION", "fecha_seleccion": "2024-04-01",
             "observacion": "ok", "usuario": "luis", "fecha_modificacion": "2024-04-02"}
        ]}"#,
    )]);
    let lex = logged_in(&server);
    let historico = lex.historico("9").unwrap();
    assert_eq!(historico[0].fecha, "2024-04-01");
    assert_eq!(historico[0].siguiente_gestion.as_deref(), Some("luis"));
    assert_eq!(server.finish()[0].path, "/historySub");
}

#[test]
fn downloads_return_bytes_or_status() {
    let server = TestServer::start(vec![
        Canned::bytes(200, b"id;nombre\n1;Ana\n"),
        Canned::bytes(404, b""),
    ]);
    let lex = logged_in(&server);

    assert_eq!(lex.base_procesal("  ").unwrap(), b"id;nombre\n1;Ana\n");
    let err = lex.descargar_documento(31).unwrap_err();
    assert_eq!(err.to_string(), "Error descargando archivo (404)");

    let requests = server.finish();
    assert_eq!(requests[0].json()["nombreInforme"], "base_procesal_general");
    assert_eq!(requests[1].json()["id"], 31);
}

#[test]
fn documents_are_uploaded_as_multipart() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("poder.pdf");
    std::fs::write(&file, b"%PDF-1.4").unwrap();

    let server = TestServer::start(vec![Canned::json(r#"{"success": true}"#)]);
    let lex = logged_in(&server);
    lex.subir_documentos("9", 20, &[&file]).unwrap();

    let requests = server.finish();
    let content_type = requests[0].header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = requests[0].body_text();
    assert!(body.contains("name=\"files\""));
    assert!(body.contains("poder.pdf"));
    assert!(body.contains("name=\"idRelacionSub\""));
    assert_eq!(requests[0].header(TOKEN_HEADER), Some("tok-123"));
}

#[test]
fn missing_base_url_is_a_config_error() {
    let client = lex_client::ApiClient::new(
        lex_client::ClientConfig::default(),
        Box::new(MemorySessionStore::with_session(common::session())),
    )
    .unwrap();
    let lex = lex_client::LexApi::new(client);
    assert!(matches!(lex.procesos(), Err(ClientError::Config(_))));
}
