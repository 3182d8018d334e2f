use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span};

use lex_cli::edit::plan_edit;
use lex_cli::export::{export_procesos, report_path, save_bytes};
use lex_cli::nuevo::{read_form, template};
use lex_cli::render::{
    actualizaciones_table, alert_line, alternas_table, apply_table_style, documentos_table,
    etapas_table, fields_table, historico_table, obligaciones_table, observaciones_table,
    procesos_table,
};
use lex_client::{ApiClient, ClientConfig, FileSessionStore, LexApi};
use lex_model::{DatosObligacion, NuevoJuzgado, filter_procesos};
use lex_ui::{Alert, RecordSection, project_detalle};

use crate::cli::{
    BaseArgs, ConfigArgs, DepartamentosArgs, DescargarArgs, DocumentosArgs, EditarArgs,
    EtapasArgs, HistoricoArgs, JuzgadoArgs, LoginArgs, NuevoArgs, ObligacionesArgs,
    ObservacionesArgs, ProcesoArgs, ProcesosArgs,
};

fn connect() -> Result<LexApi> {
    let config = ClientConfig::load();
    let store = FileSessionStore::default_location()
        .context("no data directory available for the session")?;
    debug!(session = %store.path().display(), "session store");
    let client = ApiClient::new(config, Box::new(store))?;
    Ok(LexApi::new(client))
}

fn success(text: &str) {
    println!("{}", alert_line(&Alert::success(text)));
}

pub fn run_login(args: &LoginArgs) -> Result<()> {
    let api = connect()?;
    let session = api.login(&args.usuario, &args.password)?;
    success(&format!("Bienvenido, {}", session.usuario));
    Ok(())
}

pub fn run_logout() -> Result<()> {
    connect()?.logout()?;
    success("Sesión cerrada");
    Ok(())
}

pub fn run_procesos(args: &ProcesosArgs) -> Result<()> {
    let api = connect()?;
    let procesos = api.procesos()?;
    let query = args.buscar.as_deref().unwrap_or_default();
    let visibles = filter_procesos(&procesos, query);
    println!("{}", procesos_table(&visibles));
    println!("{} de {} procesos", visibles.len(), procesos.len());
    if let Some(path) = &args.csv {
        export_procesos(path, &visibles)?;
        success(&format!("Exportado a {}", path.display()));
    }
    Ok(())
}

pub fn run_proceso(args: &ProcesoArgs) -> Result<()> {
    let span = info_span!("proceso", id = %args.id);
    let _guard = span.enter();
    let api = connect()?;

    let general = api.proceso_general(&args.id)?;
    if let Some(record) = general.principal() {
        let section = RecordSection::DatosGenerales;
        println!("{}", section.title());
        println!("{}", fields_table(&section.project(record, None), false));
    }

    if args.detalle {
        let detalle = api.detalle_proceso(&args.id)?;
        let catalogos = api.catalogos()?;
        for (section, rows) in project_detalle(&detalle, Some(&catalogos)) {
            println!("{}", section.title());
            println!("{}", fields_table(&rows, true));
        }
    }
    Ok(())
}

pub fn run_nuevo(args: &NuevoArgs) -> Result<()> {
    let path = match &args.archivo {
        Some(path) if !args.plantilla => path,
        _ => {
            print!("{}", template()?);
            return Ok(());
        }
    };
    let proceso = read_form(path)?;
    let message = connect()?.nuevo_proceso(&proceso)?;
    success(message.as_deref().unwrap_or("Proceso creado"));
    Ok(())
}

pub fn run_editar(args: &EditarArgs) -> Result<()> {
    let api = connect()?;
    let detalle = api.detalle_proceso(&args.id)?;
    let catalogos = api.catalogos()?;
    let edit = plan_edit(
        &detalle,
        &catalogos,
        &args.campo,
        &args.valor,
        args.tabla.as_deref(),
    )?;
    info!(tabla = %edit.tabla, campo = %edit.campo, "updating field");
    let message = api.actualizar_campo(&args.id, &edit.tabla, &edit.campo, &edit.valor)?;
    success(message.as_deref().unwrap_or("Dato actualizado"));
    Ok(())
}

pub fn run_observaciones(args: &ObservacionesArgs) -> Result<()> {
    let api = connect()?;
    if let Some(texto) = &args.nueva {
        api.nueva_observacion(&args.id, texto)?;
        success("Observación registrada");
    }
    println!("{}", observaciones_table(&api.observaciones(&args.id)?));
    Ok(())
}

pub fn run_obligaciones(args: &ObligacionesArgs) -> Result<()> {
    let api = connect()?;
    let datos = DatosObligacion {
        obligacion: args.obligacion.clone(),
        capital: args.capital.clone(),
        diasmora: args.diasmora.clone(),
    };
    if let Some(id) = args.actualizar {
        // Fields left out keep their current value.
        let actual = api
            .obligaciones(&args.id)?
            .iter()
            .find(|obligacion| obligacion.id == id)
            .map(DatosObligacion::from)
            .with_context(|| format!("el proceso no tiene la obligación {id}"))?;
        let datos = DatosObligacion {
            obligacion: or_current(datos.obligacion, actual.obligacion),
            capital: or_current(datos.capital, actual.capital),
            diasmora: or_current(datos.diasmora, actual.diasmora),
        };
        api.actualizar_obligacion(id, &args.id, &datos)?;
        success("Obligación actualizada");
    } else if args.crear {
        api.crear_obligacion(&args.id, &datos)?;
        success("Obligación creada");
    }
    println!("{}", obligaciones_table(&api.obligaciones(&args.id)?));
    Ok(())
}

fn or_current(nuevo: String, actual: String) -> String {
    if nuevo.trim().is_empty() { actual } else { nuevo }
}

pub fn run_etapas(args: &EtapasArgs) -> Result<()> {
    let api = connect()?;

    if let Some(id_alterna) = args.nueva_alterna {
        api.crear_registro_alterno(&args.id, id_alterna, &args.observacion)?;
        success("Registro alterno creado");
    }
    if let (Some(id_relacion_sub), Some(fecha)) = (args.marcar, args.fecha.as_deref()) {
        match args.registro {
            Some(id_registro) => api.actualizar_subetapa_alterna(
                &args.id,
                id_registro,
                id_relacion_sub,
                fecha,
                &args.observacion,
            )?,
            None => {
                api.actualizar_subetapa(&args.id, id_relacion_sub, fecha, &args.observacion)?
            }
        }
        success("Subetapa actualizada");
    }

    let etapas = api.subetapas(&args.id)?;
    println!("{}", etapas_table(&etapas));
    let (marcadas, total) = etapas.progress();
    match etapas.current() {
        Some(actual) => println!("{marcadas}/{total} subetapas - actual: {}", actual.subetapa),
        None => println!("{marcadas}/{total} subetapas"),
    }

    if args.alternas {
        let catalogo = api.subetapas_alternas(&args.id)?;
        let mut kinds = Table::new();
        kinds.set_header(vec!["Etapa", "Medida", "Id"]);
        apply_table_style(&mut kinds);
        for (nombre, def) in &catalogo.datos_alternas {
            kinds.add_row(vec![
                def.ordinal_etapa.to_string(),
                nombre.clone(),
                def.id_etapa.to_string(),
            ]);
        }
        println!("{kinds}");
        println!("{}", alternas_table(&api.datos_alternos(&args.id)?));
    }
    Ok(())
}

pub fn run_historico(args: &HistoricoArgs) -> Result<()> {
    let api = connect()?;
    match args.subetapa {
        Some(id_relacion_sub) => {
            let items = api.historico_subetapa(&args.id, id_relacion_sub, args.registro)?;
            println!("{}", actualizaciones_table(&items));
        }
        None => println!("{}", historico_table(&api.historico(&args.id)?)),
    }
    Ok(())
}

pub fn run_documentos(args: &DocumentosArgs) -> Result<()> {
    let api = connect()?;
    if let Some(id) = args.eliminar {
        let message = api.eliminar_documento(id)?;
        success(message.as_deref().unwrap_or("Documento eliminado"));
    }
    if !args.subir.is_empty() {
        api.subir_documentos(&args.id, args.id_relacion_sub, &args.subir)?;
        success(&format!("{} documento(s) cargado(s)", args.subir.len()));
    }
    let documentos = api.documentos(&args.id, args.id_relacion_sub)?;
    println!("{}", documentos_table(&documentos));
    Ok(())
}

pub fn run_descargar(args: &DescargarArgs) -> Result<()> {
    let bytes = connect()?.descargar_documento(args.id_documento)?;
    save_bytes(&args.output, &bytes)?;
    success(&format!("Guardado en {}", args.output.display()));
    Ok(())
}

pub fn run_base(args: &BaseArgs) -> Result<()> {
    let bytes = connect()?.base_procesal(&args.nombre_informe)?;
    let path = report_path(&args.nombre_informe, args.output.as_deref());
    save_bytes(&path, &bytes)?;
    success(&format!("Informe guardado en {}", path.display()));
    Ok(())
}

pub fn run_juzgado(args: &JuzgadoArgs) -> Result<()> {
    let juzgado = NuevoJuzgado {
        nombre_juzgado: args.nombre.clone(),
        correo: args.correo.clone(),
        telefono: args.telefono.clone(),
        direccion: args.direccion.clone(),
    };
    let message = connect()?.nuevo_juzgado(&juzgado)?;
    success(message.as_deref().unwrap_or("Juzgado creado"));
    Ok(())
}

pub fn run_departamentos(args: &DepartamentosArgs) -> Result<()> {
    let departamentos = connect()?.buscar_departamentos(&args.ciudad)?;
    let mut table = Table::new();
    let header: Vec<&str> = departamentos
        .first()
        .map(|first| first.keys().collect())
        .unwrap_or_default();
    table.set_header(header.clone());
    apply_table_style(&mut table);
    for departamento in &departamentos {
        table.add_row(header.iter().map(|key| {
            departamento
                .get(key)
                .and_then(|value| value.display())
                .unwrap_or_default()
        }));
    }
    println!("{table}");
    Ok(())
}

pub fn run_config(args: &ConfigArgs) -> Result<()> {
    if args.api_url.is_none() && args.timeout.is_none() {
        let config = ClientConfig::load();
        let mut table = Table::new();
        table.set_header(vec!["Clave", "Valor"]);
        apply_table_style(&mut table);
        table.add_row(vec!["api_url".to_string(), config.api_url.clone()]);
        table.add_row(vec!["timeout_secs".to_string(), config.timeout_secs.to_string()]);
        if let Some(path) = ClientConfig::config_path() {
            table.add_row(vec!["archivo".to_string(), path.display().to_string()]);
        }
        println!("{table}");
        return Ok(());
    }
    // Edit the stored file, not the environment-overridden view.
    let mut config = ClientConfig::config_path()
        .map(|path| ClientConfig::load_from(&path))
        .unwrap_or_default();
    if let Some(url) = &args.api_url {
        config.api_url = url.trim().to_string();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    let path = config.save()?;
    success(&format!("Configuración guardada en {}", path.display()));
    Ok(())
}
