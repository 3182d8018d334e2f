//! CLI argument definitions for the `lex` client.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use lex_client::BASE_PROCESAL_DEFAULT;

#[derive(Parser)]
#[command(
    name = "lex",
    version,
    about = "Lex & Safety - consulta y gestión de procesos",
    long_about = "Client for the Lex & Safety case-records backend.\n\n\
                  The backend URL comes from LEX_API_URL or `lex config --api-url`."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in and store the session.
    Login(LoginArgs),

    /// Forget the stored session.
    Logout,

    /// List cases.
    Procesos(ProcesosArgs),

    /// Show the general data of a case.
    Proceso(ProcesoArgs),

    /// Open a new case from a TOML form file.
    Nuevo(NuevoArgs),

    /// Update one field of a case.
    Editar(EditarArgs),

    /// List or add observations.
    Observaciones(ObservacionesArgs),

    /// List, create or update obligations.
    Obligaciones(ObligacionesArgs),

    /// Show the workflow stages or mark a sub-stage.
    Etapas(EtapasArgs),

    /// Management history, or the update trail of one sub-stage.
    Historico(HistoricoArgs),

    /// List, upload or delete the documents of a sub-stage.
    Documentos(DocumentosArgs),

    /// Download a document.
    Descargar(DescargarArgs),

    /// Download a procedural-base CSV report.
    Base(BaseArgs),

    /// Register a new court.
    Juzgado(JuzgadoArgs),

    /// Search departments by city name.
    Departamentos(DepartamentosArgs),

    /// Show or change the stored configuration.
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    pub usuario: String,

    #[arg(long, env = "LEX_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args)]
pub struct ProcesosArgs {
    /// Case-insensitive text matched against every column.
    #[arg(long)]
    pub buscar: Option<String>,

    /// Also write the listed cases to this CSV file.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,
}

#[derive(Args)]
pub struct ProcesoArgs {
    pub id: String,

    /// Include the basic, additional, type and holder sections.
    #[arg(long)]
    pub detalle: bool,
}

#[derive(Args)]
pub struct NuevoArgs {
    /// Form file; keys are the backend field names.
    #[arg(required_unless_present = "plantilla")]
    pub archivo: Option<PathBuf>,

    /// Print a blank form instead of sending one.
    #[arg(long, conflicts_with = "archivo")]
    pub plantilla: bool,
}

#[derive(Args)]
pub struct EditarArgs {
    pub id: String,

    /// Field key as shown by `proceso --detalle`, or a backend column with --tabla.
    pub campo: String,

    /// New value; catalog fields take the option label or id.
    pub valor: String,

    /// Write `campo` of this table directly.
    #[arg(long)]
    pub tabla: Option<String>,
}

#[derive(Args)]
pub struct ObservacionesArgs {
    pub id: String,

    /// Add this observation before listing.
    #[arg(long)]
    pub nueva: Option<String>,
}

#[derive(Args)]
pub struct ObligacionesArgs {
    pub id: String,

    /// Create an obligation with these fields.
    #[arg(long)]
    pub crear: bool,

    /// Update the obligation with this id; fields left out keep their value.
    #[arg(long, value_name = "ID", conflicts_with = "crear")]
    pub actualizar: Option<i64>,

    #[arg(long, default_value = "")]
    pub obligacion: String,

    #[arg(long, default_value = "")]
    pub capital: String,

    /// Days in arrears (0 when empty).
    #[arg(long, default_value = "")]
    pub diasmora: String,
}

#[derive(Args)]
pub struct EtapasArgs {
    pub id: String,

    /// Also show the alternate tracks.
    #[arg(long)]
    pub alternas: bool,

    /// Mark this sub-stage (id_relacion_sub).
    #[arg(long, value_name = "ID_RELACION_SUB", requires = "fecha")]
    pub marcar: Option<i64>,

    /// Alternate track the marked sub-stage belongs to.
    #[arg(long, value_name = "ID_REGISTRO", requires = "marcar")]
    pub registro: Option<i64>,

    /// Open a new alternate track of this kind.
    #[arg(long, value_name = "ID_ALTERNA", conflicts_with = "marcar")]
    pub nueva_alterna: Option<i64>,

    /// Date of the mark (YYYY-MM-DD).
    #[arg(long)]
    pub fecha: Option<String>,

    /// Observation of the mark, or description of the new track.
    #[arg(long, default_value = "")]
    pub observacion: String,
}

#[derive(Args)]
pub struct HistoricoArgs {
    pub id: String,

    /// Show the update trail of this sub-stage instead.
    #[arg(long, value_name = "ID_RELACION_SUB")]
    pub subetapa: Option<i64>,

    #[arg(long, value_name = "ID_REGISTRO", requires = "subetapa")]
    pub registro: Option<i64>,
}

#[derive(Args)]
pub struct DocumentosArgs {
    pub id: String,

    pub id_relacion_sub: i64,

    /// Upload these files first.
    #[arg(long, value_name = "FILE", num_args = 1..)]
    pub subir: Vec<PathBuf>,

    /// Delete the document with this id first.
    #[arg(long, value_name = "ID_DOCUMENTO")]
    pub eliminar: Option<i64>,
}

#[derive(Args)]
pub struct DescargarArgs {
    pub id_documento: i64,

    #[arg(short, long, value_name = "PATH")]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct BaseArgs {
    #[arg(default_value = BASE_PROCESAL_DEFAULT)]
    pub nombre_informe: String,

    /// Destination file (default: <NOMBRE_INFORME>.csv).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct JuzgadoArgs {
    #[arg(long)]
    pub nombre: String,

    #[arg(long)]
    pub correo: String,

    #[arg(long)]
    pub telefono: String,

    #[arg(long)]
    pub direccion: String,
}

#[derive(Args)]
pub struct DepartamentosArgs {
    pub ciudad: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Store this backend base URL.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Store this request timeout.
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
