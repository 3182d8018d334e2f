//! Files written by the CLI: CSV exports and downloaded reports.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lex_client::BASE_PROCESAL_DEFAULT;
use lex_model::ProcesoResumen;
use tracing::info;

/// Write the case list as CSV with the on-screen column headers.
pub fn write_procesos_csv<W: Write>(writer: W, procesos: &[&ProcesoResumen]) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ProcesoResumen::COLUMNS)
        .context("write CSV header")?;
    for proceso in procesos {
        csv.write_record(proceso.cells()).context("write CSV row")?;
    }
    csv.flush().context("flush CSV")?;
    Ok(())
}

pub fn export_procesos(path: &Path, procesos: &[&ProcesoResumen]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    write_procesos_csv(file, procesos)?;
    info!(path = %path.display(), rows = procesos.len(), "case list exported");
    Ok(())
}

/// Default file name of a downloaded report: `<nombre>.csv`, with a blank
/// name standing for the general report.
pub fn report_path(nombre_informe: &str, output: Option<&Path>) -> PathBuf {
    match (output, nombre_informe.trim()) {
        (Some(path), _) => path.to_path_buf(),
        (None, "") => PathBuf::from(format!("{BASE_PROCESAL_DEFAULT}.csv")),
        (None, nombre) => PathBuf::from(format!("{nombre}.csv")),
    }
}

/// Save downloaded bytes, creating parent directories.
pub fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "file saved");
    Ok(())
}
