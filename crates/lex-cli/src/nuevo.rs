//! TOML form files for `lex nuevo`.
//!
//! Keys use the backend field names (`nombre1`, `fechaRecibo`, `tipoPH`, ...).
//! Keys left out are sent empty.

use std::path::Path;

use anyhow::{Context, Result};
use lex_model::NuevoProceso;

pub fn parse_form(content: &str) -> Result<NuevoProceso> {
    let proceso: NuevoProceso = toml::from_str(content).context("invalid case form")?;
    Ok(proceso)
}

pub fn read_form(path: &Path) -> Result<NuevoProceso> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read {}", path.display()))?;
    parse_form(&content).with_context(|| format!("in {}", path.display()))
}

/// Blank form listing every key, ready to be filled in.
pub fn template() -> Result<String> {
    toml::to_string_pretty(&NuevoProceso::default()).context("render case form")
}
