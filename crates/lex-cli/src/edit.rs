//! Turning `lex editar <campo> <valor>` into a field update.

use anyhow::{Result, bail};
use lex_model::{Catalogos, DetalleProceso, is_catalog_field};
use lex_ui::{CatalogResolver, EditValue, RecordSection, project_detalle};

use crate::render::options_table;

/// A resolved field update, ready for `actualizar_campo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub tabla: String,
    pub campo: String,
    pub valor: EditValue,
}

/// Resolve `campo` against the projected detail view of a case.
///
/// `campo` may be the displayed key or its edit target (`juzgado` or
/// `juzgado_id`). With `tabla` the column is written directly and no lookup
/// happens. Catalog columns accept the option label or its numeric id.
pub fn plan_edit(
    detalle: &DetalleProceso,
    catalogos: &Catalogos,
    campo: &str,
    valor: &str,
    tabla: Option<&str>,
) -> Result<FieldEdit> {
    if let Some(tabla) = tabla.map(str::trim).filter(|t| !t.is_empty()) {
        return Ok(FieldEdit {
            tabla: tabla.to_string(),
            campo: campo.to_string(),
            valor: catalog_value(catalogos, campo, valor)?,
        });
    }

    // The same key may be read-only in one section and editable in another.
    let mut matches: Vec<_> = project_detalle(detalle, Some(catalogos))
        .into_iter()
        .flat_map(|(section, rows)| rows.into_iter().map(move |row| (section, row)))
        .filter(|(_, row)| row.key == campo || (row.editable && row.edit_target_key == campo))
        .collect();
    if matches.is_empty() {
        bail!("el proceso no tiene el campo '{campo}'");
    }
    let chosen = matches.iter().position(|(_, row)| row.editable).unwrap_or(0);
    let (section, row) = matches.swap_remove(chosen);
    if !row.editable {
        bail!("el campo '{}' ({}) no es editable", row.key, section.title());
    }

    let valor = if section == RecordSection::DatosBasicos {
        catalog_value(catalogos, &row.edit_target_key, valor)?
    } else {
        EditValue::Text(valor.to_string())
    };
    Ok(FieldEdit {
        tabla: row.source_table,
        campo: row.edit_target_key,
        valor,
    })
}

fn catalog_value(catalogos: &Catalogos, campo: &str, valor: &str) -> Result<EditValue> {
    if !is_catalog_field(campo) {
        return Ok(EditValue::Text(valor.to_string()));
    }
    if let Ok(id) = valor.trim().parse::<i64>()
        && catalogos.label_of(campo, id).is_some()
    {
        return Ok(EditValue::Id(id));
    }
    match catalogos.resolve(campo, valor) {
        EditValue::Unset => {
            let options = catalogos.options_for_field(campo).unwrap_or_default();
            bail!(
                "'{valor}' no es una opción válida de {campo}\n{}",
                options_table(&options)
            )
        }
        resolved => Ok(resolved),
    }
}
