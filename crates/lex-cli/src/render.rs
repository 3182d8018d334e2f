//! Terminal tables for the command output.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use lex_model::{
    ActualizacionSubetapa, CatalogOption, DatosAlternos, Documento, EtapasProceso, ItemGestion,
    Obligacion, Observacion, ProcesoResumen,
};
use lex_ui::{Alert, AlertKind, DisplayField, EMPTY_DISPLAY};

/// Marker shown next to editable fields.
pub const EDIT_MARKER: &str = "✎";

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn styled(header: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_header(header.to_vec());
    apply_table_style(&mut table);
    table
}

fn or_empty(value: Option<&str>) -> &str {
    value.filter(|v| !v.trim().is_empty()).unwrap_or(EMPTY_DISPLAY)
}

/// Case list; closed cases are shown in red.
pub fn procesos_table(procesos: &[&ProcesoResumen]) -> Table {
    let mut table = styled(&ProcesoResumen::COLUMNS);
    for proceso in procesos {
        let closed = proceso.is_closed();
        table.add_row(proceso.cells().into_iter().map(|value| {
            let cell = Cell::new(value);
            if closed { cell.fg(Color::Red) } else { cell }
        }));
    }
    table
}

/// Projected fields of one record section.
pub fn fields_table(rows: &[DisplayField], show_targets: bool) -> Table {
    let mut header = vec!["Campo", "Valor"];
    if show_targets {
        header.extend(["", "Destino"]);
    }
    let mut table = styled(&header);
    for row in rows {
        let mut cells = vec![
            Cell::new(&row.label).add_attribute(Attribute::Bold),
            Cell::new(&row.value),
        ];
        if show_targets {
            let (marker, target) = if row.editable {
                (EDIT_MARKER, format!("{}.{}", row.source_table, row.edit_target_key))
            } else {
                ("", String::new())
            };
            cells.push(Cell::new(marker));
            cells.push(Cell::new(target));
        }
        table.add_row(cells);
    }
    table
}

pub fn observaciones_table(observaciones: &[Observacion]) -> Table {
    let mut table = styled(&["Fecha", "Usuario", "Observación"]);
    for obs in observaciones {
        table.add_row(vec![&obs.fecha_actualizacion, &obs.usuario, &obs.observacion]);
    }
    table
}

pub fn obligaciones_table(obligaciones: &[Obligacion]) -> Table {
    let mut table = styled(&["Id", "Obligación", "Capital", "Días mora"]);
    for obligacion in obligaciones {
        table.add_row(vec![
            obligacion.id.to_string(),
            obligacion.obligacion.clone(),
            obligacion.capital.clone(),
            obligacion.diasmora.clone(),
        ]);
    }
    table
}

/// Main workflow, one row per sub-stage in order.
pub fn etapas_table(etapas: &EtapasProceso) -> Table {
    let mut table = styled(&["Etapa", "Subetapa", "Id", "Fecha", "Observación", "Docs"]);
    for etapa in etapas.ordered() {
        for subetapa in etapa.subetapas {
            let fecha = Cell::new(or_empty(subetapa.fecha_marcada.as_deref()));
            table.add_row(vec![
                Cell::new(etapa.nombre),
                Cell::new(&subetapa.subetapa),
                Cell::new(subetapa.id_relacion_sub),
                if subetapa.is_marked() { fecha.fg(Color::Green) } else { fecha },
                Cell::new(or_empty(subetapa.observacion.as_deref())),
                Cell::new(if subetapa.pdf { "sí" } else { "" }),
            ]);
        }
    }
    table
}

/// Opened alternate tracks.
pub fn alternas_table(datos: &DatosAlternos) -> Table {
    let mut table = styled(&["Etapa", "Medida", "Registro", "Subetapa", "Id", "Fecha"]);
    for etapa in datos.values() {
        for (nombre, registro) in &etapa.alternas {
            for subetapa in &registro.subetapas {
                table.add_row(vec![
                    etapa.nombre_etapa.clone(),
                    nombre.clone(),
                    registro.id_registro.to_string(),
                    subetapa.nombre.clone(),
                    subetapa.id_relacion_sub.to_string(),
                    or_empty(subetapa.fecha_act.as_deref()).to_string(),
                ]);
            }
        }
    }
    table
}

pub fn historico_table(items: &[ItemGestion]) -> Table {
    let mut table = styled(&["Fecha", "Subetapa", "Detalle fecha", "Observación", "Siguiente gestión"]);
    for item in items {
        table.add_row(vec![
            item.fecha.as_str(),
            item.subetapa.as_str(),
            or_empty(item.detalle_fecha.as_deref()),
            or_empty(item.observacion.as_deref()),
            or_empty(item.siguiente_gestion.as_deref()),
        ]);
    }
    table
}

pub fn actualizaciones_table(items: &[ActualizacionSubetapa]) -> Table {
    let mut table = styled(&["Fecha", "Fecha gestión", "Usuario", "Observación"]);
    for item in items {
        table.add_row(vec![&item.fecha, &item.fecha_gestion, &item.usuario, &item.observacion]);
    }
    table
}

/// Documents; deleted ones are dimmed and show who removed them.
pub fn documentos_table(documentos: &[Documento]) -> Table {
    let mut table = styled(&["Id", "Nombre", "Usuario", "Fecha", "Estado"]);
    for doc in documentos {
        let estado = if doc.estado {
            Cell::new("activo")
        } else {
            Cell::new(format!(
                "eliminado por {} ({})",
                or_empty(doc.usuario_elimina.as_deref()),
                or_empty(doc.fecha_elimina.as_deref())
            ))
            .add_attribute(Attribute::Dim)
        };
        table.add_row(vec![
            Cell::new(doc.id),
            Cell::new(&doc.nombre),
            Cell::new(&doc.usuario),
            Cell::new(&doc.fecha),
            estado,
        ]);
    }
    table
}

pub fn options_table(options: &[CatalogOption]) -> Table {
    let mut table = styled(&["Id", "Opción"]);
    for option in options {
        table.add_row(vec![option.id.to_string(), option.label.clone()]);
    }
    table
}

/// One-line alert text for the terminal.
pub fn alert_line(alert: &Alert) -> String {
    let prefix = match alert.kind {
        AlertKind::Success => "✔",
        AlertKind::Error => "✖",
        AlertKind::Warning => "!",
        AlertKind::Info => "i",
    };
    format!("{prefix} {alert}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lex_ui::EditValue;

    #[test]
    fn editable_rows_show_target() {
        let rows = vec![DisplayField {
            key: "juzgado_inicial".into(),
            label: "Juzgado Inicial".into(),
            value: "Juzgado Primero".into(),
            editable: true,
            edit_target_key: "juzgado_inicial_id".into(),
            source_table: "tbl_proceso".into(),
            edit_value: EditValue::Id(7),
        }];
        let rendered = fields_table(&rows, true).to_string();
        assert!(rendered.contains(EDIT_MARKER));
        assert!(rendered.contains("tbl_proceso.juzgado_inicial_id"));
        assert!(!fields_table(&rows, false).to_string().contains(EDIT_MARKER));
    }

    #[test]
    fn alert_lines() {
        assert_eq!(
            alert_line(&Alert::error_comunicacion()),
            "✖ Error: Error de comunicación con el servidor"
        );
    }
}
