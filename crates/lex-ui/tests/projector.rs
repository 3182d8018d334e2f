//! Record projection of backend sections.

use lex_model::{Catalogos, FieldRecord, FieldValue};
use lex_ui::{
    CatalogResolver, EMPTY_DISPLAY, EditValue, Exclusions, FieldTableMap, ReadOnly, TableEdit,
    project,
};
use proptest::prelude::*;

fn record(json: &str) -> FieldRecord {
    serde_json::from_str(json).unwrap()
}

fn catalogos() -> Catalogos {
    serde_json::from_str(
        r#"{"juzgado": [
            {"id": 7, "juzgado": "Juzgado Primero"},
            {"id": 8, "juzgado": "Juzgado Segundo"}
        ]}"#,
    )
    .unwrap()
}

#[test]
fn excluded_keys_are_dropped_in_order() {
    let rec = record(r#"{"tabla": "tbl_titular", "id": 1, "nombre": "Ana", "cedula": "1020"}"#);
    let exclusions: Exclusions = ["tabla", "id"].into_iter().collect();
    let labels: Vec<_> = project(&rec, &exclusions, &ReadOnly, None)
        .into_iter()
        .map(|row| row.key)
        .collect();
    assert_eq!(labels, vec!["nombre", "cedula"]);
}

#[test]
fn null_date_is_shown_as_placeholder() {
    let rec = record(r#"{"fecha_recibo": null}"#);
    let rows = project(&rec, &Exclusions::default(), &ReadOnly, None);
    assert_eq!(rows[0].label, "Fecha Recibo");
    assert_eq!(rows[0].value, EMPTY_DISPLAY);
}

#[test]
fn accented_words_keep_their_letters() {
    let rec = record(r#"{"numero_licencia_tránsito": "X-1"}"#);
    let rows = project(&rec, &Exclusions::default(), &ReadOnly, None);
    assert_eq!(rows[0].label, "Numero Licencia Tránsito");
}

#[test]
fn court_label_resolves_to_catalog_id() {
    let catalogos = catalogos();
    let rec = record(r#"{"juzgado_inicial": "Juzgado Primero", "juzgado_conocimiento": "Juzgado Noveno"}"#);
    let policy = TableEdit::new("tbl_proceso").with_suffix("_id");
    let rows = project(&rec, &Exclusions::default(), &policy, Some(&catalogos));
    assert_eq!(rows[0].edit_value, EditValue::Id(7));
    assert_eq!(rows[1].edit_value, EditValue::Unset);
    assert!(rows[1].editable);
}

#[test]
fn resolver_called_with_target_column() {
    let rec = record(r#"{"cuantia": "MINIMA"}"#);
    let policy = TableEdit::new("tbl_proceso").with_suffix("_id");
    let seen = std::cell::RefCell::new(Vec::new());
    let resolver = |campo: &str, display: &str| {
        seen.borrow_mut().push(format!("{campo}={display}"));
        EditValue::Unset
    };
    project(&rec, &Exclusions::default(), &policy, Some(&resolver as &dyn CatalogResolver));
    assert_eq!(seen.into_inner(), vec!["cuantia_id=MINIMA"]);
}

#[test]
fn projected_section_snapshot() {
    let rec = record(
        r#"{"tabla": "tbl_vehiculo", "placa": "ABC123", "modelo": 2020, "embargado": false, "observacion": null}"#,
    );
    let policy = FieldTableMap::new().field("placa", "tbl_vehiculo");
    let rows = project(&rec, &Exclusions::default(), &policy, None);
    insta::assert_json_snapshot!(rows, @r#"
    [
      {
        "key": "placa",
        "label": "Placa",
        "value": "ABC123",
        "editable": true,
        "edit_target_key": "placa",
        "source_table": "tbl_vehiculo",
        "edit_value": "ABC123"
      },
      {
        "key": "modelo",
        "label": "Modelo",
        "value": "2020",
        "editable": false,
        "edit_target_key": "",
        "source_table": "",
        "edit_value": ""
      },
      {
        "key": "embargado",
        "label": "Embargado",
        "value": "false",
        "editable": false,
        "edit_target_key": "",
        "source_table": "",
        "edit_value": ""
      },
      {
        "key": "observacion",
        "label": "Observacion",
        "value": "—",
        "editable": false,
        "edit_target_key": "",
        "source_table": "",
        "edit_value": ""
      }
    ]
    "#);
}

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        Just(FieldValue::Null),
        "[a-zA-Z0-9 áéíóú]{0,12}".prop_map(FieldValue::Text),
        any::<i64>().prop_map(FieldValue::from),
        any::<bool>().prop_map(FieldValue::Bool),
        "[a-z]{1,6}".prop_map(FieldValue::Unsupported),
    ]
}

fn field_record() -> impl Strategy<Value = FieldRecord> {
    prop::collection::vec(("[a-z_]{1,10}", field_value()), 0..12)
        .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    #[test]
    fn projection_is_deterministic(rec in field_record()) {
        let catalogos = catalogos();
        let policy = TableEdit::new("tbl_proceso").with_suffix("_id");
        let first = project(&rec, &Exclusions::default(), &policy, Some(&catalogos));
        let second = project(&rec, &Exclusions::default(), &policy, Some(&catalogos));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn projection_keeps_order_and_never_shows_blanks(rec in field_record()) {
        let exclusions = Exclusions::default();
        let rows = project(&rec, &exclusions, &TableEdit::new("t"), None);
        let expected: Vec<&str> = rec.keys().filter(|key| !exclusions.contains(key)).collect();
        let keys: Vec<&str> = rows.iter().map(|row| row.key.as_str()).collect();
        prop_assert_eq!(keys, expected);
        for row in &rows {
            prop_assert!(!row.value.trim().is_empty());
        }
    }
}
