use super::*;
use serde_json::json;

fn keys(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| (*s).to_owned()).collect()
}

// =============================================================================
// infer_kind
// =============================================================================

#[test]
fn fecha_fields_are_dates() {
    assert_eq!(infer_kind("fecha_nacimiento", &json!("1990-01-02")), InputKind::Date);
}

#[test]
fn fecha_wins_over_numeric_sample() {
    assert_eq!(infer_kind("fecha", &json!(20240101)), InputKind::Date);
}

#[test]
fn numeric_samples_are_numbers() {
    assert_eq!(infer_kind("edad", &json!(34)), InputKind::Number);
    assert_eq!(infer_kind("salario", &json!(1200.5)), InputKind::Number);
}

#[test]
fn numeric_strings_stay_text() {
    assert_eq!(infer_kind("edad", &json!("34")), InputKind::Text);
}

#[test]
fn email_fields_are_emails() {
    assert_eq!(infer_kind("email_contacto", &json!("a@b.c")), InputKind::Email);
}

#[test]
fn everything_else_is_text() {
    assert_eq!(infer_kind("nombre", &json!("Ana")), InputKind::Text);
    assert_eq!(infer_kind("activo", &json!(true)), InputKind::Text);
    assert_eq!(infer_kind("cargo", &Value::Null), InputKind::Text);
}

#[test]
fn html_types_match_kinds() {
    assert_eq!(InputKind::Date.html_type(), "date");
    assert_eq!(InputKind::Number.html_type(), "number");
    assert_eq!(InputKind::Email.html_type(), "email");
    assert_eq!(InputKind::Text.html_type(), "text");
}

// =============================================================================
// labels and ordering
// =============================================================================

#[test]
fn labels_capitalize_and_replace_every_underscore() {
    assert_eq!(label_for("fecha_nacimiento"), "Fecha nacimiento");
    assert_eq!(label_for("fecha_de_fin"), "Fecha de fin");
    assert_eq!(label_for("id"), "Id");
    assert_eq!(label_for(""), "");
}

#[test]
fn id_is_moved_to_the_front() {
    assert_eq!(id_first(&keys(&["nombre", "email", "id", "fecha"])), keys(&["id", "nombre", "email", "fecha"]));
}

#[test]
fn id_is_inserted_when_missing() {
    assert_eq!(id_first(&keys(&["nombre"])), keys(&["id", "nombre"]));
}

// =============================================================================
// Schema
// =============================================================================

#[test]
fn schema_from_records_samples_first_record() {
    let records = vec![
        json!({ "nombre": "Ana", "empleados": 12, "id": 1, "email": "ana@x.es" }).as_object().cloned().unwrap(),
        json!({ "nombre": "Juan", "empleados": "n/a", "id": 2, "extra": true }).as_object().cloned().unwrap(),
    ];
    let schema = Schema::from_records(&records);
    assert_eq!(schema.names(), keys(&["id", "nombre", "empleados", "email"]));
    assert_eq!(schema.column("empleados").map(|c| c.kind), Some(InputKind::Number));
    assert_eq!(schema.column("email").map(|c| c.kind), Some(InputKind::Email));
    assert_eq!(schema.column("id").map(|c| c.kind), Some(InputKind::Number));
    assert!(schema.column("extra").is_none());
}

#[test]
fn schema_of_empty_batch_is_empty() {
    let schema = Schema::from_records(&[]);
    assert!(schema.is_empty());
    assert_eq!(schema.len(), 0);
    assert_eq!(Schema::from_keys(&[], None), Schema::default());
}

#[test]
fn header_labels_end_with_actions() {
    let schema = Schema::from_keys(&keys(&["fecha_inicio", "id"]), None);
    assert_eq!(schema.header_labels(), keys(&["Id", "Fecha inicio", "Actions"]));
}
