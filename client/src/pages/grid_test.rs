use super::*;
use serde_json::json;

fn session_on(resource: &str) -> GridSession {
    let mut session = GridSession::new(GridConfig::default());
    let row = json!({ "id": 1, "nombre": "Ana" }).as_object().cloned().unwrap();
    session.apply_dataset(Endpoint::named(resource).unwrap(), &["id".to_owned(), "nombre".to_owned()], vec![row]);
    session
}

#[test]
fn dataset_target_resolves_bare_names_under_api_base() {
    let config = GridConfig::default();
    assert_eq!(dataset_target("usuarios", &config).as_deref(), Some("/api/usuarios"));
    assert_eq!(dataset_target("  proyectos ", &config).as_deref(), Some("/api/proyectos"));
}

#[test]
fn dataset_target_keeps_urls_as_typed() {
    let config = GridConfig::default();
    assert_eq!(dataset_target("/api/empresas", &config).as_deref(), Some("/api/empresas"));
    assert_eq!(
        dataset_target("http://localhost:5000/api/datos?x=1", &config).as_deref(),
        Some("http://localhost:5000/api/datos?x=1")
    );
}

#[test]
fn dataset_target_ignores_blank_input() {
    assert!(dataset_target("   ", &GridConfig::default()).is_none());
}

#[test]
fn page_heading_prefers_dataset_title() {
    assert_eq!(page_heading(&session_on("empresas"), true), "Empresas");
}

#[test]
fn page_heading_before_first_load() {
    let session = GridSession::new(GridConfig::default());
    assert_eq!(page_heading(&session, true), "Loading...");
    assert_eq!(page_heading(&session, false), "No dataset");
}
